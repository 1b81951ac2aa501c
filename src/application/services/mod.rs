//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem) but are themselves
//! concrete structs, not traits.

mod runner;

pub use runner::{
    CaseOutcome, CaseRunner, FileReport, RunReport, ADD_TWO_NUMBERS, CASE_FILE_NAME,
};
