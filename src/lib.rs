//! Add numbers stored as least-significant-digit-first chains of decimal digits.
//!
//! The core is [`add_two_numbers`]; the remaining layers load settings, run
//! `testcases.json` files against the adder and expose everything through the
//! `digitchain` command line tool.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{add_chains, add_two_numbers, DigitChain, DigitNode};
