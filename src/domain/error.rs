//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors describe input that cannot be turned into a digit chain.
/// The adder itself has no failure path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid digit {found:?} at position {position}")]
    InvalidDigit { position: usize, found: char },

    #[error("invalid digit list entry {entry:?} at index {position}")]
    InvalidListEntry { position: usize, entry: String },

    #[error("digit out of range at index {position}: {value} (expected 0-9)")]
    DigitOutOfRange { position: usize, value: u32 },

    #[error("number has no digits")]
    EmptyNumber,

    #[error("malformed case: {message}")]
    MalformedCase { message: String },
}
