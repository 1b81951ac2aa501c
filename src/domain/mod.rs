//! Domain layer: digit chains, the adder and the test-case model
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod adder;
pub mod cases;
pub mod chain;
pub mod error;

pub use adder::{add_chains, add_two_numbers};
pub use cases::{Case, CaseFile, LIST_NODE};
pub use chain::{
    chain_from_digits, chain_from_iter, chain_len, chain_to_digits, digits, parse_decimal,
    parse_digit_list, to_decimal, validate_digits, DigitChain, DigitNode, Digits,
};
pub use error::DomainError;

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Falls back to the input unchanged when a variable is undefined.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
