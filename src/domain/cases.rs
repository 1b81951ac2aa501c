//! Test-case file model
//!
//! A case file names the function under test and lists input/output pairs:
//!
//! ```json
//! {
//!   "function": "addTwoNumbers",
//!   "paramTypes": ["ListNode", "ListNode"],
//!   "returnType": "ListNode",
//!   "cases": [{ "input": [[2, 4, 3], [5, 6, 4]], "output": [7, 0, 8] }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::chain::{chain_from_digits, DigitChain};
use crate::domain::error::DomainError;

/// Type tag marking a JSON array that stands for a digit chain.
pub const LIST_NODE: &str = "ListNode";

/// Contents of a `testcases.json` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseFile {
    pub function: String,
    #[serde(default)]
    pub param_types: Vec<String>,
    #[serde(default)]
    pub return_type: String,
    pub cases: Vec<Case>,
}

/// A single input/output pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub input: Vec<Value>,
    #[serde(default)]
    pub output: Value,
}

impl CaseFile {
    /// Whether the declared return type is a digit chain (or left unspecified).
    pub fn returns_chain(&self) -> bool {
        self.return_type.is_empty() || self.return_type == LIST_NODE
    }
}

impl Case {
    /// Decode the two operands of a binary chain function.
    ///
    /// Parameters without a declared type are treated as chains.
    pub fn chain_operands(
        &self,
        param_types: &[String],
    ) -> Result<(DigitChain, DigitChain), DomainError> {
        if self.input.len() != 2 {
            return Err(DomainError::MalformedCase {
                message: format!("expected 2 inputs, found {}", self.input.len()),
            });
        }
        for (index, declared) in param_types.iter().enumerate().take(2) {
            if declared != LIST_NODE {
                return Err(DomainError::MalformedCase {
                    message: format!("parameter {index} is declared as {declared}, expected {LIST_NODE}"),
                });
            }
        }

        let a = json_to_digits(&self.input[0], "input 0")?;
        let b = json_to_digits(&self.input[1], "input 1")?;
        Ok((chain_from_digits(&a), chain_from_digits(&b)))
    }

    /// Expected result digits; `null` and `[]` both mean the absent chain.
    pub fn expected_digits(&self) -> Result<Vec<u32>, DomainError> {
        json_to_digits(&self.output, "output")
    }
}

fn json_to_digits(value: &Value, what: &str) -> Result<Vec<u32>, DomainError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                item.as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| DomainError::MalformedCase {
                        message: format!("{what}: entry {position} is not a digit: {item}"),
                    })
            })
            .collect(),
        other => Err(DomainError::MalformedCase {
            message: format!("{what}: expected an array of digits, found {other}"),
        }),
    }
}
