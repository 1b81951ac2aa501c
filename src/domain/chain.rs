//! Digit chains: numbers stored as singly linked lists of decimal digits,
//! least-significant digit first.
//!
//! `342` is the chain `2 -> 4 -> 3`. The absent chain (`None`) carries no digits
//! and is distinct from the one-node chain `[0]`.

use std::fmt;

use itertools::Itertools;

use crate::domain::error::DomainError;

/// One digit of a number plus the link to the next, more significant digit.
///
/// `val` is a decimal digit by contract; the type does not enforce the upper bound
/// (see [`validate_digits`]).
pub struct DigitNode {
    pub val: u32,
    pub next: Option<Box<DigitNode>>,
}

/// A possibly absent chain of digit nodes.
pub type DigitChain = Option<Box<DigitNode>>;

impl DigitNode {
    pub fn new(val: u32) -> Self {
        Self { val, next: None }
    }

    /// Iterate over the digit values starting at this node.
    pub fn iter(&self) -> Digits<'_> {
        Digits { cursor: Some(self) }
    }
}

// Drop, Clone, PartialEq and Debug walk the chain in a loop: the derived versions
// recurse once per node and overflow the stack on long numbers.
impl Drop for DigitNode {
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

impl Clone for DigitNode {
    fn clone(&self) -> Self {
        let mut head = DigitNode::new(self.val);
        head.next = chain_from_iter(self.iter().skip(1));
        head
    }
}

impl PartialEq for DigitNode {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for DigitNode {}

impl fmt::Debug for DigitNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for DigitNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.iter().join(", "))
    }
}

/// Borrowing iterator over the digit values of a chain.
#[derive(Debug, Clone)]
pub struct Digits<'a> {
    cursor: Option<&'a DigitNode>,
}

impl<'a> Iterator for Digits<'a> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cursor?;
        self.cursor = node.next.as_deref();
        Some(node.val)
    }
}

/// Iterate over the digits of a possibly absent chain.
pub fn digits(chain: &DigitChain) -> Digits<'_> {
    Digits {
        cursor: chain.as_deref(),
    }
}

/// Build a chain from digit values given least-significant first.
///
/// An empty iterator yields the absent chain.
pub fn chain_from_iter<I>(values: I) -> DigitChain
where
    I: IntoIterator<Item = u32>,
{
    let mut head: DigitChain = None;
    let mut tail = &mut head;
    for val in values {
        tail = &mut tail.insert(Box::new(DigitNode::new(val))).next;
    }
    head
}

pub fn chain_from_digits(values: &[u32]) -> DigitChain {
    chain_from_iter(values.iter().copied())
}

pub fn chain_to_digits(chain: &DigitChain) -> Vec<u32> {
    digits(chain).collect()
}

pub fn chain_len(chain: &DigitChain) -> usize {
    digits(chain).count()
}

/// Parse conventional decimal text (most significant digit first) into a chain.
///
/// Surrounding whitespace and `_` separators are ignored, leading zeros are
/// dropped so `"007"` becomes `[7]` and `"000"` becomes `[0]`.
pub fn parse_decimal(text: &str) -> Result<DigitChain, DomainError> {
    let mut msd_first = Vec::with_capacity(text.len());
    for (position, ch) in text.trim().chars().enumerate() {
        if ch == '_' {
            continue;
        }
        let digit = ch
            .to_digit(10)
            .ok_or(DomainError::InvalidDigit { position, found: ch })?;
        msd_first.push(digit);
    }
    if msd_first.is_empty() {
        return Err(DomainError::EmptyNumber);
    }

    let significant = msd_first
        .iter()
        .position(|&d| d != 0)
        .unwrap_or(msd_first.len() - 1);
    Ok(chain_from_iter(
        msd_first[significant..].iter().rev().copied(),
    ))
}

/// Render a chain as decimal text, most significant digit first.
///
/// The absent chain renders as an empty string. Nodes above 9 are printed with
/// their full value.
pub fn to_decimal(chain: &DigitChain) -> String {
    chain_to_digits(chain).iter().rev().join("")
}

/// Parse a least-significant-first digit list such as `2,4,3` or `[2, 4, 3]`.
///
/// `[]` and the empty string give the absent chain. Values are not range checked.
pub fn parse_digit_list(text: &str) -> Result<DigitChain, DomainError> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed)
        .trim();
    if inner.is_empty() {
        return Ok(None);
    }

    let values = inner
        .split(',')
        .enumerate()
        .map(|(position, entry)| {
            let entry = entry.trim();
            entry.parse::<u32>().map_err(|_| DomainError::InvalidListEntry {
                position,
                entry: entry.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(chain_from_digits(&values))
}

/// Check that every node holds a single decimal digit.
pub fn validate_digits(chain: &DigitChain) -> Result<(), DomainError> {
    match digits(chain).enumerate().find(|&(_, value)| value > 9) {
        Some((position, value)) => Err(DomainError::DigitOutOfRange { position, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_digits_when_building_chain_then_order_is_preserved() {
        let chain = chain_from_digits(&[2, 4, 3]);
        assert_eq!(chain_to_digits(&chain), vec![2, 4, 3]);
        assert_eq!(chain_len(&chain), 3);
    }

    #[test]
    fn given_empty_slice_when_building_chain_then_absent() {
        assert!(chain_from_digits(&[]).is_none());
        assert_eq!(chain_len(&None), 0);
    }

    #[test]
    fn given_decimal_text_when_parsing_then_least_significant_first() {
        let chain = parse_decimal("342").unwrap();
        assert_eq!(chain_to_digits(&chain), vec![2, 4, 3]);
    }

    #[test]
    fn given_leading_zeros_when_parsing_then_stripped() {
        assert_eq!(chain_to_digits(&parse_decimal("007").unwrap()), vec![7]);
        assert_eq!(chain_to_digits(&parse_decimal("000").unwrap()), vec![0]);
        assert_eq!(
            chain_to_digits(&parse_decimal(" 1_000 ").unwrap()),
            vec![0, 0, 0, 1]
        );
    }

    #[test]
    fn given_bad_decimal_text_when_parsing_then_error() {
        assert_eq!(
            parse_decimal("12a4").unwrap_err(),
            DomainError::InvalidDigit {
                position: 2,
                found: 'a'
            }
        );
        assert_eq!(parse_decimal("  ").unwrap_err(), DomainError::EmptyNumber);
        assert_eq!(parse_decimal("_").unwrap_err(), DomainError::EmptyNumber);
    }

    #[test]
    fn given_chain_when_rendering_then_most_significant_first() {
        assert_eq!(to_decimal(&chain_from_digits(&[7, 0, 8])), "807");
        assert_eq!(to_decimal(&None), "");
    }

    #[test]
    fn given_digit_list_when_parsing_then_accepts_brackets_and_spaces() {
        let plain = parse_digit_list("2,4,3").unwrap();
        let bracketed = parse_digit_list("[2, 4, 3]").unwrap();
        assert_eq!(plain, bracketed);
        assert!(parse_digit_list("[]").unwrap().is_none());
        assert!(parse_digit_list("").unwrap().is_none());
    }

    #[test]
    fn given_bad_digit_list_when_parsing_then_reports_entry() {
        let err = parse_digit_list("1,x,3").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidListEntry {
                position: 1,
                entry: "x".to_string()
            }
        );
    }

    #[test]
    fn given_out_of_range_value_when_validating_then_error() {
        let chain = chain_from_digits(&[1, 12, 3]);
        assert_eq!(
            validate_digits(&chain).unwrap_err(),
            DomainError::DigitOutOfRange {
                position: 1,
                value: 12
            }
        );
        assert!(validate_digits(&chain_from_digits(&[0, 9])).is_ok());
        assert!(validate_digits(&None).is_ok());
    }

    #[test]
    fn given_chain_when_formatting_then_lists_digits() {
        let chain = chain_from_digits(&[2, 4, 3]).unwrap();
        assert_eq!(chain.to_string(), "[2, 4, 3]");
        assert_eq!(format!("{:?}", chain), "[2, 4, 3]");
    }

    #[test]
    fn given_chain_when_cloning_then_copy_is_equal_and_distinct() {
        let original = chain_from_digits(&[1, 2, 3]).unwrap();
        let copy = original.clone();
        assert_eq!(original, copy);
        assert!(!std::ptr::eq(&*original, &*copy));
    }

    #[test]
    fn given_very_long_chain_when_dropping_then_no_stack_overflow() {
        let chain = chain_from_iter(std::iter::repeat(9).take(1_000_000));
        assert_eq!(chain_len(&chain), 1_000_000);
        let copy = chain.clone();
        assert_eq!(chain, copy);
        drop(chain);
        drop(copy);
    }
}
