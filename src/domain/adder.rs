//! Positional addition of two digit chains with carry propagation.

use tracing::trace;

use crate::domain::chain::{DigitChain, DigitNode};

const BASE: u64 = 10;

/// Add two numbers stored as least-significant-digit-first chains.
///
/// Takes ownership of both operands:
/// - both absent: the result is absent
/// - one absent: the other chain is handed back as is, same nodes, no allocation
/// - both present: a new chain is built and the operands are dropped unmodified
///
/// The result has `max(len(l1), len(l2))` digits, plus one when the final carry
/// runs past the longer operand.
pub fn add_two_numbers(l1: DigitChain, l2: DigitChain) -> DigitChain {
    match (l1, l2) {
        (None, None) => None,
        (Some(l1), None) => Some(l1),
        (None, Some(l2)) => Some(l2),
        (Some(l1), Some(l2)) => sum_digits(&l1, &l2),
    }
}

/// Borrowing variant of [`add_two_numbers`].
///
/// The result never shares nodes with the operands: a lone present operand is
/// deep-copied.
pub fn add_chains(a: &DigitChain, b: &DigitChain) -> DigitChain {
    match (a.as_deref(), b.as_deref()) {
        (None, None) => None,
        (Some(_), None) => a.clone(),
        (None, Some(_)) => b.clone(),
        (Some(a), Some(b)) => sum_digits(a, b),
    }
}

fn sum_digits(a: &DigitNode, b: &DigitNode) -> DigitChain {
    let mut head: DigitChain = None;
    let mut tail = &mut head;
    let mut left = Some(a);
    let mut right = Some(b);
    let mut carry: u64 = 0;
    let mut positions = 0usize;

    while left.is_some() || right.is_some() {
        let total = carry
            + left.map_or(0, |node| u64::from(node.val))
            + right.map_or(0, |node| u64::from(node.val));
        tail = &mut tail
            .insert(Box::new(DigitNode::new((total % BASE) as u32)))
            .next;
        carry = total / BASE;
        left = left.and_then(|node| node.next.as_deref());
        right = right.and_then(|node| node.next.as_deref());
        positions += 1;
    }

    // carry < u32::MAX holds for any pair of u32 node values
    if carry > 0 {
        *tail = Some(Box::new(DigitNode::new(carry as u32)));
    }
    trace!(positions, carry, "summed digit chains");
    head
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chain::{chain_from_digits, chain_from_iter, chain_len, chain_to_digits};

    fn add(a: &[u32], b: &[u32]) -> Vec<u32> {
        chain_to_digits(&add_two_numbers(
            chain_from_digits(a),
            chain_from_digits(b),
        ))
    }

    #[test]
    fn given_equal_length_operands_when_adding_then_carries_between_digits() {
        assert_eq!(add(&[2, 4, 3], &[5, 6, 4]), vec![7, 0, 8]);
    }

    #[test]
    fn given_zeros_when_adding_then_single_zero() {
        assert_eq!(add(&[0], &[0]), vec![0]);
    }

    #[test]
    fn given_uneven_operands_when_adding_then_final_carry_appended() {
        assert_eq!(
            add(&[9, 9, 9, 9, 9, 9, 9], &[9, 9, 9, 9]),
            vec![8, 9, 9, 9, 0, 0, 0, 1]
        );
    }

    #[test]
    fn given_absent_left_when_adding_then_right_nodes_returned_unchanged() {
        let b = chain_from_digits(&[1, 2, 3]);
        let b_head: *const DigitNode = b.as_deref().unwrap();

        let result = add_two_numbers(None, b);

        let result_head: *const DigitNode = result.as_deref().unwrap();
        assert_eq!(result_head, b_head);
        assert_eq!(chain_to_digits(&result), vec![1, 2, 3]);
    }

    #[test]
    fn given_absent_right_when_adding_then_left_nodes_returned_unchanged() {
        let a = chain_from_digits(&[4, 5]);
        let a_head: *const DigitNode = a.as_deref().unwrap();

        let result = add_two_numbers(a, None);

        let result_head: *const DigitNode = result.as_deref().unwrap();
        assert_eq!(result_head, a_head);
    }

    #[test]
    fn given_both_absent_when_adding_then_absent() {
        assert!(add_two_numbers(None, None).is_none());
        assert!(add_chains(&None, &None).is_none());
    }

    #[test]
    fn given_absent_operand_when_borrowing_add_then_result_is_a_copy() {
        let b = chain_from_digits(&[1, 2, 3]);
        let result = add_chains(&None, &b);
        assert_eq!(result, b);
        assert!(!std::ptr::eq(
            result.as_deref().unwrap(),
            b.as_deref().unwrap()
        ));
    }

    #[test]
    fn given_borrowed_operands_when_adding_then_operands_untouched() {
        let a = chain_from_digits(&[9, 9]);
        let b = chain_from_digits(&[1]);
        let sum = add_chains(&a, &b);
        assert_eq!(chain_to_digits(&sum), vec![0, 0, 1]);
        assert_eq!(chain_to_digits(&a), vec![9, 9]);
        assert_eq!(chain_to_digits(&b), vec![1]);
    }

    #[test]
    fn given_out_of_range_values_when_adding_then_arithmetic_stays_consistent() {
        // 10 at position 0 and 25 at position 0: 35 -> digit 5, carry 3
        assert_eq!(add(&[10], &[25]), vec![5, 3]);
        // terminal carry node keeps the whole carry
        assert_eq!(add(&[150], &[0]), vec![0, 15]);
    }

    #[test]
    fn given_max_node_values_when_adding_then_no_overflow() {
        let sum = add(&[u32::MAX, u32::MAX], &[u32::MAX]);
        let value = sum
            .iter()
            .rev()
            .fold(0u128, |acc, &d| acc * 10 + u128::from(d));
        assert_eq!(value, 12 * u128::from(u32::MAX));
        assert!(sum[..2].iter().all(|&d| d <= 9));
    }

    #[test]
    fn given_million_digit_operands_when_adding_then_iterates_without_recursion() {
        let a = chain_from_iter(std::iter::repeat(9).take(1_000_000));
        let b = chain_from_digits(&[1]);
        let sum = add_two_numbers(a, b);
        assert_eq!(chain_len(&sum), 1_000_001);
    }
}
