//! Matching rule for pairing a bank transaction with a system transaction.
//!
//! Two transactions match when their amounts are equal and they move money
//! in the same direction. Dates and references are not compared and there is
//! no tolerance.

use super::types::Transaction;
use crate::workflow::error::WorkflowError;

/// Returns true if the two transactions may be reconciled together.
///
/// Symmetric: `can_match(a, b) == can_match(b, a)`.
#[must_use]
pub fn can_match(a: &Transaction, b: &Transaction) -> bool {
    a.amount == b.amount && a.transaction_type == b.transaction_type
}

/// Explains why `bank` and `system` do not match, checking amount first.
///
/// Returns `None` exactly when `can_match(bank, system)` holds.
#[must_use]
pub fn match_mismatch(bank: &Transaction, system: &Transaction) -> Option<WorkflowError> {
    if bank.amount != system.amount {
        return Some(WorkflowError::AmountMismatch {
            bank: bank.amount,
            system: system.amount,
        });
    }
    if bank.transaction_type != system.transaction_type {
        return Some(WorkflowError::TypeMismatch {
            bank: bank.transaction_type,
            system: system.transaction_type,
        });
    }
    None
}
