//! Input validation for new transactions.

use recon_shared::types::TransactionId;
use rust_decimal::Decimal;

use super::types::{NewTransaction, Transaction, TransactionStatus};
use crate::workflow::error::WorkflowError;

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Trims an owned field, dropping it when nothing is left.
fn trimmed(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

/// Validates a transaction record and builds it as `unreconciled`.
///
/// Rules:
/// - `description` must not be blank
/// - `amount` must be strictly positive
/// - `reference` falls back to `trans_id`; one of the two must be present
pub fn build_transaction(input: NewTransaction) -> Result<Transaction, WorkflowError> {
    let NewTransaction {
        date,
        amount,
        description,
        transaction_type,
        reference,
        source,
        account_id,
        trans_id,
    } = input;

    let description = trimmed(Some(description))
        .ok_or(WorkflowError::MissingField("description"))?;

    if amount <= Decimal::ZERO {
        return Err(WorkflowError::NonPositiveAmount(amount));
    }

    let trans_id = trimmed(trans_id);
    let reference = trimmed(reference)
        .or_else(|| trans_id.clone())
        .ok_or(WorkflowError::MissingField("reference"))?;

    Ok(Transaction {
        id: TransactionId::new(),
        date,
        amount,
        description,
        transaction_type,
        reference,
        status: TransactionStatus::Unreconciled,
        source,
        account_id: trimmed(account_id),
        trans_id,
    })
}

/// Validates an individually entered transaction.
///
/// Manual entry additionally requires the account and transaction numbers.
pub fn build_manual_transaction(input: NewTransaction) -> Result<Transaction, WorkflowError> {
    if non_blank(input.account_id.as_deref()).is_none() {
        return Err(WorkflowError::MissingField("accountId"));
    }
    if non_blank(input.trans_id.as_deref()).is_none() {
        return Err(WorkflowError::MissingField("transId"));
    }
    build_transaction(input)
}
