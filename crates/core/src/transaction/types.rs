//! Transaction domain types.

use chrono::NaiveDate;
use recon_shared::types::TransactionId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a monetary movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money out.
    Debit,
    /// Money in.
    Credit,
}

impl TransactionType {
    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }

    /// Parses a type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "debit" => Some(Self::Debit),
            "credit" => Some(Self::Credit),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reconciliation status of a single transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Not yet paired with a counterpart.
    Unreconciled,
    /// Reserved for transactions awaiting confirmation. No operation produces it.
    Pending,
    /// Paired by an approved reconciliation entry.
    Reconciled,
}

impl TransactionStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unreconciled => "unreconciled",
            Self::Pending => "pending",
            Self::Reconciled => "reconciled",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which ledger a transaction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionSource {
    /// Bank statement.
    Bank,
    /// Internal accounting system.
    System,
}

impl TransactionSource {
    /// Returns the string representation of the source.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bank => "bank",
            Self::System => "system",
        }
    }
}

impl fmt::Display for TransactionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded monetary movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Value date.
    pub date: NaiveDate,
    /// Strictly positive amount; direction is carried by `transaction_type`.
    pub amount: Decimal,
    /// Free-text description.
    pub description: String,
    /// Debit or credit.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// External reference.
    pub reference: String,
    /// Reconciliation status.
    pub status: TransactionStatus,
    /// Bank or system.
    pub source: TransactionSource,
    /// Account the movement was booked against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Source-system transaction number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans_id: Option<String>,
}

impl Transaction {
    /// Returns true if the transaction can still be paired.
    #[must_use]
    pub fn is_unreconciled(&self) -> bool {
        self.status == TransactionStatus::Unreconciled
    }
}

/// Input for recording a transaction, either typed by a maker or parsed
/// from an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// Value date.
    pub date: NaiveDate,
    /// Amount; must be positive.
    pub amount: Decimal,
    /// Free-text description.
    pub description: String,
    /// Debit or credit.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// External reference; falls back to `trans_id` when blank.
    #[serde(default)]
    pub reference: Option<String>,
    /// Bank or system.
    pub source: TransactionSource,
    /// Account the movement was booked against.
    #[serde(default)]
    pub account_id: Option<String>,
    /// Source-system transaction number.
    #[serde(default)]
    pub trans_id: Option<String>,
}
