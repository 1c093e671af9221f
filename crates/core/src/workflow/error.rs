//! Workflow error types for the reconciliation lifecycle.
//!
//! Every failure is recoverable by the acting user; `kind()` groups the
//! variants into the four categories shown inline next to the form.

use recon_shared::AppError;
use recon_shared::types::{FileUploadId, ReconciliationId, TransactionId, UserId};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::transaction::{TransactionSource, TransactionStatus, TransactionType};
use crate::workflow::policy::{Action, Role};
use crate::workflow::types::ApprovalStatus;

/// Broad category of a workflow error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed input.
    Validation,
    /// The actor's role does not permit the action.
    Authorization,
    /// The entity's current status does not allow the action.
    InvalidStateTransition,
    /// The referenced entity does not exist.
    NotFound,
}

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A required field was missing or blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Amounts must be strictly positive.
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// The two transactions differ in amount.
    #[error("Transactions do not match: bank amount {bank} differs from system amount {system}")]
    AmountMismatch {
        /// Bank-side amount.
        bank: Decimal,
        /// System-side amount.
        system: Decimal,
    },

    /// The two transactions differ in direction.
    #[error("Transactions do not match: bank type {bank} differs from system type {system}")]
    TypeMismatch {
        /// Bank-side type.
        bank: TransactionType,
        /// System-side type.
        system: TransactionType,
    },

    /// A transaction was used on the wrong side of a reconciliation.
    #[error("Transaction {transaction_id} is a {actual} transaction, expected {expected}")]
    WrongSource {
        /// The offending transaction.
        transaction_id: TransactionId,
        /// The side it was supplied for.
        expected: TransactionSource,
        /// Its recorded source.
        actual: TransactionSource,
    },

    /// The transaction has already been reconciled or is otherwise unavailable.
    #[error("Transaction {transaction_id} is {status} and cannot be reconciled")]
    TransactionUnavailable {
        /// The offending transaction.
        transaction_id: TransactionId,
        /// Its current status.
        status: TransactionStatus,
    },

    /// The transaction is already part of a reconciliation awaiting approval.
    #[error("Transaction {transaction_id} is already in pending reconciliation {entry_id}")]
    TransactionAlreadyPaired {
        /// The offending transaction.
        transaction_id: TransactionId,
        /// The pending entry that holds it.
        entry_id: ReconciliationId,
    },

    /// Only spreadsheet uploads are accepted.
    #[error("Unsupported file type: {0} (expected .xlsx or .xls)")]
    UnsupportedFileType(String),

    /// An upload must contain at least one transaction.
    #[error("File {0} contains no transactions")]
    EmptyUpload(String),

    /// The actor's role does not permit the action.
    #[error("Role {role} is not allowed to {action}")]
    NotAuthorized {
        /// The actor's role.
        role: Role,
        /// The attempted action.
        action: Action,
    },

    /// Self-approval is disabled and the actor created the entity.
    #[error("User {user_id} cannot decide on an entity they created")]
    SelfApproval {
        /// The maker who is also the would-be checker.
        user_id: UserId,
    },

    /// Attempted a transition out of a terminal state.
    #[error("Entry already finalized: cannot move from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: ApprovalStatus,
        /// The attempted target status.
        to: ApprovalStatus,
    },

    /// Reconciliation entry not found.
    #[error("Reconciliation {0} not found")]
    ReconciliationNotFound(ReconciliationId),

    /// File upload not found.
    #[error("File upload {0} not found")]
    FileUploadNotFound(FileUploadId),

    /// Transaction not found.
    #[error("Transaction {0} not found")]
    TransactionNotFound(TransactionId),

    /// Writing the CSV export failed.
    #[error("Export failed: {0}")]
    Export(String),
}

impl WorkflowError {
    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_)
            | Self::NonPositiveAmount(_)
            | Self::RejectionReasonRequired
            | Self::AmountMismatch { .. }
            | Self::TypeMismatch { .. }
            | Self::WrongSource { .. }
            | Self::TransactionUnavailable { .. }
            | Self::TransactionAlreadyPaired { .. }
            | Self::UnsupportedFileType(_)
            | Self::EmptyUpload(_)
            | Self::Export(_) => ErrorKind::Validation,

            Self::NotAuthorized { .. } | Self::SelfApproval { .. } => ErrorKind::Authorization,

            Self::InvalidTransition { .. } => ErrorKind::InvalidStateTransition,

            Self::ReconciliationNotFound(_)
            | Self::FileUploadNotFound(_)
            | Self::TransactionNotFound(_) => ErrorKind::NotFound,
        }
    }

    /// Returns the HTTP-style status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::Authorization => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::InvalidStateTransition => 409,
        }
    }

    /// Returns the error code shown to the acting user.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::AmountMismatch { .. } | Self::TypeMismatch { .. } => "TRANSACTIONS_DO_NOT_MATCH",
            Self::WrongSource { .. } => "WRONG_TRANSACTION_SOURCE",
            Self::TransactionUnavailable { .. } => "TRANSACTION_UNAVAILABLE",
            Self::TransactionAlreadyPaired { .. } => "TRANSACTION_ALREADY_PAIRED",
            Self::UnsupportedFileType(_) => "UNSUPPORTED_FILE_TYPE",
            Self::EmptyUpload(_) => "EMPTY_UPLOAD",
            Self::NotAuthorized { .. } => "NOT_AUTHORIZED",
            Self::SelfApproval { .. } => "SELF_APPROVAL_NOT_ALLOWED",
            Self::InvalidTransition { .. } => "ENTRY_ALREADY_FINALIZED",
            Self::ReconciliationNotFound(_) => "RECONCILIATION_NOT_FOUND",
            Self::FileUploadNotFound(_) => "FILE_UPLOAD_NOT_FOUND",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::Export(_) => "EXPORT_FAILED",
        }
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::Validation => Self::Validation(message),
            ErrorKind::Authorization => Self::Forbidden(message),
            ErrorKind::InvalidStateTransition => Self::Conflict(message),
            ErrorKind::NotFound => Self::NotFound(message),
        }
    }
}

impl From<csv::Error> for WorkflowError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}
