//! Role authorization policy.
//!
//! Role is the only authorization axis. Every permission check goes through
//! `is_allowed` / `authorize` so the table below is the single source of truth.
//!
//! | Action                                  | Allowed roles   |
//! |-----------------------------------------|-----------------|
//! | create transaction / reconciliation / upload | maker, admin |
//! | approve / reject reconciliation or upload    | checker, admin |
//! | view dashboards and lists               | any role        |

use recon_shared::types::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflow::error::WorkflowError;

/// User role in the maker-checker workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Creates transactions, reconciliations, and file uploads.
    Maker,
    /// Approves or rejects pending entries.
    Checker,
    /// Can do both.
    Admin,
}

impl Role {
    /// Parse a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "maker" => Some(Self::Maker),
            "checker" => Some(Self::Checker),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maker => "maker",
            Self::Checker => "checker",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An action subject to role authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Enter an individual transaction.
    CreateTransaction,
    /// Pair a bank and a system transaction.
    CreateReconciliation,
    /// Register an uploaded batch.
    UploadFile,
    /// Approve a pending reconciliation.
    ApproveReconciliation,
    /// Reject a pending reconciliation.
    RejectReconciliation,
    /// Approve a pending file upload.
    ApproveFile,
    /// Reject a pending file upload.
    RejectFile,
    /// Read dashboards and lists.
    View,
}

impl Action {
    /// All actions, in table order.
    pub const ALL: [Self; 8] = [
        Self::CreateTransaction,
        Self::CreateReconciliation,
        Self::UploadFile,
        Self::ApproveReconciliation,
        Self::RejectReconciliation,
        Self::ApproveFile,
        Self::RejectFile,
        Self::View,
    ];

    /// Returns a human-readable description of the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateTransaction => "create transaction",
            Self::CreateReconciliation => "create reconciliation",
            Self::UploadFile => "upload file",
            Self::ApproveReconciliation => "approve reconciliation",
            Self::RejectReconciliation => "reject reconciliation",
            Self::ApproveFile => "approve file",
            Self::RejectFile => "reject file",
            Self::View => "view",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user of the reconciliation screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Current role.
    pub role: Role,
    /// Contact email.
    pub email: String,
}

impl User {
    /// Creates a user with a fresh identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, role: Role, email: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            role,
            email: email.into(),
        }
    }

    /// Shorthand for `is_allowed(self.role, action)`.
    #[must_use]
    pub fn can(&self, action: Action) -> bool {
        is_allowed(self.role, action)
    }
}

/// Returns true if `role` may perform `action`.
#[must_use]
pub fn is_allowed(role: Role, action: Action) -> bool {
    match action {
        Action::CreateTransaction | Action::CreateReconciliation | Action::UploadFile => {
            matches!(role, Role::Maker | Role::Admin)
        }
        Action::ApproveReconciliation
        | Action::RejectReconciliation
        | Action::ApproveFile
        | Action::RejectFile => matches!(role, Role::Checker | Role::Admin),
        Action::View => true,
    }
}

/// Checks the policy table, failing with `NotAuthorized` on denial.
pub fn authorize(role: Role, action: Action) -> Result<(), WorkflowError> {
    if is_allowed(role, action) {
        Ok(())
    } else {
        Err(WorkflowError::NotAuthorized { role, action })
    }
}
