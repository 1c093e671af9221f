//! Workflow domain types for the approval lifecycle.
//!
//! Reconciliation entries and file uploads share one lifecycle shape, so the
//! status enum, the transition record, and the `Approvable` seam live here.

use chrono::{DateTime, Utc};
use recon_shared::types::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an entity in the approval workflow.
///
/// The valid transitions are:
/// - PendingApproval → Approved (approve)
/// - PendingApproval → Rejected (reject)
///
/// `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Reserved for unsubmitted work. No operation produces it.
    Draft,
    /// Submitted by a maker and awaiting a checker.
    PendingApproval,
    /// Approved by a checker or admin (terminal).
    Approved,
    /// Rejected by a checker or admin (terminal).
    Rejected,
}

impl ApprovalStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "pending_approval" => Some(Self::PendingApproval),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true once a checker has acted; no further transitions exist.
    #[must_use]
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Returns true if the entity is waiting in an approval queue.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::PendingApproval)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Workflow action representing a state transition with audit data.
///
/// Each variant captures the resulting status and who acted, when, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowAction {
    /// Approve a pending entity.
    Approve {
        /// The new status after approval.
        new_status: ApprovalStatus,
        /// The checker or admin who approved.
        approved_by: UserId,
        /// When the entity was approved.
        approved_at: DateTime<Utc>,
        /// Optional comments from the approver.
        comments: Option<String>,
    },
    /// Reject a pending entity.
    Reject {
        /// The new status after rejection.
        new_status: ApprovalStatus,
        /// The checker or admin who rejected.
        rejected_by: UserId,
        /// When the entity was rejected.
        rejected_at: DateTime<Utc>,
        /// The reason for rejection.
        rejection_reason: String,
    },
}

impl WorkflowAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> ApprovalStatus {
        match self {
            Self::Approve { new_status, .. } | Self::Reject { new_status, .. } => *new_status,
        }
    }

    /// Returns the user who performed the action.
    #[must_use]
    pub fn actor(&self) -> UserId {
        match self {
            Self::Approve { approved_by, .. } => *approved_by,
            Self::Reject { rejected_by, .. } => *rejected_by,
        }
    }
}

/// Audit fields written by a checker's decision.
///
/// Both approval and rejection record the actor and timestamp in
/// `approved_by`/`approved_at`; `rejection_reason` is set only on rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    /// The checker or admin who decided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<UserId>,
    /// When the decision was made.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    /// Present only when the entity was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl Decision {
    /// Splits an action into the resulting status, its audit fields, and any
    /// approver comments.
    #[must_use]
    pub fn from_action(action: WorkflowAction) -> (ApprovalStatus, Self, Option<String>) {
        match action {
            WorkflowAction::Approve {
                new_status,
                approved_by,
                approved_at,
                comments,
            } => (
                new_status,
                Self {
                    approved_by: Some(approved_by),
                    approved_at: Some(approved_at),
                    rejection_reason: None,
                },
                comments,
            ),
            WorkflowAction::Reject {
                new_status,
                rejected_by,
                rejected_at,
                rejection_reason,
            } => (
                new_status,
                Self {
                    approved_by: Some(rejected_by),
                    approved_at: Some(rejected_at),
                    rejection_reason: Some(rejection_reason),
                },
                None,
            ),
        }
    }

    /// Returns true if no decision has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.approved_by.is_none() && self.approved_at.is_none() && self.rejection_reason.is_none()
    }
}

/// An entity that moves through the approval lifecycle.
///
/// Implemented by reconciliation entries and file uploads so the store can
/// drive both through one transition path.
pub trait Approvable {
    /// Current workflow status.
    fn status(&self) -> ApprovalStatus;

    /// The maker who created the entity.
    fn created_by(&self) -> UserId;

    /// Records a validated transition.
    ///
    /// Callers obtain `action` from `WorkflowService`, which has already
    /// checked that the transition is legal from `self.status()`.
    fn apply(&mut self, action: WorkflowAction);
}
