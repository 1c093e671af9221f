//! Workflow service for approval state transitions.
//!
//! This module implements the state machine shared by reconciliation
//! entries and file uploads. It validates the transition only; role checks
//! and persistence of the result are the caller's job.

use chrono::Utc;
use recon_shared::types::UserId;

use crate::workflow::error::WorkflowError;
use crate::workflow::types::{ApprovalStatus, WorkflowAction};

/// Stateless service for managing approval transitions.
///
/// All methods are associated functions that validate and execute
/// state transitions, returning the appropriate `WorkflowAction`
/// with audit trail information.
pub struct WorkflowService;

impl WorkflowService {
    /// Approve a pending entity.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the entity
    /// * `approved_by` - The checker or admin approving it
    /// * `comments` - Optional comments from the approver
    ///
    /// # Returns
    /// * `Ok(WorkflowAction::Approve)` if the transition is valid
    /// * `Err(WorkflowError::InvalidTransition)` if not pending approval
    pub fn approve(
        current_status: ApprovalStatus,
        approved_by: UserId,
        comments: Option<String>,
    ) -> Result<WorkflowAction, WorkflowError> {
        match current_status {
            ApprovalStatus::PendingApproval => Ok(WorkflowAction::Approve {
                new_status: ApprovalStatus::Approved,
                approved_by,
                approved_at: Utc::now(),
                comments: comments.filter(|c| !c.trim().is_empty()),
            }),
            _ => Err(WorkflowError::InvalidTransition {
                from: current_status,
                to: ApprovalStatus::Approved,
            }),
        }
    }

    /// Reject a pending entity.
    ///
    /// The state check runs first, so a finalized entity reports
    /// `InvalidTransition` even when the reason is also blank.
    ///
    /// # Returns
    /// * `Ok(WorkflowAction::Reject)` if the transition is valid
    /// * `Err(WorkflowError::InvalidTransition)` if not pending approval
    /// * `Err(WorkflowError::RejectionReasonRequired)` if reason is blank
    pub fn reject(
        current_status: ApprovalStatus,
        rejected_by: UserId,
        rejection_reason: String,
    ) -> Result<WorkflowAction, WorkflowError> {
        if current_status != ApprovalStatus::PendingApproval {
            return Err(WorkflowError::InvalidTransition {
                from: current_status,
                to: ApprovalStatus::Rejected,
            });
        }

        if rejection_reason.trim().is_empty() {
            return Err(WorkflowError::RejectionReasonRequired);
        }

        Ok(WorkflowAction::Reject {
            new_status: ApprovalStatus::Rejected,
            rejected_by,
            rejected_at: Utc::now(),
            rejection_reason,
        })
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - PendingApproval → Approved (approve)
    /// - PendingApproval → Rejected (reject)
    #[must_use]
    pub fn is_valid_transition(from: ApprovalStatus, to: ApprovalStatus) -> bool {
        matches!(
            (from, to),
            (
                ApprovalStatus::PendingApproval,
                ApprovalStatus::Approved | ApprovalStatus::Rejected
            )
        )
    }
}
