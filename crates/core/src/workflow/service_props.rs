//! Property-based tests for WorkflowService.

use proptest::prelude::*;
use recon_shared::types::UserId;
use uuid::Uuid;

use crate::workflow::error::WorkflowError;
use crate::workflow::service::WorkflowService;
use crate::workflow::types::{ApprovalStatus, WorkflowAction};

/// Strategy for generating random ApprovalStatus values.
fn arb_status() -> impl Strategy<Value = ApprovalStatus> {
    prop_oneof![
        Just(ApprovalStatus::Draft),
        Just(ApprovalStatus::PendingApproval),
        Just(ApprovalStatus::Approved),
        Just(ApprovalStatus::Rejected),
    ]
}

fn arb_user_id() -> impl Strategy<Value = UserId> {
    any::<u128>().prop_map(|n| UserId::from_uuid(Uuid::from_u128(n)))
}

/// Reasons with at least one visible character.
fn arb_reason() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 ]{0,99}"
}

fn arb_blank() -> impl Strategy<Value = String> {
    "[ \t\n]{0,10}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Pending + approve → Approved with the approver recorded.
    #[test]
    fn prop_approve_from_pending_succeeds(
        user_id in arb_user_id(),
        comments in proptest::option::of(arb_reason())
    ) {
        let action = WorkflowService::approve(ApprovalStatus::PendingApproval, user_id, comments.clone()).unwrap();
        prop_assert_eq!(action.new_status(), ApprovalStatus::Approved);

        if let WorkflowAction::Approve { approved_by, comments: recorded, .. } = action {
            prop_assert_eq!(approved_by, user_id);
            prop_assert_eq!(recorded, comments);
        } else {
            prop_assert!(false, "Expected Approve action");
        }
    }

    /// Pending + reject → Rejected with the reason recorded verbatim.
    #[test]
    fn prop_reject_from_pending_succeeds(user_id in arb_user_id(), reason in arb_reason()) {
        let action = WorkflowService::reject(ApprovalStatus::PendingApproval, user_id, reason.clone()).unwrap();
        prop_assert_eq!(action.new_status(), ApprovalStatus::Rejected);

        if let WorkflowAction::Reject { rejected_by, rejection_reason, .. } = action {
            prop_assert_eq!(rejected_by, user_id);
            prop_assert_eq!(rejection_reason, reason);
        } else {
            prop_assert!(false, "Expected Reject action");
        }
    }

    /// Approve from anything but PendingApproval returns InvalidTransition.
    #[test]
    fn prop_approve_from_non_pending_fails(status in arb_status(), user_id in arb_user_id()) {
        prop_assume!(status != ApprovalStatus::PendingApproval);
        let result = WorkflowService::approve(status, user_id, None);
        let is_invalid_transition = matches!(result, Err(WorkflowError::InvalidTransition { .. }));
        prop_assert!(is_invalid_transition);
    }

    /// Reject from anything but PendingApproval returns InvalidTransition.
    #[test]
    fn prop_reject_from_non_pending_fails(
        status in arb_status(),
        user_id in arb_user_id(),
        reason in arb_reason()
    ) {
        prop_assume!(status != ApprovalStatus::PendingApproval);
        let result = WorkflowService::reject(status, user_id, reason);
        let is_invalid_transition = matches!(result, Err(WorkflowError::InvalidTransition { .. }));
        prop_assert!(is_invalid_transition);
    }

    /// Blank reasons never reject a pending entity.
    #[test]
    fn prop_reject_blank_reason_fails(user_id in arb_user_id(), reason in arb_blank()) {
        let result = WorkflowService::reject(ApprovalStatus::PendingApproval, user_id, reason);
        let is_reason_required = matches!(result, Err(WorkflowError::RejectionReasonRequired));
        prop_assert!(is_reason_required);
    }

    /// Every successful transition lands in a terminal state that agrees
    /// with `is_valid_transition`.
    #[test]
    fn prop_success_implies_valid_transition(status in arb_status(), user_id in arb_user_id()) {
        if let Ok(action) = WorkflowService::approve(status, user_id, None) {
            prop_assert!(action.new_status().is_final());
            prop_assert!(WorkflowService::is_valid_transition(status, action.new_status()));
        }
        if let Ok(action) = WorkflowService::reject(status, user_id, "reason".to_string()) {
            prop_assert!(action.new_status().is_final());
            prop_assert!(WorkflowService::is_valid_transition(status, action.new_status()));
        }
    }
}
