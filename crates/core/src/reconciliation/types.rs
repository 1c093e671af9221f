//! Reconciliation entry types.

use chrono::{DateTime, Utc};
use recon_shared::types::{ReconciliationId, TransactionId, UserId};
use serde::{Deserialize, Serialize};

use crate::workflow::types::{Approvable, ApprovalStatus, Decision, WorkflowAction};

/// A proposed pairing of one bank transaction with one system transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationEntry {
    /// Unique identifier.
    pub id: ReconciliationId,
    /// The bank side of the pair.
    pub bank_transaction_id: TransactionId,
    /// The system side of the pair.
    pub system_transaction_id: TransactionId,
    /// The maker who proposed the pairing.
    pub created_by: UserId,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// Workflow status.
    pub status: ApprovalStatus,
    /// Maker notes, replaced by the approver's comments on approval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Checker decision.
    #[serde(flatten)]
    pub decision: Decision,
}

impl ReconciliationEntry {
    /// Returns true if the entry references `transaction_id` on either side.
    #[must_use]
    pub fn involves(&self, transaction_id: TransactionId) -> bool {
        self.bank_transaction_id == transaction_id || self.system_transaction_id == transaction_id
    }
}

impl Approvable for ReconciliationEntry {
    fn status(&self) -> ApprovalStatus {
        self.status
    }

    fn created_by(&self) -> UserId {
        self.created_by
    }

    fn apply(&mut self, action: WorkflowAction) {
        let (status, decision, comments) = Decision::from_action(action);
        self.status = status;
        self.decision = decision;
        if comments.is_some() {
            self.comments = comments;
        }
    }
}

/// Input for proposing a reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReconciliation {
    /// Selected bank transaction.
    pub bank_transaction_id: TransactionId,
    /// Selected system transaction.
    pub system_transaction_id: TransactionId,
    /// Optional maker notes.
    #[serde(default)]
    pub comments: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::service::WorkflowService;

    fn entry() -> ReconciliationEntry {
        ReconciliationEntry {
            id: ReconciliationId::new(),
            bank_transaction_id: TransactionId::new(),
            system_transaction_id: TransactionId::new(),
            created_by: UserId::new(),
            created_at: Utc::now(),
            status: ApprovalStatus::PendingApproval,
            comments: Some("same invoice".to_string()),
            decision: Decision::default(),
        }
    }

    fn approve(entry: &mut ReconciliationEntry, by: UserId, comments: Option<&str>) {
        let comments = comments.map(str::to_string);
        let action = WorkflowService::approve(entry.status, by, comments);
        entry.apply(action.unwrap());
    }

    fn reject(entry: &mut ReconciliationEntry, by: UserId, reason: &str) {
        let action = WorkflowService::reject(entry.status, by, reason.to_string());
        entry.apply(action.unwrap());
    }

    #[test]
    fn test_apply_approve_overwrites_comments() {
        let mut entry = entry();
        let checker = UserId::new();
        approve(&mut entry, checker, Some("looks good"));

        assert_eq!(entry.status, ApprovalStatus::Approved);
        assert_eq!(entry.decision.approved_by, Some(checker));
        assert!(entry.decision.approved_at.is_some());
        assert_eq!(entry.decision.rejection_reason, None);
        assert_eq!(entry.comments.as_deref(), Some("looks good"));
    }

    #[test]
    fn test_apply_approve_without_comments_keeps_maker_notes() {
        let mut entry = entry();
        approve(&mut entry, UserId::new(), None);
        assert_eq!(entry.comments.as_deref(), Some("same invoice"));
    }

    #[test]
    fn test_apply_reject_sets_reason_and_actor() {
        let mut entry = entry();
        let checker = UserId::new();
        reject(&mut entry, checker, "wrong account");

        assert_eq!(entry.status, ApprovalStatus::Rejected);
        assert_eq!(entry.decision.approved_by, Some(checker));
        let reason = entry.decision.rejection_reason.as_deref();
        assert_eq!(reason, Some("wrong account"));
    }

    #[test]
    fn test_serializes_flat_camel_case() {
        let mut entry = entry();
        reject(&mut entry, UserId::new(), "dup");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], "rejected");
        assert_eq!(json["rejectionReason"], "dup");
        assert!(json.get("approvedBy").is_some());
        assert!(json.get("bankTransactionId").is_some());
    }

    #[test]
    fn test_round_trips_through_json() {
        let mut entry = entry();
        reject(&mut entry, UserId::new(), "dup");
        let json = serde_json::to_string(&entry).unwrap();
        let back: ReconciliationEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_involves() {
        let entry = entry();
        assert!(entry.involves(entry.bank_transaction_id));
        assert!(entry.involves(entry.system_transaction_id));
        assert!(!entry.involves(TransactionId::new()));
    }
}
