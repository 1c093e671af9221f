//! Dashboard summary types.

use chrono::{DateTime, Utc};
use recon_shared::types::{FileUploadId, ReconciliationId, UserId};
use serde::Serialize;

use crate::reconciliation::ReconciliationEntry;
use crate::store::ReconciliationStore;
use crate::transaction::TransactionSource;
use crate::upload::FileUpload;
use crate::workflow::types::ApprovalStatus;

/// Counts of entities per workflow status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    /// Awaiting a checker.
    pub pending_approval: usize,
    /// Approved.
    pub approved: usize,
    /// Rejected.
    pub rejected: usize,
}

impl StatusCounts {
    fn tally(statuses: impl Iterator<Item = ApprovalStatus>) -> Self {
        statuses.fold(Self::default(), |mut acc, status| {
            match status {
                ApprovalStatus::PendingApproval => acc.pending_approval += 1,
                ApprovalStatus::Approved => acc.approved += 1,
                ApprovalStatus::Rejected => acc.rejected += 1,
                ApprovalStatus::Draft => {}
            }
            acc
        })
    }
}

/// One line of the recent-activity lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem<Id> {
    /// Entity identifier.
    pub id: Id,
    /// Current status.
    pub status: ApprovalStatus,
    /// Maker.
    pub created_by: UserId,
    /// When the maker submitted it.
    pub created_at: DateTime<Utc>,
    /// Checker, once decided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<UserId>,
}

impl From<&ReconciliationEntry> for ActivityItem<ReconciliationId> {
    fn from(entry: &ReconciliationEntry) -> Self {
        Self {
            id: entry.id,
            status: entry.status,
            created_by: entry.created_by,
            created_at: entry.created_at,
            approved_by: entry.decision.approved_by,
        }
    }
}

impl From<&FileUpload> for ActivityItem<FileUploadId> {
    fn from(upload: &FileUpload) -> Self {
        Self {
            id: upload.id,
            status: upload.status,
            created_by: upload.uploaded_by,
            created_at: upload.uploaded_at,
            approved_by: upload.decision.approved_by,
        }
    }
}

/// Headline numbers and recent activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Reconciliation entries per status.
    pub reconciliations: StatusCounts,
    /// File uploads per status.
    pub file_uploads: StatusCounts,
    /// Bank transactions still waiting to be paired.
    pub unreconciled_bank_transactions: usize,
    /// Bank plus system transactions in the working set.
    pub total_transactions: usize,
    /// Newest reconciliation entries first.
    pub recent_reconciliations: Vec<ActivityItem<ReconciliationId>>,
    /// Newest uploads first.
    pub recent_uploads: Vec<ActivityItem<FileUploadId>>,
}

impl DashboardSummary {
    /// Summarises the store's current contents.
    #[must_use]
    pub fn from_store(store: &ReconciliationStore) -> Self {
        let limit = store.config().recent_activity_limit;

        Self {
            reconciliations: StatusCounts::tally(store.entries().iter().map(|e| e.status)),
            file_uploads: StatusCounts::tally(store.file_uploads().iter().map(|u| u.status)),
            unreconciled_bank_transactions: store
                .transactions_from(TransactionSource::Bank)
                .filter(|t| t.is_unreconciled())
                .count(),
            total_transactions: store.transactions().len(),
            recent_reconciliations: store
                .entries()
                .iter()
                .rev()
                .take(limit)
                .map(ActivityItem::from)
                .collect(),
            recent_uploads: store
                .file_uploads()
                .iter()
                .rev()
                .take(limit)
                .map(ActivityItem::from)
                .collect(),
        }
    }
}
