//! File upload types.

use chrono::{DateTime, Utc};
use recon_shared::types::{FileUploadId, UserId};
use serde::{Deserialize, Serialize};

use crate::transaction::{NewTransaction, Transaction, TransactionSource};
use crate::workflow::types::{Approvable, ApprovalStatus, Decision, WorkflowAction};

/// Accepted spreadsheet extensions, lowercase and without the dot.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// A batch of transactions imported from one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUpload {
    /// Unique identifier.
    pub id: FileUploadId,
    /// Original file name.
    pub file_name: String,
    /// The maker who uploaded the batch.
    pub uploaded_by: UserId,
    /// When the batch was registered.
    pub uploaded_at: DateTime<Utc>,
    /// Workflow status: `PendingApproval`, `Approved` or `Rejected`.
    ///
    /// Uploads are registered already pending, so `Draft` never occurs.
    pub status: ApprovalStatus,
    /// Number of transactions in the batch.
    pub transaction_count: usize,
    /// Bank or system.
    pub source: TransactionSource,
    /// Transactions in file order.
    pub transactions: Vec<Transaction>,
    /// Organization the batch belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Import schedule label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    /// Maker remarks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    /// Approver comments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Checker decision.
    #[serde(flatten)]
    pub decision: Decision,
}

impl Approvable for FileUpload {
    fn status(&self) -> ApprovalStatus {
        self.status
    }

    fn created_by(&self) -> UserId {
        self.uploaded_by
    }

    fn apply(&mut self, action: WorkflowAction) {
        let (status, decision, comments) = Decision::from_action(action);
        self.status = status;
        self.decision = decision;
        self.comments = comments;
    }
}

/// Parsed batch handed over by the ingestion side.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFileUpload {
    /// Original file name.
    pub file_name: String,
    /// Declared source; overrides whatever the rows carry.
    pub source: TransactionSource,
    /// Parsed rows.
    pub transactions: Vec<NewTransaction>,
    /// Organization the batch belongs to.
    #[serde(default)]
    pub organization: Option<String>,
    /// Import schedule label.
    #[serde(default)]
    pub schedule: Option<String>,
    /// Maker remarks.
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Returns true if `file_name` has a spreadsheet extension.
#[must_use]
pub fn is_supported_file(file_name: &str) -> bool {
    file_name.rsplit_once('.').is_some_and(|(stem, ext)| {
        !stem.is_empty() && SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str())
    })
}
