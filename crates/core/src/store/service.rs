//! In-memory state container for the reconciliation screens.
//!
//! `ReconciliationStore` owns every transaction, reconciliation entry, and
//! file upload. Consumers read through the accessor methods and mutate only
//! through the operations below, each of which checks the role policy first
//! and leaves state untouched when it fails.

use chrono::Utc;
use recon_shared::WorkflowConfig;
use recon_shared::types::{FileUploadId, ReconciliationId, TransactionId};
use tracing::{debug, info, warn};

use crate::reconciliation::{NewReconciliation, ReconciliationEntry};
use crate::transaction::{
    NewTransaction, Transaction, TransactionSource, TransactionStatus, build_manual_transaction,
    build_transaction, can_match, match_mismatch,
};
use crate::upload::{FileUpload, NewFileUpload, is_supported_file};
use crate::workflow::error::WorkflowError;
use crate::workflow::policy::{Action, User, authorize};
use crate::workflow::service::WorkflowService;
use crate::workflow::types::{Approvable, ApprovalStatus, Decision, WorkflowAction};

/// A checker's verdict on a pending entity.
enum Verdict {
    Approve(Option<String>),
    Reject(String),
}

/// Validates a verdict against the entity's state and the self-approval switch.
fn decide<T: Approvable>(
    config: &WorkflowConfig,
    actor: &User,
    item: &T,
    verdict: Verdict,
) -> Result<WorkflowAction, WorkflowError> {
    if !config.allow_self_approval && item.created_by() == actor.id {
        return Err(WorkflowError::SelfApproval { user_id: actor.id });
    }
    match verdict {
        Verdict::Approve(comments) => WorkflowService::approve(item.status(), actor.id, comments),
        Verdict::Reject(reason) => WorkflowService::reject(item.status(), actor.id, reason),
    }
}

fn log_refused(operation: &'static str, actor: &User, err: &WorkflowError) {
    warn!(
        operation,
        user_id = %actor.id,
        role = %actor.role,
        code = err.error_code(),
        error = %err,
        "Action refused"
    );
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Single owner of all workflow state.
#[derive(Debug, Default)]
pub struct ReconciliationStore {
    config: WorkflowConfig,
    transactions: Vec<Transaction>,
    entries: Vec<ReconciliationEntry>,
    uploads: Vec<FileUpload>,
}

impl ReconciliationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            transactions: Vec::new(),
            entries: Vec::new(),
            uploads: Vec::new(),
        }
    }

    /// The workflow switches this store was built with.
    #[must_use]
    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// All transactions, in insertion order.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions from one source.
    pub fn transactions_from(
        &self,
        source: TransactionSource,
    ) -> impl Iterator<Item = &Transaction> + '_ {
        self.transactions.iter().filter(move |t| t.source == source)
    }

    /// Transactions from one source still available for pairing.
    #[must_use]
    pub fn unreconciled(&self, source: TransactionSource) -> Vec<&Transaction> {
        let list: Vec<_> = self
            .transactions_from(source)
            .filter(|t| t.is_unreconciled())
            .collect();
        debug!(%source, count = list.len(), "Listed unreconciled transactions");
        list
    }

    /// Looks up a transaction.
    #[must_use]
    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// All reconciliation entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[ReconciliationEntry] {
        &self.entries
    }

    /// Looks up a reconciliation entry.
    #[must_use]
    pub fn entry(&self, id: ReconciliationId) -> Option<&ReconciliationEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries waiting in the approval queue.
    #[must_use]
    pub fn pending_entries(&self) -> Vec<&ReconciliationEntry> {
        self.entries
            .iter()
            .filter(|e| e.status.is_pending())
            .collect()
    }

    /// All file uploads, oldest first.
    #[must_use]
    pub fn file_uploads(&self) -> &[FileUpload] {
        &self.uploads
    }

    /// Looks up a file upload.
    #[must_use]
    pub fn file_upload(&self, id: FileUploadId) -> Option<&FileUpload> {
        self.uploads.iter().find(|u| u.id == id)
    }

    /// Uploads waiting in the approval queue.
    #[must_use]
    pub fn pending_uploads(&self) -> Vec<&FileUpload> {
        self.uploads
            .iter()
            .filter(|u| u.status.is_pending())
            .collect()
    }

    /// Evaluates the matching rule for two stored transactions.
    pub fn can_match(&self, a: TransactionId, b: TransactionId) -> Result<bool, WorkflowError> {
        let a = self.require_transaction(a)?;
        let b = self.require_transaction(b)?;
        Ok(can_match(a, b))
    }

    fn require_transaction(&self, id: TransactionId) -> Result<&Transaction, WorkflowError> {
        self.transaction(id)
            .ok_or(WorkflowError::TransactionNotFound(id))
    }

    fn entry_index(&self, id: ReconciliationId) -> Result<usize, WorkflowError> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(WorkflowError::ReconciliationNotFound(id))
    }

    fn upload_index(&self, id: FileUploadId) -> Result<usize, WorkflowError> {
        self.uploads
            .iter()
            .position(|u| u.id == id)
            .ok_or(WorkflowError::FileUploadNotFound(id))
    }

    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------

    /// Records an individually entered transaction as `unreconciled`.
    pub fn create_transaction(
        &mut self,
        actor: &User,
        input: NewTransaction,
    ) -> Result<&Transaction, WorkflowError> {
        let txn = authorize(actor.role, Action::CreateTransaction)
            .and_then(|()| build_manual_transaction(input))
            .inspect_err(|err| log_refused("create_transaction", actor, err))?;

        info!(
            transaction_id = %txn.id,
            source = %txn.source,
            amount = %txn.amount,
            user_id = %actor.id,
            "Transaction created"
        );
        let idx = self.transactions.len();
        self.transactions.push(txn);
        Ok(&self.transactions[idx])
    }

    // ------------------------------------------------------------------
    // Reconciliation workflow
    // ------------------------------------------------------------------

    /// Proposes a pairing of a bank and a system transaction.
    ///
    /// Both transactions must exist, sit on the right side, be unreconciled,
    /// and not already belong to a pending entry. When `require_match` is on
    /// they must also satisfy the matching rule.
    pub fn create_reconciliation(
        &mut self,
        actor: &User,
        input: NewReconciliation,
    ) -> Result<&ReconciliationEntry, WorkflowError> {
        self.check_pairing(actor, &input)
            .inspect_err(|err| log_refused("create_reconciliation", actor, err))?;

        let entry = ReconciliationEntry {
            id: ReconciliationId::new(),
            bank_transaction_id: input.bank_transaction_id,
            system_transaction_id: input.system_transaction_id,
            created_by: actor.id,
            created_at: Utc::now(),
            status: ApprovalStatus::PendingApproval,
            comments: blank_to_none(input.comments),
            decision: Decision::default(),
        };

        info!(
            entry_id = %entry.id,
            bank_transaction_id = %entry.bank_transaction_id,
            system_transaction_id = %entry.system_transaction_id,
            user_id = %actor.id,
            "Reconciliation submitted for approval"
        );
        let idx = self.entries.len();
        self.entries.push(entry);
        Ok(&self.entries[idx])
    }

    fn check_pairing(&self, actor: &User, input: &NewReconciliation) -> Result<(), WorkflowError> {
        authorize(actor.role, Action::CreateReconciliation)?;

        let bank = self.require_transaction(input.bank_transaction_id)?;
        let system = self.require_transaction(input.system_transaction_id)?;

        for (txn, expected) in [
            (bank, TransactionSource::Bank),
            (system, TransactionSource::System),
        ] {
            if txn.source != expected {
                return Err(WorkflowError::WrongSource {
                    transaction_id: txn.id,
                    expected,
                    actual: txn.source,
                });
            }
            if !txn.is_unreconciled() {
                return Err(WorkflowError::TransactionUnavailable {
                    transaction_id: txn.id,
                    status: txn.status,
                });
            }
            if let Some(entry) = self
                .entries
                .iter()
                .find(|e| e.status.is_pending() && e.involves(txn.id))
            {
                return Err(WorkflowError::TransactionAlreadyPaired {
                    transaction_id: txn.id,
                    entry_id: entry.id,
                });
            }
        }

        if self.config.require_match
            && let Some(err) = match_mismatch(bank, system)
        {
            return Err(err);
        }

        Ok(())
    }

    /// Approves a pending reconciliation.
    ///
    /// With `reconcile_on_approve` on, both linked transactions become
    /// `reconciled`.
    pub fn approve_reconciliation(
        &mut self,
        actor: &User,
        id: ReconciliationId,
        comments: Option<String>,
    ) -> Result<&ReconciliationEntry, WorkflowError> {
        let (idx, action) = authorize(actor.role, Action::ApproveReconciliation)
            .and_then(|()| self.entry_index(id))
            .and_then(|idx| {
                decide(
                    &self.config,
                    actor,
                    &self.entries[idx],
                    Verdict::Approve(comments),
                )
                .map(|action| (idx, action))
            })
            .inspect_err(|err| log_refused("approve_reconciliation", actor, err))?;

        self.entries[idx].apply(action);

        if self.config.reconcile_on_approve {
            let (bank_id, system_id) = {
                let entry = &self.entries[idx];
                (entry.bank_transaction_id, entry.system_transaction_id)
            };
            for txn in self
                .transactions
                .iter_mut()
                .filter(|t| t.id == bank_id || t.id == system_id)
            {
                txn.status = TransactionStatus::Reconciled;
            }
        }

        info!(entry_id = %id, user_id = %actor.id, "Reconciliation approved");
        Ok(&self.entries[idx])
    }

    /// Rejects a pending reconciliation. The linked transactions stay
    /// available for another pairing.
    pub fn reject_reconciliation(
        &mut self,
        actor: &User,
        id: ReconciliationId,
        reason: String,
    ) -> Result<&ReconciliationEntry, WorkflowError> {
        let (idx, action) = authorize(actor.role, Action::RejectReconciliation)
            .and_then(|()| self.entry_index(id))
            .and_then(|idx| {
                decide(
                    &self.config,
                    actor,
                    &self.entries[idx],
                    Verdict::Reject(reason),
                )
                .map(|action| (idx, action))
            })
            .inspect_err(|err| log_refused("reject_reconciliation", actor, err))?;

        self.entries[idx].apply(action);

        info!(entry_id = %id, user_id = %actor.id, "Reconciliation rejected");
        Ok(&self.entries[idx])
    }

    // ------------------------------------------------------------------
    // File-upload workflow
    // ------------------------------------------------------------------

    /// Registers a parsed batch for approval.
    ///
    /// Every row is validated and stamped with the declared source.
    pub fn add_file_upload(
        &mut self,
        actor: &User,
        input: NewFileUpload,
    ) -> Result<&FileUpload, WorkflowError> {
        let upload = authorize(actor.role, Action::UploadFile)
            .and_then(|()| Self::build_upload(actor, input))
            .inspect_err(|err| log_refused("add_file_upload", actor, err))?;

        info!(
            upload_id = %upload.id,
            file_name = %upload.file_name,
            source = %upload.source,
            transaction_count = upload.transaction_count,
            user_id = %actor.id,
            "File submitted for approval"
        );
        let idx = self.uploads.len();
        self.uploads.push(upload);
        Ok(&self.uploads[idx])
    }

    fn build_upload(actor: &User, input: NewFileUpload) -> Result<FileUpload, WorkflowError> {
        let file_name = input.file_name.trim().to_string();
        if file_name.is_empty() {
            return Err(WorkflowError::MissingField("fileName"));
        }
        if !is_supported_file(&file_name) {
            return Err(WorkflowError::UnsupportedFileType(file_name));
        }
        if input.transactions.is_empty() {
            return Err(WorkflowError::EmptyUpload(file_name));
        }

        let source = input.source;
        let transactions = input
            .transactions
            .into_iter()
            .map(|row| build_transaction(NewTransaction { source, ..row }))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FileUpload {
            id: FileUploadId::new(),
            file_name,
            uploaded_by: actor.id,
            uploaded_at: Utc::now(),
            status: ApprovalStatus::PendingApproval,
            transaction_count: transactions.len(),
            source,
            transactions,
            organization: blank_to_none(input.organization),
            schedule: blank_to_none(input.schedule),
            remarks: blank_to_none(input.remarks),
            comments: None,
            decision: Decision::default(),
        })
    }

    /// Approves a pending upload and releases its transactions into the
    /// working set as `unreconciled`.
    pub fn approve_file(
        &mut self,
        actor: &User,
        id: FileUploadId,
        comments: Option<String>,
    ) -> Result<&FileUpload, WorkflowError> {
        let (idx, action) = authorize(actor.role, Action::ApproveFile)
            .and_then(|()| self.upload_index(id))
            .and_then(|idx| {
                decide(
                    &self.config,
                    actor,
                    &self.uploads[idx],
                    Verdict::Approve(comments),
                )
                .map(|action| (idx, action))
            })
            .inspect_err(|err| log_refused("approve_file", actor, err))?;

        self.uploads[idx].apply(action);
        self.transactions
            .extend(self.uploads[idx].transactions.iter().cloned());

        info!(
            upload_id = %id,
            released = self.uploads[idx].transaction_count,
            user_id = %actor.id,
            "File approved"
        );
        Ok(&self.uploads[idx])
    }

    /// Rejects a pending upload; its transactions are discarded with it.
    pub fn reject_file(
        &mut self,
        actor: &User,
        id: FileUploadId,
        reason: String,
    ) -> Result<&FileUpload, WorkflowError> {
        let (idx, action) = authorize(actor.role, Action::RejectFile)
            .and_then(|()| self.upload_index(id))
            .and_then(|idx| {
                decide(
                    &self.config,
                    actor,
                    &self.uploads[idx],
                    Verdict::Reject(reason),
                )
                .map(|action| (idx, action))
            })
            .inspect_err(|err| log_refused("reject_file", actor, err))?;

        self.uploads[idx].apply(action);

        info!(upload_id = %id, user_id = %actor.id, "File rejected");
        Ok(&self.uploads[idx])
    }
}
