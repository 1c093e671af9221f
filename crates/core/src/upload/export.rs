//! CSV export of an uploaded batch.

use std::io;

use serde::Serialize;

use super::types::FileUpload;
use crate::transaction::Transaction;
use crate::workflow::error::WorkflowError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRow<'a> {
    account_id: &'a str,
    transaction_date: String,
    trans_id: &'a str,
    amount: String,
    description: &'a str,
    #[serde(rename = "type")]
    transaction_type: &'static str,
    reference: &'a str,
}

impl<'a> From<&'a Transaction> for ExportRow<'a> {
    fn from(txn: &'a Transaction) -> Self {
        Self {
            account_id: txn.account_id.as_deref().unwrap_or_default(),
            transaction_date: txn.date.format("%Y-%m-%d").to_string(),
            trans_id: txn.trans_id.as_deref().unwrap_or_default(),
            amount: txn.amount.to_string(),
            description: &txn.description,
            transaction_type: txn.transaction_type.as_str(),
            reference: &txn.reference,
        }
    }
}

/// Writes the batch's transactions as CSV, header first.
pub fn export_csv<W: io::Write>(upload: &FileUpload, writer: W) -> Result<(), WorkflowError> {
    let mut csv = csv::Writer::from_writer(writer);
    if upload.transactions.is_empty() {
        csv.write_record([
            "accountId",
            "transactionDate",
            "transId",
            "amount",
            "description",
            "type",
            "reference",
        ])?;
    }
    for txn in &upload.transactions {
        csv.serialize(ExportRow::from(txn))?;
    }
    csv.flush()
        .map_err(|e| WorkflowError::Export(e.to_string()))?;
    Ok(())
}

/// Name of the exported file: the spreadsheet extension becomes `.csv`.
#[must_use]
pub fn export_file_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if matches!(ext.to_lowercase().as_str(), "xlsx" | "xls") => {
            format!("{stem}.csv")
        }
        _ => format!("{file_name}.csv"),
    }
}
