//! Reconciliation entries pairing one bank and one system transaction.

pub mod types;

pub use types::{NewReconciliation, ReconciliationEntry};
