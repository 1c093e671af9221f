//! Core business logic for maker-checker transaction reconciliation.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and state transitions live here.
//!
//! # Modules
//!
//! - `workflow` - Approval state machine and role policy
//! - `transaction` - Bank/system transactions and the matching rule
//! - `reconciliation` - Reconciliation entries
//! - `upload` - File upload batches and CSV export
//! - `store` - In-memory state container and session
//! - `dashboard` - Summary counts and recent activity

pub mod dashboard;
pub mod reconciliation;
pub mod store;
pub mod transaction;
pub mod upload;
pub mod workflow;

pub use dashboard::DashboardSummary;
pub use store::{ReconciliationStore, Session};
pub use workflow::{Action, ApprovalStatus, ErrorKind, Role, User, WorkflowError};
