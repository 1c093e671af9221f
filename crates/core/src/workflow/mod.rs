//! Approval workflow shared by reconciliation entries and file uploads.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (ApprovalStatus, WorkflowAction, Approvable)
//! - `error` - Workflow error types
//! - `service` - State transition logic
//! - `policy` - Role authorization table

pub mod error;
pub mod policy;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::{ErrorKind, WorkflowError};
pub use policy::{Action, Role, User, authorize, is_allowed};
pub use service::WorkflowService;
pub use types::{Approvable, ApprovalStatus, Decision, WorkflowAction};
