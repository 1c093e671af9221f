//! State container and session for the reconciliation screens.

pub mod service;
pub mod session;


pub use service::ReconciliationStore;
pub use session::Session;
