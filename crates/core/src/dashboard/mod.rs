//! Dashboard summary of the reconciliation workflow.

pub mod types;

pub use types::{ActivityItem, DashboardSummary, StatusCounts};
