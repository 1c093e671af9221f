//! Bank and system transactions, their validation, and the matching rule.

pub mod matching;
pub mod types;
pub mod validation;

#[cfg(test)]
mod matching_props;

pub use matching::{can_match, match_mismatch};
pub use types::{
    NewTransaction, Transaction, TransactionSource, TransactionStatus, TransactionType,
};
pub use validation::{build_manual_transaction, build_transaction};
