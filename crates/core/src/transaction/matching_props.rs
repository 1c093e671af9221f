//! Property-based tests for the matching rule.

use chrono::NaiveDate;
use proptest::prelude::*;
use recon_shared::types::TransactionId;
use rust_decimal::Decimal;

use super::matching::{can_match, match_mismatch};
use super::types::{Transaction, TransactionSource, TransactionStatus, TransactionType};

fn arb_type() -> impl Strategy<Value = TransactionType> {
    prop_oneof![Just(TransactionType::Debit), Just(TransactionType::Credit)]
}

/// Positive amounts in cents, with a few repeated values so matches occur.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        1i64..1_000_000_000i64,
        prop::sample::select(vec![100i64, 10_000, 12_345]),
    ]
    .prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_transaction(source: TransactionSource) -> impl Strategy<Value = Transaction> {
    (arb_amount(), arb_type(), 0u32..365).prop_map(move |(amount, transaction_type, day)| {
        Transaction {
            id: TransactionId::new(),
            date: NaiveDate::from_yo_opt(2024, day + 1).unwrap(),
            amount,
            description: "Generated".to_string(),
            transaction_type,
            reference: "REF".to_string(),
            status: TransactionStatus::Unreconciled,
            source,
            account_id: None,
            trans_id: None,
        }
    })
}

proptest! {
    #[test]
    fn prop_can_match_is_symmetric(
        bank in arb_transaction(TransactionSource::Bank),
        system in arb_transaction(TransactionSource::System),
    ) {
        prop_assert_eq!(can_match(&bank, &system), can_match(&system, &bank));
    }

    #[test]
    fn prop_mismatch_agrees_with_can_match(
        bank in arb_transaction(TransactionSource::Bank),
        system in arb_transaction(TransactionSource::System),
    ) {
        prop_assert_eq!(can_match(&bank, &system), match_mismatch(&bank, &system).is_none());
    }

    #[test]
    fn prop_transaction_matches_its_counterpart_copy(
        bank in arb_transaction(TransactionSource::Bank),
        day in 0u32..365,
    ) {
        let mut system = bank.clone();
        system.id = TransactionId::new();
        system.source = TransactionSource::System;
        system.date = NaiveDate::from_yo_opt(2023, day + 1).unwrap();
        prop_assert!(can_match(&bank, &system));
    }
}
