//! Reconciliation workflow walkthrough.
//!
//! Seeds a store with sample bank and system transactions, then plays a maker
//! and a checker through the reconciliation and file-upload workflows and
//! prints the resulting dashboard.
//!
//! Usage: cargo run --bin recon-demo

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use recon_core::reconciliation::NewReconciliation;
use recon_core::transaction::{NewTransaction, TransactionSource, TransactionType};
use recon_core::upload::{NewFileUpload, export_csv, export_file_name};
use recon_core::{DashboardSummary, ReconciliationStore, Role, Session, User};
use recon_shared::{AppConfig, AppError, AppResult, LoggingConfig};

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(logging.json.then(|| fmt::layer().json()))
        .with((!logging.json).then(fmt::layer))
        .init();
}

fn date(year: i32, month: u32, day: u32) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| AppError::Internal(format!("invalid seed date {year}-{month}-{day}")))
}

fn row(
    date: NaiveDate,
    cents: i64,
    transaction_type: TransactionType,
    description: &str,
    source: TransactionSource,
    account_id: &str,
    trans_id: &str,
) -> NewTransaction {
    NewTransaction {
        date,
        amount: Decimal::new(cents, 2),
        description: description.to_string(),
        transaction_type,
        reference: None,
        source,
        account_id: Some(account_id.to_string()),
        trans_id: Some(trans_id.to_string()),
    }
}

/// Seeds the working set with sample statement lines.
fn seed_transactions(store: &mut ReconciliationStore, maker: &User) -> AppResult<()> {
    let seeds = [
        row(
            date(2024, 1, 15)?,
            150_000,
            TransactionType::Credit,
            "Client payment - Invoice 1001",
            TransactionSource::Bank,
            "ACC001",
            "BNK-1001",
        ),
        row(
            date(2024, 1, 16)?,
            25_000,
            TransactionType::Debit,
            "Office supplies",
            TransactionSource::Bank,
            "ACC001",
            "BNK-1002",
        ),
        row(
            date(2024, 1, 17)?,
            320_000,
            TransactionType::Credit,
            "Consulting retainer",
            TransactionSource::Bank,
            "ACC001",
            "BNK-1003",
        ),
        row(
            date(2024, 1, 15)?,
            150_000,
            TransactionType::Credit,
            "Invoice 1001 receipt",
            TransactionSource::System,
            "GL-4000",
            "SYS-2001",
        ),
        row(
            date(2024, 1, 16)?,
            25_000,
            TransactionType::Credit,
            "Office supplies (miskeyed)",
            TransactionSource::System,
            "GL-6100",
            "SYS-2002",
        ),
    ];

    for seed in seeds {
        store.create_transaction(maker, seed)?;
    }
    info!(count = store.transactions().len(), "Seeded transactions");
    Ok(())
}

fn walkthrough(store: &mut ReconciliationStore, session: &mut Session) -> AppResult<()> {
    seed_transactions(store, session.user())?;

    let bank: Vec<_> = store
        .unreconciled(TransactionSource::Bank)
        .iter()
        .map(|t| t.id)
        .collect();
    let system: Vec<_> = store
        .unreconciled(TransactionSource::System)
        .iter()
        .map(|t| t.id)
        .collect();
    let ([first_bank, second_bank, ..], [first_system, second_system, ..]) =
        (bank.as_slice(), system.as_slice())
    else {
        return Err(AppError::Internal("seed data missing".to_string()));
    };

    // Matching pair.
    let matched = NewReconciliation {
        bank_transaction_id: *first_bank,
        system_transaction_id: *first_system,
        comments: Some("Invoice 1001 settled".to_string()),
    };
    let entry_id = store.create_reconciliation(session.user(), matched)?.id;

    // Debit against credit: refused while matching is required.
    let mismatched = NewReconciliation {
        bank_transaction_id: *second_bank,
        system_transaction_id: *second_system,
        comments: None,
    };
    if let Err(err) = store.create_reconciliation(session.user(), mismatched) {
        warn!(code = err.error_code(), "Second pairing refused: {err}");
    }

    let batch = NewFileUpload {
        file_name: "system_january.xlsx".to_string(),
        source: TransactionSource::System,
        transactions: vec![row(
            date(2024, 1, 17)?,
            320_000,
            TransactionType::Credit,
            "Retainer - January",
            TransactionSource::System,
            "GL-4000",
            "SYS-2003",
        )],
        organization: Some("Acme Corp".to_string()),
        schedule: Some("monthly".to_string()),
        remarks: None,
    };
    let upload_id = store.add_file_upload(session.user(), batch)?.id;

    session.change_role(Role::Checker);
    let checker = session.user();

    let comments = Some("looks good".to_string());
    store.approve_reconciliation(checker, entry_id, comments)?;
    store.approve_file(checker, upload_id, None)?;

    if let Some(upload) = store.file_upload(upload_id) {
        let mut buf = Vec::new();
        export_csv(upload, &mut buf)?;
        println!("--- {} ---", export_file_name(&upload.file_name));
        println!("{}", String::from_utf8_lossy(&buf));
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config.logging);

    info!(
        require_match = config.workflow.require_match,
        reconcile_on_approve = config.workflow.reconcile_on_approve,
        allow_self_approval = config.workflow.allow_self_approval,
        "Workflow configured"
    );

    let mut store = ReconciliationStore::new(config.workflow.clone());
    let mut session = Session::new(User::new("John Doe", Role::Maker, "john.doe@company.com"));

    walkthrough(&mut store, &mut session)?;

    let summary = DashboardSummary::from_store(&store);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
