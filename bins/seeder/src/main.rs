//! Development data seeder for Tally.
//!
//! Registers a demo account, records a month of entries through the ledger
//! service and logs the resulting balances. Running it twice is harmless: an
//! existing demo account is reused and only its balances are reported.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use sea_orm_migration::MigratorTrait;
use tally_core::account::{Account, CredentialScheme};
use tally_core::ledger::{EntryStatus, EntryType, LedgerEntry};
use tally_core::repository::AccountStore;
use tally_core::{AccountGuard, BalanceService, LedgerService};
use tally_db::migration::Migrator;
use tally_db::{AccountRepository, EntryRepository};
use tally_shared::AppConfig;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEMO_EMAIL: &str = "demo@tally.dev";
const DEMO_SECRET: &str = "demo-secret";

/// (description, type, value in cents, settled)
const DEMO_ENTRIES: &[(&str, EntryType, i64, bool)] = &[
    ("Salary", EntryType::Income, 520_000, true),
    ("Freelance invoice", EntryType::Income, 85_000, false),
    ("Rent", EntryType::Expense, 180_000, true),
    ("Groceries", EntryType::Expense, 42_350, true),
    ("Electricity bill", EntryType::Expense, 9_870, false),
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally_seeder=info,tally_db=debug,sea_orm=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let db = tally_db::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    Migrator::up(&db, None)
        .await
        .context("failed to apply migrations")?;

    // Each repository owns its pool; services share them through `Arc`.
    let accounts = Arc::new(AccountRepository::new(db));
    let entries = Arc::new(EntryRepository::new(
        tally_db::connect(&config.database)
            .await
            .context("failed to connect to database")?,
    ));

    let guard = AccountGuard::with_scheme(
        Arc::clone(&accounts),
        CredentialScheme::from(config.auth.credential_scheme),
    );
    let ledger = LedgerService::new(Arc::clone(&entries));
    let balances = BalanceService::new(entries, Arc::clone(&accounts));

    let account = if let Some(existing) = accounts.find_by_email(DEMO_EMAIL).await? {
        info!(email = DEMO_EMAIL, "demo account already exists, skipping entries");
        existing
    } else {
        let account = guard
            .create_account(Account::new("Demo User", DEMO_EMAIL, DEMO_SECRET))
            .await?;
        seed_entries(&ledger, &account).await?;
        account
    };

    guard
        .authenticate(DEMO_EMAIL, DEMO_SECRET)
        .await
        .context("demo credentials were rejected")?;

    let account_id = account.id.context("stored account has no id")?;
    let summary = balances.summary(account_id).await?;
    info!(
        income = %summary.income,
        expense = %summary.expense,
        net = %summary.net,
        "seeding complete"
    );

    Ok(())
}

async fn seed_entries(
    ledger: &LedgerService<Arc<EntryRepository>>,
    account: &Account,
) -> Result<()> {
    let account_id = account.id.context("stored account has no id")?;

    for &(description, entry_type, cents, settled) in DEMO_ENTRIES {
        let entry = LedgerEntry::new()
            .with_description(description)
            .with_month(1)
            .with_year(2026)
            .with_account(account_id)
            .with_value(Decimal::new(cents, 2))
            .with_type(entry_type);

        let mut saved = ledger.save(entry).await?;
        if settled {
            ledger.update_status(&mut saved, EntryStatus::Settled).await?;
        }
        info!(description, status = ?saved.status, "entry recorded");
    }

    Ok(())
}
