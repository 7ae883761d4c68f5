//! Initial database migration.
//!
//! Creates the `accounts` and `ledger_entries` tables together with the
//! check constraints that mirror the entry invariants.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(LEDGER_ENTRIES_SQL).await?;
        db.execute_unprepared(INDEXES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    name VARCHAR(150) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    secret VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const LEDGER_ENTRIES_SQL: &str = r"
CREATE TABLE ledger_entries (
    id UUID PRIMARY KEY,
    account_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
    description VARCHAR(255) NOT NULL,
    month SMALLINT NOT NULL,
    year INTEGER NOT NULL,
    value NUMERIC(16, 2) NOT NULL,
    entry_type VARCHAR(16) NOT NULL,
    status VARCHAR(16) NOT NULL DEFAULT 'PENDING',
    registered_on DATE NOT NULL DEFAULT CURRENT_DATE,

    CONSTRAINT chk_ledger_entries_description CHECK (btrim(description) <> ''),
    CONSTRAINT chk_ledger_entries_month CHECK (month BETWEEN 1 AND 12),
    CONSTRAINT chk_ledger_entries_value CHECK (value > 0),
    CONSTRAINT chk_ledger_entries_type CHECK (entry_type IN ('INCOME', 'EXPENSE')),
    CONSTRAINT chk_ledger_entries_status CHECK (status IN ('PENDING', 'SETTLED', 'CANCELLED'))
);
";

const INDEXES_SQL: &str = r"
CREATE INDEX idx_ledger_entries_account_type ON ledger_entries(account_id, entry_type);
CREATE INDEX idx_ledger_entries_period ON ledger_entries(account_id, year, month);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS ledger_entries;
DROP TABLE IF EXISTS accounts;
";
