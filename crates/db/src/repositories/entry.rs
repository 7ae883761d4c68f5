//! Ledger entry repository backed by the `ledger_entries` table.
//!
//! Search filters are translated criterion by criterion into SQL. The
//! description criterion becomes a case-insensitive `LIKE` over the lowered
//! column so results agree with [`EntryFilter::matches`].

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use tally_core::ledger::{EntryFilter, EntryType, LedgerEntry};
use tally_core::repository::{EntryStore, StoreError, ensure_storable_value};
use tally_shared::types::{AccountId, EntryId};
use tracing::debug;

use super::store_err;
use crate::entities::ledger_entries;
use crate::entities::sea_orm_active_enums::{EntryKind, EntryState};

/// Ledger entry repository for the ledger and balance services.
#[derive(Debug)]
pub struct EntryRepository {
    db: DatabaseConnection,
}

impl EntryRepository {
    /// Creates a new entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, StoreError> {
    value.ok_or_else(|| StoreError::Backend(format!("ledger entry has no {field}")))
}

fn month_column(month: u32) -> Option<i16> {
    i16::try_from(month).ok()
}

/// Builds an active model with every column but `registered_on` set.
fn to_active_model(
    id: EntryId,
    entry: LedgerEntry,
) -> Result<ledger_entries::ActiveModel, StoreError> {
    ensure_storable_value(&entry)?;
    let month = required(entry.month, "month")?;
    let month = month_column(month)
        .ok_or_else(|| StoreError::Backend(format!("month out of range: {month}")))?;

    Ok(ledger_entries::ActiveModel {
        id: Set(id.into_inner()),
        account_id: Set(required(entry.account_id, "account")?.into_inner()),
        description: Set(required(entry.description, "description")?),
        month: Set(month),
        year: Set(required(entry.year, "year")?),
        value: Set(required(entry.value, "value")?),
        entry_type: Set(EntryKind::from(required(entry.entry_type, "type")?)),
        status: Set(EntryState::from(entry.status.unwrap_or_default())),
        registered_on: NotSet,
    })
}

fn to_entry(model: ledger_entries::Model) -> LedgerEntry {
    LedgerEntry {
        id: Some(EntryId::from_uuid(model.id)),
        description: Some(model.description),
        month: u32::try_from(model.month).ok(),
        year: Some(model.year),
        account_id: Some(AccountId::from_uuid(model.account_id)),
        value: Some(model.value),
        entry_type: Some(model.entry_type.into()),
        status: Some(model.status.into()),
        registered_on: Some(model.registered_on),
    }
}

/// Escapes `LIKE` metacharacters so the needle is matched literally.
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl EntryStore for EntryRepository {
    async fn save(&self, entry: LedgerEntry) -> Result<LedgerEntry, StoreError> {
        let id = entry.id.unwrap_or_else(EntryId::generate);
        let mut model = to_active_model(id, entry)?;
        model.registered_on = Set(Utc::now().date_naive());

        let saved = model.insert(&self.db).await.map_err(store_err)?;
        debug!(entry_id = %id, "ledger entry stored");
        Ok(to_entry(saved))
    }

    async fn update(&self, entry: LedgerEntry) -> Result<LedgerEntry, StoreError> {
        let id = entry
            .id
            .ok_or_else(|| StoreError::MissingRecord("entry has no id".into()))?;
        let model = to_active_model(id, entry)?;

        let updated = model.update(&self.db).await.map_err(store_err)?;
        debug!(entry_id = %id, status = ?updated.status, "ledger entry updated");
        Ok(to_entry(updated))
    }

    async fn delete(&self, id: EntryId) -> Result<(), StoreError> {
        let result = ledger_entries::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(store_err)?;

        debug!(entry_id = %id, rows = result.rows_affected, "ledger entry deleted");
        Ok(())
    }

    async fn find_by_id(&self, id: EntryId) -> Result<Option<LedgerEntry>, StoreError> {
        ledger_entries::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map(|found| found.map(to_entry))
            .map_err(store_err)
    }

    async fn find_by_example(&self, filter: &EntryFilter) -> Result<Vec<LedgerEntry>, StoreError> {
        let mut query = ledger_entries::Entity::find();

        if let Some(id) = filter.id {
            query = query.filter(ledger_entries::Column::Id.eq(id.into_inner()));
        }
        if let Some(description) = &filter.description {
            let lowered = Func::lower(Expr::col((
                ledger_entries::Entity,
                ledger_entries::Column::Description,
            )));
            let pattern = like_pattern(&description.to_lowercase());
            query = query.filter(Expr::expr(lowered).like(pattern));
        }
        if let Some(month) = filter.month {
            // A month that does not fit the column cannot match any row.
            let Some(month) = month_column(month) else {
                return Ok(Vec::new());
            };
            query = query.filter(ledger_entries::Column::Month.eq(month));
        }
        if let Some(year) = filter.year {
            query = query.filter(ledger_entries::Column::Year.eq(year));
        }
        if let Some(account_id) = filter.account_id {
            query = query.filter(ledger_entries::Column::AccountId.eq(account_id.into_inner()));
        }
        if let Some(entry_type) = filter.entry_type {
            query = query.filter(ledger_entries::Column::EntryType.eq(EntryKind::from(entry_type)));
        }
        if let Some(status) = filter.status {
            query = query.filter(ledger_entries::Column::Status.eq(EntryState::from(status)));
        }

        let found = query
            .order_by_asc(ledger_entries::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(found.into_iter().map(to_entry).collect())
    }

    async fn sum_value_by_account_and_type(
        &self,
        account_id: AccountId,
        entry_type: EntryType,
    ) -> Result<Decimal, StoreError> {
        let total = ledger_entries::Entity::find()
            .select_only()
            .column_as(ledger_entries::Column::Value.sum(), "total")
            .filter(ledger_entries::Column::AccountId.eq(account_id.into_inner()))
            .filter(ledger_entries::Column::EntryType.eq(EntryKind::from(entry_type)))
            .into_tuple::<Option<Decimal>>()
            .one(&self.db)
            .await
            .map_err(store_err)?;

        Ok(total.flatten().unwrap_or(Decimal::ZERO))
    }
}
