//! Account repository backed by the `accounts` table.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use tally_core::account::Account;
use tally_core::repository::{AccountStore, StoreError};
use tally_shared::types::AccountId;
use tracing::debug;

use super::store_err;
use crate::entities::accounts;

/// Account repository for the account guard.
#[derive(Debug)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_account(model: accounts::Model) -> Account {
    Account {
        id: Some(AccountId::from_uuid(model.id)),
        name: model.name,
        email: model.email,
        secret: model.secret,
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn save(&self, account: Account) -> Result<Account, StoreError> {
        let id = account.id.unwrap_or_else(AccountId::generate);
        let model = accounts::ActiveModel {
            id: Set(id.into_inner()),
            name: Set(account.name),
            email: Set(account.email),
            secret: Set(account.secret),
            created_at: Set(chrono::Utc::now().into()),
        };

        let saved = model.insert(&self.db).await.map_err(store_err)?;
        debug!(account_id = %id, "account stored");
        Ok(to_account(saved))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map(|found| found.map(to_account))
            .map_err(store_err)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let count = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(store_err)?;

        Ok(count > 0)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map(|found| found.map(to_account))
            .map_err(store_err)
    }
}
