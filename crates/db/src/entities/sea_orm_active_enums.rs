//! `SeaORM` active enums stored as constrained VARCHAR columns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use tally_core::ledger::{EntryStatus, EntryType};

/// Stored form of [`EntryType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum EntryKind {
    /// Income entry.
    #[sea_orm(string_value = "INCOME")]
    Income,
    /// Expense entry.
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
}

/// Stored form of [`EntryStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum EntryState {
    /// Pending entry.
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Settled entry.
    #[sea_orm(string_value = "SETTLED")]
    Settled,
    /// Cancelled entry.
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

impl From<EntryType> for EntryKind {
    fn from(value: EntryType) -> Self {
        match value {
            EntryType::Income => Self::Income,
            EntryType::Expense => Self::Expense,
        }
    }
}

impl From<EntryKind> for EntryType {
    fn from(value: EntryKind) -> Self {
        match value {
            EntryKind::Income => Self::Income,
            EntryKind::Expense => Self::Expense,
        }
    }
}

impl From<EntryStatus> for EntryState {
    fn from(value: EntryStatus) -> Self {
        match value {
            EntryStatus::Pending => Self::Pending,
            EntryStatus::Settled => Self::Settled,
            EntryStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<EntryState> for EntryStatus {
    fn from(value: EntryState) -> Self {
        match value {
            EntryState::Pending => Self::Pending,
            EntryState::Settled => Self::Settled,
            EntryState::Cancelled => Self::Cancelled,
        }
    }
}
