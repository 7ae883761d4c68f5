//! End-to-end ledger flows against the in-memory store.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally_core::account::{Account, AccountError, AccountGuard, AuthenticationFailure};
use tally_core::ledger::{
    BalanceService, EntryStatus, EntryType, EntryValidationError, LedgerEntry, LedgerError,
    LedgerService,
};
use tally_core::repository::memory::InMemoryStore;
use tally_shared::types::AccountId;

struct Harness {
    guard: AccountGuard<Arc<InMemoryStore>>,
    ledger: LedgerService<Arc<InMemoryStore>>,
    balances: BalanceService<Arc<InMemoryStore>, Arc<InMemoryStore>>,
}

fn harness() -> Harness {
    let store = Arc::new(InMemoryStore::new());
    Harness {
        guard: AccountGuard::new(Arc::clone(&store)),
        ledger: LedgerService::new(Arc::clone(&store)),
        balances: BalanceService::new(Arc::clone(&store), store),
    }
}

fn entry(
    account: AccountId,
    description: &str,
    entry_type: EntryType,
    value: Decimal,
) -> LedgerEntry {
    LedgerEntry::new()
        .with_description(description)
        .with_month(3)
        .with_year(2024)
        .with_account(account)
        .with_type(entry_type)
        .with_value(value)
}

async fn register(h: &Harness, email: &str) -> AccountId {
    h.guard
        .create_account(Account::new("Owner", email, "secret"))
        .await
        .expect("account should be created")
        .id
        .expect("created account should have an id")
}

#[tokio::test]
async fn test_account_registration_and_login() {
    let h = harness();
    let id = register(&h, "owner@example.com").await;

    let logged_in = h.guard.authenticate("owner@example.com", "secret").await.unwrap();
    assert_eq!(logged_in.id, Some(id));

    assert!(matches!(
        h.guard.authenticate("owner@example.com", "wrong").await,
        Err(AccountError::Authentication(AuthenticationFailure::InvalidCredential))
    ));
    assert!(matches!(
        h.guard.authenticate("nobody@example.com", "secret").await,
        Err(AccountError::Authentication(AuthenticationFailure::AccountNotFound))
    ));
}

#[tokio::test]
async fn test_duplicate_email_is_rejected_case_insensitively() {
    let h = harness();
    register(&h, "owner@example.com").await;

    let result = h
        .guard
        .create_account(Account::new("Twin", "OWNER@example.com", "other"))
        .await;

    assert!(matches!(result, Err(AccountError::EmailTaken(_))));
}

#[tokio::test]
async fn test_entry_lifecycle() {
    let h = harness();
    let account = register(&h, "owner@example.com").await;

    let saved = h
        .ledger
        .save(entry(account, "Salary", EntryType::Income, dec!(3000)))
        .await
        .unwrap();
    let id = saved.id.expect("saved entry should have an id");
    assert_eq!(saved.status, Some(EntryStatus::Pending));

    let settled = h
        .ledger
        .update_status_by_id(id, EntryStatus::Settled)
        .await
        .unwrap();
    assert_eq!(settled.status, Some(EntryStatus::Settled));

    let stored = h.ledger.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.status, Some(EntryStatus::Settled));
    assert_eq!(stored.registered_on, saved.registered_on);

    h.ledger.delete(&stored).await.unwrap();
    assert!(h.ledger.find_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_invalid_entry_is_not_stored() {
    let h = harness();
    let account = register(&h, "owner@example.com").await;

    let err = h
        .ledger
        .save(entry(account, "Refund", EntryType::Income, dec!(-5)))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        LedgerError::Validation(EntryValidationError::InvalidValue)
    ));
    let all = h.ledger.search(&LedgerEntry::new()).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_search_by_example() {
    let h = harness();
    let ana = register(&h, "ana@example.com").await;
    let bia = register(&h, "bia@example.com").await;

    for (acc, desc, t, v) in [
        (ana, "Supermarket", EntryType::Expense, dec!(120)),
        (ana, "Salary", EntryType::Income, dec!(3000)),
        (ana, "Weekly supermarket run", EntryType::Expense, dec!(80)),
        (bia, "Supermarket", EntryType::Expense, dec!(60)),
    ] {
        h.ledger.save(entry(acc, desc, t, v)).await.unwrap();
    }

    let found = h
        .ledger
        .search(&LedgerEntry::new().with_account(ana).with_description("SUPERMARKET"))
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|e| e.account_id == Some(ana)));

    let incomes = h
        .ledger
        .search(&LedgerEntry::new().with_type(EntryType::Income))
        .await
        .unwrap();
    assert_eq!(incomes.len(), 1);
}

#[tokio::test]
async fn test_balances() {
    let h = harness();
    let account = register(&h, "owner@example.com").await;

    assert_eq!(
        h.balances
            .balance_by_type_and_account(account, EntryType::Expense)
            .await
            .unwrap(),
        Decimal::ZERO
    );

    for (desc, t, v) in [
        ("Rent", EntryType::Expense, dec!(100)),
        ("Power", EntryType::Expense, dec!(250)),
        ("Salary", EntryType::Income, dec!(1000)),
    ] {
        h.ledger.save(entry(account, desc, t, v)).await.unwrap();
    }

    assert_eq!(
        h.balances
            .balance_by_type_and_account(account, EntryType::Expense)
            .await
            .unwrap(),
        dec!(350)
    );
    assert_eq!(h.balances.net_balance(account).await.unwrap(), dec!(650));

    assert!(matches!(
        h.balances.net_balance(AccountId::generate()).await,
        Err(LedgerError::AccountNotFound(_))
    ));
}
