//! Property-based tests for entry validation ordering.

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::AccountId;

use super::entry::{EntryType, LedgerEntry};
use super::validation::{EntryValidationError, validate_entry};

/// Strategy for any month value, valid or not.
fn any_month() -> impl Strategy<Value = Option<u32>> {
    prop_oneof![Just(None), (0u32..40).prop_map(Some)]
}

/// Strategy for months outside 1..=12.
fn out_of_range_month() -> impl Strategy<Value = u32> {
    prop_oneof![Just(0u32), 13u32..1000]
}

/// Strategy for any value, positive or not.
fn any_value() -> impl Strategy<Value = Option<Decimal>> {
    prop_oneof![
        Just(None),
        (-1_000_000i64..1_000_000i64).prop_map(|cents| Some(Decimal::new(cents, 2)))
    ]
}

fn any_type() -> impl Strategy<Value = Option<EntryType>> {
    prop_oneof![
        Just(None),
        Just(Some(EntryType::Income)),
        Just(Some(EntryType::Expense))
    ]
}

fn blank_description() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), "[ \t\n]{0,8}".prop_map(Some)]
}

prop_compose! {
    /// An entry whose fields after the description are arbitrary.
    fn entry_with_description(description: Option<String>)(
        month in any_month(),
        year in proptest::option::of(0i32..3000),
        has_account in any::<bool>(),
        value in any_value(),
        entry_type in any_type(),
    ) -> LedgerEntry {
        LedgerEntry {
            description: description.clone(),
            month,
            year,
            account_id: has_account.then(AccountId::generate),
            value,
            entry_type,
            ..LedgerEntry::default()
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A blank or absent description is reported regardless of other fields.
    #[test]
    fn prop_blank_description_always_reported_first(
        entry in blank_description().prop_flat_map(entry_with_description),
    ) {
        prop_assert_eq!(
            validate_entry(&entry),
            Err(EntryValidationError::InvalidDescription)
        );
    }

    /// An out-of-range month with a valid description reports the month.
    #[test]
    fn prop_bad_month_reported_after_description(
        month in out_of_range_month(),
        entry in entry_with_description(Some("Rent".to_string())),
    ) {
        let entry = LedgerEntry { month: Some(month), ..entry };
        prop_assert_eq!(validate_entry(&entry), Err(EntryValidationError::InvalidMonth));
    }

    /// Whatever fails, it is the earliest failing rule in check order.
    #[test]
    fn prop_reported_failure_is_earliest_rule(
        entry in proptest::option::of("[a-z ]{0,6}").prop_flat_map(entry_with_description),
    ) {
        let expected = if entry.description.as_deref().is_none_or(|d| d.trim().is_empty()) {
            Some(EntryValidationError::InvalidDescription)
        } else if !entry.month.is_some_and(|m| (1..=12).contains(&m)) {
            Some(EntryValidationError::InvalidMonth)
        } else if entry.year.is_none() {
            Some(EntryValidationError::InvalidYear)
        } else if entry.account_id.is_none() {
            Some(EntryValidationError::InvalidAccount)
        } else if !entry.value.is_some_and(|v| v > Decimal::ZERO) {
            Some(EntryValidationError::InvalidValue)
        } else if entry.entry_type.is_none() {
            Some(EntryValidationError::InvalidType)
        } else {
            None
        };

        prop_assert_eq!(validate_entry(&entry).err(), expected);
    }
}
