//! Property-based tests for ledger reports.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use portal_ledger_shared::types::{DateFormat, LedgerEntryId, MoveId, PartnerId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::service::ReportService;
use super::types::ReportContext;
use crate::ledger::{
    FilterParams, GroupBy, InMemoryLedgerStore, LedgerEntry, LedgerFilter, LineRecord, MoveRecord,
    Partner, group_key,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn context(partner_id: PartnerId) -> ReportContext {
    ReportContext {
        partner: Partner {
            id: partner_id,
            name: "Azure Interior".to_string(),
        },
        date_format: DateFormat::iso(),
    }
}

fn entry(seq: u128, date: NaiveDate, debit: Decimal, credit: Decimal) -> LedgerEntry {
    LedgerEntry {
        id: LedgerEntryId::from_uuid(Uuid::from_u128(seq)),
        move_id: MoveId::from_uuid(Uuid::from_u128(seq)),
        date,
        move_reference: format!("MISC/{seq}"),
        label: None,
        debit,
        credit,
        balance: Decimal::ZERO,
    }
}

/// Strategy for generating positive decimal amounts.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for generating ledger entries spread over three years.
fn entries_strategy() -> impl Strategy<Value = Vec<LedgerEntry>> {
    prop::collection::vec((0u64..1100, amount_strategy(), amount_strategy()), 0..60).prop_map(
        |raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (offset, debit, credit))| {
                    let date = d(2022, 1, 1) + Days::new(offset);
                    entry(i as u128 + 1, date, debit, credit)
                })
                .collect()
        },
    )
}

fn grouping_strategy() -> impl Strategy<Value = GroupBy> {
    prop_oneof![
        Just(GroupBy::None),
        Just(GroupBy::Day),
        Just(GroupBy::Month),
        Just(GroupBy::Year),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Grouping partitions the entry set and every key matches its entry date.
    #[test]
    fn prop_grouping_partitions_entries(
        mut entries in entries_strategy(),
        group_by in grouping_strategy(),
    ) {
        // Listing order from the store is newest first in some hosts.
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        let partner = PartnerId::new();
        let mut filter = LedgerFilter::for_partner(partner);
        filter.group_by = group_by;

        let expected: HashSet<_> = entries.iter().map(|e| e.id).collect();
        let report = ReportService::assemble(&context(partner), filter, None, entries.clone());

        let listed: Vec<_> = report.rows().map(|r| r.entry.id).collect();
        prop_assert_eq!(listed.len(), entries.len());
        prop_assert_eq!(listed.into_iter().collect::<HashSet<_>>(), expected);

        for group in &report.groups {
            for row in &group.items {
                prop_assert_eq!(&group_key(row.entry.date, group_by), &group.key);
            }
        }

        let keys: Vec<_> = report.groups.iter().map(|g| g.key.clone()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(keys, sorted);
    }

    /// Running balance after entry k is the opening balance plus the prefix sum.
    #[test]
    fn prop_running_balance_is_opening_plus_prefix_sum(
        entries in entries_strategy(),
        opening in -100_000i64..100_000i64,
    ) {
        let opening = Decimal::new(opening, 2);
        let partner = PartnerId::new();
        let report = ReportService::assemble(
            &context(partner),
            LedgerFilter::for_partner(partner),
            Some(opening),
            entries,
        );

        let mut prefix = Decimal::ZERO;
        let mut previous_date = None;
        for row in report.rows() {
            prefix += row.entry.debit - row.entry.credit;
            prop_assert_eq!(row.running_balance, opening + prefix);
            prop_assert!(previous_date.is_none_or(|p| p <= row.entry.date));
            previous_date = Some(row.entry.date);
        }
        prop_assert_eq!(report.closing_balance, opening + report.total_debit - report.total_credit);
    }
}

#[test]
fn test_running_balance_example() {
    let partner = PartnerId::new();
    let entries = vec![
        entry(1, d(2024, 1, 5), dec!(100), dec!(0)),
        entry(2, d(2024, 1, 10), dec!(0), dec!(40)),
    ];

    let report = ReportService::assemble(
        &context(partner),
        LedgerFilter::for_partner(partner),
        None,
        entries,
    );

    let balances: Vec<_> = report.rows().map(|r| r.running_balance).collect();
    assert_eq!(report.opening_balance, None);
    assert_eq!(balances, vec![dec!(100), dec!(60)]);
    assert_eq!(report.closing_balance, dec!(60));
    assert_eq!(report.total_debit, dec!(100));
    assert_eq!(report.total_credit, dec!(40));
    assert!(!report.is_grouped());
}

#[test]
fn test_month_grouping_example() {
    let partner = PartnerId::new();
    let mut filter = LedgerFilter::for_partner(partner);
    filter.group_by = GroupBy::Month;
    let entries = vec![
        entry(2, d(2024, 2, 1), dec!(10), dec!(0)),
        entry(1, d(2024, 1, 5), dec!(20), dec!(0)),
    ];

    let report = ReportService::assemble(&context(partner), filter, None, entries);

    assert!(report.is_grouped());
    assert_eq!(report.groups.len(), 2);
    assert_eq!(report.groups[0].key, "2024-01");
    assert_eq!(report.groups[0].items.len(), 1);
    assert_eq!(report.groups[0].items[0].entry.date, d(2024, 1, 5));
    assert_eq!(report.groups[1].key, "2024-02");
    assert_eq!(report.groups[1].items.len(), 1);
    assert_eq!(report.groups[1].items[0].entry.date, d(2024, 2, 1));
}

fn sample_store(partner: PartnerId) -> InMemoryLedgerStore {
    InMemoryLedgerStore::new()
        .with_partner(Partner {
            id: partner,
            name: "Azure Interior".to_string(),
        })
        .with_move(
            MoveRecord::new("INV/2023/0099", d(2023, 12, 20), "Customer Invoices")
                .line(LineRecord::receivable(partner, dec!(300), dec!(0)))
                .line(LineRecord::other("Product Sales", dec!(0), dec!(300))),
        )
        .with_move(
            MoveRecord::new("INV/2024/0001", d(2024, 1, 5), "Customer Invoices")
                .line(LineRecord::receivable(partner, dec!(100), dec!(0)))
                .line(LineRecord::other("Product Sales", dec!(0), dec!(100))),
        )
        .with_move(
            MoveRecord::new("BNK1/2024/0003", d(2024, 1, 10), "Bank")
                .line(LineRecord::receivable(partner, dec!(0), dec!(40)).label("Payment"))
                .line(LineRecord::other("Bank", dec!(40), dec!(0))),
        )
}

#[tokio::test]
async fn test_build_computes_opening_balance_before_date_from() {
    let partner = PartnerId::new();
    let store = sample_store(partner);
    let filter = LedgerFilter::resolve(
        partner,
        &FilterParams {
            date_from: Some("2024-01-01".to_string()),
            ..FilterParams::default()
        },
    );

    let report = ReportService::build(&store, &context(partner), &filter)
        .await
        .unwrap();

    assert_eq!(report.opening_balance, Some(dec!(300)));
    let balances: Vec<_> = report.rows().map(|r| r.running_balance).collect();
    assert_eq!(balances, vec![dec!(400), dec!(360)]);
    assert_eq!(report.entry_count, 2);
}

#[tokio::test]
async fn test_malformed_date_from_matches_absent_date_from() {
    let partner = PartnerId::new();
    let store = sample_store(partner);
    let malformed = LedgerFilter::resolve(
        partner,
        &FilterParams {
            date_from: Some("2024-31-01".to_string()),
            ..FilterParams::default()
        },
    );
    let absent = LedgerFilter::for_partner(partner);

    let a = ReportService::build(&store, &context(partner), &malformed)
        .await
        .unwrap();
    let b = ReportService::build(&store, &context(partner), &absent)
        .await
        .unwrap();

    let ids_a: Vec<_> = a.rows().map(|r| r.entry.id).collect();
    let ids_b: Vec<_> = b.rows().map(|r| r.entry.id).collect();
    assert_eq!(ids_a, ids_b);
    assert_eq!(ids_a.len(), 3);
    assert_eq!(a.opening_balance, None);
}

#[tokio::test]
async fn test_transaction_detail_not_found() {
    let partner = PartnerId::new();
    let store = sample_store(partner);

    let result =
        ReportService::transaction_detail(&store, &context(partner), LedgerEntryId::new()).await;

    assert!(matches!(
        result,
        Err(crate::ledger::LedgerError::EntryNotFound(_))
    ));
}
