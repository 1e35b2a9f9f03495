// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{TimeZone, Utc};
use duobudget::allocation::Split;
use duobudget::history::{latest_per_month, summarize};
use duobudget::models::{HistoryEntry, Month, SnapshotRecord};
use duobudget::seed;
use duobudget::snapshot::{Snapshot, build_snapshot_at};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn snap(year: i32, month: u32, income_a: Decimal, income_b: Decimal, minute: u32) -> Snapshot {
    let state = seed::baseline(Month::new(year, month).unwrap());
    let at = Utc.with_ymd_and_hms(year, month, 28, 12, minute, 0).unwrap();
    build_snapshot_at(state.current_month, income_a, income_b, &state.charges, at)
}

fn entry(s: Snapshot) -> HistoryEntry {
    HistoryEntry::Snapshot(SnapshotRecord {
        id: s.id.clone(),
        date: s.created_at,
        snapshot: s,
    })
}

#[test]
fn snapshot_freezes_the_split() {
    let s = snap(2024, 3, dec!(3100), dec!(1500), 0);
    assert!(s.id.starts_with("snapshot-2024-03-"));
    assert_eq!(s.income.total, dec!(4600));
    assert_eq!(s.charges.total, dec!(1708));
    assert_eq!(s.charges.details.len(), 7);
    assert_eq!(s.charges.details[0].name, "Rent");
    assert_eq!(s.allocation.percent_a, dec!(67.39));
    assert_eq!(s.remainders.a, dec!(1948.98));
    assert_eq!(s.remainders.b, dec!(943.02));
    assert_eq!(s.split(), Split::compute(dec!(3100), dec!(1500), dec!(1708)));
    assert_eq!(s.total_remainder(), dec!(2892));
}

#[test]
fn snapshots_taken_together_get_distinct_ids() {
    let a = snap(2024, 3, dec!(3100), dec!(1500), 0);
    let b = snap(2024, 3, dec!(3100), dec!(1500), 0);
    assert_ne!(a.id, b.id);
}

#[test]
fn latest_snapshot_per_month_wins() {
    let history = vec![
        entry(snap(2024, 1, dec!(3000), dec!(1500), 0)),
        entry(snap(2024, 2, dec!(3000), dec!(1500), 0)),
        entry(snap(2024, 1, dec!(3200), dec!(1500), 30)),
    ];
    let latest = latest_per_month(&history);
    assert_eq!(latest.len(), 2);
    assert_eq!(latest[0].month, Month::new(2024, 2).unwrap());
    assert_eq!(latest[1].month, Month::new(2024, 1).unwrap());
    assert_eq!(latest[1].income.a, dec!(3200));
}

#[test]
fn non_snapshot_entries_are_ignored() {
    let state = seed::baseline(Month::new(2024, 1).unwrap());
    assert!(latest_per_month(&state.history).is_empty());
}

#[test]
fn empty_summary() {
    let s = summarize(&[]);
    assert_eq!(s.months_tracked, 0);
    assert_eq!(s.average_income, Decimal::ZERO);
    assert!(s.income.is_none());
    assert!(s.remainder.is_none());
}

#[test]
fn summary_averages_and_ranges() {
    let jan = snap(2024, 1, dec!(3000), dec!(1000), 0);
    let feb = snap(2024, 2, dec!(3500), dec!(1500), 0);
    let s = summarize(&[&jan, &feb]);
    assert_eq!(s.months_tracked, 2);
    assert_eq!(s.average_income, dec!(4500));
    assert_eq!(s.average_charges, dec!(1708));
    assert_eq!(s.average_remainder, dec!(2792));
    let income = s.income.unwrap();
    assert_eq!(income.min, dec!(4000));
    assert_eq!(income.max, dec!(5000));
}

#[test]
fn history_entries_are_tagged_by_kind() {
    let e = entry(snap(2024, 4, dec!(100), dec!(100), 0));
    let v = serde_json::to_value(&e).unwrap();
    assert_eq!(v["type"], "snapshot");
    let back: HistoryEntry = serde_json::from_value(v).unwrap();
    assert_eq!(back, e);
}
