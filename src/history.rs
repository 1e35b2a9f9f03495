// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{HistoryEntry, Month};
use crate::money::{round2, sum};
use crate::snapshot::Snapshot;

/// Last snapshot recorded for each month, newest month first.
pub fn latest_per_month(history: &[HistoryEntry]) -> Vec<&Snapshot> {
    let mut by_month: BTreeMap<Month, &Snapshot> = BTreeMap::new();
    for snap in history.iter().filter_map(HistoryEntry::as_snapshot) {
        by_month.insert(snap.month, snap);
    }
    by_month.into_values().rev().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub min: Decimal,
    pub max: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub months_tracked: usize,
    pub average_income: Decimal,
    pub average_charges: Decimal,
    pub average_remainder: Decimal,
    pub income: Option<Range>,
    pub charges: Option<Range>,
    pub remainder: Option<Range>,
}

fn average(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    sum(values.iter().copied())
        .checked_div(Decimal::from(values.len()))
        .map(round2)
        .unwrap_or(Decimal::ZERO)
}

fn range(values: &[Decimal]) -> Option<Range> {
    let min = values.iter().copied().min()?;
    let max = values.iter().copied().max()?;
    Some(Range { min, max })
}

/// Averages and extremes over the given snapshots.
pub fn summarize(snapshots: &[&Snapshot]) -> HistorySummary {
    let income: Vec<Decimal> = snapshots.iter().map(|s| s.income.total).collect();
    let charges: Vec<Decimal> = snapshots.iter().map(|s| s.charges.total).collect();
    let remainder: Vec<Decimal> = snapshots.iter().map(|s| s.total_remainder()).collect();
    HistorySummary {
        months_tracked: snapshots.len(),
        average_income: average(&income),
        average_charges: average(&charges),
        average_remainder: average(&remainder),
        income: range(&income),
        charges: range(&charges),
        remainder: range(&remainder),
    }
}
