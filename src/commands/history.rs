// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use super::{AppStore, exporter};
use crate::history::{latest_per_month, summarize};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(store: &AppStore<'_>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(store, sub)?,
        Some(("summary", sub)) => summary(store, sub)?,
        Some(("export", sub)) => exporter::handle(store, sub)?,
        _ => {}
    }
    Ok(())
}

/// Archives the current month.
pub fn record(store: &mut AppStore<'_>) -> Result<()> {
    let snap = store.record_snapshot()?;
    println!(
        "Recorded snapshot {} for {}: charges {}, left {}",
        snap.id,
        snap.month,
        fmt_money(&snap.charges.total),
        fmt_money(&snap.total_remainder())
    );
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRow {
    pub month: String,
    pub income: String,
    pub charges: String,
    pub allocated_a: String,
    pub allocated_b: String,
    pub remainder_a: String,
    pub remainder_b: String,
    pub total_remainder: String,
}

pub fn rows(store: &AppStore<'_>) -> Vec<HistoryRow> {
    latest_per_month(store.history())
        .into_iter()
        .map(|s| HistoryRow {
            month: s.month.to_string(),
            income: format!("{:.2}", s.income.total),
            charges: format!("{:.2}", s.charges.total),
            allocated_a: format!("{:.2}", s.allocation.allocated_a),
            allocated_b: format!("{:.2}", s.allocation.allocated_b),
            remainder_a: format!("{:.2}", s.remainders.a),
            remainder_b: format!("{:.2}", s.remainders.b),
            total_remainder: format!("{:.2}", s.total_remainder()),
        })
        .collect()
}

fn list(store: &AppStore<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let data = rows(store);
    if !maybe_print_json(sub.get_flag("json"), &data)? {
        if data.is_empty() {
            println!("No snapshots yet; run `duobudget snapshot` to archive this month");
            return Ok(());
        }
        let table_rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| {
                vec![
                    r.month,
                    r.income,
                    r.charges,
                    r.allocated_a,
                    r.allocated_b,
                    r.remainder_a,
                    r.remainder_b,
                    r.total_remainder,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Month", "Income", "Charges", "Pays A", "Pays B", "Left A", "Left B", "Left"],
                table_rows,
            )
        );
    }
    Ok(())
}

fn summary(store: &AppStore<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let latest = latest_per_month(store.history());
    let s = summarize(&latest);
    if maybe_print_json(sub.get_flag("json"), &s)? {
        return Ok(());
    }
    let span = |r: Option<crate::history::Range>| {
        r.map(|r| format!("{} .. {}", fmt_money(&r.min), fmt_money(&r.max)))
            .unwrap_or_default()
    };
    println!("Months tracked: {}", s.months_tracked);
    println!(
        "{}",
        pretty_table(
            &["", "Average", "Range"],
            vec![
                vec!["Income".into(), fmt_money(&s.average_income), span(s.income)],
                vec!["Charges".into(), fmt_money(&s.average_charges), span(s.charges)],
                vec!["Left".into(), fmt_money(&s.average_remainder), span(s.remainder)],
            ],
        )
    );
    Ok(())
}
