// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use super::AppStore;
use crate::allocation::Split;
use crate::models::{GoalStats, Month, Party};
use crate::utils::{fmt_money, fmt_percent, get_party_names, maybe_print_json, pretty_table};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Everything the status screen shows, in one serializable value.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub month: Month,
    pub name_a: String,
    pub name_b: String,
    pub split: Split,
    pub paid_total: Decimal,
    pub unpaid_total: Decimal,
    pub overdue_count: usize,
    pub by_category: Vec<CategoryTotal>,
    pub communal_savings: Decimal,
    pub goals: GoalStats,
}

pub fn build(store: &AppStore<'_>) -> Result<Dashboard> {
    let (name_a, name_b) = get_party_names(store.storage())?;
    let today = Utc::now().date_naive();
    Ok(Dashboard {
        month: store.state().current_month,
        name_a,
        name_b,
        split: store.current_split(),
        paid_total: store.paid_total(),
        unpaid_total: store.unpaid_total(),
        overdue_count: store.overdue_charges(today).len(),
        by_category: store
            .charges_by_category()
            .into_iter()
            .map(|(cat, total)| CategoryTotal {
                category: cat.as_str().to_string(),
                total,
            })
            .collect(),
        communal_savings: store.state().communal_savings,
        goals: GoalStats::of(store.goals()),
    })
}

pub fn handle(store: &AppStore<'_>, m: &clap::ArgMatches) -> Result<()> {
    let d = build(store)?;
    if maybe_print_json(m.get_flag("json"), &d)? {
        return Ok(());
    }

    let s = &d.split;
    println!("Month {}", d.month);
    println!(
        "{}",
        pretty_table(
            &["", "Income", "Share", "Pays", "Left"],
            Party::BOTH
                .into_iter()
                .map(|p| {
                    let name = match p {
                        Party::A => d.name_a.clone(),
                        Party::B => d.name_b.clone(),
                    };
                    vec![
                        name,
                        fmt_money(&store.state().income(p)),
                        fmt_percent(&s.percent(p)),
                        fmt_money(&s.allocated(p)),
                        fmt_money(&s.remainder(p)),
                    ]
                })
                .chain(std::iter::once(
                    vec![
                        "Total".into(),
                        fmt_money(&s.total_income),
                        String::new(),
                        fmt_money(&s.total_charges),
                        fmt_money(&s.total_remainder()),
                    ],
                ))
                .collect(),
        )
    );
    println!(
        "Charges: {} paid, {} unpaid, {} overdue; {} of income",
        fmt_money(&d.paid_total),
        fmt_money(&d.unpaid_total),
        d.overdue_count,
        fmt_percent(&s.charge_ratio())
    );
    if !d.by_category.is_empty() {
        let rows = d
            .by_category
            .iter()
            .map(|c| vec![c.category.clone(), fmt_money(&c.total)])
            .collect();
        println!("{}", pretty_table(&["Category", "Total"], rows));
    }
    println!("Communal savings: {}", fmt_money(&d.communal_savings));
    println!(
        "Goals: {} of {} saved across {} goals",
        fmt_money(&d.goals.total_saved),
        fmt_money(&d.goals.total_target),
        d.goals.count
    );
    Ok(())
}
