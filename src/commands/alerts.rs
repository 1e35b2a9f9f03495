// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;

use super::AppStore;
use crate::alerts::{Alert, AlertSubject, pending};
use crate::markers::AlertCondition;
use crate::utils::{fmt_money, fmt_percent};

fn describe(alert: &Alert) -> String {
    match &alert.subject {
        AlertSubject::Budget { name, usage_percent } => {
            let what = match alert.marker.condition {
                AlertCondition::BudgetLimit => "limit reached",
                _ => "nearly spent",
            };
            format!("Budget '{}' {} ({} used)", name, what, fmt_percent(usage_percent))
        }
        AlertSubject::Goal {
            name,
            days_left,
            progress_percent,
            required_per_day,
        } => format!(
            "Goal '{}' due in {} days at {}, needs {} per day",
            name,
            days_left,
            fmt_percent(progress_percent),
            fmt_money(required_per_day)
        ),
    }
}

/// Alerts for the current month that have not been shown yet. Each one is
/// marked as fired once printed; `--all` prints everything without marking.
pub fn unseen(store: &AppStore<'_>) -> Result<Vec<Alert>> {
    let today = Utc::now().date_naive();
    let mut out = Vec::new();
    for alert in pending(store.state(), store.state().current_month, today) {
        if !store.has_fired(&alert.marker)? {
            out.push(alert);
        }
    }
    Ok(out)
}

pub fn handle(store: &AppStore<'_>, m: &clap::ArgMatches) -> Result<()> {
    if m.get_flag("all") {
        let today = Utc::now().date_naive();
        let all = pending(store.state(), store.state().current_month, today);
        if all.is_empty() {
            println!("No alerts");
        }
        for alert in &all {
            println!("{}", describe(alert));
        }
        return Ok(());
    }

    let fresh = unseen(store)?;
    if fresh.is_empty() {
        println!("No new alerts");
    }
    for alert in &fresh {
        println!("{}", describe(alert));
        store.mark_fired(&alert.marker)?;
    }
    Ok(())
}
