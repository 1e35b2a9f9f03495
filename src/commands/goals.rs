// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::Utc;
use serde::Serialize;

use super::{AppStore, deadline_patch, optional, required};
use crate::models::{GoalPatch, GoalPriority, GoalStats, NewGoal};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(store: &mut AppStore<'_>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("save", sub)) => {
            let id = required(sub, "id")?;
            let delta = parse_decimal(required(sub, "amount")?)?;
            let saved = store.adjust_goal_savings(id, delta)?;
            println!("Goal {} now holds {}", id, fmt_money(&saved));
        }
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            store.remove_goal(id)?;
            println!("Removed goal {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn parse_priority(s: &str) -> Result<GoalPriority> {
    s.parse::<GoalPriority>().map_err(|e| anyhow!(e))
}

fn add(store: &mut AppStore<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let name = required(sub, "name")?;
    let mut data = NewGoal::new(name, parse_decimal(required(sub, "target")?)?);
    data.deadline = optional(sub, "deadline").map(parse_date).transpose()?;
    data.priority = parse_priority(required(sub, "priority")?)?;
    data.description = optional(sub, "description").unwrap_or_default().to_string();
    let id = store.add_goal(data)?;
    println!("Added goal '{}' id={}", name, id);
    Ok(())
}

fn edit(store: &mut AppStore<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let patch = GoalPatch {
        name: optional(sub, "name").map(str::to_string),
        target_amount: optional(sub, "target").map(parse_decimal).transpose()?,
        deadline: deadline_patch(sub)?,
        priority: optional(sub, "priority").map(parse_priority).transpose()?,
        description: optional(sub, "description").map(str::to_string),
    };
    store.update_goal(id, patch)?;
    println!("Updated goal {}", id);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRow {
    pub id: String,
    pub name: String,
    pub priority: String,
    pub target: String,
    pub saved: String,
    pub progress_percent: String,
    pub deadline: String,
    pub days_left: String,
}

fn list(store: &AppStore<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let today = Utc::now().date_naive();
    let data: Vec<GoalRow> = store
        .goals()
        .iter()
        .map(|g| GoalRow {
            id: g.id.clone(),
            name: g.name.clone(),
            priority: g.priority.as_str().to_string(),
            target: format!("{:.2}", g.target_amount),
            saved: format!("{:.2}", g.saved_amount),
            progress_percent: format!("{:.2}", g.progress_percent()),
            deadline: g.deadline.map(|d| d.to_string()).unwrap_or_default(),
            days_left: g
                .days_left(today)
                .map(|d| d.to_string())
                .unwrap_or_default(),
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), &data)? {
        let table_rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| {
                vec![
                    r.id,
                    r.name,
                    r.priority,
                    r.target,
                    r.saved,
                    r.progress_percent,
                    r.deadline,
                    r.days_left,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "Priority", "Target", "Saved", "%", "Deadline", "Days left"],
                table_rows,
            )
        );
        let s = GoalStats::of(store.goals());
        println!(
            "{} goals, {} reached, {} of {} saved ({:.2} %)",
            s.count,
            s.reached,
            fmt_money(&s.total_saved),
            fmt_money(&s.total_target),
            s.global_percent
        );
    }
    Ok(())
}
