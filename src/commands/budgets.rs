// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use serde::Serialize;

use super::{AppStore, deadline_patch, optional, required};
use crate::models::{AlertLevel, BudgetCategory, NewPersonalBudget, Party, PersonalBudgetPatch};
use crate::utils::{
    get_party_name, maybe_print_json, parse_date, parse_decimal, parse_month, parse_party,
    pretty_table,
};

pub fn handle(store: &mut AppStore<'_>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            store.remove_personal_budget(id)?;
            println!("Removed budget {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn parse_category(s: &str) -> Result<BudgetCategory> {
    s.parse::<BudgetCategory>().map_err(|e| anyhow!(e))
}

fn add(store: &mut AppStore<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let owner = parse_party(required(sub, "owner")?)?;
    let name = required(sub, "name")?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let month = match optional(sub, "month") {
        Some(m) => parse_month(m)?,
        None => store.state().current_month,
    };
    let mut data = NewPersonalBudget::new(name, amount, month);
    data.category = parse_category(required(sub, "category")?)?;
    if let Some(spent) = optional(sub, "spent") {
        data.spent_amount = parse_decimal(spent)?;
    }
    data.deadline = optional(sub, "deadline").map(parse_date).transpose()?;
    let id = store.add_personal_budget(data, owner)?;
    let who = get_party_name(store.storage(), owner)?;
    println!("Added budget '{}' for {} id={}", name, who, id);
    Ok(())
}

fn edit(store: &mut AppStore<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let patch = PersonalBudgetPatch {
        name: optional(sub, "name").map(str::to_string),
        allocated_amount: optional(sub, "amount").map(parse_decimal).transpose()?,
        spent_amount: optional(sub, "spent").map(parse_decimal).transpose()?,
        category: optional(sub, "category").map(parse_category).transpose()?,
        deadline: deadline_patch(sub)?,
        ..PersonalBudgetPatch::default()
    };
    store.update_personal_budget(id, patch)?;
    println!("Updated budget {}", id);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRow {
    pub id: String,
    pub owner: String,
    pub name: String,
    pub category: String,
    pub month: String,
    pub allocated: String,
    pub spent: String,
    pub remaining: String,
    pub usage_percent: String,
    pub alert: String,
}

fn alert_label(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::Normal => "",
        AlertLevel::Warning => "warning",
        AlertLevel::Limit => "limit",
    }
}

pub fn rows(store: &AppStore<'_>, owner: Option<Party>) -> Result<Vec<BudgetRow>> {
    let owners: Vec<Party> = match owner {
        Some(p) => vec![p],
        None => Party::BOTH.to_vec(),
    };
    let mut data = Vec::new();
    for party in owners {
        let who = get_party_name(store.storage(), party)?;
        for b in store.personal_budgets(party) {
            data.push(BudgetRow {
                id: b.id.clone(),
                owner: who.clone(),
                name: b.name.clone(),
                category: b.category.as_str().to_string(),
                month: b.month.to_string(),
                allocated: format!("{:.2}", b.allocated_amount),
                spent: format!("{:.2}", b.spent_amount),
                remaining: format!("{:.2}", b.remaining()),
                usage_percent: format!("{:.2}", b.usage_percent()),
                alert: alert_label(b.alert_level()).to_string(),
            });
        }
    }
    Ok(data)
}

fn list(store: &AppStore<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let owner = optional(sub, "owner").map(parse_party).transpose()?;
    let data = rows(store, owner)?;
    if !maybe_print_json(sub.get_flag("json"), &data)? {
        let table_rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| {
                vec![
                    r.id, r.owner, r.name, r.category, r.month, r.allocated, r.spent,
                    r.remaining, r.usage_percent, r.alert,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Id", "Owner", "Name", "Category", "Month", "Budget", "Spent", "Left", "Used %",
                    "Alert",
                ],
                table_rows,
            )
        );
    }
    Ok(())
}
