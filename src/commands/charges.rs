// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use serde::Serialize;

use super::{AppStore, optional, required};
use crate::models::{ChargeCategory, ChargePatch, NewCharge};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(store: &mut AppStore<'_>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            store.remove_charge(id)?;
            println!("Removed charge {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn parse_category(s: &str) -> Result<ChargeCategory> {
    s.parse::<ChargeCategory>().map_err(|e| anyhow!(e))
}

fn add(store: &mut AppStore<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let name = required(sub, "name")?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let due = parse_date(required(sub, "due")?)?;
    let category = parse_category(required(sub, "category")?)?;
    let mut data = NewCharge::new(name, amount, due).category(category);
    if let Some(paid) = optional(sub, "paid") {
        data = data.paid_on(parse_date(paid)?);
    }
    let id = store.add_charge(data)?;
    println!("Added charge '{}' ({}) id={}", name, fmt_money(&amount), id);
    Ok(())
}

fn edit(store: &mut AppStore<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let mut patch = ChargePatch {
        name: optional(sub, "name").map(str::to_string),
        amount: optional(sub, "amount").map(parse_decimal).transpose()?,
        due_date: optional(sub, "due").map(parse_date).transpose()?,
        category: optional(sub, "category").map(parse_category).transpose()?,
        ..ChargePatch::default()
    };
    if let Some(paid) = optional(sub, "paid") {
        patch.paid = Some(true);
        patch.paid_date = Some(Some(parse_date(paid)?));
    } else if sub.get_flag("unpaid") {
        patch.paid = Some(false);
    }
    if patch.is_empty() {
        println!("Nothing to change");
        return Ok(());
    }
    store.update_charge(id, patch)?;
    println!("Updated charge {}", id);
    Ok(())
}

#[derive(Serialize)]
pub struct ChargeRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub amount: String,
    pub due: String,
    pub paid: String,
}

pub fn rows(store: &AppStore<'_>) -> Vec<ChargeRow> {
    let mut charges: Vec<_> = store.charges().iter().collect();
    charges.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.name.cmp(&b.name)));
    charges
        .into_iter()
        .map(|c| ChargeRow {
            id: c.id.clone(),
            name: c.name.clone(),
            category: c.category.as_str().to_string(),
            amount: format!("{:.2}", c.amount),
            due: c.due_date.to_string(),
            paid: c.paid_date.map(|d| d.to_string()).unwrap_or_else(|| {
                if c.paid { "yes".into() } else { String::new() }
            }),
        })
        .collect()
}

fn list(store: &AppStore<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let data = rows(store);
    if !maybe_print_json(sub.get_flag("json"), &data)? {
        let table_rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| vec![r.id, r.name, r.category, r.amount, r.due, r.paid])
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Category", "Amount", "Due", "Paid"], table_rows)
        );
        println!(
            "Total {} (paid {}, unpaid {})",
            fmt_money(&store.charges_total()),
            fmt_money(&store.paid_total()),
            fmt_money(&store.unpaid_total())
        );
    }
    Ok(())
}
