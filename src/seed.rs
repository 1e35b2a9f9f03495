// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Baseline state used on first start, after a schema change and on reset.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::models::{
    AppState, BudgetCategory, Charge, ChargeCategory, Goal, GoalContribution, GoalPriority,
    HistoryEntry, Month, Movement, Party, Payer, PersonalBudget, SCHEMA_VERSION,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn eur(units: i64) -> Decimal {
    Decimal::from(units)
}

fn charge(
    id: &str,
    name: &str,
    amount: i64,
    due: NaiveDate,
    category: ChargeCategory,
    paid_date: Option<NaiveDate>,
) -> Charge {
    Charge {
        id: id.to_string(),
        name: name.to_string(),
        amount: eur(amount),
        due_date: due,
        category,
        paid: paid_date.is_some(),
        paid_date,
    }
}

fn budget(id: &str, owner: Party, name: &str, allocated: i64, spent: i64, category: BudgetCategory) -> PersonalBudget {
    PersonalBudget {
        id: id.to_string(),
        owner,
        name: name.to_string(),
        allocated_amount: eur(allocated),
        spent_amount: eur(spent),
        category,
        month: Month::new(2024, 1).unwrap_or_else(Month::current),
        deadline: None,
    }
}

fn goal(id: &str, name: &str, target: i64, saved: i64, deadline: NaiveDate, priority: GoalPriority, description: &str) -> Goal {
    Goal {
        id: id.to_string(),
        name: name.to_string(),
        target_amount: eur(target),
        saved_amount: eur(saved),
        deadline: Some(deadline),
        priority,
        description: description.to_string(),
        history: vec![GoalContribution {
            timestamp: at(2024, 1, 1),
            delta: eur(saved),
        }],
    }
}

fn expense(id: &str, amount: i64, category: &str, description: &str, on: NaiveDate, payer: Payer, budget_id: Option<&str>) -> HistoryEntry {
    HistoryEntry::Expense(Movement {
        id: id.to_string(),
        amount: eur(amount),
        category: category.to_string(),
        description: description.to_string(),
        date: on,
        payer,
        budget_id: budget_id.map(str::to_string),
    })
}

/// The fixed baseline, positioned on `current_month`.
pub fn baseline(current_month: Month) -> AppState {
    AppState {
        schema_version: SCHEMA_VERSION,
        current_month,
        income_a: eur(3100),
        income_b: eur(1500),
        charges: vec![
            charge("seed-charge-1", "Rent", 900, date(2024, 1, 5), ChargeCategory::Housing, Some(date(2024, 1, 3))),
            charge("seed-charge-2", "Electricity", 120, date(2024, 1, 15), ChargeCategory::Energy, None),
            charge("seed-charge-3", "Water", 18, date(2024, 1, 20), ChargeCategory::Energy, None),
            charge("seed-charge-4", "Internet", 35, date(2024, 1, 10), ChargeCategory::Internet, Some(date(2024, 1, 8))),
            charge("seed-charge-5", "Car loan", 600, date(2024, 1, 25), ChargeCategory::Transport, None),
            charge("seed-charge-6", "Waste collection", 18, date(2024, 1, 30), ChargeCategory::Other, None),
            charge("seed-charge-7", "Home insurance", 17, date(2024, 1, 15), ChargeCategory::Insurance, None),
        ],
        personal_budgets_a: vec![
            budget("seed-budget-1", Party::A, "Transport", 200, 150, BudgetCategory::Transport),
            budget("seed-budget-2", Party::A, "Leisure", 300, 120, BudgetCategory::Leisure),
        ],
        personal_budgets_b: vec![
            budget("seed-budget-3", Party::B, "Shopping", 150, 80, BudgetCategory::Leisure),
            budget("seed-budget-4", Party::B, "Restaurants", 200, 95, BudgetCategory::Food),
        ],
        goals: vec![
            goal("seed-goal-1", "Summer holidays", 3000, 1200, date(2024, 6, 30), GoalPriority::High, "Family week at the seaside"),
            goal("seed-goal-2", "New car", 15000, 3500, date(2025, 12, 31), GoalPriority::Medium, "Replace the current car"),
        ],
        history: vec![
            expense("seed-history-1", 800, "housing", "January rent", date(2024, 1, 3), Payer::Shared, None),
            expense("seed-history-2", 35, "other", "Internet bill", date(2024, 1, 8), Payer::Shared, None),
            expense("seed-history-3", 150, "transport", "Fuel", date(2024, 1, 12), Payer::A, Some("seed-budget-1")),
        ],
        communal_savings: eur(2500),
    }
}
