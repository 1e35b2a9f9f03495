// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Detection of budget and goal conditions worth notifying about.
//!
//! Only identity and the numbers behind an alert live here; whether it has
//! already been shown is answered by the marker set.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::markers::{AlertCondition, FiredMarker};
use crate::models::{AlertLevel, AppState, Goal, Month, PersonalBudget};

/// Days before a goal deadline from which an unreached goal is flagged.
pub const GOAL_DEADLINE_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq)]
pub enum AlertSubject {
    Budget {
        name: String,
        usage_percent: Decimal,
    },
    Goal {
        name: String,
        days_left: i64,
        progress_percent: Decimal,
        required_per_day: Decimal,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub marker: FiredMarker,
    pub subject: AlertSubject,
}

fn budget_alert(budget: &PersonalBudget, period: Month) -> Option<Alert> {
    let condition = match budget.alert_level() {
        AlertLevel::Normal => return None,
        AlertLevel::Warning => AlertCondition::BudgetWarning,
        AlertLevel::Limit => AlertCondition::BudgetLimit,
    };
    Some(Alert {
        marker: FiredMarker::monthly(&budget.id, condition, period),
        subject: AlertSubject::Budget {
            name: budget.name.clone(),
            usage_percent: budget.usage_percent(),
        },
    })
}

fn goal_alert(goal: &Goal, period: Month, today: NaiveDate) -> Option<Alert> {
    if goal.is_reached() {
        return None;
    }
    let days_left = goal.days_left(today)?;
    if !(0..=GOAL_DEADLINE_WINDOW_DAYS).contains(&days_left) {
        return None;
    }
    Some(Alert {
        marker: FiredMarker::monthly(&goal.id, AlertCondition::GoalDeadline, period),
        subject: AlertSubject::Goal {
            name: goal.name.clone(),
            days_left,
            progress_percent: goal.progress_percent(),
            required_per_day: goal.required_per_day(today).unwrap_or(Decimal::ZERO),
        },
    })
}

/// Every alert condition currently met, keyed to `period`.
pub fn pending(state: &AppState, period: Month, today: NaiveDate) -> Vec<Alert> {
    let budgets = state
        .personal_budgets_a
        .iter()
        .chain(state.personal_budgets_b.iter())
        .filter_map(|b| budget_alert(b, period));
    let goals = state.goals.iter().filter_map(|g| goal_alert(g, period, today));
    budgets.chain(goals).collect()
}
