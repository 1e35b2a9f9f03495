// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use duobudget::alerts::{AlertSubject, pending};
use duobudget::markers::AlertCondition;
use duobudget::models::{AlertLevel, AppState, Month};
use duobudget::seed;
use rust_decimal_macros::dec;

fn state() -> AppState {
    seed::baseline(Month::new(2024, 6).unwrap())
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

#[test]
fn quiet_when_nothing_is_close() {
    let s = state();
    assert!(pending(&s, s.current_month, day(1)).is_empty());
}

#[test]
fn budget_thresholds() {
    let mut s = state();
    s.personal_budgets_a[0].spent_amount = dec!(160);
    s.personal_budgets_b[1].spent_amount = dec!(230);
    assert_eq!(s.personal_budgets_a[0].alert_level(), AlertLevel::Warning);
    assert_eq!(s.personal_budgets_b[1].alert_level(), AlertLevel::Limit);

    let alerts = pending(&s, s.current_month, day(1));
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].marker.entity_id, "seed-budget-1");
    assert_eq!(alerts[0].marker.condition, AlertCondition::BudgetWarning);
    assert_eq!(alerts[0].marker.period, "2024-06");
    assert_eq!(alerts[1].marker.condition, AlertCondition::BudgetLimit);
    match &alerts[1].subject {
        AlertSubject::Budget { name, usage_percent } => {
            assert_eq!(name, "Restaurants");
            assert_eq!(*usage_percent, dec!(115));
        }
        other => panic!("unexpected subject {:?}", other),
    }
}

#[test]
fn goal_deadline_window() {
    let s = state();
    // seed "Summer holidays" is due 2024-06-30
    assert!(pending(&s, s.current_month, day(22)).is_empty());

    let alerts = pending(&s, s.current_month, day(23));
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].marker.condition, AlertCondition::GoalDeadline);
    match &alerts[0].subject {
        AlertSubject::Goal {
            days_left,
            progress_percent,
            required_per_day,
            ..
        } => {
            assert_eq!(*days_left, 7);
            assert_eq!(*progress_percent, dec!(40));
            assert_eq!(*required_per_day, dec!(257.14));
        }
        other => panic!("unexpected subject {:?}", other),
    }

    assert_eq!(pending(&s, s.current_month, day(30)).len(), 1);
    let after = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
    assert!(pending(&s, s.current_month, after).is_empty());
}

#[test]
fn reached_goal_is_not_flagged() {
    let mut s = state();
    s.goals[0].saved_amount = dec!(3000);
    assert!(pending(&s, s.current_month, day(29)).is_empty());
}

#[test]
fn condition_tags_round_trip() {
    for c in [
        AlertCondition::BudgetWarning,
        AlertCondition::BudgetLimit,
        AlertCondition::GoalDeadline,
    ] {
        assert_eq!(c.tag().parse::<AlertCondition>().unwrap(), c);
    }
    assert!("budget".parse::<AlertCondition>().is_err());
}
