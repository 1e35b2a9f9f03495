// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use duobudget::db;
use duobudget::markers::{AlertCondition, FiredMarker};
use duobudget::models::{Month, NewCharge, NewGoal, Party, SCHEMA_VERSION};
use duobudget::storage::Storage;
use duobudget::store::{STATE_KEY, Store, load_state};
use rust_decimal_macros::dec;

#[test]
fn empty_database_starts_from_seed() {
    let conn = db::open_in_memory().unwrap();
    let store = Store::open(&conn).unwrap();
    assert_eq!(store.state().schema_version, SCHEMA_VERSION);
    assert_eq!(store.charges().len(), 7);
    assert_eq!(store.state().income_a, dec!(3100));
    assert_eq!(store.state().communal_savings, dec!(2500));
    assert_eq!(store.personal_budgets(Party::A).len(), 2);
    assert_eq!(store.goals().len(), 2);
}

#[test]
fn state_survives_reopen() {
    let conn = db::open_in_memory().unwrap();
    let (charge_id, goal_id) = {
        let mut store = Store::open(&conn).unwrap();
        let charge_id = store
            .add_charge(NewCharge::new(
                "Phone plan",
                dec!(19.99),
                NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
            ))
            .unwrap();
        let goal_id = store.add_goal(NewGoal::new("Sofa", dec!(900))).unwrap();
        store.adjust_goal_savings(&goal_id, dec!(120)).unwrap();
        store.record_snapshot().unwrap();
        (charge_id, goal_id)
    };

    let reopened = Store::open(&conn).unwrap();
    assert_eq!(reopened.charge(&charge_id).unwrap().amount, dec!(19.99));
    let goal = reopened.goal(&goal_id).unwrap();
    assert_eq!(goal.saved_amount, dec!(120));
    assert_eq!(goal.history.len(), 1);
    assert_eq!(reopened.snapshots().len(), 1);
    assert_eq!(reopened.snapshots()[0].charges.total, dec!(1727.99));
}

#[test]
fn populated_state_round_trips_through_json() {
    let conn = db::open_in_memory().unwrap();
    let mut store = Store::open(&conn).unwrap();
    store.record_snapshot().unwrap();
    store.adjust_goal_savings("seed-goal-2", dec!(-500)).unwrap();
    let json = serde_json::to_string(store.state()).unwrap();
    let back: duobudget::models::AppState = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, store.state());
}

#[test]
fn persisted_blob_is_versioned_json_with_string_amounts() {
    let conn = db::open_in_memory().unwrap();
    let mut store = Store::open(&conn).unwrap();
    store.set_salaries(dec!(2800.50), dec!(1900)).unwrap();

    let raw = conn.get(STATE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["schemaVersion"], serde_json::json!(SCHEMA_VERSION));
    assert_eq!(value["incomeA"], serde_json::json!("2800.50"));
    assert!(value["currentMonth"].is_string());
    assert_eq!(value["history"][0]["type"], serde_json::json!("expense"));
}

#[test]
fn version_mismatch_falls_back_to_seed() {
    let conn = db::open_in_memory().unwrap();
    {
        let mut store = Store::open(&conn).unwrap();
        store.set_salaries(dec!(1), dec!(1)).unwrap();
    }
    let raw = conn.get(STATE_KEY).unwrap().unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    value["schemaVersion"] = serde_json::json!(SCHEMA_VERSION + 1);
    conn.put(STATE_KEY, &value.to_string()).unwrap();

    let state = load_state(&conn).unwrap();
    assert_eq!(state.income_a, dec!(3100));
    assert_eq!(state.current_month, Month::current());
}

#[test]
fn corrupt_blob_falls_back_to_seed() {
    let conn = db::open_in_memory().unwrap();
    conn.put(STATE_KEY, "{not json").unwrap();
    assert_eq!(load_state(&conn).unwrap().charges.len(), 7);

    conn.put(STATE_KEY, r#"{"schemaVersion":1,"charges":"oops"}"#).unwrap();
    assert_eq!(load_state(&conn).unwrap().charges.len(), 7);
}

#[test]
fn markers_live_in_their_own_table() {
    let conn = db::open_in_memory().unwrap();
    let month = Month::new(2024, 5).unwrap();
    let m = FiredMarker::monthly("seed-budget-1", AlertCondition::BudgetWarning, month);
    assert!(!conn.has_marker(&m).unwrap());
    conn.insert_marker(&m).unwrap();
    conn.insert_marker(&m).unwrap();
    assert!(conn.has_marker(&m).unwrap());

    let limit = FiredMarker::monthly("seed-budget-1", AlertCondition::BudgetLimit, month);
    assert!(!conn.has_marker(&limit).unwrap());

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM fired_markers", [], |r| r.get(0))
        .unwrap();
    assert_eq!(rows, 1);

    // a reset of the state blob does not forget what was shown
    let mut store = Store::open(&conn).unwrap();
    store.reset_to_seed().unwrap();
    assert!(store.has_fired(&m).unwrap());
}
