// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use duobudget::commands::{AppStore, budgets, charges, dashboard, exporter, goals, history, settings};
use duobudget::models::Party;
use duobudget::store::Store;
use duobudget::utils::get_party_names;
use duobudget::{Error, cli, db};
use rust_decimal_macros::dec;
use tempfile::tempdir;

fn run<F>(store: &mut AppStore<'_>, args: &[&str], f: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut AppStore<'_>, &clap::ArgMatches) -> anyhow::Result<()>,
{
    let mut argv = vec!["duobudget"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let (_, sub) = matches.subcommand().expect("subcommand");
    f(store, sub)
}

#[test]
fn charge_add_and_edit() {
    let conn = db::open_in_memory().unwrap();
    let mut store = Store::open(&conn).unwrap();
    run(
        &mut store,
        &["charge", "add", "--name", "Gym", "--amount", "29.90", "--due", "2024-03-05", "--category", "entertainment"],
        charges::handle,
    )
    .unwrap();
    assert_eq!(store.charges().len(), 8);
    let id = store.charges().last().unwrap().id.clone();

    run(
        &mut store,
        &["charge", "edit", "--id", &id, "--paid", "2024-03-04"],
        charges::handle,
    )
    .unwrap();
    let gym = store.charge(&id).unwrap();
    assert!(gym.paid);
    assert_eq!(gym.amount, dec!(29.90));

    let rows = charges::rows(&store);
    assert_eq!(rows.len(), 8);
    assert_eq!(rows[0].name, "Rent");
}

#[test]
fn bad_category_is_rejected_before_saving() {
    let conn = db::open_in_memory().unwrap();
    let mut store = Store::open(&conn).unwrap();
    let res = run(
        &mut store,
        &["charge", "add", "--name", "Gym", "--amount", "30", "--due", "2024-03-05", "--category", "gym"],
        charges::handle,
    );
    assert!(res.is_err());
    assert_eq!(store.charges().len(), 7);
}

#[test]
fn budget_rows_use_party_names() {
    let conn = db::open_in_memory().unwrap();
    let mut store = Store::open(&conn).unwrap();
    run(&mut store, &["names", "set", "--a", "Alex", "--b", "Sam"], |s, m| {
        settings::names(s, m)
    })
    .unwrap();
    assert_eq!(
        get_party_names(&conn).unwrap(),
        ("Alex".to_string(), "Sam".to_string())
    );
    run(
        &mut store,
        &["budget", "add", "--owner", "b", "--name", "Books", "--amount", "60", "--spent", "50"],
        budgets::handle,
    )
    .unwrap();
    let rows = budgets::rows(&store, Some(Party::B)).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.owner == "Sam"));
    let books = rows.iter().find(|r| r.name == "Books").unwrap();
    assert_eq!(books.usage_percent, "83.33");
    assert_eq!(books.alert, "warning");
    assert_eq!(books.month, store.state().current_month.to_string());
}

#[test]
fn goal_withdrawal_beyond_savings_fails() {
    let conn = db::open_in_memory().unwrap();
    let mut store = Store::open(&conn).unwrap();
    let err = run(
        &mut store,
        &["goal", "save", "--id", "seed-goal-1", "--amount", "-5000"],
        goals::handle,
    )
    .unwrap_err();
    let domain = err.downcast_ref::<Error>().unwrap();
    assert_eq!(domain.field(), Some("delta"));
    assert_eq!(store.goal("seed-goal-1").unwrap().saved_amount, dec!(1200));

    run(
        &mut store,
        &["goal", "save", "--id", "seed-goal-1", "--amount", "-200"],
        goals::handle,
    )
    .unwrap();
    assert_eq!(store.goal("seed-goal-1").unwrap().saved_amount, dec!(1000));
}

#[test]
fn edit_can_clear_a_deadline() {
    let conn = db::open_in_memory().unwrap();
    let mut store = Store::open(&conn).unwrap();
    assert!(store.goal("seed-goal-1").unwrap().deadline.is_some());
    run(
        &mut store,
        &["goal", "edit", "--id", "seed-goal-1", "--no-deadline"],
        goals::handle,
    )
    .unwrap();
    let goal = store.goal("seed-goal-1").unwrap();
    assert_eq!(goal.deadline, None);
    assert_eq!(goal.name, "Summer holidays");

    run(
        &mut store,
        &["budget", "edit", "--id", "seed-budget-1", "--deadline", "2024-02-29"],
        budgets::handle,
    )
    .unwrap();
    assert!(store.personal_budget("seed-budget-1").unwrap().deadline.is_some());
    run(
        &mut store,
        &["budget", "edit", "--id", "seed-budget-1", "--no-deadline"],
        budgets::handle,
    )
    .unwrap();
    assert_eq!(store.personal_budget("seed-budget-1").unwrap().deadline, None);

    let reopened = Store::open(&conn).unwrap();
    assert_eq!(reopened.goal("seed-goal-1").unwrap().deadline, None);
}

#[test]
fn deadline_and_no_deadline_conflict() {
    let res = cli::build_cli().try_get_matches_from([
        "duobudget",
        "goal",
        "edit",
        "--id",
        "seed-goal-1",
        "--deadline",
        "2025-01-01",
        "--no-deadline",
    ]);
    assert!(res.is_err());
}

#[test]
fn reset_needs_confirmation() {
    let conn = db::open_in_memory().unwrap();
    let mut store = Store::open(&conn).unwrap();
    store.remove_charge("seed-charge-1").unwrap();
    assert!(run(&mut store, &["reset"], settings::reset).is_err());
    assert_eq!(store.charges().len(), 6);
    run(&mut store, &["reset", "--yes"], settings::reset).unwrap();
    assert_eq!(store.charges().len(), 7);
}

#[test]
fn salary_and_month_commands() {
    let conn = db::open_in_memory().unwrap();
    let mut store = Store::open(&conn).unwrap();
    run(&mut store, &["salary", "set", "--a", "2000", "--b", "2000"], settings::salary).unwrap();
    assert_eq!(store.current_split().percent_b, dec!(50));
    assert!(run(&mut store, &["salary", "set", "--a", "-1", "--b", "2000"], settings::salary).is_err());
    run(&mut store, &["month", "set", "2025-02"], settings::month).unwrap();
    assert_eq!(store.state().current_month.to_string(), "2025-02");
    assert!(run(&mut store, &["month", "set", "2025-13"], settings::month).is_err());
}

#[test]
fn export_history_as_semicolon_csv() {
    let conn = db::open_in_memory().unwrap();
    let mut store = Store::open(&conn).unwrap();
    store.record_snapshot().unwrap();
    let month = store.state().current_month.to_string();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("history.csv");
    let out_str = out_path.to_string_lossy().to_string();
    run(
        &mut store,
        &["history", "export", "--out", &out_str],
        |s, m| history::handle(s, m),
    )
    .unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines[0],
        "month;income;charges;allocation_a;allocation_b;remainder_a;remainder_b;total_remainder"
    );
    assert_eq!(
        lines[1],
        format!("{};4600.00;1708.00;1151.02;556.98;1948.98;943.02;2892.00", month)
    );
    assert_eq!(lines.len(), 2);
}

#[test]
fn export_history_as_json() {
    let conn = db::open_in_memory().unwrap();
    let mut store = Store::open(&conn).unwrap();
    store.record_snapshot().unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("history.json");
    let out_str = out_path.to_string_lossy().to_string();
    let matches = cli::build_cli().get_matches_from([
        "duobudget", "history", "export", "--format", "json", "--out", &out_str,
    ]);
    if let Some(("history", hist_m)) = matches.subcommand() {
        if let Some(("export", export_m)) = hist_m.subcommand() {
            exporter::handle(&store, export_m).unwrap();
        } else {
            panic!("no export subcommand");
        }
    } else {
        panic!("no history subcommand");
    }

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["charges"]["total"], "1708");
    assert_eq!(items[0]["allocation"]["allocatedA"], "1151.02");
}

#[test]
fn export_rejects_unknown_format() {
    let conn = db::open_in_memory().unwrap();
    let mut store = Store::open(&conn).unwrap();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("history.xml");
    let out_str = out_path.to_string_lossy().to_string();
    let res = run(
        &mut store,
        &["history", "export", "--format", "xml", "--out", &out_str],
        |s, m| history::handle(s, m),
    );
    assert!(res.is_err());
    assert!(!out_path.exists());
}

#[test]
fn dashboard_gathers_the_split_and_totals() {
    let conn = db::open_in_memory().unwrap();
    let store = Store::open(&conn).unwrap();
    let d = dashboard::build(&store).unwrap();
    assert_eq!(d.name_a, "Party A");
    assert_eq!(d.split.percent_a, dec!(67.39));
    assert_eq!(d.split.total_charges, dec!(1708));
    assert_eq!(d.paid_total, dec!(935));
    assert_eq!(d.unpaid_total, dec!(773));
    assert_eq!(d.by_category[0].category, "housing");
    assert_eq!(d.communal_savings, dec!(2500));
    assert_eq!(d.goals.count, 2);
    assert_eq!(d.goals.total_saved, dec!(4700));
    assert_eq!(d.goals.global_percent, dec!(26.11));
}
