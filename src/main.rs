// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use duobudget::store::Store;
use duobudget::{cli, commands, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let mut store = Store::open(&conn)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("status", sub)) => commands::dashboard::handle(&store, sub)?,
        Some(("salary", sub)) => commands::settings::salary(&mut store, sub)?,
        Some(("month", sub)) => commands::settings::month(&mut store, sub)?,
        Some(("savings", sub)) => commands::settings::savings(&mut store, sub)?,
        Some(("names", sub)) => commands::settings::names(&store, sub)?,
        Some(("reset", sub)) => commands::settings::reset(&mut store, sub)?,
        Some(("charge", sub)) => commands::charges::handle(&mut store, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut store, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut store, sub)?,
        Some(("snapshot", _)) => commands::history::record(&mut store)?,
        Some(("history", sub)) => commands::history::handle(&store, sub)?,
        Some(("alerts", sub)) => commands::alerts::handle(&store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
