// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command};

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of a table")
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true).help("Entity id")
}

fn no_deadline_flag() -> Arg {
    Arg::new("no-deadline")
        .long("no-deadline")
        .action(ArgAction::SetTrue)
        .conflicts_with("deadline")
        .help("Remove the deadline")
}

fn amount_arg(name: &'static str, required: bool) -> Arg {
    Arg::new(name)
        .long(name)
        .required(required)
        .allow_hyphen_values(true)
}

pub fn build_cli() -> Command {
    command!()
        .name("duobudget")
        .about("Proportional cost-sharing, personal budgets and savings goals for two")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Create the database and print its location"))
        .subcommand(
            Command::new("status")
                .about("Dashboard: incomes, split of the common charges, leftovers")
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("salary").about("Salaries").subcommand(
                Command::new("set")
                    .about("Set both salaries")
                    .arg(amount_arg("a", true).help("Salary of party A"))
                    .arg(amount_arg("b", true).help("Salary of party B")),
            ),
        )
        .subcommand(
            Command::new("month").about("Current month").subcommand(
                Command::new("set").arg(Arg::new("month").required(true).help("YYYY-MM")),
            ),
        )
        .subcommand(
            Command::new("savings").about("Communal savings").subcommand(
                Command::new("set").arg(amount_arg("amount", true)),
            ),
        )
        .subcommand(
            Command::new("names").about("Display names of the two parties").subcommand(
                Command::new("set")
                    .arg(Arg::new("a").long("a").required(true))
                    .arg(Arg::new("b").long("b").required(true)),
            ),
        )
        .subcommand(
            Command::new("reset")
                .about("Replace ALL data with the demo baseline")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Confirm the irreversible reset"),
                ),
        )
        .subcommand(
            Command::new("charge")
                .about("Shared monthly charges")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(amount_arg("amount", true))
                        .arg(Arg::new("due").long("due").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("category").long("category").default_value("other"))
                        .arg(
                            Arg::new("paid")
                                .long("paid")
                                .help("Payment date YYYY-MM-DD; marks the charge paid"),
                        ),
                )
                .subcommand(Command::new("list").arg(json_flag()))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(amount_arg("amount", false))
                        .arg(Arg::new("due").long("due"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("paid").long("paid").help("Payment date YYYY-MM-DD"))
                        .arg(
                            Arg::new("unpaid")
                                .long("unpaid")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("paid"),
                        ),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("budget")
                .about("Personal sub-budgets")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("owner").long("owner").required(true).help("a|b"))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(amount_arg("amount", true))
                        .arg(amount_arg("spent", false))
                        .arg(Arg::new("category").long("category").default_value("other"))
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to the current month"))
                        .arg(Arg::new("deadline").long("deadline").help("YYYY-MM-DD")),
                )
                .subcommand(
                    Command::new("list")
                        .arg(Arg::new("owner").long("owner").help("a|b"))
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(amount_arg("amount", false))
                        .arg(amount_arg("spent", false))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("deadline").long("deadline"))
                        .arg(no_deadline_flag()),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(amount_arg("target", true))
                        .arg(Arg::new("deadline").long("deadline"))
                        .arg(Arg::new("priority").long("priority").default_value("medium"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(Command::new("list").arg(json_flag()))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(amount_arg("target", false))
                        .arg(Arg::new("deadline").long("deadline"))
                        .arg(no_deadline_flag())
                        .arg(Arg::new("priority").long("priority"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("save")
                        .about("Add (positive) or withdraw (negative) savings")
                        .arg(id_arg())
                        .arg(amount_arg("amount", true)),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(Command::new("snapshot").about("Archive the current month's split"))
        .subcommand(
            Command::new("history")
                .about("Archived snapshots")
                .subcommand(Command::new("list").arg(json_flag()))
                .subcommand(Command::new("summary").arg(json_flag()))
                .subcommand(
                    Command::new("export")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("alerts")
                .about("Show budget and goal alerts not yet shown this month")
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Include alerts already shown"),
                ),
        )
}
