// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use super::{AppStore, required};
use crate::models::Party;
use crate::utils::{fmt_money, parse_decimal, parse_month, set_party_name};

pub fn salary(store: &mut AppStore<'_>, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("set", sub)) = m.subcommand() {
        let a = parse_decimal(required(sub, "a")?)?;
        let b = parse_decimal(required(sub, "b")?)?;
        store.set_salaries(a, b)?;
        println!("Salaries set to {} and {}", fmt_money(&a), fmt_money(&b));
    }
    Ok(())
}

pub fn month(store: &mut AppStore<'_>, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("set", sub)) = m.subcommand() {
        let month = parse_month(required(sub, "month")?)?;
        store.set_current_month(month)?;
        println!("Current month is now {}", month);
    }
    Ok(())
}

pub fn savings(store: &mut AppStore<'_>, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("set", sub)) = m.subcommand() {
        let amount = parse_decimal(required(sub, "amount")?)?;
        store.set_communal_savings(amount)?;
        println!("Communal savings set to {}", fmt_money(&amount));
    }
    Ok(())
}

pub fn names(store: &AppStore<'_>, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("set", sub)) = m.subcommand() {
        let a = required(sub, "a")?;
        let b = required(sub, "b")?;
        set_party_name(store.storage(), Party::A, a)?;
        set_party_name(store.storage(), Party::B, b)?;
        println!("Parties are now '{}' and '{}'", a, b);
    }
    Ok(())
}

pub fn reset(store: &mut AppStore<'_>, m: &clap::ArgMatches) -> Result<()> {
    if !m.get_flag("yes") {
        bail!("Reset replaces all data with the demo baseline; pass --yes to confirm");
    }
    store.reset_to_seed()?;
    println!("All data reset to the demo baseline");
    Ok(())
}
