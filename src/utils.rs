// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Once;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::models::{Month, Party};

static TRACING_INIT: Once = Once::new();

/// Installs the global `tracing` subscriber; `RUST_LOG` overrides the default.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("duobudget=warn"));
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    });
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s.trim()))
}

pub fn parse_month(s: &str) -> Result<Month> {
    s.parse::<Month>().map_err(|e| anyhow!(e))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s.trim()))
}

pub fn parse_party(s: &str) -> Result<Party> {
    s.parse::<Party>().map_err(|e| anyhow!(e))
}

/// Euro amount with two decimals, e.g. `1277.71 €`.
pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2} €", d.round_dp(2))
}

pub fn fmt_percent(d: &Decimal) -> String {
    format!("{:.2} %", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(json_flag: bool, v: &T) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    Ok(false)
}

// Display names, kept outside the versioned state blob.
fn name_key(party: Party) -> &'static str {
    match party {
        Party::A => "party_a_name",
        Party::B => "party_b_name",
    }
}

fn default_name(party: Party) -> &'static str {
    match party {
        Party::A => "Party A",
        Party::B => "Party B",
    }
}

pub fn get_party_name(conn: &Connection, party: Party) -> Result<String> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![name_key(party)],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.unwrap_or_else(|| default_name(party).to_string()))
}

pub fn get_party_names(conn: &Connection) -> Result<(String, String)> {
    Ok((
        get_party_name(conn, Party::A)?,
        get_party_name(conn, Party::B)?,
    ))
}

pub fn set_party_name(conn: &Connection, party: Party, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("Party name must not be empty"));
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![name_key(party), name],
    )?;
    Ok(())
}
