// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod alerts;
pub mod budgets;
pub mod charges;
pub mod dashboard;
pub mod exporter;
pub mod goals;
pub mod history;
pub mod settings;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::store::Store;
use crate::utils::parse_date;

/// The state container as the command layer uses it.
pub type AppStore<'c> = Store<&'c Connection>;

/// A trimmed argument that clap already guarantees to be present.
pub(crate) fn required<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.trim())
        .with_context(|| format!("Missing argument --{}", name))
}

/// A trimmed optional argument; blank values count as absent.
pub(crate) fn optional<'a>(m: &'a clap::ArgMatches, name: &str) -> Option<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

/// Deadline change for an `edit`: `--no-deadline` clears it, `--deadline`
/// replaces it, neither keeps it.
pub(crate) fn deadline_patch(m: &clap::ArgMatches) -> Result<Option<Option<NaiveDate>>> {
    if m.get_flag("no-deadline") {
        return Ok(Some(None));
    }
    Ok(optional(m, "deadline").map(parse_date).transpose()?.map(Some))
}
