// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use tracing::info;

use super::{AppStore, required};
use crate::history::latest_per_month;
use crate::snapshot::Snapshot;

const CSV_HEADER: [&str; 8] = [
    "month",
    "income",
    "charges",
    "allocation_a",
    "allocation_b",
    "remainder_a",
    "remainder_b",
    "total_remainder",
];

fn csv_record(s: &Snapshot) -> [String; 8] {
    [
        s.month.to_string(),
        format!("{:.2}", s.income.total),
        format!("{:.2}", s.charges.total),
        format!("{:.2}", s.allocation.allocated_a),
        format!("{:.2}", s.allocation.allocated_b),
        format!("{:.2}", s.remainders.a),
        format!("{:.2}", s.remainders.b),
        format!("{:.2}", s.total_remainder()),
    ]
}

/// Writes the latest snapshot of every month, newest first.
pub fn handle(store: &AppStore<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.to_lowercase();
    let out = required(sub, "out")?;
    let snapshots = latest_per_month(store.history());

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::WriterBuilder::new().delimiter(b';').from_path(out)?;
            wtr.write_record(CSV_HEADER)?;
            for s in &snapshots {
                wtr.write_record(csv_record(s))?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&snapshots)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    info!(count = snapshots.len(), format = %fmt, "history exported");
    println!("Exported {} snapshots to {}", snapshots.len(), out);
    Ok(())
}
