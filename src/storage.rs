// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, OptionalExtension, params};

use crate::error::Result;
use crate::markers::FiredMarker;

/// Durable key-value blobs plus the set of fired notification markers.
///
/// Errors from the underlying medium are returned as-is.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&self, key: &str, value: &str) -> Result<()>;
    fn has_marker(&self, marker: &FiredMarker) -> Result<bool>;
    fn insert_marker(&self, marker: &FiredMarker) -> Result<()>;
}

impl<T: Storage + ?Sized> Storage for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        (**self).put(key, value)
    }

    fn has_marker(&self, marker: &FiredMarker) -> Result<bool> {
        (**self).has_marker(marker)
    }

    fn insert_marker(&self, marker: &FiredMarker) -> Result<()> {
        (**self).insert_marker(marker)
    }
}

impl Storage for Connection {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let v: Option<String> = self
            .query_row("SELECT value FROM kv_store WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.execute(
            "INSERT INTO kv_store(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn has_marker(&self, marker: &FiredMarker) -> Result<bool> {
        let hit: Option<i32> = self
            .query_row(
                "SELECT 1 FROM fired_markers WHERE entity_id=?1 AND condition=?2 AND period=?3",
                params![marker.entity_id, marker.condition.tag(), marker.period],
                |r| r.get(0),
            )
            .optional()?;
        Ok(hit.is_some())
    }

    fn insert_marker(&self, marker: &FiredMarker) -> Result<()> {
        self.execute(
            "INSERT OR IGNORE INTO fired_markers(entity_id, condition, period) VALUES (?1, ?2, ?3)",
            params![marker.entity_id, marker.condition.tag(), marker.period],
        )?;
        Ok(())
    }
}
