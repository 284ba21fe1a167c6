//! SQLite-backed snapshot store.
//!
//! The whole plan is one JSON document kept under a single key of a `kv`
//! table, replaced in one statement after every mutation. A missing or
//! unreadable snapshot loads as an empty plan.

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::data_dir;
use crate::error::{Result, StoreError};
use crate::plan::Plan;

const SNAPSHOT_KEY: &str = "snapshot";

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the store at `<data dir>/capplan.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("capplan.db");
        Self::open_at(&path)
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Load the saved plan, or an empty one if nothing usable is stored.
    ///
    /// # Errors
    /// Only fails if the database itself cannot be queried.
    pub fn load(&self) -> Result<Plan> {
        let Some(raw) = self.kv_get(SNAPSHOT_KEY)? else {
            return Ok(Plan::default());
        };
        match serde_json::from_str::<Plan>(&raw) {
            Ok(plan) => Ok(plan),
            Err(e) => {
                tracing::warn!(error = %e, "snapshot unreadable, starting from an empty plan");
                Ok(Plan::default())
            }
        }
    }

    /// Load and bring every automatic status up to date for `today`.
    pub fn load_refreshed(&self, today: NaiveDate) -> Result<Plan> {
        let mut plan = self.load()?;
        let changed = plan.refresh_statuses(today);
        if changed > 0 {
            tracing::debug!(changed, %today, "statuses refreshed on load");
        }
        Ok(plan)
    }

    /// Stamp and write the whole plan.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, plan: &mut Plan) -> Result<()> {
        plan.last_updated = Some(Utc::now());
        let json = serde_json::to_string(plan)?;
        self.kv_set(SNAPSHOT_KEY, &json)?;
        tracing::debug!(
            resources = plan.resources.len(),
            work_items = plan.work_items.len(),
            "snapshot saved"
        );
        Ok(())
    }
}
