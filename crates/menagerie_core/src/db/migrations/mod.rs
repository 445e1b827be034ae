//! Schema steps for the animal store.
//!
//! The store's version lives in `PRAGMA user_version`. Each step is applied
//! inside the same transaction that bumps the version, so a crash mid-upgrade
//! leaves the previous schema untouched.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "animals",
    sql: include_str!("0001_animals.sql"),
}];

/// Schema version range covered by one [`apply_migrations`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaUpgrade {
    pub from: u32,
    pub to: u32,
}

impl SchemaUpgrade {
    /// `true` when the store was already current.
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Highest schema version this build can produce.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Version recorded in the store.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Brings the store up to [`latest_version`].
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the store was written by a newer build;
///   nothing is touched in that case.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<SchemaUpgrade> {
    let from = schema_version(conn)?;
    let to = latest_version();
    if from > to {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: to,
        });
    }

    let pending = SCHEMA_STEPS.iter().filter(|step| step.version > from);
    let tx = conn.transaction()?;
    for step in pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=db_migrate module=db status=ok version={} step={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    Ok(SchemaUpgrade { from, to })
}
