#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Local `SQLite` store for user-submitted tick sightings.
//!
//! One append-only table, `user_sightings`. Rows are inserted by the report
//! form and read back either raw ([`queries::list_sightings`]) or reshaped
//! into the same [`SightingRecord`](ticksight_sighting_models::SightingRecord)
//! layout the remote API uses ([`queries::list_sightings_normalised`]).
//!
//! Uses `switchy_database` for all database operations.

pub mod normalise;
pub mod queries;

use std::path::Path;

use switchy_database::Database;
use switchy_database_connection::init_sqlite_rusqlite;

pub use queries::{create_sighting, list_sightings, list_sightings_normalised};

/// Default path for the sightings database.
pub const DEFAULT_DB_PATH: &str = "data/sightings.db";

/// Errors that can occur during database operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Database query error.
    #[error("Database error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// The database file could not be opened.
    #[error("Connection error: {0}")]
    Connection(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data conversion error.
    #[error("Data conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

/// Opens (or creates) the sightings `SQLite` database and ensures the
/// schema exists.
///
/// # Errors
///
/// Returns [`DbError`] if the parent directory cannot be created, the
/// database cannot be opened, or schema creation fails.
pub async fn open_db(path: &Path) -> Result<Box<dyn Database>, DbError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let db = init_sqlite_rusqlite(Some(path)).map_err(|e| DbError::Connection(e.to_string()))?;

    ensure_schema(db.as_ref()).await?;
    log::info!("Opened sightings database at {}", path.display());

    Ok(db)
}

/// Creates the `user_sightings` table and its index if they don't already
/// exist.
///
/// # Errors
///
/// Returns [`DbError`] if either statement fails.
pub async fn ensure_schema(db: &dyn Database) -> Result<(), DbError> {
    db.exec_raw(
        "CREATE TABLE IF NOT EXISTS user_sightings (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            sighting_date  TEXT NOT NULL,
            sighting_time  TEXT NOT NULL,
            location       TEXT NOT NULL,
            species        TEXT NOT NULL,
            severity       TEXT NOT NULL,
            description    TEXT,
            image_path     TEXT,
            created_at     TEXT NOT NULL
        )",
    )
    .await?;

    db.exec_raw(
        "CREATE INDEX IF NOT EXISTS idx_user_sightings_when
         ON user_sightings (sighting_date, sighting_time)",
    )
    .await?;

    Ok(())
}
