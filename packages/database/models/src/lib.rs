#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Row types for the local store of user-submitted sightings.
//!
//! These types represent the shapes of data as stored in and retrieved from
//! the `user_sightings` table. They are distinct from the shared
//! [`ticksight_sighting_models::SightingRecord`], which the store produces
//! through normalisation.

use serde::{Deserialize, Serialize};
use ticksight_sighting_models::{Severity, severity_for};

/// A validated sighting ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserSighting {
    /// Sighting date, `YYYY-MM-DD`.
    pub date: String,
    /// Sighting time, `HH:MM` or `HH:MM:SS`.
    pub time: String,
    /// Canonical city name.
    pub location: String,
    /// Species common name.
    pub species: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Web path of the uploaded photo.
    pub image_path: Option<String>,
}

impl NewUserSighting {
    /// Returns the species-derived severity stored alongside the row.
    #[must_use]
    pub fn severity(&self) -> Severity {
        severity_for(Some(&self.species))
    }
}

/// A user sighting row as retrieved from the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSightingRow {
    /// Primary key.
    pub id: i64,
    /// `sighting_date` column.
    pub sighting_date: Option<String>,
    /// `sighting_time` column.
    pub sighting_time: Option<String>,
    /// City name.
    pub location: Option<String>,
    /// Species common name.
    pub species: Option<String>,
    /// Severity label stored at insert time.
    pub severity: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Web path of the uploaded photo.
    pub image_path: Option<String>,
    /// Insert timestamp (RFC 3339).
    pub created_at: Option<String>,
}
