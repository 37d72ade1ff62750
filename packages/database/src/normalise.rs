//! Reshaping of stored rows into the shared sighting record layout.

use ticksight_database_models::UserSightingRow;
use ticksight_sighting_models::{SightingOrigin, SightingRecord, latin_name_for};

/// Combines the stored date and time columns into one timestamp string.
///
/// Gives `"{date}T{time}"` when both are present, the bare date when only
/// the date is, and `None` otherwise.
#[must_use]
pub fn combine_date_time(date: Option<&str>, time: Option<&str>) -> Option<String> {
    let date = date.filter(|d| !d.is_empty())?;
    match time.filter(|t| !t.is_empty()) {
        Some(time) => Some(format!("{date}T{time}")),
        None => Some(date.to_string()),
    }
}

/// Converts a stored row into a [`SightingRecord`] with
/// [`SightingOrigin::User`], attaching the Latin name when the species is
/// one of the known species.
#[must_use]
pub fn normalise_row(row: UserSightingRow) -> SightingRecord {
    let date = combine_date_time(row.sighting_date.as_deref(), row.sighting_time.as_deref());
    let latin_name = row
        .species
        .as_deref()
        .and_then(latin_name_for)
        .map(str::to_string);

    SightingRecord {
        date,
        location: row.location,
        species: row.species,
        latin_name,
        image_path: row.image_path,
        source: SightingOrigin::User,
    }
}
