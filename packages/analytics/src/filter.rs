//! Species, date-range and severity filters used by the map page.

use chrono::{DateTime, Utc};
use ticksight_analytics_models::DateRange;
use ticksight_sighting_models::{Severity, SightingRecord};

/// The filters a map request can carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapFilter {
    /// Species common name; empty means all species.
    pub species: String,
    /// Relative date window; `None` means all time.
    pub date_range: Option<DateRange>,
    /// Severity class; `None` means all severities.
    pub severity: Option<Severity>,
}

impl MapFilter {
    /// Builds a filter from raw query-string values. Unknown date-range
    /// tokens and severities are treated as "no filtering".
    #[must_use]
    pub fn from_params(species: &str, date_range: &str, severity: &str) -> Self {
        Self {
            species: species.trim().to_string(),
            date_range: DateRange::from_token(date_range),
            severity: severity.trim().parse().ok(),
        }
    }

    /// Applies the species filter, then the date-range filter, then the
    /// severity filter.
    #[must_use]
    pub fn apply(&self, records: Vec<SightingRecord>, now: DateTime<Utc>) -> Vec<SightingRecord> {
        let records = filter_by_species(records, &self.species);
        let records = filter_by_date_range(records, self.date_range, now);
        filter_by_severity(records, self.severity)
    }
}

/// Concatenates remote records and normalised user records, remote first.
#[must_use]
pub fn merge_sightings(
    mut remote: Vec<SightingRecord>,
    user: Vec<SightingRecord>,
) -> Vec<SightingRecord> {
    remote.extend(user);
    remote
}

/// Keeps records whose species matches `species`, ignoring case and
/// surrounding whitespace. An empty filter returns `records` unchanged.
#[must_use]
pub fn filter_by_species(records: Vec<SightingRecord>, species: &str) -> Vec<SightingRecord> {
    let wanted = species.trim().to_lowercase();
    if wanted.is_empty() {
        return records;
    }

    records
        .into_iter()
        .filter(|r| {
            r.species
                .as_deref()
                .is_some_and(|s| s.trim().to_lowercase() == wanted)
        })
        .collect()
}

/// Keeps records dated inside `range`'s window relative to `now`, bounds
/// inclusive. With no range, returns `records` unchanged; with a range,
/// records with a missing or unparsable date are dropped.
#[must_use]
pub fn filter_by_date_range(
    records: Vec<SightingRecord>,
    range: Option<DateRange>,
    now: DateTime<Utc>,
) -> Vec<SightingRecord> {
    let Some(range) = range else {
        return records;
    };
    let window = range.window(now);

    records
        .into_iter()
        .filter(|r| r.parsed_date().is_some_and(|dt| window.contains(dt)))
        .collect()
}

/// Keeps records whose species-derived severity equals `severity`. With no
/// severity, returns `records` unchanged.
#[must_use]
pub fn filter_by_severity(
    records: Vec<SightingRecord>,
    severity: Option<Severity>,
) -> Vec<SightingRecord> {
    let Some(severity) = severity else {
        return records;
    };

    records
        .into_iter()
        .filter(|r| r.severity() == severity)
        .collect()
}
