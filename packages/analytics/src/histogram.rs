//! Per-city, per-year monthly sighting histogram.

use chrono::Datelike as _;
use ticksight_analytics_models::MonthlyHistogram;
use ticksight_sighting_models::SightingRecord;

/// Counts the sightings in `city` during `year` into 12 month buckets.
///
/// A record counts when its location equals `city` exactly, its date
/// parses and falls in `year`, and, if `species` is non-empty, its species
/// equals `species` exactly. Records without a location or a usable date
/// are skipped.
#[must_use]
pub fn monthly_histogram(
    records: &[SightingRecord],
    city: &str,
    year: i32,
    species: Option<&str>,
) -> MonthlyHistogram {
    let species = species.filter(|s| !s.is_empty());
    let mut histogram = MonthlyHistogram::new();

    for record in records {
        if record.city() != Some(city) {
            continue;
        }
        if let Some(wanted) = species
            && record.species.as_deref() != Some(wanted)
        {
            continue;
        }
        let Some(date) = record.parsed_date() else {
            continue;
        };
        if date.year() == year {
            histogram.increment(date.month());
        }
    }

    histogram
}
