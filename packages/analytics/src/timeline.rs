//! Per-city "recent sightings" lists shown in map popups.

use std::collections::BTreeMap;

use ticksight_sighting_models::SightingRecord;

/// Number of sightings listed per city.
pub const DEFAULT_TIMELINE_LEN: usize = 10;

/// Returns up to `limit` dated sightings in `city`, newest first.
///
/// Records whose date does not parse are left out. Equal timestamps keep
/// their input order.
#[must_use]
pub fn city_timeline(records: &[SightingRecord], city: &str, limit: usize) -> Vec<SightingRecord> {
    let mut dated: Vec<_> = records
        .iter()
        .filter(|r| r.city() == Some(city))
        .filter_map(|r| r.parsed_date().map(|dt| (dt, r)))
        .collect();

    dated.sort_by(|a, b| b.0.cmp(&a.0));

    dated
        .into_iter()
        .take(limit)
        .map(|(_, r)| r.clone())
        .collect()
}

/// Builds [`city_timeline`] for every city present in `records`.
#[must_use]
pub fn city_timelines(
    records: &[SightingRecord],
    limit: usize,
) -> BTreeMap<String, Vec<SightingRecord>> {
    let mut timelines = BTreeMap::new();

    for record in records {
        let Some(city) = record.city() else {
            continue;
        };
        if timelines.contains_key(city) {
            continue;
        }
        let timeline = city_timeline(records, city, limit);
        if !timeline.is_empty() {
            timelines.insert(city.to_string(), timeline);
        }
    }

    timelines
}
