use std::collections::BTreeSet;

use chrono::Datelike as _;
use ticksight_analytics_models::FilterOptions;
use ticksight_sighting_models::SightingRecord;

/// Collects the distinct cities, years and species present in `records`.
///
/// Cities and species are sorted alphabetically, years ascending. Records
/// contribute only the fields they actually carry.
#[must_use]
pub fn filter_options(records: &[SightingRecord]) -> FilterOptions {
    let mut cities = BTreeSet::new();
    let mut years = BTreeSet::new();
    let mut species = BTreeSet::new();

    for record in records {
        if let Some(city) = record.city() {
            cities.insert(city.to_string());
        }
        if let Some(name) = record.species_name() {
            species.insert(name.to_string());
        }
        if let Some(date) = record.parsed_date() {
            years.insert(date.year());
        }
    }

    FilterOptions {
        cities: cities.into_iter().collect(),
        years: years.into_iter().collect(),
        species: species.into_iter().collect(),
    }
}
