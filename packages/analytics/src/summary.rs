//! Per-species summaries for the education dashboard.

use std::collections::BTreeMap;

use chrono::Datelike as _;
use ticksight_analytics_models::{CityCount, MonthlyHistogram, SpeciesSummary, month_name};
use ticksight_sighting_models::{SightingRecord, TickSpecies, latin_name_for};
use ticksight_source::SightingsSource;

/// Number of cities reported per species.
pub const TOP_CITY_COUNT: usize = 2;

/// Summarises the sightings of one species.
///
/// Cities are ranked by descending count; among equal counts the city that
/// appears first in `records` wins. The peak month is the lowest month
/// attaining the highest count across all years. Records without a
/// location are left out of the city tally and records without a usable
/// date are left out of the month tally.
#[must_use]
pub fn summarize_species(species: &str, records: &[SightingRecord]) -> SpeciesSummary {
    let mut cities: Vec<CityCount> = Vec::new();
    let mut positions: BTreeMap<&str, usize> = BTreeMap::new();
    let mut months = MonthlyHistogram::new();

    for record in records {
        if let Some(city) = record.city() {
            if let Some(&idx) = positions.get(city) {
                cities[idx].count += 1;
            } else {
                positions.insert(city, cities.len());
                cities.push(CityCount {
                    city: city.to_string(),
                    count: 1,
                });
            }
        }

        if let Some(date) = record.parsed_date() {
            months.increment(date.month());
        }
    }

    // Stable sort keeps first-encountered order among ties.
    cities.sort_by(|a, b| b.count.cmp(&a.count));
    cities.truncate(TOP_CITY_COUNT);

    let peak_month = months.peak_month();

    SpeciesSummary {
        species: species.to_string(),
        latin_name: latin_name_for(species).map(str::to_string),
        top_cities: cities,
        peak_month,
        peak_month_name: peak_month.and_then(month_name).map(str::to_string),
        total_sightings: records.len(),
    }
}

/// Builds a summary for every known species, fetching each species'
/// records from `source` one after another.
pub async fn species_summaries(source: &dyn SightingsSource) -> Vec<SpeciesSummary> {
    let mut summaries = Vec::with_capacity(TickSpecies::all().len());

    for species in TickSpecies::all() {
        let name = species.common_name();
        let records = source.fetch_by_species(name).await;
        log::debug!("Summarising {} sightings of {name}", records.len());
        summaries.push(summarize_species(name, &records));
    }

    summaries
}
