#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation result types and date-range tokens.
//!
//! Defines the outputs of the sighting aggregation layer (per-species
//! summaries, monthly histograms, filter option lists) and the named
//! relative date ranges the map page offers.

use chrono::{DateTime, Months, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A named date range relative to the current time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum DateRange {
    /// The last 7 days.
    #[serde(rename = "7_days")]
    #[strum(serialize = "7_days")]
    Last7Days,
    /// The last 30 days.
    #[serde(rename = "30_days")]
    #[strum(serialize = "30_days")]
    Last30Days,
    /// The last 90 days.
    #[serde(rename = "90_days")]
    #[strum(serialize = "90_days")]
    Last90Days,
    /// The last 6 months.
    #[serde(rename = "6_months")]
    #[strum(serialize = "6_months")]
    Last6Months,
    /// Between 12 and 6 months ago.
    #[serde(rename = "6_12_months")]
    #[strum(serialize = "6_12_months")]
    SixToTwelveMonths,
    /// Between 5 years and 12 months ago.
    #[serde(rename = "12m_5y")]
    #[strum(serialize = "12m_5y")]
    OneToFiveYears,
    /// Between 15 and 5 years ago.
    #[serde(rename = "5_15y")]
    #[strum(serialize = "5_15y")]
    FiveToFifteenYears,
}

impl DateRange {
    /// Parses a query-string token. Empty or unrecognised tokens mean "no
    /// date filtering" and yield `None`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        token.trim().parse().ok()
    }

    /// Returns the query-string token, e.g. `"6_12_months"`.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Last7Days => "7_days",
            Self::Last30Days => "30_days",
            Self::Last90Days => "90_days",
            Self::Last6Months => "6_months",
            Self::SixToTwelveMonths => "6_12_months",
            Self::OneToFiveYears => "12m_5y",
            Self::FiveToFifteenYears => "5_15y",
        }
    }

    /// Returns a human-readable label for select boxes.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Last7Days => "Last 7 days",
            Self::Last30Days => "Last 30 days",
            Self::Last90Days => "Last 90 days",
            Self::Last6Months => "Last 6 months",
            Self::SixToTwelveMonths => "6 to 12 months ago",
            Self::OneToFiveYears => "1 to 5 years ago",
            Self::FiveToFifteenYears => "5 to 15 years ago",
        }
    }

    /// Computes the inclusive window this range covers relative to `now`.
    ///
    /// Month arithmetic clamps to the last day of the target month.
    #[must_use]
    pub fn window(self, now: DateTime<Utc>) -> DateWindow {
        let months_ago = |n: u32| {
            now.checked_sub_months(Months::new(n))
                .unwrap_or(DateTime::<Utc>::MIN_UTC)
        };
        let days_ago = |n: i64| {
            now.checked_sub_signed(TimeDelta::days(n))
                .unwrap_or(DateTime::<Utc>::MIN_UTC)
        };

        let (start, end) = match self {
            Self::Last7Days => (days_ago(7), now),
            Self::Last30Days => (days_ago(30), now),
            Self::Last90Days => (days_ago(90), now),
            Self::Last6Months => (months_ago(6), now),
            Self::SixToTwelveMonths => (months_ago(12), months_ago(6)),
            Self::OneToFiveYears => (months_ago(60), months_ago(12)),
            Self::FiveToFifteenYears => (months_ago(180), months_ago(60)),
        };

        DateWindow { start, end }
    }

    /// Returns all variants, most recent window first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Last7Days,
            Self::Last30Days,
            Self::Last90Days,
            Self::Last6Months,
            Self::SixToTwelveMonths,
            Self::OneToFiveYears,
            Self::FiveToFifteenYears,
        ]
    }
}

/// An inclusive `[start, end]` time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// Earliest instant included.
    pub start: DateTime<Utc>,
    /// Latest instant included.
    pub end: DateTime<Utc>,
}

impl DateWindow {
    /// Returns `true` if `instant` lies within the window, bounds included.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Sighting count for one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityCount {
    /// City name.
    pub city: String,
    /// Number of sightings.
    pub count: u32,
}

/// Education-dashboard summary for one species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesSummary {
    /// Species common name.
    pub species: String,
    /// Species Latin name, if known.
    pub latin_name: Option<String>,
    /// Up to two cities with the most sightings, highest first.
    pub top_cities: Vec<CityCount>,
    /// Month (1-12) with the most sightings across all years, or `None`
    /// when no sighting has a usable date.
    pub peak_month: Option<u32>,
    /// English name of [`Self::peak_month`].
    pub peak_month_name: Option<String>,
    /// Number of records the summary was computed from.
    pub total_sightings: usize,
}

/// Sighting counts per calendar month, indexed 1-12.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyHistogram {
    counts: [u32; 12],
}

impl MonthlyHistogram {
    /// Creates an all-zero histogram.
    #[must_use]
    pub const fn new() -> Self {
        Self { counts: [0; 12] }
    }

    /// Adds one sighting to `month`. Months outside 1-12 are ignored.
    pub fn increment(&mut self, month: u32) {
        if let Some(slot) = month
            .checked_sub(1)
            .and_then(|i| self.counts.get_mut(i as usize))
        {
            *slot += 1;
        }
    }

    /// Returns the count for `month` (1-12), or 0 for any other value.
    #[must_use]
    pub fn get(&self, month: u32) -> u32 {
        month
            .checked_sub(1)
            .and_then(|i| self.counts.get(i as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the sum of all buckets.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Returns the largest bucket value.
    #[must_use]
    pub fn max(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Returns the lowest month attaining the maximum count, or `None` if
    /// every bucket is zero.
    #[must_use]
    pub fn peak_month(&self) -> Option<u32> {
        let max = self.max();
        if max == 0 {
            return None;
        }
        self.iter().find(|&(_, count)| count == max).map(|(m, _)| m)
    }

    /// Iterates `(month, count)` pairs from January to December.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (1u32..).zip(self.counts.iter().copied())
    }

    /// Returns the raw bucket array, January first.
    #[must_use]
    pub const fn counts(&self) -> &[u32; 12] {
        &self.counts
    }
}

/// Returns the English name of a month number (1-12).
#[must_use]
pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map(|m| m.name())
}

/// Select-box options derived from the full remote dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Distinct city names, alphabetical.
    pub cities: Vec<String>,
    /// Distinct sighting years, ascending.
    pub years: Vec<i32>,
    /// Distinct species names, alphabetical.
    pub species: Vec<String>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 31, 12, 0, 0).unwrap()
    }

    #[test]
    fn tokens_round_trip_through_strings() {
        for range in DateRange::all() {
            assert_eq!(DateRange::from_token(range.token()), Some(*range));
            assert_eq!(range.to_string(), range.token());
        }
        assert_eq!(DateRange::from_token(""), None);
        assert_eq!(DateRange::from_token("last_week"), None);
    }

    #[test]
    fn day_windows_end_now() {
        let window = DateRange::Last7Days.window(now());
        assert_eq!(window.end, now());
        assert_eq!(window.start, Utc.with_ymd_and_hms(2025, 8, 24, 12, 0, 0).unwrap());
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(window.end + TimeDelta::seconds(1)));
    }

    #[test]
    fn month_windows_clamp_to_month_end() {
        let window = DateRange::SixToTwelveMonths.window(now());
        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 8, 31, 12, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2025, 2, 28, 12, 0, 0).unwrap());
    }

    #[test]
    fn year_windows() {
        let window = DateRange::FiveToFifteenYears.window(now());
        assert_eq!(window.start, Utc.with_ymd_and_hms(2010, 8, 31, 12, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2020, 8, 31, 12, 0, 0).unwrap());
    }

    #[test]
    fn histogram_ignores_out_of_range_months() {
        let mut histogram = MonthlyHistogram::new();
        histogram.increment(0);
        histogram.increment(13);
        histogram.increment(12);
        assert_eq!(histogram.total(), 1);
        assert_eq!(histogram.get(12), 1);
        assert_eq!(histogram.get(0), 0);
        assert_eq!(histogram.iter().count(), 12);
    }

    #[test]
    fn peak_month_prefers_lowest_month() {
        let mut histogram = MonthlyHistogram::new();
        assert_eq!(histogram.peak_month(), None);
        histogram.increment(9);
        histogram.increment(4);
        assert_eq!(histogram.peak_month(), Some(4));
        histogram.increment(9);
        assert_eq!(histogram.peak_month(), Some(9));
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn histogram_serializes_as_array() {
        let mut histogram = MonthlyHistogram::new();
        histogram.increment(3);
        let value = serde_json::to_value(histogram).unwrap();
        assert_eq!(value["counts"][2], 1);
        assert_eq!(value["counts"].as_array().unwrap().len(), 12);
    }
}
