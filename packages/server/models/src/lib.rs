#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Request and response types for the `TickSight` server.
//!
//! Query-string extractors for each page, the JSON shapes served under
//! `/api`, and the report-form state that the HTML views render.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use ticksight_analytics_models::{FilterOptions, MonthlyHistogram, SpeciesSummary, month_name};
use ticksight_sighting_models::{Severity, TickSpecies, UkCity};

/// The pages served from `/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Page {
    #[default]
    Map,
    Report,
    Education,
    Prevention,
}

impl Page {
    /// Returns the navigation label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Map => "Map",
            Self::Report => "Report a sighting",
            Self::Education => "Education",
            Self::Prevention => "Prevention",
        }
    }

    /// Returns all pages in navigation order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Map, Self::Report, Self::Education, Self::Prevention]
    }
}

/// The `page` query parameter of the dispatcher.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// Resolves the requested page. Missing or unknown values select the map.
    #[must_use]
    pub fn resolve(&self) -> Page {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or_default()
    }
}

/// Filters accepted by the map page and `GET /api/sightings`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapQueryParams {
    /// Species common name.
    pub species: Option<String>,
    /// Date-range token such as `30_days`.
    pub date_range: Option<String>,
    /// Severity name (`low`, `medium`, `high`).
    pub severity: Option<String>,
}

/// Selections accepted by the education page and `GET /api/education`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EducationQueryParams {
    pub city: Option<String>,
    pub year: Option<String>,
    pub species: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// A known tick species as returned by `GET /api/species`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSpecies {
    pub common_name: String,
    pub latin_name: String,
    pub severity: Severity,
    /// Marker colour for the severity.
    pub color: String,
}

impl From<TickSpecies> for ApiSpecies {
    fn from(species: TickSpecies) -> Self {
        let severity = species.severity();
        Self {
            common_name: species.common_name().to_string(),
            latin_name: species.latin_name().to_string(),
            severity,
            color: severity.color().to_string(),
        }
    }
}

/// A supported city as returned by `GET /api/cities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCity {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<UkCity> for ApiCity {
    fn from(city: UkCity) -> Self {
        let (latitude, longitude) = city.coordinates();
        Self {
            name: city.to_string(),
            latitude,
            longitude,
        }
    }
}

/// One histogram bucket with its month name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMonthCount {
    /// Month number, 1-12.
    pub month: u32,
    /// English month name.
    pub name: String,
    pub count: u32,
}

impl ApiMonthCount {
    /// Expands a histogram into 12 named buckets, January first.
    #[must_use]
    pub fn from_histogram(histogram: &MonthlyHistogram) -> Vec<Self> {
        histogram
            .iter()
            .map(|(month, count)| Self {
                month,
                name: month_name(month).unwrap_or_default().to_string(),
                count,
            })
            .collect()
    }
}

/// Everything the education page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationData {
    /// Select-box options derived from the full dataset.
    pub options: FilterOptions,
    /// City the histogram is computed for.
    pub selected_city: Option<String>,
    /// Year the histogram is computed for.
    pub selected_year: Option<i32>,
    /// Species filter for the histogram; empty means all species.
    pub selected_species: String,
    /// Sightings per month in the selected city and year.
    pub monthly_counts: Vec<ApiMonthCount>,
    /// Per-species cards, one per known species.
    pub species_summaries: Vec<SpeciesSummary>,
}

/// A report-form field that can carry a validation message.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportField {
    Date,
    Time,
    Location,
    Species,
    Description,
    Image,
    /// Not tied to one input; shown as a banner.
    General,
}

/// The text fields of a report submission, trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFields {
    pub date: String,
    pub time: String,
    pub location: String,
    pub species: String,
    pub description: String,
}

impl ReportFields {
    /// Stores `value`, trimmed, under the form field called `name`.
    /// Unknown names are ignored.
    pub fn set(&mut self, name: &str, value: &str) {
        let value = value.trim().to_string();
        match name {
            "date" => self.date = value,
            "time" => self.time = value,
            "location" => self.location = value,
            "species" => self.species = value,
            "description" => self.description = value,
            _ => {}
        }
    }
}

/// Validation messages keyed by field.
pub type ReportErrors = BTreeMap<ReportField, String>;

/// What the report page renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFormState {
    pub errors: ReportErrors,
    /// Submitted values to refill the form with.
    pub old: ReportFields,
    /// Whether the last submission was stored.
    pub success: bool,
}

impl ReportFormState {
    /// A successful submission: empty form and a success banner.
    #[must_use]
    pub fn submitted() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    /// A rejected submission: messages plus the values to refill.
    #[must_use]
    pub const fn rejected(errors: ReportErrors, old: ReportFields) -> Self {
        Self {
            errors,
            old,
            success: false,
        }
    }

    /// Returns the message for `field`, if any.
    #[must_use]
    pub fn error(&self, field: ReportField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}
