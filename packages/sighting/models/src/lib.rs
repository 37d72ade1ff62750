#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Tick sighting record, species taxonomy, and severity definitions.
//!
//! This crate defines the one entity the whole application works with
//! ([`SightingRecord`]) together with the static lookup data that every
//! other layer shares: the known tick species with their Latin names and
//! severity, and the allow-list of UK cities with map coordinates.

pub mod date;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use date::parse_sighting_date;

/// Severity classification used for map marker colouring.
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
pub enum Severity {
    /// Rarely associated with people or pets
    Low,
    /// Occasional bites, moderate disease risk
    Medium,
    /// Frequently bites people and pets
    High,
}

impl Severity {
    /// Returns the marker fill colour for this severity.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "#2ecc71",
            Self::Medium => "#f1c40f",
            Self::High => "#e74c3c",
        }
    }

    /// Returns a capitalised label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Returns all variants of this enum, lowest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High]
    }
}

/// The tick species the application knows about.
///
/// Lookups by common name are exact and case-sensitive, matching the
/// spelling used by the remote sightings API.
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
pub enum TickSpecies {
    /// *Ixodes arboricola*
    #[serde(rename = "Passerine tick")]
    #[strum(serialize = "Passerine tick")]
    Passerine,
    /// *Ixodes canisuga*
    #[serde(rename = "Fox/badger tick")]
    #[strum(serialize = "Fox/badger tick")]
    FoxBadger,
    /// *Ixodes acuminatus*
    #[serde(rename = "Southern rodent tick")]
    #[strum(serialize = "Southern rodent tick")]
    SouthernRodent,
    /// *Ixodes apronophorus*
    #[serde(rename = "Marsh tick")]
    #[strum(serialize = "Marsh tick")]
    Marsh,
    /// *Dermacentor frontalis*
    #[serde(rename = "Tree-hole tick")]
    #[strum(serialize = "Tree-hole tick")]
    TreeHole,
}

impl TickSpecies {
    /// Looks up a species by its exact common name.
    #[must_use]
    pub fn from_common_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// Returns the common name, e.g. `"Marsh tick"`.
    #[must_use]
    pub fn common_name(self) -> &'static str {
        match self {
            Self::Passerine => "Passerine tick",
            Self::FoxBadger => "Fox/badger tick",
            Self::SouthernRodent => "Southern rodent tick",
            Self::Marsh => "Marsh tick",
            Self::TreeHole => "Tree-hole tick",
        }
    }

    /// Returns the Latin (binomial) name.
    #[must_use]
    pub const fn latin_name(self) -> &'static str {
        match self {
            Self::Passerine => "Ixodes arboricola",
            Self::FoxBadger => "Ixodes canisuga",
            Self::SouthernRodent => "Ixodes acuminatus",
            Self::Marsh => "Ixodes apronophorus",
            Self::TreeHole => "Dermacentor frontalis",
        }
    }

    /// Returns the severity for this species.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::Passerine | Self::FoxBadger => Severity::High,
            Self::SouthernRodent | Self::Marsh => Severity::Medium,
            Self::TreeHole => Severity::Low,
        }
    }

    /// Returns all variants in the order the education dashboard lists them.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Passerine,
            Self::FoxBadger,
            Self::SouthernRodent,
            Self::Marsh,
            Self::TreeHole,
        ]
    }
}

/// Returns the Latin name for a common species name, if it is a known
/// species.
#[must_use]
pub fn latin_name_for(species: &str) -> Option<&'static str> {
    TickSpecies::from_common_name(species).map(TickSpecies::latin_name)
}

/// Returns the severity for a species name. Unknown or missing species are
/// [`Severity::Low`].
#[must_use]
pub fn severity_for(species: Option<&str>) -> Severity {
    species
        .and_then(TickSpecies::from_common_name)
        .map_or(Severity::Low, TickSpecies::severity)
}

/// UK cities accepted for user-submitted sightings.
///
/// Parsing is ASCII case-insensitive; [`Display`](std::fmt::Display) gives
/// the canonical spelling.
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
#[strum(ascii_case_insensitive)]
pub enum UkCity {
    Nottingham,
    Glasgow,
    London,
    Manchester,
    Sheffield,
    Liverpool,
    Bristol,
    Birmingham,
    Edinburgh,
    Cardiff,
    Southampton,
    Newcastle,
    Leeds,
    Leicester,
}

impl UkCity {
    /// Parses a city name against the allow-list, ignoring ASCII case and
    /// surrounding whitespace.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        name.trim().parse().ok()
    }

    /// Returns the city centre as `(latitude, longitude)`.
    #[must_use]
    pub const fn coordinates(self) -> (f64, f64) {
        match self {
            Self::Nottingham => (52.9548, -1.1581),
            Self::Glasgow => (55.8642, -4.2518),
            Self::London => (51.5074, -0.1278),
            Self::Manchester => (53.4808, -2.2426),
            Self::Sheffield => (53.3811, -1.4701),
            Self::Liverpool => (53.4084, -2.9916),
            Self::Bristol => (51.4545, -2.5879),
            Self::Birmingham => (52.4862, -1.8904),
            Self::Edinburgh => (55.9533, -3.1883),
            Self::Cardiff => (51.4816, -3.1791),
            Self::Southampton => (50.9097, -1.4043),
            Self::Newcastle => (54.9783, -1.6178),
            Self::Leeds => (53.8008, -1.5491),
            Self::Leicester => (52.6369, -1.1398),
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Nottingham,
            Self::Glasgow,
            Self::London,
            Self::Manchester,
            Self::Sheffield,
            Self::Liverpool,
            Self::Bristol,
            Self::Birmingham,
            Self::Edinburgh,
            Self::Cardiff,
            Self::Southampton,
            Self::Newcastle,
            Self::Leeds,
            Self::Leicester,
        ]
    }
}

/// Where a sighting record came from.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SightingOrigin {
    /// The remote sightings API. Remote records omit the field entirely.
    #[default]
    Api,
    /// Submitted through the report form and stored locally.
    User,
}

/// A single reported tick sighting, from either the remote API or the
/// local store.
///
/// Every field the remote API may omit is optional; aggregation skips
/// records that lack what a particular aggregate needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SightingRecord {
    /// ISO-like timestamp, date-only or date+time.
    #[serde(default)]
    pub date: Option<String>,
    /// City name.
    #[serde(default)]
    pub location: Option<String>,
    /// Species common name.
    #[serde(default)]
    pub species: Option<String>,
    /// Species Latin name.
    #[serde(default)]
    pub latin_name: Option<String>,
    /// Web path of an uploaded photo (user sightings only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    /// Record origin.
    #[serde(default)]
    pub source: SightingOrigin,
}

impl SightingRecord {
    /// Parses [`Self::date`], returning `None` when it is missing or
    /// unparsable.
    #[must_use]
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(parse_sighting_date)
    }

    /// Returns the location if it is present and non-empty.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.location.as_deref().filter(|s| !s.is_empty())
    }

    /// Returns the species name if it is present and non-empty.
    #[must_use]
    pub fn species_name(&self) -> Option<&str> {
        self.species.as_deref().filter(|s| !s.is_empty())
    }

    /// Returns the species-derived severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        severity_for(self.species_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_lookup_is_exact() {
        assert_eq!(
            TickSpecies::from_common_name("Marsh tick"),
            Some(TickSpecies::Marsh)
        );
        assert_eq!(
            TickSpecies::from_common_name("Fox/badger tick"),
            Some(TickSpecies::FoxBadger)
        );
        assert_eq!(TickSpecies::from_common_name("marsh tick"), None);
        assert_eq!(TickSpecies::from_common_name("Deer tick"), None);
    }

    #[test]
    fn common_name_matches_display() {
        for species in TickSpecies::all() {
            assert_eq!(species.to_string(), species.common_name());
            assert_eq!(
                TickSpecies::from_common_name(species.common_name()),
                Some(*species)
            );
        }
    }

    #[test]
    fn latin_names() {
        assert_eq!(latin_name_for("Passerine tick"), Some("Ixodes arboricola"));
        assert_eq!(latin_name_for("Tree-hole tick"), Some("Dermacentor frontalis"));
        assert_eq!(latin_name_for("Unknown tick"), None);
    }

    #[test]
    fn unknown_species_is_low_severity() {
        assert_eq!(severity_for(Some("Fox/badger tick")), Severity::High);
        assert_eq!(severity_for(Some("Southern rodent tick")), Severity::Medium);
        assert_eq!(severity_for(Some("Something else")), Severity::Low);
        assert_eq!(severity_for(None), Severity::Low);
    }

    #[test]
    fn severity_parses_lowercase() {
        assert_eq!("high".parse::<Severity>().unwrap(), Severity::High);
        assert_eq!(Severity::Medium.to_string(), "medium");
        assert!("urgent".parse::<Severity>().is_err());
    }

    #[test]
    fn city_lookup_is_case_insensitive() {
        assert_eq!(UkCity::lookup("leeds"), Some(UkCity::Leeds));
        assert_eq!(UkCity::lookup("  NEWCASTLE "), Some(UkCity::Newcastle));
        assert_eq!(UkCity::lookup("Paris"), None);
        assert_eq!(UkCity::Southampton.to_string(), "Southampton");
        assert_eq!(UkCity::all().len(), 14);
    }

    #[test]
    fn remote_record_defaults_to_api_origin() {
        let record: SightingRecord = serde_json::from_str(
            r#"{"id":"abc","date":"2024-03-01T10:00:00","location":"Leeds","species":"Marsh tick","latinName":"Ixodes apronophorus"}"#,
        )
        .unwrap();
        assert_eq!(record.source, SightingOrigin::Api);
        assert_eq!(record.latin_name.as_deref(), Some("Ixodes apronophorus"));
        assert_eq!(record.city(), Some("Leeds"));
        assert!(record.image_path.is_none());
    }

    #[test]
    fn user_record_serializes_camel_case() {
        let record = SightingRecord {
            date: Some("2025-11-21T14:30".to_string()),
            location: Some("Leeds".to_string()),
            species: Some("Marsh tick".to_string()),
            latin_name: None,
            image_path: Some("images/uploads/a.jpg".to_string()),
            source: SightingOrigin::User,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["source"], "user");
        assert_eq!(value["imagePath"], "images/uploads/a.jpg");
        assert!(value["latinName"].is_null());
    }

    #[test]
    fn empty_fields_are_treated_as_missing() {
        let record = SightingRecord {
            location: Some(String::new()),
            species: Some(String::new()),
            ..SightingRecord::default()
        };
        assert!(record.city().is_none());
        assert!(record.species_name().is_none());
        assert!(record.parsed_date().is_none());
    }
}
