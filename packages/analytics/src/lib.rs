#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filtering and aggregation over tick sighting records.
//!
//! Everything here works on in-memory slices of
//! [`SightingRecord`](ticksight_sighting_models::SightingRecord) and never
//! fails: a record with a missing or malformed field is simply left out of
//! the aggregate that needs that field. The only I/O is
//! [`summary::species_summaries`], which pulls each species' records
//! through a [`SightingsSource`](ticksight_source::SightingsSource).

pub mod filter;
pub mod histogram;
pub mod options;
pub mod summary;
pub mod timeline;

pub use filter::{
    MapFilter, filter_by_date_range, filter_by_severity, filter_by_species, merge_sightings,
};
pub use histogram::monthly_histogram;
pub use options::filter_options;
pub use summary::{species_summaries, summarize_species};
pub use timeline::{DEFAULT_TIMELINE_LEN, city_timeline, city_timelines};
