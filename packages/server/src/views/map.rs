use std::collections::BTreeMap;

use maud::{Markup, PreEscaped, html};
use ticksight_analytics_models::DateRange;
use ticksight_server_models::{MapQueryParams, Page};
use ticksight_sighting_models::{Severity, SightingRecord, TickSpecies};

use super::layout::page;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Data the map page renders.
pub struct MapPresenter<'a> {
    /// Filtered sightings handed to the map widget.
    pub sightings: &'a [SightingRecord],
    /// Filter values as submitted, to keep the selects populated.
    pub params: &'a MapQueryParams,
    /// Recent dated sightings per city, newest first.
    pub timelines: &'a BTreeMap<String, Vec<SightingRecord>>,
}

pub fn map(data: &MapPresenter<'_>) -> Markup {
    let species = data.params.species.as_deref().unwrap_or_default().trim();
    let range = data.params.date_range.as_deref().unwrap_or_default().trim();
    let severity = data
        .params
        .severity
        .as_deref()
        .unwrap_or_default()
        .trim()
        .parse::<Severity>()
        .ok();

    let head = html! {
        link rel="stylesheet" href=(LEAFLET_CSS);
    };

    page(
        "TickSight UK - Map",
        Page::Map,
        Some(head),
        html! {
            h1 { "Tick sightings across the UK" }
            (filter_form(species, range, severity.as_ref().map_or("", |s| s.as_ref())))
            p class="result-count" {
                (data.sightings.len()) " sightings match the current filters."
            }
            (legend())
            div class="map-layout" {
                div id="map" role="region" aria-label="Map of tick sightings" {}
                aside id="sighting-details" aria-live="polite" {
                    @if data.sightings.is_empty() {
                        p { "No sightings available for the current filters." }
                    } @else {
                        p { "Select a marker to see details and recent activity in that city." }
                    }
                }
            }
            (timelines(data.timelines))
            script {
                (PreEscaped(format!(
                    "const apiSightings = {};\nconst selectedSeverity = {};",
                    script_json(data.sightings),
                    script_json(&severity),
                )))
            }
            script src=(LEAFLET_JS) {}
            script src="/assets/map.js" {}
        },
    )
}

fn filter_form(species: &str, range: &str, severity: &str) -> Markup {
    html! {
        form class="filters" method="get" action="/" {
            input type="hidden" name="page" value="map";
            label {
                "Species"
                select name="species" {
                    option value="" { "All species" }
                    @for s in TickSpecies::all() {
                        option value=(s.common_name()) selected[s.common_name() == species] {
                            (s.common_name())
                        }
                    }
                }
            }
            label {
                "Date range"
                select name="dateRange" {
                    option value="" { "All time" }
                    @for r in DateRange::all() {
                        option value=(r.token()) selected[r.token() == range] { (r.label()) }
                    }
                }
            }
            label {
                "Severity"
                select name="severity" {
                    option value="" { "All severities" }
                    @for s in Severity::all() {
                        option value=(s.as_ref()) selected[s.as_ref() == severity] { (s.label()) }
                    }
                }
            }
            button type="submit" { "Apply filters" }
        }
    }
}

fn legend() -> Markup {
    html! {
        ul class="legend" aria-label="Severity legend" {
            @for s in Severity::all().iter().rev() {
                li {
                    span class="swatch" style=(format!("background:{}", s.color())) {}
                    (s.label()) " severity"
                }
            }
        }
    }
}

fn timelines(timelines: &BTreeMap<String, Vec<SightingRecord>>) -> Markup {
    html! {
        section class="timelines" {
            h2 { "Recent activity by city" }
            @if timelines.is_empty() {
                p { "No dated sightings to show." }
            }
            @for (city, sightings) in timelines {
                details {
                    summary { (city) " (" (sightings.len()) ")" }
                    ul class="sightings-timeline" {
                        @for s in sightings {
                            li class="timeline-item" {
                                span class="timeline-date" { (display_date(s)) }
                                " "
                                span class="timeline-species" {
                                    (s.species_name().unwrap_or("Unknown species"))
                                }
                                " "
                                span class=(format!("badge {}", s.severity())) { (s.severity().label()) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn display_date(record: &SightingRecord) -> String {
    record.parsed_date().map_or_else(
        || "Unknown date".to_string(),
        |dt| dt.format("%d %b %Y %H:%M").to_string(),
    )
}

/// Serializes `value` for inclusion inside a `<script>` element.
fn script_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
}
