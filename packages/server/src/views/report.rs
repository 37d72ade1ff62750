use maud::{Markup, html};
use ticksight_server_models::{Page, ReportField, ReportFormState};
use ticksight_sighting_models::{TickSpecies, UkCity};

use super::layout::page;

pub fn report(state: &ReportFormState) -> Markup {
    let old = &state.old;

    page(
        "Report a Tick Sighting",
        Page::Report,
        None,
        html! {
            h1 { "Report a tick sighting" }

            @if state.success {
                div class="banner success" role="status" {
                    "Thank you! Your sighting has been recorded."
                }
            }
            @if let Some(message) = state.error(ReportField::General) {
                div class="banner error" role="alert" { (message) }
            }

            form class="report" method="post" action="/?page=report" enctype="multipart/form-data" novalidate {
                div class="field" {
                    label for="date" { "Date of sighting" }
                    input type="date" id="date" name="date" value=(old.date) required;
                    (field_error(state, ReportField::Date))
                }
                div class="field" {
                    label for="time" { "Time of sighting" }
                    input type="time" id="time" name="time" value=(old.time) required;
                    (field_error(state, ReportField::Time))
                }
                div class="field" {
                    label for="location" { "Location (city)" }
                    input type="text" id="location" name="location" list="cities"
                        value=(old.location) autocomplete="address-level2" required;
                    datalist id="cities" {
                        @for city in UkCity::all() {
                            option value=(city.as_ref()) {}
                        }
                    }
                    (field_error(state, ReportField::Location))
                }
                div class="field" {
                    label for="species" { "Tick species" }
                    select id="species" name="species" required {
                        option value="" { "Select a species" }
                        @for s in TickSpecies::all() {
                            option value=(s.common_name()) selected[s.common_name() == old.species] {
                                (s.common_name()) " (" (s.latin_name()) ")"
                            }
                        }
                    }
                    (field_error(state, ReportField::Species))
                }
                div class="field" {
                    label for="description" { "Description (optional)" }
                    textarea id="description" name="description" rows="4" { (old.description) }
                    (field_error(state, ReportField::Description))
                }
                div class="field" {
                    label for="image" { "Photo (optional)" }
                    input type="file" id="image" name="image" accept="image/*";
                    (field_error(state, ReportField::Image))
                }
                button type="submit" { "Submit sighting" }
            }
        },
    )
}

fn field_error(state: &ReportFormState, field: ReportField) -> Markup {
    html! {
        @if let Some(message) = state.error(field) {
            p class="field-error" id=(format!("{field}-error")) role="alert" { (message) }
        }
    }
}
