use maud::{Markup, html};
use ticksight_analytics_models::SpeciesSummary;
use ticksight_server_models::{EducationData, Page};
use ticksight_sighting_models::severity_for;

use super::layout::page;

pub fn education(data: &EducationData) -> Markup {
    page(
        "Tick Education & Prevention",
        Page::Education,
        None,
        html! {
            h1 { "Tick activity through the year" }
            (filter_form(data))
            (histogram(data))
            h2 { "Know your ticks" }
            div class="cards" {
                @for summary in &data.species_summaries {
                    (species_card(summary))
                }
            }
            p {
                a href="/?page=prevention" { "Read our tick prevention tips" }
            }
        },
    )
}

fn filter_form(data: &EducationData) -> Markup {
    let city = data.selected_city.as_deref().unwrap_or_default();

    html! {
        form class="filters" method="get" action="/" {
            input type="hidden" name="page" value="education";
            label {
                "City"
                select name="city" {
                    @for c in &data.options.cities {
                        option value=(c) selected[c == city] { (c) }
                    }
                }
            }
            label {
                "Year"
                select name="year" {
                    @for y in data.options.years.iter().copied() {
                        option value=(y) selected[Some(y) == data.selected_year] { (y) }
                    }
                }
            }
            label {
                "Species"
                select name="species" {
                    option value="" { "All species" }
                    @for s in &data.options.species {
                        option value=(s) selected[*s == data.selected_species] { (s) }
                    }
                }
            }
            button type="submit" { "Show" }
        }
    }
}

fn histogram(data: &EducationData) -> Markup {
    let max = data
        .monthly_counts
        .iter()
        .map(|m| m.count)
        .max()
        .unwrap_or(0);

    html! {
        section class="histogram" {
            h2 {
                "Sightings per month"
                @if let (Some(city), Some(year)) = (&data.selected_city, data.selected_year) {
                    " in " (city) ", " (year)
                }
                @if !data.selected_species.is_empty() {
                    " (" (data.selected_species) ")"
                }
            }
            table {
                thead {
                    tr {
                        th scope="col" { "Month" }
                        th scope="col" { "Sightings" }
                        th scope="col" aria-hidden="true" {}
                    }
                }
                tbody {
                    @for m in &data.monthly_counts {
                        tr {
                            th scope="row" { (m.name) }
                            td { (m.count) }
                            td aria-hidden="true" {
                                span class="bar" style=(format!("width:{}%", bar_width(m.count, max))) {}
                            }
                        }
                    }
                }
            }
        }
    }
}

fn species_card(summary: &SpeciesSummary) -> Markup {
    let severity = severity_for(Some(&summary.species));

    html! {
        section class="card species-card" {
            h3 { (summary.species) }
            @if let Some(latin) = &summary.latin_name {
                p class="species-latin" { em { (latin) } }
            }
            p {
                span class=(format!("badge {severity}")) { (severity.label()) " severity" }
            }
            p {
                strong { "Most reports: " }
                @if summary.top_cities.is_empty() {
                    "No data"
                } @else {
                    @for (i, c) in summary.top_cities.iter().enumerate() {
                        @if i > 0 { ", " }
                        (c.city) " (" (c.count) ")"
                    }
                }
            }
            p {
                strong { "Peak month: " }
                (summary.peak_month_name.as_deref().unwrap_or("No data"))
            }
        }
    }
}

fn bar_width(count: u32, max: u32) -> u32 {
    if max == 0 { 0 } else { count * 100 / max }
}

#[cfg(test)]
mod tests {
    use ticksight_analytics_models::{CityCount, FilterOptions, MonthlyHistogram};
    use ticksight_server_models::ApiMonthCount;

    use super::*;

    #[test]
    fn bar_widths_scale_to_max() {
        assert_eq!(bar_width(0, 0), 0);
        assert_eq!(bar_width(3, 6), 50);
        assert_eq!(bar_width(6, 6), 100);
    }

    #[test]
    fn renders_histogram_and_cards() {
        let mut histogram = MonthlyHistogram::new();
        histogram.increment(3);

        let data = EducationData {
            options: FilterOptions {
                cities: vec!["Leeds".to_string(), "York".to_string()],
                years: vec![2023, 2024],
                species: vec!["Marsh tick".to_string()],
            },
            selected_city: Some("York".to_string()),
            selected_year: Some(2024),
            selected_species: String::new(),
            monthly_counts: ApiMonthCount::from_histogram(&histogram),
            species_summaries: vec![SpeciesSummary {
                species: "Marsh tick".to_string(),
                latin_name: Some("Ixodes apronophorus".to_string()),
                top_cities: vec![CityCount {
                    city: "Leeds".to_string(),
                    count: 4,
                }],
                peak_month: Some(3),
                peak_month_name: Some("March".to_string()),
                total_sightings: 4,
            }],
        };

        let html = education(&data).into_string();
        assert!(html.contains(r#"<option value="York" selected>"#));
        assert!(html.contains(r#"<option value="2024" selected>"#));
        assert!(html.contains("in York, 2024"));
        assert!(html.contains("Ixodes apronophorus"));
        assert!(html.contains("Leeds (4)"));
        assert!(html.contains("March"));
        assert!(html.contains("width:100%"));
    }
}
