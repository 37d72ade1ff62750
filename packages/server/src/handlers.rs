//! HTTP handler functions for the `TickSight` pages and JSON API.

use actix_multipart::Multipart;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use maud::Markup;
use ticksight_analytics::{
    DEFAULT_TIMELINE_LEN, MapFilter, city_timelines, filter_options, merge_sightings,
    monthly_histogram, species_summaries,
};
use ticksight_analytics_models::MonthlyHistogram;
use ticksight_database::list_sightings_normalised;
use ticksight_server_models::{
    ApiCity, ApiHealth, ApiMonthCount, ApiSpecies, EducationData, EducationQueryParams,
    MapQueryParams, Page, PageQuery, ReportErrors, ReportField, ReportFields, ReportFormState,
};
use ticksight_sighting_models::{SightingRecord, TickSpecies, UkCity};

use crate::AppState;
use crate::report::{
    MSG_FORM_BROKEN, MSG_SAVE_FAILED, MSG_TOO_LONG, MSG_UPLOAD_BROKEN, MSG_UPLOAD_FAILED,
    new_sighting, read_submission, save_upload, validate_report,
};
use crate::views;

const MAIN_CSS: &str = include_str!("../assets/main.css");
const MAP_JS: &str = include_str!("../assets/map.js");
const ACCESSIBILITY_JS: &str = include_str!("../assets/accessibility.js");

/// `GET /?page=...`
pub async fn index(
    state: web::Data<AppState>,
    page: web::Query<PageQuery>,
    map_params: web::Query<MapQueryParams>,
    education_params: web::Query<EducationQueryParams>,
) -> HttpResponse {
    render_page(&state, page.resolve(), &map_params, &education_params).await
}

/// `POST /?page=report`
///
/// Other pages ignore the body and render as for `GET`.
pub async fn submit(
    state: web::Data<AppState>,
    page: web::Query<PageQuery>,
    map_params: web::Query<MapQueryParams>,
    education_params: web::Query<EducationQueryParams>,
    payload: Multipart,
) -> HttpResponse {
    match page.resolve() {
        Page::Report => submit_report(&state, payload).await,
        other => render_page(&state, other, &map_params, &education_params).await,
    }
}

async fn render_page(
    state: &AppState,
    page: Page,
    map_params: &MapQueryParams,
    education_params: &EducationQueryParams,
) -> HttpResponse {
    match page {
        Page::Map => {
            let filter = MapFilter::from_params(
                map_params.species.as_deref().unwrap_or_default(),
                map_params.date_range.as_deref().unwrap_or_default(),
                "",
            );
            let sightings = filter.apply(load_sightings(state).await, Utc::now());
            let timelines = city_timelines(&sightings, DEFAULT_TIMELINE_LEN);

            html(views::map(&views::MapPresenter {
                sightings: &sightings,
                params: map_params,
                timelines: &timelines,
            }))
        }
        Page::Report => html(views::report(&ReportFormState::default())),
        Page::Education => html(views::education(
            &education_data(state, education_params).await,
        )),
        Page::Prevention => html(views::prevention()),
    }
}

async fn submit_report(state: &AppState, payload: Multipart) -> HttpResponse {
    let submission = read_submission(payload).await;
    let validation = validate_report(&submission.fields, Utc::now());
    let mut errors = validation.errors.clone();

    if let Some(e) = &submission.upload_error {
        log::warn!("Failed to read report upload: {e}");
        errors.insert(ReportField::Image, MSG_UPLOAD_BROKEN.to_string());
    }
    if let Some(e) = &submission.form_error {
        log::warn!("Failed to read report form: {e}");
        errors.insert(ReportField::General, MSG_FORM_BROKEN.to_string());
    }
    for field in &submission.too_long {
        errors.insert(*field, MSG_TOO_LONG.to_string());
    }

    if !errors.is_empty() {
        return html(views::report(&ReportFormState::rejected(
            errors,
            submission.fields,
        )));
    }

    let image_path = match &submission.image {
        Some(image) => match save_upload(&state.config.upload_dir, image).await {
            Ok(path) => Some(path),
            Err(e) => {
                log::error!("Failed to save uploaded photo: {e}");
                errors.insert(ReportField::Image, MSG_UPLOAD_FAILED.to_string());
                return html(views::report(&ReportFormState::rejected(
                    errors,
                    submission.fields,
                )));
            }
        },
        None => None,
    };

    let new = new_sighting(&submission.fields, validation.city, image_path);

    match ticksight_database::create_sighting(state.db.as_ref(), &new).await {
        Ok(true) => html(views::report(&ReportFormState::submitted())),
        Ok(false) => {
            log::error!("Insert of user sighting wrote no rows");
            saving_failed(submission.fields)
        }
        Err(e) => {
            log::error!("Failed to store user sighting: {e}");
            saving_failed(submission.fields)
        }
    }
}

fn saving_failed(old: ReportFields) -> HttpResponse {
    let mut errors = ReportErrors::new();
    errors.insert(ReportField::General, MSG_SAVE_FAILED.to_string());
    html(views::report(&ReportFormState::rejected(errors, old)))
}

/// Remote sightings followed by stored user sightings. A store failure is
/// logged and yields the remote sightings alone.
async fn load_sightings(state: &AppState) -> Vec<SightingRecord> {
    let remote = state.source.fetch_all().await;

    let user = match list_sightings_normalised(state.db.as_ref()).await {
        Ok(records) => records,
        Err(e) => {
            log::error!("Failed to load user sightings: {e}");
            Vec::new()
        }
    };

    log::debug!(
        "Loaded {} remote and {} user sightings",
        remote.len(),
        user.len()
    );

    merge_sightings(remote, user)
}

async fn education_data(state: &AppState, params: &EducationQueryParams) -> EducationData {
    let all = state.source.fetch_all().await;
    let options = filter_options(&all);

    let selected_city = non_empty(params.city.as_deref())
        .map(str::to_string)
        .or_else(|| options.cities.first().cloned());
    let selected_year = match non_empty(params.year.as_deref()) {
        Some(year) => year.parse().ok(),
        None => options.years.last().copied(),
    };
    let selected_species = non_empty(params.species.as_deref())
        .unwrap_or_default()
        .to_string();

    let histogram = match (&selected_city, selected_year) {
        (Some(city), Some(year)) => {
            monthly_histogram(&all, city, year, Some(selected_species.as_str()))
        }
        _ => MonthlyHistogram::new(),
    };

    EducationData {
        monthly_counts: ApiMonthCount::from_histogram(&histogram),
        species_summaries: species_summaries(state.source.as_ref()).await,
        options,
        selected_city,
        selected_year,
        selected_species,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn html(markup: Markup) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(markup.into_string())
}

/// `GET /assets/{name}`
pub async fn asset(name: web::Path<String>) -> HttpResponse {
    match name.as_str() {
        "main.css" => HttpResponse::Ok()
            .content_type("text/css; charset=utf-8")
            .body(MAIN_CSS),
        "map.js" => HttpResponse::Ok()
            .content_type("application/javascript; charset=utf-8")
            .body(MAP_JS),
        "accessibility.js" => HttpResponse::Ok()
            .content_type("application/javascript; charset=utf-8")
            .body(ACCESSIBILITY_JS),
        _ => HttpResponse::NotFound().finish(),
    }
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/species`
///
/// Returns the known species with Latin names and severity.
pub async fn species() -> HttpResponse {
    let species: Vec<ApiSpecies> = TickSpecies::all()
        .iter()
        .copied()
        .map(ApiSpecies::from)
        .collect();
    HttpResponse::Ok().json(species)
}

/// `GET /api/cities`
///
/// Returns the cities accepted by the report form, with coordinates.
pub async fn cities() -> HttpResponse {
    let cities: Vec<ApiCity> = UkCity::all().iter().copied().map(ApiCity::from).collect();
    HttpResponse::Ok().json(cities)
}

/// `GET /api/sightings`
///
/// Merged remote and user sightings filtered by species, date range and
/// severity.
pub async fn sightings(
    state: web::Data<AppState>,
    params: web::Query<MapQueryParams>,
) -> HttpResponse {
    let filter = MapFilter::from_params(
        params.species.as_deref().unwrap_or_default(),
        params.date_range.as_deref().unwrap_or_default(),
        params.severity.as_deref().unwrap_or_default(),
    );
    let records = filter.apply(load_sightings(&state).await, Utc::now());
    HttpResponse::Ok().json(records)
}

/// `GET /api/education`
pub async fn education(
    state: web::Data<AppState>,
    params: web::Query<EducationQueryParams>,
) -> HttpResponse {
    HttpResponse::Ok().json(education_data(&state, &params).await)
}
