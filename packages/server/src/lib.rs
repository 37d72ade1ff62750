#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the `TickSight` UK application.
//!
//! Serves four server-rendered pages from `/` (map, report, education and
//! prevention, selected with `?page=`), a small JSON API under `/api`, and
//! uploaded sighting photos from `/images/uploads`. Sightings come from the
//! remote API through a [`SightingsSource`] and from a local `SQLite`
//! table of user reports at `data/sightings.db`.

pub mod config;
mod handlers;
pub mod interactive;
pub mod report;
mod views;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use switchy_database::Database;
use ticksight_source::{RemoteSightings, SightingsSource};

use crate::config::ServerConfig;

/// Shared application state.
pub struct AppState {
    /// `SQLite` store of user-submitted sightings.
    pub db: Arc<dyn Database>,
    /// Remote sightings API.
    pub source: Arc<dyn SightingsSource>,
    /// Settings the server was started with.
    pub config: ServerConfig,
}

/// Registers the page, asset and API routes.
///
/// Handlers that read sightings expect a `web::Data<AppState>` to be
/// registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/", web::post().to(handlers::submit))
        .route("/assets/{name}", web::get().to(handlers::asset))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health))
                .route("/species", web::get().to(handlers::species))
                .route("/cities", web::get().to(handlers::cities))
                .route("/sightings", web::get().to(handlers::sightings))
                .route("/education", web::get().to(handlers::education)),
        );
}

/// Starts the `TickSight` server.
///
/// Reads [`ServerConfig`] from the environment, opens the sightings
/// database, builds the remote API client and runs the Actix-Web HTTP
/// server until it is stopped. The caller provides the async runtime
/// (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the database cannot be opened,
/// the upload directory cannot be created, the API URL is invalid, or the
/// HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    let config = ServerConfig::from_env();

    log::info!("Opening sightings database...");
    let db = ticksight_database::open_db(&config.db_path)
        .await
        .map_err(|e| {
            log::error!("Failed to open sightings database: {e}");
            std::io::Error::other(e.to_string())
        })?;

    std::fs::create_dir_all(&config.upload_dir)?;

    log::info!("Using sightings API at {}", config.api_url);
    let source = RemoteSightings::new(&config.api_url, config.api_timeout).map_err(|e| {
        log::error!("Failed to create sightings API client: {e}");
        std::io::Error::other(e.to_string())
    })?;

    let bind_addr = config.bind_addr.clone();
    let port = config.port;
    let upload_dir = config.upload_dir.clone();

    let state = web::Data::new(AppState {
        db: Arc::from(db),
        source: Arc::new(source),
        config,
    });

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
            .service(Files::new("/images/uploads", upload_dir.clone()))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
