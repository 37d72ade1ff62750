//! Server configuration read from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use ticksight_database::DEFAULT_DB_PATH;
use ticksight_source::remote::{DEFAULT_API_URL, DEFAULT_TIMEOUT};

/// Default directory uploaded photos are written to.
pub const DEFAULT_UPLOAD_DIR: &str = "data/uploads";

/// Runtime settings for [`crate::run_server`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind (`BIND_ADDR`).
    pub bind_addr: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Base URL of the remote sightings API (`TICKSIGHT_API_URL`).
    pub api_url: String,
    /// Per-request timeout for the remote API (`TICKSIGHT_API_TIMEOUT_SECS`).
    pub api_timeout: Duration,
    /// `SQLite` file for user sightings (`TICKSIGHT_DB_PATH`).
    pub db_path: PathBuf,
    /// Directory for uploaded photos (`TICKSIGHT_UPLOAD_DIR`).
    pub upload_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout: DEFAULT_TIMEOUT,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from the process environment, falling back
    /// to defaults for unset or unparsable values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            bind_addr: non_empty("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: non_empty("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            api_url: non_empty("TICKSIGHT_API_URL").unwrap_or(defaults.api_url),
            api_timeout: non_empty("TICKSIGHT_API_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .map_or(defaults.api_timeout, Duration::from_secs),
            db_path: non_empty("TICKSIGHT_DB_PATH").map_or(defaults.db_path, PathBuf::from),
            upload_dir: non_empty("TICKSIGHT_UPLOAD_DIR").map_or(defaults.upload_dir, PathBuf::from),
        }
    }
}
