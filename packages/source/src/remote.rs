//! HTTP client for the public tick sightings API.
//!
//! Three read-only endpoints are used:
//!
//! ```text
//! GET {base}                      all sightings
//! GET {base}/city/{city}          sightings in one city
//! GET {base}/species/{species}    sightings of one species
//! ```
//!
//! Each request is a single attempt with a fixed timeout. Nothing is
//! retried; a failed request is logged and yields an empty list.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use ticksight_sighting_models::SightingRecord;

use crate::decode::{body_preview, decode_sightings};
use crate::{SightingsSource, SourceError};

/// Public sightings API used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://dev-task.elancoapps.com/data/tick-sightings";

/// Per-request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sightings source backed by the remote HTTP API.
#[derive(Debug, Clone)]
pub struct RemoteSightings {
    client: reqwest::Client,
    base_url: Url,
}

impl RemoteSightings {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidUrl`] if `base_url` cannot be parsed
    /// or cannot have path segments appended, and [`SourceError::Http`] if
    /// the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let parsed = Url::parse(base_url).map_err(|e| SourceError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        if parsed.cannot_be_a_base() {
            return Err(SourceError::InvalidUrl {
                url: base_url.to_string(),
                message: "URL cannot be used as a base".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Returns the configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds an endpoint URL by appending percent-encoded path segments to
    /// the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidUrl`] if the base URL cannot take path
    /// segments.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, SourceError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| SourceError::InvalidUrl {
                    url: self.base_url.to_string(),
                    message: "URL cannot be used as a base".to_string(),
                })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    /// Fetches and decodes one endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on transport failure, a status other than
    /// `200 OK`, or a body that is not a JSON array.
    pub async fn try_fetch(&self, url: Url) -> Result<Vec<SightingRecord>, SourceError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        decode_sightings(&body).inspect_err(|e| {
            log::debug!(
                "Undecodable sightings payload\n  \
                 url: {url}\n  \
                 received: {} bytes\n  \
                 error: {e}\n  \
                 body preview: {}",
                body.len(),
                body_preview(&body),
            );
        })
    }

    async fn fetch_soft(&self, segments: &[&str]) -> Vec<SightingRecord> {
        let url = match self.endpoint(segments) {
            Ok(url) => url,
            Err(e) => {
                log::warn!("Cannot build sightings URL: {e}");
                return Vec::new();
            }
        };

        match self.try_fetch(url.clone()).await {
            Ok(records) => {
                log::debug!("Fetched {} sightings from {url}", records.len());
                records
            }
            Err(e) => {
                log::warn!("Sightings fetch from {url} failed, using empty result: {e}");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl SightingsSource for RemoteSightings {
    async fn fetch_all(&self) -> Vec<SightingRecord> {
        self.fetch_soft(&[]).await
    }

    async fn fetch_by_city(&self, city: &str) -> Vec<SightingRecord> {
        let city = city.trim();
        if city.is_empty() {
            return Vec::new();
        }
        self.fetch_soft(&["city", city]).await
    }

    async fn fetch_by_species(&self, species: &str) -> Vec<SightingRecord> {
        let species = species.trim();
        if species.is_empty() {
            return Vec::new();
        }
        self.fetch_soft(&["species", species]).await
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt as _, AsyncWriteExt as _};
    use tokio::net::TcpListener;

    use super::*;

    fn client(base: &str) -> RemoteSightings {
        RemoteSightings::new(base, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn builds_city_endpoint() {
        let remote = client("https://example.test/data/tick-sightings");
        let url = remote.endpoint(&["city", "Leeds"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.test/data/tick-sightings/city/Leeds"
        );
    }

    #[test]
    fn encodes_slashes_and_spaces_in_segments() {
        let remote = client("https://example.test/data/tick-sightings/");
        let url = remote.endpoint(&["species", "Fox/badger tick"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.test/data/tick-sightings/species/Fox%2Fbadger%20tick"
        );
    }

    #[test]
    fn base_endpoint_is_unchanged() {
        let remote = client("https://example.test/data/tick-sightings");
        let url = remote.endpoint(&[]).unwrap();
        assert_eq!(url.as_str(), "https://example.test/data/tick-sightings");
    }

    #[test]
    fn rejects_unusable_base_url() {
        assert!(RemoteSightings::new("not a url", DEFAULT_TIMEOUT).is_err());
        assert!(RemoteSightings::new("mailto:someone@example.test", DEFAULT_TIMEOUT).is_err());
    }

    #[tokio::test]
    async fn empty_arguments_short_circuit() {
        let remote = client("http://127.0.0.1:9/tick-sightings");
        assert!(remote.fetch_by_city("").await.is_empty());
        assert!(remote.fetch_by_city("   ").await.is_empty());
        assert!(remote.fetch_by_species("").await.is_empty());
    }

    #[tokio::test]
    async fn unreachable_api_yields_empty_list() {
        let remote = client("http://127.0.0.1:9/tick-sightings");
        assert!(remote.fetch_all().await.is_empty());
        assert!(remote.fetch_by_city("Leeds").await.is_empty());

        let err = remote
            .try_fetch(remote.endpoint(&[]).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Http(_)));
    }

    /// Serves `status` and `body` to every connection and returns the base
    /// URL to reach it on.
    async fn canned_api(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut request = [0_u8; 4096];
                let _ = socket.read(&mut request).await;
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{addr}/tick-sightings")
    }

    #[tokio::test]
    async fn server_error_status_yields_empty_list() {
        let remote = client(&canned_api("500 Internal Server Error", "oops").await);
        assert!(remote.fetch_all().await.is_empty());

        let err = remote
            .try_fetch(remote.endpoint(&[]).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Status { status: 500, .. }), "{err}");
    }

    #[tokio::test]
    async fn object_payload_yields_empty_list() {
        let remote = client(&canned_api("200 OK", r#"{"error":"x"}"#).await);
        assert!(remote.fetch_all().await.is_empty());
        assert!(remote.fetch_by_city("Leeds").await.is_empty());

        let err = remote
            .try_fetch(remote.endpoint(&[]).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::NotAnArray { .. }), "{err}");
    }

    #[tokio::test]
    async fn array_payload_is_decoded() {
        let remote = client(
            &canned_api(
                "200 OK",
                r#"[{"id":"1","date":"2024-03-01T10:00:00","location":"Leeds","species":"Marsh tick"}, 7]"#,
            )
            .await,
        );
        let records = remote.fetch_all().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].location.as_deref(), Some("Leeds"));
    }
}
