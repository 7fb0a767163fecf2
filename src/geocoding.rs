use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::exif_parser::Coordinates;

/// What a reverse-geocoding lookup produced.
///
/// Callers that only need the address use [`GeocodeOutcome::into_address`],
/// which treats every failure the same as "no address found".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodeOutcome {
    Found(String),
    NoResults { status: Option<String> },
    HttpStatus(u16),
    Transport(String),
}

impl GeocodeOutcome {
    pub fn into_address(self) -> Option<String> {
        match self {
            GeocodeOutcome::Found(address) => Some(address),
            _ => None,
        }
    }
}

#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    fn name(&self) -> &str;

    async fn reverse_geocode(&self, coords: Coordinates) -> GeocodeOutcome;
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    status: Option<String>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: Option<String>,
}

/// Google Geocoding API client bound to a single API key.
pub struct GoogleGeocoder {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GoogleGeocoder {
    pub fn new(client: Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    async fn request(&self, coords: Coordinates) -> GeocodeOutcome {
        let latlng = format!("{},{}", coords.latitude, coords.longitude);
        let response = match self
            .client
            .get(&self.endpoint)
            .query(&[("latlng", latlng.as_str()), ("key", self.api_key.as_str())])
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(err) => return GeocodeOutcome::Transport(err.without_url().to_string()),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return GeocodeOutcome::HttpStatus(status.as_u16());
        }

        match response.text().await {
            Ok(body) => parse_response(&body),
            Err(err) => GeocodeOutcome::Transport(err.without_url().to_string()),
        }
    }
}

#[async_trait]
impl ReverseGeocoder for GoogleGeocoder {
    fn name(&self) -> &str {
        "Google Geocoding"
    }

    async fn reverse_geocode(&self, coords: Coordinates) -> GeocodeOutcome {
        let outcome = self.request(coords).await;
        match &outcome {
            GeocodeOutcome::Found(address) => {
                debug!(lat = coords.latitude, lon = coords.longitude, %address, "Address found");
            }
            GeocodeOutcome::NoResults { status } => {
                debug!(
                    lat = coords.latitude,
                    lon = coords.longitude,
                    status = status.as_deref().unwrap_or("-"),
                    "Reverse geocoding returned no results"
                );
            }
            GeocodeOutcome::HttpStatus(code) => {
                warn!(
                    lat = coords.latitude,
                    lon = coords.longitude,
                    code,
                    "Reverse geocoding returned an HTTP error"
                );
            }
            GeocodeOutcome::Transport(err) => {
                warn!(
                    lat = coords.latitude,
                    lon = coords.longitude,
                    error = %err,
                    "Reverse geocoding request failed"
                );
            }
        }
        outcome
    }
}

/// Picks the first `formatted_address` out of a Geocoding API JSON body.
fn parse_response(body: &str) -> GeocodeOutcome {
    let parsed: GeocodeResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(err) => return GeocodeOutcome::Transport(format!("invalid JSON: {err}")),
    };

    if let Some(message) = &parsed.error_message {
        debug!(%message, "Geocoding API error message");
    }

    match parsed.results.into_iter().next() {
        Some(GeocodeResult { formatted_address: Some(address) }) => GeocodeOutcome::Found(address),
        _ => GeocodeOutcome::NoResults { status: parsed.status },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode as AxumStatus, routing::get, Router};
    use tokio::net::TcpListener;

    const MADRID: Coordinates = Coordinates { latitude: 40.4168, longitude: -3.7038 };

    async fn stub_server(status: AxumStatus, body: &'static str) -> String {
        let app = Router::new().route(
            "/geocode/json",
            get(move || async move { (status, body) }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/geocode/json")
    }

    #[test]
    fn test_parse_response_first_result() {
        let body = r#"{
            "results": [
                {"formatted_address": "Puerta del Sol, Madrid, Spain"},
                {"formatted_address": "Madrid, Spain"}
            ],
            "status": "OK"
        }"#;
        assert_eq!(
            parse_response(body),
            GeocodeOutcome::Found("Puerta del Sol, Madrid, Spain".to_string())
        );
    }

    #[test]
    fn test_parse_response_empty_results() {
        let body = r#"{"results": [], "status": "ZERO_RESULTS"}"#;
        assert_eq!(
            parse_response(body),
            GeocodeOutcome::NoResults { status: Some("ZERO_RESULTS".to_string()) }
        );
    }

    #[test]
    fn test_parse_response_denied_key() {
        let body = r#"{"error_message": "The provided API key is invalid.", "results": [], "status": "REQUEST_DENIED"}"#;
        assert!(parse_response(body).into_address().is_none());
    }

    #[test]
    fn test_parse_response_result_without_address() {
        let body = r#"{"results": [{"place_id": "abc"}], "status": "OK"}"#;
        assert!(matches!(parse_response(body), GeocodeOutcome::NoResults { .. }));
    }

    #[test]
    fn test_parse_response_invalid_json() {
        assert!(matches!(parse_response("<html>"), GeocodeOutcome::Transport(_)));
    }

    #[tokio::test]
    async fn test_reverse_geocode_success() {
        let endpoint = stub_server(
            AxumStatus::OK,
            r#"{"results": [{"formatted_address": "Calle Mayor, Madrid"}], "status": "OK"}"#,
        )
        .await;
        let geocoder = GoogleGeocoder::new(Client::new(), endpoint, "test-key");

        let outcome = geocoder.reverse_geocode(MADRID).await;
        assert_eq!(outcome.into_address().as_deref(), Some("Calle Mayor, Madrid"));
    }

    #[tokio::test]
    async fn test_reverse_geocode_server_error_yields_no_address() {
        let endpoint = stub_server(AxumStatus::INTERNAL_SERVER_ERROR, "boom").await;
        let geocoder = GoogleGeocoder::new(Client::new(), endpoint, "test-key");

        let outcome = geocoder.reverse_geocode(MADRID).await;
        assert_eq!(outcome, GeocodeOutcome::HttpStatus(500));
        assert!(outcome.into_address().is_none());
    }

    #[tokio::test]
    async fn test_reverse_geocode_empty_results_yields_no_address() {
        let endpoint = stub_server(AxumStatus::OK, r#"{"results": [], "status": "ZERO_RESULTS"}"#).await;
        let geocoder = GoogleGeocoder::new(Client::new(), endpoint, "test-key");

        let outcome = geocoder.reverse_geocode(MADRID).await;
        assert!(matches!(outcome, GeocodeOutcome::NoResults { .. }));
        assert!(outcome.into_address().is_none());
    }

    #[tokio::test]
    async fn test_reverse_geocode_unreachable_host() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let geocoder = GoogleGeocoder::new(
            Client::new(),
            format!("http://{addr}/geocode/json"),
            "test-key",
        );
        let outcome = geocoder.reverse_geocode(MADRID).await;
        assert!(matches!(outcome, GeocodeOutcome::Transport(_)));
    }
}
