//! Geolocation API client.
//!
//! This module performs the single outbound call each probe makes: POST a
//! one-access-point payload to the geolocate endpoint and classify whatever
//! comes back. Every failure path resolves to an `Outcome` value so a bad
//! call can never take down the dispatch loop.

use crate::bssid;
use crate::error::ProbeError;
use crate::types::{LocationFix, Outcome, ProbeConfig, StatusCategory};
use reqwest::StatusCode;
use serde::Serialize;

/// JSON body of a geolocate request.
///
/// Wire shape:
/// `{"wifiAccessPoints": [{"macAddress": "..", "signalStrength": -50}]}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeolocateRequest {
    wifi_access_points: Vec<WifiAccessPoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WifiAccessPoint {
    mac_address: String,
    signal_strength: i32,
}

/// HTTP client for issuing geolocation probes.
///
/// Construction configures the per-call timeout and the fixed User-Agent;
/// after that, `probe_one` is infallible in the `Result` sense.
#[derive(Clone)]
pub struct GeolocateClient {
    /// HTTP client for making geolocate requests
    http_client: reqwest::Client,
    /// Endpoint URL to POST against
    endpoint: String,
    /// Signal strength embedded in every payload
    signal_strength: i32,
}

impl GeolocateClient {
    /// Create a new client from a probe configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProbeError::Client` if the underlying HTTP client cannot
    /// be constructed (e.g. TLS backend initialization failure).
    pub fn with_config(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                ProbeError::client_with_source("Failed to create HTTP client", e.to_string())
            })?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            signal_strength: config.signal_strength,
        })
    }

    /// Issue one probe: generate a BSSID, send it, classify the response.
    ///
    /// Classification:
    /// - HTTP 200 with a parseable JSON body carries a decoded
    ///   `LocationFix` (absent fields stay `None`);
    /// - HTTP 200 with an unparseable body counts as a network error,
    ///   same as any other malformed response;
    /// - any other HTTP status carries just the code;
    /// - transport failures (refused, timeout, DNS) collapse into the
    ///   network sentinel.
    ///
    /// No error escapes this operation.
    pub async fn probe_one(&self) -> Outcome {
        let bssid = bssid::generate();
        let payload = GeolocateRequest {
            wifi_access_points: vec![WifiAccessPoint {
                mac_address: bssid.clone(),
                signal_strength: self.signal_strength,
            }],
        };

        let response = match self
            .http_client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(%bssid, error = %e, "transport failure");
                return Outcome {
                    bssid,
                    status: StatusCategory::Network,
                    fix: None,
                };
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!(%bssid, status = status.as_u16(), "non-200 response");
            return Outcome {
                bssid,
                status: StatusCategory::Http(status.as_u16()),
                fix: None,
            };
        }

        match response.json::<serde_json::Value>().await {
            Ok(body) => Outcome {
                bssid,
                status: StatusCategory::Http(200),
                fix: Some(extract_location_fix(&body)),
            },
            Err(e) => {
                // A 200 we can't decode is as useless as a dropped
                // connection, so it lands in the same bucket.
                tracing::debug!(%bssid, error = %e, "unparseable 200 body");
                Outcome {
                    bssid,
                    status: StatusCategory::Network,
                    fix: None,
                }
            }
        }
    }
}

/// Extract location fields from a geolocate JSON response.
///
/// The body is expected to contain an optional `location` object with
/// `lat` and `lng` (or `lon`) fields, plus an optional top-level
/// `accuracy`. `lng` is preferred over `lon` when both are present.
/// Any missing field simply yields `None`.
pub fn extract_location_fix(json: &serde_json::Value) -> LocationFix {
    let location = json.get("location");

    let lat = location
        .and_then(|loc| loc.get("lat"))
        .and_then(|v| v.as_f64());

    let lon = location
        .and_then(|loc| loc.get("lng").or_else(|| loc.get("lon")))
        .and_then(|v| v.as_f64());

    let accuracy = json.get("accuracy").and_then(|v| v.as_f64());

    LocationFix { lat, lon, accuracy }
}
