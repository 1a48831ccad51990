//! Core data types for geolocation probing.
//!
//! This module defines the main data structures used throughout the library:
//! probe configuration, per-request outcomes, decoded location fixes,
//! CSV result rows, and the final run report.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Default geolocation endpoint probed when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.beacondb.net/v1/geolocate";

/// Signal strength (dBm) reported for every synthetic access point.
pub const DEFAULT_SIGNAL_STRENGTH: i32 = -50;

/// Status category of a single probe.
///
/// Either the HTTP status code the server answered with, or a single
/// sentinel for every transport-level failure (connection refused, timeout,
/// DNS failure, malformed response body). The sentinel is deliberately
/// distinct from any HTTP code so tallies never conflate the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusCategory {
    /// Server answered with this HTTP status code
    Http(u16),

    /// Transport-level failure, no HTTP status available
    Network,
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusCategory::Http(code) => write!(f, "{}", code),
            StatusCategory::Network => write!(f, "network_error"),
        }
    }
}

// Serialized as the display string so it can key a JSON map.
impl Serialize for StatusCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Location fields decoded from an HTTP 200 response body.
///
/// Every field is optional: the server may answer 200 with any subset of
/// them, and a missing field simply yields an empty CSV column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LocationFix {
    /// Latitude from the `location.lat` field
    pub lat: Option<f64>,

    /// Longitude from `location.lng`, falling back to `location.lon`
    pub lon: Option<f64>,

    /// Top-level `accuracy` field, in meters
    pub accuracy: Option<f64>,
}

/// Result of a single dispatched probe.
///
/// Immutable once produced. Every failure path inside the probe resolves
/// to one of these; errors never escape the work unit.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    /// The synthetic BSSID this probe looked up
    pub bssid: String,

    /// HTTP status or the network-error sentinel
    pub status: StatusCategory,

    /// Decoded location fields. `Some` only for HTTP 200 with a
    /// parseable JSON body; the fields inside may still be `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<LocationFix>,
}

/// One line of the CSV output sink.
///
/// Append-only: rows are written once per successful outcome and never
/// updated or deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    /// The BSSID that produced this fix
    pub bssid: String,

    /// Latitude, empty column when absent
    pub lat: Option<f64>,

    /// Longitude, empty column when absent
    pub lon: Option<f64>,

    /// Accuracy in meters, empty column when absent
    pub accuracy: Option<f64>,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Wall-clock time from first dispatch to last completion
    #[serde(serialize_with = "serialize_duration_secs")]
    pub duration: Duration,

    /// Occurrence count per status category.
    /// The sum of all counts always equals the dispatched request count.
    pub tally: BTreeMap<StatusCategory, u64>,

    /// Number of rows appended to the output sink
    pub rows_written: u64,
}

fn serialize_duration_secs<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

impl RunReport {
    /// Total number of outcomes collected (sum of the tally).
    pub fn total(&self) -> u64 {
        self.tally.values().sum()
    }
}

/// Configuration options for a probing run.
///
/// This struct allows fine-tuning of the dispatch behavior, including
/// volume, concurrency, timeout, and target endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Total number of requests to dispatch
    /// Default: 1000
    pub requests: usize,

    /// Maximum number of probes simultaneously in flight
    /// Default: 20, floored at 1
    pub concurrency: usize,

    /// Timeout for each individual network call
    /// Default: 5 seconds
    #[serde(skip)] // Don't serialize Duration directly
    pub timeout: Duration,

    /// Geolocation endpoint to POST against
    pub endpoint: String,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Signal strength embedded in every payload
    /// Default: -50 dBm
    pub signal_strength: i32,
}

impl Default for ProbeConfig {
    /// Create a sensible default configuration.
    ///
    /// These defaults match the reference probing setup: 1000 requests,
    /// 20 in flight, 5 second timeout against the public endpoint.
    fn default() -> Self {
        Self {
            requests: 1000,
            concurrency: 20,
            timeout: Duration::from_secs(5),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: format!("geoprobe/{}", env!("CARGO_PKG_VERSION")),
            signal_strength: DEFAULT_SIGNAL_STRENGTH,
        }
    }
}

impl ProbeConfig {
    /// Set the total number of requests to dispatch.
    pub fn with_requests(mut self, requests: usize) -> Self {
        self.requests = requests;
        self
    }

    /// Set the concurrency limit. Floored at 1 so the dispatch stream
    /// always makes progress.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the per-call network timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the geolocation endpoint URL.
    pub fn with_endpoint<E: Into<String>>(mut self, endpoint: E) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the signal strength embedded in payloads.
    pub fn with_signal_strength(mut self, dbm: i32) -> Self {
        self.signal_strength = dbm;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_category_display() {
        assert_eq!(StatusCategory::Http(200).to_string(), "200");
        assert_eq!(StatusCategory::Http(429).to_string(), "429");
        assert_eq!(StatusCategory::Network.to_string(), "network_error");
    }

    #[test]
    fn test_status_category_ordering_puts_network_last() {
        let mut tally: BTreeMap<StatusCategory, u64> = BTreeMap::new();
        tally.insert(StatusCategory::Network, 1);
        tally.insert(StatusCategory::Http(429), 2);
        tally.insert(StatusCategory::Http(200), 3);

        let keys: Vec<StatusCategory> = tally.keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                StatusCategory::Http(200),
                StatusCategory::Http(429),
                StatusCategory::Network,
            ]
        );
    }

    #[test]
    fn test_config_concurrency_floored_at_one() {
        let config = ProbeConfig::default().with_concurrency(0);
        assert_eq!(config.concurrency, 1);
    }

    #[test]
    fn test_report_total_sums_tally() {
        let mut tally = BTreeMap::new();
        tally.insert(StatusCategory::Http(200), 7);
        tally.insert(StatusCategory::Network, 3);
        let report = RunReport {
            duration: Duration::from_millis(10),
            tally,
            rows_written: 7,
        };
        assert_eq!(report.total(), 10);
    }

    #[test]
    fn test_report_serializes_with_string_status_keys() {
        let mut tally = BTreeMap::new();
        tally.insert(StatusCategory::Http(200), 2);
        tally.insert(StatusCategory::Network, 1);
        let report = RunReport {
            duration: Duration::from_secs(1),
            tally,
            rows_written: 2,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["tally"]["200"], 2);
        assert_eq!(json["tally"]["network_error"], 1);
        assert_eq!(json["rows_written"], 2);
    }
}
