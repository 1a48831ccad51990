//! Bounded-concurrency probe dispatcher.
//!
//! This module provides the primary `Dispatcher` struct that fires N
//! independent probes with at most T in flight, drains their outcomes in
//! completion order through a single consumer loop, tallies status
//! categories, and appends successful fixes to the CSV sink.

use crate::client::GeolocateClient;
use crate::error::ProbeError;
use crate::sink::CsvSink;
use crate::types::{Outcome, ProbeConfig, ResultRow, RunReport, StatusCategory};
use futures::stream::StreamExt;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

/// Dispatcher that coordinates a probing run.
///
/// # Example
///
/// ```rust,no_run
/// use geoprobe_lib::{Dispatcher, ProbeConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ProbeConfig::default().with_requests(100).with_concurrency(10);
///     let dispatcher = Dispatcher::with_config(config)?;
///     let report = dispatcher.run_to_path("results.csv").await?;
///     println!("{} outcomes in {:?}", report.total(), report.duration);
///     Ok(())
/// }
/// ```
pub struct Dispatcher {
    /// Configuration settings for this dispatcher instance
    config: ProbeConfig,
    /// Client used for every probe
    client: GeolocateClient,
}

impl Dispatcher {
    /// Create a dispatcher with default configuration.
    pub fn new() -> Result<Self, ProbeError> {
        Self::with_config(ProbeConfig::default())
    }

    /// Create a dispatcher with custom configuration.
    pub fn with_config(config: ProbeConfig) -> Result<Self, ProbeError> {
        let client = GeolocateClient::with_config(&config)?;
        Ok(Self { config, client })
    }

    /// Get the current configuration for this dispatcher.
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Open the sink at `path`, then run.
    ///
    /// Opening the sink happens before any probe is dispatched: an
    /// unwritable output path aborts the whole run up front.
    pub async fn run_to_path<P: AsRef<Path>>(&self, path: P) -> Result<RunReport, ProbeError> {
        let mut sink = CsvSink::create(path)?;
        self.run(&mut sink).await
    }

    /// Dispatch all configured probes and collect their outcomes.
    ///
    /// Probes run with at most `config.concurrency` in flight
    /// (`buffer_unordered`), and completions are drained one at a time in
    /// completion order. The single consumer is the only writer of the
    /// tally and the sink, so neither needs a lock. There are no retries
    /// and no cancellation: all N probes run to completion.
    ///
    /// # Errors
    ///
    /// Only sink write failures abort a run; probe failures of any kind
    /// are tallied as outcomes.
    pub async fn run(&self, sink: &mut CsvSink) -> Result<RunReport, ProbeError> {
        let started = Instant::now();

        let probes = (0..self.config.requests).map(|_| self.client.probe_one());
        // Floor at 1: buffer_unordered(0) would never make progress.
        let mut completions =
            futures::stream::iter(probes).buffer_unordered(self.config.concurrency.max(1));

        let mut tally: BTreeMap<StatusCategory, u64> = BTreeMap::new();
        let mut rows_written: u64 = 0;

        while let Some(outcome) = completions.next().await {
            *tally.entry(outcome.status).or_insert(0) += 1;

            if let Some(row) = row_for(outcome) {
                sink.write_row(&row)?;
                rows_written += 1;
            }
        }

        sink.flush()?;

        Ok(RunReport {
            duration: started.elapsed(),
            tally,
            rows_written,
        })
    }
}

/// Convert an outcome into a CSV row, if it earned one.
///
/// Only an HTTP 200 with a parseable body carries a fix; everything else
/// is tallied and dropped.
fn row_for(outcome: Outcome) -> Option<ResultRow> {
    let fix = outcome.fix?;
    Some(ResultRow {
        bssid: outcome.bssid,
        lat: fix.lat,
        lon: fix.lon,
        accuracy: fix.accuracy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocationFix;

    #[test]
    fn test_row_for_success_with_fix() {
        let outcome = Outcome {
            bssid: "3F:0A:E2:BB:11:00".to_string(),
            status: StatusCategory::Http(200),
            fix: Some(LocationFix {
                lat: Some(1.5),
                lon: Some(2.5),
                accuracy: Some(10.0),
            }),
        };

        let row = row_for(outcome).unwrap();
        assert_eq!(row.lat, Some(1.5));
        assert_eq!(row.lon, Some(2.5));
        assert_eq!(row.accuracy, Some(10.0));
    }

    #[test]
    fn test_row_for_drops_failures() {
        let outcome = Outcome {
            bssid: "3F:0A:E2:BB:11:00".to_string(),
            status: StatusCategory::Http(429),
            fix: None,
        };
        assert!(row_for(outcome).is_none());

        let outcome = Outcome {
            bssid: "3F:0A:E2:BB:11:00".to_string(),
            status: StatusCategory::Network,
            fix: None,
        };
        assert!(row_for(outcome).is_none());
    }
}
