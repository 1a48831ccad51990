//! # Geoprobe Library
//!
//! A concurrent load and probing library for Wi-Fi geolocation APIs.
//!
//! The library dispatches a configurable number of independent geolocate
//! requests with a bounded number in flight, collects every outcome in
//! completion order, appends successful fixes to a CSV sink, and reports
//! a per-status tally plus wall-clock duration.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use geoprobe_lib::{Dispatcher, ProbeConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProbeConfig::default()
//!         .with_requests(1000)
//!         .with_concurrency(20);
//!
//!     let dispatcher = Dispatcher::with_config(config)?;
//!     let report = dispatcher.run_to_path("results.csv").await?;
//!
//!     println!("{} outcomes, {} fixes written", report.total(), report.rows_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Design
//!
//! - **No retries**: a failed probe is tallied and dropped.
//! - **No escaped errors per probe**: transport failures, timeouts, and
//!   malformed responses all resolve to `Outcome` values.
//! - **Single consumer**: completions are drained one at a time, so the
//!   tally and sink need no locking.
//! - **Fatal only up front**: an unopenable output sink aborts before any
//!   dispatch; after that, a run always finishes.

// Re-export main public API types and functions
// This makes them available as geoprobe_lib::TypeName
pub use client::{extract_location_fix, GeolocateClient};
pub use config::{load_env_config, EnvConfig};
pub use dispatcher::Dispatcher;
pub use error::ProbeError;
pub use sink::{CsvSink, HEADER as CSV_HEADER};
pub use types::{
    LocationFix, Outcome, ProbeConfig, ResultRow, RunReport, StatusCategory, DEFAULT_ENDPOINT,
    DEFAULT_SIGNAL_STRENGTH,
};

// Public modules
pub mod bssid;

// Internal modules - these are not part of the public API
mod client;
mod config;
mod dispatcher;
mod error;
mod sink;
mod types;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, ProbeError>;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
