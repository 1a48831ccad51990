//! Geoprobe CLI Application
//!
//! A command-line interface for load-testing Wi-Fi geolocation APIs.
//! Dispatches a configurable volume of concurrent geolocate requests,
//! writes successful fixes to a CSV file, and prints a status summary.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use geoprobe_lib::{load_env_config, Dispatcher, ProbeConfig};
use std::process;
use std::time::Duration;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for geoprobe
#[derive(Parser, Debug)]
#[command(name = "geoprobe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Load-test a Wi-Fi geolocation API with synthetic BSSID lookups")]
#[command(
    long_about = "Dispatches a configurable number of concurrent geolocate requests with \
randomly generated BSSIDs, records per-request outcomes, writes successful fixes to a CSV \
file, and prints a per-status tally.\n\nSettings resolve as: CLI flag > GEOPROBE_* env var > default."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Total number of requests to dispatch (default: 1000)
    #[arg(short = 'n', long = "requests", value_name = "COUNT")]
    pub requests: Option<usize>,

    /// Maximum number of requests in flight at once (default: 20)
    #[arg(short = 'c', long = "concurrency", value_name = "LIMIT")]
    pub concurrency: Option<usize>,

    /// Output CSV file, truncated at the start of each run
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = "results.csv"
    )]
    pub output: String,

    /// Geolocation endpoint to probe
    #[arg(long = "endpoint", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds (default: 5)
    #[arg(long = "timeout", value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Print the run report as JSON instead of the styled summary
    #[arg(short = 'j', long = "json")]
    pub json: bool,

    /// Suppress the header and spinner, print only the summary
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Show configuration resolution details
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level probe diagnostics on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Validate arguments
    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // Set up probe diagnostics if requested
    if args.debug {
        use tracing_subscriber::EnvFilter;
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("geoprobe_lib=debug")),
            )
            .init();
    }

    // Run the probe dispatch
    if let Err(e) = run_probe(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    if args.requests == Some(0) {
        return Err("--requests must be at least 1".to_string());
    }

    if args.concurrency == Some(0) {
        return Err("--concurrency must be at least 1".to_string());
    }

    if args.timeout == Some(0) {
        return Err("--timeout must be at least 1 second".to_string());
    }

    if args.json && args.verbose {
        return Err("Cannot use --verbose with --json (it would corrupt the JSON output)".to_string());
    }

    Ok(())
}

/// Build a ProbeConfig from CLI arguments with environment integration.
///
/// Precedence order (highest to lowest):
/// 1. CLI arguments (explicit user input)
/// 2. Environment variables (GEOPROBE_*)
/// 3. Built-in defaults
fn build_config(args: &Args) -> ProbeConfig {
    let env_config = load_env_config(args.verbose);
    let mut config = ProbeConfig::default();

    if let Some(requests) = args.requests.or(env_config.requests) {
        config = config.with_requests(requests);
    }
    if let Some(concurrency) = args.concurrency.or(env_config.concurrency) {
        config = config.with_concurrency(concurrency);
    }
    if let Some(endpoint) = args.endpoint.clone().or(env_config.endpoint) {
        config = config.with_endpoint(endpoint);
    }
    if let Some(timeout) = args.timeout.map(Duration::from_secs).or(env_config.timeout) {
        config = config.with_timeout(timeout);
    }

    config
}

/// Dispatch the configured run and print its report.
async fn run_probe(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(&args);
    let dispatcher = Dispatcher::with_config(config)?;

    if !args.json && !args.quiet {
        ui::print_header(dispatcher.config(), &args.output);
    }

    // Spinner while the run is in flight (stderr only, TTY only)
    let spinner = if !args.json && !args.quiet {
        ui::Spinner::start(format!(
            "Dispatching {} requests...",
            dispatcher.config().requests
        ))
    } else {
        None
    };

    let result = dispatcher.run_to_path(&args.output).await;

    if let Some(s) = spinner {
        s.stop().await;
    }

    let report = result?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        ui::print_summary(&report, &args.output);
    }

    Ok(())
}
