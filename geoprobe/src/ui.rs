//! Console display logic for the geoprobe CLI.
//!
//! This module handles the run header, the stderr spinner shown while a
//! run is in flight, and the end-of-run summary. Uses only the `console`
//! crate (already a dependency).

use console::{style, Term};
use geoprobe_lib::{ProbeConfig, RunReport, StatusCategory};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ── Spinner ──────────────────────────────────────────────────────────────────

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// An async braille-dot spinner that writes to stderr so stdout stays clean.
pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    /// Start a new spinner with the given message (e.g. "Dispatching 1000
    /// requests..."). Returns `None` if stderr isn't a TTY.
    pub fn start(message: String) -> Option<Self> {
        let term = Term::stderr();
        if !term.is_term() {
            return None;
        }

        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let handle = tokio::spawn(async move {
            let mut idx = 0usize;
            while running_clone.load(Ordering::Relaxed) {
                let frame = SPINNER_FRAMES[idx % SPINNER_FRAMES.len()];
                let _ = term.clear_line();
                let _ = term.write_str(&format!("{} {}", style(frame).cyan(), message));
                idx += 1;
                tokio::time::sleep(Duration::from_millis(80)).await;
            }
            let _ = term.clear_line();
        });

        Some(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Stop the spinner and clear the line.
    pub async fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(h) = self.handle.take() {
            let _ = h.await;
        }
    }
}

// ── Header ───────────────────────────────────────────────────────────────────

/// Print a styled header at the start of a run.
pub fn print_header(config: &ProbeConfig, output: &str) {
    println!(
        "{} {} {}",
        style("geoprobe").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "- {} requests, {} in flight",
            config.requests, config.concurrency
        ))
        .dim(),
    );
    println!("  Endpoint: {}", style(&config.endpoint).cyan());
    println!("  Output:   {}", style(output).cyan());
    println!();
}

// ── Summary ──────────────────────────────────────────────────────────────────

/// Print the end-of-run summary: duration, status tally, rows written.
pub fn print_summary(report: &RunReport, output: &str) {
    println!(
        "  {}",
        style("────────────────────────────────────────────────────").dim()
    );
    println!(
        "  {} request{} in {:.3}s",
        style(report.total()).bold(),
        if report.total() == 1 { "" } else { "s" },
        report.duration.as_secs_f64(),
    );

    println!("  Status tally:");
    for (status, count) in &report.tally {
        println!("    {}: {}", styled_status(*status), count);
    }

    println!(
        "  {} {}",
        style(format!("{} fixes written to", report.rows_written)).green(),
        style(output).cyan(),
    );
}

fn styled_status(status: StatusCategory) -> console::StyledObject<String> {
    let text = status.to_string();
    match status {
        StatusCategory::Http(code) if (200..300).contains(&code) => style(text).green(),
        StatusCategory::Http(code) if (400..500).contains(&code) => style(text).yellow(),
        StatusCategory::Http(_) => style(text).red(),
        StatusCategory::Network => style(text).red(),
    }
}
