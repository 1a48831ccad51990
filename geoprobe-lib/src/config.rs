//! Environment-based configuration overrides.
//!
//! The CLI resolves its settings with the precedence:
//! CLI flag > `GEOPROBE_*` environment variable > built-in default.
//! This module handles the middle layer: lenient parsing of the
//! environment, warning (rather than failing) on junk values.

use std::env;
use std::time::Duration;

/// Settings read from `GEOPROBE_*` environment variables.
///
/// Every field is optional; `None` means the variable was unset or
/// unparseable and the next precedence level applies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    /// GEOPROBE_REQUESTS - total request count
    pub requests: Option<usize>,

    /// GEOPROBE_CONCURRENCY - in-flight probe limit
    pub concurrency: Option<usize>,

    /// GEOPROBE_ENDPOINT - geolocate endpoint URL
    pub endpoint: Option<String>,

    /// GEOPROBE_TIMEOUT - per-call timeout in seconds
    pub timeout: Option<Duration>,
}

/// Load configuration overrides from environment variables.
///
/// Invalid values are skipped with a warning when `verbose` is set;
/// they never abort the run.
pub fn load_env_config(verbose: bool) -> EnvConfig {
    let mut env_config = EnvConfig::default();

    // GEOPROBE_REQUESTS - total request count
    if let Ok(val) = env::var("GEOPROBE_REQUESTS") {
        match val.parse::<usize>() {
            Ok(requests) if requests > 0 => {
                env_config.requests = Some(requests);
                if verbose {
                    println!("🔧 Using GEOPROBE_REQUESTS={}", requests);
                }
            }
            _ => {
                if verbose {
                    eprintln!("⚠️ Invalid GEOPROBE_REQUESTS='{}', must be a positive integer", val);
                }
            }
        }
    }

    // GEOPROBE_CONCURRENCY - in-flight probe limit
    if let Ok(val) = env::var("GEOPROBE_CONCURRENCY") {
        match val.parse::<usize>() {
            Ok(concurrency) if concurrency > 0 => {
                env_config.concurrency = Some(concurrency);
                if verbose {
                    println!("🔧 Using GEOPROBE_CONCURRENCY={}", concurrency);
                }
            }
            _ => {
                if verbose {
                    eprintln!("⚠️ Invalid GEOPROBE_CONCURRENCY='{}', must be a positive integer", val);
                }
            }
        }
    }

    // GEOPROBE_ENDPOINT - geolocate endpoint URL
    if let Ok(endpoint) = env::var("GEOPROBE_ENDPOINT") {
        if !endpoint.trim().is_empty() {
            env_config.endpoint = Some(endpoint.clone());
            if verbose {
                println!("🔧 Using GEOPROBE_ENDPOINT={}", endpoint);
            }
        }
    }

    // GEOPROBE_TIMEOUT - per-call timeout in seconds
    if let Ok(val) = env::var("GEOPROBE_TIMEOUT") {
        match val.parse::<u64>() {
            Ok(secs) if secs > 0 => {
                env_config.timeout = Some(Duration::from_secs(secs));
                if verbose {
                    println!("🔧 Using GEOPROBE_TIMEOUT={}s", secs);
                }
            }
            _ => {
                if verbose {
                    eprintln!("⚠️ Invalid GEOPROBE_TIMEOUT='{}', must be a positive integer (seconds)", val);
                }
            }
        }
    }

    env_config
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var tests mutate process state and the harness runs tests in
    // parallel, so each test touches its own variable only.

    #[test]
    fn test_unset_env_yields_defaults() {
        env::remove_var("GEOPROBE_CONCURRENCY");
        env::remove_var("GEOPROBE_ENDPOINT");

        let config = load_env_config(false);
        assert_eq!(config.concurrency, None);
        assert_eq!(config.endpoint, None);
    }

    #[test]
    fn test_invalid_requests_is_skipped() {
        env::set_var("GEOPROBE_REQUESTS", "not-a-number");
        let config = load_env_config(false);
        env::remove_var("GEOPROBE_REQUESTS");

        assert_eq!(config.requests, None);
    }

    #[test]
    fn test_timeout_parsed_as_seconds() {
        env::set_var("GEOPROBE_TIMEOUT", "9");
        let config = load_env_config(false);
        env::remove_var("GEOPROBE_TIMEOUT");

        assert_eq!(config.timeout, Some(Duration::from_secs(9)));
    }
}
