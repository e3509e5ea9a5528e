//! Crawl configuration from environment variables.
//!
//! Every knob has a default matching the reference crawl, so a bare
//! environment works out of the box.

use std::path::PathBuf;

use crate::ConfigError;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Per-request timeout for content fetches.
    pub timeout_secs: u64,
    /// Total attempts per fetch (first try included) on transient failures.
    pub max_attempts: u32,
    /// Listings with more pages than this are district-partitioned instead
    /// of paged through directly.
    pub page_threshold: u32,
    /// Districts per filtered-listing batch.
    pub district_batch_size: usize,
    /// Politeness delay between top-level page fetches.
    pub inter_request_delay_ms: u64,
    pub user_agent: String,
    pub cities_path: PathBuf,
    pub output_dir: PathBuf,
}

/// Load crawl configuration from the process environment.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading
/// env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable fails to parse.
pub fn load_crawl_config() -> Result<CrawlConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_crawl_config_from_env()
}

/// Load crawl configuration from env vars already in the process.
///
/// Unlike [`load_crawl_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable fails to parse.
pub fn load_crawl_config_from_env() -> Result<CrawlConfig, ConfigError> {
    build_crawl_config(|key| std::env::var(key))
}

/// Build the configuration using the provided env-var lookup function.
///
/// The parsing logic is decoupled from the actual environment so it can be
/// tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_crawl_config<F>(lookup: F) -> Result<CrawlConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let district_batch_size = parse_usize("DOCDIR_DISTRICT_BATCH_SIZE", "10")?;
    if district_batch_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "DOCDIR_DISTRICT_BATCH_SIZE".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(CrawlConfig {
        timeout_secs: parse_u64("DOCDIR_TIMEOUT_SECS", "10")?,
        max_attempts: parse_u32("DOCDIR_MAX_ATTEMPTS", "3")?,
        page_threshold: parse_u32("DOCDIR_PAGE_THRESHOLD", "500")?,
        district_batch_size,
        inter_request_delay_ms: parse_u64("DOCDIR_INTER_REQUEST_DELAY_MS", "0")?,
        user_agent: or_default(
            "DOCDIR_USER_AGENT",
            "docdir/0.1 (directory research crawler)",
        ),
        cities_path: PathBuf::from(or_default("DOCDIR_CITIES_PATH", "data/cities.json")),
        output_dir: PathBuf::from(or_default("DOCDIR_OUTPUT_DIR", "data")),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
