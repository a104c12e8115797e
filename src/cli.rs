//! Command-line interface parsing for the trendcache binaries
//!
//! Both binaries take every path and provider parameter as a flag with an
//! environment fallback, so running them bare uses the documented defaults.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::api::ServerConfig;
use crate::data::TrendsQuery;
use crate::fetch::FetchOptions;

/// Default keyword list location
pub const DEFAULT_KEYWORDS_PATH: &str = "keywords.csv";

/// Default cache file location
pub const DEFAULT_CACHE_PATH: &str = "data/trends_cache.json";

/// Default API listen address
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The geo code is neither empty nor a two-letter region
    #[error("Invalid geo code: '{0}'. Use a two-letter region code such as CA, or an empty string for worldwide")]
    InvalidGeo(String),

    /// The timeframe is blank
    #[error("Timeframe must not be empty")]
    EmptyTimeframe,
}

/// Serve the cached trend data over a read-only JSON API
#[derive(Parser, Debug)]
#[command(name = "trendcache")]
#[command(about = "Read-only JSON API over the trend cache file")]
#[command(version)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "TRENDS_BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind: SocketAddr,

    /// Cache file produced by pull_trends
    #[arg(long, env = "TRENDS_CACHE_PATH", default_value = DEFAULT_CACHE_PATH)]
    pub cache: PathBuf,
}

impl ServeArgs {
    /// Converts parsed arguments into server settings
    pub fn into_config(self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cache_path: self.cache,
        }
    }
}

/// Fetch trend data for every keyword in the keyword list and write the cache file
#[derive(Parser, Debug)]
#[command(name = "pull_trends")]
#[command(about = "Fetch trend data for each keyword and write the cache file")]
#[command(version)]
pub struct PullArgs {
    /// Keyword list: CSV rows of `category,keyword`, no header
    #[arg(long, env = "TRENDS_KEYWORDS_PATH", default_value = DEFAULT_KEYWORDS_PATH)]
    pub keywords: PathBuf,

    /// Cache file to write
    #[arg(long, env = "TRENDS_CACHE_PATH", default_value = DEFAULT_CACHE_PATH)]
    pub output: PathBuf,

    /// Time window to request, e.g. "today 3-m" or "today 12-m"
    #[arg(long, env = "TRENDS_TIMEFRAME", default_value = "today 3-m")]
    pub timeframe: String,

    /// Two-letter region code; empty for worldwide
    #[arg(long, env = "TRENDS_GEO", default_value = "CA")]
    pub geo: String,

    /// Seconds to wait between keywords
    #[arg(long, env = "TRENDS_DELAY_SECS", default_value_t = 3)]
    pub delay_secs: u64,
}

/// Settings derived from `PullArgs` for a fetch run
#[derive(Debug, Clone)]
pub struct PullConfig {
    pub keywords_path: PathBuf,
    pub output_path: PathBuf,
    pub query: TrendsQuery,
    pub options: FetchOptions,
}

/// Validates a region code
///
/// # Returns
/// * `Ok(String)` with the code upper-cased
/// * `Err(CliError::InvalidGeo)` if it is not empty or two ASCII letters
pub fn parse_geo(s: &str) -> Result<String, CliError> {
    let geo = s.trim();
    if geo.is_empty() {
        return Ok(String::new());
    }
    if geo.len() == 2 && geo.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(geo.to_ascii_uppercase())
    } else {
        Err(CliError::InvalidGeo(s.to_string()))
    }
}

impl PullConfig {
    /// Creates a PullConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(PullConfig)` with validated settings
    /// * `Err(CliError)` if the geo code or timeframe is unusable
    pub fn from_args(args: &PullArgs) -> Result<Self, CliError> {
        let timeframe = args.timeframe.trim();
        if timeframe.is_empty() {
            return Err(CliError::EmptyTimeframe);
        }

        Ok(PullConfig {
            keywords_path: args.keywords.clone(),
            output_path: args.output.clone(),
            query: TrendsQuery {
                timeframe: timeframe.to_string(),
                geo: parse_geo(&args.geo)?,
                ..TrendsQuery::default()
            },
            options: FetchOptions {
                delay: Duration::from_secs(args.delay_secs),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_geo_accepts_region_codes() {
        assert_eq!(parse_geo("CA").unwrap(), "CA");
        assert_eq!(parse_geo("us").unwrap(), "US");
        assert_eq!(parse_geo("").unwrap(), "");
    }

    #[test]
    fn test_parse_geo_invalid() {
        let err = parse_geo("Canada").unwrap_err();
        assert!(err.to_string().contains("Invalid geo code"));
        assert!(err.to_string().contains("Canada"));
    }

    #[test]
    fn test_serve_args_parse_flags() {
        let args = ServeArgs::parse_from([
            "trendcache",
            "--bind",
            "0.0.0.0:9000",
            "--cache",
            "/tmp/cache.json",
        ]);
        let config = args.into_config();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.cache_path, PathBuf::from("/tmp/cache.json"));
    }

    #[test]
    fn test_pull_args_parse_flags() {
        let args = PullArgs::parse_from([
            "pull_trends",
            "--keywords",
            "kw.csv",
            "--output",
            "out.json",
            "--timeframe",
            "today 12-m",
            "--geo",
            "us",
            "--delay-secs",
            "0",
        ]);
        let config = PullConfig::from_args(&args).unwrap();

        assert_eq!(config.keywords_path, PathBuf::from("kw.csv"));
        assert_eq!(config.output_path, PathBuf::from("out.json"));
        assert_eq!(config.query.timeframe, "today 12-m");
        assert_eq!(config.query.geo, "US");
        assert_eq!(config.options.delay, Duration::ZERO);
    }

    #[test]
    fn test_pull_config_rejects_blank_timeframe() {
        let args = PullArgs::parse_from(["pull_trends", "--timeframe", "  "]);
        assert!(matches!(
            PullConfig::from_args(&args),
            Err(CliError::EmptyTimeframe)
        ));
    }

    #[test]
    fn test_pull_config_rejects_bad_geo() {
        let args = PullArgs::parse_from(["pull_trends", "--geo", "XYZ"]);
        assert!(PullConfig::from_args(&args).is_err());
    }
}
