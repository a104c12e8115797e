//! Google Trends client for interest-over-time data
//!
//! Talks to the public Trends web endpoints in two steps: an `explore` call
//! that hands out a widget token for the requested keyword, then a
//! `widgetdata/multiline` call that returns the time series for that token.
//! Both responses are prefixed with an anti-XSSI guard that is stripped before
//! parsing.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use super::{TrendPoint, TrendProvider};

/// Default base URL of the Trends service
const DEFAULT_BASE_URL: &str = "https://trends.google.com/trends";

/// Widget id carrying the interest-over-time series
const TIMESERIES_WIDGET_ID: &str = "TIMESERIES";

/// Errors that can occur when fetching trend data
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Trends service returned status {0}")]
    Status(u16),

    /// Failed to parse API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),
}

/// Query parameters shared by every keyword in a fetch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendsQuery {
    /// Time window, in the service's own syntax (e.g. `today 3-m`)
    pub timeframe: String,
    /// Two-letter region code; empty for worldwide
    pub geo: String,
    /// Interface language
    pub language: String,
    /// Timezone offset in minutes, as the service expects it
    pub tz_offset: i32,
}

impl Default for TrendsQuery {
    fn default() -> Self {
        Self {
            timeframe: "today 3-m".to_string(),
            geo: "CA".to_string(),
            language: "en-US".to_string(),
            tz_offset: 360,
        }
    }
}

/// Response of the explore endpoint
#[derive(Debug, Deserialize)]
struct ExploreResponse {
    #[serde(default)]
    widgets: Vec<Widget>,
}

/// A single widget descriptor from the explore endpoint
#[derive(Debug, Deserialize)]
struct Widget {
    id: String,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    request: Option<Value>,
}

/// Response of the multiline widget endpoint
#[derive(Debug, Deserialize)]
struct MultilineResponse {
    default: MultilineData,
}

#[derive(Debug, Deserialize)]
struct MultilineData {
    #[serde(rename = "timelineData", default)]
    timeline_data: Vec<TimelineEntry>,
}

/// One sample in the timeline
#[derive(Debug, Deserialize)]
struct TimelineEntry {
    /// Unix timestamp in seconds, sent as a string
    time: String,
    /// One score per compared keyword
    #[serde(default)]
    value: Vec<f64>,
    /// Whether each score is backed by data
    #[serde(rename = "hasData", default)]
    has_data: Vec<bool>,
}

/// Client for fetching interest-over-time series from Google Trends
#[derive(Debug, Clone)]
pub struct GoogleTrendsClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Parameters applied to every keyword
    query: TrendsQuery,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl Default for GoogleTrendsClient {
    fn default() -> Self {
        Self::new(TrendsQuery::default())
    }
}

impl GoogleTrendsClient {
    /// Creates a new client for the given query parameters
    pub fn new(query: TrendsQuery) -> Self {
        Self {
            http_client: Client::new(),
            query,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the service base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns the query parameters used for every keyword
    pub fn query(&self) -> &TrendsQuery {
        &self.query
    }

    /// Builds the `req` payload for the explore endpoint
    fn explore_payload(&self, keyword: &str) -> Value {
        json!({
            "comparisonItem": [{
                "keyword": keyword,
                "time": self.query.timeframe,
                "geo": self.query.geo,
            }],
            "category": 0,
            "property": "",
        })
    }

    /// Fetches a guarded JSON body and returns it with the guard removed
    async fn get_guarded(&self, url: &str, params: &[(&str, String)]) -> Result<String, ProviderError> {
        let response = self.http_client.get(url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(strip_guard(&body).to_string())
    }

    /// Resolves the TIMESERIES widget token and request for a keyword
    async fn explore(&self, keyword: &str) -> Result<Option<(String, Value)>, ProviderError> {
        let url = format!("{}/api/explore", self.base_url);
        let params = [
            ("hl", self.query.language.clone()),
            ("tz", self.query.tz_offset.to_string()),
            ("req", self.explore_payload(keyword).to_string()),
        ];

        let body = self.get_guarded(&url, &params).await?;
        parse_explore(&body)
    }

    /// Fetches the time series behind a widget token
    async fn multiline(&self, token: String, request: &Value) -> Result<Vec<TrendPoint>, ProviderError> {
        let url = format!("{}/api/widgetdata/multiline", self.base_url);
        let params = [
            ("hl", self.query.language.clone()),
            ("tz", self.query.tz_offset.to_string()),
            ("req", request.to_string()),
            ("token", token),
        ];

        let body = self.get_guarded(&url, &params).await?;
        parse_multiline(&body)
    }
}

#[async_trait]
impl TrendProvider for GoogleTrendsClient {
    async fn interest_over_time(&self, keyword: &str) -> Result<Vec<TrendPoint>, ProviderError> {
        match self.explore(keyword).await? {
            Some((token, request)) => self.multiline(token, &request).await,
            None => Ok(Vec::new()),
        }
    }
}

/// Removes the `)]}'` prefix the service puts in front of JSON bodies
fn strip_guard(body: &str) -> &str {
    match body.find(['{', '[']) {
        Some(start) => &body[start..],
        None => body,
    }
}

/// Extracts the TIMESERIES widget token and request from an explore body
fn parse_explore(body: &str) -> Result<Option<(String, Value)>, ProviderError> {
    let response: ExploreResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::ParseError(format!("explore response: {}", e)))?;

    let widget = response
        .widgets
        .into_iter()
        .find(|w| w.id == TIMESERIES_WIDGET_ID);

    match widget {
        Some(Widget {
            token: Some(token),
            request: Some(request),
            ..
        }) => Ok(Some((token, request))),
        Some(_) => Err(ProviderError::ParseError(
            "TIMESERIES widget is missing its token or request".to_string(),
        )),
        None => Ok(None),
    }
}

/// Converts a multiline body into daily points, dropping samples without data
fn parse_multiline(body: &str) -> Result<Vec<TrendPoint>, ProviderError> {
    let response: MultilineResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::ParseError(format!("multiline response: {}", e)))?;

    let mut points = Vec::with_capacity(response.default.timeline_data.len());
    for entry in response.default.timeline_data {
        if !entry.has_data.first().copied().unwrap_or(true) {
            continue;
        }
        let Some(score) = entry.value.first().copied() else {
            continue;
        };
        points.push(TrendPoint {
            date: parse_timestamp(&entry.time)?,
            score,
        });
    }

    Ok(points)
}

/// Parses a unix-seconds string into a UTC calendar date
fn parse_timestamp(time: &str) -> Result<NaiveDate, ProviderError> {
    let secs: i64 = time
        .parse()
        .map_err(|e| ProviderError::ParseError(format!("Invalid timestamp '{}': {}", time, e)))?;
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| ProviderError::ParseError(format!("Timestamp out of range: {}", time)))
}
