//! Core data models for trendcache
//!
//! This module contains the types shared by the fetcher and the query API:
//! keyword input rows, provider time series, and the cache file layout.

pub mod google_trends;
pub mod keywords;

pub use google_trends::{GoogleTrendsClient, ProviderError, TrendsQuery};
pub use keywords::{load_keywords, parse_keywords, KeywordsError};

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A search term tracked for trend popularity
pub type Keyword = String;

/// One row of the keyword input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordEntry {
    /// Free-form grouping label from the first column, if present
    pub category: Option<String>,
    /// The search term itself
    pub keyword: Keyword,
}

/// A single popularity score reported by the provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    /// Day the score applies to
    pub date: NaiveDate,
    /// Relative popularity, 0 to 100
    pub score: f64,
}

/// Time-indexed popularity scores for one keyword
///
/// Scores are keyed by date, so iteration is chronological.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    /// Category copied from the keyword input row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Popularity score per day
    #[serde(default)]
    pub scores: BTreeMap<NaiveDate, f64>,
}

impl TrendRecord {
    /// Builds a record from provider points, keeping the last score seen per date
    pub fn from_points(category: Option<String>, points: &[TrendPoint]) -> Self {
        let scores = points.iter().map(|p| (p.date, p.score)).collect();
        Self { category, scores }
    }

    /// Whether the record holds no scores
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// The full contents of the cache file: keyword to record
pub type TrendCache = BTreeMap<Keyword, TrendRecord>;

/// Source of trend time series for a keyword
///
/// Implemented by [`GoogleTrendsClient`] in production and by fakes in tests.
#[async_trait]
pub trait TrendProvider: Send + Sync {
    /// Fetches interest-over-time scores for a single keyword
    ///
    /// An empty vector means the provider had no data for the keyword.
    async fn interest_over_time(&self, keyword: &str) -> Result<Vec<TrendPoint>, ProviderError>;
}
