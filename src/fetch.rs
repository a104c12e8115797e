//! Sequential fetch pass over the keyword list
//!
//! Queries the trend provider once per keyword, pausing between requests, and
//! collects every non-empty series into a single [`TrendCache`]. A keyword that
//! fails is logged and recorded; the pass carries on with the next one.

use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

use crate::cache::{CacheError, CacheStore};
use crate::data::{Keyword, KeywordEntry, TrendCache, TrendProvider, TrendRecord};

/// Pause between provider requests
pub const DEFAULT_DELAY: Duration = Duration::from_secs(3);

/// Settings for a fetch pass
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Time to wait between two keywords
    pub delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
        }
    }
}

/// Outcome of a fetch pass
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Collected records, ready to be written
    pub cache: TrendCache,
    /// Keywords for which the provider returned no data
    pub empty: Vec<Keyword>,
    /// Keywords whose request failed, with the error message
    pub failed: Vec<(Keyword, String)>,
}

impl FetchReport {
    /// Total number of data points collected
    pub fn total_points(&self) -> usize {
        self.cache.values().map(|r| r.scores.len()).sum()
    }

    /// Earliest and latest date across all records
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.cache.values().filter_map(|r| r.scores.keys().next()).min()?;
        let last = self
            .cache
            .values()
            .filter_map(|r| r.scores.keys().next_back())
            .max()?;
        Some((*first, *last))
    }
}

/// Runs one pass over `entries`, querying `provider` for each keyword in order
pub async fn run_fetch<P>(provider: &P, entries: &[KeywordEntry], options: &FetchOptions) -> FetchReport
where
    P: TrendProvider + ?Sized,
{
    let mut report = FetchReport::default();
    let total = entries.len();

    for (idx, entry) in entries.iter().enumerate() {
        if idx > 0 && !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }

        let keyword = &entry.keyword;
        tracing::info!(
            keyword = %keyword,
            category = entry.category.as_deref().unwrap_or("-"),
            "[{}/{}] fetching",
            idx + 1,
            total
        );

        match provider.interest_over_time(keyword).await {
            Ok(points) if points.is_empty() => {
                tracing::warn!(keyword = %keyword, "no data returned");
                report.empty.push(keyword.clone());
            }
            Ok(points) => {
                tracing::info!(keyword = %keyword, points = points.len(), "fetched");
                let record = TrendRecord::from_points(entry.category.clone(), &points);
                report.cache.insert(keyword.clone(), record);
            }
            Err(e) => {
                tracing::error!(keyword = %keyword, error = %e, "fetch failed");
                report.failed.push((keyword.clone(), e.to_string()));
            }
        }
    }

    report
}

/// Errors that end a cache refresh without writing
#[derive(Debug, Error)]
pub enum RefreshError {
    /// Every keyword failed or came back empty
    #[error("no keyword returned trend data ({failed} failed, {empty} empty); left {path} untouched")]
    NoData {
        failed: usize,
        empty: usize,
        path: String,
    },

    /// Writing the cache file failed
    #[error("could not write trend cache: {0}")]
    Cache(#[from] CacheError),
}

/// Runs a fetch pass and replaces the cache file with its results
///
/// The file is only written when at least one keyword produced data; an
/// all-failed pass leaves the previous cache as it was.
pub async fn refresh_cache(
    provider: &dyn TrendProvider,
    entries: &[KeywordEntry],
    options: &FetchOptions,
    store: &CacheStore,
) -> Result<FetchReport, RefreshError> {
    let report = run_fetch(provider, entries, options).await;

    if report.cache.is_empty() {
        return Err(RefreshError::NoData {
            failed: report.failed.len(),
            empty: report.empty.len(),
            path: store.path().display().to_string(),
        });
    }

    store.write(&report.cache)?;
    Ok(report)
}
