//! Per-keyword aggregates over cached trend records

use chrono::NaiveDate;
use serde::Serialize;

use crate::data::TrendRecord;

/// Score change between first and last point beyond which a trend counts as moving
const DIRECTION_THRESHOLD: f64 = 5.0;

/// Overall movement of a keyword's popularity across the cached window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

/// Aggregate view of one keyword's record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordSummary {
    /// Category copied from the record
    pub category: Option<String>,
    /// Mean score, rounded to one decimal
    pub average_trend: Option<f64>,
    /// Score at the latest date
    pub current_trend: Option<f64>,
    pub trend_direction: TrendDirection,
    pub data_points: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// Classifies a chronological score series by comparing its ends
///
/// Fewer than two scores is always stable.
pub fn trend_direction(scores: &[f64]) -> TrendDirection {
    let (Some(first), Some(last)) = (scores.first(), scores.last()) else {
        return TrendDirection::Stable;
    };
    if scores.len() < 2 {
        return TrendDirection::Stable;
    }

    let change = last - first;
    if change > DIRECTION_THRESHOLD {
        TrendDirection::Up
    } else if change < -DIRECTION_THRESHOLD {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    }
}

/// Computes the summary for a single record
pub fn summarize(record: &TrendRecord) -> KeywordSummary {
    let scores: Vec<f64> = record.scores.values().copied().collect();

    let average_trend = if scores.is_empty() {
        None
    } else {
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    };

    KeywordSummary {
        category: record.category.clone(),
        average_trend,
        current_trend: scores.last().copied(),
        trend_direction: trend_direction(&scores),
        data_points: scores.len(),
        first_date: record.scores.keys().next().copied(),
        last_date: record.scores.keys().next_back().copied(),
    }
}
