//! Request handlers for the query API
//!
//! Each handler loads the cache file from disk, works on it in memory, and
//! drops it when the response is built.

use std::collections::BTreeMap;

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::error::{ApiError, ApiResult};
use crate::cache::CacheStore;
use crate::data::TrendRecord;
use crate::summary::{summarize, KeywordSummary};

/// Category reported for keywords whose record carries none
const DEFAULT_CATEGORY: &str = "Other";

/// Query string of the trend lookup
#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub keyword: String,
}

/// Reads the cache file off the async executor
async fn load_cache(store: &CacheStore) -> ApiResult<Map<String, Value>> {
    let store = store.clone();
    let raw = web::block(move || store.read_raw())
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(raw)
}

/// Finds a keyword, exactly first, then ignoring case
fn find_keyword<'a>(cache: &'a Map<String, Value>, keyword: &str) -> Option<&'a Value> {
    cache.get(keyword).or_else(|| {
        let wanted = keyword.to_lowercase();
        cache
            .iter()
            .find(|(k, _)| k.to_lowercase() == wanted)
            .map(|(_, v)| v)
    })
}

/// `GET /`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "running",
        "message": "Trends cache API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/",
            "keywords": "/keywords",
            "trends": "/trends?keyword=<keyword>",
            "summary": "/trends/summary",
        },
    }))
}

/// `GET /keywords`
pub async fn list_keywords(store: web::Data<CacheStore>) -> ApiResult<HttpResponse> {
    let cache = load_cache(&store).await?;

    let mut by_category: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (keyword, value) in &cache {
        let category = value
            .get("category")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_CATEGORY);
        by_category.entry(category).or_default().push(keyword);
    }
    let keywords: Vec<&String> = cache.keys().collect();

    Ok(HttpResponse::Ok().json(json!({
        "keywords": keywords,
        "count": keywords.len(),
        "by_category": by_category,
    })))
}

/// `GET /trends?keyword=<keyword>`
pub async fn get_trend(
    store: web::Data<CacheStore>,
    query: web::Query<TrendQuery>,
) -> ApiResult<HttpResponse> {
    let raw = query.keyword.as_str();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest("keyword must not be empty".to_string()));
    }

    let cache = load_cache(&store).await?;
    let record = cache
        .get(raw)
        .or_else(|| find_keyword(&cache, trimmed));
    match record {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Err(ApiError::NotFound(trimmed.to_string())),
    }
}

/// `GET /trends/summary`
pub async fn trends_summary(store: web::Data<CacheStore>) -> ApiResult<HttpResponse> {
    let cache = load_cache(&store).await?;

    let mut summary: BTreeMap<String, KeywordSummary> = BTreeMap::new();
    for (keyword, value) in cache {
        match serde_json::from_value::<TrendRecord>(value) {
            Ok(record) => {
                summary.insert(keyword, summarize(&record));
            }
            Err(e) => {
                tracing::warn!(keyword = %keyword, error = %e, "skipping unreadable record");
            }
        }
    }

    Ok(HttpResponse::Ok().json(summary))
}

/// Fallback for paths outside the API
pub async fn unknown_route() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "error": "not_found",
        "message": "No such endpoint",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("Organic Cotton".to_string(), json!({"scores": {}}));
        map.insert("linen".to_string(), json!({"scores": {"2026-07-19": 1}}));
        map
    }

    #[test]
    fn test_find_keyword_exact() {
        let cache = cache();
        assert_eq!(find_keyword(&cache, "linen"), Some(&cache["linen"]));
    }

    #[test]
    fn test_find_keyword_ignores_case() {
        let cache = cache();
        assert_eq!(
            find_keyword(&cache, "organic cotton"),
            Some(&cache["Organic Cotton"])
        );
    }

    #[test]
    fn test_find_keyword_missing() {
        assert!(find_keyword(&cache(), "hemp").is_none());
    }
}
