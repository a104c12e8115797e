//! Error responses for the query API
//!
//! Every failure is rendered as a JSON body `{"error": <kind>, "message": <text>}`.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

use crate::cache::CacheError;

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors a request can end in
#[derive(Debug, Error)]
pub enum ApiError {
    /// The cache file has not been produced yet
    #[error("{0}; run pull_trends to populate it")]
    NoData(String),

    /// The cache file exists but cannot be used
    #[error("{0}")]
    CacheCorrupt(String),

    /// The requested keyword is not in the cache
    #[error("No trend data found for keyword: {0}")]
    NotFound(String),

    /// The request is malformed
    #[error("{0}")]
    BadRequest(String),

    /// Anything else
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl ApiError {
    /// Machine-readable error kind used in the response body
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::NoData(_) => "no_data",
            ApiError::CacheCorrupt(_) => "cache_corrupt",
            ApiError::NotFound(_) => "not_found",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl From<CacheError> for ApiError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::Missing(_) => ApiError::NoData(err.to_string()),
            CacheError::Corrupt(_) | CacheError::NotAnObject => {
                ApiError::CacheCorrupt(err.to_string())
            }
            CacheError::Io(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoData(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::CacheCorrupt(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), error = %self, "request failed");
        }

        HttpResponse::build(status).json(ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_cache_maps_to_no_data() {
        let err: ApiError = CacheError::Missing(PathBuf::from("data/trends_cache.json")).into();

        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.kind(), "no_data");
        assert!(err.to_string().contains("data/trends_cache.json"));
        assert!(err.to_string().contains("pull_trends"));
    }

    #[test]
    fn test_non_object_cache_maps_to_corrupt() {
        let err: ApiError = CacheError::NotAnObject.into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.kind(), "cache_corrupt");
    }

    #[test]
    fn test_not_found_status() {
        let err = ApiError::NotFound("linen".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "No trend data found for keyword: linen");
    }
}
