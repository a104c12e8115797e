//! Read-only HTTP API over the trend cache
//!
//! Routes:
//! - `GET /` health check, independent of the cache file
//! - `GET /keywords` keywords present in the cache
//! - `GET /trends?keyword=<keyword>` stored record for one keyword
//! - `GET /trends/summary` per-keyword aggregates

pub mod error;
pub mod handlers;

pub use error::{ApiError, ApiResult};

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};

use crate::cache::CacheStore;

/// Settings for the API server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Cache file to serve
    pub cache_path: PathBuf,
}

/// Registers every route and the JSON error handling for bad query strings
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(err.to_string()).into()
    }))
    .route("/", web::get().to(handlers::health))
    .route("/keywords", web::get().to(handlers::list_keywords))
    .route("/trends/summary", web::get().to(handlers::trends_summary))
    .route("/trends", web::get().to(handlers::get_trend))
    .default_service(web::to(handlers::unknown_route));
}

/// Runs the API server until it is shut down
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let store = web::Data::new(CacheStore::new(config.cache_path.clone()));

    if store.path().exists() {
        tracing::info!(cache = %config.cache_path.display(), "serving trend cache");
    } else {
        tracing::warn!(
            cache = %config.cache_path.display(),
            "trend cache not found; data endpoints will report no data until pull_trends runs"
        );
    }
    tracing::info!("API listening on {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(config.bind_addr)?
    .run()
    .await
}
