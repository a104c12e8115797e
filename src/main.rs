//! trendcache - serve cached keyword trend data over HTTP
//!
//! Reads the cache file written by `pull_trends` on every request and answers
//! with JSON. The server never writes to the cache.

use anyhow::Context;
use clap::Parser;

use trendcache::api;
use trendcache::cli::ServeArgs;
use trendcache::logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = ServeArgs::parse();
    logging::init_tracing();

    let config = args.into_config();
    let bind_addr = config.bind_addr;
    api::serve(config)
        .await
        .with_context(|| format!("API server on {} failed", bind_addr))
}
