//! pull_trends - fetch trend data for every keyword and write the cache file
//!
//! One sequential pass over the keyword list. Keywords that fail are reported
//! and skipped; the cache is only replaced when at least one keyword produced
//! data.

use anyhow::Context;
use clap::Parser;

use trendcache::cache::CacheStore;
use trendcache::cli::{PullArgs, PullConfig};
use trendcache::data::{load_keywords, GoogleTrendsClient};
use trendcache::fetch::refresh_cache;
use trendcache::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = PullArgs::parse();
    logging::init_tracing();

    let config = PullConfig::from_args(&args)?;

    tracing::info!(path = %config.keywords_path.display(), "loading keywords");
    let entries = load_keywords(&config.keywords_path)
        .with_context(|| format!("could not load keywords from {}", config.keywords_path.display()))?;
    tracing::info!("loaded {} keywords", entries.len());

    let client = GoogleTrendsClient::new(config.query.clone());
    tracing::info!(
        timeframe = %client.query().timeframe,
        geo = %client.query().geo,
        delay_secs = config.options.delay.as_secs(),
        "fetching trend data"
    );

    let store = CacheStore::new(&config.output_path);
    let report = refresh_cache(&client, &entries, &config.options, &store).await?;

    tracing::info!(
        output = %store.path().display(),
        keywords = report.cache.len(),
        points = report.total_points(),
        empty = report.empty.len(),
        failed = report.failed.len(),
        "extraction complete"
    );
    if let Some((first, last)) = report.date_range() {
        tracing::info!("date range: {} to {}", first, last);
    }
    for (keyword, error) in &report.failed {
        tracing::warn!(keyword = %keyword, error = %error, "not included");
    }

    Ok(())
}
