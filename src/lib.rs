//! trendcache library
//!
//! Shared by the `pull_trends` fetcher and the `trendcache` API server, and
//! exposed for integration tests.

pub mod api;
pub mod cache;
pub mod cli;
pub mod data;
pub mod fetch;
pub mod logging;
pub mod summary;
