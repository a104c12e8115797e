//! Cache module for the trend data file
//!
//! The cache file is the only persisted state: the fetcher overwrites it in
//! full and the query API reads it on every request.

mod store;

pub use store::{CacheError, CacheStore};
