//! Cache store for the trend data file
//!
//! Provides a `CacheStore` that writes the whole keyword-to-record mapping as a
//! single JSON file and reads it back, either untouched or as typed records.

use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::data::TrendCache;

/// Errors that can occur when reading or writing the cache file
#[derive(Debug, Error)]
pub enum CacheError {
    /// No cache file exists yet
    #[error("Trend cache not found at {0}")]
    Missing(PathBuf),

    /// Reading or writing the file failed
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON, or its records do not match the expected layout
    #[error("Trend cache is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The file is valid JSON but its top level is not an object
    #[error("Trend cache must be a JSON object keyed by keyword")]
    NotAnObject,
}

/// Reads and writes the trend cache file
///
/// The store holds only the path; every read goes to disk, so readers always
/// see the result of the most recent fetch run.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Location of the cache file
    path: PathBuf,
}

impl CacheStore {
    /// Creates a store for the given cache file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the cache file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensures the parent directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir),
            _ => Ok(()),
        }
    }

    /// Writes the full cache, replacing any previous contents
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if directory creation, serialization, or file writing fails
    pub fn write(&self, cache: &TrendCache) -> Result<(), CacheError> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(cache)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Reads the cache as an untouched JSON object
    ///
    /// Values are returned exactly as stored, whatever their shape.
    pub fn read_raw(&self) -> Result<Map<String, Value>, CacheError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CacheError::Missing(self.path.clone()))
            }
            Err(e) => return Err(CacheError::Io(e)),
        };

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(CacheError::NotAnObject),
        }
    }

    /// Reads the cache as typed trend records
    pub fn read(&self) -> Result<TrendCache, CacheError> {
        let raw = self.read_raw()?;
        Ok(serde_json::from_value(Value::Object(raw))?)
    }
}
