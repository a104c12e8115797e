//! Keyword list loading
//!
//! The keyword list is a header-less spreadsheet export with two columns:
//! a category and the search term. Single-column rows are accepted as bare
//! keywords.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use thiserror::Error;

use super::KeywordEntry;

/// Errors that can occur when loading the keyword list
#[derive(Debug, Error)]
pub enum KeywordsError {
    /// The input file could not be opened
    #[error("Failed to open keyword file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be decoded
    #[error("Malformed keyword file: {0}")]
    Csv(#[from] csv::Error),

    /// Filtering left nothing to fetch
    #[error("Keyword file contains no usable keywords")]
    NoKeywords,
}

/// Loads and cleans the keyword list from a CSV file
pub fn load_keywords(path: &Path) -> Result<Vec<KeywordEntry>, KeywordsError> {
    let file = std::fs::File::open(path).map_err(|source| KeywordsError::Open {
        path: path.display().to_string(),
        source,
    })?;
    parse_keywords(file)
}

/// Parses keyword rows from any reader
///
/// Keywords are trimmed; blank keywords and repeats are dropped, keeping the
/// first occurrence and its category.
pub fn parse_keywords<R: Read>(reader: R) -> Result<Vec<KeywordEntry>, KeywordsError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for row in rdr.records() {
        let row = row?;
        let (category, keyword) = match row.len() {
            0 => continue,
            1 => (None, row.get(0).unwrap_or_default()),
            _ => (
                row.get(0).filter(|c| !c.is_empty()).map(str::to_string),
                row.get(1).unwrap_or_default(),
            ),
        };

        if keyword.is_empty() || !seen.insert(keyword.to_string()) {
            continue;
        }

        entries.push(KeywordEntry {
            category,
            keyword: keyword.to_string(),
        });
    }

    if entries.is_empty() {
        return Err(KeywordsError::NoKeywords);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_two_column_rows() {
        let input = "Materials,organic cotton\nStyles,wide leg jeans\n";
        let entries = parse_keywords(input.as_bytes()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category.as_deref(), Some("Materials"));
        assert_eq!(entries[0].keyword, "organic cotton");
        assert_eq!(entries[1].keyword, "wide leg jeans");
    }

    #[test]
    fn test_parse_trims_and_drops_blank_keywords() {
        let input = "Materials,  linen  \nMaterials,\nMaterials,   \n";
        let entries = parse_keywords(input.as_bytes()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].keyword, "linen");
    }

    #[test]
    fn test_parse_drops_duplicates_keeping_first_category() {
        let input = "Materials,hemp\nFabrics,hemp\n";
        let entries = parse_keywords(input.as_bytes()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category.as_deref(), Some("Materials"));
    }

    #[test]
    fn test_parse_single_column_rows_have_no_category() {
        let input = "thrift\nvintage denim\n";
        let entries = parse_keywords(input.as_bytes()).unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.category.is_none()));
    }

    #[test]
    fn test_parse_quoted_keyword_with_comma() {
        let input = "Styles,\"boots, knee high\"\n";
        let entries = parse_keywords(input.as_bytes()).unwrap();
        assert_eq!(entries[0].keyword, "boots, knee high");
    }

    #[test]
    fn test_parse_empty_input_is_error() {
        let result = parse_keywords("".as_bytes());
        assert!(matches!(result, Err(KeywordsError::NoKeywords)));
    }

    #[test]
    fn test_load_keywords_from_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "Materials,tencel").unwrap();

        let entries = load_keywords(file.path()).unwrap();
        assert_eq!(entries[0].keyword, "tencel");
    }

    #[test]
    fn test_load_keywords_missing_file_reports_path() {
        let err = load_keywords(Path::new("/nonexistent/keywords.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/keywords.csv"));
    }
}
