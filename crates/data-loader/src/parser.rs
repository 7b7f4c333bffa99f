//! Parsers for the three TMDB source tables.
//!
//! - movies_metadata.csv: id, title, overview, vote_count, vote_average, genres, ...
//! - credits.csv: cast, crew, id
//! - keywords.csv: id, keywords
//!
//! Parsing here is deliberately shallow: each file becomes a list of raw rows
//! with string cells. Coercion and nested-field parsing happen in
//! [`crate::index`], where a bad cell drops its row instead of the load.

use crate::error::{DataLoadError, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// One row of movies_metadata.csv; unknown columns are ignored
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataRow {
    pub id: String,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub vote_count: Option<String>,
    pub vote_average: Option<String>,
    pub genres: Option<String>,
}

/// One row of credits.csv
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreditsRow {
    pub id: String,
    pub cast: Option<String>,
    pub crew: Option<String>,
}

/// One row of keywords.csv
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeywordsRow {
    pub id: String,
    pub keywords: Option<String>,
}

const METADATA_COLUMNS: &[&str] = &["id", "title", "overview", "vote_count", "vote_average", "genres"];
const CREDITS_COLUMNS: &[&str] = &["id", "cast", "crew"];
const KEYWORDS_COLUMNS: &[&str] = &["id", "keywords"];

pub fn parse_metadata(path: &Path) -> Result<Vec<MetadataRow>> {
    read_rows(path, METADATA_COLUMNS)
}

pub fn parse_credits(path: &Path) -> Result<Vec<CreditsRow>> {
    read_rows(path, CREDITS_COLUMNS)
}

pub fn parse_keywords(path: &Path) -> Result<Vec<KeywordsRow>> {
    read_rows(path, KEYWORDS_COLUMNS)
}

/// Read every row of a CSV file into `T`.
///
/// Fails if the file can't be opened or lacks one of `required` columns.
/// Records that fail to deserialize are skipped.
fn read_rows<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>> {
    let file_name = path.display().to_string();
    let file = File::open(path).map_err(|_| DataLoadError::FileNotFound {
        path: file_name.clone(),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let headers = reader.headers().map_err(|source| DataLoadError::Csv {
        file: file_name.clone(),
        source,
    })?;
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(DataLoadError::MissingColumn {
                file: file_name.clone(),
                column: column.to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in reader.deserialize::<T>() {
        match result {
            Ok(row) => rows.push(row),
            Err(err) if err.is_io_error() => {
                return Err(DataLoadError::Csv {
                    file: file_name,
                    source: err,
                });
            }
            Err(err) => {
                skipped += 1;
                debug!("Skipping unreadable record in {}: {}", file_name, err);
            }
        }
    }

    debug!("Read {} rows from {} ({} skipped)", rows.len(), file_name, skipped);
    Ok(rows)
}

/// Parse an integer cell, accepting integral floats like "862.0".
pub fn parse_integer(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(i);
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Parse a non-negative id or count that fits in `u32`
pub fn parse_unsigned(s: &str) -> Option<u32> {
    parse_integer(s).and_then(|i| u32::try_from(i).ok())
}

pub fn parse_float(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("862"), Some(862));
        assert_eq!(parse_integer(" 862.0 "), Some(862));
        assert_eq!(parse_integer("1997-08-20"), None);
        assert_eq!(parse_integer("12.5"), None);
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_unsigned("-3"), None);
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("7.7"), Some(7.7));
        assert_eq!(parse_float("NaN"), None);
        assert_eq!(parse_float("abc"), None);
    }

    #[test]
    fn test_read_keywords_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "id,keywords").unwrap();
        writeln!(file, "862,\"[{{'id': 931, 'name': 'jealousy'}}]\"").unwrap();
        writeln!(file, "8844,[]").unwrap();

        let rows = parse_keywords(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "862");
        assert_eq!(rows[0].keywords.as_deref(), Some("[{'id': 931, 'name': 'jealousy'}]"));
    }

    #[test]
    fn test_missing_id_column_is_fatal() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "movie,keywords").unwrap();
        writeln!(file, "862,[]").unwrap();

        let err = parse_keywords(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn { ref column, .. } if column == "id"));
    }

    #[test]
    fn test_padded_headers_are_matched() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, " id , keywords ").unwrap();
        writeln!(file, "862,[]").unwrap();

        let rows = parse_keywords(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "862");
        assert_eq!(rows[0].keywords.as_deref(), Some("[]"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = parse_credits(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
