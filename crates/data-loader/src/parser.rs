//! Parser for the catalog and ratings CSV files.
//!
//! - movies: movieId,title,genres
//! - ratings: userId,movieId,rating,timestamp
//!
//! Each file is read with a two-tier strategy. If the first record names
//! any canonical column it is a header: columns are looked up by name and
//! a missing required column is a schema error. Otherwise the file is
//! treated as headerless and the canonical names are assigned to the
//! leading columns by position. Rows whose numeric fields fail coercion
//! are dropped, never defaulted.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use csv::{ReaderBuilder, StringRecord};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

const MOVIE_COLUMNS: [&str; 3] = ["movieId", "title", "genres"];
const MOVIE_REQUIRED: usize = 3;

const RATING_COLUMNS: [&str; 4] = ["userId", "movieId", "rating", "timestamp"];
const RATING_REQUIRED: usize = 3;

/// Read a whole file as text.
///
/// UTF-8 is tried first. MovieLens dumps are ISO-8859-1 (Latin-1), where
/// each byte maps directly to the Unicode code point of the same value.
fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => Ok(e.into_bytes().iter().map(|&b| b as char).collect()),
    }
}

/// A CSV file with its required columns resolved to field positions
struct Table {
    /// Field position of each canonical column, in canonical order.
    /// Optional trailing columns may be absent.
    positions: Vec<Option<usize>>,
    rows: Vec<StringRecord>,
}

impl Table {
    fn field<'r>(&self, row: &'r StringRecord, column: usize) -> Option<&'r str> {
        self.positions
            .get(column)
            .copied()
            .flatten()
            .and_then(|pos| row.get(pos))
    }
}

/// Read a CSV file and resolve its columns.
///
/// `columns` lists the canonical names; the first `required` of them must
/// be present after both attempts.
fn read_table(path: &Path, columns: &[&str], required: usize) -> Result<Table> {
    let file = path.display().to_string();
    let text = read_text(path)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let records = reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|source| DataLoadError::CsvError {
            file: file.clone(),
            source,
        })?;

    // Attempt 1: the first record is a header if it names any canonical column
    if let Some(header) = records.first() {
        let named: Vec<Option<usize>> = columns
            .iter()
            .map(|col| header.iter().position(|h| h.trim() == *col))
            .collect();

        if named.iter().any(Option::is_some) {
            if let Some(missing) = named[..required].iter().position(Option::is_none) {
                return Err(DataLoadError::SchemaError {
                    file,
                    column: columns[missing].to_string(),
                });
            }
            debug!("{}: using header row for column names", file);
            return Ok(Table {
                positions: named,
                rows: records.into_iter().skip(1).collect(),
            });
        }
    }

    // Attempt 2: headerless, names assigned by position. Short rows are
    // tolerated as long as some row is wide enough.
    let width = records.iter().map(StringRecord::len).max().unwrap_or(0);
    if width < required {
        return Err(DataLoadError::SchemaError {
            file,
            column: columns[width].to_string(),
        });
    }
    debug!("{}: no usable header, assigning columns by position", file);

    Ok(Table {
        positions: (0..columns.len())
            .map(|pos| (pos < width).then_some(pos))
            .collect(),
        rows: records,
    })
}

/// Coerce an id field.
///
/// Accepts integer text and integral finite floats ("12.0").
fn coerce_id(field: Option<&str>) -> Option<i64> {
    let s = field?.trim();
    if let Ok(id) = s.parse::<i64>() {
        return Some(id);
    }
    let value = s.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

/// Coerce a numeric field, rejecting NaN and infinities
fn coerce_number(field: Option<&str>) -> Option<f64> {
    let value = field?.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Parse the movies file
///
/// Rows with a non-numeric `movieId` are dropped. Titles are kept as-is.
/// Missing or blank genres become `"Unknown"`.
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let table = read_table(path, &MOVIE_COLUMNS, MOVIE_REQUIRED)?;
    let total = table.rows.len();

    let movies: Vec<Movie> = table
        .rows
        .iter()
        .filter_map(|row| {
            let id = coerce_id(table.field(row, 0))?;
            let title = table.field(row, 1).unwrap_or_default().to_string();
            let genres = match table.field(row, 2) {
                Some(g) if !g.trim().is_empty() => g.to_string(),
                _ => UNKNOWN_GENRE.to_string(),
            };
            Some(Movie { id, title, genres })
        })
        .collect();

    let dropped = total - movies.len();
    if dropped > 0 {
        warn!(
            "Dropped {} of {} movie rows with an invalid movieId in {}",
            dropped,
            total,
            path.display()
        );
    }
    Ok(movies)
}

/// Parse the ratings file
///
/// A row is kept only if `userId`, `movieId` and `rating` all coerce.
/// The timestamp is optional and does not affect whether a row is kept.
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    let table = read_table(path, &RATING_COLUMNS, RATING_REQUIRED)?;
    let total = table.rows.len();

    let ratings: Vec<Rating> = table
        .rows
        .iter()
        .filter_map(|row| {
            Some(Rating {
                user_id: coerce_id(table.field(row, 0))?,
                movie_id: coerce_id(table.field(row, 1))?,
                rating: coerce_number(table.field(row, 2))?,
                timestamp: coerce_id(table.field(row, 3)),
            })
        })
        .collect();

    let dropped = total - ratings.len();
    if dropped > 0 {
        warn!(
            "Dropped {} of {} rating rows with invalid numeric fields in {}",
            dropped,
            total,
            path.display()
        );
    }
    Ok(ratings)
}
