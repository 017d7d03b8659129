//! Core domain types for the movie catalog and ratings tables.
//!
//! This module defines the fundamental data structures used throughout the system.
//! The `DataIndex` owns every loaded table; downstream crates only borrow from it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = i64;

/// Unique identifier for a movie
pub type MovieId = i64;

/// Genre text used when a catalog row has no genres
pub const UNKNOWN_GENRE: &str = "Unknown";

// =============================================================================
// Movie and Rating
// =============================================================================

/// Represents a movie in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Raw genre text, e.g. "Adventure|Animation|Children".
    ///
    /// Kept as a single string: it is the document the genre vectorizer
    /// tokenizes, whatever the delimiter.
    pub genres: String,
}

/// Represents a single rating from a user for a movie
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: f64,
    /// Loaded when present, never used for ranking
    pub timestamp: Option<i64>,
}

// =============================================================================
// Statistics Types
// =============================================================================

/// Aggregate rating statistics for one stats group (a title, or a movie id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieStats {
    pub title: String,
    pub mean_rating: f64,
    pub rating_count: u32,
}

/// How ratings are grouped into `MovieStats` and joined back to catalog rows.
///
/// `Title` merges distinct movie ids that share a title string into a
/// single statistics row. `MovieId` keeps them apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinKey {
    #[default]
    Title,
    MovieId,
}

/// Key of the stats map, shaped by the active `JoinKey`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum StatsKey {
    Title(String),
    Movie(MovieId),
}

impl StatsKey {
    pub(crate) fn for_movie(join_key: JoinKey, movie: &Movie) -> Self {
        match join_key {
            JoinKey::Title => StatsKey::Title(movie.title.clone()),
            JoinKey::MovieId => StatsKey::Movie(movie.id),
        }
    }
}

// =============================================================================
// DataIndex - The Core In-Memory Database
// =============================================================================

/// Main data structure that holds the catalog, the ratings and the derived
/// statistics.
///
/// Catalog rows are stored in file order: the genre feature matrix is
/// built row-for-row against `movies()`, so the position of a movie in this
/// slice is its feature row.
#[derive(Debug)]
pub struct DataIndex {
    pub(crate) movies: Vec<Movie>,
    pub(crate) ratings: Vec<Rating>,

    /// Catalog rows carrying each movie id (ids are not required to be unique)
    pub(crate) rows_by_id: HashMap<MovieId, Vec<usize>>,

    /// Sorted, deduplicated catalog titles
    pub(crate) titles: Vec<String>,

    // Precomputed statistics
    pub(crate) join_key: JoinKey,
    pub(crate) movie_stats: HashMap<StatsKey, MovieStats>,
}

impl DataIndex {
    /// Creates a new, empty DataIndex
    pub fn new() -> Self {
        Self {
            movies: Vec::new(),
            ratings: Vec::new(),
            rows_by_id: HashMap::new(),
            titles: Vec::new(),
            join_key: JoinKey::default(),
            movie_stats: HashMap::new(),
        }
    }

    /// All catalog rows in file order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Catalog row at a given position
    pub fn movie_at(&self, row: usize) -> Option<&Movie> {
        self.movies.get(row)
    }

    /// All valid ratings, including those whose movie id is not in the catalog
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Sorted unique catalog titles, for populating a selection list
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Whether a title is present in the catalog (exact match)
    pub fn contains_title(&self, title: &str) -> bool {
        self.titles
            .binary_search_by(|t| t.as_str().cmp(title))
            .is_ok()
    }

    /// Join key the statistics were computed with
    pub fn join_key(&self) -> JoinKey {
        self.join_key
    }

    /// Statistics joined to a catalog row.
    ///
    /// Returns `None` when no rating matched the row's stats group.
    pub fn stats_for(&self, movie: &Movie) -> Option<&MovieStats> {
        self.movie_stats
            .get(&StatsKey::for_movie(self.join_key, movie))
    }

    /// Statistics for a title, only meaningful under `JoinKey::Title`
    pub fn stats_for_title(&self, title: &str) -> Option<&MovieStats> {
        self.movie_stats.get(&StatsKey::Title(title.to_string()))
    }

    /// Number of statistics groups
    pub fn stats_len(&self) -> usize {
        self.movie_stats.len()
    }

    // Mutators - used during loading and by tests building an index by hand

    /// Append a movie to the catalog
    pub fn insert_movie(&mut self, movie: Movie) {
        let row = self.movies.len();
        self.rows_by_id.entry(movie.id).or_default().push(row);
        self.movies.push(movie);
    }

    /// Insert a rating
    pub fn insert_rating(&mut self, rating: Rating) {
        self.ratings.push(rating);
    }

    /// Get counts for debugging/validation: (movies, ratings)
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.ratings.len())
    }
}

// Implement Default trait for convenience
impl Default for DataIndex {
    fn default() -> Self {
        Self::new()
    }
}
