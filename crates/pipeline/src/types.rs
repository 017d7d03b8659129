//! Candidate and query types flowing through the filter pipeline.

use data_loader::MovieId;
use std::collections::HashSet;

/// One catalog row scored against the query
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Position of the movie in the catalog (and in the feature matrix)
    pub row: usize,
    pub movie_id: MovieId,
    pub similarity: f64,
}

impl Candidate {
    pub fn new(row: usize, movie_id: MovieId, similarity: f64) -> Self {
        Self {
            row,
            movie_id,
            similarity,
        }
    }
}

/// Per-query state shared with every filter
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    /// Liked titles that exist in the catalog, deduplicated
    pub liked_titles: HashSet<String>,
}

impl QueryContext {
    pub fn new<I, S>(liked_titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            liked_titles: liked_titles.into_iter().map(Into::into).collect(),
        }
    }
}
