//! Filter to ensure minimum quality threshold.
//!
//! Removes movies with low average ratings or too few ratings,
//! ensuring we only recommend well-liked, widely-rated titles.

use crate::traits::Filter;
use crate::types::{Candidate, QueryContext};
use anyhow::Result;
use data_loader::DataIndex;
use std::sync::Arc;

/// Mean rating a candidate must strictly exceed
pub const MIN_MEAN_RATING: f64 = 3.5;

/// Rating count a candidate must strictly exceed
pub const MIN_RATING_COUNT: u32 = 300;

/// Removes candidates at or below the quality thresholds.
///
/// ## Algorithm
/// For each candidate:
/// 1. Look up the MovieStats joined to its catalog row
/// 2. Keep only if mean_rating > min_rating and rating_count > min_count
///
/// Candidates without stats (no joined ratings) are removed.
pub struct MinimumRatingFilter {
    data_index: Arc<DataIndex>,
    min_rating: f64,
    min_count: u32,
}

impl MinimumRatingFilter {
    pub fn new(data_index: Arc<DataIndex>, min_rating: f64, min_count: u32) -> Self {
        Self {
            data_index,
            min_rating,
            min_count,
        }
    }

    /// Filter using `MIN_MEAN_RATING` and `MIN_RATING_COUNT`
    pub fn with_defaults(data_index: Arc<DataIndex>) -> Self {
        Self::new(data_index, MIN_MEAN_RATING, MIN_RATING_COUNT)
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _context: &QueryContext,
    ) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| {
                self.data_index
                    .movie_at(candidate.row)
                    .and_then(|movie| self.data_index.stats_for(movie))
                    .is_some_and(|stats| {
                        stats.mean_rating > self.min_rating && stats.rating_count > self.min_count
                    })
            })
            .collect();

        Ok(filtered)
    }
}
