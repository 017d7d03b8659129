//! DataIndex building and indexing logic.
//!
//! Builds the DataIndex from parsed data:
//! - Load the catalog and the ratings table
//! - Build secondary indices (sorted title list)
//! - Compute aggregate statistics (mean rating and count per stats group)

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Running sum and count for one stats group
#[derive(Default)]
struct Accumulator {
    title: String,
    sum: f64,
    count: u32,
}

impl DataIndex {
    /// Load the catalog and ratings files.
    ///
    /// Steps:
    /// 1. Parse both files (in parallel)
    /// 2. Build primary indices
    /// 3. Build the title list
    /// 4. Compute movie statistics with the requested join key
    ///
    /// Any loader error aborts the whole load; there is no partial index.
    pub fn load_from_files(
        movies_path: &Path,
        ratings_path: &Path,
        join_key: JoinKey,
    ) -> Result<Self> {
        info!(
            "Loading catalog from {} and ratings from {}",
            movies_path.display(),
            ratings_path.display()
        );
        let start = Instant::now();

        let (movies, ratings) = rayon::join(
            || parser::parse_movies(movies_path),
            || parser::parse_ratings(ratings_path),
        );
        let movies = movies?;
        let ratings = ratings?;

        info!(
            "Parsed {} movies and {} ratings in {:.2?}",
            movies.len(),
            ratings.len(),
            start.elapsed()
        );

        Ok(Self::from_parts(movies, ratings, join_key))
    }

    /// Build a complete index from already-parsed rows
    pub fn from_parts(movies: Vec<Movie>, ratings: Vec<Rating>, join_key: JoinKey) -> Self {
        let mut index = DataIndex::new();

        for movie in movies {
            index.insert_movie(movie);
        }
        for rating in ratings {
            index.insert_rating(rating);
        }

        index.build_secondary_indices();
        index.compute_movie_stats(join_key);
        index
    }

    /// Build the sorted, deduplicated title list
    pub fn build_secondary_indices(&mut self) {
        let mut titles: Vec<String> = self.movies.iter().map(|m| m.title.clone()).collect();
        titles.sort_unstable();
        titles.dedup();
        self.titles = titles;
    }

    /// Compute aggregate statistics for every stats group.
    ///
    /// Ratings are inner-joined to catalog rows on movie id: a rating whose
    /// id is not in the catalog contributes nothing, and a rating whose id
    /// appears on several catalog rows contributes once per row.
    /// Groups are keyed by `join_key`.
    pub fn compute_movie_stats(&mut self, join_key: JoinKey) {
        let mut groups: HashMap<StatsKey, Accumulator> = HashMap::new();
        let mut joined = 0usize;

        for rating in &self.ratings {
            let Some(rows) = self.rows_by_id.get(&rating.movie_id) else {
                continue;
            };
            for &row in rows {
                let movie = &self.movies[row];
                let acc = groups
                    .entry(StatsKey::for_movie(join_key, movie))
                    .or_insert_with(|| Accumulator {
                        title: movie.title.clone(),
                        ..Default::default()
                    });
                acc.sum += rating.rating;
                acc.count += 1;
                joined += 1;
            }
        }

        self.join_key = join_key;
        self.movie_stats = groups
            .into_iter()
            .map(|(key, acc)| {
                let stats = MovieStats {
                    title: acc.title,
                    mean_rating: acc.sum / acc.count as f64,
                    rating_count: acc.count,
                };
                (key, stats)
            })
            .collect();

        info!(
            "Computed stats for {} groups ({:?} join) from {} joined ratings",
            self.movie_stats.len(),
            join_key,
            joined
        );
    }
}
