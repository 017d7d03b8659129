//! # Recommendation Engine
//!
//! Coordinates a genre-similarity query:
//! 1. Keep only the liked titles that exist in the catalog
//! 2. Project the first matching catalog row's genres into the feature space
//! 3. Score every catalog row by cosine similarity
//! 4. Filter out liked titles and poorly or rarely rated movies
//! 5. Stable-sort by similarity and return the top N
//!
//! All state is built once and shared read-only, so a single engine can
//! serve concurrent callers without locking.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use data_loader::{DataIndex, JoinKey, MovieId};
use pipeline::filters::{LikedTitlesFilter, MinimumRatingFilter};
use pipeline::{Candidate, FilterPipeline, GenreFeatureSpace, QueryContext};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};

/// Number of recommendations returned when the caller does not say
pub const DEFAULT_TOP_N: usize = 10;

/// One recommended movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub genres: String,
    pub similarity: f64,
    pub mean_rating: f64,
    pub rating_count: u32,
}

/// The immutable context every query runs against
#[derive(Clone)]
pub struct RecommendationEngine {
    data_index: Arc<DataIndex>,
    features: Arc<GenreFeatureSpace>,
    filter_pipeline: Arc<FilterPipeline>,
}

impl RecommendationEngine {
    /// Load both data sources and build the feature space.
    ///
    /// Any failure here is fatal: no engine is returned, so no query can
    /// run against a partial catalog.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let start = Instant::now();
        let data_index = DataIndex::load_from_files(
            &config.movies_path,
            &config.ratings_path,
            config.join_key,
        )?;
        let engine = Self::from_index(data_index)?;
        info!("Recommendation engine ready in {:.2?}", start.elapsed());
        Ok(engine)
    }

    /// Build the engine from an index that is already loaded
    pub fn from_index(data_index: DataIndex) -> Result<Self> {
        let features = GenreFeatureSpace::build(&data_index)?;
        let data_index = Arc::new(data_index);

        let filter_pipeline = FilterPipeline::new()
            .add_filter(LikedTitlesFilter::new(data_index.clone()))
            .add_filter(MinimumRatingFilter::with_defaults(data_index.clone()));

        Ok(Self {
            data_index,
            features: Arc::new(features),
            filter_pipeline: Arc::new(filter_pipeline),
        })
    }

    /// Sorted unique catalog titles, for a selection list
    pub fn titles(&self) -> &[String] {
        self.data_index.titles()
    }

    /// Number of catalog rows
    pub fn movie_count(&self) -> usize {
        self.data_index.movies().len()
    }

    pub fn join_key(&self) -> JoinKey {
        self.data_index.join_key()
    }

    pub fn data_index(&self) -> &DataIndex {
        &self.data_index
    }

    /// Recommend up to `top_n` movies with genres similar to the liked titles.
    ///
    /// Titles not in the catalog are ignored. When several liked titles are
    /// valid, the query vector comes from the first catalog row (in catalog
    /// order) carrying one of them; the others only take part in exclusion.
    /// Ties in similarity keep catalog order.
    ///
    /// # Errors
    /// `EngineError::NoValidInput` when none of the titles is in the catalog.
    pub fn get_recommendations<S: AsRef<str>>(
        &self,
        liked_titles: &[S],
        top_n: usize,
    ) -> Result<Vec<Recommendation>> {
        let start = Instant::now();

        let context = self.validate_titles(liked_titles)?;
        debug!(
            "{} of {} liked titles are in the catalog",
            context.liked_titles.len(),
            liked_titles.len()
        );

        let candidates = self.score_catalog(&context)?;

        let filtered = self
            .filter_pipeline
            .apply(candidates, &context)
            .map_err(EngineError::Filter)?;

        let recommendations = self.rank_and_select(filtered, top_n);

        info!(
            "Selected {} recommendations in {:.2?}",
            recommendations.len(),
            start.elapsed()
        );
        Ok(recommendations)
    }

    /// Intersect the liked titles with the catalog
    fn validate_titles<S: AsRef<str>>(&self, liked_titles: &[S]) -> Result<QueryContext> {
        let valid: HashSet<String> = liked_titles
            .iter()
            .map(|title| AsRef::<str>::as_ref(title))
            .filter(|title| self.data_index.contains_title(title))
            .map(str::to_string)
            .collect();

        if valid.is_empty() {
            return Err(EngineError::NoValidInput);
        }
        Ok(QueryContext {
            liked_titles: valid,
        })
    }

    /// Score every catalog row against the query movie's genres
    fn score_catalog(&self, context: &QueryContext) -> Result<Vec<Candidate>> {
        let movies = self.data_index.movies();
        let query_movie = movies
            .iter()
            .find(|movie| context.liked_titles.contains(&movie.title))
            .ok_or(EngineError::NoValidInput)?;

        let query = self.features.project(&query_movie.genres);
        let candidates = self
            .features
            .similarities(&query)
            .into_iter()
            .zip(movies)
            .enumerate()
            .map(|(row, (similarity, movie))| Candidate::new(row, movie.id, similarity))
            .collect();
        Ok(candidates)
    }

    /// Sort by similarity (stable, descending) and keep the top N
    fn rank_and_select(&self, mut candidates: Vec<Candidate>, top_n: usize) -> Vec<Recommendation> {
        candidates.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates
            .into_iter()
            .filter_map(|candidate| {
                let movie = self.data_index.movie_at(candidate.row)?;
                let stats = self.data_index.stats_for(movie)?;
                Some(Recommendation {
                    movie_id: movie.id,
                    title: movie.title.clone(),
                    genres: movie.genres.clone(),
                    similarity: candidate.similarity,
                    mean_rating: stats.mean_rating,
                    rating_count: stats.rating_count,
                })
            })
            .take(top_n)
            .collect()
    }
}
