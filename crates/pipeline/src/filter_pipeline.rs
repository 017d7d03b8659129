//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::Filter;
use crate::types::{Candidate, QueryContext};
use anyhow::Result;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(LikedTitlesFilter::new(index.clone()))
///     .add_filter(MinimumRatingFilter::with_defaults(index.clone()));
///
/// let filtered = pipeline.apply(candidates, &context)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of filters in the pipeline
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// Stops at the first filter that fails.
    pub fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &QueryContext,
    ) -> Result<Vec<Candidate>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, context)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Keeps candidates at or above a similarity floor
    struct SimilarityFloor(f64);

    impl Filter for SimilarityFloor {
        fn name(&self) -> &str {
            "SimilarityFloor"
        }

        fn apply(&self, candidates: Vec<Candidate>, _context: &QueryContext) -> Result<Vec<Candidate>> {
            Ok(candidates.into_iter().filter(|c| c.similarity >= self.0).collect())
        }
    }

    struct Failing;

    impl Filter for Failing {
        fn name(&self) -> &str {
            "Failing"
        }

        fn apply(&self, _candidates: Vec<Candidate>, _context: &QueryContext) -> Result<Vec<Candidate>> {
            anyhow::bail!("boom")
        }
    }

    fn candidates() -> Vec<Candidate> {
        vec![
            Candidate::new(0, 1, 0.9),
            Candidate::new(1, 2, 0.2),
            Candidate::new(2, 3, 0.5),
        ]
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        assert!(pipeline.is_empty());

        let filtered = pipeline.apply(candidates(), &QueryContext::default()).unwrap();
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_filters_chain_in_order() {
        let pipeline = FilterPipeline::new()
            .add_filter(SimilarityFloor(0.3))
            .add_filter(SimilarityFloor(0.6));
        assert_eq!(pipeline.len(), 2);

        let filtered = pipeline.apply(candidates(), &QueryContext::default()).unwrap();
        assert_eq!(filtered, vec![Candidate::new(0, 1, 0.9)]);
    }

    #[test]
    fn test_failing_filter_propagates() {
        let pipeline = FilterPipeline::new()
            .add_filter(SimilarityFloor(0.0))
            .add_filter(Failing);

        assert!(pipeline.apply(candidates(), &QueryContext::default()).is_err());
    }
}
