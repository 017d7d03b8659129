//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to candidate sets.

use crate::types::{Candidate, QueryContext};
use anyhow::Result;

/// Core trait for filtering candidates.
///
/// `Send + Sync` lets one pipeline be shared by concurrent query callers.
/// Filters take ownership of the candidates and must preserve the relative
/// order of the ones they keep.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &QueryContext,
    ) -> Result<Vec<Candidate>>;
}
