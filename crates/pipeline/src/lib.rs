//! Genre feature space and candidate filtering.
//!
//! This crate provides:
//! - TfidfVectorizer and SparseVector for genre text
//! - GenreFeatureSpace: the catalog's frozen feature matrix
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//!
//! ## Architecture
//! A query is processed in stages:
//! 1. The liked movie's genres are projected into the feature space
//! 2. Every catalog row becomes a Candidate scored by cosine similarity
//! 3. Filters remove liked titles and poorly or rarely rated movies
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, GenreFeatureSpace, QueryContext};
//! use pipeline::filters::*;
//!
//! let space = GenreFeatureSpace::build(&index)?;
//! let pipeline = FilterPipeline::new()
//!     .add_filter(LikedTitlesFilter::new(index.clone()))
//!     .add_filter(MinimumRatingFilter::with_defaults(index.clone()));
//!
//! let sims = space.similarities(&space.project("Comedy|Romance"));
//! let filtered = pipeline.apply(candidates, &QueryContext::new(["Heat"]))?;
//! ```

pub mod error;
pub mod types;
pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod stop_words;
pub mod vectorizer;
pub mod features;

// Re-export main types
pub use error::FeatureError;
pub use types::{Candidate, QueryContext};
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use vectorizer::{SparseVector, TfidfVectorizer};
pub use features::GenreFeatureSpace;
