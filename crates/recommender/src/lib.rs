//! Recommendation engine for genre-based movie recommendations.
//!
//! The engine is built once from the catalog and ratings files and then
//! answers any number of read-only queries.

pub mod config;
pub mod error;
pub mod engine;

pub use config::EngineConfig;
pub use engine::{Recommendation, RecommendationEngine};
pub use error::{EngineError, Result};
