//! # Data Loader Crate
//!
//! This crate loads the movie catalog and ratings tables and derives the
//! per-movie rating statistics used to filter recommendations.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Rating, MovieStats, DataIndex)
//! - **parser**: Parse CSV files into Rust structs, dropping malformed rows
//! - **index**: Build the DataIndex and compute statistics
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{DataIndex, JoinKey};
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_files(
//!     Path::new("movie.csv"),
//!     Path::new("rating.csv"),
//!     JoinKey::Title,
//! )?;
//!
//! let movie = index.movie_at(0).unwrap();
//! if let Some(stats) = index.stats_for(movie) {
//!     println!("{}: {:.2} over {} ratings", movie.title, stats.mean_rating, stats.rating_count);
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    // Core types
    Movie,
    Rating,
    DataIndex,
    MovieStats,
    JoinKey,
    UNKNOWN_GENRE,
};
