//! Filter implementations for the candidate pipeline.

pub mod liked_titles;
pub mod minimum_rating;

// Re-export for convenience
pub use liked_titles::LikedTitlesFilter;
pub use minimum_rating::{MIN_MEAN_RATING, MIN_RATING_COUNT, MinimumRatingFilter};
