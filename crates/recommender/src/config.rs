//! Engine configuration.

use data_loader::JoinKey;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the engine loads its data from and how it joins ratings to movies.
///
/// The quality thresholds are not configurable; see
/// `pipeline::filters::{MIN_MEAN_RATING, MIN_RATING_COUNT}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub movies_path: PathBuf,
    pub ratings_path: PathBuf,
    #[serde(default)]
    pub join_key: JoinKey,
}

impl EngineConfig {
    pub fn new(movies_path: impl Into<PathBuf>, ratings_path: impl Into<PathBuf>) -> Self {
        Self {
            movies_path: movies_path.into(),
            ratings_path: ratings_path.into(),
            join_key: JoinKey::default(),
        }
    }

    pub fn with_join_key(mut self, join_key: JoinKey) -> Self {
        self.join_key = join_key;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new("movie.csv", "rating.csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.movies_path, PathBuf::from("movie.csv"));
        assert_eq!(config.ratings_path, PathBuf::from("rating.csv"));
        assert_eq!(config.join_key, JoinKey::Title);
    }

    #[test]
    fn test_with_join_key() {
        let config = EngineConfig::new("m.csv", "r.csv").with_join_key(JoinKey::MovieId);
        assert_eq!(config.join_key, JoinKey::MovieId);
    }
}
