//! Errors raised while building the genre feature space.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeatureError {
    /// Every token in the corpus was a stop word or too short
    #[error("empty vocabulary over {documents} documents; perhaps they only contain stop words")]
    EmptyVocabulary { documents: usize },
}
