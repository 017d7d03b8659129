//! Errors surfaced by the recommendation engine.

use data_loader::DataLoadError;
use pipeline::FeatureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Catalog or ratings could not be loaded. Fatal at initialization.
    #[error("failed to load data: {0}")]
    Load(#[from] DataLoadError),

    /// The genre feature space could not be built. Fatal at initialization.
    #[error("failed to build genre features: {0}")]
    Feature(#[from] FeatureError),

    /// None of the requested titles exist in the catalog.
    /// Recoverable: the engine stays usable.
    #[error("None of the specified movies are in the dataset")]
    NoValidInput,

    /// A filter stage failed while answering a query
    #[error("failed to filter candidates: {0:#}")]
    Filter(anyhow::Error),
}

impl EngineError {
    /// Whether the caller can keep using the engine after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::NoValidInput | EngineError::Filter(_))
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
