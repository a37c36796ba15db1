use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),

    #[error("classifier has not been built yet")]
    NotBuilt,

    #[error("training instances are not available (was the model restored from disk?)")]
    TrainingDataUnavailable,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}
