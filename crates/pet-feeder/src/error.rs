//! Error types for the pet model.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by collection and controller accessors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// An index-based accessor was called outside `0..count`.
    #[error("index {index} out of bounds for collection of {count} pets")]
    IndexOutOfBounds { index: usize, count: usize },
}

/// Errors that can occur while loading the model configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML for `ModelConfig`.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors reported by an image-loading collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageLoadError {
    /// No image exists for the pet.
    #[error("no image found for pet")]
    NotFound,

    /// Loading failed for another reason.
    #[error("image load failed: {0}")]
    Failed(String),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
