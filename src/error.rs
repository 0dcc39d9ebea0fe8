//! Error types for maquette

use thiserror::Error;

/// Main error type for node operations
#[derive(Error, Debug)]
pub enum NodeError {
    #[error("Media error: {0}")]
    Media(#[from] crate::media::MediaError),

    #[error("Cache error: {0}")]
    Cache(#[from] crate::cache::CacheError),

    #[error("Model error: {0}")]
    Model(#[from] crate::loader::ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Animation clip index {index} out of range ({count} clips)")]
    InvalidClip { index: usize, count: usize },
}

/// Result type alias for node operations
pub type Result<T> = std::result::Result<T, NodeError>;
