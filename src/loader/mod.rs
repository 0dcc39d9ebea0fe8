//! Bundle parsing for supported asset formats
//!
//! Currently glTF / GLB. The loader is local-only: fetching bytes from
//! anywhere remote belongs to the resolver and cache collaborators.

pub mod gltf;

use thiserror::Error;

/// Error type for bundle parsing
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to parse glTF: {0}")]
    Gltf(#[from] ::gltf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Re-export the format entry points
pub use gltf::{load_bundle_bytes, load_bundle_file};
