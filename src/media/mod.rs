//! Media resolution: mapping source references to fetchable locations
//!
//! A node identifies its asset by an opaque source reference. The resolver
//! turns that reference into an accessible URL (plus any auxiliary resources
//! fetched alongside it) and is injected into the node's load context, so
//! editors can swap in whatever backend they talk to.

pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for media resolution
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("No route for source reference: {0}")]
    Unresolved(String),

    #[error("Resolver backend error: {0}")]
    Backend(String),
}

/// Where a source reference can actually be fetched from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedMedia {
    /// URL (or local path) of the asset bundle itself
    pub accessible_url: String,
    /// Side resources belonging to the same asset (bin chunks, textures)
    pub auxiliary: Vec<String>,
}

impl ResolvedMedia {
    /// Resolution with no auxiliary resources
    pub fn direct(url: impl Into<String>) -> Self {
        Self {
            accessible_url: url.into(),
            auxiliary: Vec::new(),
        }
    }
}

/// Async resolver abstraction
#[async_trait]
pub trait MediaResolver: Send + Sync {
    /// Resolve a source reference into a fetchable location
    async fn resolve(&self, source: &str) -> Result<ResolvedMedia, MediaError>;
}

/// Resolver that treats every source reference as already accessible
///
/// Useful when sources are plain file paths or URLs the cache can fetch
/// directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughResolver;

impl PassthroughResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MediaResolver for PassthroughResolver {
    async fn resolve(&self, source: &str) -> Result<ResolvedMedia, MediaError> {
        Ok(ResolvedMedia::direct(source))
    }
}

pub use mock::MockResolver;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_is_identity() {
        let resolver = PassthroughResolver::new();
        let media = futures::executor::block_on(resolver.resolve("models/chair.glb")).unwrap();
        assert_eq!(media.accessible_url, "models/chair.glb");
        assert!(media.auxiliary.is_empty());
    }
}
