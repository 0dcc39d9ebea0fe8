//! Mock resolver for testing
//!
//! Routes are programmed per source reference; unknown references resolve to
//! [`MediaError::Unresolved`].

use super::{MediaError, MediaResolver, ResolvedMedia};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Programmable resolver backed by a route table
#[derive(Debug, Default)]
pub struct MockResolver {
    routes: RwLock<HashMap<String, Result<ResolvedMedia, String>>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a source reference to an accessible URL
    pub fn route(&self, source: impl Into<String>, url: impl Into<String>) {
        self.routes
            .write()
            .insert(source.into(), Ok(ResolvedMedia::direct(url)));
    }

    /// Route a source reference to a full resolution result
    pub fn route_media(&self, source: impl Into<String>, media: ResolvedMedia) {
        self.routes.write().insert(source.into(), Ok(media));
    }

    /// Make a source reference fail with the given backend message
    pub fn fail(&self, source: impl Into<String>, message: impl Into<String>) {
        self.routes.write().insert(source.into(), Err(message.into()));
    }
}

#[async_trait]
impl MediaResolver for MockResolver {
    async fn resolve(&self, source: &str) -> Result<ResolvedMedia, MediaError> {
        match self.routes.read().get(source) {
            Some(Ok(media)) => Ok(media.clone()),
            Some(Err(message)) => Err(MediaError::Backend(message.clone())),
            None => Err(MediaError::Unresolved(source.to_string())),
        }
    }
}
