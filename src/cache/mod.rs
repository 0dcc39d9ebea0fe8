//! Bundle caching keyed by resolved URL
//!
//! The cache is an injected collaborator of the node layer: nodes ask it for
//! parsed bundles by accessible URL and treat the content as read-mostly.
//! Within a session the content for a URL is stable, so repeated gets hand
//! out the same shared bundle.

pub mod metrics;

use crate::loader;
use crate::model::ModelBundle;
use async_trait::async_trait;
use metrics::CacheMetricsHandle;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use xxhash_rust::xxh3::xxh3_64;

/// Error type for cache operations
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model error: {0}")]
    Model(#[from] loader::ModelError),

    #[error("Cache backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Async bundle cache abstraction
///
/// Implementations must keep content stable per URL for the session: two
/// `get` calls with the same URL observe the same bundle.
#[async_trait]
pub trait AssetCache: Send + Sync {
    /// Fetch the bundle for a resolved URL, loading it on first request
    async fn get(&self, url: &str) -> Result<Arc<ModelBundle>, CacheError>;
}

/// Shared, read-mostly bundle cache
///
/// Keys are xxh3 hashes of the accessible URL. Misses are served from the
/// local filesystem (`file://` prefixes are accepted); pre-parsed bundles can
/// be seeded with [`SharedModelCache::insert`]. Clones share the same
/// underlying store.
#[derive(Debug, Clone, Default)]
pub struct SharedModelCache {
    entries: Arc<RwLock<HashMap<u64, Arc<ModelBundle>>>>,
    metrics: CacheMetricsHandle,
}

impl SharedModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a pre-parsed bundle for a URL
    pub fn insert(&self, url: &str, bundle: ModelBundle) -> Arc<ModelBundle> {
        let bundle = Arc::new(bundle);
        self.metrics
            .record_memory_usage(url.to_string(), bundle.estimated_size());
        self.entries
            .write()
            .insert(Self::hash_url(url), Arc::clone(&bundle));
        bundle
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.read().contains_key(&Self::hash_url(url))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every cached bundle (outstanding `Arc`s stay alive)
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Performance counters for this cache
    pub fn metrics(&self) -> &CacheMetricsHandle {
        &self.metrics
    }

    fn hash_url(url: &str) -> u64 {
        xxh3_64(url.as_bytes())
    }

    fn local_path(url: &str) -> &Path {
        Path::new(url.strip_prefix("file://").unwrap_or(url))
    }
}

#[async_trait]
impl AssetCache for SharedModelCache {
    async fn get(&self, url: &str) -> Result<Arc<ModelBundle>, CacheError> {
        let key = Self::hash_url(url);

        {
            let entries = self.entries.read();
            if let Some(bundle) = entries.get(&key) {
                self.metrics.record_hit();
                return Ok(Arc::clone(bundle));
            }
        }
        self.metrics.record_miss();

        let start = std::time::Instant::now();
        let bundle = loader::load_bundle_file(Self::local_path(url))?;
        let bundle = Arc::new(bundle);

        self.metrics.record_load_time(url.to_string(), start.elapsed());
        self.metrics
            .record_memory_usage(url.to_string(), bundle.estimated_size());

        // A concurrent miss may have inserted first; keep the existing entry
        // so content stays stable for the URL.
        let mut entries = self.entries.write();
        let entry = entries.entry(key).or_insert(bundle);
        Ok(Arc::clone(entry))
    }
}
