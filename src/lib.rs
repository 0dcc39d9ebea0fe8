//! maquette - Scene-graph asset nodes with background model loading
//!
//! # Features
//! - Asset nodes with last-writer-wins source supersession
//! - Async runtime abstraction (Tokio, custom, synchronous mocks)
//! - Shared model cache keyed by resolved URL
//! - Heuristic scale normalization for off-scale content
//! - Animation-driven static/dynamic subnode classification
//! - Component serialization compatible with persisted scene files
//!
//! # Quick Start
//!
//! ```ignore
//! use maquette::{AssetNode, LoadContext, MockSpawner, PassthroughResolver, SharedModelCache};
//! use std::sync::Arc;
//!
//! let ctx = LoadContext::new(
//!     Arc::new(PassthroughResolver),
//!     Arc::new(SharedModelCache::new()),
//!     Arc::new(MockSpawner::blocking()),
//! );
//! let node = AssetNode::new(ctx);
//! node.set_source("file://models/lamp.glb");
//! assert!(node.is_loaded());
//! ```
//!
//! # Feature Flags
//!
//! - `runtime-tokio`: Enable the Tokio async runtime

// Core modules
pub mod binder;
pub mod cache;
pub mod components;
pub mod loader;
pub mod media;
pub mod node;
pub mod runtime;

// Support modules
pub mod attribution;
pub mod model;
pub mod sink;

// Error types
mod error;
pub use error::{NodeError, Result};

// Re-export node types
pub use node::{AssetNode, LoadContext, LoadState, SceneNode};

// Re-export component types
pub use components::{AttributionField, NodeComponent};

// Re-export cache types
pub use cache::metrics::{CacheMetrics, CacheMetricsHandle};
pub use cache::{AssetCache, CacheError, SharedModelCache};

// Re-export media types
pub use media::{MediaError, MediaResolver, MockResolver, PassthroughResolver, ResolvedMedia};

// Re-export runtime types
pub use runtime::mock::{MockSpawnBehavior, MockSpawner};
#[cfg(feature = "runtime-tokio")]
pub use runtime::tokio_impl::TokioSpawner;
pub use runtime::{AsyncSpawner, JoinHandle, SpawnerExt};

// Re-export model types
pub use model::{
    Aabb, AnimationClip, AssetMetadata, BoundingSphere, Mesh, Mobility, ModelBundle,
    ModelInstance, SubNode, Transform,
};

// Re-export loader types
pub use loader::{load_bundle_bytes, load_bundle_file, ModelError};

// Re-export attribution types
pub use attribution::Attribution;

// Re-export sink types
pub use sink::{NullSink, RecordingSink, SceneChangeSink};

// Version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
