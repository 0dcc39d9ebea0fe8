//! Scene change notification
//!
//! Nodes announce visible changes (a finished load, a failure, new
//! component values) through a [`SceneChangeSink`]. Hosts plug in their
//! own sink to drive re-renders or editor refreshes; tests use
//! [`RecordingSink`] to assert on what was announced.

use crate::node::{AssetNode, LoadState};
use parking_lot::Mutex;
use uuid::Uuid;

/// Receiver for node change announcements
///
/// Implementations must tolerate being called from whatever context the
/// configured spawner runs load tasks on.
pub trait SceneChangeSink: Send + Sync + std::fmt::Debug {
    /// Called after a node's observable state changed
    fn notify(&self, node: &AssetNode);
}

/// Sink that ignores every announcement
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl SceneChangeSink for NullSink {
    fn notify(&self, _node: &AssetNode) {}
}

/// Sink that records announcements for inspection
///
/// Stores the node id and load state captured at notification time, in
/// arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(Uuid, LoadState)>>,
}

impl RecordingSink {
    /// Create an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events, oldest first
    pub fn events(&self) -> Vec<(Uuid, LoadState)> {
        self.events.lock().clone()
    }

    /// Number of recorded events
    pub fn count(&self) -> usize {
        self.events.lock().len()
    }
}

impl SceneChangeSink for RecordingSink {
    fn notify(&self, node: &AssetNode) {
        self.events.lock().push((node.id(), node.load_state()));
    }
}
