//! Test spawner with scripted behavior
//!
//! Runs spawned tasks synchronously, drops them entirely, or queues
//! them for the test to run in a chosen order (the deferred mode is how
//! overlapping-load ordering is exercised).

use super::{AsyncSpawner, BoxFuture, JoinHandle};
use parking_lot::Mutex;
use std::sync::Arc;

/// Spawn behavior for [`MockSpawner`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockSpawnBehavior {
    /// Discard tasks without running them
    Drop,
    /// Run each task to completion inside `spawn`, on the calling thread
    BlockSync,
    /// Queue tasks; the test decides when and in which order they run
    Defer,
}

/// Scripted spawner for tests
///
/// Clones share the deferred queue, so a test can hand one clone to a
/// [`LoadContext`](crate::LoadContext) and keep another to drive it.
#[derive(Clone)]
pub struct MockSpawner {
    behavior: MockSpawnBehavior,
    deferred: Arc<Mutex<Vec<BoxFuture<'static, ()>>>>,
}

impl Default for MockSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSpawner {
    /// Spawner that drops every task
    pub fn new() -> Self {
        Self::with_behavior(MockSpawnBehavior::Drop)
    }

    pub fn with_behavior(behavior: MockSpawnBehavior) -> Self {
        Self {
            behavior,
            deferred: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Spawner that runs every task to completion inside `spawn`
    pub fn blocking() -> Self {
        Self::with_behavior(MockSpawnBehavior::BlockSync)
    }

    /// Spawner that queues tasks for the caller to run
    pub fn deferred() -> Self {
        Self::with_behavior(MockSpawnBehavior::Defer)
    }

    /// Number of queued tasks
    pub fn queued(&self) -> usize {
        self.deferred.lock().len()
    }

    /// Take every queued task, in spawn order; the caller runs them
    pub fn take_deferred(&self) -> Vec<BoxFuture<'static, ()>> {
        std::mem::take(&mut *self.deferred.lock())
    }

    /// Run every queued task to completion, in spawn order
    pub fn run_deferred(&self) {
        for task in self.take_deferred() {
            futures::executor::block_on(task);
        }
    }
}

impl std::fmt::Debug for MockSpawner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSpawner")
            .field("behavior", &self.behavior)
            .field("queued", &self.queued())
            .finish()
    }
}

impl AsyncSpawner for MockSpawner {
    fn spawn_boxed(&self, task: BoxFuture<'static, ()>) -> JoinHandle {
        match self.behavior {
            MockSpawnBehavior::Drop => {
                drop(task);
                JoinHandle::new(())
            }
            MockSpawnBehavior::BlockSync => {
                futures::executor::block_on(task);
                JoinHandle::new(())
            }
            MockSpawnBehavior::Defer => {
                self.deferred.lock().push(task);
                JoinHandle::new(())
            }
        }
    }

    fn runtime_name(&self) -> &'static str {
        "Mock"
    }
}
