//! Tokio-backed spawner, behind the `runtime-tokio` feature

use super::{AsyncSpawner, BoxFuture, JoinHandle};

/// Spawner dispatching load tasks onto the ambient Tokio runtime
///
/// Must be used from within a Tokio runtime context; the returned
/// [`JoinHandle`] downcasts to `tokio::task::JoinHandle<()>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSpawner;

impl TokioSpawner {
    pub fn new() -> Self {
        Self
    }
}

impl AsyncSpawner for TokioSpawner {
    fn spawn_boxed(&self, task: BoxFuture<'static, ()>) -> JoinHandle {
        let handle = tokio::spawn(task);
        JoinHandle::new(handle)
    }

    fn runtime_name(&self) -> &'static str {
        "Tokio"
    }
}
