//! Async runtime abstraction for detached background loads
//!
//! Node loads are spawned through a runtime-agnostic trait, so the crate
//! works with any async runtime (tokio, async-std, custom executors). The
//! trait is object-safe: the node layer holds spawners behind
//! `Arc<dyn AsyncSpawner>`.

pub mod mock;
#[cfg(feature = "runtime-tokio")]
pub mod tokio_impl;

use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;

/// Pinned `Send` future, the form [`AsyncSpawner::spawn_boxed`] accepts
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Type-erased handle to a spawned task
///
/// Callers that know the backing runtime can downcast to its native handle
/// type and await it.
#[derive(Debug)]
pub struct JoinHandle {
    inner: Box<dyn std::any::Any + Send>,
}

impl JoinHandle {
    /// Wrap a runtime-native handle, or `()` when there is nothing to await
    pub fn new<T: Send + 'static>(handle: T) -> Self {
        Self {
            inner: Box::new(handle),
        }
    }

    /// Recover the native handle, if `T` matches what was wrapped
    pub fn downcast<T: 'static>(self) -> Option<T> {
        self.inner.downcast::<T>().ok().map(|boxed| *boxed)
    }
}

/// Object-safe async task spawner
///
/// Implementations hand the boxed task to their runtime; the generic sugar
/// lives on [`SpawnerExt`].
pub trait AsyncSpawner: Send + Sync + Debug {
    /// Hand a boxed task to the runtime to run in the background
    fn spawn_boxed(&self, task: BoxFuture<'static, ()>) -> JoinHandle;

    /// Short runtime label for `Debug` output and log lines
    fn runtime_name(&self) -> &'static str;
}

/// Generic spawn convenience over [`AsyncSpawner`]
pub trait SpawnerExt: AsyncSpawner {
    /// Pin and box a future, then spawn it
    ///
    /// The task runs in the background and can be awaited via the returned
    /// handle where the runtime supports it.
    fn spawn<F>(&self, task: F) -> JoinHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.spawn_boxed(Box::pin(task))
    }
}

impl<S: AsyncSpawner + ?Sized> SpawnerExt for S {}

pub use mock::{MockSpawnBehavior, MockSpawner};

#[cfg(feature = "runtime-tokio")]
pub use tokio_impl::TokioSpawner;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_handle_downcast() {
        let handle = JoinHandle::new(42u32);
        let value = handle.downcast::<u32>();
        assert_eq!(value, Some(42));
    }

    #[test]
    fn test_join_handle_wrong_type() {
        let handle = JoinHandle::new(42u32);
        let value = handle.downcast::<String>();
        assert!(value.is_none());
    }

    #[test]
    fn test_spawn_through_trait_object() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let spawner: Arc<dyn AsyncSpawner> = Arc::new(MockSpawner::blocking());
        let ran = Arc::new(AtomicBool::new(false));
        let ran_clone = ran.clone();

        spawner.spawn(async move {
            ran_clone.store(true, Ordering::SeqCst);
        });

        assert!(ran.load(Ordering::SeqCst));
    }
}
