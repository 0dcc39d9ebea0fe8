//! Integration tests for async runtime abstraction

mod common;

use maquette::{AsyncSpawner, MockSpawner, SpawnerExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[test]
fn test_mock_spawner_integration() {
    let spawner = MockSpawner::blocking();

    let executed = Arc::new(AtomicBool::new(false));
    let executed_clone = Arc::clone(&executed);

    spawner.spawn(async move {
        executed_clone.store(true, Ordering::SeqCst);
    });

    // In blocking mode, should execute immediately
    assert!(executed.load(Ordering::SeqCst));
}

#[test]
fn test_spawner_trait_bound() {
    fn spawn_task<S: AsyncSpawner>(spawner: &S) {
        spawner.spawn(async {});
    }

    let spawner = MockSpawner::new();
    spawn_task(&spawner);
}

#[test]
fn test_spawner_as_trait_object() {
    let spawner: Arc<dyn AsyncSpawner> = Arc::new(MockSpawner::blocking());

    let executed = Arc::new(AtomicBool::new(false));
    let executed_clone = Arc::clone(&executed);

    spawner.spawn(async move {
        executed_clone.store(true, Ordering::SeqCst);
    });

    assert!(executed.load(Ordering::SeqCst));
}

#[test]
fn test_deferred_spawner_controls_completion() {
    let spawner = MockSpawner::deferred();

    let executed = Arc::new(AtomicBool::new(false));
    let executed_clone = Arc::clone(&executed);

    spawner.spawn(async move {
        executed_clone.store(true, Ordering::SeqCst);
    });

    assert!(!executed.load(Ordering::SeqCst));
    assert_eq!(spawner.queued(), 1);

    spawner.run_deferred();
    assert!(executed.load(Ordering::SeqCst));
}

#[cfg(feature = "runtime-tokio")]
mod tokio_runtime {
    use maquette::{AssetNode, LoadContext, LoadState, PassthroughResolver, SharedModelCache, TokioSpawner};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_node_loads_on_tokio() {
        let cache = SharedModelCache::new();
        cache.insert("mem://lamp", crate::common::seeded_bundle("Lamp", 1.0));

        let ctx = LoadContext::new(
            Arc::new(PassthroughResolver),
            Arc::new(cache),
            Arc::new(TokioSpawner::new()),
        );
        let node = AssetNode::new(ctx);

        let handle = node.set_source("mem://lamp");
        let join = handle.downcast::<tokio::task::JoinHandle<()>>().unwrap();
        join.await.unwrap();

        assert_eq!(node.load_state(), LoadState::Loaded);
    }
}
