//! Basic asset node example for maquette
//!
//! Loads a glTF/GLB file into an asset node and prints what the node
//! learned about it. Pass a path on the command line:
//!
//!     cargo run --example basic_node -- assets/lamp.glb

use maquette::{
    AssetNode, LoadContext, LoadState, MockSpawner, PassthroughResolver, SharedModelCache,
};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("maquette v{}", maquette::VERSION);

    let Some(path) = std::env::args().nth(1) else {
        println!("Usage: basic_node <path-to-gltf-or-glb>");
        return Ok(());
    };

    let cache = SharedModelCache::new();
    let ctx = LoadContext::new(
        Arc::new(PassthroughResolver),
        Arc::new(cache.clone()),
        Arc::new(MockSpawner::blocking()),
    );

    let node = AssetNode::new(ctx);
    node.request_scale_normalization();
    node.set_source(path.as_str());

    match node.load_state() {
        LoadState::Loaded => println!("Loaded {}", path),
        LoadState::Failed(detail) => anyhow::bail!("load failed: {}", detail),
        other => anyhow::bail!("unexpected load state: {:?}", other),
    }

    if let Some(instance) = node.instance() {
        let bounds = instance.bounds();
        println!("  instance: {}", instance.id());
        println!("  subnodes: {}", instance.content().nodes.len());
        println!("  dynamic subnodes: {}", instance.dynamic_count());
        println!("  bounds: {:?} .. {:?}", bounds.min, bounds.max);
        println!(
            "  sphere diameter: {:.3}",
            instance.bounding_sphere().diameter()
        );
    }
    println!("  normalized scale: {:?}", node.transform().scale);

    if let Some(attribution) = node.attribution() {
        println!(
            "  credit: {} by {}",
            attribution.name,
            attribution.author.unwrap_or_default()
        );
    }
    if !node.clip_names().is_empty() {
        println!("  clips: {:?}", node.clip_names());
    }

    println!("\nPersisted components:");
    println!("{}", serde_json::to_string_pretty(&node.to_components())?);

    println!(
        "\nCache now holds {} bundle(s), {} bytes resident",
        cache.len(),
        cache.metrics().resident_bytes()
    );

    Ok(())
}
