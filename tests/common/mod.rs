//! Shared helpers for integration tests
#![allow(dead_code)]

use maquette::{Aabb, Mesh, ModelBundle, SubNode};
use serde_json::{json, Value};
use std::path::Path;

/// Build a minimal binary glTF in memory
///
/// One node carrying a degenerate triangle spanning `[-half_extent,
/// half_extent]` on x, so the bundle's bounding sphere diameter is
/// exactly `2 * half_extent`. Optionally adds one rotation clip
/// targeting the node and descriptive metadata in the asset extras.
pub fn build_glb(
    node_name: &str,
    half_extent: f32,
    clip_name: Option<&str>,
    extras: Option<Value>,
) -> Vec<u8> {
    let h = half_extent;
    let positions: [f32; 9] = [-h, 0.0, 0.0, h, 0.0, 0.0, 0.0, 0.0, 0.0];
    let indices: [u32; 3] = [0, 1, 2];

    let mut bin: Vec<u8> = Vec::new();
    bin.extend_from_slice(bytemuck::cast_slice(&positions));
    bin.extend_from_slice(bytemuck::cast_slice(&indices));
    if clip_name.is_some() {
        let times: [f32; 2] = [0.0, 1.0];
        let rotations: [f32; 8] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        bin.extend_from_slice(bytemuck::cast_slice(&times));
        bin.extend_from_slice(bytemuck::cast_slice(&rotations));
    }

    let mut asset = json!({"version": "2.0"});
    if let Some(extras) = extras {
        asset["extras"] = extras;
    }

    let mut buffer_views = vec![
        json!({"buffer": 0, "byteOffset": 0, "byteLength": 36}),
        json!({"buffer": 0, "byteOffset": 36, "byteLength": 12}),
    ];
    let mut accessors = vec![
        json!({
            "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
            "min": [-h, 0.0, 0.0], "max": [h, 0.0, 0.0]
        }),
        json!({"bufferView": 1, "componentType": 5125, "count": 3, "type": "SCALAR"}),
    ];

    let mut root = json!({
        "asset": asset,
        "buffers": [{"byteLength": bin.len()}],
        "meshes": [{"primitives": [{"attributes": {"POSITION": 0}, "indices": 1}]}],
        "nodes": [{"name": node_name, "mesh": 0}],
        "scenes": [{"nodes": [0]}],
        "scene": 0
    });

    if let Some(clip) = clip_name {
        buffer_views.push(json!({"buffer": 0, "byteOffset": 48, "byteLength": 8}));
        buffer_views.push(json!({"buffer": 0, "byteOffset": 56, "byteLength": 32}));
        accessors.push(json!({
            "bufferView": 2, "componentType": 5126, "count": 2, "type": "SCALAR",
            "min": [0.0], "max": [1.0]
        }));
        accessors.push(json!({"bufferView": 3, "componentType": 5126, "count": 2, "type": "VEC4"}));
        root["animations"] = json!([{
            "name": clip,
            "samplers": [{"input": 2, "output": 3, "interpolation": "LINEAR"}],
            "channels": [{"sampler": 0, "target": {"node": 0, "path": "rotation"}}]
        }]);
    }
    root["bufferViews"] = Value::Array(buffer_views);
    root["accessors"] = Value::Array(accessors);

    glb_wrap(root.to_string().into_bytes(), bin)
}

/// Wrap a JSON document and binary payload in GLB container framing
fn glb_wrap(mut json: Vec<u8>, mut bin: Vec<u8>) -> Vec<u8> {
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    while bin.len() % 4 != 0 {
        bin.push(0);
    }

    let total = 12 + 8 + json.len() + 8 + bin.len();
    let mut glb = Vec::with_capacity(total);
    glb.extend_from_slice(b"glTF");
    glb.extend_from_slice(&2u32.to_le_bytes());
    glb.extend_from_slice(&(total as u32).to_le_bytes());
    glb.extend_from_slice(&(json.len() as u32).to_le_bytes());
    glb.extend_from_slice(b"JSON");
    glb.extend_from_slice(&json);
    glb.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    glb.extend_from_slice(b"BIN\0");
    glb.extend_from_slice(&bin);
    glb
}

/// Write GLB bytes into `dir` and return a file:// reference to them
pub fn write_glb(dir: &Path, file: &str, bytes: &[u8]) -> String {
    let path = dir.join(file);
    std::fs::write(&path, bytes).unwrap();
    format!("file://{}", path.display())
}

/// Synthetic single-node bundle with sphere diameter `2 * half_extent`
///
/// For seeding a cache directly when a test does not care about the
/// glTF parsing path.
pub fn seeded_bundle(node_name: &str, half_extent: f32) -> ModelBundle {
    seeded_bundle_with_clips(node_name, half_extent, &[])
}

/// Like [`seeded_bundle`], with named clips targeting the node
pub fn seeded_bundle_with_clips(
    node_name: &str,
    half_extent: f32,
    clip_names: &[&str],
) -> ModelBundle {
    let h = half_extent;
    let positions = vec![[-h, 0.0, 0.0], [h, 0.0, 0.0], [0.0, 0.0, 0.0]];
    let local_bounds = Aabb::from_points(positions.iter().copied());

    ModelBundle {
        nodes: vec![SubNode {
            name: Some(node_name.to_string()),
            mesh: Some(0),
            ..Default::default()
        }],
        roots: vec![0],
        meshes: vec![Mesh {
            name: None,
            positions,
            indices: vec![0, 1, 2],
            local_bounds,
        }],
        clips: clip_names
            .iter()
            .map(|name| maquette::AnimationClip {
                name: name.to_string(),
                duration: 1.0,
                tracks: vec![format!("{}.quaternion", node_name)],
            })
            .collect(),
        metadata: None,
    }
}
