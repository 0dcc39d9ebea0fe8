//! glTF / GLB parsing into [`ModelBundle`]
//!
//! Accepts binary GLB (embedded buffers) as well as JSON glTF with data-URI
//! buffers. Only what the node layer consumes is pulled out of the document:
//! the named subnode hierarchy with transforms, mesh positions for bounds
//! derivation, animation clips with their track target paths, and the
//! asset's descriptive extras.

use super::ModelError;
use crate::model::{Aabb, AnimationClip, AssetMetadata, Mesh, ModelBundle, SubNode, Transform};
use gltf::animation::Property;
use std::collections::HashSet;
use std::path::Path;

/// Load a bundle from a file path
pub fn load_bundle_file<P: AsRef<Path>>(path: P) -> Result<ModelBundle, ModelError> {
    let data = std::fs::read(path)?;
    load_bundle_bytes(&data)
}

/// Load a bundle from raw glTF / GLB bytes
pub fn load_bundle_bytes(data: &[u8]) -> Result<ModelBundle, ModelError> {
    let (document, buffers, _images) = gltf::import_slice(data)?;

    let meshes: Vec<Mesh> = document
        .meshes()
        .map(|mesh| {
            let mut positions: Vec<[f32; 3]> = Vec::new();
            let mut indices: Vec<u32> = Vec::new();

            // Primitives are merged per mesh; the subnode hierarchy indexes
            // meshes, not primitives.
            for primitive in mesh.primitives() {
                let reader = primitive
                    .reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

                let base = positions.len() as u32;
                let added = if let Some(iter) = reader.read_positions() {
                    let before = positions.len();
                    positions.extend(iter);
                    positions.len() - before
                } else {
                    0
                };

                if let Some(iter) = reader.read_indices() {
                    indices.extend(iter.into_u32().map(|index| base + index));
                } else {
                    log::debug!("Primitive has no indices, generating sequential indices");
                    indices.extend((0..added as u32).map(|index| base + index));
                }
            }

            let local_bounds = Aabb::from_points(positions.iter().copied());
            Mesh {
                name: mesh.name().map(|s| s.to_string()),
                positions,
                indices,
                local_bounds,
            }
        })
        .collect();

    let nodes: Vec<SubNode> = document
        .nodes()
        .map(|node| {
            let (translation, rotation, scale) = node.transform().decomposed();
            SubNode {
                name: node.name().map(|s| s.to_string()),
                transform: Transform {
                    translation,
                    rotation,
                    scale,
                },
                mesh: node.mesh().map(|mesh| mesh.index()),
                children: node.children().map(|child| child.index()).collect(),
            }
        })
        .collect();

    let roots = scene_roots(&document);

    let clips: Vec<AnimationClip> = document
        .animations()
        .enumerate()
        .map(|(index, animation)| {
            let mut tracks = Vec::new();
            let mut duration = 0.0f32;

            for channel in animation.channels() {
                let reader = channel
                    .reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
                if let Some(inputs) = reader.read_inputs() {
                    for time in inputs {
                        duration = duration.max(time);
                    }
                }

                let target = channel.target();
                match target.node().name() {
                    Some(name) => {
                        tracks.push(format!("{name}.{}", channel_suffix(target.property())));
                    }
                    None => {
                        // A nameless target can never bind; drop the track.
                        log::debug!(
                            "Animation channel targets unnamed node {}",
                            target.node().index()
                        );
                    }
                }
            }

            AnimationClip {
                name: animation
                    .name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("animation_{index}")),
                duration,
                tracks,
            }
        })
        .collect();

    log::debug!(
        "Parsed bundle with {} nodes, {} meshes, {} clips",
        nodes.len(),
        meshes.len(),
        clips.len()
    );

    // Extras live on the JSON root; the walk above is done with the document.
    let metadata = parse_metadata(&document.into_json().asset);

    Ok(ModelBundle {
        nodes,
        roots,
        meshes,
        clips,
        metadata,
    })
}

/// Root indices of the default scene, falling back to parentless nodes
fn scene_roots(document: &gltf::Document) -> Vec<usize> {
    if let Some(scene) = document.default_scene().or_else(|| document.scenes().next()) {
        return scene.nodes().map(|node| node.index()).collect();
    }

    let children: HashSet<usize> = document
        .nodes()
        .flat_map(|node| node.children().map(|child| child.index()))
        .collect();
    document
        .nodes()
        .map(|node| node.index())
        .filter(|index| !children.contains(index))
        .collect()
}

/// Track path suffix for an animated property (three.js channel names, which
/// the persisted component schema is shared with)
fn channel_suffix(property: Property) -> &'static str {
    match property {
        Property::Translation => "position",
        Property::Rotation => "quaternion",
        Property::Scale => "scale",
        Property::MorphTargetWeights => "morphTargetInfluences",
    }
}

fn parse_metadata(asset: &gltf::json::Asset) -> Option<AssetMetadata> {
    let raw = asset.extras.as_deref()?;
    match serde_json::from_str::<AssetMetadata>(raw.get()) {
        Ok(metadata)
            if metadata.title.is_some()
                || metadata.author.is_some()
                || metadata.source.is_some() =>
        {
            Some(metadata)
        }
        Ok(_) => None,
        Err(err) => {
            log::debug!("Ignoring malformed asset extras: {err}");
            None
        }
    }
}
