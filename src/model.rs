//! Model data shared by the loader, cache, and node layers
//!
//! A parsed asset is a [`ModelBundle`]: an index-based subnode hierarchy with
//! lightweight meshes, animation clips, and optional descriptive metadata.
//! Bundles are immutable once parsed and shared behind `Arc` by the cache.
//! Per-attachment state (mobility classification, derived bounds, identity)
//! lives in [`ModelInstance`], which a node owns exclusively.

use glam::{Mat4, Quat, Vec3};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Local transform decomposed into translation / rotation / scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: [f32; 3],
    /// Quaternion (x, y, z, w)
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: [0.0; 3],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0; 3],
        }
    }
}

impl Transform {
    /// Compose the transform into a column-major matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::from(self.scale),
            Quat::from_array(self.rotation),
            Vec3::from(self.translation),
        )
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Degenerate box at the origin
    pub const ZERO: Aabb = Aabb {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
    };

    /// Smallest box containing every point, or `None` for an empty set
    pub fn from_points<I>(points: I) -> Option<Aabb>
    where
        I: IntoIterator<Item = [f32; 3]>,
    {
        let mut bounds: Option<Aabb> = None;
        for point in points {
            let point = Vec3::from(point);
            bounds = Some(match bounds {
                Some(aabb) => Aabb {
                    min: aabb.min.min(point),
                    max: aabb.max.max(point),
                },
                None => Aabb {
                    min: point,
                    max: point,
                },
            });
        }
        bounds
    }

    /// Smallest box containing both boxes
    pub fn merge(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Box containing all eight transformed corners
    pub fn transformed(&self, matrix: Mat4) -> Aabb {
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for corner in corners {
            let transformed = matrix.transform_point3(corner);
            min = min.min(transformed);
            max = max.max(transformed);
        }
        Aabb { min, max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Sphere enclosing the box (center at box center, radius half diagonal)
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere {
            center: self.center(),
            radius: (self.max - self.min).length() * 0.5,
        }
    }
}

/// Bounding sphere derived from an [`Aabb`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn diameter(&self) -> f32 {
        self.radius * 2.0
    }
}

/// Whether animation tracks move a subnode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mobility {
    #[default]
    Static,
    Dynamic,
}

/// One node of the bundle hierarchy (indices into [`ModelBundle`] arrays)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubNode {
    pub name: Option<String>,
    pub transform: Transform,
    pub mesh: Option<usize>,
    pub children: Vec<usize>,
}

/// Lightweight mesh: positions and indices only
///
/// Material and texture data stay with the rendering layer; this crate needs
/// geometry just for bounds derivation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub name: Option<String>,
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub local_bounds: Option<Aabb>,
}

/// Named animation clip with the subnode paths its tracks target
///
/// Track paths use the `"Name.property"` convention ("Arm.position",
/// "Head.quaternion"); the name segment may itself contain dots.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnimationClip {
    pub name: String,
    /// Clip length in seconds (maximum sampler input time)
    pub duration: f32,
    pub tracks: Vec<String>,
}

/// Descriptive metadata carried in the asset's extras (Sketchfab convention)
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AssetMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Parsed asset content, immutable and shareable
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelBundle {
    pub nodes: Vec<SubNode>,
    /// Indices of the scene root subnodes
    pub roots: Vec<usize>,
    pub meshes: Vec<Mesh>,
    pub clips: Vec<AnimationClip>,
    pub metadata: Option<AssetMetadata>,
}

impl ModelBundle {
    /// Index of the first subnode with the given name
    pub fn find_node(&self, name: &str) -> Option<usize> {
        self.nodes
            .iter()
            .position(|node| node.name.as_deref() == Some(name))
    }

    /// Merged bounds of every mesh, with hierarchy transforms applied
    pub fn local_bounds(&self) -> Option<Aabb> {
        let mut merged = None;
        for &root in &self.roots {
            self.accumulate_bounds(root, Mat4::IDENTITY, &mut merged);
        }
        merged
    }

    fn accumulate_bounds(&self, index: usize, parent: Mat4, merged: &mut Option<Aabb>) {
        let Some(node) = self.nodes.get(index) else {
            return;
        };
        let world = parent * node.transform.matrix();

        let mesh_bounds = node
            .mesh
            .and_then(|mesh| self.meshes.get(mesh))
            .and_then(|mesh| mesh.local_bounds);
        if let Some(bounds) = mesh_bounds {
            let transformed = bounds.transformed(world);
            *merged = Some(match merged.take() {
                Some(existing) => existing.merge(&transformed),
                None => transformed,
            });
        }

        for &child in &node.children {
            self.accumulate_bounds(child, world, merged);
        }
    }

    /// Rough in-memory size, used for cache accounting
    pub fn estimated_size(&self) -> usize {
        let mut size = 0;
        for mesh in &self.meshes {
            size += mesh.positions.len() * std::mem::size_of::<[f32; 3]>();
            size += mesh.indices.len() * std::mem::size_of::<u32>();
        }
        size += self.nodes.len() * std::mem::size_of::<SubNode>();
        size += self.clips.len() * std::mem::size_of::<AnimationClip>();
        size
    }
}

/// Exclusively owned attachment of shared bundle content
///
/// The content `Arc` is shared with the cache and with other instances; the
/// mobility classification and derived bounds belong to this instance alone.
#[derive(Debug, Clone)]
pub struct ModelInstance {
    id: Uuid,
    content: Arc<ModelBundle>,
    mobility: Vec<Mobility>,
    bounds: Aabb,
    sphere: BoundingSphere,
}

impl ModelInstance {
    /// Wrap shared content, deriving bounds at identity scale
    pub fn new(content: Arc<ModelBundle>) -> Self {
        let bounds = content.local_bounds().unwrap_or(Aabb::ZERO);
        let sphere = bounds.bounding_sphere();
        let mobility = vec![Mobility::Static; content.nodes.len()];
        Self {
            id: Uuid::new_v4(),
            content,
            mobility,
            bounds,
            sphere,
        }
    }

    /// Instance identity (distinct per attachment, even for shared content)
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn content(&self) -> &Arc<ModelBundle> {
        &self.content
    }

    /// Bounds of the content at identity scale
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn bounding_sphere(&self) -> BoundingSphere {
        self.sphere
    }

    /// Classification of one subnode, by bundle index
    pub fn mobility(&self, node: usize) -> Option<Mobility> {
        self.mobility.get(node).copied()
    }

    /// Number of subnodes marked dynamic
    pub fn dynamic_count(&self) -> usize {
        self.mobility
            .iter()
            .filter(|mobility| **mobility == Mobility::Dynamic)
            .count()
    }

    /// Copy sharing the same content but carrying a fresh identity
    pub fn fork(&self) -> ModelInstance {
        ModelInstance {
            id: Uuid::new_v4(),
            content: Arc::clone(&self.content),
            mobility: self.mobility.clone(),
            bounds: self.bounds,
            sphere: self.sphere,
        }
    }

    pub(crate) fn reset_mobility(&mut self) {
        self.mobility.fill(Mobility::Static);
    }

    pub(crate) fn mark_dynamic(&mut self, node: usize) {
        if let Some(slot) = self.mobility.get_mut(node) {
            *slot = Mobility::Dynamic;
        }
    }
}
