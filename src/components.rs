//! Component serialization
//!
//! A node persists as an ordered list of named components, each a
//! `{"name": ..., "props": {...}}` record in the scene file. The same
//! schema feeds the editor's save/load and undo systems, so the field
//! names here are a wire contract, not an implementation detail.
//!
//! Serialization has two shapes: [`AssetNode::to_components`] for the
//! editable project file and [`AssetNode::export_components`] for a
//! published scene, where reference nodes become a lightweight
//! placeholder the runtime resolves lazily instead of embedded
//! geometry.

use crate::attribution::Attribution;
use crate::node::{AssetNode, LoadContext};
use serde::{Deserialize, Serialize};

/// One persisted component of a node
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "props", rename_all = "kebab-case")]
pub enum NodeComponent {
    Model {
        src: String,
        attribution: Option<AttributionField>,
        reference: bool,
    },
    Shadow {
        cast: bool,
        receive: bool,
    },
    LoopAnimation {
        clip: String,
    },
    Collidable {},
    Walkable {},
    #[serde(rename_all = "camelCase")]
    MediaLoaderReference {
        src: String,
        resolve_on_load: bool,
    },
}

/// Attribution as persisted: structured, or the legacy single string
///
/// Old scenes stored `"Title by Author"`; reading upgrades it, writing
/// always produces the structured form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributionField {
    Structured(Attribution),
    Legacy(String),
}

impl AttributionField {
    /// Normalize to the structured form
    pub fn upgrade(self) -> Attribution {
        match self {
            AttributionField::Structured(attribution) => attribution,
            AttributionField::Legacy(text) => Attribution::from_legacy(&text),
        }
    }
}

impl AssetNode {
    /// Serialize for the project file
    ///
    /// The model and shadow components are always present; the others
    /// only when they carry information, so their presence doubles as
    /// the flag value on the way back in.
    pub fn to_components(&self) -> Vec<NodeComponent> {
        let state = self.snapshot();

        let mut components = vec![
            NodeComponent::Model {
                src: state.model.source.unwrap_or_default(),
                attribution: state.attribution.map(AttributionField::Structured),
                reference: state.is_reference,
            },
            NodeComponent::Shadow {
                cast: state.cast_shadow,
                receive: state.receive_shadow,
            },
        ];
        if let Some(first) = state.clip_names.first() {
            components.push(NodeComponent::LoopAnimation { clip: first.clone() });
        }
        if state.collidable {
            components.push(NodeComponent::Collidable {});
        }
        if state.walkable {
            components.push(NodeComponent::Walkable {});
        }
        components
    }

    /// Construct a node from its persisted components and start loading
    ///
    /// Returns before the load settles; the fetch runs as a detached
    /// background task through the context's spawner. Panics when the
    /// list has no model component; providing one is the caller's
    /// contract.
    pub fn from_components(ctx: LoadContext, components: &[NodeComponent]) -> AssetNode {
        let node = AssetNode::new(ctx);

        let (src, attribution, reference) = components
            .iter()
            .find_map(|component| match component {
                NodeComponent::Model {
                    src,
                    attribution,
                    reference,
                } => Some((src.clone(), attribution.clone(), *reference)),
                _ => None,
            })
            .expect("node component list is missing the required model component");

        let mut collidable = false;
        let mut walkable = false;
        for component in components {
            match component {
                NodeComponent::Shadow { cast, receive } => {
                    node.set_cast_shadow(*cast);
                    node.set_receive_shadow(*receive);
                }
                NodeComponent::LoopAnimation { clip } => node.seed_clip(clip.clone()),
                NodeComponent::Collidable {} => collidable = true,
                NodeComponent::Walkable {} => walkable = true,
                _ => {}
            }
        }
        node.set_collidable(collidable);
        node.set_walkable(walkable);

        if let Some(field) = attribution {
            node.set_attribution(Some(field.upgrade()));
        }
        node.set_is_reference(reference);
        node.set_source(src);
        node
    }

    /// Serialize for a published scene
    ///
    /// Never emits the model component. A reference node instead gets a
    /// media-loader-reference placeholder carrying its source, legal
    /// even when nothing was ever loaded.
    pub fn export_components(&self) -> Vec<NodeComponent> {
        let state = self.snapshot();

        let mut components = vec![NodeComponent::Shadow {
            cast: state.cast_shadow,
            receive: state.receive_shadow,
        }];
        if let Some(first) = state.clip_names.first() {
            components.push(NodeComponent::LoopAnimation { clip: first.clone() });
        }
        if state.is_reference {
            components.push(NodeComponent::MediaLoaderReference {
                src: state.model.source.unwrap_or_default(),
                resolve_on_load: true,
            });
        }
        components
    }
}
