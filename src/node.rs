//! Asset node lifecycle
//!
//! An [`AssetNode`] is one element of an editable scene graph showing one
//! loadable model. [`AssetNode::set_source`] records a logical source
//! reference and spawns a background load through the configured
//! resolver, cache and spawner; completion attaches a fresh
//! [`ModelInstance`], runs mobility classification and attribution
//! extraction, and announces the change through the scene sink.
//!
//! The source reference doubles as the request identity. A load that
//! finishes after the node has moved on to a different source compares
//! its captured reference against the current one and discards its
//! result silently, so overlapping `set_source` calls are last-writer-
//! wins without an explicit cancel API.
//!
//! All visible state sits behind a single lock; a completing load
//! mutates attachment, bounds, classification and clip bindings under
//! one write guard, so observers never see a half-updated node.

use crate::attribution::{self, Attribution};
use crate::binder;
use crate::cache::AssetCache;
use crate::components::NodeComponent;
use crate::error::NodeError;
use crate::media::MediaResolver;
use crate::model::{Aabb, BoundingSphere, ModelBundle, ModelInstance, Transform};
use crate::runtime::{AsyncSpawner, JoinHandle, SpawnerExt};
use crate::sink::{NullSink, SceneChangeSink};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Load progress of a node's model
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    /// No source set, or the source was cleared
    #[default]
    Empty,
    /// A load is in flight for the current source
    Loading,
    /// The current source's model is attached
    Loaded,
    /// The last load failed; carries the captured error detail
    Failed(String),
}

/// Collaborators a node loads through
///
/// Shared by every node of a scene. The sink defaults to [`NullSink`];
/// hosts that re-render on change install their own with
/// [`LoadContext::with_sink`].
#[derive(Clone)]
pub struct LoadContext {
    pub resolver: Arc<dyn MediaResolver>,
    pub cache: Arc<dyn AssetCache>,
    pub spawner: Arc<dyn AsyncSpawner>,
    pub sink: Arc<dyn SceneChangeSink>,
}

impl LoadContext {
    /// Create a context with no change sink
    pub fn new(
        resolver: Arc<dyn MediaResolver>,
        cache: Arc<dyn AssetCache>,
        spawner: Arc<dyn AsyncSpawner>,
    ) -> Self {
        Self {
            resolver,
            cache,
            spawner,
            sink: Arc::new(NullSink),
        }
    }

    /// Install a scene-change sink
    pub fn with_sink(mut self, sink: Arc<dyn SceneChangeSink>) -> Self {
        self.sink = sink;
        self
    }
}

impl fmt::Debug for LoadContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadContext")
            .field("runtime", &self.spawner.runtime_name())
            .finish_non_exhaustive()
    }
}

/// Load machinery state: the source identity and what it resolved to
///
/// `attached` is `Some` only in [`LoadState::Loaded`]; starting a new
/// load detaches the previous instance immediately.
#[derive(Clone, Debug, Default)]
pub(crate) struct LoadableModel {
    pub(crate) source: Option<String>,
    pub(crate) state: LoadState,
    pub(crate) attached: Option<ModelInstance>,
    pub(crate) normalize_pending: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct NodeState {
    pub(crate) transform: Transform,
    pub(crate) model: LoadableModel,
    pub(crate) attribution: Option<Attribution>,
    pub(crate) clip_names: Vec<String>,
    pub(crate) active_clip: Option<usize>,
    pub(crate) collidable: bool,
    pub(crate) walkable: bool,
    pub(crate) cast_shadow: bool,
    pub(crate) receive_shadow: bool,
    pub(crate) is_reference: bool,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            model: LoadableModel::default(),
            attribution: None,
            clip_names: Vec::new(),
            active_clip: None,
            collidable: true,
            walkable: true,
            cast_shadow: true,
            receive_shadow: true,
            is_reference: false,
        }
    }
}

#[derive(Debug)]
struct NodeInner {
    id: Uuid,
    ctx: LoadContext,
    state: RwLock<NodeState>,
}

/// Scene-graph element displaying one loadable model
///
/// Cloning yields another handle to the same node; load tasks hold one
/// while they run. Use [`AssetNode::copy_from`] for a distinct node
/// with copied state.
#[derive(Clone, Debug)]
pub struct AssetNode {
    inner: Arc<NodeInner>,
}

impl AssetNode {
    /// Create an empty node with default flags and no source
    pub fn new(ctx: LoadContext) -> Self {
        Self {
            inner: Arc::new(NodeInner {
                id: Uuid::new_v4(),
                ctx,
                state: RwLock::new(NodeState::default()),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn transform(&self) -> Transform {
        self.inner.state.read().transform
    }

    pub fn set_transform(&self, transform: Transform) {
        self.inner.state.write().transform = transform;
    }

    /// The logical source reference, resolved on every load
    pub fn source(&self) -> Option<String> {
        self.inner.state.read().model.source.clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.inner.state.read().model.state.clone()
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.load_state(), LoadState::Loaded)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load_state(), LoadState::Loading)
    }

    /// Snapshot of the attached instance, if any
    pub fn instance(&self) -> Option<ModelInstance> {
        self.inner.state.read().model.attached.clone()
    }

    /// Bounds of the attached content at identity scale
    pub fn bounds(&self) -> Option<Aabb> {
        self.inner
            .state
            .read()
            .model
            .attached
            .as_ref()
            .map(ModelInstance::bounds)
    }

    pub fn attribution(&self) -> Option<Attribution> {
        self.inner.state.read().attribution.clone()
    }

    pub fn set_attribution(&self, attribution: Option<Attribution>) {
        self.inner.state.write().attribution = attribution;
    }

    /// Names of the attached model's clips, or the seeded name before
    /// the first load completes
    pub fn clip_names(&self) -> Vec<String> {
        self.inner.state.read().clip_names.clone()
    }

    pub fn active_clip(&self) -> Option<usize> {
        self.inner.state.read().active_clip
    }

    pub fn active_clip_name(&self) -> Option<String> {
        let state = self.inner.state.read();
        state
            .active_clip
            .and_then(|index| state.clip_names.get(index).cloned())
    }

    /// Select the looping clip by index into [`AssetNode::clip_names`]
    pub fn set_active_clip(&self, index: Option<usize>) -> Result<(), NodeError> {
        let mut state = self.inner.state.write();
        if let Some(index) = index {
            if index >= state.clip_names.len() {
                return Err(NodeError::InvalidClip {
                    index,
                    count: state.clip_names.len(),
                });
            }
        }
        state.active_clip = index;
        Ok(())
    }

    pub fn collidable(&self) -> bool {
        self.inner.state.read().collidable
    }

    pub fn set_collidable(&self, collidable: bool) {
        self.inner.state.write().collidable = collidable;
    }

    pub fn walkable(&self) -> bool {
        self.inner.state.read().walkable
    }

    pub fn set_walkable(&self, walkable: bool) {
        self.inner.state.write().walkable = walkable;
    }

    pub fn cast_shadow(&self) -> bool {
        self.inner.state.read().cast_shadow
    }

    pub fn set_cast_shadow(&self, cast: bool) {
        self.inner.state.write().cast_shadow = cast;
    }

    pub fn receive_shadow(&self) -> bool {
        self.inner.state.read().receive_shadow
    }

    pub fn set_receive_shadow(&self, receive: bool) {
        self.inner.state.write().receive_shadow = receive;
    }

    /// Whether exports reference the source instead of embedding it
    pub fn is_reference(&self) -> bool {
        self.inner.state.read().is_reference
    }

    pub fn set_is_reference(&self, is_reference: bool) {
        self.inner.state.write().is_reference = is_reference;
    }

    /// Ask the next completed load to apply the size heuristic once
    pub fn request_scale_normalization(&self) {
        self.inner.state.write().model.normalize_pending = true;
    }

    pub fn normalization_pending(&self) -> bool {
        self.inner.state.read().model.normalize_pending
    }

    /// Point the node at a new source and load it in the background
    ///
    /// Returns immediately; the spawned task settles the load. Setting
    /// the source that is already attached is a no-op. Failures stay
    /// inside the node as [`LoadState::Failed`], they are never
    /// returned from here.
    pub fn set_source(&self, source: impl Into<String>) -> JoinHandle {
        let source = source.into();
        {
            let mut state = self.inner.state.write();
            if state.model.attached.is_some()
                && state.model.source.as_deref() == Some(source.as_str())
            {
                return JoinHandle::new(());
            }
            state.model.source = Some(source.clone());
            state.model.state = LoadState::Loading;
            state.model.attached = None;
        }

        let node = self.clone();
        self.inner
            .ctx
            .spawner
            .spawn(async move { node.run_load(source).await })
    }

    /// Replace this node's state with a copy of `other`'s
    ///
    /// A node still waiting on its model is copied by re-issuing the
    /// load here, so both nodes resolve and fetch independently. A
    /// settled node is copied verbatim; its attached instance is forked
    /// under a fresh identity and re-classified.
    pub fn copy_from(&self, other: &AssetNode) -> JoinHandle {
        let copied = other.inner.state.read().clone();
        let reissue = matches!(copied.model.state, LoadState::Loading)
            .then(|| copied.model.source.clone())
            .flatten();

        {
            let mut state = self.inner.state.write();
            *state = copied;
            if let Some(instance) = state.model.attached.as_mut() {
                *instance = instance.fork();
                binder::classify(instance);
            }
        }

        match reissue {
            Some(source) => self.set_source(source),
            None => {
                self.inner.ctx.sink.notify(self);
                JoinHandle::new(())
            }
        }
    }

    /// Settle one load of `source`, captured at spawn time
    async fn run_load(self, source: String) {
        let outcome = self.fetch(&source).await;

        let mut state = self.inner.state.write();
        if state.model.source.as_deref() != Some(source.as_str()) {
            // Superseded while in flight; a newer load owns the node now.
            log::debug!("discarding superseded load of '{}'", source);
            return;
        }

        match outcome {
            Ok(bundle) => {
                let mut instance = ModelInstance::new(bundle);
                if state.model.normalize_pending {
                    apply_normalization(&mut state.transform, instance.bounding_sphere());
                }
                state.model.normalize_pending = false;

                binder::classify(&mut instance);
                if let Some(found) =
                    attribution::extract(instance.content().metadata.as_ref(), &source)
                {
                    state.attribution = Some(found);
                }

                let previous_active = state
                    .active_clip
                    .and_then(|index| state.clip_names.get(index).cloned());
                state.clip_names = instance
                    .content()
                    .clips
                    .iter()
                    .map(|clip| clip.name.clone())
                    .collect();
                state.active_clip = previous_active
                    .and_then(|name| state.clip_names.iter().position(|n| *n == name));

                state.model.attached = Some(instance);
                state.model.state = LoadState::Loaded;
            }
            Err(err) => {
                log::warn!("failed to load model '{}': {}", source, err);
                state.model.normalize_pending = false;
                state.model.state = LoadState::Failed(err.to_string());
            }
        }

        drop(state);
        self.inner.ctx.sink.notify(&self);
    }

    /// Resolve the source to an accessible URL, then fetch its bundle
    async fn fetch(&self, source: &str) -> Result<Arc<ModelBundle>, NodeError> {
        let media = self.inner.ctx.resolver.resolve(source).await?;
        log::debug!("resolved '{}' to '{}'", source, media.accessible_url);
        let bundle = self.inner.ctx.cache.get(&media.accessible_url).await?;
        Ok(bundle)
    }

    pub(crate) fn snapshot(&self) -> NodeState {
        self.inner.state.read().clone()
    }

    pub(crate) fn seed_clip(&self, name: String) {
        let mut state = self.inner.state.write();
        state.clip_names = vec![name];
        state.active_clip = Some(0);
    }
}

/// Generic scene-node capability: identity, placement and persistence
///
/// The editor shell works against this seam; [`AssetNode`] is the
/// model-displaying implementation.
pub trait SceneNode {
    fn id(&self) -> Uuid;
    fn transform(&self) -> Transform;
    fn set_transform(&self, transform: Transform);
    /// Persisted form of this node
    fn components(&self) -> Vec<NodeComponent>;
}

impl SceneNode for AssetNode {
    fn id(&self) -> Uuid {
        AssetNode::id(self)
    }

    fn transform(&self) -> Transform {
        AssetNode::transform(self)
    }

    fn set_transform(&self, transform: Transform) {
        AssetNode::set_transform(self, transform)
    }

    fn components(&self) -> Vec<NodeComponent> {
        self.to_components()
    }
}

/// Corrective factor for content authored at an unusable size
///
/// Sub-decimeter and kilometer-scale content is brought to unit size;
/// anything between 20 and 1000 units is assumed to be authored in
/// centimeters.
fn normalization_scale(sphere: BoundingSphere) -> f32 {
    let diameter = sphere.diameter();
    if diameter != 0.0 && (diameter > 1000.0 || diameter < 0.1) {
        1.0 / diameter
    } else if diameter > 20.0 {
        0.01
    } else {
        1.0
    }
}

fn apply_normalization(transform: &mut Transform, sphere: BoundingSphere) {
    let factor = normalization_scale(sphere);
    if factor != 1.0 {
        transform.scale = [factor; 3];
    }
}
