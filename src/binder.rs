//! Animation-driven mobility classification
//!
//! Animation tracks address subnodes by `"Name.property"` paths. After
//! a model attaches, [`classify`] walks every clip and marks the
//! subnodes those tracks move as [`Mobility::Dynamic`]; everything else
//! stays [`Mobility::Static`]. Hosts use the split to decide what can
//! be baked, instanced or merged.

use crate::model::ModelInstance;
use std::sync::Arc;

/// Resolve the subnode name a track path targets
///
/// The property suffix sits after the last dot so that node names
/// containing dots ("Armature.Bone") still resolve. Paths without a
/// separator target nothing.
pub fn track_target(track: &str) -> Option<&str> {
    track.rsplit_once('.').map(|(name, _property)| name)
}

/// Recompute the mobility of every subnode of an attached instance
///
/// Resets all subnodes to static first, so repeated classification of
/// the same instance converges instead of accumulating. Tracks whose
/// target cannot be resolved to a subnode are skipped.
pub fn classify(instance: &mut ModelInstance) {
    instance.reset_mobility();

    let content = Arc::clone(instance.content());
    for clip in &content.clips {
        for track in &clip.tracks {
            let Some(name) = track_target(track) else {
                log::debug!("animation track '{}' has no target segment", track);
                continue;
            };
            match content.find_node(name) {
                Some(index) => instance.mark_dynamic(index),
                None => {
                    log::debug!("animation track '{}' targets unknown subnode '{}'", track, name)
                }
            }
        }
    }
}
