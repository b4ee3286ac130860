//! Rig Module - The Pivot-Handle-End kinematic chain.
//!
//! - [`constraint`] - elastic arc constraint for the handle
//! - [`follower`] - lagged constrained follow for the end joint
//! - [`handle`] - capture-offset drag helpers
//!
//! [`build_rig`] assembles the standard chain: a pivot, a handle on the
//! elastic arc, a follower easing after it, a connecting segment, and the
//! reactor wiring between them.

mod constraint;
mod follower;
mod handle;

pub use constraint::constrain;
pub use follower::{ease, project};
pub use handle::{capture_offset, drag_candidate, DEFAULT_STRETCH, HOVER_SCALE};

use std::f64::consts::FRAC_PI_2;

use crate::engine::Scene;
use crate::state::RigMetrics;
use crate::types::EntityId;

// =============================================================================
// Follower parameters
// =============================================================================

/// Tuning for the follower joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowerParams {
    /// Per-frame easing blend in (0, 1]. Fixed per frame, not
    /// frame-rate normalized.
    pub blend: f64,
    /// Maximum residual angular separation from the handle, radians.
    /// 0 snaps the follower onto the handle's angle every update.
    pub max_angle_step: f64,
}

impl Default for FollowerParams {
    fn default() -> Self {
        Self {
            blend: 0.2,
            max_angle_step: 0.0,
        }
    }
}

// =============================================================================
// Rig assembly
// =============================================================================

/// Ids of the assembled chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rig {
    pub pivot: EntityId,
    pub handle: EntityId,
    pub follower: EntityId,
    pub segment: EntityId,
}

/// Assemble the standard rig and its reactor wiring.
///
/// The handle starts at the top of the arc. Registration order matters:
/// the handle is the pivot's first reactor so it re-constrains before the
/// entities that derive from it re-derive.
pub fn build_rig(scene: &mut Scene, metrics: &RigMetrics, params: FollowerParams) -> Rig {
    scene.set_arm_length(metrics.arm_length);

    let pivot = scene.add_pivot(metrics.pivot_position, metrics.pivot_radius);
    let start = metrics
        .pivot_position
        .on_circle(-FRAC_PI_2, metrics.arm_length);
    let handle = scene.add_handle(pivot, start, metrics.handle_radius, DEFAULT_STRETCH);
    let follower = scene.add_follower(
        handle,
        pivot,
        metrics.follower_radius,
        params.blend,
        params.max_angle_step,
    );
    let segment = scene.add_decorative(pivot, Some(handle));

    scene.register_reactor(pivot, handle);
    scene.register_reactor(pivot, follower);
    scene.register_reactor(pivot, segment);
    scene.register_reactor(handle, follower);
    scene.register_reactor(handle, segment);

    Rig {
        pivot,
        handle,
        follower,
        segment,
    }
}
