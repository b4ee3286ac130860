//! Viewport Module - Breakpoints and derived rig metrics.
//!
//! Arm length, handle radius, and pivot position are functions of the
//! current viewport, not constants: they must be recomputed on every
//! resize notification and applied before the next tick. The ratios keep
//! the rig inside the visible surface on any aspect; the mobile breakpoint
//! enforces a minimum touch-target radius on narrow screens.

use tracing::debug;

use crate::engine::Scene;
use crate::rig::{Rig, HOVER_SCALE};
use crate::types::Point;

/// Width below which handle radii are clamped to a touch-friendly minimum.
pub const MOBILE_WIDTH_BREAKPOINT: f64 = 768.0;

/// Height below which the pivot is lifted to keep the arc on screen.
pub const SHORT_HEIGHT_BREAKPOINT: f64 = 480.0;

/// Minimum handle radius on mobile-width viewports (touch target).
pub const MIN_TOUCH_RADIUS: f64 = 44.0;

/// Current surface size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Create a viewport.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Narrow (mobile-width) viewport.
    pub fn is_mobile(&self) -> bool {
        self.width < MOBILE_WIDTH_BREAKPOINT
    }

    /// Vertically cramped viewport.
    pub fn is_short(&self) -> bool {
        self.height < SHORT_HEIGHT_BREAKPOINT
    }
}

/// Rig constants derived from the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigMetrics {
    /// Radius of the handle's constraint circle around the pivot.
    pub arm_length: f64,
    /// Resting handle radius.
    pub handle_radius: f64,
    /// Resting follower radius.
    pub follower_radius: f64,
    /// Pivot disc radius (visual only; the pivot is never hit-testable).
    pub pivot_radius: f64,
    /// Anchor position of the rig root.
    pub pivot_position: Point,
}

impl RigMetrics {
    /// Derive metrics from the viewport breakpoints.
    pub fn from_viewport(viewport: Viewport) -> Self {
        let Viewport { width, height } = viewport;

        // The arm must fit both above the pivot and to either side.
        let arm_length = (height * 0.1875).min(width * 0.375);

        let mut handle_radius = (height / 24.0).min(width / 16.0);
        if viewport.is_mobile() {
            handle_radius = handle_radius.max(MIN_TOUCH_RADIUS);
        }
        let follower_radius = handle_radius * 0.6;
        let pivot_radius = (height / 48.0).min(width / 32.0);

        // Anchored low so the arc swings through the upper half; lifted on
        // short screens so the handle never leaves the surface.
        let pivot_y = if viewport.is_short() {
            height * 2.0 / 3.0
        } else {
            height * 0.75
        };
        let pivot_position = Point::new(width / 2.0, pivot_y);

        debug!(width, height, arm_length, handle_radius, "rig metrics derived");

        Self {
            arm_length,
            handle_radius,
            follower_radius,
            pivot_radius,
            pivot_position,
        }
    }

    /// Apply these metrics to an assembled rig.
    ///
    /// Re-anchors the pivot, re-bases the radii (preserving an active hover
    /// scale), updates the arm length, and notifies so the handle
    /// re-constrains and every dependent re-derives before the next tick.
    pub fn apply(&self, scene: &mut Scene, rig: &Rig) {
        scene.set_arm_length(self.arm_length);

        let store = scene.store_mut();
        store.set_base_radius(rig.pivot, self.pivot_radius);
        store.set_base_radius(rig.handle, self.handle_radius);
        if store.hovered(rig.handle) {
            store.set_radius(rig.handle, self.handle_radius * HOVER_SCALE);
        }
        store.set_base_radius(rig.follower, self.follower_radius);
        store.set_position(rig.pivot, self.pivot_position);

        scene.notify_reactors(rig.pivot, 0.0);
        scene.notify_reactors(rig.handle, 0.0);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rig::{build_rig, FollowerParams};

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_metrics_scale_with_viewport() {
        let small = RigMetrics::from_viewport(Viewport::new(1000.0, 800.0));
        let large = RigMetrics::from_viewport(Viewport::new(2000.0, 1600.0));

        assert!((large.arm_length - 2.0 * small.arm_length).abs() < EPSILON);
        assert!((large.handle_radius - 2.0 * small.handle_radius).abs() < EPSILON);
        assert_eq!(large.pivot_position, Point::new(1000.0, 1200.0));
    }

    #[test]
    fn test_mobile_breakpoint_clamps_touch_target() {
        let viewport = Viewport::new(400.0, 800.0);
        assert!(viewport.is_mobile());

        let metrics = RigMetrics::from_viewport(viewport);
        assert!(metrics.handle_radius >= MIN_TOUCH_RADIUS);

        let desktop = RigMetrics::from_viewport(Viewport::new(1920.0, 600.0));
        assert!((desktop.handle_radius - 600.0 / 24.0).abs() < EPSILON);
    }

    #[test]
    fn test_short_breakpoint_lifts_pivot() {
        let short = RigMetrics::from_viewport(Viewport::new(1000.0, 400.0));
        assert!((short.pivot_position.y - 400.0 * 2.0 / 3.0).abs() < EPSILON);

        let tall = RigMetrics::from_viewport(Viewport::new(1000.0, 1000.0));
        assert!((tall.pivot_position.y - 750.0).abs() < EPSILON);
    }

    #[test]
    fn test_apply_recomputes_rig_before_next_tick() {
        let metrics = RigMetrics::from_viewport(Viewport::new(1200.0, 800.0));
        let mut scene = Scene::new(metrics.arm_length);
        let rig = build_rig(&mut scene, &metrics, FollowerParams::default());

        // Resize: everything re-derives without waiting for a tick.
        let resized = RigMetrics::from_viewport(Viewport::new(600.0, 1000.0));
        resized.apply(&mut scene, &rig);

        assert!((scene.arm_length() - resized.arm_length).abs() < EPSILON);
        assert_eq!(scene.position(rig.pivot), resized.pivot_position);

        let distance = scene
            .position(rig.pivot)
            .distance_to(scene.position(rig.handle));
        // Handle re-constrained against the new pivot and arm length;
        // stretch 0.9 leaves at most a small elastic residue.
        assert!((distance - resized.arm_length).abs() < resized.arm_length * 0.2);

        // Follower stays radius-coupled to the handle.
        let follower_distance = scene
            .position(rig.pivot)
            .distance_to(scene.position(rig.follower));
        assert!((distance - follower_distance).abs() < 1e-6);
    }

    #[test]
    fn test_apply_preserves_hover_scale() {
        let metrics = RigMetrics::from_viewport(Viewport::new(1200.0, 800.0));
        let mut scene = Scene::new(metrics.arm_length);
        let rig = build_rig(&mut scene, &metrics, FollowerParams::default());

        scene.hover(rig.handle);
        let resized = RigMetrics::from_viewport(Viewport::new(1400.0, 900.0));
        resized.apply(&mut scene, &rig);

        let expected = resized.handle_radius * HOVER_SCALE;
        assert!((scene.store().radius(rig.handle) - expected).abs() < EPSILON);
    }
}
