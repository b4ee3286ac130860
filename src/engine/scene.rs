//! Scene - assembly, capability dispatch, and the propagation graph.
//!
//! A `Scene` owns the [`EntityStore`] and everything that operates on it:
//!
//! - **Assembly**: `add_pivot` / `add_handle` / `add_follower` /
//!   `add_decorative` plus `register_reactor`, run once before the frame
//!   loop starts. `validate()` rejects malformed wiring at this point so
//!   nothing has to be checked per frame.
//! - **Capability dispatch**: hover / touch / drag / release / hit-test /
//!   advance, matching on [`EntityKind`]. Variants implement only what they
//!   need; everything else is a no-op.
//! - **Propagation**: `notify_reactors` re-evaluates each registered
//!   dependent exactly once, in registration order, one level deep.
//!   `refresh` mutates only the dependent's own columns and is idempotent.

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::math::angle_from;
use crate::rig::{constrain, ease, project, HOVER_SCALE};
use crate::state::MAX_CAPTURE_REDIRECTS;
use crate::types::{Capabilities, Capture, EntityId, EntityKind, Point};

use super::store::EntityStore;

// =============================================================================
// Errors
// =============================================================================

/// Scene-assembly validation failures.
///
/// All of these are programming errors in the wiring, caught once by
/// [`Scene::validate`]; the runtime paths stay infallible.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// A reference points at an index that was never allocated.
    #[error("entity {0:?} references missing entity {1:?}")]
    DanglingReference(EntityId, EntityId),

    /// A required reference was never set.
    #[error("entity {0:?} is missing its {1} reference")]
    MissingReference(EntityId, &'static str),

    /// A reference points at an entity of the wrong kind.
    #[error("entity {0:?} expected a {1} reference, found {2:?}")]
    KindMismatch(EntityId, &'static str, EntityKind),

    /// The reactor graph contains a cycle through this entity.
    #[error("reactor cycle through entity {0:?}")]
    ReactorCycle(EntityId),

    /// A capture redirection chain does not settle within the bound.
    #[error("capture redirection from entity {0:?} does not settle within {1} hops")]
    RedirectLoop(EntityId, usize),
}

// =============================================================================
// Scene
// =============================================================================

/// A fully assembled scene: entity columns plus the rig-wide arm length.
pub struct Scene {
    store: EntityStore,
    arm_length: f64,
}

impl Scene {
    /// Create an empty scene with the given arm length.
    pub fn new(arm_length: f64) -> Self {
        Self {
            store: EntityStore::new(),
            arm_length,
        }
    }

    /// Shared access to the entity columns.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Mutable access to the entity columns.
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    /// Current arm length (pivot-to-handle circle radius).
    pub fn arm_length(&self) -> f64 {
        self.arm_length
    }

    /// Set the arm length (breakpoint recomputation on resize).
    pub fn set_arm_length(&mut self, arm_length: f64) {
        self.arm_length = arm_length;
    }

    // -------------------------------------------------------------------------
    // Assembly
    // -------------------------------------------------------------------------

    /// Add the fixed rig root. Never hit-testable.
    pub fn add_pivot(&mut self, position: Point, radius: f64) -> EntityId {
        let id = self.store.allocate(EntityKind::Pivot);
        self.store.set_position(id, position);
        self.store.set_base_radius(id, radius);
        id
    }

    /// Add a draggable handle orbiting `pivot`.
    ///
    /// The initial position is constrained immediately so the invariant
    /// (handle on the elastically-damped arc) holds from the first frame.
    pub fn add_handle(
        &mut self,
        pivot: EntityId,
        position: Point,
        radius: f64,
        stretch: f64,
    ) -> EntityId {
        let id = self.store.allocate(EntityKind::Handle);
        self.store.set_pivot_ref(id, pivot);
        self.store.set_base_radius(id, radius);
        self.store.set_stretch(id, stretch);

        let pivot_position = self.store.position(pivot);
        let constrained = constrain(position, pivot_position, self.arm_length, stretch);
        self.store.set_position(id, constrained);
        self.store
            .set_rotation(id, angle_from(pivot_position, constrained));
        id
    }

    /// Add a follower joint easing after `handle` on its circle around
    /// `pivot`.
    pub fn add_follower(
        &mut self,
        handle: EntityId,
        pivot: EntityId,
        radius: f64,
        blend: f64,
        max_angle_step: f64,
    ) -> EntityId {
        let id = self.store.allocate(EntityKind::Follower);
        self.store.set_handle_ref(id, handle);
        self.store.set_pivot_ref(id, pivot);
        self.store.set_base_radius(id, radius);
        self.store.set_blend(id, blend);
        self.store.set_max_angle_step(id, max_angle_step);
        self.store.set_position(id, self.store.position(handle));
        self.store.set_rotation(id, self.store.rotation(handle));
        id
    }

    /// Add a derived visual.
    ///
    /// With two sources it behaves as a connecting segment (midpoint
    /// position, rotation along the source-to-source direction); with one
    /// source it pins itself to that source's transform.
    pub fn add_decorative(&mut self, a: EntityId, b: Option<EntityId>) -> EntityId {
        let id = self.store.allocate(EntityKind::Decorative);
        self.store.set_sources(id, a, b);
        self.refresh(id, 0.0);
        id
    }

    /// Register `dependent` for re-evaluation whenever `source` moves.
    ///
    /// Order of registration is the order of notification. Duplicates are
    /// a caller error (not guarded); cycles are rejected by [`validate`].
    ///
    /// [`validate`]: Scene::validate
    pub fn register_reactor(&mut self, source: EntityId, dependent: EntityId) {
        self.store.add_reactor(source, dependent);
    }

    // -------------------------------------------------------------------------
    // Propagation
    // -------------------------------------------------------------------------

    /// Re-evaluate every reactor of `source` once, in registration order.
    ///
    /// One level deep: a re-evaluated dependent never re-broadcasts. An
    /// entity depending on two sources is simply refreshed by both, which
    /// is safe because `refresh` is idempotent.
    pub fn notify_reactors(&mut self, source: EntityId, dt: f64) {
        let dependents: Vec<EntityId> = self.store.reactors(source).to_vec();
        for dependent in dependents {
            self.refresh(dependent, dt);
        }
    }

    /// Re-derive an entity's own state from its sources.
    ///
    /// Idempotent: with unchanged sources, a second call produces the same
    /// output. Mutates only the entity's own columns.
    pub fn refresh(&mut self, id: EntityId, _dt: f64) {
        match self.store.kind(id) {
            EntityKind::Pivot => {}
            EntityKind::Handle => {
                // Re-constrain the current position against the (possibly
                // moved) pivot. Already-constrained positions are fixed
                // points of the solver.
                if let Some(pivot) = self.store.pivot_ref(id) {
                    let pivot_position = self.store.position(pivot);
                    let constrained = constrain(
                        self.store.position(id),
                        pivot_position,
                        self.arm_length,
                        self.store.stretch(id),
                    );
                    self.store.set_position(id, constrained);
                    self.store
                        .set_rotation(id, angle_from(pivot_position, constrained));
                }
            }
            EntityKind::Follower => {
                // Projection only - the time-sensitive easing step lives in
                // `advance`, so notification stays idempotent.
                if let (Some(handle), Some(pivot)) =
                    (self.store.handle_ref(id), self.store.pivot_ref(id))
                {
                    let pivot_position = self.store.position(pivot);
                    let projected = project(
                        self.store.position(id),
                        self.store.position(handle),
                        pivot_position,
                        self.store.max_angle_step(id),
                    );
                    self.store.set_position(id, projected);
                    self.store
                        .set_rotation(id, angle_from(pivot_position, projected));
                }
            }
            EntityKind::Decorative => {
                if let Some(a) = self.store.source_a(id) {
                    match self.store.source_b(id) {
                        Some(b) => {
                            let pa = self.store.position(a);
                            let pb = self.store.position(b);
                            self.store.set_position(id, pa.midpoint(pb));
                            self.store.set_rotation(id, angle_from(pa, pb));
                        }
                        None => {
                            self.store.set_position(id, self.store.position(a));
                            self.store.set_rotation(id, self.store.rotation(a));
                        }
                    }
                }
            }
        }
        self.store.bump_revision(id);
    }

    /// Advance a time-sensitive entity by one frame.
    ///
    /// Followers ease toward their handle, are projected back onto the
    /// handle's circle, and then notify their own reactors. Everything else
    /// is a no-op.
    pub fn advance(&mut self, id: EntityId, dt: f64) {
        if self.store.kind(id) != EntityKind::Follower {
            return;
        }
        let (Some(handle), Some(pivot)) = (self.store.handle_ref(id), self.store.pivot_ref(id))
        else {
            return;
        };

        let pivot_position = self.store.position(pivot);
        let handle_position = self.store.position(handle);
        let eased = ease(
            self.store.position(id),
            handle_position,
            self.store.blend(id),
        );
        let projected = project(
            eased,
            handle_position,
            pivot_position,
            self.store.max_angle_step(id),
        );
        self.store.set_position(id, projected);
        self.store
            .set_rotation(id, angle_from(pivot_position, projected));
        self.notify_reactors(id, dt);
    }

    // -------------------------------------------------------------------------
    // Hit-testing
    // -------------------------------------------------------------------------

    /// Circle hit test, gated on the HIT_TESTABLE capability and
    /// visibility.
    pub fn hits(&self, id: EntityId, point: Point) -> bool {
        if !self.store.capabilities(id).contains(Capabilities::HIT_TESTABLE) {
            return false;
        }
        if !self.store.visible(id) {
            return false;
        }
        self.store.position(id).distance_to(point) <= self.store.radius(id)
    }

    /// Topmost entity under `point`, walking back-to-front by z-order
    /// (last added wins ties).
    pub fn pick(&self, point: Point) -> Option<EntityId> {
        self.store.ids().rev().find(|&id| self.hits(id, point))
    }

    // -------------------------------------------------------------------------
    // Interaction dispatch
    // -------------------------------------------------------------------------

    /// Begin hovering. Handles grow their radius for the grab affordance.
    pub fn hover(&mut self, id: EntityId) {
        match self.store.kind(id) {
            EntityKind::Handle => {
                self.store.set_hovered(id, true);
                let base = self.store.base_radius(id);
                self.store.set_radius(id, base * HOVER_SCALE);
            }
            EntityKind::Follower => {
                self.store.set_hovered(id, true);
            }
            _ => {}
        }
    }

    /// Stop hovering; restores the resting radius.
    pub fn unhover(&mut self, id: EntityId) {
        match self.store.kind(id) {
            EntityKind::Handle => {
                self.store.set_hovered(id, false);
                let base = self.store.base_radius(id);
                self.store.set_radius(id, base);
            }
            EntityKind::Follower => {
                self.store.set_hovered(id, false);
            }
            _ => {}
        }
    }

    /// Offer pointer capture to `id` at `pointer`.
    ///
    /// Handles accept and record the capture offset; followers redirect to
    /// their handle; everything else declines.
    pub fn touch(&mut self, id: EntityId, pointer: Point) -> Capture {
        match self.store.kind(id) {
            EntityKind::Handle => {
                let position = self.store.position(id);
                let (dx, dy) = crate::rig::capture_offset(position, pointer);
                self.store.set_capture_offset(id, dx, dy);
                self.store.set_touched(id, true);
                debug!(id = id.index(), "handle captured pointer");
                Capture::Accept
            }
            EntityKind::Follower => match self.store.handle_ref(id) {
                Some(handle) => Capture::Redirect(handle),
                None => Capture::Decline,
            },
            EntityKind::Pivot | EntityKind::Decorative => Capture::Decline,
        }
    }

    /// Forward a pointer move to the touching entity as a drag.
    pub fn drag(&mut self, id: EntityId, pointer: Point) {
        if self.store.kind(id) != EntityKind::Handle
            || !self.store.capabilities(id).contains(Capabilities::DRAGGABLE)
        {
            return;
        }
        let Some(pivot) = self.store.pivot_ref(id) else {
            return;
        };

        let candidate = crate::rig::drag_candidate(pointer, self.store.capture_offset(id));
        let pivot_position = self.store.position(pivot);
        let constrained = constrain(
            candidate,
            pivot_position,
            self.arm_length,
            self.store.stretch(id),
        );
        self.store.set_position(id, constrained);
        self.store
            .set_rotation(id, angle_from(pivot_position, constrained));
        trace!(
            id = id.index(),
            x = constrained.x,
            y = constrained.y,
            "handle dragged"
        );
        self.notify_reactors(id, 0.0);
    }

    /// End the capture started by [`touch`](Scene::touch).
    pub fn release(&mut self, id: EntityId) {
        if self.store.kind(id) == EntityKind::Handle {
            self.store.set_touched(id, false);
            self.store.set_capture_offset(id, 0.0, 0.0);
            debug!(id = id.index(), "handle released");
        }
    }

    // -------------------------------------------------------------------------
    // External read interface (consumed by the draw pass)
    // -------------------------------------------------------------------------

    /// Position accessor for the render layer.
    pub fn position(&self, id: EntityId) -> Point {
        self.store.position(id)
    }

    /// Rotation accessor for the render layer.
    pub fn rotation(&self, id: EntityId) -> f64 {
        self.store.rotation(id)
    }

    /// Visibility accessor for the render layer.
    pub fn visible(&self, id: EntityId) -> bool {
        self.store.visible(id)
    }

    /// Radius accessor for the render layer (hover-scaled when hovered).
    pub fn radius(&self, id: EntityId) -> f64 {
        self.store.radius(id)
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Validate the assembled wiring.
    ///
    /// Run once after assembly, before the frame loop: checks per-kind
    /// references, dangling reactor ids, reactor-graph cycles, and that
    /// every capture-redirection chain settles within the redirect bound.
    pub fn validate(&self) -> Result<(), SceneError> {
        self.validate_references()?;
        self.validate_reactor_graph()?;
        self.validate_redirect_chains()?;
        Ok(())
    }

    fn expect_kind(
        &self,
        id: EntityId,
        target: Option<EntityId>,
        label: &'static str,
        kind: EntityKind,
    ) -> Result<(), SceneError> {
        let Some(target) = target else {
            return Err(SceneError::MissingReference(id, label));
        };
        if !self.store.contains(target) {
            return Err(SceneError::DanglingReference(id, target));
        }
        if self.store.kind(target) != kind {
            return Err(SceneError::KindMismatch(id, label, self.store.kind(target)));
        }
        Ok(())
    }

    fn validate_references(&self) -> Result<(), SceneError> {
        for id in self.store.ids() {
            match self.store.kind(id) {
                EntityKind::Pivot => {}
                EntityKind::Handle => {
                    self.expect_kind(id, self.store.pivot_ref(id), "pivot", EntityKind::Pivot)?;
                }
                EntityKind::Follower => {
                    self.expect_kind(id, self.store.pivot_ref(id), "pivot", EntityKind::Pivot)?;
                    self.expect_kind(id, self.store.handle_ref(id), "handle", EntityKind::Handle)?;
                }
                EntityKind::Decorative => {
                    let Some(a) = self.store.source_a(id) else {
                        return Err(SceneError::MissingReference(id, "source"));
                    };
                    if !self.store.contains(a) {
                        return Err(SceneError::DanglingReference(id, a));
                    }
                    if let Some(b) = self.store.source_b(id) {
                        if !self.store.contains(b) {
                            return Err(SceneError::DanglingReference(id, b));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn validate_reactor_graph(&self) -> Result<(), SceneError> {
        for source in self.store.ids() {
            for &dependent in self.store.reactors(source) {
                if !self.store.contains(dependent) {
                    return Err(SceneError::DanglingReference(source, dependent));
                }
            }
        }

        // DFS with tri-state marks. Notification is one level deep at
        // runtime, but a registration cycle is still a wiring error.
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InStack,
            Done,
        }
        let mut marks = vec![Mark::Unvisited; self.store.len()];

        fn visit(store: &EntityStore, id: EntityId, marks: &mut [Mark]) -> Result<(), SceneError> {
            match marks[id.index()] {
                Mark::Done => return Ok(()),
                Mark::InStack => {
                    warn!(id = id.index(), "reactor cycle detected");
                    return Err(SceneError::ReactorCycle(id));
                }
                Mark::Unvisited => {}
            }
            marks[id.index()] = Mark::InStack;
            for &dependent in store.reactors(id) {
                visit(store, dependent, marks)?;
            }
            marks[id.index()] = Mark::Done;
            Ok(())
        }

        for id in self.store.ids() {
            visit(&self.store, id, &mut marks)?;
        }
        Ok(())
    }

    fn validate_redirect_chains(&self) -> Result<(), SceneError> {
        for id in self.store.ids() {
            if !self.store.capabilities(id).contains(Capabilities::HIT_TESTABLE) {
                continue;
            }
            let mut current = id;
            let mut settled = false;
            for _ in 0..MAX_CAPTURE_REDIRECTS {
                match self.redirect_target(current) {
                    Some(next) if next != current => current = next,
                    _ => {
                        settled = true;
                        break;
                    }
                }
            }
            if !settled {
                return Err(SceneError::RedirectLoop(id, MAX_CAPTURE_REDIRECTS));
            }
        }
        Ok(())
    }

    /// Static redirection target of an entity's touch operation, if any.
    fn redirect_target(&self, id: EntityId) -> Option<EntityId> {
        match self.store.kind(id) {
            EntityKind::Follower => self.store.handle_ref(id),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    /// Minimal rig: pivot at (100, 100), arm length 200, handle straight
    /// down at (100, 300).
    fn assemble() -> (Scene, EntityId, EntityId) {
        let mut scene = Scene::new(200.0);
        let pivot = scene.add_pivot(Point::new(100.0, 100.0), 20.0);
        let handle = scene.add_handle(pivot, Point::new(100.0, 300.0), 50.0, 0.9);
        (scene, pivot, handle)
    }

    #[test]
    fn test_handle_constrained_at_assembly() {
        let mut scene = Scene::new(200.0);
        let pivot = scene.add_pivot(Point::new(0.0, 0.0), 20.0);
        // Candidate far beyond the circle gets pulled in immediately.
        let handle = scene.add_handle(pivot, Point::new(1000.0, 0.0), 50.0, 0.9);

        let distance = scene.position(pivot).distance_to(scene.position(handle));
        assert!((distance - 280.0).abs() < EPSILON); // 1000 lerped 0.9 toward 200
    }

    #[test]
    fn test_reactors_notified_once_in_order() {
        let (mut scene, pivot, handle) = assemble();
        let a = scene.add_decorative(pivot, Some(handle));
        let b = scene.add_decorative(pivot, None);
        let c = scene.add_decorative(handle, None);

        scene.register_reactor(pivot, a);
        scene.register_reactor(pivot, b);
        scene.register_reactor(pivot, c);

        let before = [a, b, c].map(|id| scene.store().revision(id));

        scene.store_mut().set_position(pivot, Point::new(150.0, 100.0));
        scene.notify_reactors(pivot, 0.0);

        // Exactly one re-evaluation each, no duplicates, no skips.
        for (i, id) in [a, b, c].into_iter().enumerate() {
            assert_eq!(scene.store().revision(id), before[i] + 1);
        }
        // Registration order is notification order.
        assert_eq!(scene.store().reactors(pivot), &[a, b, c]);
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let (mut scene, pivot, handle) = assemble();
        let segment = scene.add_decorative(pivot, Some(handle));

        scene.refresh(segment, 0.0);
        let once = scene.position(segment);
        scene.refresh(segment, 0.0);
        let twice = scene.position(segment);
        assert_eq!(once, twice);

        scene.refresh(handle, 0.0);
        let once = scene.position(handle);
        scene.refresh(handle, 0.0);
        let twice = scene.position(handle);
        assert!((once.x - twice.x).abs() < EPSILON);
        assert!((once.y - twice.y).abs() < EPSILON);
    }

    #[test]
    fn test_segment_derives_midpoint_and_angle() {
        let (mut scene, pivot, handle) = assemble();
        let segment = scene.add_decorative(pivot, Some(handle));

        let expected = scene.position(pivot).midpoint(scene.position(handle));
        assert_eq!(scene.position(segment), expected);
        // Pivot at (100,100), handle at (100,300): straight down.
        assert!((scene.rotation(segment) - std::f64::consts::FRAC_PI_2).abs() < EPSILON);
    }

    #[test]
    fn test_drag_constrains_and_propagates() {
        let (mut scene, pivot, handle) = assemble();
        let segment = scene.add_decorative(pivot, Some(handle));
        scene.register_reactor(handle, segment);

        scene.touch(handle, scene.position(handle));
        scene.drag(handle, Point::new(500.0, 100.0));

        // Candidate at distance 400, angle 0: lerped 0.9 toward the
        // on-circle point (300, 100) gives (320, 100).
        assert!((scene.position(handle).x - 320.0).abs() < EPSILON);
        assert!((scene.position(handle).y - 100.0).abs() < EPSILON);
        let distance = scene.position(pivot).distance_to(scene.position(handle));
        assert!((distance - 220.0).abs() < EPSILON);

        // Segment re-derived from the new handle position.
        let expected = scene.position(pivot).midpoint(scene.position(handle));
        assert_eq!(scene.position(segment), expected);
    }

    #[test]
    fn test_follower_advance_keeps_radius_coupled() {
        let (mut scene, pivot, handle) = assemble();
        let follower = scene.add_follower(handle, pivot, 30.0, 0.2, 0.0);

        // Drive the handle around an arbitrary trajectory.
        scene.touch(handle, scene.position(handle));
        for step in 0..50 {
            let angle = step as f64 * 0.37;
            scene.drag(
                handle,
                Point::new(100.0 + angle.cos() * 400.0, 100.0 + angle.sin() * 400.0),
            );
            scene.advance(follower, 16.0);

            let handle_distance = scene.position(pivot).distance_to(scene.position(handle));
            let follower_distance = scene.position(pivot).distance_to(scene.position(follower));
            assert!((handle_distance - follower_distance).abs() < 1e-6);
        }
    }

    #[test]
    fn test_touch_dispatch() {
        let (mut scene, pivot, handle) = assemble();
        let follower = scene.add_follower(handle, pivot, 30.0, 0.2, 0.0);
        let segment = scene.add_decorative(pivot, Some(handle));

        let at = scene.position(handle);
        assert_eq!(scene.touch(handle, at), Capture::Accept);
        assert!(scene.store().touched(handle));

        assert_eq!(scene.touch(follower, at), Capture::Redirect(handle));
        assert!(!scene.store().touched(follower));

        assert_eq!(scene.touch(pivot, at), Capture::Decline);
        assert_eq!(scene.touch(segment, at), Capture::Decline);
    }

    #[test]
    fn test_hit_test_gates() {
        let (mut scene, pivot, handle) = assemble();
        let at = scene.position(handle);

        assert!(scene.hits(handle, at));
        // Pivot is never hit-testable.
        assert!(!scene.hits(pivot, scene.position(pivot)));

        // Invisible entities do not hit.
        scene.store_mut().set_visible(handle, false);
        assert!(!scene.hits(handle, at));
    }

    #[test]
    fn test_pick_topmost_wins() {
        let mut scene = Scene::new(200.0);
        let pivot = scene.add_pivot(Point::ZERO, 10.0);
        let below = scene.add_handle(pivot, Point::new(200.0, 0.0), 50.0, 1.0);
        let above = scene.add_handle(pivot, Point::new(200.0, 0.0), 50.0, 1.0);

        let at = scene.position(above);
        assert_eq!(scene.pick(at), Some(above));
        assert_ne!(scene.pick(at), Some(below));
        assert_eq!(scene.pick(Point::new(-500.0, -500.0)), None);
    }

    #[test]
    fn test_hover_grows_handle() {
        let (mut scene, _pivot, handle) = assemble();

        let base = scene.store().base_radius(handle);
        scene.hover(handle);
        assert!(scene.store().hovered(handle));
        assert!((scene.store().radius(handle) - base * HOVER_SCALE).abs() < EPSILON);

        scene.unhover(handle);
        assert!(!scene.store().hovered(handle));
        assert!((scene.store().radius(handle) - base).abs() < EPSILON);
    }

    #[test]
    fn test_validate_accepts_well_formed_scene() {
        let (mut scene, pivot, handle) = assemble();
        let follower = scene.add_follower(handle, pivot, 30.0, 0.2, 0.0);
        let segment = scene.add_decorative(pivot, Some(handle));
        scene.register_reactor(pivot, handle);
        scene.register_reactor(pivot, segment);
        scene.register_reactor(handle, follower);
        scene.register_reactor(handle, segment);

        assert_eq!(scene.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_cycle() {
        let (mut scene, pivot, handle) = assemble();
        scene.register_reactor(pivot, handle);
        scene.register_reactor(handle, pivot);

        assert!(matches!(
            scene.validate(),
            Err(SceneError::ReactorCycle(_))
        ));
    }

    #[test]
    fn test_validate_rejects_dangling_reactor() {
        let (mut scene, pivot, _handle) = assemble();
        scene.register_reactor(pivot, EntityId(99));

        assert_eq!(
            scene.validate(),
            Err(SceneError::DanglingReference(pivot, EntityId(99)))
        );
    }

    #[test]
    fn test_validate_rejects_kind_mismatch() {
        let mut scene = Scene::new(200.0);
        let pivot = scene.add_pivot(Point::ZERO, 10.0);
        let handle = scene.add_handle(pivot, Point::new(200.0, 0.0), 50.0, 0.9);
        // Follower wired with a handle where its pivot should be.
        let follower = scene.add_follower(handle, handle, 30.0, 0.2, 0.0);

        assert_eq!(
            scene.validate(),
            Err(SceneError::KindMismatch(follower, "pivot", EntityKind::Handle))
        );
    }
}
