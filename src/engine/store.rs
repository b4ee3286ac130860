//! Entity Store - Arena allocation and parallel columns.
//!
//! Entities are NOT objects. They are indices into parallel columns:
//!
//! ```text
//! Index 0: Pivot    (x=480, y=540, radius=20, visible=true, ...)
//! Index 1: Handle   (x=480, y=340, radius=45, visible=true, ...)
//! Index 2: Follower (x=480, y=340, radius=27, visible=true, ...)
//! Index 3: Decorative (segment derived from 0 and 1)
//! ```
//!
//! The externally observed columns (position, rotation, radius, visibility,
//! interaction flags) are reactive `TrackedSlotArray` cells, so a render
//! layer reading them from a derived/effect re-runs when they change. The
//! rig wiring columns (kind, capabilities, references, reactor lists) are
//! plain vectors: they are fixed at scene assembly.
//!
//! Indices are allocated once at assembly time and never released; reactor
//! lists therefore never hold a stale id.

use spark_signals::{dirty_set, tracked_slot_array, TrackedSlotArray};

use crate::types::{Capabilities, EntityId, EntityKind, Point};

// =============================================================================
// Store
// =============================================================================

/// Parallel-column storage for all entities in a scene.
pub struct EntityStore {
    // Reactive columns (observed by the render layer).
    x: TrackedSlotArray<f64>,
    y: TrackedSlotArray<f64>,
    rotation: TrackedSlotArray<f64>,
    radius: TrackedSlotArray<f64>,
    visible: TrackedSlotArray<bool>,
    hovered: TrackedSlotArray<bool>,
    touched: TrackedSlotArray<bool>,

    // Assembly-time columns.
    kind: Vec<EntityKind>,
    capabilities: Vec<Capabilities>,
    reactors: Vec<Vec<EntityId>>,

    // Rig wiring. Which columns are meaningful depends on the kind.
    pivot_ref: Vec<Option<EntityId>>,
    handle_ref: Vec<Option<EntityId>>,
    source_a: Vec<Option<EntityId>>,
    source_b: Vec<Option<EntityId>>,

    // Per-entity solver parameters and transient drag state.
    base_radius: Vec<f64>,
    capture_dx: Vec<f64>,
    capture_dy: Vec<f64>,
    stretch: Vec<f64>,
    blend: Vec<f64>,
    max_angle_step: Vec<f64>,

    /// Re-evaluation counter, bumped once per reactor refresh.
    revision: Vec<u64>,
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            x: tracked_slot_array(Some(0.0), dirty_set()),
            y: tracked_slot_array(Some(0.0), dirty_set()),
            rotation: tracked_slot_array(Some(0.0), dirty_set()),
            radius: tracked_slot_array(Some(0.0), dirty_set()),
            visible: tracked_slot_array(Some(true), dirty_set()),
            hovered: tracked_slot_array(Some(false), dirty_set()),
            touched: tracked_slot_array(Some(false), dirty_set()),
            kind: Vec::new(),
            capabilities: Vec::new(),
            reactors: Vec::new(),
            pivot_ref: Vec::new(),
            handle_ref: Vec::new(),
            source_a: Vec::new(),
            source_b: Vec::new(),
            base_radius: Vec::new(),
            capture_dx: Vec::new(),
            capture_dy: Vec::new(),
            stretch: Vec::new(),
            blend: Vec::new(),
            max_angle_step: Vec::new(),
            revision: Vec::new(),
        }
    }

    /// Allocate the next index for a new entity of `kind`.
    ///
    /// Z-order is allocation order (last allocated draws on top and wins
    /// hit-test ties).
    pub fn allocate(&mut self, kind: EntityKind) -> EntityId {
        let index = self.kind.len();

        self.kind.push(kind);
        self.capabilities.push(Capabilities::for_kind(kind));
        self.reactors.push(Vec::new());
        self.pivot_ref.push(None);
        self.handle_ref.push(None);
        self.source_a.push(None);
        self.source_b.push(None);
        self.base_radius.push(0.0);
        self.capture_dx.push(0.0);
        self.capture_dy.push(0.0);
        self.stretch.push(0.0);
        self.blend.push(0.0);
        self.max_angle_step.push(0.0);
        self.revision.push(0);

        // Grow the reactive columns to cover the new index.
        let _ = self.x.peek(index);
        let _ = self.y.peek(index);
        let _ = self.rotation.peek(index);
        let _ = self.radius.peek(index);
        let _ = self.visible.peek(index);
        let _ = self.hovered.peek(index);
        let _ = self.touched.peek(index);

        EntityId(index)
    }

    /// Number of allocated entities.
    pub fn len(&self) -> usize {
        self.kind.len()
    }

    /// Whether the store holds no entities.
    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    /// Whether `id` refers to an allocated entity.
    pub fn contains(&self, id: EntityId) -> bool {
        id.index() < self.kind.len()
    }

    /// All ids in z-order (allocation order).
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = EntityId> + '_ {
        (0..self.kind.len()).map(EntityId)
    }

    // -------------------------------------------------------------------------
    // Kind / capabilities
    // -------------------------------------------------------------------------

    /// Entity kind tag.
    pub fn kind(&self, id: EntityId) -> EntityKind {
        self.kind[id.index()]
    }

    /// Capability flags.
    pub fn capabilities(&self, id: EntityId) -> Capabilities {
        self.capabilities[id.index()]
    }

    /// Replace the capability flags (e.g. to opt a follower out of
    /// hit-testing and make it purely decorative).
    pub fn set_capabilities(&mut self, id: EntityId, caps: Capabilities) {
        self.capabilities[id.index()] = caps;
    }

    // -------------------------------------------------------------------------
    // Position / rotation / radius / visibility (reactive)
    // -------------------------------------------------------------------------

    /// Position (reactive read).
    pub fn position(&self, id: EntityId) -> Point {
        Point::new(self.x.get(id.index()).unwrap(), self.y.get(id.index()).unwrap())
    }

    /// Set position.
    pub fn set_position(&mut self, id: EntityId, position: Point) {
        self.x.set_value(id.index(), position.x);
        self.y.set_value(id.index(), position.y);
    }

    /// Rotation in radians (reactive read).
    pub fn rotation(&self, id: EntityId) -> f64 {
        self.rotation.get(id.index()).unwrap()
    }

    /// Set rotation.
    pub fn set_rotation(&mut self, id: EntityId, rotation: f64) {
        self.rotation.set_value(id.index(), rotation);
    }

    /// Current (possibly hover-scaled) radius (reactive read).
    pub fn radius(&self, id: EntityId) -> f64 {
        self.radius.get(id.index()).unwrap()
    }

    /// Set the current radius.
    pub fn set_radius(&mut self, id: EntityId, radius: f64) {
        self.radius.set_value(id.index(), radius);
    }

    /// Visibility (reactive read).
    pub fn visible(&self, id: EntityId) -> bool {
        self.visible.get(id.index()).unwrap()
    }

    /// Set visibility.
    pub fn set_visible(&mut self, id: EntityId, visible: bool) {
        self.visible.set_value(id.index(), visible);
    }

    /// Hover flag (reactive read).
    pub fn hovered(&self, id: EntityId) -> bool {
        self.hovered.get(id.index()).unwrap()
    }

    /// Set the hover flag.
    pub fn set_hovered(&mut self, id: EntityId, hovered: bool) {
        self.hovered.set_value(id.index(), hovered);
    }

    /// Touch-capture flag (reactive read).
    pub fn touched(&self, id: EntityId) -> bool {
        self.touched.get(id.index()).unwrap()
    }

    /// Set the touch-capture flag.
    pub fn set_touched(&mut self, id: EntityId, touched: bool) {
        self.touched.set_value(id.index(), touched);
    }

    // -------------------------------------------------------------------------
    // Reactors
    // -------------------------------------------------------------------------

    /// Reactor list of `source`, in registration order.
    pub fn reactors(&self, source: EntityId) -> &[EntityId] {
        &self.reactors[source.index()]
    }

    /// Append `dependent` to the reactor list of `source`.
    ///
    /// Duplicate registration is a caller error and is not guarded here;
    /// cycles are rejected by scene validation.
    pub fn add_reactor(&mut self, source: EntityId, dependent: EntityId) {
        self.reactors[source.index()].push(dependent);
    }

    // -------------------------------------------------------------------------
    // Rig wiring
    // -------------------------------------------------------------------------

    /// The pivot this entity orbits (Handle, Follower).
    pub fn pivot_ref(&self, id: EntityId) -> Option<EntityId> {
        self.pivot_ref[id.index()]
    }

    /// Set the pivot reference.
    pub fn set_pivot_ref(&mut self, id: EntityId, pivot: EntityId) {
        self.pivot_ref[id.index()] = Some(pivot);
    }

    /// The handle this entity follows (Follower).
    pub fn handle_ref(&self, id: EntityId) -> Option<EntityId> {
        self.handle_ref[id.index()]
    }

    /// Set the handle reference.
    pub fn set_handle_ref(&mut self, id: EntityId, handle: EntityId) {
        self.handle_ref[id.index()] = Some(handle);
    }

    /// First derivation source (Decorative).
    pub fn source_a(&self, id: EntityId) -> Option<EntityId> {
        self.source_a[id.index()]
    }

    /// Second derivation source (Decorative), if any.
    pub fn source_b(&self, id: EntityId) -> Option<EntityId> {
        self.source_b[id.index()]
    }

    /// Set the derivation sources.
    pub fn set_sources(&mut self, id: EntityId, a: EntityId, b: Option<EntityId>) {
        self.source_a[id.index()] = Some(a);
        self.source_b[id.index()] = b;
    }

    // -------------------------------------------------------------------------
    // Solver parameters and drag state
    // -------------------------------------------------------------------------

    /// Radius before any hover scaling.
    pub fn base_radius(&self, id: EntityId) -> f64 {
        self.base_radius[id.index()]
    }

    /// Set the base radius (and the current radius with it).
    pub fn set_base_radius(&mut self, id: EntityId, radius: f64) {
        self.base_radius[id.index()] = radius;
        self.radius.set_value(id.index(), radius);
    }

    /// Capture offset (entity position minus pointer), valid while touched.
    pub fn capture_offset(&self, id: EntityId) -> (f64, f64) {
        (self.capture_dx[id.index()], self.capture_dy[id.index()])
    }

    /// Set the capture offset.
    pub fn set_capture_offset(&mut self, id: EntityId, dx: f64, dy: f64) {
        self.capture_dx[id.index()] = dx;
        self.capture_dy[id.index()] = dy;
    }

    /// Elastic stretch factor in (0, 1) (Handle).
    pub fn stretch(&self, id: EntityId) -> f64 {
        self.stretch[id.index()]
    }

    /// Set the stretch factor.
    pub fn set_stretch(&mut self, id: EntityId, stretch: f64) {
        self.stretch[id.index()] = stretch;
    }

    /// Per-frame easing blend factor (Follower).
    pub fn blend(&self, id: EntityId) -> f64 {
        self.blend[id.index()]
    }

    /// Set the blend factor.
    pub fn set_blend(&mut self, id: EntityId, blend: f64) {
        self.blend[id.index()] = blend;
    }

    /// Maximum residual angular separation from the handle (Follower).
    pub fn max_angle_step(&self, id: EntityId) -> f64 {
        self.max_angle_step[id.index()]
    }

    /// Set the maximum angular separation.
    pub fn set_max_angle_step(&mut self, id: EntityId, step: f64) {
        self.max_angle_step[id.index()] = step;
    }

    // -------------------------------------------------------------------------
    // Revisions
    // -------------------------------------------------------------------------

    /// How many times this entity has been re-evaluated as a reactor.
    pub fn revision(&self, id: EntityId) -> u64 {
        self.revision[id.index()]
    }

    /// Record one re-evaluation.
    pub fn bump_revision(&mut self, id: EntityId) {
        self.revision[id.index()] += 1;
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}
