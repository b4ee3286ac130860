//! Core types for armature.
//!
//! These types define the foundation that everything builds on.
//! They flow through the rig solvers and the interaction state machine.

// =============================================================================
// Point
// =============================================================================

/// A point (or displacement) in device-pixel surface coordinates.
///
/// Plain value type - entities are arena indices, never points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Midpoint between this point and another.
    #[inline]
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Component-wise addition.
    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Point on the circle of `radius` around this point at `angle` radians.
    #[inline]
    pub fn on_circle(&self, angle: f64, radius: f64) -> Point {
        Point::new(self.x + angle.cos() * radius, self.y + angle.sin() * radius)
    }
}

// =============================================================================
// Entity Id
// =============================================================================

/// Stable arena index into the [`EntityStore`](crate::engine::EntityStore).
///
/// Entities are NOT objects. They are indices into parallel columns, so a
/// reactor list holds `EntityId`s and notification never dereferences a
/// stale pointer. Ids are allocated at scene assembly and never released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub usize);

impl EntityId {
    /// The raw column index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

// =============================================================================
// Entity Kind
// =============================================================================

/// The closed set of entity variants.
///
/// Capability dispatch (hover/touch/drag/release/hit-test/advance) matches
/// on this tag; variants implement only the operations they need and the
/// rest default to no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Fixed rig root. Repositioned on resize only, never hit-testable.
    Pivot,
    /// Pointer-manipulable end of the arm, constrained to the elastic arc.
    Handle,
    /// Lagged joint easing after the handle on the handle's circle.
    Follower,
    /// Purely derived visual (connecting segment, sprite transform).
    Decorative,
}

// =============================================================================
// Capabilities (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Per-entity capability gates.
    ///
    /// Combine with bitwise OR: `Capabilities::HIT_TESTABLE | Capabilities::DRAGGABLE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Capabilities: u8 {
        const NONE = 0;
        /// Participates in pointer hit-testing.
        const HIT_TESTABLE = 1 << 0;
        /// Accepts pointer capture and drag forwarding.
        const DRAGGABLE = 1 << 1;
        /// Advanced every tick by the frame loop (time-sensitive update).
        const ANIMATED = 1 << 2;
    }
}

impl Capabilities {
    /// Default capability set for a kind.
    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Pivot => Self::NONE,
            EntityKind::Handle => Self::HIT_TESTABLE | Self::DRAGGABLE,
            EntityKind::Follower => Self::HIT_TESTABLE | Self::ANIMATED,
            EntityKind::Decorative => Self::NONE,
        }
    }
}

// =============================================================================
// Capture
// =============================================================================

/// Response of an entity's touch operation to a press.
///
/// Redirection is retried until a fixed point, bounded by
/// [`MAX_CAPTURE_REDIRECTS`](crate::state::MAX_CAPTURE_REDIRECTS).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// The entity takes the capture itself.
    Accept,
    /// Capture is handed to another entity (retry touch there).
    Redirect(EntityId),
    /// No entity becomes touching.
    Decline,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_on_circle() {
        let c = Point::new(10.0, 20.0);
        let p = c.on_circle(std::f64::consts::FRAC_PI_2, 5.0);
        assert!((p.x - 10.0).abs() < 1e-9);
        assert!((p.y - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_capabilities() {
        assert!(Capabilities::for_kind(EntityKind::Pivot).is_empty());
        assert!(Capabilities::for_kind(EntityKind::Handle).contains(Capabilities::DRAGGABLE));
        assert!(Capabilities::for_kind(EntityKind::Follower).contains(Capabilities::ANIMATED));
        assert!(!Capabilities::for_kind(EntityKind::Decorative).contains(Capabilities::HIT_TESTABLE));
    }
}
