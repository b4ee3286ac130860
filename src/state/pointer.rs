//! Pointer Module - Input routing and the interaction state machine.
//!
//! One [`InputRouter`] per scene, constructed at assembly time and passed
//! explicitly to the event handlers; no free-floating module state. All
//! pointer state lives in signals so a host can observe transitions
//! reactively.
//!
//! # State machine
//!
//! ```text
//! idle -> hovering -> touching -> dragging -> idle
//! ```
//!
//! - **move**: while an entity is touching, the move is forwarded to it as
//!   a drag (no re-hit-testing). Otherwise the scene is re-hit-tested
//!   topmost-first and hover is swapped.
//! - **press**: the hovering entity is offered capture; its touch
//!   operation may accept, redirect to another entity (retried to a fixed
//!   point, bounded), or decline.
//! - **release**: the touching entity is released, capture state cleared,
//!   and hover re-evaluated at the current position.

use spark_signals::{signal, Signal};
use tracing::{debug, error};

use crate::engine::Scene;
use crate::types::{Capture, EntityId, Point};

/// Maximum touch-redirection hops before capture is abandoned.
///
/// A chain that fails to settle within this bound is a wiring error;
/// `Scene::validate` rejects it at assembly time, and the runtime loop
/// declines capture rather than recursing forever.
pub const MAX_CAPTURE_REDIRECTS: usize = 8;

/// Per-scene pointer state and transition rules.
pub struct InputRouter {
    x: Signal<f64>,
    y: Signal<f64>,
    down: Signal<bool>,
    hovering: Signal<Option<EntityId>>,
    touching: Signal<Option<EntityId>>,
    dragging: Signal<Option<EntityId>>,
}

impl InputRouter {
    /// Create a router with the pointer idle at the origin.
    pub fn new() -> Self {
        Self {
            x: signal(0.0),
            y: signal(0.0),
            down: signal(false),
            hovering: signal(None),
            touching: signal(None),
            dragging: signal(None),
        }
    }

    /// Current pointer position in surface coordinates.
    pub fn position(&self) -> Point {
        Point::new(self.x.get(), self.y.get())
    }

    /// Whether the pointer button is down.
    pub fn is_down(&self) -> bool {
        self.down.get()
    }

    /// Entity currently hovered, if any.
    pub fn hovering(&self) -> Option<EntityId> {
        self.hovering.get()
    }

    /// Entity currently holding pointer capture, if any.
    pub fn touching(&self) -> Option<EntityId> {
        self.touching.get()
    }

    /// Entity currently being dragged, if any. Dragging implies touching.
    pub fn dragging(&self) -> Option<EntityId> {
        self.dragging.get()
    }

    // -------------------------------------------------------------------------
    // Event entry points
    // -------------------------------------------------------------------------

    /// Pointer moved to (x, y).
    pub fn pointer_move(&self, scene: &mut Scene, x: f64, y: f64) {
        self.x.set(x);
        self.y.set(y);

        if let Some(touching) = self.touching.get() {
            // Captured: forward as a drag, never re-hit-test mid-capture.
            scene.drag(touching, Point::new(x, y));
            self.dragging.set(Some(touching));
        } else {
            self.refresh_hover(scene);
        }
    }

    /// Pointer button pressed at (x, y).
    pub fn pointer_press(&self, scene: &mut Scene, x: f64, y: f64) {
        self.down.set(true);
        self.x.set(x);
        self.y.set(y);
        self.refresh_hover(scene);

        let Some(hovering) = self.hovering.get() else {
            return;
        };
        let pointer = Point::new(x, y);

        // Capture protocol: retry redirections to a fixed point, bounded.
        let mut current = hovering;
        for _ in 0..MAX_CAPTURE_REDIRECTS {
            match scene.touch(current, pointer) {
                Capture::Accept => {
                    debug!(from = hovering.index(), to = current.index(), "capture accepted");
                    self.touching.set(Some(current));
                    return;
                }
                Capture::Redirect(next) if next != current => {
                    current = next;
                }
                Capture::Redirect(_) => {
                    // Redirect to self is a fixed point: capture settles here.
                    debug!(id = current.index(), "capture settled on self-redirect");
                    self.touching.set(Some(current));
                    return;
                }
                Capture::Decline => {
                    debug!(id = current.index(), "capture declined");
                    return;
                }
            }
        }
        // Validation should have caught this chain; degrade to no capture.
        error!(
            id = hovering.index(),
            bound = MAX_CAPTURE_REDIRECTS,
            "capture redirection did not settle; declining"
        );
    }

    /// Pointer button released at (x, y).
    pub fn pointer_release(&self, scene: &mut Scene, x: f64, y: f64) {
        self.down.set(false);
        self.x.set(x);
        self.y.set(y);

        if let Some(touching) = self.touching.get() {
            scene.release(touching);
            self.touching.set(None);
            self.dragging.set(None);
        }
        // Restore hover against whatever is under the pointer now.
        self.refresh_hover(scene);
    }

    // -------------------------------------------------------------------------
    // Hover
    // -------------------------------------------------------------------------

    /// Re-run hit-testing at the current position and swap hover.
    fn refresh_hover(&self, scene: &mut Scene) {
        let hit = scene.pick(self.position());
        let previous = self.hovering.get();
        if hit == previous {
            return;
        }
        if let Some(previous) = previous {
            scene.unhover(previous);
        }
        if let Some(hit) = hit {
            scene.hover(hit);
        }
        self.hovering.set(hit);
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
