//! Handle capture and drag helpers.
//!
//! The handle is the pointer-manipulable end of the rig. On touch it
//! remembers where inside its body it was grabbed; every drag move then
//! reconstructs the unconstrained candidate from the pointer plus that
//! offset before the arc constraint is applied, so the handle never jumps
//! under the finger.

use crate::types::Point;

/// Radius scale while hovered (50 -> 55 in the reference illustration).
pub const HOVER_SCALE: f64 = 1.1;

/// Default elastic stretch factor for new handles.
pub const DEFAULT_STRETCH: f64 = 0.9;

/// Capture offset recorded at the moment of touch: entity minus pointer.
#[inline]
pub fn capture_offset(entity: Point, pointer: Point) -> (f64, f64) {
    (entity.x - pointer.x, entity.y - pointer.y)
}

/// Unconstrained drag candidate: pointer plus the capture offset.
#[inline]
pub fn drag_candidate(pointer: Point, offset: (f64, f64)) -> Point {
    pointer.offset(offset.0, offset.1)
}
