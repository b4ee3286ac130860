//! Elastic arc constraint for the handle.
//!
//! Given a candidate position from drag input, produce the position the
//! handle is actually allowed to take: pulled toward the arm-length circle
//! around the pivot, with elastic give controlled by the stretch factor.

use crate::math::{angle_from, lerp_point};
use crate::types::Point;

/// Constrain `candidate` to the elastically-damped arc around `pivot`.
///
/// 1. Angle from pivot to candidate (stable fallback when coincident).
/// 2. The exact on-circle position at that angle and `arm_length`.
/// 3. Lerp from candidate toward exact by `stretch`: a stretch near 1 pulls
///    the handle almost fully onto the circle, near 0 leaves it nearly free.
///
/// Pure function of its arguments; mutates nothing.
pub fn constrain(candidate: Point, pivot: Point, arm_length: f64, stretch: f64) -> Point {
    let angle = angle_from(pivot, candidate);
    let exact = pivot.on_circle(angle, arm_length);
    lerp_point(candidate, exact, stretch)
}
