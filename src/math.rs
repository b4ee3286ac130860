//! Scalar and angle utilities.
//!
//! Pure functions, no state. Angles are radians; the wrapped range used by
//! the rig is [-PI, PI).

use std::f64::consts::PI;

use crate::types::Point;

/// Distances below this are treated as degenerate (coincident points).
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// Linear interpolation from `a` to `b` by `t`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Linear interpolation between two points by `t`.
#[inline]
pub fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    Point::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// Wrap `value` into the half-open range [min, max).
pub fn wrap(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    (((value - min) % range) + range) % range + min
}

/// Shortest signed difference from `a` to `b`, both wrapped into [min, max).
///
/// A positive result means `b` lies counter-clockwise of `a` along the
/// shorter arc.
pub fn wrapped_difference(a: f64, b: f64, min: f64, max: f64) -> f64 {
    let diff = wrap(b, min, max) - wrap(a, min, max);
    let range = max - min;
    if diff > range / 2.0 {
        diff - range
    } else if diff < -range / 2.0 {
        diff + range
    } else {
        diff
    }
}

/// Shortest signed angular difference from `a` to `b` in [-PI, PI).
#[inline]
pub fn angle_difference(a: f64, b: f64) -> f64 {
    wrapped_difference(a, b, -PI, PI)
}

/// Angle of `to` as seen from `from`, via atan2.
///
/// Coincident points leave the angle numerically undefined; a stable
/// fallback of 0.0 is substituted so NaN never propagates into the rig.
pub fn angle_from(from: Point, to: Point) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx.abs() < DEGENERATE_EPSILON && dy.abs() < DEGENERATE_EPSILON {
        return 0.0;
    }
    dy.atan2(dx)
}
