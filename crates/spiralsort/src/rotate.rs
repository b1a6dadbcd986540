//! Counterclockwise filtering.
//!
//! Forces the path to keep rotating in one direction. The cloud is
//! rotated about the z axis so that the vector from the start node (the
//! origin) to the previously placed node falls on the positive x axis;
//! candidates with a non-negative rotated y lie on the counterclockwise
//! side of that vector and are kept.
//!
//! Rotation by `-theta`:
//!
//! ```text
//! |  cos(theta)  sin(theta) |
//! | -sin(theta)  cos(theta) |
//! ```

use crate::types::Point3;

/// Angle of `prev` from the positive x axis in the xy plane.
///
/// `atan2` covers the vertical and origin cases without branching.
#[must_use]
pub fn heading(prev: Point3) -> f64 {
    prev.y.atan2(prev.x)
}

/// Rotate `point` about the z axis by `-theta`.
#[must_use]
pub fn rotate_z(point: Point3, theta: f64) -> Point3 {
    let (sin, cos) = theta.sin_cos();
    Point3::new(
        cos.mul_add(point.x, sin * point.y),
        (-sin).mul_add(point.x, cos * point.y),
        point.z,
    )
}

/// Indices of the positions on the counterclockwise side of `prev`,
/// or `None` when no position qualifies.
#[must_use]
pub fn counterclockwise_side(positions: &[Point3], prev: Point3) -> Option<Vec<usize>> {
    let theta = heading(prev);
    let kept: Vec<usize> = positions
        .iter()
        .enumerate()
        .filter(|(_, p)| rotate_z(**p, theta).y >= 0.0)
        .map(|(i, _)| i)
        .collect();
    (!kept.is_empty()).then_some(kept)
}

/// Indices of the positions on the counterclockwise side of `prev`.
///
/// Falls back to every index when the filter would leave nothing, so a
/// non-empty candidate set never becomes empty. The flag is `true` when
/// that fallback was taken.
#[must_use]
pub fn counterclockwise_filter(positions: &[Point3], prev: Point3) -> (Vec<usize>, bool) {
    match counterclockwise_side(positions, prev) {
        Some(kept) => (kept, false),
        None => ((0..positions.len()).collect(), !positions.is_empty()),
    }
}
