//! Vector/matrix math
//!
//! Value types come from glam. This module adds the scalar helpers the
//! simulation is tuned against and the mat4 builders the renderer handoff needs.
//!
//! Conventions: column vectors, left-handed view space, depth mapped to `[0, 1]`.
//! All angles are radians. `normalize` on a zero-length vector is a precondition
//! violation (glam yields NaN); callers must guard.

pub use glam::{EulerRot, Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};

pub use crate::wrap_unit;

/// Linear interpolation, written as `a·(1−t) + b·t` so both endpoints are exact.
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start * (1.0 - t) + end * t
}

/// Frame-rate independent interpolation weight.
///
/// After `time` seconds the remaining distance has shrunk to `factor` of its
/// original value, regardless of how the interval was split into steps.
#[inline]
pub fn lerp_delta_time(dt: f32, factor: f32, time: f32) -> f32 {
    1.0 - factor.powf(dt * (1.0 / time))
}

/// Sample a three-state size triple at a point on the growth cycle.
///
/// The cycle is split into thirds: `x→y` on `[0, 1/3)`, `y→z` on `[1/3, 2/3)`
/// and `z→x` on `[2/3, 1)`, so the result is continuous across the 0/1 seam.
pub fn lerp_growth(sizes: Vec3, factor: f32) -> f32 {
    let f = factor;
    if (0.0..1.0 / 3.0).contains(&f) {
        lerp(sizes.x, sizes.y, f * 3.0)
    } else if (1.0 / 3.0..2.0 / 3.0).contains(&f) {
        lerp(sizes.y, sizes.z, (f - 1.0 / 3.0) * 3.0)
    } else {
        lerp(sizes.z, sizes.x, (f - 2.0 / 3.0) * 3.0)
    }
}

/// Polynomial smooth minimum with blend radius `k` (`k > 0`).
///
/// Never exceeds `min(a, b)` and never undershoots it by more than `k / 4`.
#[inline]
pub fn smooth_min(a: f32, b: f32, k: f32) -> f32 {
    let h = (k - (a - b).abs()).max(0.0);
    a.min(b) - h * h * 0.25 / k
}

/// Signed shortest step from `from` to `to` on the unit circle, in `[-0.5, 0.5)`.
#[inline]
pub fn circular_delta(from: f32, to: f32) -> f32 {
    (((to - from) % 1.0) + 1.5) % 1.0 - 0.5
}

/// Translation matrix
#[inline]
pub fn translate(offset: Vec3) -> Mat4 {
    Mat4::from_translation(offset)
}

/// Rotation of `angle` radians around a unit `axis`
#[inline]
pub fn rotate_axis_angle(axis: Vec3, angle: f32) -> Mat4 {
    Mat4::from_axis_angle(axis, angle)
}

/// Rotation from roll (z), pitch (y) and yaw (x), applied yaw first
#[inline]
pub fn rotate_roll_pitch_yaw(roll_pitch_yaw: Vec3) -> Mat4 {
    Mat4::from_euler(
        EulerRot::ZYX,
        roll_pitch_yaw.x,
        roll_pitch_yaw.y,
        roll_pitch_yaw.z,
    )
}

/// Non-uniform scale matrix
#[inline]
pub fn scale(factors: Vec3) -> Mat4 {
    Mat4::from_scale(factors)
}

/// View matrix looking from `eye` toward `target`
#[inline]
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_lh(eye, target, up)
}

/// Perspective projection with vertical field of view `fov_y`
#[inline]
pub fn perspective(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_lh(fov_y, aspect_ratio, near, far)
}

/// Orthographic projection of the box `[left, right] x [bottom, top] x [near, far]`
#[inline]
pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    Mat4::orthographic_lh(left, right, bottom, top, near, far)
}
