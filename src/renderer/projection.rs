//! Viewport fit
//!
//! Letterbox/pillarbox the fixed logical resolution into an arbitrary window,
//! centered, without stretching.

use glam::{Mat4, Vec3};

use crate::math::{look_at, orthographic};

/// Projection mapping image space (origin top-left, y down) into the window.
///
/// The image is scaled to the window width; if that cuts off the bottom it is
/// scaled to the window height instead. The ortho box is then widened so the
/// extra space splits evenly on both sides.
pub fn image_projection(window_width: f32, window_height: f32, image_width: f32, image_height: f32) -> Mat4 {
    let aspect = image_width / image_height;

    let mut width = window_width;
    let mut height = width / aspect;
    if height > window_height {
        height = window_height;
        width = height * aspect;
    }

    let width = image_width * (window_width / width);
    let height = image_height * (window_height / height);

    let left = (image_width - width) / 2.0;
    let right = width + left;
    let top = (image_height - height) / 2.0;
    let bottom = height + top;

    let view = look_at(Vec3::new(0.0, 0.0, -1.0), Vec3::ZERO, Vec3::Y);
    let projection = orthographic(left, right, bottom, top, 0.01, 10.0);
    projection * view
}
