//! Projection onto the normalized image plane
//!
//! Orthographic cameras drop z; perspective cameras divide onto the plane
//! z = −1. Either way the camera window `[left, right] × [bottom, top]` is
//! then mapped to `[−1, 1]²`, so window clipping and viewport mapping never
//! need to know which kind of camera produced a point.

use crate::foundation::math::Vec2;
use crate::scene::{Camera, Projection};

use super::clipping::{CameraVertex, ImageVertex};

/// Project a depth-clipped camera-space vertex
///
/// Perspective input must satisfy `z < 0`; depth clipping guarantees this
/// because the near distance is positive.
pub fn project(vertex: &CameraVertex, camera: &Camera) -> ImageVertex {
    let p = vertex.position;
    let plane = match camera.projection() {
        Projection::Orthographic => Vec2::new(p.x, p.y),
        Projection::Perspective => {
            debug_assert!(p.z < 0.0, "perspective projection of a point at z = {}", p.z);
            Vec2::new(p.x / -p.z, p.y / -p.z)
        }
    };
    ImageVertex {
        position: normalize(plane, camera),
        color: vertex.color,
    }
}

/// Map image-plane coordinates inside the camera window to `[−1, 1]²`
pub fn normalize(plane: Vec2, camera: &Camera) -> Vec2 {
    let (left, right, bottom, top) = camera.window();
    Vec2::new(
        2.0 * (plane.x - left) / (right - left) - 1.0,
        2.0 * (plane.y - bottom) / (top - bottom) - 1.0,
    )
}
