//! View-volume clipping
//!
//! Two passes, both boundary-inclusive:
//!
//! 1. **Depth** in camera space, before any division: segments are trimmed
//!    to `−far ≤ z ≤ −near`. For perspective cameras near > 0, so nothing
//!    reaching the projection stage has z ≥ 0.
//! 2. **Window** on the normalized image plane after projection: segments
//!    are trimmed to `[−1, 1]²`. Straight lines stay straight under the
//!    perspective divide, so this is equivalent to clipping against the four
//!    side planes of the view volume.
//!
//! Both passes use the Liang–Barsky parametric formulation. Colors of new
//! endpoints are interpolated with the same clip parameter as positions.

use bitflags::bitflags;

use crate::foundation::math::{Vec2, Vec3};
use crate::scene::{Camera, Color};

bitflags! {
    /// Which view-volume boundaries a point lies outside of
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OutCode: u8 {
        /// x < −1 (normalized)
        const LEFT = 1;
        /// x > 1 (normalized)
        const RIGHT = 1 << 1;
        /// y < −1 (normalized)
        const BOTTOM = 1 << 2;
        /// y > 1 (normalized)
        const TOP = 1 << 3;
        /// z > −near (camera space)
        const NEAR = 1 << 4;
        /// z < −far (camera space)
        const FAR = 1 << 5;
    }
}

/// Linear interpolation between two clip-stage vertices
pub trait Interpolate: Copy {
    /// Blend towards `other`; `t = 0` yields `self`
    #[must_use]
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

/// A camera-space endpoint with its color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraVertex {
    /// Camera-space position
    pub position: Vec3,
    /// Endpoint color
    pub color: Color,
}

impl Interpolate for CameraVertex {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(&other.position, t),
            color: self.color.lerp(&other.color, t),
        }
    }
}

/// A normalized image-plane endpoint with its color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageVertex {
    /// Normalized image coordinates; the visible window is `[−1, 1]²`
    pub position: Vec2,
    /// Endpoint color
    pub color: Color,
}

impl Interpolate for ImageVertex {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(&other.position, t),
            color: self.color.lerp(&other.color, t),
        }
    }
}

/// Intersect the parameter range `[0, 1]` with constraints `p·t ≤ q`
///
/// Returns the surviving `(t_enter, t_exit)`, or `None` when the range is
/// empty. Equality is kept, so a segment touching a boundary survives.
pub fn liang_barsky(constraints: &[(f32, f32)]) -> Option<(f32, f32)> {
    let mut t_enter = 0.0_f32;
    let mut t_exit = 1.0_f32;
    for &(p, q) in constraints {
        if p == 0.0 {
            // Parallel to this boundary: entirely inside or entirely outside
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t_enter = t_enter.max(r);
        } else {
            t_exit = t_exit.min(r);
        }
        if t_enter > t_exit {
            return None;
        }
    }
    Some((t_enter, t_exit))
}

fn trim<V: Interpolate>(a: V, b: V, (t_enter, t_exit): (f32, f32)) -> (V, V) {
    let start = if t_enter > 0.0 { a.interpolate(&b, t_enter) } else { a };
    let end = if t_exit < 1.0 { a.interpolate(&b, t_exit) } else { b };
    (start, end)
}

/// Depth outcode of a camera-space z
pub fn depth_outcode(z: f32, camera: &Camera) -> OutCode {
    let mut code = OutCode::empty();
    if z > -camera.near() {
        code |= OutCode::NEAR;
    }
    if z < -camera.far() {
        code |= OutCode::FAR;
    }
    code
}

/// Window outcode of a normalized image-plane point
pub fn window_outcode(point: &Vec2) -> OutCode {
    let mut code = OutCode::empty();
    if point.x < -1.0 {
        code |= OutCode::LEFT;
    }
    if point.x > 1.0 {
        code |= OutCode::RIGHT;
    }
    if point.y < -1.0 {
        code |= OutCode::BOTTOM;
    }
    if point.y > 1.0 {
        code |= OutCode::TOP;
    }
    code
}

/// Trim a camera-space segment to the camera's depth range
///
/// Newly created endpoints are snapped onto the plane they were clipped
/// against, so a near-clipped endpoint has exactly `z = −near`.
pub fn clip_segment_depth(a: CameraVertex, b: CameraVertex, camera: &Camera) -> Option<(CameraVertex, CameraVertex)> {
    let (code_a, code_b) = (depth_outcode(a.position.z, camera), depth_outcode(b.position.z, camera));
    if (code_a | code_b).is_empty() {
        return Some((a, b));
    }
    if code_a.intersects(code_b) {
        return None;
    }

    let (z0, dz) = (a.position.z, b.position.z - a.position.z);
    let near_plane = -camera.near();
    let far_plane = -camera.far();
    let range = liang_barsky(&[
        // z ≤ −near
        (dz, near_plane - z0),
        // z ≥ −far
        (-dz, z0 - far_plane),
    ])?;

    let (mut start, mut end) = trim(a, b, range);
    for (vertex, code) in [(&mut start, code_a), (&mut end, code_b)] {
        if code.contains(OutCode::NEAR) {
            vertex.position.z = near_plane;
        } else if code.contains(OutCode::FAR) {
            vertex.position.z = far_plane;
        }
    }
    Some((start, end))
}

/// Trim a normalized image-plane segment to the window `[−1, 1]²`
pub fn clip_segment_window(a: ImageVertex, b: ImageVertex) -> Option<(ImageVertex, ImageVertex)> {
    let (code_a, code_b) = (window_outcode(&a.position), window_outcode(&b.position));
    if (code_a | code_b).is_empty() {
        return Some((a, b));
    }
    if code_a.intersects(code_b) {
        return None;
    }

    let (x0, y0) = (a.position.x, a.position.y);
    let d = b.position - a.position;
    let range = liang_barsky(&[
        (-d.x, x0 + 1.0),
        (d.x, 1.0 - x0),
        (-d.y, y0 + 1.0),
        (d.y, 1.0 - y0),
    ])?;

    let (mut start, mut end) = trim(a, b, range);
    // Snap rounding overshoot back onto the window edge
    for vertex in [&mut start, &mut end] {
        vertex.position.x = vertex.position.x.clamp(-1.0, 1.0);
        vertex.position.y = vertex.position.y.clamp(-1.0, 1.0);
    }
    Some((start, end))
}

/// Whether a camera-space point lies within the depth range
pub fn point_in_depth(z: f32, camera: &Camera) -> bool {
    depth_outcode(z, camera).is_empty()
}

/// Whether a normalized image-plane point lies within the window
pub fn point_in_window(point: &Vec2) -> bool {
    window_outcode(point).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn image(x: f32, y: f32, color: Color) -> ImageVertex {
        ImageVertex {
            position: Vec2::new(x, y),
            color,
        }
    }

    fn camera_vertex(x: f32, y: f32, z: f32, color: Color) -> CameraVertex {
        CameraVertex {
            position: Vec3::new(x, y, z),
            color,
        }
    }

    #[test]
    fn test_segment_fully_outside_is_discarded() {
        let a = image(1.5, -0.5, Color::RED);
        let b = image(3.0, 0.5, Color::BLUE);
        assert_eq!(clip_segment_window(a, b), None);

        // Crosses both the x and y extents but misses the corner of the window
        let c = image(-3.0, 0.0, Color::RED);
        let d = image(0.0, 3.0, Color::BLUE);
        assert_eq!(clip_segment_window(c, d), None);
    }

    #[test]
    fn test_segment_fully_inside_is_unchanged() {
        let a = image(-0.5, -0.25, Color::RED);
        let b = image(0.75, 1.0, Color::BLUE);
        assert_eq!(clip_segment_window(a, b), Some((a, b)));
    }

    #[test]
    fn test_straddling_segment_is_trimmed_with_blended_color() {
        // From x = 0 to x = 2: the right edge x = 1 is hit halfway
        let a = image(0.0, 0.0, Color::RED);
        let b = image(2.0, 0.0, Color::BLUE);
        let (start, end) = clip_segment_window(a, b).unwrap();

        assert_eq!(start, a);
        assert_relative_eq!(end.position.x, 1.0);
        assert_relative_eq!(end.color.r, 0.5);
        assert_relative_eq!(end.color.b, 0.5);
    }

    #[test]
    fn test_clip_color_matches_clip_parameter() {
        // Enters through the left edge 30% of the way along
        let a = image(-1.6, 0.0, Color::RED);
        let b = image(0.4, 0.0, Color::BLUE);
        let (start, end) = clip_segment_window(a, b).unwrap();

        assert_relative_eq!(start.position.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(start.color.r, 0.7, epsilon = 1e-6);
        assert_relative_eq!(start.color.b, 0.3, epsilon = 1e-6);
        assert_eq!(end, b);
    }

    #[test]
    fn test_boundary_segment_is_retained() {
        let a = image(1.0, -1.0, Color::RED);
        let b = image(1.0, 1.0, Color::BLUE);
        assert_eq!(clip_segment_window(a, b), Some((a, b)));

        // Touching a corner from outside keeps the single touching point
        let c = image(1.0, 1.0, Color::RED);
        let d = image(2.0, 2.0, Color::BLUE);
        let (start, end) = clip_segment_window(c, d).unwrap();
        assert_eq!(start, c);
        assert_relative_eq!(end.position, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_near_clip_starts_exactly_on_near_plane() {
        let camera = Camera::perspective(-1.0, 1.0, -1.0, 1.0, 1.0).unwrap();
        let eye = camera_vertex(0.0, 0.0, 0.0, Color::RED);
        let far = camera_vertex(0.0, 1.0, -10.0, Color::BLUE);

        let (start, end) = clip_segment_depth(eye, far, &camera).unwrap();
        assert_eq!(start.position.z, -1.0);
        assert_relative_eq!(start.position.y, 0.1, epsilon = 1e-6);
        assert_relative_eq!(start.color.r, 0.9, epsilon = 1e-6);
        assert_relative_eq!(start.color.b, 0.1, epsilon = 1e-6);
        assert_eq!(end, far);
    }

    #[test]
    fn test_near_clip_handles_either_endpoint_order() {
        let camera = Camera::perspective(-1.0, 1.0, -1.0, 1.0, 2.0).unwrap();
        let inside = camera_vertex(0.0, 0.0, -6.0, Color::BLUE);
        let behind = camera_vertex(0.0, 0.0, 2.0, Color::RED);

        let (start, end) = clip_segment_depth(inside, behind, &camera).unwrap();
        assert_eq!(start, inside);
        assert_eq!(end.position.z, -2.0);
        assert_relative_eq!(end.color.r, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_segment_behind_eye_is_discarded() {
        let camera = Camera::perspective(-1.0, 1.0, -1.0, 1.0, 0.5).unwrap();
        let a = camera_vertex(0.0, 0.0, 1.0, Color::RED);
        let b = camera_vertex(1.0, 0.0, -0.25, Color::BLUE);
        assert_eq!(clip_segment_depth(a, b, &camera), None);
    }

    #[test]
    fn test_far_plane_clip() {
        let camera = Camera::perspective(-1.0, 1.0, -1.0, 1.0, 1.0)
            .unwrap()
            .with_far(10.0)
            .unwrap();
        let a = camera_vertex(0.0, 0.0, -5.0, Color::RED);
        let b = camera_vertex(0.0, 0.0, -15.0, Color::BLUE);
        let (_, end) = clip_segment_depth(a, b, &camera).unwrap();
        assert_eq!(end.position.z, -10.0);
        assert_relative_eq!(end.color.b, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_unbounded_orthographic_depth_keeps_everything() {
        let camera = Camera::orthographic(-1.0, 1.0, -1.0, 1.0).unwrap();
        let a = camera_vertex(0.0, 0.0, 100.0, Color::RED);
        let b = camera_vertex(0.0, 0.0, -100.0, Color::BLUE);
        assert_eq!(clip_segment_depth(a, b, &camera), Some((a, b)));
        assert!(point_in_depth(1.0e6, &camera));
    }

    #[test]
    fn test_point_tests() {
        let camera = Camera::perspective(-1.0, 1.0, -1.0, 1.0, 1.0).unwrap();
        assert!(point_in_depth(-1.0, &camera));
        assert!(!point_in_depth(-0.999, &camera));
        assert!(point_in_window(&Vec2::new(1.0, -1.0)));
        assert!(!point_in_window(&Vec2::new(1.0001, 0.0)));
        assert_eq!(window_outcode(&Vec2::new(-2.0, 3.0)), OutCode::LEFT | OutCode::TOP);
    }

    #[test]
    fn test_random_segments_stay_in_window() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let a = image(rng.gen_range(-4.0..4.0), rng.gen_range(-4.0..4.0), Color::RED);
            let b = image(rng.gen_range(-4.0..4.0), rng.gen_range(-4.0..4.0), Color::BLUE);
            let both_inside = point_in_window(&a.position) && point_in_window(&b.position);

            match clip_segment_window(a, b) {
                Some((start, end)) => {
                    assert!(point_in_window(&start.position));
                    assert!(point_in_window(&end.position));
                    if both_inside {
                        assert_eq!((start, end), (a, b));
                    }
                }
                None => assert!(!both_inside),
            }
        }
    }
}
