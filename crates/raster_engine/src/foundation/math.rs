//! Math utilities and types
//!
//! Provides the vector and matrix types used by every pipeline stage.
//!
//! # Camera space convention
//! Right-handed, Y-up, with the eye at the origin looking down −Z:
//! - X+ = Right
//! - Y+ = Up
//! - Z+ = Towards the viewer (visible geometry has z < 0)

pub use nalgebra::{Matrix4, Quaternion, Unit, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Placement built from translation, rotation and scale
///
/// Composes as `T × R × S`, so scale is applied first and translation last.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Translation
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Per-axis scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform from a translation vector
    pub fn from_translation(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: set rotation from Euler angles (radians, roll/pitch/yaw)
    #[must_use]
    pub fn with_rotation_euler(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Quat::from_euler_angles(x, y, z);
        self
    }

    /// Builder pattern: set a uniform scale
    #[must_use]
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: set per-axis scale
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: &Point3) -> Point3 {
        self.to_matrix().transform_point(point)
    }

    /// Combine this transform with a child transform expressed in this one's frame
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            position: self.position + self.rotation * self.scale.component_mul(&other.position),
            rotation: self.rotation * other.rotation,
            scale: self.scale.component_mul(&other.scale),
        }
    }
}

/// Math utility functions
pub mod utils {
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees.to_radians()
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a view matrix that places `eye` at the origin looking down −Z towards `target`
    ///
    /// Returns `None` when the basis is degenerate (eye on target, or `up`
    /// parallel to the view direction).
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Option<Mat4>;
}

impl Mat4Ext for Mat4 {
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Option<Mat4> {
        let forward = (target - eye).try_normalize(f32::EPSILON)?;
        let right = forward.cross(&up).try_normalize(f32::EPSILON)?;
        let camera_up = right.cross(&forward);

        let translation = Mat4::new_translation(&-eye);

        #[rustfmt::skip]
        let rotation = Mat4::new(
            right.x,     right.y,     right.z,     0.0,
            camera_up.x, camera_up.y, camera_up.z, 0.0,
            -forward.x,  -forward.y,  -forward.z,  0.0,
            0.0,         0.0,         0.0,         1.0,
        );

        Some(rotation * translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_translation_matrix_moves_points() {
        let transform = Transform::from_translation(Vec3::new(1.0, -2.0, 3.0));
        let moved = transform.transform_point(&Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(moved, Point3::new(2.0, -1.0, 4.0), epsilon = EPSILON);
    }

    #[test]
    fn test_scale_applies_before_translation() {
        let transform = Transform::from_translation(Vec3::new(10.0, 0.0, 0.0)).with_uniform_scale(2.0);
        let moved = transform.transform_point(&Point3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(moved, Point3::new(12.0, 2.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_combine_matches_matrix_product() {
        let parent = Transform::from_translation(Vec3::new(1.0, 2.0, 3.0))
            .with_rotation_euler(0.0, 0.5, 0.0)
            .with_uniform_scale(2.0);
        let child = Transform::from_translation(Vec3::new(-1.0, 0.5, 0.0)).with_rotation_euler(0.3, 0.0, 0.0);

        let combined = parent.combine(&child).to_matrix();
        let product = parent.to_matrix() * child.to_matrix();
        assert_relative_eq!(combined, product, epsilon = EPSILON);
    }

    #[test]
    fn test_look_at_places_target_on_negative_z() {
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::zeros(), Vec3::y()).unwrap();
        let target = view.transform_point(&Point3::origin());
        assert_relative_eq!(target, Point3::new(0.0, 0.0, -5.0), epsilon = EPSILON);

        // Up stays up, right stays right for a camera on the +Z axis
        let up = view.transform_point(&Point3::new(0.0, 1.0, 0.0));
        assert!(up.y > 0.0);
        let right = view.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!(right.x > 0.0);
    }

    #[test]
    fn test_look_at_rejects_degenerate_basis() {
        assert!(Mat4::look_at(Vec3::zeros(), Vec3::zeros(), Vec3::y()).is_none());
        assert!(Mat4::look_at(Vec3::zeros(), Vec3::new(0.0, 3.0, 0.0), Vec3::y()).is_none());
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_relative_eq!(utils::lerp(2.0, 4.0, 0.0), 2.0);
        assert_relative_eq!(utils::lerp(2.0, 4.0, 1.0), 4.0);
        assert_relative_eq!(utils::lerp(2.0, 4.0, 0.25), 2.5);
    }
}
