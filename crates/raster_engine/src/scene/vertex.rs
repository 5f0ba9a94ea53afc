//! Model-space vertices

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Mat4, Point3};

/// A point in a model's local coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertex {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
    /// Z coordinate
    pub z: f32,
}

impl Vertex {
    /// Create a vertex
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// View this vertex as a nalgebra point
    pub fn to_point(self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }

    /// Apply a homogeneous transform, returning a new vertex
    #[must_use]
    pub fn transformed(self, matrix: &Mat4) -> Self {
        Self::from(matrix.transform_point(&self.to_point()))
    }
}

impl From<Point3> for Vertex {
    fn from(point: Point3) -> Self {
        Self::new(point.x, point.y, point.z)
    }
}

impl From<[f32; 3]> for Vertex {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}
