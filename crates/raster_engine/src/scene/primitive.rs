//! Renderable primitives
//!
//! A primitive never stores geometry itself; it refers to entries of its
//! owning [`Model`](super::Model)'s vertex and color lists by index. Index
//! validity is only checked at render time (see [`validation`](super::validation)).

use serde::{Deserialize, Serialize};

/// A renderable geometric unit
///
/// Every variant carries exactly one color index per vertex index, so the
/// two index lists are always the same length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Primitive {
    /// A straight segment between two vertices, colored per endpoint
    LineSegment {
        /// Endpoint vertex indices
        vertices: [usize; 2],
        /// Endpoint color indices, parallel to `vertices`
        colors: [usize; 2],
    },
    /// A single vertex drawn as a filled square of side `2 * radius + 1` pixels
    Point {
        /// Vertex index, wrapped in an array so index lists stay slices
        vertex: [usize; 1],
        /// Color index
        color: [usize; 1],
        /// Half-width in pixels; 0 draws exactly one pixel
        radius: u32,
    },
}

impl Primitive {
    /// Create a line segment from vertex indices `v0`, `v1` and color indices `c0`, `c1`
    pub const fn line_segment(v0: usize, v1: usize, c0: usize, c1: usize) -> Self {
        Self::LineSegment {
            vertices: [v0, v1],
            colors: [c0, c1],
        }
    }

    /// Create a point primitive
    pub const fn point(vertex: usize, color: usize, radius: u32) -> Self {
        Self::Point {
            vertex: [vertex],
            color: [color],
            radius,
        }
    }

    /// Vertex indices in endpoint order
    pub fn vertex_indices(&self) -> &[usize] {
        match self {
            Self::LineSegment { vertices, .. } => vertices,
            Self::Point { vertex, .. } => vertex,
        }
    }

    /// Color indices, parallel to [`vertex_indices`](Self::vertex_indices)
    pub fn color_indices(&self) -> &[usize] {
        match self {
            Self::LineSegment { colors, .. } => colors,
            Self::Point { color, .. } => color,
        }
    }

    /// Short variant name used in diagnostics
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::LineSegment { .. } => "LineSegment",
            Self::Point { .. } => "Point",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_lists_are_parallel() {
        let primitives = [Primitive::line_segment(0, 1, 2, 3), Primitive::point(4, 5, 2)];
        for primitive in primitives {
            assert_eq!(primitive.vertex_indices().len(), primitive.color_indices().len());
        }
    }

    #[test]
    fn test_line_segment_argument_order() {
        let line = Primitive::line_segment(0, 1, 0, 1);
        assert_eq!(line.vertex_indices(), &[0, 1]);
        assert_eq!(line.color_indices(), &[0, 1]);
        assert_eq!(line.kind(), "LineSegment");
    }
}
