//! Model-to-camera coordinate stage
//!
//! Produces camera-space copies of a model's vertices. The input model is
//! never touched, so a scene can be re-rendered under another camera.

use crate::foundation::math::Mat4;
use crate::scene::{Model, Vertex};

/// Compose the matrix that takes model coordinates to camera coordinates
///
/// `placement` is the accumulated parent-to-child chain of position
/// matrices (world from model); `view` is the camera's world-to-camera matrix.
pub fn model_to_camera(view: &Mat4, placement: &Mat4) -> Mat4 {
    view * placement
}

/// Transform every vertex of `model` by `matrix`, returning the copy
pub fn transform_vertices(model: &Model, matrix: &Mat4) -> Vec<Vertex> {
    model
        .vertices()
        .iter()
        .map(|vertex| vertex.transformed(matrix))
        .collect()
}
