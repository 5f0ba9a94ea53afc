//! # Rendering Pipeline
//!
//! A software pipeline that turns a [`Scene`](crate::scene::Scene) into
//! pixels in a [`FrameBuffer`] or any [`PixelTarget`].
//!
//! ## Architecture
//!
//! - **Pipeline**: orchestrates traversal and the fixed stage sequence
//! - **Coordinates**: model space to camera space
//! - **Clipping**: depth range in camera space, window after projection
//! - **Projection**: orthographic or perspective onto the normalized image plane
//! - **Viewport transform**: normalized coordinates to pixel coordinates
//! - **Rasterizer**: Bresenham lines and square points with color blending
//! - **Frame buffer**: pixel storage, aliasing viewports, pixel map and PNG output

pub mod clipping;
pub mod coordinates;
pub mod framebuffer;
pub mod pipeline;
pub mod ppm;
pub mod projection;
pub mod rasterizer;
pub mod viewport_transform;

#[cfg(test)]
mod tests;

use thiserror::Error;

use crate::scene::{CameraError, SceneError, ValidationIssue};

pub use framebuffer::{FrameBuffer, FrameBufferError, PixelTarget, Viewport};
pub use pipeline::{Pipeline, RenderStats};
pub use ppm::PpmFormat;
pub use rasterizer::{PixelVertex, ScreenPrimitive};

/// Reasons a render call can fail
///
/// Only structural problems abort a render. Geometry outside the view
/// volume and off-target pixel writes are normal and never errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The scene's camera violates its invariants
    #[error("invalid camera: {0}")]
    InvalidCamera(#[from] CameraError),

    /// The scene graph cannot be traversed
    #[error("invalid scene: {0}")]
    InvalidScene(#[from] SceneError),

    /// A primitive references a missing vertex or color (strict mode only)
    #[error("invalid primitive indices: {0}")]
    InvalidIndices(ValidationIssue),
}
