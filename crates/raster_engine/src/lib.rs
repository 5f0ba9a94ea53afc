//! # Raster Engine
//!
//! A deterministic software 3D rendering pipeline written in Rust.
//!
//! ## Features
//!
//! - **Scene Graph**: models in an arena, shared across positions, nested with accumulated transforms
//! - **Cameras**: orthographic and perspective projection with optional look-at orientation
//! - **Clipping**: depth range before projection, boundary-inclusive window clipping after
//! - **Rasterization**: Bresenham lines with color interpolation and square points
//! - **Frame Buffers**: aliasing viewports, pixel map (`P6`/`P3`) and PNG output
//!
//! ## Quick Start
//!
//! ```rust
//! use raster_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut scene = Scene::new("quick start", Camera::orthographic(-1.0, 1.0, -1.0, 1.0)?);
//!
//!     let mut line = Model::new("line");
//!     line.add_vertices([Vertex::new(0.0, 0.0, 0.0), Vertex::new(1.0, 1.0, 0.0)]);
//!     line.add_colors([Color::RED, Color::BLUE]);
//!     line.add_line_segment(0, 1, 0, 1);
//!     let key = scene.add_model(line);
//!     scene.add_position(Position::new("line", key));
//!
//!     let mut frame = FrameBuffer::new(100, 100)?;
//!     let stats = Pipeline::default().render(&scene, &mut frame)?;
//!     assert_eq!(frame.pixel(50, 50), Some(Rgb8::new(255, 0, 0)));
//!     assert_eq!(stats.primitives_rasterized, 1);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

// Shared settings
pub mod config;
pub mod core;

pub mod foundation;
pub mod render;
pub mod scene;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        core::config::{ApplicationConfig, CameraConfig, Config, FrameConfig, OutputConfig, RenderConfig},
        foundation::math::{Mat4, Transform, Vec3},
        render::{FrameBuffer, Pipeline, PixelTarget, PpmFormat, RenderError, RenderStats, Viewport},
        scene::{Camera, Color, Model, ModelKey, Position, Primitive, Rgb8, Scene, Vertex},
    };
}
