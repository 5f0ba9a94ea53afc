//! Scene graph data model
//!
//! Everything the pipeline consumes: [`Vertex`], [`Color`], [`Primitive`],
//! [`Model`], [`Position`], [`Camera`] and [`Scene`]. Scene-construction
//! code builds these once; the pipeline only borrows them and works on
//! transformed copies.

pub mod camera;
pub mod color;
pub mod model;
pub mod position;
pub mod primitive;
pub mod scene_graph;
pub mod validation;
pub mod vertex;

pub use camera::{Camera, CameraError, Projection, ViewOrientation};
pub use color::{Color, Rgb8};
pub use model::Model;
pub use position::Position;
pub use primitive::Primitive;
pub use scene_graph::{ModelKey, Scene, SceneError};
pub use validation::{validate_model, validate_scene, validate_visible, ValidationIssue, ValidationReport};
pub use vertex::Vertex;
