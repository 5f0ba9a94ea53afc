//! Demo applications for the raster engine
//!
//! The binaries `render_scene` and `split_view` share the scene builder and
//! error type defined here.

pub mod demo_scene;
pub mod error;

pub use error::AppError;
