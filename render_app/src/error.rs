//! Application error type

use raster_engine::core::ConfigError;
use raster_engine::render::{FrameBufferError, RenderError};
use raster_engine::scene::CameraError;
use thiserror::Error;

/// Anything that stops a demo run
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration file could not be loaded or is invalid
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    /// Camera parameters are unusable
    #[error("camera: {0}")]
    Camera(#[from] CameraError),

    /// The pipeline rejected the scene
    #[error("render: {0}")]
    Render(#[from] RenderError),

    /// Frame buffer allocation or output failed
    #[error("frame buffer: {0}")]
    Frame(#[from] FrameBufferError),
}
