//! # Core Module
//!
//! Shared settings consumed by the pipeline and the applications.

pub mod config;

pub use config::{
    ApplicationConfig, CameraConfig, Config, ConfigError, FrameConfig, OutputConfig, OutputFormat, RenderConfig,
    ViewConfig,
};
