//! # Application Configuration
//!
//! Serializable settings for a render run, loadable from TOML or RON
//! through [`Config`].
//!
//! ## Configuration Categories
//!
//! - **Render Config**: per-render switches threaded through [`Pipeline`](crate::render::Pipeline)
//! - **Frame Config**: raster target size and background
//! - **Camera Config**: a [`Camera`] description that validates on conversion
//! - **Output Config**: where and how the finished frame is written

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::foundation::math::Vec3;
use crate::render::{FrameBuffer, FrameBufferError, PpmFormat};
use crate::scene::{Camera, CameraError, Projection, Rgb8};

/// # Render Configuration
///
/// Switches that change how a single render call behaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Log every pipeline stage of every primitive at debug level
    pub debug: bool,
    /// Fail the render on out-of-range primitive indices instead of skipping them
    ///
    /// Only subtrees that would be drawn are checked; hidden positions and
    /// models never fail a render.
    pub strict_indices: bool,
}

impl RenderConfig {
    /// Enable or disable per-stage debug logging
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Enable or disable strict index checking
    pub fn with_strict_indices(mut self, enabled: bool) -> Self {
        self.strict_indices = enabled;
        self
    }
}

/// Raster target dimensions and fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Background as an RGB byte triple
    pub background: [u8; 3],
}

impl FrameConfig {
    /// Background as a pixel value
    pub fn background(&self) -> Rgb8 {
        Rgb8::from(self.background)
    }

    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Allocate a frame buffer filled with the background
    pub fn create_framebuffer(&self) -> Result<FrameBuffer, FrameBufferError> {
        FrameBuffer::with_background(self.width, self.height, self.background())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "frame must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            background: [0, 0, 0],
        }
    }
}

/// Camera orientation in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Eye position
    pub eye: [f32; 3],
    /// Point looked at
    pub target: [f32; 3],
    /// Approximate up direction
    pub up: [f32; 3],
}

/// # Camera Configuration
///
/// A file-friendly camera description. Nothing is checked until
/// [`to_camera`](Self::to_camera), which applies every [`Camera`] invariant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Projection kind
    pub projection: Projection,
    /// Visible window as `[left, right, bottom, top]`
    pub window: [f32; 4],
    /// Near distance; perspective cameras fall back to [`DEFAULT_NEAR`](Self::DEFAULT_NEAR)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub near: Option<f32>,
    /// Far distance; unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub far: Option<f32>,
    /// Explicit orientation; the camera sits at the origin looking down −Z when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewConfig>,
}

impl CameraConfig {
    /// Near distance used by perspective cameras that do not set one
    pub const DEFAULT_NEAR: f32 = 0.1;

    /// Orthographic camera over a window
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            projection: Projection::Orthographic,
            window: [left, right, bottom, top],
            near: None,
            far: None,
            view: None,
        }
    }

    /// Perspective camera over a window on the z = −1 plane
    pub fn perspective(left: f32, right: f32, bottom: f32, top: f32, near: f32) -> Self {
        Self {
            projection: Projection::Perspective,
            near: Some(near),
            ..Self::orthographic(left, right, bottom, top)
        }
    }

    /// Set the far distance
    pub fn with_far(mut self, far: f32) -> Self {
        self.far = Some(far);
        self
    }

    /// Set the orientation
    pub fn with_view(mut self, eye: [f32; 3], target: [f32; 3], up: [f32; 3]) -> Self {
        self.view = Some(ViewConfig { eye, target, up });
        self
    }

    /// Build the camera, enforcing its invariants
    pub fn to_camera(&self) -> Result<Camera, CameraError> {
        let [left, right, bottom, top] = self.window;
        let camera = match self.projection {
            Projection::Orthographic => {
                let camera = Camera::orthographic(left, right, bottom, top)?;
                if self.near.is_some() || self.far.is_some() {
                    camera.with_depth_range(
                        self.near.unwrap_or(f32::NEG_INFINITY),
                        self.far.unwrap_or(f32::INFINITY),
                    )?
                } else {
                    camera
                }
            }
            Projection::Perspective => {
                let camera = Camera::perspective(left, right, bottom, top, self.near.unwrap_or(Self::DEFAULT_NEAR))?;
                match self.far {
                    Some(far) => camera.with_far(far)?,
                    None => camera,
                }
            }
        };

        match self.view {
            Some(view) => camera.with_view(Vec3::from(view.eye), Vec3::from(view.target), Vec3::from(view.up)),
            None => Ok(camera),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::orthographic(-1.0, 1.0, -1.0, 1.0)
    }
}

/// File format of the rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Binary pixel map (`P6`)
    #[default]
    Ppm,
    /// ASCII pixel map (`P3`)
    PpmAscii,
    /// PNG image
    Png,
}

/// Where the finished frame goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file path
    pub path: PathBuf,
    /// Output file format
    pub format: OutputFormat,
}

impl OutputConfig {
    /// Write `framebuffer` to the configured path in the configured format
    pub fn write(&self, framebuffer: &FrameBuffer) -> Result<(), FrameBufferError> {
        match self.format {
            OutputFormat::Ppm => framebuffer.dump_ppm(&self.path),
            OutputFormat::PpmAscii => framebuffer.dump_ppm_as(&self.path, PpmFormat::Ascii),
            OutputFormat::Png => framebuffer.save_png(&self.path),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("render.ppm"),
            format: OutputFormat::Ppm,
        }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration for a render run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Log filter for `env_logger`, e.g. `info` or `raster_engine=debug`
    pub log_level: String,
    /// Render call switches
    pub render: RenderConfig,
    /// Raster target
    pub frame: FrameConfig,
    /// Viewing parameters
    pub camera: CameraConfig,
    /// Output destination
    pub output: OutputConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Plain level names are checked; module-scoped filters are left to env_logger
        if !self.log_level.contains('=') && log::LevelFilter::from_str(&self.log_level).is_err() {
            return Err(ConfigError::Invalid(format!("unknown log level `{}`", self.log_level)));
        }
        self.frame.validate()?;
        self.camera
            .to_camera()
            .map_err(|e| ConfigError::Invalid(format!("camera: {e}")))?;
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            render: RenderConfig::default(),
            frame: FrameConfig::default(),
            camera: CameraConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_valid() {
        ApplicationConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ApplicationConfig = toml::from_str(
            r#"
            log_level = "debug"

            [frame]
            width = 64
            height = 32

            [camera]
            projection = "perspective"
            window = [-1.0, 1.0, -0.5, 0.5]
            near = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.frame.width, 64);
        assert_eq!(config.frame.background, [0, 0, 0]);
        assert_eq!(config.output, OutputConfig::default());
        assert!(!config.render.debug);

        let camera = config.camera.to_camera().unwrap();
        assert_eq!(camera.projection(), Projection::Perspective);
        assert_relative_eq!(camera.near(), 0.5);
        assert!(camera.far().is_infinite());
        config.validate().unwrap();
    }

    #[test]
    fn test_output_format_names() {
        let output: OutputConfig = toml::from_str("path = \"out.ppm\"\nformat = \"ppm_ascii\"").unwrap();
        assert_eq!(output.format, OutputFormat::PpmAscii);
    }

    #[test]
    fn test_output_writes_each_pixel_map_format() {
        let mut frame = FrameConfig {
            width: 3,
            height: 2,
            background: [40, 50, 60],
        }
        .create_framebuffer()
        .unwrap();
        frame.clear();

        for (format, magic) in [(OutputFormat::Ppm, "P6"), (OutputFormat::PpmAscii, "P3")] {
            let path = std::env::temp_dir().join(format!("raster_engine_output_{}_{magic}.ppm", std::process::id()));
            let output = OutputConfig {
                path: path.clone(),
                format,
            };
            output.write(&frame).unwrap();

            let bytes = std::fs::read(&path).unwrap();
            assert!(bytes.starts_with(magic.as_bytes()));
            let reloaded = FrameBuffer::read_ppm(bytes.as_slice()).unwrap();
            assert_eq!(reloaded.as_bytes(), frame.as_bytes());
            std::fs::remove_file(&path).unwrap();
        }
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let mut config = ApplicationConfig::default();
        config.frame.width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ApplicationConfig::default();
        config.camera = CameraConfig::perspective(-1.0, 1.0, -1.0, 1.0, 0.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ApplicationConfig::default();
        config.log_level = "loud".to_owned();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_camera_config_conversion() {
        let ortho = CameraConfig {
            near: Some(-5.0),
            far: Some(5.0),
            ..CameraConfig::default()
        }
        .to_camera()
        .unwrap();
        assert_relative_eq!(ortho.near(), -5.0);
        assert_relative_eq!(ortho.far(), 5.0);

        let viewed = CameraConfig::perspective(-1.0, 1.0, -1.0, 1.0, 1.0)
            .with_far(50.0)
            .with_view([0.0, 0.0, 5.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0])
            .to_camera()
            .unwrap();
        assert!(viewed.view().is_some());
        assert_relative_eq!(viewed.far(), 50.0);

        let degenerate = CameraConfig::default().with_view([0.0; 3], [0.0; 3], [0.0, 1.0, 0.0]);
        assert!(matches!(degenerate.to_camera(), Err(CameraError::DegenerateView { .. })));
    }

    #[test]
    fn test_frame_config_builds_buffer() {
        let frame = FrameConfig {
            width: 3,
            height: 2,
            background: [10, 20, 30],
        };
        let buffer = frame.create_framebuffer().unwrap();
        assert_eq!(buffer.pixels(), &[Rgb8::new(10, 20, 30); 6]);
        assert_relative_eq!(frame.aspect(), 1.5);
    }
}
