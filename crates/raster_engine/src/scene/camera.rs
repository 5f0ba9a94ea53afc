//! # Camera
//!
//! Viewing and projection parameters for the software pipeline.
//!
//! ## Coordinate System
//! Camera space is right-handed and Y-up with the eye at the origin:
//! - X+ = Right
//! - Y+ = Up
//! - Z+ = Towards the viewer, so visible geometry has z < 0
//!
//! ## View Volume
//! - **Orthographic**: the box `left ≤ x ≤ right`, `bottom ≤ y ≤ top`,
//!   unbounded in depth unless a depth range is set.
//! - **Perspective**: the pyramid whose cross-section on the image plane
//!   z = −1 is the `left/right/bottom/top` window, cut by the near plane
//!   z = −near and (optionally) the far plane z = −far.
//!
//! Both kinds normalize the window to `[−1, 1]²`, so everything after the
//! projection stage is projection-agnostic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Projection kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    /// Parallel projection along −Z
    Orthographic,
    /// Central projection through the eye onto the plane z = −1
    Perspective,
}

/// Explicit camera placement in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOrientation {
    /// Eye position
    pub eye: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Approximate up direction
    pub up: Vec3,
}

/// Camera construction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    /// Perspective cameras need the near plane strictly in front of the eye
    #[error("perspective near plane must be > 0 (got {0})")]
    NonPositiveNear(f32),

    /// Window must satisfy left < right
    #[error("view window requires left < right (got left={left}, right={right})")]
    InvertedHorizontal {
        /// Left bound
        left: f32,
        /// Right bound
        right: f32,
    },

    /// Window must satisfy bottom < top
    #[error("view window requires bottom < top (got bottom={bottom}, top={top})")]
    InvertedVertical {
        /// Bottom bound
        bottom: f32,
        /// Top bound
        top: f32,
    },

    /// Depth range must satisfy near < far
    #[error("depth range requires near < far (got near={near}, far={far})")]
    InvalidDepthRange {
        /// Near distance
        near: f32,
        /// Far distance
        far: f32,
    },

    /// A bound is NaN, or a window bound is infinite
    #[error("camera parameter `{0}` must be a finite number")]
    NonFinite(&'static str),

    /// Field of view or aspect ratio outside its usable range
    #[error("invalid field of view {fov_degrees}° or aspect ratio {aspect}")]
    InvalidFieldOfView {
        /// Vertical field of view in degrees
        fov_degrees: f32,
        /// Width / height
        aspect: f32,
    },

    /// Eye coincides with target, or up is parallel to the view direction
    #[error("view orientation is degenerate (eye={eye:?}, target={target:?}, up={up:?})")]
    DegenerateView {
        /// Eye position
        eye: Vec3,
        /// Target position
        target: Vec3,
        /// Up vector
        up: Vec3,
    },
}

/// Camera for orthographic and perspective projections
///
/// Fields are private so a constructed camera is always valid; every
/// constructor and modifier re-checks the invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    projection: Projection,
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
    view: Option<ViewOrientation>,
}

impl Camera {
    /// Create an orthographic camera viewing the window `[left, right] × [bottom, top]`
    ///
    /// The depth range is unbounded; see [`with_depth_range`](Self::with_depth_range).
    ///
    /// # Example
    /// ```rust
    /// use raster_engine::scene::Camera;
    ///
    /// let camera = Camera::orthographic(-1.0, 1.0, -1.0, 1.0).unwrap();
    /// assert!(Camera::orthographic(1.0, -1.0, -1.0, 1.0).is_err());
    /// ```
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32) -> Result<Self, CameraError> {
        Self {
            projection: Projection::Orthographic,
            left,
            right,
            bottom,
            top,
            near: f32::NEG_INFINITY,
            far: f32::INFINITY,
            view: None,
        }
        .validated()
    }

    /// Create a perspective camera
    ///
    /// # Arguments
    /// * `left`, `right`, `bottom`, `top` - Visible window on the image plane z = −1
    /// * `near` - Distance to the near clipping plane (must be > 0)
    ///
    /// The far plane starts at infinity; see [`with_far`](Self::with_far).
    pub fn perspective(left: f32, right: f32, bottom: f32, top: f32, near: f32) -> Result<Self, CameraError> {
        Self {
            projection: Projection::Perspective,
            left,
            right,
            bottom,
            top,
            near,
            far: f32::INFINITY,
            view: None,
        }
        .validated()
    }

    /// Create a symmetric perspective camera from a vertical field of view
    ///
    /// # Arguments
    /// * `fov_degrees` - Vertical field of view, strictly between 0 and 180
    /// * `aspect` - Window width / height (must be > 0)
    /// * `near` - Distance to the near clipping plane (must be > 0)
    pub fn perspective_fov(fov_degrees: f32, aspect: f32, near: f32) -> Result<Self, CameraError> {
        if !(fov_degrees > 0.0 && fov_degrees < 180.0 && aspect > 0.0 && aspect.is_finite()) {
            return Err(CameraError::InvalidFieldOfView { fov_degrees, aspect });
        }
        let top = (utils::deg_to_rad(fov_degrees) * 0.5).tan();
        let right = top * aspect;
        Self::perspective(-right, right, -top, top, near)
    }

    /// Set the far clipping distance, keeping the near distance
    pub fn with_far(self, far: f32) -> Result<Self, CameraError> {
        Self { far, ..self }.validated()
    }

    /// Set both clipping distances
    ///
    /// For orthographic cameras `near` may be zero or negative (geometry
    /// behind the eye stays visible); perspective cameras still need near > 0.
    pub fn with_depth_range(self, near: f32, far: f32) -> Result<Self, CameraError> {
        Self { near, far, ..self }.validated()
    }

    /// Place and orient the camera in world space
    pub fn with_view(self, eye: Vec3, target: Vec3, up: Vec3) -> Result<Self, CameraError> {
        if Mat4::look_at(eye, target, up).is_none() {
            return Err(CameraError::DegenerateView { eye, target, up });
        }
        Ok(Self {
            view: Some(ViewOrientation { eye, target, up }),
            ..self
        })
    }

    /// Check every construction invariant
    ///
    /// Constructors already enforce these; the pipeline re-checks before each render.
    pub fn validate(&self) -> Result<(), CameraError> {
        for (name, value) in [
            ("left", self.left),
            ("right", self.right),
            ("bottom", self.bottom),
            ("top", self.top),
        ] {
            if !value.is_finite() {
                return Err(CameraError::NonFinite(name));
            }
        }
        if self.near.is_nan() {
            return Err(CameraError::NonFinite("near"));
        }
        if self.far.is_nan() {
            return Err(CameraError::NonFinite("far"));
        }
        if self.left >= self.right {
            return Err(CameraError::InvertedHorizontal {
                left: self.left,
                right: self.right,
            });
        }
        if self.bottom >= self.top {
            return Err(CameraError::InvertedVertical {
                bottom: self.bottom,
                top: self.top,
            });
        }
        if self.projection == Projection::Perspective && !(self.near > 0.0 && self.near.is_finite()) {
            return Err(CameraError::NonPositiveNear(self.near));
        }
        if self.near >= self.far {
            return Err(CameraError::InvalidDepthRange {
                near: self.near,
                far: self.far,
            });
        }
        Ok(())
    }

    fn validated(self) -> Result<Self, CameraError> {
        self.validate()?;
        Ok(self)
    }

    /// Projection kind
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Window bounds as `(left, right, bottom, top)`
    pub fn window(&self) -> (f32, f32, f32, f32) {
        (self.left, self.right, self.bottom, self.top)
    }

    /// Near clipping distance (−∞ for an unbounded orthographic camera)
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far clipping distance (+∞ when unbounded)
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Explicit orientation, if any
    pub fn view(&self) -> Option<&ViewOrientation> {
        self.view.as_ref()
    }

    /// World-to-camera matrix
    ///
    /// Identity when no orientation is set: the camera then sits at the
    /// world origin looking down −Z and positions place models directly in
    /// camera space.
    pub fn view_matrix(&self) -> Mat4 {
        self.view
            .and_then(|view| Mat4::look_at(view.eye, view.target, view.up))
            .unwrap_or_else(Mat4::identity)
    }
}
