//! # Pipeline Orchestrator
//!
//! Runs the fixed stage sequence over a [`Scene`]:
//!
//! ```text
//! positions (list order, depth first)
//!   -> camera space      coordinates::model_to_camera
//!   -> depth clip        clipping::clip_segment_depth
//!   -> projection        projection::project
//!   -> window clip       clipping::clip_segment_window
//!   -> viewport mapping  viewport_transform::ndc_to_pixel
//!   -> scan conversion   rasterizer::rasterize
//! ```
//!
//! The scene is only borrowed; every stage works on copies. Output depends
//! on nothing but the scene, the configuration and the target size, so
//! rendering twice into equal fresh targets gives identical pixels.

use std::fmt;

use crate::core::config::RenderConfig;
use crate::foundation::math::{Mat4, Vec3};
use crate::scene::validation::{check_primitive, resolve};
use crate::scene::{validate_visible, Camera, Color, Model, Position, Primitive, Scene, Vertex};

use super::clipping::{self, CameraVertex};
use super::coordinates;
use super::framebuffer::PixelTarget;
use super::projection;
use super::rasterizer::{self, PixelVertex, ScreenPrimitive};
use super::viewport_transform;
use super::RenderError;

/// Counters collected over one render call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Positions whose model was drawn, nested ones included
    pub positions_rendered: usize,
    /// Primitives that entered the pipeline
    pub primitives_submitted: usize,
    /// Primitives that reached scan conversion
    pub primitives_rasterized: usize,
    /// Primitives removed entirely by clipping
    pub primitives_culled: usize,
    /// Primitives skipped for out-of-range indices
    pub primitives_skipped: usize,
    /// Pixel writes that landed inside the target
    pub pixels_written: usize,
}

impl fmt::Display for RenderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} positions, {} primitives ({} rasterized, {} culled, {} skipped), {} pixels",
            self.positions_rendered,
            self.primitives_submitted,
            self.primitives_rasterized,
            self.primitives_culled,
            self.primitives_skipped,
            self.pixels_written
        )
    }
}

/// The software rendering pipeline
///
/// Holds only configuration; one pipeline can render any number of scenes
/// into any number of targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    config: RenderConfig,
}

impl Pipeline {
    /// Create a pipeline with the given switches
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render `scene` into `target`
    ///
    /// The target is drawn over, not cleared. The camera is re-validated and
    /// the visible part of the scene is checked before any pixel is written: a
    /// dangling model key or cyclic nesting aborts the render, as does any
    /// index error when [`RenderConfig::strict_indices`] is set. Otherwise
    /// primitives with bad indices are skipped and reported. Hidden subtrees
    /// are never drawn and are not checked.
    pub fn render<T: PixelTarget + ?Sized>(&self, scene: &Scene, target: &mut T) -> Result<RenderStats, RenderError> {
        let camera = scene.camera();
        camera.validate()?;

        let report = validate_visible(scene)?;
        report.log_warnings();
        if self.config.strict_indices {
            if let Some(issue) = report.index_errors().next() {
                return Err(RenderError::InvalidIndices(issue.clone()));
            }
        }

        let mut pass = RenderPass {
            scene,
            camera,
            view: camera.view_matrix(),
            target,
            debug: self.config.debug || scene.debug(),
            stats: RenderStats::default(),
        };
        for position in scene.positions() {
            pass.visit(position, &Mat4::identity())?;
        }

        log::info!(
            "Rendered scene `{}` into {}x{}: {}",
            scene.name(),
            pass.target.width(),
            pass.target.height(),
            pass.stats
        );
        Ok(pass.stats)
    }
}

/// Mutable state of a single render call
struct RenderPass<'a, T: ?Sized> {
    scene: &'a Scene,
    camera: &'a Camera,
    view: Mat4,
    target: &'a mut T,
    debug: bool,
    stats: RenderStats,
}

impl<T: PixelTarget + ?Sized> RenderPass<'_, T> {
    /// Draw one position, then its model's children with the accumulated world placement
    fn visit(&mut self, position: &Position, parent: &Mat4) -> Result<(), RenderError> {
        if !position.is_visible() {
            log::trace!("Skipping invisible position `{}`", position.name());
            return Ok(());
        }
        let model = resolve(self.scene, position)?;
        if !model.is_visible() {
            log::trace!("Skipping invisible model `{}`", model.name());
            return Ok(());
        }

        // Validation has already rejected cycles, so this recursion terminates
        let placement = parent * position.matrix();
        let to_camera = coordinates::model_to_camera(&self.view, &placement);
        self.stats.positions_rendered += 1;
        self.draw_model(position, model, &to_camera);

        for child in model.children() {
            self.visit(child, &placement)?;
        }
        Ok(())
    }

    fn draw_model(&mut self, position: &Position, model: &Model, to_camera: &Mat4) {
        let vertices = coordinates::transform_vertices(model, to_camera);
        if self.debug {
            log::debug!(
                "Position `{}` / model `{}`: {} camera-space vertices",
                position.name(),
                model.name(),
                vertices.len()
            );
        }

        for (number, primitive) in model.primitives().iter().enumerate() {
            self.stats.primitives_submitted += 1;
            if let Err(issue) = check_primitive(model, number, primitive) {
                log::warn!("Skipping primitive at position `{}`: {issue}", position.name());
                self.stats.primitives_skipped += 1;
                continue;
            }

            match self.prepare(primitive, &vertices, model.colors()) {
                Some(screen) => {
                    if self.debug {
                        log::debug!("  primitive {number}: rasterizing {screen:?}");
                    }
                    self.stats.pixels_written += rasterizer::rasterize(&screen, &mut *self.target);
                    self.stats.primitives_rasterized += 1;
                }
                None => {
                    if self.debug {
                        log::debug!("  primitive {number}: culled");
                    }
                    self.stats.primitives_culled += 1;
                }
            }
        }
    }

    /// Clip, project and map one camera-space primitive; `None` when nothing is visible
    fn prepare(&self, primitive: &Primitive, vertices: &[Vertex], colors: &[Color]) -> Option<ScreenPrimitive> {
        let corner = |vertex: usize, color: usize| CameraVertex {
            position: Vec3::new(vertices[vertex].x, vertices[vertex].y, vertices[vertex].z),
            color: colors[color],
        };
        let (width, height) = (self.target.width(), self.target.height());

        match *primitive {
            Primitive::LineSegment {
                vertices: [v0, v1],
                colors: [c0, c1],
            } => {
                let (a, b) = (corner(v0, c0), corner(v1, c1));
                if self.debug {
                    log::debug!("    camera space {:?} -> {:?}", a.position, b.position);
                }

                let (a, b) = clipping::clip_segment_depth(a, b, self.camera)?;
                let (a, b) = (projection::project(&a, self.camera), projection::project(&b, self.camera));
                if self.debug {
                    log::debug!("    projected {:?} -> {:?}", a.position, b.position);
                }

                let (a, b) = clipping::clip_segment_window(a, b)?;
                let (x0, y0) = viewport_transform::ndc_to_pixel(&a.position, width, height);
                let (x1, y1) = viewport_transform::ndc_to_pixel(&b.position, width, height);
                Some(ScreenPrimitive::Line(
                    PixelVertex::new(x0, y0, a.color),
                    PixelVertex::new(x1, y1, b.color),
                ))
            }
            Primitive::Point {
                vertex: [v],
                color: [c],
                radius,
            } => {
                let point = corner(v, c);
                if !clipping::point_in_depth(point.position.z, self.camera) {
                    return None;
                }
                let image = projection::project(&point, self.camera);
                if !clipping::point_in_window(&image.position) {
                    return None;
                }
                let (x, y) = viewport_transform::ndc_to_pixel(&image.position, width, height);
                Some(ScreenPrimitive::Point(PixelVertex::new(x, y, image.color), radius))
            }
        }
    }
}
