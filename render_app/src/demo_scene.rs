//! Demo scene shared by the render binaries
//!
//! World units, +Y up. The default camera sits at (0, 2, 8) looking at
//! the origin.

use raster_engine::core::ConfigError;
use raster_engine::prelude::*;

/// Eye position of the demo cameras
pub const EYE: [f32; 3] = [0.0, 2.0, 8.0];
/// Point the demo cameras look at
pub const TARGET: [f32; 3] = [0.0, 0.0, 0.0];
/// Up direction of the demo cameras
pub const UP: [f32; 3] = [0.0, 1.0, 0.0];

/// Configuration used when no file is given on the command line
pub fn default_config(output: &str) -> ApplicationConfig {
    let mut config = ApplicationConfig::default();
    config.frame = FrameConfig {
        width: 640,
        height: 480,
        background: [16, 16, 24],
    };
    config.camera = perspective_camera(config.frame.aspect());
    config.output.path = output.into();
    config
}

/// Widths of the left and right halves of a split frame
///
/// The right half takes the odd column. Both halves must be at least one
/// pixel wide.
pub fn split_widths(frame: &FrameConfig) -> Result<(u32, u32), ConfigError> {
    if frame.width < 2 {
        return Err(ConfigError::Invalid(format!(
            "a split view needs a frame at least 2 pixels wide, got {}",
            frame.width
        )));
    }
    let left = frame.width / 2;
    Ok((left, frame.width - left))
}

/// Perspective camera with a roughly 45° vertical field of view
pub fn perspective_camera(aspect: f32) -> CameraConfig {
    let half_height = 0.414;
    let half_width = half_height * aspect;
    CameraConfig::perspective(-half_width, half_width, -half_height, half_height, 0.5)
        .with_far(100.0)
        .with_view(EYE, TARGET, UP)
}

/// Orthographic camera framing the same region as [`perspective_camera`] at the origin
pub fn orthographic_camera(aspect: f32) -> CameraConfig {
    let half_height = 3.0;
    let half_width = half_height * aspect;
    CameraConfig::orthographic(-half_width, half_width, -half_height, half_height).with_view(EYE, TARGET, UP)
}

/// Build the demo scene: axes, a shared cube placed twice with a nested
/// satellite each, and a ring of point markers
pub fn build(camera: Camera) -> Scene {
    let mut scene = Scene::new("demo", camera);

    let axes = scene.add_model(axes_model());
    let satellite = scene.add_model(cube_model("satellite", 0.15));

    let orbit = Transform::from_translation(Vec3::new(0.9, 0.6, 0.0)).with_rotation_euler(0.0, 0.7, 0.3);
    let cube = scene.add_model(cube_model("cube", 0.5).with_child(Position::new("satellite", satellite).with_transform(&orbit)));
    let markers = scene.add_model(marker_ring(8, 3.0));

    scene.add_position(Position::new("axes", axes));
    scene.add_position(
        Position::new("left cube", cube)
            .with_transform(&Transform::from_translation(Vec3::new(-1.5, 0.0, 0.0)).with_rotation_euler(0.0, 0.4, 0.0)),
    );
    scene.add_position(
        Position::new("right cube", cube).with_transform(
            &Transform::from_translation(Vec3::new(1.5, 0.0, -0.5))
                .with_rotation_euler(0.3, -0.6, 0.0)
                .with_uniform_scale(0.8),
        ),
    );
    scene.add_position(Position::new("markers", markers).with_translation(Vec3::new(0.0, -1.0, 0.0)));
    scene
}

fn axes_model() -> Model {
    let mut model = Model::new("axes");
    let origin = model.add_vertex(Vertex::new(0.0, 0.0, 0.0));
    let white = model.add_color(Color::WHITE);
    for (direction, color) in [
        (Vertex::new(1.0, 0.0, 0.0), Color::RED),
        (Vertex::new(0.0, 1.0, 0.0), Color::GREEN),
        (Vertex::new(0.0, 0.0, 1.0), Color::BLUE),
    ] {
        let tip = model.add_vertex(direction);
        let tint = model.add_color(color);
        model.add_line_segment(origin, tip, white, tint);
    }
    model
}

/// Wireframe cube centered on the origin, each corner colored by its octant
fn cube_model(name: &str, half: f32) -> Model {
    let mut model = Model::new(name);
    for corner in 0..8_u8 {
        let bit = |shift: u8| (corner >> shift) & 1 == 1;
        let sign = |on: bool| if on { half } else { -half };
        model.add_vertex(Vertex::new(sign(bit(0)), sign(bit(1)), sign(bit(2))));
        let channel = |on: bool| if on { 1.0 } else { 0.25 };
        model.add_color(Color::new(channel(bit(0)), channel(bit(1)), channel(bit(2))));
    }
    // Corners differing in exactly one bit share an edge
    for a in 0..8_usize {
        for shift in 0..3 {
            let b = a | (1 << shift);
            if b != a {
                model.add_line_segment(a, b, a, b);
            }
        }
    }
    model
}

fn marker_ring(count: usize, radius: f32) -> Model {
    let mut model = Model::new("markers");
    let color = model.add_color(Color::YELLOW);
    for i in 0..count {
        let angle = i as f32 / count as f32 * std::f32::consts::TAU;
        let vertex = model.add_vertex(Vertex::new(radius * angle.cos(), 0.0, radius * angle.sin()));
        model.add_point(vertex, color, 1);
    }
    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster_engine::scene::validate_scene;

    #[test]
    fn test_demo_scene_is_clean() {
        let camera = default_config("demo.ppm").camera.to_camera().unwrap();
        let scene = build(camera);
        assert!(validate_scene(&scene).unwrap().is_clean());
        assert_eq!(scene.positions().len(), 4);
    }

    #[test]
    fn test_split_widths_need_two_columns() {
        let frame = |width| FrameConfig {
            width,
            ..FrameConfig::default()
        };
        assert_eq!(split_widths(&frame(640)).unwrap(), (320, 320));
        assert_eq!(split_widths(&frame(5)).unwrap(), (2, 3));
        assert_eq!(split_widths(&frame(2)).unwrap(), (1, 1));
        assert!(matches!(split_widths(&frame(1)), Err(ConfigError::Invalid(_))));

        let (left, right) = split_widths(&frame(3)).unwrap();
        let mut target = frame(3).create_framebuffer().unwrap();
        assert!(target.viewport(0, 0, left, 4).is_ok());
        assert!(target.viewport(left, 0, right, 4).is_ok());
    }

    #[test]
    fn test_cube_has_twelve_edges() {
        let cube = cube_model("cube", 1.0);
        assert_eq!(cube.vertices().len(), 8);
        assert_eq!(cube.primitives().len(), 12);
    }

    #[test]
    fn test_demo_renders_through_both_cameras() {
        let config = default_config("demo.ppm");
        for camera in [config.camera, orthographic_camera(config.frame.aspect())] {
            let scene = build(camera.to_camera().unwrap());
            let mut frame = FrameBuffer::new(160, 120).unwrap();
            let stats = Pipeline::default().render(&scene, &mut frame).unwrap();
            assert_eq!(stats.positions_rendered, 6);
            assert_eq!(stats.primitives_skipped, 0);
            assert!(stats.pixels_written > 0);
        }
    }
}
