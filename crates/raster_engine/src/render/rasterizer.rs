//! Scan conversion of screen-space primitives
//!
//! Lines use an all-octant integer Bresenham walk. Each emitted pixel gets
//! the endpoint colors blended by its step fraction along the major axis,
//! so both endpoints are drawn with exactly their own colors. Writes that
//! land outside the target are dropped by the target itself.

use crate::scene::Color;

use super::framebuffer::PixelTarget;

/// An integer pixel position with its color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelVertex {
    /// Column
    pub x: i32,
    /// Row, growing downward
    pub y: i32,
    /// Color at this vertex
    pub color: Color,
}

impl PixelVertex {
    /// Create a pixel vertex
    pub const fn new(x: i32, y: i32, color: Color) -> Self {
        Self { x, y, color }
    }
}

/// A primitive ready for scan conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreenPrimitive {
    /// Line between two pixel vertices, endpoints inclusive
    Line(PixelVertex, PixelVertex),
    /// Filled square of side `2 * radius + 1` centered on the vertex
    Point(PixelVertex, u32),
}

/// Draw a screen primitive, returning the number of pixels written
pub fn rasterize<T: PixelTarget + ?Sized>(primitive: &ScreenPrimitive, target: &mut T) -> usize {
    match *primitive {
        ScreenPrimitive::Line(a, b) => rasterize_line(a, b, target),
        ScreenPrimitive::Point(center, radius) => rasterize_point(center, radius, target),
    }
}

/// Bresenham line from `a` to `b` inclusive, blending colors along the way
pub fn rasterize_line<T: PixelTarget + ?Sized>(a: PixelVertex, b: PixelVertex, target: &mut T) -> usize {
    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let step_x = if a.x < b.x { 1 } else { -1 };
    let step_y = if a.y < b.y { 1 } else { -1 };
    let steps = dx.max(-dy);

    let (mut x, mut y) = (a.x, a.y);
    let mut error = dx + dy;
    let mut written = 0;

    for i in 0..=steps {
        let t = if steps == 0 { 0.0 } else { i as f32 / steps as f32 };
        if target.set_pixel(x, y, a.color.lerp(&b.color, t).to_rgb8()) {
            written += 1;
        }

        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            x += step_x;
        }
        if doubled <= dx {
            error += dx;
            y += step_y;
        }
    }

    written
}

/// Filled square point marker
pub fn rasterize_point<T: PixelTarget + ?Sized>(center: PixelVertex, radius: u32, target: &mut T) -> usize {
    let r = i32::try_from(radius).unwrap_or(i32::MAX);
    let color = center.color.to_rgb8();
    let mut written = 0;
    for y in center.y.saturating_sub(r)..=center.y.saturating_add(r) {
        for x in center.x.saturating_sub(r)..=center.x.saturating_add(r) {
            if target.set_pixel(x, y, color) {
                written += 1;
            }
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::framebuffer::FrameBuffer;
    use crate::scene::Rgb8;

    fn line(target: &mut FrameBuffer, from: (i32, i32), to: (i32, i32), colors: (Color, Color)) -> usize {
        rasterize_line(
            PixelVertex::new(from.0, from.1, colors.0),
            PixelVertex::new(to.0, to.1, colors.1),
            target,
        )
    }

    fn lit(target: &FrameBuffer) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..target.height() as i32 {
            for x in 0..target.width() as i32 {
                if target.pixel(x, y) != Some(Rgb8::BLACK) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_horizontal_line_blends_colors() {
        let mut target = FrameBuffer::new(16, 4).unwrap();
        let written = line(&mut target, (0, 1), (10, 1), (Color::RED, Color::BLUE));

        assert_eq!(written, 11);
        assert_eq!(target.pixel(0, 1), Some(Rgb8::new(255, 0, 0)));
        assert_eq!(target.pixel(5, 1), Some(Rgb8::new(128, 0, 128)));
        assert_eq!(target.pixel(10, 1), Some(Rgb8::new(0, 0, 255)));
        assert_eq!(target.pixel(11, 1), Some(Rgb8::BLACK));
    }

    #[test]
    fn test_single_pixel_line_uses_first_color() {
        let mut target = FrameBuffer::new(4, 4).unwrap();
        let written = line(&mut target, (2, 2), (2, 2), (Color::GREEN, Color::RED));
        assert_eq!(written, 1);
        assert_eq!(target.pixel(2, 2), Some(Rgb8::new(0, 255, 0)));
    }

    #[test]
    fn test_every_octant_is_connected_and_symmetric() {
        let ends: [(i32, i32); 8] = [(7, 2), (7, 5), (2, 7), (-3, 7), (-7, 1), (-7, -4), (-1, -7), (5, -7)];
        for (dx, dy) in ends {
            let mut forward = FrameBuffer::new(21, 21).unwrap();
            let mut backward = FrameBuffer::new(21, 21).unwrap();
            let (a, b) = ((10, 10), (10 + dx, 10 + dy));
            let steps = dx.abs().max(dy.abs()) as usize;

            assert_eq!(line(&mut forward, a, b, (Color::WHITE, Color::WHITE)), steps + 1);
            line(&mut backward, b, a, (Color::WHITE, Color::WHITE));

            let pixels = lit(&forward);
            assert!(pixels.contains(&a) && pixels.contains(&b));
            assert_eq!(pixels.len(), steps + 1);
            // 8-connected: every pixel has a lit neighbor
            for &(x, y) in &pixels {
                let neighbors = pixels
                    .iter()
                    .filter(|&&(nx, ny)| (nx, ny) != (x, y) && (nx - x).abs() <= 1 && (ny - y).abs() <= 1)
                    .count();
                assert!(neighbors >= 1, "isolated pixel at ({x}, {y}) for {dx},{dy}");
            }
            assert_eq!(lit(&backward).len(), pixels.len());
        }
    }

    #[test]
    fn test_off_target_pixels_are_dropped() {
        let mut target = FrameBuffer::new(5, 5).unwrap();
        let written = line(&mut target, (-5, 2), (9, 2), (Color::WHITE, Color::WHITE));
        assert_eq!(written, 5);
        assert_eq!(lit(&target).len(), 5);
    }

    #[test]
    fn test_point_square() {
        let mut target = FrameBuffer::new(8, 8).unwrap();
        let written = rasterize(&ScreenPrimitive::Point(PixelVertex::new(3, 3, Color::CYAN), 1), &mut target);
        assert_eq!(written, 9);
        assert_eq!(target.pixel(2, 4), Some(Rgb8::new(0, 255, 255)));
        assert_eq!(target.pixel(5, 3), Some(Rgb8::BLACK));

        // Clipped by the corner of the target
        let mut corner = FrameBuffer::new(8, 8).unwrap();
        assert_eq!(rasterize_point(PixelVertex::new(0, 0, Color::RED), 2, &mut corner), 9);

        let mut single = FrameBuffer::new(3, 3).unwrap();
        assert_eq!(rasterize_point(PixelVertex::new(1, 1, Color::RED), 0, &mut single), 1);
    }
}
