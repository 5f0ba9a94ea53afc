//! Normalized image plane to pixel grid

use crate::foundation::math::Vec2;

/// Map normalized `[−1, 1]²` coordinates onto a `width × height` pixel grid
///
/// x = −1 and x = 1 land on the first and last column; y = 1 lands on row 0
/// (rows grow downward). Results are rounded to the nearest pixel. Inputs
/// outside the unit square map outside the grid and are left to the
/// target's bounds check.
pub fn ndc_to_pixel(point: &Vec2, width: u32, height: u32) -> (i32, i32) {
    let span_x = width.saturating_sub(1) as f32;
    let span_y = height.saturating_sub(1) as f32;
    let x = (point.x + 1.0) * 0.5 * span_x;
    let y = (1.0 - point.y) * 0.5 * span_y;
    (x.round() as i32, y.round() as i32)
}

/// Pixel center back to normalized coordinates
///
/// Inverse of [`ndc_to_pixel`] up to rounding. A grid one pixel wide or
/// tall maps that axis to 0.
pub fn pixel_to_ndc(x: i32, y: i32, width: u32, height: u32) -> Vec2 {
    let axis = |value: i32, size: u32| {
        let span = size.saturating_sub(1) as f32;
        if span == 0.0 {
            0.0
        } else {
            value as f32 / span * 2.0 - 1.0
        }
    };
    Vec2::new(axis(x, width), -axis(y, height))
}
