//! # Frame Buffer
//!
//! The raster target: a row-major RGB pixel buffer plus bounds-checked
//! rectangular [`Viewport`]s that alias regions of it.
//!
//! A viewport is an explicit offset + extent view holding a mutable borrow
//! of its parent buffer. Writes through it land in the parent's storage;
//! the borrow checker guarantees the parent is not touched through any
//! other path while the viewport is alive.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use thiserror::Error;

use super::ppm::{self, PpmFormat};
use crate::scene::Rgb8;

/// Frame buffer and viewport errors
#[derive(Error, Debug)]
pub enum FrameBufferError {
    /// Width or height is zero
    #[error("frame buffer dimensions must be non-zero (got {width}x{height})")]
    EmptyDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Viewport rectangle does not lie within its parent
    #[error("viewport {width}x{height} at ({x}, {y}) does not fit in parent {parent_width}x{parent_height}")]
    ViewportOutOfBounds {
        /// Requested left column, relative to the parent
        x: u32,
        /// Requested top row, relative to the parent
        y: u32,
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Parent width
        parent_width: u32,
        /// Parent height
        parent_height: u32,
    },

    /// Malformed pixel map data
    #[error("malformed pixel map: {0}")]
    InvalidPixelMap(String),

    /// Pixel map max channel value this reader cannot represent
    #[error("unsupported pixel map max value {0} (expected 1..=255)")]
    UnsupportedMaxValue(u32),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Anything the rasterizer can write pixels into
///
/// Coordinates are signed so the rasterizer can hand over positions that
/// rounding pushed just outside the target; those writes are dropped.
pub trait PixelTarget {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Write one pixel; returns `false` (and writes nothing) when out of bounds
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb8) -> bool;

    /// Read one pixel, `None` when out of bounds
    fn pixel(&self, x: i32, y: i32) -> Option<Rgb8>;
}

fn local_index(x: i32, y: i32, width: u32, height: u32) -> Option<(u32, u32)> {
    let x = u32::try_from(x).ok()?;
    let y = u32::try_from(y).ok()?;
    (x < width && y < height).then_some((x, y))
}

/// Owned RGB raster, row 0 at the top
///
/// Resizing is unsupported; construct a new buffer instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb8>,
    background: Rgb8,
}

impl FrameBuffer {
    /// Create a buffer filled with black
    pub fn new(width: u32, height: u32) -> Result<Self, FrameBufferError> {
        Self::with_background(width, height, Rgb8::BLACK)
    }

    /// Create a buffer filled with `background`
    pub fn with_background(width: u32, height: u32, background: Rgb8) -> Result<Self, FrameBufferError> {
        if width == 0 || height == 0 {
            return Err(FrameBufferError::EmptyDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![background; width as usize * height as usize],
            background,
        })
    }

    /// Wrap existing row-major pixels
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb8>) -> Result<Self, FrameBufferError> {
        if width == 0 || height == 0 {
            return Err(FrameBufferError::EmptyDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(FrameBufferError::InvalidPixelMap(format!(
                "expected {expected} pixels for {width}x{height}, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
            background: Rgb8::BLACK,
        })
    }

    /// Background color used by [`clear`](Self::clear)
    pub fn background(&self) -> Rgb8 {
        self.background
    }

    /// Change the background color (takes effect on the next clear)
    pub fn set_background(&mut self, background: Rgb8) {
        self.background = background;
    }

    /// Fill the whole buffer with the background color
    pub fn clear(&mut self) {
        self.fill(self.background);
    }

    /// Fill the whole buffer with `color`
    pub fn fill(&mut self, color: Rgb8) {
        self.pixels.fill(color);
    }

    /// Row-major pixels, top row first
    pub fn pixels(&self) -> &[Rgb8] {
        &self.pixels
    }

    /// Row-major pixels as raw `r, g, b` bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Borrow the rectangle `width × height` at (`x`, `y`) as a viewport
    pub fn viewport(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<Viewport<'_>, FrameBufferError> {
        check_rect(x, y, width, height, self.width, self.height)?;
        let background = self.background;
        Ok(Viewport {
            buffer: self,
            x,
            y,
            width,
            height,
            background,
        })
    }

    /// Write as a pixel map
    pub fn write_ppm<W: Write>(&self, writer: W, format: PpmFormat) -> Result<(), FrameBufferError> {
        ppm::write(writer, self.width, self.height, self.pixels.iter().copied(), format)
    }

    /// Dump to a binary pixel map file
    pub fn dump_ppm(&self, path: impl AsRef<Path>) -> Result<(), FrameBufferError> {
        self.dump_ppm_as(path, PpmFormat::Binary)
    }

    /// Dump to a pixel map file in the given encoding
    pub fn dump_ppm_as(&self, path: impl AsRef<Path>, format: PpmFormat) -> Result<(), FrameBufferError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_ppm(&mut writer, format)?;
        writer.flush()?;
        log::debug!("Wrote {}x{} pixel map to {}", self.width, self.height, path.display());
        Ok(())
    }

    /// Read a pixel map (binary or ASCII)
    pub fn read_ppm<R: Read>(reader: R) -> Result<Self, FrameBufferError> {
        let (width, height, pixels) = ppm::read(reader)?;
        Self::from_pixels(width, height, pixels)
    }

    /// Copy into an `image` buffer
    pub fn to_rgb_image(&self) -> image::RgbImage {
        // Dimensions always match the byte count
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let pixel = self.pixels[(y * self.width + x) as usize];
            image::Rgb([pixel.r, pixel.g, pixel.b])
        })
    }

    /// Save as PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), FrameBufferError> {
        let path = path.as_ref();
        self.to_rgb_image()
            .save_with_format(path, image::ImageFormat::Png)?;
        log::debug!("Wrote {}x{} PNG to {}", self.width, self.height, path.display());
        Ok(())
    }
}

impl PixelTarget for FrameBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb8) -> bool {
        match local_index(x, y, self.width, self.height) {
            Some((x, y)) => {
                self.pixels[(y * self.width + x) as usize] = color;
                true
            }
            None => false,
        }
    }

    fn pixel(&self, x: i32, y: i32) -> Option<Rgb8> {
        local_index(x, y, self.width, self.height).map(|(x, y)| self.pixels[(y * self.width + x) as usize])
    }
}

fn check_rect(
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    parent_width: u32,
    parent_height: u32,
) -> Result<(), FrameBufferError> {
    let fits = width > 0
        && height > 0
        && x.checked_add(width).is_some_and(|right| right <= parent_width)
        && y.checked_add(height).is_some_and(|bottom| bottom <= parent_height);
    if fits {
        Ok(())
    } else {
        Err(FrameBufferError::ViewportOutOfBounds {
            x,
            y,
            width,
            height,
            parent_width,
            parent_height,
        })
    }
}

/// A rectangular window onto a [`FrameBuffer`]
///
/// Local coordinate (0, 0) is the viewport's top-left corner. Writes are
/// bounds-checked against the viewport, not the parent, so a viewport can
/// never spill into neighbouring regions.
#[derive(Debug)]
pub struct Viewport<'a> {
    buffer: &'a mut FrameBuffer,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    background: Rgb8,
}

impl Viewport<'_> {
    /// Top-left corner in the root buffer's coordinates
    pub fn offset(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    /// Borrow a rectangle of this viewport, given in local coordinates
    pub fn sub_viewport(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<Viewport<'_>, FrameBufferError> {
        check_rect(x, y, width, height, self.width, self.height)?;
        Ok(Viewport {
            buffer: &mut *self.buffer,
            x: self.x + x,
            y: self.y + y,
            width,
            height,
            background: self.background,
        })
    }

    /// Background color used by [`clear`](Self::clear)
    pub fn background(&self) -> Rgb8 {
        self.background
    }

    /// Change this viewport's background color
    pub fn set_background(&mut self, background: Rgb8) {
        self.background = background;
    }

    /// Fill the viewport with its background color
    pub fn clear(&mut self) {
        self.fill(self.background);
    }

    /// Fill the viewport with `color`, leaving the rest of the parent untouched
    pub fn fill(&mut self, color: Rgb8) {
        let row_width = self.buffer.width as usize;
        for row in self.y..self.y + self.height {
            let start = row as usize * row_width + self.x as usize;
            self.buffer.pixels[start..start + self.width as usize].fill(color);
        }
    }

    fn rows(&self) -> impl Iterator<Item = &[Rgb8]> + '_ {
        let row_width = self.buffer.width as usize;
        (self.y..self.y + self.height).map(move |row| {
            let start = row as usize * row_width + self.x as usize;
            &self.buffer.pixels[start..start + self.width as usize]
        })
    }

    /// Copy the viewport's pixels into a new, independent buffer
    pub fn to_framebuffer(&self) -> FrameBuffer {
        FrameBuffer {
            width: self.width,
            height: self.height,
            pixels: self.rows().flatten().copied().collect(),
            background: self.background,
        }
    }
}

impl PixelTarget for Viewport<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb8) -> bool {
        match local_index(x, y, self.width, self.height) {
            Some((x, y)) => self
                .buffer
                .set_pixel((self.x + x) as i32, (self.y + y) as i32, color),
            None => false,
        }
    }

    fn pixel(&self, x: i32, y: i32) -> Option<Rgb8> {
        let (x, y) = local_index(x, y, self.width, self.height)?;
        self.buffer.pixel((self.x + x) as i32, (self.y + y) as i32)
    }
}
