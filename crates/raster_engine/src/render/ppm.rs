//! Portable pixel map (`P6` binary / `P3` ASCII) encoding
//!
//! Layout: magic, width, height, max channel value, then RGB triples in
//! row-major order starting at the top-left pixel. The writer always emits
//! max value 255; the reader accepts any max value up to 255 and rescales.

use std::io::{Read, Write};

use super::framebuffer::FrameBufferError;
use crate::scene::Rgb8;

/// Pixel map encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PpmFormat {
    /// `P6`: raw bytes after the header
    #[default]
    Binary,
    /// `P3`: decimal channel values, one pixel per line
    Ascii,
}

impl PpmFormat {
    fn magic(self) -> &'static str {
        match self {
            Self::Binary => "P6",
            Self::Ascii => "P3",
        }
    }
}

/// Encode `width × height` pixels
pub fn write<W: Write>(
    mut writer: W,
    width: u32,
    height: u32,
    pixels: impl Iterator<Item = Rgb8>,
    format: PpmFormat,
) -> Result<(), FrameBufferError> {
    write!(writer, "{}\n{} {}\n255\n", format.magic(), width, height)?;
    match format {
        PpmFormat::Binary => {
            for pixel in pixels {
                writer.write_all(&[pixel.r, pixel.g, pixel.b])?;
            }
        }
        PpmFormat::Ascii => {
            for pixel in pixels {
                writeln!(writer, "{} {} {}", pixel.r, pixel.g, pixel.b)?;
            }
        }
    }
    Ok(())
}

struct Cursor<'a> {
    data: &'a [u8],
    at: usize,
}

impl Cursor<'_> {
    /// Skip whitespace and `#` comments
    fn skip_separators(&mut self) {
        while let Some(&byte) = self.data.get(self.at) {
            if byte == b'#' {
                while self.data.get(self.at).is_some_and(|&b| b != b'\n') {
                    self.at += 1;
                }
            } else if byte.is_ascii_whitespace() {
                self.at += 1;
            } else {
                break;
            }
        }
    }

    fn token(&mut self) -> Option<&[u8]> {
        self.skip_separators();
        let start = self.at;
        while self
            .data
            .get(self.at)
            .is_some_and(|b| !b.is_ascii_whitespace() && *b != b'#')
        {
            self.at += 1;
        }
        (self.at > start).then(|| &self.data[start..self.at])
    }

    fn number(&mut self, what: &str) -> Result<u32, FrameBufferError> {
        let token = self
            .token()
            .ok_or_else(|| FrameBufferError::InvalidPixelMap(format!("missing {what}")))?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|text| text.parse().ok())
            .ok_or_else(|| {
                FrameBufferError::InvalidPixelMap(format!(
                    "{what} is not a number: {:?}",
                    String::from_utf8_lossy(token)
                ))
            })
    }
}

/// Decode a pixel map into `(width, height, pixels)`
pub fn read<R: Read>(mut reader: R) -> Result<(u32, u32, Vec<Rgb8>), FrameBufferError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    let mut cursor = Cursor { data: &data, at: 0 };

    let format = match cursor.token() {
        Some(b"P6") => PpmFormat::Binary,
        Some(b"P3") => PpmFormat::Ascii,
        other => {
            return Err(FrameBufferError::InvalidPixelMap(format!(
                "unknown magic {:?}",
                other.map(String::from_utf8_lossy)
            )))
        }
    };
    let width = cursor.number("width")?;
    let height = cursor.number("height")?;
    let max_value = cursor.number("max value")?;
    if max_value == 0 || max_value > 255 {
        return Err(FrameBufferError::UnsupportedMaxValue(max_value));
    }

    let channel_count = (width as usize)
        .checked_mul(height as usize)
        .and_then(|count| count.checked_mul(3))
        .ok_or_else(|| FrameBufferError::InvalidPixelMap(format!("dimensions {width}x{height} overflow")))?;
    let channels = match format {
        PpmFormat::Binary => {
            // Exactly one whitespace byte separates the header from the raster
            if !cursor.data.get(cursor.at).is_some_and(u8::is_ascii_whitespace) {
                return Err(FrameBufferError::InvalidPixelMap("missing raster separator".into()));
            }
            let start = cursor.at + 1;
            let raster = start
                .checked_add(channel_count)
                .and_then(|end| data.get(start..end))
                .ok_or_else(|| FrameBufferError::InvalidPixelMap(format!("expected {channel_count} raster bytes")))?;
            raster.iter().map(|&byte| u32::from(byte)).collect::<Vec<_>>()
        }
        PpmFormat::Ascii => (0..channel_count)
            .map(|_| cursor.number("channel value"))
            .collect::<Result<Vec<_>, _>>()?,
    };

    let scale = |value: u32| -> Result<u8, FrameBufferError> {
        if value > max_value {
            return Err(FrameBufferError::InvalidPixelMap(format!(
                "channel value {value} exceeds max value {max_value}"
            )));
        }
        Ok(((value * 255 + max_value / 2) / max_value) as u8)
    };
    let pixels = channels
        .chunks_exact(3)
        .map(|rgb| Ok(Rgb8::new(scale(rgb[0])?, scale(rgb[1])?, scale(rgb[2])?)))
        .collect::<Result<Vec<_>, FrameBufferError>>()?;
    Ok((width, height, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Rgb8> {
        vec![
            Rgb8::new(255, 0, 0),
            Rgb8::new(0, 255, 0),
            Rgb8::new(0, 0, 255),
            Rgb8::new(10, 20, 30),
            Rgb8::new(32, 10, 13),
            Rgb8::new(9, 9, 9),
        ]
    }

    fn encode(format: PpmFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        write(&mut bytes, 3, 2, sample().into_iter(), format).unwrap();
        bytes
    }

    #[test]
    fn test_binary_header_and_raster() {
        let bytes = encode(PpmFormat::Binary);
        assert!(bytes.starts_with(b"P6\n3 2\n255\n"));
        assert_eq!(bytes.len(), "P6\n3 2\n255\n".len() + 18);
        assert_eq!(&bytes[bytes.len() - 3..], &[9, 9, 9]);
    }

    #[test]
    fn test_both_encodings_decode_identically() {
        for format in [PpmFormat::Binary, PpmFormat::Ascii] {
            let (width, height, pixels) = read(encode(format).as_slice()).unwrap();
            assert_eq!((width, height), (3, 2));
            assert_eq!(pixels, sample(), "{format:?}");
        }
    }

    #[test]
    fn test_binary_raster_may_contain_whitespace_bytes() {
        // 32, 10, 13 and 9 are ASCII whitespace; they must be read as data
        let (_, _, pixels) = read(encode(PpmFormat::Binary).as_slice()).unwrap();
        assert_eq!(pixels[4], Rgb8::new(32, 10, 13));
    }

    #[test]
    fn test_header_comments_and_rescaling() {
        let text = b"P3\n# made by hand\n2 1 # size\n15\n15 0 0   0 15 7\n";
        let (width, height, pixels) = read(&text[..]).unwrap();
        assert_eq!((width, height), (2, 1));
        assert_eq!(pixels, vec![Rgb8::new(255, 0, 0), Rgb8::new(0, 255, 119)]);
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(matches!(read(&b"P5\n1 1\n255\n\0"[..]), Err(FrameBufferError::InvalidPixelMap(_))));
        assert!(matches!(read(&b"P6\n2 2\n255\n\0\0\0"[..]), Err(FrameBufferError::InvalidPixelMap(_))));
        assert!(matches!(read(&b"P6\n1 1\n65535\n"[..]), Err(FrameBufferError::UnsupportedMaxValue(65535))));
        assert!(matches!(read(&b"P3\n1 1\n255\n1 2 300\n"[..]), Err(FrameBufferError::InvalidPixelMap(_))));
        assert!(matches!(read(&b"P3\nwide 1\n255\n"[..]), Err(FrameBufferError::InvalidPixelMap(_))));
    }

    #[test]
    fn test_oversized_dimensions_are_rejected() {
        let headers: [&[u8]; 4] = [
            b"P6\n4294967295 4294967295\n255\n\0\0\0",
            b"P3\n4294967295 4294967295\n255\n0 0 0\n",
            b"P6\n100000 100000\n255\n\0\0\0",
            b"P3\n100000 100000\n255\n0 0 0\n",
        ];
        for header in headers {
            assert!(
                matches!(read(header), Err(FrameBufferError::InvalidPixelMap(_))),
                "{}",
                String::from_utf8_lossy(header)
            );
        }
    }
}
