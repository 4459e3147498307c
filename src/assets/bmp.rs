use std::path::Path;

use crate::foundation::{
    core::Rgb8,
    error::{OverlayError, OverlayResult},
};

const SIGNATURE: [u8; 2] = *b"BM";
const FILE_HEADER_LEN: usize = 14;
const INFO_HEADER_MIN_LEN: u32 = 40;
const HEADER_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_MIN_LEN as usize;

const OFF_PIXEL_OFFSET: usize = 10;
const OFF_DIB_SIZE: usize = 14;
const OFF_WIDTH: usize = 18;
const OFF_HEIGHT: usize = 22;
const OFF_PLANES: usize = 26;
const OFF_BITS_PER_PIXEL: usize = 28;
const OFF_COMPRESSION: usize = 30;

const BITS_PER_PIXEL: u16 = 24;
const COMPRESSION_NONE: u32 = 0;

/// Decoded raster image: top-to-bottom, left-to-right RGB pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major pixels, `width * height` long.
    pub pixels: Vec<Rgb8>,
}

impl RasterImage {
    /// Wrap an existing pixel buffer, checking it holds exactly `width * height` pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgb8>) -> OverlayResult<Self> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(OverlayError::validation(format!(
                "raster buffer holds {} pixels, expected {width}x{height} = {expected}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Pixel at column `x`, row `y` (row 0 is the top).
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Flatten into tightly packed `r,g,b` bytes.
    pub fn to_rgb8_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for px in &self.pixels {
            out.extend_from_slice(&[px.r, px.g, px.b]);
        }
        out
    }
}

/// Read and decode an uncompressed 24-bit BMP file.
///
/// Failing to open or read the file is [`OverlayError::Io`]; anything wrong with its contents is
/// [`OverlayError::Format`].
#[tracing::instrument]
pub fn decode_bmp(path: &Path) -> OverlayResult<RasterImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| OverlayError::io(format!("read bmp '{}'", path.display()), e))?;
    let image = decode_bmp_bytes(&bytes)?;
    tracing::debug!(
        width = image.width,
        height = image.height,
        "decoded overlay image"
    );
    Ok(image)
}

/// Decode an uncompressed 24-bit BMP held in memory.
///
/// Rows are stored bottom-to-top unless the header height is negative, each row padded to a
/// 4-byte boundary, pixels in blue-green-red order. A header with zero width or height decodes
/// to an empty image without touching the pixel array.
pub fn decode_bmp_bytes(bytes: &[u8]) -> OverlayResult<RasterImage> {
    let layout = BmpLayout::parse(bytes)?;
    if layout.width == 0 || layout.height == 0 {
        return Ok(RasterImage {
            width: layout.width,
            height: layout.height,
            pixels: Vec::new(),
        });
    }

    let width = layout.width as usize;
    let height = layout.height as usize;
    let mut pixels = vec![Rgb8::default(); pixel_count(layout.width, layout.height)?];

    for row in 0..height {
        let start = layout.pixel_offset + row * layout.row_stride;
        let src = bytes
            .get(start..start + layout.row_stride)
            .ok_or_else(|| OverlayError::format(format!("pixel row {row} is truncated")))?;

        let dst_row = if layout.top_down {
            row
        } else {
            height - 1 - row
        };
        let dst = &mut pixels[dst_row * width..(dst_row + 1) * width];
        for (px, bgr) in dst.iter_mut().zip(src.chunks_exact(3)) {
            *px = Rgb8::from_bgr([bgr[0], bgr[1], bgr[2]]);
        }
    }

    Ok(RasterImage {
        width: layout.width,
        height: layout.height,
        pixels,
    })
}

/// Bytes occupied by one stored row of `width` 24-bit pixels, including padding.
pub fn padded_row_len(width: u32) -> Option<usize> {
    let raw = (width as usize).checked_mul(3)?.checked_add(3)?;
    Some(raw & !3)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BmpLayout {
    pixel_offset: usize,
    width: u32,
    height: u32,
    top_down: bool,
    row_stride: usize,
}

impl BmpLayout {
    fn parse(bytes: &[u8]) -> OverlayResult<Self> {
        if bytes.len() < SIGNATURE.len() || bytes[..SIGNATURE.len()] != SIGNATURE {
            return Err(OverlayError::format("missing 'BM' signature"));
        }
        if bytes.len() < HEADER_LEN {
            return Err(OverlayError::format(format!(
                "truncated header: {} bytes, need at least {HEADER_LEN}",
                bytes.len()
            )));
        }

        let dib_size = le_u32(bytes, OFF_DIB_SIZE);
        if dib_size < INFO_HEADER_MIN_LEN {
            return Err(OverlayError::format(format!(
                "unsupported info header of {dib_size} bytes"
            )));
        }
        let headers_end = FILE_HEADER_LEN
            .checked_add(dib_size as usize)
            .filter(|end| *end <= bytes.len())
            .ok_or_else(|| OverlayError::format("info header extends past end of file"))?;

        let planes = le_u16(bytes, OFF_PLANES);
        if planes != 1 {
            return Err(OverlayError::format(format!(
                "expected 1 color plane, got {planes}"
            )));
        }
        let bpp = le_u16(bytes, OFF_BITS_PER_PIXEL);
        if bpp != BITS_PER_PIXEL {
            return Err(OverlayError::format(format!(
                "unsupported bit depth {bpp}; only 24-bit images are supported"
            )));
        }
        let compression = le_u32(bytes, OFF_COMPRESSION);
        if compression != COMPRESSION_NONE {
            return Err(OverlayError::format(format!(
                "unsupported compression method {compression}"
            )));
        }

        let width = le_i32(bytes, OFF_WIDTH);
        if width < 0 {
            return Err(OverlayError::format(format!("negative width {width}")));
        }
        let raw_height = le_i32(bytes, OFF_HEIGHT);
        let width = width.unsigned_abs();
        let height = raw_height.unsigned_abs();

        let pixel_offset = le_u32(bytes, OFF_PIXEL_OFFSET) as usize;
        if pixel_offset < headers_end {
            return Err(OverlayError::format(format!(
                "pixel array offset {pixel_offset} overlaps the {headers_end}-byte header"
            )));
        }

        let row_stride = padded_row_len(width)
            .ok_or_else(|| OverlayError::format(format!("width {width} overflows row size")))?;
        let pixel_end = row_stride
            .checked_mul(height as usize)
            .and_then(|len| len.checked_add(pixel_offset))
            .ok_or_else(|| {
                OverlayError::format(format!("dimensions {width}x{height} overflow file size"))
            })?;
        if pixel_end > bytes.len() {
            return Err(OverlayError::format(format!(
                "pixel array needs {pixel_end} bytes but file has {}",
                bytes.len()
            )));
        }

        Ok(Self {
            pixel_offset,
            width,
            height,
            top_down: raw_height < 0,
            row_stride,
        })
    }
}

fn pixel_count(width: u32, height: u32) -> OverlayResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| OverlayError::format(format!("{width}x{height} pixel count overflows")))
}

fn le_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from(bytes[at]) | (u16::from(bytes[at + 1]) << 8)
}

fn le_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from(bytes[at])
        | (u32::from(bytes[at + 1]) << 8)
        | (u32::from(bytes[at + 2]) << 16)
        | (u32::from(bytes[at + 3]) << 24)
}

fn le_i32(bytes: &[u8], at: usize) -> i32 {
    le_u32(bytes, at) as i32
}

#[cfg(test)]
#[path = "../../tests/unit/assets/bmp.rs"]
mod tests;
