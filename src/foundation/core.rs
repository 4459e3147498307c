use crate::foundation::error::{OverlayError, OverlayResult};

/// Fixed dimensions of every frame in a raw 4:2:0 planar stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameSize {
    /// Luma width in pixels.
    pub width: u32,
    /// Luma height in pixels.
    pub height: u32,
}

impl FrameSize {
    /// Create a validated frame size; both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> OverlayResult<Self> {
        if width == 0 || height == 0 {
            return Err(OverlayError::validation(format!(
                "frame dimensions must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Chroma plane width (floor of half the luma width).
    pub fn chroma_width(self) -> u32 {
        self.width / 2
    }

    /// Chroma plane height (floor of half the luma height).
    pub fn chroma_height(self) -> u32 {
        self.height / 2
    }

    /// Byte length of the luma plane.
    pub fn luma_len(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Byte length of one chroma plane.
    pub fn chroma_len(self) -> usize {
        self.chroma_width() as usize * self.chroma_height() as usize
    }

    /// Byte length of one complete frame (Y, then U, then V).
    pub fn frame_len(self) -> usize {
        self.luma_len() + 2 * self.chroma_len()
    }

    /// Return `true` when a `width`x`height` region anchored at the origin fits.
    pub fn contains(self, width: u32, height: u32) -> bool {
        width <= self.width && height <= self.height
    }
}

/// 8-bit RGB pixel, no alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Build a pixel from red, green and blue.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a pixel from bytes stored in blue-green-red order.
    pub const fn from_bgr(bgr: [u8; 3]) -> Self {
        Self {
            r: bgr[2],
            g: bgr[1],
            b: bgr[0],
        }
    }
}

/// One full-resolution luma/chroma sample triple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Yuv8 {
    /// Luma.
    pub y: u8,
    /// Blue-difference chroma, biased by 128.
    pub u: u8,
    /// Red-difference chroma, biased by 128.
    pub v: u8,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
