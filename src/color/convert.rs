use std::io::Write;

use crate::{
    assets::bmp::RasterImage,
    foundation::{
        core::{Rgb8, Yuv8},
        error::{OverlayError, OverlayResult},
    },
    parallel::ChunkPool,
};

/// Planar 4:2:0 image: full-resolution luma, chroma subsampled 2:1 in both axes.
///
/// Chroma sample `(bx, by)` covers luma rows `2*by..=2*by+1` and columns `2*bx..=2*bx+1`. Chroma
/// plane dimensions round up, so an odd last column or row still owns a (partial) block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YuvImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Luma plane, `width * height` bytes.
    pub y: Vec<u8>,
    /// Blue-difference plane, `ceil(width / 2) * ceil(height / 2)` bytes.
    pub u: Vec<u8>,
    /// Red-difference plane, `ceil(width / 2) * ceil(height / 2)` bytes.
    pub v: Vec<u8>,
}

impl YuvImage {
    /// Wrap existing planes, checking their lengths against the dimensions.
    pub fn new(width: u32, height: u32, y: Vec<u8>, u: Vec<u8>, v: Vec<u8>) -> OverlayResult<Self> {
        let img = Self {
            width,
            height,
            y,
            u,
            v,
        };
        let luma = width as usize * height as usize;
        let chroma = img.chroma_width() as usize * img.chroma_height() as usize;
        if img.y.len() != luma || img.u.len() != chroma || img.v.len() != chroma {
            return Err(OverlayError::validation(format!(
                "plane sizes {}/{}/{} do not match {width}x{height} 4:2:0",
                img.y.len(),
                img.u.len(),
                img.v.len()
            )));
        }
        Ok(img)
    }

    /// Single-color image.
    pub fn solid(width: u32, height: u32, color: Yuv8) -> Self {
        let luma = width as usize * height as usize;
        let chroma = width.div_ceil(2) as usize * height.div_ceil(2) as usize;
        Self {
            width,
            height,
            y: vec![color.y; luma],
            u: vec![color.u; chroma],
            v: vec![color.v; chroma],
        }
    }

    /// Reduce per-pixel samples to planes, keeping the top-left chroma of each 2x2 block.
    pub fn from_packed(width: u32, height: u32, packed: &[Yuv8]) -> OverlayResult<Self> {
        let w = width as usize;
        let h = height as usize;
        if packed.len() != w * h {
            return Err(OverlayError::validation(format!(
                "packed buffer holds {} samples, expected {width}x{height}",
                packed.len()
            )));
        }

        let (cw, ch) = (w.div_ceil(2), h.div_ceil(2));
        if cw == 0 || ch == 0 {
            return Ok(Self {
                width,
                height,
                y: Vec::new(),
                u: Vec::new(),
                v: Vec::new(),
            });
        }
        let mut u = Vec::with_capacity(cw * ch);
        let mut v = Vec::with_capacity(cw * ch);
        for by in 0..ch {
            let row = &packed[2 * by * w..];
            for bx in 0..cw {
                let s = row[2 * bx];
                u.push(s.u);
                v.push(s.v);
            }
        }

        Ok(Self {
            width,
            height,
            y: packed.iter().map(|s| s.y).collect(),
            u,
            v,
        })
    }

    /// Chroma plane width.
    pub fn chroma_width(&self) -> u32 {
        self.width.div_ceil(2)
    }

    /// Chroma plane height.
    pub fn chroma_height(&self) -> u32 {
        self.height.div_ceil(2)
    }

    /// Return `true` when the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Write the Y, U and V planes back to back, the layout of one raw I420 frame.
    pub fn write_planar<W: Write>(&self, out: &mut W) -> OverlayResult<()> {
        for (name, plane) in [("y", &self.y), ("u", &self.u), ("v", &self.v)] {
            out.write_all(plane)
                .map_err(|e| OverlayError::io(format!("write {name} plane"), e))?;
        }
        Ok(())
    }
}

/// Options for [`convert`].
#[derive(Clone, Debug, Default)]
pub struct ConvertOpts {
    /// Worker threads; `None` uses one per hardware execution unit.
    pub threads: Option<usize>,
}

/// Convert one RGB pixel with the full-range BT.601 matrix.
///
/// Each channel is rounded half away from zero, chroma is then biased by 128, and the result is
/// clamped to `0..=255`.
pub fn rgb_to_yuv(px: Rgb8) -> Yuv8 {
    let r = f64::from(px.r);
    let g = f64::from(px.g);
    let b = f64::from(px.b);

    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let u = -0.16874 * r - 0.33126 * g + 0.5 * b;
    let v = 0.5 * r - 0.41869 * g - 0.08131 * b;

    Yuv8 {
        y: clamp_u8(y.round()),
        u: clamp_u8(u.round() + 128.0),
        v: clamp_u8(v.round() + 128.0),
    }
}

fn clamp_u8(x: f64) -> u8 {
    x.clamp(0.0, 255.0) as u8
}

/// Convert a decoded raster image to planar 4:2:0 on a freshly built worker pool.
#[tracing::instrument(skip(image, opts), fields(width = image.width, height = image.height))]
pub fn convert(image: &RasterImage, opts: &ConvertOpts) -> OverlayResult<YuvImage> {
    let pool = ChunkPool::new(opts.threads)?;
    convert_with_pool(image, &pool)
}

/// Convert a decoded raster image to planar 4:2:0 on an existing worker pool.
///
/// Output does not depend on the pool's worker count.
pub fn convert_with_pool(image: &RasterImage, pool: &ChunkPool) -> OverlayResult<YuvImage> {
    let mut packed = vec![Yuv8::default(); image.pixels.len()];
    pool.map_into(&image.pixels, &mut packed, |px| rgb_to_yuv(*px))?;
    tracing::debug!(
        pixels = packed.len(),
        workers = pool.workers(),
        "converted overlay to yuv"
    );
    YuvImage::from_packed(image.width, image.height, &packed)
}

#[cfg(test)]
#[path = "../../tests/unit/color/convert.rs"]
mod tests;
