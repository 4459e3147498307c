//! Overlay a still image onto every frame of a raw YUV 4:2:0 planar video stream.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: an uncompressed 24-bit BMP becomes a top-to-bottom [`RasterImage`].
//! 2. **Convert**: the RGB pixels are mapped to luma/chroma on a fixed worker pool and reduced to
//!    a planar 4:2:0 [`YuvImage`]. This happens once per run.
//! 3. **Stream**: each frame is read from the input, the overlay is copied over its top-left
//!    corner ([`composite`]), and the frame is written to the output, until the input ends.
//!
//! The crate forbids `unsafe`. Planes are passed around as disjoint slices; the only threads are
//! the conversion workers, which are joined before conversion returns.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod color;
mod compose;
mod foundation;
mod video;

/// Run configuration and its file formats.
pub mod config;
/// Chunked data-parallel map on a fixed worker pool.
pub mod parallel;
/// The frame-by-frame overlay loop.
pub mod pipeline;

pub use assets::bmp::{RasterImage, decode_bmp, decode_bmp_bytes, padded_row_len};
pub use color::convert::{ConvertOpts, YuvImage, convert, convert_with_pool, rgb_to_yuv};
pub use compose::overlay::{composite, ensure_overlay_fits};
pub use config::Config;
pub use foundation::core::{FrameSize, Rgb8, Yuv8};
pub use foundation::error::{OverlayError, OverlayResult};
pub use parallel::{ChunkPool, available_workers, chunk_ranges};
pub use pipeline::{PipelineStats, run, run_with_config};
pub use video::frame::{FrameBuffer, FrameView};
pub use video::stream::{FrameReader, FrameWriter, StreamState};
