//! Per-frame read, composite, write loop over a raw 4:2:0 planar stream.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
};

use crate::{
    assets::bmp::decode_bmp,
    color::convert::{ConvertOpts, YuvImage, convert},
    compose::overlay::{composite, ensure_overlay_fits},
    config::Config,
    foundation::{
        core::FrameSize,
        error::{OverlayError, OverlayResult},
    },
    video::{
        frame::FrameBuffer,
        stream::{FrameReader, FrameWriter},
    },
};

/// Counters reported by a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Frames read, composited and written.
    pub frames: u64,
    /// Bytes consumed from the input (complete frames only).
    pub bytes_in: u64,
    /// Bytes written to the output.
    pub bytes_out: u64,
}

/// Composite `overlay` onto every frame of `input` and write the frames to `output`.
///
/// Frames are processed one at a time in stream order; a single set of plane buffers is reused.
/// The loop ends cleanly when the input runs out before a complete luma plane. The output is
/// flushed before returning.
pub fn run<R: Read, W: Write>(
    input: R,
    output: W,
    overlay: &YuvImage,
    size: FrameSize,
) -> OverlayResult<PipelineStats> {
    ensure_overlay_fits(size, overlay)?;

    let mut reader = FrameReader::new(input, size);
    let mut writer = FrameWriter::new(output);
    let mut frame = FrameBuffer::new(size);

    while reader.read_frame(&mut frame)? {
        composite(frame.view_mut(), overlay)?;
        writer.write_frame(&frame)?;
        tracing::trace!(frame = writer.frames_written() - 1, "frame composited");
    }
    writer.flush()?;

    let frame_len = size.frame_len() as u64;
    let stats = PipelineStats {
        frames: writer.frames_written(),
        bytes_in: reader.frames_read() * frame_len,
        bytes_out: writer.frames_written() * frame_len,
    };
    tracing::debug!(frames = stats.frames, "end of input stream");
    Ok(stats)
}

/// Full file-based run: decode and convert the overlay once, then stream every frame.
///
/// The overlay is checked against the frame size before the output file is created.
#[tracing::instrument(skip(cfg), fields(input = %cfg.input_video.display()))]
pub fn run_with_config(cfg: &Config) -> OverlayResult<PipelineStats> {
    cfg.validate()?;
    let size = cfg.frame_size()?;

    let image = decode_bmp(&cfg.overlay_image)?;
    let overlay = convert(
        &image,
        &ConvertOpts {
            threads: cfg.threads,
        },
    )?;
    ensure_overlay_fits(size, &overlay)?;
    tracing::info!(
        overlay_width = overlay.width,
        overlay_height = overlay.height,
        frame_width = size.width,
        frame_height = size.height,
        "overlay ready"
    );

    let input = File::open(&cfg.input_video).map_err(|e| {
        OverlayError::io(format!("open input '{}'", cfg.input_video.display()), e)
    })?;
    let output = File::create(&cfg.output_video).map_err(|e| {
        OverlayError::io(format!("create output '{}'", cfg.output_video.display()), e)
    })?;

    let stats = run(
        BufReader::new(input),
        BufWriter::new(output),
        &overlay,
        size,
    )?;
    tracing::info!(
        frames = stats.frames,
        bytes = stats.bytes_out,
        output = %cfg.output_video.display(),
        "overlay run finished"
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
