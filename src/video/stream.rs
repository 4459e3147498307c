use std::io::{ErrorKind, Read, Write};

use crate::{
    foundation::{
        core::FrameSize,
        error::{OverlayError, OverlayResult},
    },
    video::frame::FrameBuffer,
};

/// Reader state: either more frames may follow, or the stream has ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamState {
    /// The next call to [`FrameReader::read_frame`] attempts another frame.
    ReadingFrame,
    /// End of stream was seen (or a corrupt frame aborted reading); no more frames.
    Done,
}

/// Pulls fixed-size 4:2:0 planar frames (Y, then U, then V) from a byte stream.
///
/// A short or empty luma plane ends the stream cleanly. A short chroma plane after a complete
/// luma plane is [`OverlayError::StreamCorruption`].
#[derive(Debug)]
pub struct FrameReader<R> {
    inner: R,
    size: FrameSize,
    state: StreamState,
    frames_read: u64,
}

impl<R: Read> FrameReader<R> {
    /// Wrap `inner`; every frame is expected to be `size`.
    pub fn new(inner: R, size: FrameSize) -> Self {
        Self {
            inner,
            size,
            state: StreamState::ReadingFrame,
            frames_read: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Complete frames read so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Fill `frame` with the next frame. Returns `Ok(false)` once the stream is exhausted.
    pub fn read_frame(&mut self, frame: &mut FrameBuffer) -> OverlayResult<bool> {
        if self.state == StreamState::Done {
            return Ok(false);
        }
        if frame.size() != self.size {
            return Err(OverlayError::validation(format!(
                "frame buffer is {}x{}, stream frames are {}x{}",
                frame.size().width,
                frame.size().height,
                self.size.width,
                self.size.height
            )));
        }

        let index = self.frames_read;
        let mut view = frame.view_mut();
        let (y, u, v) = view.planes_mut();

        let got = read_full(&mut self.inner, y)
            .map_err(|e| OverlayError::io(format!("read luma plane of frame {index}"), e))?;
        if got < y.len() {
            if got > 0 {
                tracing::warn!(
                    frame = index,
                    bytes = got,
                    expected = y.len(),
                    "ignoring trailing partial frame"
                );
            }
            self.state = StreamState::Done;
            return Ok(false);
        }

        for (name, plane) in [("u", u), ("v", v)] {
            let got = read_full(&mut self.inner, plane).map_err(|e| {
                OverlayError::io(format!("read {name} plane of frame {index}"), e)
            })?;
            if got < plane.len() {
                self.state = StreamState::Done;
                return Err(OverlayError::stream_corruption(format!(
                    "frame {index}: {name} plane truncated after {got} of {} bytes",
                    plane.len()
                )));
            }
        }

        self.frames_read += 1;
        Ok(true)
    }

    /// Unwrap the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Pushes 4:2:0 planar frames to a byte stream in Y, U, V order.
#[derive(Debug)]
pub struct FrameWriter<W> {
    inner: W,
    frames_written: u64,
}

impl<W: Write> FrameWriter<W> {
    /// Wrap `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            frames_written: 0,
        }
    }

    /// Complete frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Write the three planes of `frame`, each as one contiguous write.
    pub fn write_frame(&mut self, frame: &FrameBuffer) -> OverlayResult<()> {
        let index = self.frames_written;
        for (name, plane) in [("y", frame.y()), ("u", frame.u()), ("v", frame.v())] {
            self.inner.write_all(plane).map_err(|e| {
                OverlayError::io(format!("write {name} plane of frame {index}"), e)
            })?;
        }
        self.frames_written += 1;
        Ok(())
    }

    /// Flush buffered output.
    pub fn flush(&mut self) -> OverlayResult<()> {
        self.inner
            .flush()
            .map_err(|e| OverlayError::io("flush output stream", e))
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Read until `buf` is full or the reader reports end of stream; returns bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
#[path = "../../tests/unit/video/stream.rs"]
mod tests;
