use crate::foundation::{
    core::FrameSize,
    error::{OverlayError, OverlayResult},
};

/// Owned Y, U and V plane storage for one frame, reused across pipeline iterations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    size: FrameSize,
    y: Vec<u8>,
    u: Vec<u8>,
    v: Vec<u8>,
}

impl FrameBuffer {
    /// Allocate zeroed planes for `size`.
    pub fn new(size: FrameSize) -> Self {
        Self {
            size,
            y: vec![0; size.luma_len()],
            u: vec![0; size.chroma_len()],
            v: vec![0; size.chroma_len()],
        }
    }

    /// Frame dimensions.
    pub fn size(&self) -> FrameSize {
        self.size
    }

    /// Luma plane.
    pub fn y(&self) -> &[u8] {
        &self.y
    }

    /// Blue-difference plane.
    pub fn u(&self) -> &[u8] {
        &self.u
    }

    /// Red-difference plane.
    pub fn v(&self) -> &[u8] {
        &self.v
    }

    /// Borrow all three planes mutably as a [`FrameView`].
    pub fn view_mut(&mut self) -> FrameView<'_> {
        FrameView {
            size: self.size,
            y: &mut self.y,
            u: &mut self.u,
            v: &mut self.v,
        }
    }
}

/// Mutable view over the three disjoint planes of one frame.
#[derive(Debug)]
pub struct FrameView<'a> {
    size: FrameSize,
    y: &'a mut [u8],
    u: &'a mut [u8],
    v: &'a mut [u8],
}

impl<'a> FrameView<'a> {
    /// Wrap caller-owned planes, checking each length against `size`.
    pub fn new(
        size: FrameSize,
        y: &'a mut [u8],
        u: &'a mut [u8],
        v: &'a mut [u8],
    ) -> OverlayResult<Self> {
        if y.len() != size.luma_len() || u.len() != size.chroma_len() || v.len() != size.chroma_len()
        {
            return Err(OverlayError::validation(format!(
                "plane sizes {}/{}/{} do not match {}x{} 4:2:0 frame",
                y.len(),
                u.len(),
                v.len(),
                size.width,
                size.height
            )));
        }
        Ok(Self { size, y, u, v })
    }

    /// Frame dimensions.
    pub fn size(&self) -> FrameSize {
        self.size
    }

    /// Split into the luma and both chroma planes.
    pub fn planes_mut(&mut self) -> (&mut [u8], &mut [u8], &mut [u8]) {
        (&mut *self.y, &mut *self.u, &mut *self.v)
    }
}
