use crate::{
    color::convert::YuvImage,
    foundation::{
        core::FrameSize,
        error::{OverlayError, OverlayResult},
    },
    video::frame::FrameView,
};

/// Check that `overlay` fits inside a frame of `size` when anchored at the top-left corner, and
/// that its planes are consistent with its dimensions.
pub fn ensure_overlay_fits(size: FrameSize, overlay: &YuvImage) -> OverlayResult<()> {
    if !size.contains(overlay.width, overlay.height) {
        return Err(OverlayError::validation(format!(
            "overlay {}x{} does not fit in {}x{} frame",
            overlay.width, overlay.height, size.width, size.height
        )));
    }

    let luma = overlay.width as usize * overlay.height as usize;
    let chroma = overlay.chroma_width() as usize * overlay.chroma_height() as usize;
    if overlay.y.len() != luma || overlay.u.len() != chroma || overlay.v.len() != chroma {
        return Err(OverlayError::validation(
            "overlay plane sizes do not match its dimensions",
        ));
    }
    Ok(())
}

/// Replace the top-left region of `frame` with `overlay`, plane by plane, with no blending.
///
/// Luma is copied for every overlay pixel. Chroma is copied for every 2x2 block the overlay
/// touches, including partial blocks on an odd right or bottom edge, clipped to the frame's
/// chroma planes. Everything outside that region is left untouched.
pub fn composite(mut frame: FrameView<'_>, overlay: &YuvImage) -> OverlayResult<()> {
    let size = frame.size();
    ensure_overlay_fits(size, overlay)?;

    let (y, u, v) = frame.planes_mut();

    let ow = overlay.width as usize;
    copy_region(
        y,
        size.width as usize,
        &overlay.y,
        ow,
        ow,
        overlay.height as usize,
    );

    let frame_cw = size.chroma_width() as usize;
    let ocw = overlay.chroma_width() as usize;
    let cols = ocw.min(frame_cw);
    let rows = (overlay.chroma_height() as usize).min(size.chroma_height() as usize);
    copy_region(u, frame_cw, &overlay.u, ocw, cols, rows);
    copy_region(v, frame_cw, &overlay.v, ocw, cols, rows);
    Ok(())
}

fn copy_region(
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    width: usize,
    height: usize,
) {
    if width == 0 {
        return;
    }
    for (row, src_row) in src.chunks_exact(src_stride).take(height).enumerate() {
        let start = row * dst_stride;
        dst[start..start + width].copy_from_slice(&src_row[..width]);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/overlay.rs"]
mod tests;
