/// Top-left overlay of a planar image onto a frame.
pub mod overlay;
