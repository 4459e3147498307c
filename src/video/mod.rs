//! Raw 4:2:0 planar frames and the byte streams that carry them.

/// Frame plane storage and mutable views.
pub mod frame;
/// Frame-at-a-time stream reading and writing.
pub mod stream;
