/// Uncompressed 24-bit BMP decoding.
pub mod bmp;
