/// RGB to planar 4:2:0 conversion.
pub mod convert;
