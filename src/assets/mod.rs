//! Image acquisition and decoding.

/// Encoded bytes to premultiplied RGBA8.
pub mod decode;
/// Source descriptors and the resolver seam.
pub mod source;
