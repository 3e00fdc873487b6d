//! Planar YUV frames and their allocation boundary.

/// Pixel formats, chroma families and plane lanes.
pub mod format;
/// Planar YUV frame with host-style geometry.
pub mod picture;
/// Frame allocators.
pub mod pool;
/// Strided sample plane.
pub mod plane;
