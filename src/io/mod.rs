//! File input and output used by the command line front-end.

/// PNG previews.
pub mod png;
/// Raw planar frame files.
pub mod raw;
