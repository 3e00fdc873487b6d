//! The pixel-plane transform catalogue.
//!
//! [`catalogue`] maps a method and chroma family to an entry from [`anaglyph`] or [`spatial`].

/// Colour-channel extraction and recombination.
pub mod anaglyph;
/// `(method, family)` dispatch tables.
pub mod catalogue;
/// Encoding methods and pair schemes.
pub mod method;
/// Side-by-side and over-under extraction.
pub mod spatial;
