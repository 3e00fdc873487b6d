//! Stereoscopy splits combined stereo-3D video frames into per-eye frames and recombines eye
//! frames into anaglyphs.
//!
//! Frames are planar YUV ([`Frame`]) in one of the 4:1:1, 4:2:0, 4:2:2 or 4:4:4 families. Two
//! kinds of stereo encodings are understood:
//!
//! - **Anaglyph**: each eye lives in a subset of the RGB channels. Extraction decodes every
//!   sample to RGB, keeps (or greys, or fills) the eye's channels and encodes back to YUV.
//! - **Spatial**: each eye occupies one half of the frame (side-by-side or over-under). Extraction
//!   crops the half and doubles it back to full size.
//!
//! # Pipeline overview
//!
//! 1. [`EyeSplitter::split`] takes a combined frame and returns a left/right pair. The left frame
//!    carries the HoldForPair flag; the right frame's timestamp lies halfway between the previous
//!    and the current input.
//! 2. [`EyeCombiner::push`] caches the latest frame of each eye and, once both are present,
//!    returns one anaglyph frame for the configured [`PairScheme`].
//!
//! Both stages dispatch through fixed lookup tables ([`transform::catalogue`]); combinations that
//! have no implementation are reported once and rejected, never approximated.
//!
//! Frame storage goes through a [`FrameAllocator`]. Every frame the engine consumes is released
//! through it exactly once.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// BT.601 colour conversion.
pub mod convert;
/// Frames, planes, pixel formats and allocators.
pub mod frame;
/// File input and output.
pub mod io;
/// Splitter and combiner.
pub mod stereo;
/// Transform catalogue.
pub mod transform;

pub use crate::foundation::core::{Eye, EyeTag, Rgb8, Timestamp};
pub use crate::foundation::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticLog, Severity};
pub use crate::foundation::error::{StereoError, StereoResult};

pub use crate::convert::color::{rgb_to_yuv, yuv_to_rgb};
pub use crate::frame::format::{
    ChromaFamily, FourCc, PixelFormat, PlaneLanes, PlaneRatio, classify_chroma_format,
};
pub use crate::frame::picture::{Frame, FrameProps};
pub use crate::frame::plane::Plane;
pub use crate::frame::pool::{
    FrameAllocator, FramePool, FramePoolOpts, FramePoolStats, HeapAllocator,
};
pub use crate::stereo::combiner::{CombineOutcome, EyeCombiner};
pub use crate::stereo::config::{CombineConfig, PairingMode, SplitConfig};
pub use crate::stereo::splitter::{EyeSplitter, SplitOutcome};
pub use crate::transform::catalogue::{CombineFn, TransformFn, dispatch_combine, dispatch_split};
pub use crate::transform::method::{EncodingMethod, Half, Hue, MethodKind, PairScheme, Rendering};
