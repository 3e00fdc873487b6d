//! Dispatch tables mapping `(method, chroma family)` to a transform.
//!
//! Cells that hold `None` are combinations without an implementation. Callers must treat them as
//! an error rather than approximate the result with another layout.

use crate::foundation::error::StereoResult;
use crate::frame::format::{ChromaFamily, PlaneLanes};
use crate::frame::picture::Frame;
use crate::transform::anaglyph::{self, ChannelSelect, ChromaBlock};
use crate::transform::method::{EncodingMethod, Half, Hue, PairScheme, Rendering};
use crate::transform::spatial;

/// One split catalogue entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformFn {
    /// Per-pixel colour-channel selection over chroma blocks.
    Channel {
        /// Luma block sharing one chroma pair.
        block: ChromaBlock,
        /// Channel selection rule.
        select: ChannelSelect,
    },
    /// Half-frame crop with nearest-neighbour doubling.
    Spatial(Half),
}

impl TransformFn {
    /// Derive `dst` from `src`. Both frames must share format and size.
    pub fn apply(&self, src: &Frame, dst: &mut Frame, lanes: PlaneLanes) -> StereoResult<()> {
        match *self {
            Self::Channel { block, select } => anaglyph::extract(src, dst, lanes, block, select),
            Self::Spatial(half) => spatial::extract_half(src, dst, half),
        }
    }
}

/// One combine catalogue entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombineFn {
    /// Luma block sharing one chroma pair.
    pub block: ChromaBlock,
    /// Hue kept from the left eye, then from the right eye.
    pub hues: (Hue, Hue),
}

impl CombineFn {
    /// Merge `left` and `right` into `dst`. All three frames must share format and size.
    pub fn apply(
        &self,
        left: &Frame,
        right: &Frame,
        dst: &mut Frame,
        lanes: PlaneLanes,
    ) -> StereoResult<()> {
        anaglyph::combine(left, right, dst, lanes, self.block, self.hues)
    }
}

type SplitRow = [Option<TransformFn>; 4];
type CombineRow = [Option<CombineFn>; 4];

const UNIMPLEMENTED: SplitRow = [None; 4];

// Columns follow `ChromaFamily::ALL`: 4:1:1, 4:2:0, 4:2:2, 4:4:4.
const fn anaglyph_row(hue: Hue, rendering: Rendering) -> SplitRow {
    let select = ChannelSelect { hue, rendering };
    [
        None,
        Some(TransformFn::Channel {
            block: ChromaBlock::YUV420,
            select,
        }),
        Some(TransformFn::Channel {
            block: ChromaBlock::YUV422,
            select,
        }),
        None,
    ]
}

const fn side_by_side_row(half: Half) -> SplitRow {
    [
        None,
        Some(TransformFn::Spatial(half)),
        Some(TransformFn::Spatial(half)),
        None,
    ]
}

const fn over_under_row(half: Half) -> SplitRow {
    [None, Some(TransformFn::Spatial(half)), None, None]
}

const fn combine_row(scheme: PairScheme) -> CombineRow {
    let hues = scheme.hues();
    [
        None,
        Some(CombineFn {
            block: ChromaBlock::YUV420,
            hues,
        }),
        Some(CombineFn {
            block: ChromaBlock::YUV422,
            hues,
        }),
        None,
    ]
}

// Rows follow `EncodingMethod::ALL`.
static SPLIT_TABLE: [SplitRow; EncodingMethod::COUNT] = {
    use Hue::*;
    use Rendering::*;
    [
        UNIMPLEMENTED,
        anaglyph_row(Red, FullColor),
        anaglyph_row(Cyan, FullColor),
        anaglyph_row(Green, FullColor),
        anaglyph_row(Magenta, FullColor),
        anaglyph_row(Blue, FullColor),
        anaglyph_row(Yellow, FullColor),
        anaglyph_row(Red, Grayscale),
        anaglyph_row(Cyan, Grayscale),
        anaglyph_row(Green, Grayscale),
        anaglyph_row(Magenta, Grayscale),
        anaglyph_row(Blue, Grayscale),
        anaglyph_row(Yellow, Grayscale),
        anaglyph_row(Cyan, Fill),
        anaglyph_row(Magenta, Fill),
        anaglyph_row(Yellow, Fill),
        side_by_side_row(Half::Left),
        side_by_side_row(Half::Right),
        over_under_row(Half::Top),
        over_under_row(Half::Bottom),
    ]
};

// Rows follow `PairScheme::ALL`.
static COMBINE_TABLE: [CombineRow; PairScheme::COUNT] = [
    combine_row(PairScheme::RedCyan),
    combine_row(PairScheme::CyanRed),
    combine_row(PairScheme::RedGreen),
    combine_row(PairScheme::GreenRed),
    combine_row(PairScheme::RedBlue),
    combine_row(PairScheme::BlueRed),
    combine_row(PairScheme::GreenMagenta),
    combine_row(PairScheme::MagentaGreen),
    combine_row(PairScheme::GreenBlue),
    combine_row(PairScheme::BlueGreen),
    combine_row(PairScheme::BlueYellow),
    combine_row(PairScheme::YellowBlue),
];

/// Split transform for `method` on frames of `family`, `None` when not implemented.
pub fn dispatch_split(method: EncodingMethod, family: ChromaFamily) -> Option<TransformFn> {
    SPLIT_TABLE[method.index()][family.index()]
}

/// Combine transform for `scheme` on frames of `family`, `None` when not implemented.
pub fn dispatch_combine(scheme: PairScheme, family: ChromaFamily) -> Option<CombineFn> {
    COMBINE_TABLE[scheme.index()][family.index()]
}

#[cfg(test)]
#[path = "../../tests/unit/transform/catalogue.rs"]
mod tests;
