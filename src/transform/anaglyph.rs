//! Colour-channel extraction and recombination over subsampled YUV planes.
//!
//! Every luma sample is decoded to RGB with the chroma pair of its block, filtered, and encoded
//! back. A block's shared chroma pair ends up holding the values encoded from the last luma sample
//! visited in that block (bottom-right), columns outer and rows inner.

use crate::convert::color::{rgb_to_yuv, yuv_to_rgb};
use crate::foundation::core::{Rgb8, mean_u8};
use crate::foundation::error::{StereoError, StereoResult};
use crate::frame::format::PlaneLanes;
use crate::frame::picture::Frame;
use crate::frame::plane::Plane;
use crate::transform::method::{Hue, Rendering};

/// Luma block covered by one chroma sample pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChromaBlock {
    /// Luma columns per chroma sample.
    pub w: usize,
    /// Luma rows per chroma sample.
    pub h: usize,
}

impl ChromaBlock {
    /// 2x2 luma block per chroma pair.
    pub const YUV420: Self = Self { w: 2, h: 2 };
    /// 2x1 luma block per chroma pair.
    pub const YUV422: Self = Self { w: 2, h: 1 };
}

/// Per-pixel channel selection of one anaglyph method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelSelect {
    /// Filter hue.
    pub hue: Hue,
    /// Rendering variant.
    pub rendering: Rendering,
}

fn keep(flag: bool, value: u8, otherwise: u8) -> u8 {
    if flag { value } else { otherwise }
}

/// Keep the hue's channels and zero the rest.
pub fn mask(hue: Hue, px: Rgb8) -> Rgb8 {
    let [r, g, b] = hue.channels();
    Rgb8::new(keep(r, px.r, 0), keep(g, px.g, 0), keep(b, px.b, 0))
}

/// The hue's single channel, or the mean of its two channels.
pub fn defining_value(hue: Hue, px: Rgb8) -> u8 {
    match hue {
        Hue::Red => px.r,
        Hue::Green => px.g,
        Hue::Blue => px.b,
        Hue::Cyan => mean_u8(px.g, px.b),
        Hue::Magenta => mean_u8(px.r, px.b),
        Hue::Yellow => mean_u8(px.r, px.g),
    }
}

impl ChannelSelect {
    /// Filter one RGB pixel.
    pub fn select(self, px: Rgb8) -> Rgb8 {
        match self.rendering {
            Rendering::FullColor => mask(self.hue, px),
            Rendering::Grayscale => Rgb8::gray(defining_value(self.hue, px)),
            Rendering::Fill => {
                let fill = defining_value(self.hue, px);
                let [r, g, b] = self.hue.channels();
                Rgb8::new(keep(r, px.r, fill), keep(g, px.g, fill), keep(b, px.b, fill))
            }
        }
    }
}

/// Join the left eye's `first` channels with the right eye's `second` channels.
pub fn merge(first: Hue, left: Rgb8, second: Hue, right: Rgb8) -> Rgb8 {
    let a = mask(first, left);
    let b = mask(second, right);
    Rgb8::new(
        a.r.saturating_add(b.r),
        a.g.saturating_add(b.g),
        a.b.saturating_add(b.b),
    )
}

/// Chroma sample of the block starting at luma `(bx, by)`.
///
/// Trailing luma rows or columns that have no chroma sample of their own (odd extents) reuse the
/// last one on that axis. `None` when the chroma plane is empty.
fn chroma_pos(bx: usize, by: usize, block: ChromaBlock, chroma: &Plane) -> Option<(usize, usize)> {
    let (cw, ch) = (chroma.visible_pitch(), chroma.visible_lines());
    if cw == 0 || ch == 0 {
        return None;
    }
    Some(((bx / block.w).min(cw - 1), (by / block.h).min(ch - 1)))
}

fn check_yuv(frame: &Frame, lanes: PlaneLanes, role: &str) -> StereoResult<()> {
    let n = frame.plane_count();
    if lanes.y >= n || lanes.u >= n || lanes.v >= n {
        return Err(StereoError::validation(format!(
            "{role} frame has {n} planes, lanes {lanes:?} are out of range"
        )));
    }
    if !frame.plane(lanes.u).same_extent(frame.plane(lanes.v)) {
        return Err(StereoError::validation(format!(
            "{role} frame has mismatched U/V planes"
        )));
    }
    Ok(())
}

pub(crate) fn check_same_geometry(a: &Frame, b: &Frame, what: &str) -> StereoResult<()> {
    if a.same_geometry(b) {
        return Ok(());
    }
    Err(StereoError::validation(format!(
        "{what}: {} {}x{} does not match {} {}x{}",
        a.format(),
        a.width(),
        a.height(),
        b.format(),
        b.width(),
        b.height()
    )))
}

/// Decode, filter and re-encode every visible sample of `src` into `dst`.
pub fn extract(
    src: &Frame,
    dst: &mut Frame,
    lanes: PlaneLanes,
    block: ChromaBlock,
    select: ChannelSelect,
) -> StereoResult<()> {
    check_yuv(src, lanes, "source")?;
    check_same_geometry(src, dst, "destination")?;

    let (sy, su, sv) = (src.plane(lanes.y), src.plane(lanes.u), src.plane(lanes.v));
    let [dy, du, dv] = dst.yuv_planes_mut(lanes)?;
    let (w, h) = (sy.visible_pitch(), sy.visible_lines());

    for by in (0..h).step_by(block.h) {
        for bx in (0..w).step_by(block.w) {
            let chroma = chroma_pos(bx, by, block, su);
            let (u, v) = chroma.map_or((128, 128), |(cx, cy)| (su.sample(cx, cy), sv.sample(cx, cy)));
            for x in bx..(bx + block.w).min(w) {
                for y in by..(by + block.h).min(h) {
                    let rgb = select.select(yuv_to_rgb(sy.sample(x, y), u, v));
                    let (ny, nu, nv) = rgb_to_yuv(rgb);
                    dy.set_sample(x, y, ny);
                    if let Some((cx, cy)) = chroma {
                        du.set_sample(cx, cy, nu);
                        dv.set_sample(cx, cy, nv);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Build one anaglyph frame from a left and a right eye frame.
///
/// The left eye contributes the `first` hue's channels, the right eye the `second` hue's.
pub fn combine(
    left: &Frame,
    right: &Frame,
    dst: &mut Frame,
    lanes: PlaneLanes,
    block: ChromaBlock,
    (first, second): (Hue, Hue),
) -> StereoResult<()> {
    check_yuv(left, lanes, "left")?;
    check_same_geometry(left, right, "right eye")?;
    check_same_geometry(left, dst, "destination")?;

    let (ly, lu, lv) = (left.plane(lanes.y), left.plane(lanes.u), left.plane(lanes.v));
    let (ry, ru, rv) = (right.plane(lanes.y), right.plane(lanes.u), right.plane(lanes.v));
    let [dy, du, dv] = dst.yuv_planes_mut(lanes)?;
    let (w, h) = (ly.visible_pitch(), ly.visible_lines());

    for by in (0..h).step_by(block.h) {
        for bx in (0..w).step_by(block.w) {
            let chroma = chroma_pos(bx, by, block, lu);
            let (l_uv, r_uv) = match chroma {
                Some((cx, cy)) => (
                    (lu.sample(cx, cy), lv.sample(cx, cy)),
                    (ru.sample(cx, cy), rv.sample(cx, cy)),
                ),
                None => ((128, 128), (128, 128)),
            };
            for x in bx..(bx + block.w).min(w) {
                for y in by..(by + block.h).min(h) {
                    let l = yuv_to_rgb(ly.sample(x, y), l_uv.0, l_uv.1);
                    let r = yuv_to_rgb(ry.sample(x, y), r_uv.0, r_uv.1);
                    let (ny, nu, nv) = rgb_to_yuv(merge(first, l, second, r));
                    dy.set_sample(x, y, ny);
                    if let Some((cx, cy)) = chroma {
                        du.set_sample(cx, cy, nu);
                        dv.set_sample(cx, cy, nv);
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/transform/anaglyph.rs"]
mod tests;
