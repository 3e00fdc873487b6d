//! Side-by-side and over-under extraction.
//!
//! Each plane is handled at its own visible extent: the selected half is stretched back to full
//! size by writing every source column (or row) twice. No colour conversion takes place.

use crate::foundation::error::StereoResult;
use crate::frame::picture::Frame;
use crate::frame::plane::Plane;
use crate::transform::anaglyph::check_same_geometry;
use crate::transform::method::Half;

/// First index and length of the half selected along an axis of length `visible`.
fn half_span(visible: usize, take_second: bool) -> (usize, usize) {
    let half = (visible / 2).max(1);
    let base = if take_second { visible - half } else { 0 };
    (base, half)
}

fn split_columns(src: &Plane, dst: &mut Plane, take_right: bool) {
    let w = src.visible_pitch();
    if w == 0 {
        return;
    }
    let (base, half) = half_span(w, take_right);
    for y in 0..src.visible_lines() {
        let s = src.row(y);
        for (o, out) in dst.row_mut(y).iter_mut().enumerate() {
            *out = s[base + (o / 2).min(half - 1)];
        }
    }
}

fn split_rows(src: &Plane, dst: &mut Plane, take_bottom: bool) {
    let h = src.visible_lines();
    if h == 0 {
        return;
    }
    let (base, half) = half_span(h, take_bottom);
    for o in 0..h {
        dst.row_mut(o)
            .copy_from_slice(src.row(base + (o / 2).min(half - 1)));
    }
}

/// Copy the `half` of every plane of `src` into `dst`, doubled back to full size.
pub fn extract_half(src: &Frame, dst: &mut Frame, half: Half) -> StereoResult<()> {
    check_same_geometry(src, dst, "destination")?;
    for (i, plane) in src.planes().iter().enumerate() {
        let out = dst.plane_mut(i);
        match half {
            Half::Left => split_columns(plane, out, false),
            Half::Right => split_columns(plane, out, true),
            Half::Top => split_rows(plane, out, false),
            Half::Bottom => split_rows(plane, out, true),
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/transform/spatial.rs"]
mod tests;
