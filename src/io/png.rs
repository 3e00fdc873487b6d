//! RGB previews of YUV frames.

use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::convert::color::yuv_to_rgb;
use crate::foundation::error::{StereoError, StereoResult};
use crate::frame::format::classify_chroma_format;
use crate::frame::picture::Frame;
use crate::frame::plane::Plane;

/// Chroma coordinate covering luma coordinate `pos` on an axis of `luma_len` samples.
fn chroma_index(pos: usize, luma_len: usize, chroma: usize) -> usize {
    (pos * chroma / luma_len).min(chroma.saturating_sub(1))
}

fn chroma_at(plane: &Plane, x: usize, y: usize, luma: &Plane) -> u8 {
    let (cw, ch) = (plane.visible_pitch(), plane.visible_lines());
    if cw == 0 || ch == 0 {
        return 128;
    }
    plane.sample(
        chroma_index(x, luma.visible_pitch(), cw),
        chroma_index(y, luma.visible_lines(), ch),
    )
}

/// Decode the visible picture to an RGB image, upsampling chroma by nearest neighbour.
pub fn frame_to_rgb(frame: &Frame) -> StereoResult<RgbImage> {
    classify_chroma_format(frame.format())?;
    let lanes = frame.lanes();
    let (py, pu, pv) = (frame.plane(lanes.y), frame.plane(lanes.u), frame.plane(lanes.v));

    let mut img = RgbImage::new(frame.width(), frame.height());
    let w = (frame.width() as usize).min(py.visible_pitch());
    let h = (frame.height() as usize).min(py.visible_lines());
    for y in 0..h {
        for x in 0..w {
            let rgb = yuv_to_rgb(
                py.sample(x, y),
                chroma_at(pu, x, y, py),
                chroma_at(pv, x, y, py),
            );
            img.put_pixel(x as u32, y as u32, image::Rgb([rgb.r, rgb.g, rgb.b]));
        }
    }
    Ok(img)
}

/// Write `frame` as an RGB PNG.
pub fn save_png(frame: &Frame, path: &Path) -> StereoResult<()> {
    let img = frame_to_rgb(frame)?;
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| StereoError::io(format!("write png '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/io/png.rs"]
mod tests;
