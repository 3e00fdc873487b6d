//! BT.601 studio-range integer conversion between YUV and RGB samples.

use crate::foundation::core::Rgb8;

const SCALE_BITS: i32 = 10;
const ONE_HALF: i32 = 1 << (SCALE_BITS - 1);

const fn fix(x: f64) -> i32 {
    (x * (1 << SCALE_BITS) as f64 + 0.5) as i32
}

const Y_GAIN: i32 = fix(255.0 / 219.0);
const CR_TO_R: i32 = fix(1.402 * 255.0 / 224.0);
const CB_TO_G: i32 = fix(0.34414 * 255.0 / 224.0);
const CR_TO_G: i32 = fix(0.71414 * 255.0 / 224.0);
const CB_TO_B: i32 = fix(1.772 * 255.0 / 224.0);

fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Decode one studio-range YUV sample to full-range RGB.
pub fn yuv_to_rgb(y: u8, u: u8, v: u8) -> Rgb8 {
    let cb = i32::from(u) - 128;
    let cr = i32::from(v) - 128;
    let r_add = CR_TO_R * cr + ONE_HALF;
    let g_add = -CB_TO_G * cb - CR_TO_G * cr + ONE_HALF;
    let b_add = CB_TO_B * cb + ONE_HALF;
    let y = (i32::from(y) - 16) * Y_GAIN;
    Rgb8 {
        r: clamp_u8((y + r_add) >> SCALE_BITS),
        g: clamp_u8((y + g_add) >> SCALE_BITS),
        b: clamp_u8((y + b_add) >> SCALE_BITS),
    }
}

/// Encode one full-range RGB pixel to studio-range YUV.
pub fn rgb_to_yuv(rgb: Rgb8) -> (u8, u8, u8) {
    let (r, g, b) = (i32::from(rgb.r), i32::from(rgb.g), i32::from(rgb.b));
    let y = ((66 * r + 129 * g + 25 * b + 128) >> 8) + 16;
    let u = ((-38 * r - 74 * g + 112 * b + 128) >> 8) + 128;
    let v = ((112 * r - 94 * g - 18 * b + 128) >> 8) + 128;
    (clamp_u8(y), clamp_u8(u), clamp_u8(v))
}

#[cfg(test)]
#[path = "../../tests/unit/convert/color.rs"]
mod tests;
