use super::*;

fn close(a: u8, b: u8, tol: u8) -> bool {
    a.abs_diff(b) <= tol
}

#[test]
fn black_and_white_are_exact() {
    assert_eq!(rgb_to_yuv(Rgb8::gray(0)), (16, 128, 128));
    assert_eq!(rgb_to_yuv(Rgb8::gray(255)), (235, 128, 128));
    assert_eq!(yuv_to_rgb(16, 128, 128), Rgb8::gray(0));
    assert_eq!(yuv_to_rgb(235, 128, 128), Rgb8::gray(255));
}

#[test]
fn decode_clamps_out_of_gamut_samples() {
    // Full-scale chroma on black luma overshoots both ends.
    let rgb = yuv_to_rgb(16, 255, 0);
    assert_eq!(rgb.r, 0);
    assert_eq!(rgb.b, 255);
    let rgb = yuv_to_rgb(255, 255, 255);
    assert_eq!((rgb.r, rgb.b), (255, 255));
}

#[test]
fn pure_red_encodes_to_known_studio_values() {
    assert_eq!(rgb_to_yuv(Rgb8::new(255, 0, 0)), (82, 90, 240));
    let back = yuv_to_rgb(82, 90, 240);
    assert!(close(back.r, 255, 1));
    assert!(close(back.g, 0, 1));
    assert!(close(back.b, 0, 1));
}

#[test]
fn grays_roundtrip_within_rounding() {
    for v in 0..=255u8 {
        let (y, u, vv) = rgb_to_yuv(Rgb8::gray(v));
        assert_eq!((u, vv), (128, 128));
        let back = yuv_to_rgb(y, u, vv);
        assert!(close(back.r, v, 2), "gray {v} -> {y} -> {back:?}");
        assert_eq!(back.r, back.g);
        assert_eq!(back.g, back.b);
    }
}

#[test]
fn encode_stays_in_studio_range() {
    for r in (0..=255u8).step_by(51) {
        for g in (0..=255u8).step_by(51) {
            for b in (0..=255u8).step_by(51) {
                let (y, u, v) = rgb_to_yuv(Rgb8::new(r, g, b));
                assert!((16..=235).contains(&y));
                assert!((16..=240).contains(&u));
                assert!((16..=240).contains(&v));
            }
        }
    }
}
