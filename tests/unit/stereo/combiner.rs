use super::*;
use crate::convert::color::{rgb_to_yuv, yuv_to_rgb};
use crate::foundation::core::{Rgb8, Timestamp};
use crate::frame::format::{FourCc, PixelFormat};
use crate::frame::pool::HeapAllocator;
use crate::transform::method::PairScheme;

#[derive(Debug, Default)]
struct Counting {
    allocated: usize,
    released: usize,
}

impl FrameAllocator for Counting {
    fn allocate(&mut self, format: PixelFormat, width: u32, height: u32) -> StereoResult<Frame> {
        self.allocated += 1;
        HeapAllocator.allocate(format, width, height)
    }

    fn release(&mut self, _frame: Frame) {
        self.released += 1;
    }
}

fn eye(format: PixelFormat, tag: EyeTag, rgb: Rgb8, ts: i64) -> Frame {
    let mut f = Frame::new(format, 8, 8).unwrap();
    let (y, u, v) = rgb_to_yuv(rgb);
    f.fill_yuv(y, u, v);
    f.eye = tag;
    f.props.timestamp = Timestamp(ts);
    f
}

fn combiner(scheme: PairScheme) -> EyeCombiner<Counting> {
    EyeCombiner::new(CombineConfig { scheme }, Counting::default())
}

#[test]
fn mono_frames_pass_through() {
    let mut c = combiner(PairScheme::RedCyan);
    let f = eye(PixelFormat::I420, EyeTag::mono(), Rgb8::gray(40), 1);
    let out = c.push(f.clone()).unwrap();
    assert!(matches!(out, CombineOutcome::PassThrough(ref g) if *g == f));
    assert!(c.cached_left().is_none() && c.cached_right().is_none());
}

#[test]
fn waits_for_both_eyes_then_combines() {
    let mut c = combiner(PairScheme::RedCyan);
    let red = Rgb8::new(230, 20, 20);
    let cyan = Rgb8::new(20, 200, 210);
    let left = eye(PixelFormat::I420, EyeTag::left_held(), red, 100);
    let out = c.push(left.clone()).unwrap();
    assert!(matches!(out, CombineOutcome::Pending));

    let right = eye(PixelFormat::I420, EyeTag::right(), cyan, 50);
    let CombineOutcome::Combined(out) = c.push(right.clone()).unwrap() else {
        panic!("expected a combined frame");
    };
    assert_eq!(out.eye, EyeTag::mono());
    assert_eq!(out.timestamp(), Timestamp(100));

    let l = left.plane(0).sample(0, 0);
    let lu = left.plane(1).sample(0, 0);
    let lv = left.plane(2).sample(0, 0);
    let r = right.plane(0).sample(0, 0);
    let ru = right.plane(1).sample(0, 0);
    let rv = right.plane(2).sample(0, 0);
    let lrgb = yuv_to_rgb(l, lu, lv);
    let rrgb = yuv_to_rgb(r, ru, rv);
    let expect = rgb_to_yuv(Rgb8::new(lrgb.r, rrgb.g, rrgb.b));
    assert_eq!(out.plane(0).sample(5, 5), expect.0);
    assert_eq!(out.plane(1).sample(2, 2), expect.1);
    assert_eq!(out.plane(2).sample(3, 1), expect.2);

    assert!(c.cached_left().is_some() && c.cached_right().is_some());
    assert_eq!((c.allocator().allocated, c.allocator().released), (1, 0));
}

#[test]
fn newer_frame_replaces_and_releases_cached_eye() {
    let mut c = combiner(PairScheme::CyanRed);
    c.push(eye(PixelFormat::I422, EyeTag::left_held(), Rgb8::gray(10), 1))
        .unwrap();
    c.push(eye(PixelFormat::I422, EyeTag::left_held(), Rgb8::gray(20), 2))
        .unwrap();
    assert_eq!(c.allocator().released, 1);
    assert_eq!(c.cached_left().unwrap().timestamp(), Timestamp(2));

    let out = c
        .push(eye(PixelFormat::I422, EyeTag::right(), Rgb8::gray(30), 3))
        .unwrap();
    assert!(matches!(out, CombineOutcome::Combined(_)));
    let out = c
        .push(eye(PixelFormat::I422, EyeTag::right(), Rgb8::gray(40), 4))
        .unwrap();
    assert!(matches!(out, CombineOutcome::Combined(ref f) if f.timestamp() == Timestamp(2)));
    assert_eq!(c.allocator().released, 2);

    let alloc = c.into_allocator();
    assert_eq!(alloc.released, 4);
}

#[test]
fn unsupported_family_reports_once() {
    let mut c = combiner(PairScheme::RedCyan);
    c.push(eye(PixelFormat::I444, EyeTag::left_held(), Rgb8::gray(10), 1))
        .unwrap();
    let err = c
        .push(eye(PixelFormat::I444, EyeTag::right(), Rgb8::gray(10), 1))
        .unwrap_err();
    assert!(matches!(
        err,
        StereoError::UnsupportedCombination {
            family: crate::frame::format::ChromaFamily::Yuv444,
            ..
        }
    ));
    let _ = c
        .push(eye(PixelFormat::I444, EyeTag::right(), Rgb8::gray(11), 2))
        .unwrap_err();
    assert_eq!(c.diagnostics().len(), 1);
    assert_eq!(c.allocator().allocated, 0);
}

#[test]
fn mismatched_eyes_are_rejected() {
    let mut c = combiner(PairScheme::RedCyan);
    c.push(eye(PixelFormat::I420, EyeTag::left_held(), Rgb8::gray(10), 1))
        .unwrap();
    let err = c
        .push(eye(PixelFormat::I422, EyeTag::right(), Rgb8::gray(10), 1))
        .unwrap_err();
    assert!(matches!(err, StereoError::Validation(_)));
}

#[test]
fn unknown_format_is_released_not_cached() {
    let mut c = combiner(PairScheme::RedCyan);
    let mut f = Frame::from_planes(PixelFormat::Other(FourCc(*b"RV32")), 4, 4, Vec::new()).unwrap();
    f.eye = EyeTag::right();
    let err = c.push(f).unwrap_err();
    assert!(matches!(err, StereoError::UnsupportedChromaFormat(_)));
    assert!(c.cached_right().is_none());
    assert_eq!(c.allocator().released, 1);
}
