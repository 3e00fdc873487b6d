use super::*;
use crate::frame::format::{FourCc, PixelFormat};
use crate::frame::pool::HeapAllocator;

#[derive(Debug, Default)]
struct Counting {
    allocated: usize,
    released: usize,
    fail: bool,
}

impl FrameAllocator for Counting {
    fn allocate(&mut self, format: PixelFormat, width: u32, height: u32) -> StereoResult<Frame> {
        if self.fail {
            return Err(StereoError::allocation("out of frames"));
        }
        self.allocated += 1;
        HeapAllocator.allocate(format, width, height)
    }

    fn release(&mut self, _frame: Frame) {
        self.released += 1;
    }
}

fn input(format: PixelFormat, w: u32, h: u32, ts: i64) -> Frame {
    let mut f = Frame::new(format, w, h).unwrap();
    f.fill_yuv(120, 90, 200);
    f.props.timestamp = Timestamp(ts);
    f
}

fn splitter(left: EncodingMethod, right: EncodingMethod) -> EyeSplitter<Counting> {
    EyeSplitter::new(
        SplitConfig {
            left,
            right,
            pairing: PairingMode::Paired,
        },
        Counting::default(),
    )
}

#[test]
fn paired_split_tags_and_interpolates() {
    let mut s = splitter(EncodingMethod::Red, EncodingMethod::Cyan);
    let SplitOutcome::Pair { left, right } =
        s.split(input(PixelFormat::I420, 64, 64, 1000)).unwrap()
    else {
        panic!("expected a pair");
    };
    assert_eq!(left.eye, EyeTag::left_held());
    assert_eq!(right.eye, EyeTag::right());
    assert_eq!(left.timestamp(), Timestamp(1000));
    assert_eq!(right.timestamp(), Timestamp(500));
    assert_eq!((s.allocator().allocated, s.allocator().released), (2, 1));

    let SplitOutcome::Pair { left, right } =
        s.split(input(PixelFormat::I420, 64, 64, 2000)).unwrap()
    else {
        panic!("expected a pair");
    };
    assert_eq!(left.timestamp(), Timestamp(2000));
    assert_eq!(right.timestamp(), Timestamp(1500));
    assert_eq!(s.last_timestamp(), Timestamp(2000));
}

#[test]
fn passthrough_keeps_input_and_releases_nothing() {
    let mut s = splitter(EncodingMethod::TwoD, EncodingMethod::Cyan);
    let f = input(PixelFormat::I420, 16, 16, 40);
    let out = s.split(f.clone()).unwrap();
    assert!(matches!(out, SplitOutcome::PassThrough(ref g) if *g == f));

    let mut s = splitter(EncodingMethod::Red, EncodingMethod::Cyan);
    let mut tagged = input(PixelFormat::I420, 16, 16, 40);
    tagged.eye = EyeTag::right();
    let frames = s.split(tagged).unwrap().into_frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].eye, EyeTag::right());
    assert_eq!((s.allocator().allocated, s.allocator().released), (0, 0));
    assert_eq!(s.last_timestamp(), Timestamp::ZERO);
}

#[test]
fn unsupported_combination_releases_input_once_and_reports_once() {
    let mut s = splitter(EncodingMethod::Red, EncodingMethod::Cyan);
    let err = s.split(input(PixelFormat::I411, 64, 64, 10)).unwrap_err();
    assert!(matches!(
        err,
        StereoError::UnsupportedCombination {
            family: ChromaFamily::Yuv411,
            ..
        }
    ));
    assert_eq!((s.allocator().allocated, s.allocator().released), (0, 1));

    let _ = s.split(input(PixelFormat::I411, 64, 64, 20)).unwrap_err();
    assert_eq!(s.allocator().released, 2);
    assert_eq!(s.diagnostics().len(), 1);
    assert_eq!(s.diagnostics().suppressed(), 1);
    assert_eq!(s.last_timestamp(), Timestamp::ZERO);
}

#[test]
fn failing_right_eye_releases_left_output() {
    let mut s = splitter(EncodingMethod::Red, EncodingMethod::Top);
    let err = s.split(input(PixelFormat::I422, 32, 16, 10)).unwrap_err();
    assert!(matches!(err, StereoError::UnsupportedCombination { .. }));
    assert_eq!((s.allocator().allocated, s.allocator().released), (1, 2));
}

#[test]
fn unknown_pixel_format_is_rejected() {
    let mut s = splitter(EncodingMethod::Left, EncodingMethod::Right);
    let fmt = PixelFormat::Other(FourCc(*b"NV12"));
    let f = Frame::from_planes(fmt, 16, 16, Vec::new()).unwrap();
    let err = s.split(f).unwrap_err();
    assert!(matches!(err, StereoError::UnsupportedChromaFormat(_)));
    assert_eq!(s.allocator().released, 1);
    assert_eq!(
        s.diagnostics().events().next().unwrap().kind,
        DiagnosticKind::UnsupportedChromaFormat
    );
}

#[test]
fn empty_frame_is_rejected() {
    let mut s = splitter(EncodingMethod::Left, EncodingMethod::Right);
    let err = s.split(input(PixelFormat::I420, 0, 16, 10)).unwrap_err();
    assert!(matches!(err, StereoError::Validation(_)));
    assert_eq!(s.allocator().released, 1);
}

#[test]
fn allocation_failure_releases_input() {
    let mut s = splitter(EncodingMethod::Left, EncodingMethod::Right);
    let mut alloc = Counting::default();
    alloc.fail = true;
    s.allocator = alloc;
    let err = s.split(input(PixelFormat::I420, 16, 16, 10)).unwrap_err();
    assert!(matches!(err, StereoError::Allocation(_)));
    assert_eq!((s.allocator().allocated, s.allocator().released), (0, 1));
    assert_eq!(
        s.diagnostics().events().next().unwrap().kind,
        DiagnosticKind::AllocationFailure
    );
}

#[test]
fn outputs_inherit_frame_properties() {
    let mut s = splitter(EncodingMethod::Left, EncodingMethod::Right);
    let mut f = input(PixelFormat::I420, 16, 16, 90);
    f.props.force = true;
    f.props.progressive = true;
    f.props.nb_fields = 3;
    f.props.top_field_first = true;
    let frames = s.split(f.clone()).unwrap().into_frames();
    for out in &frames {
        assert!(out.props.force && out.props.progressive && out.props.top_field_first);
        assert_eq!(out.props.nb_fields, 3);
        assert_eq!(out.format(), f.format());
        assert_eq!((out.width(), out.height()), (16, 16));
    }
}

#[test]
fn alternating_mode_emits_one_eye_per_input() {
    let mut s = EyeSplitter::new(
        SplitConfig {
            left: EncodingMethod::Left,
            right: EncodingMethod::Right,
            pairing: PairingMode::Alternating,
        },
        Counting::default(),
    );
    let mut tags = Vec::new();
    for ts in [100, 200, 300] {
        let SplitOutcome::Single(out) = s.split(input(PixelFormat::I420, 8, 8, ts)).unwrap() else {
            panic!("expected one eye");
        };
        assert_eq!(out.timestamp(), Timestamp(ts));
        tags.push(out.eye);
    }
    assert_eq!(
        tags,
        vec![EyeTag::left_held(), EyeTag::right(), EyeTag::left_held()]
    );
    assert_eq!((s.allocator().allocated, s.allocator().released), (3, 3));
}
