use super::*;
use crate::frame::format::PixelFormat;
use crate::transform::method::MethodKind;

#[test]
fn rows_agree_with_method_kind() {
    for method in EncodingMethod::ALL {
        for family in ChromaFamily::ALL {
            let Some(entry) = dispatch_split(method, family) else {
                continue;
            };
            match (method.kind(), entry) {
                (MethodKind::Anaglyph(hue, rendering), TransformFn::Channel { select, .. }) => {
                    assert_eq!(select, ChannelSelect { hue, rendering }, "{method}");
                }
                (MethodKind::Spatial(half), TransformFn::Spatial(h)) => assert_eq!(half, h),
                other => panic!("{method} on {family} maps to {other:?}"),
            }
        }
    }
}

#[test]
fn only_420_and_422_are_implemented_for_anaglyphs() {
    for method in EncodingMethod::ALL {
        if !matches!(method.kind(), MethodKind::Anaglyph(..)) {
            continue;
        }
        assert!(dispatch_split(method, ChromaFamily::Yuv411).is_none());
        assert!(dispatch_split(method, ChromaFamily::Yuv444).is_none());
        assert_eq!(
            dispatch_split(method, ChromaFamily::Yuv420),
            Some(TransformFn::Channel {
                block: ChromaBlock::YUV420,
                select: match method.kind() {
                    MethodKind::Anaglyph(hue, rendering) => ChannelSelect { hue, rendering },
                    _ => unreachable!(),
                },
            })
        );
        assert!(matches!(
            dispatch_split(method, ChromaFamily::Yuv422),
            Some(TransformFn::Channel {
                block: ChromaBlock::YUV422,
                ..
            })
        ));
    }
}

#[test]
fn spatial_cells() {
    use ChromaFamily::*;
    let implemented = |m| {
        ChromaFamily::ALL
            .into_iter()
            .filter(|&f| dispatch_split(m, f).is_some())
            .collect::<Vec<_>>()
    };
    assert_eq!(implemented(EncodingMethod::Left), vec![Yuv420, Yuv422]);
    assert_eq!(implemented(EncodingMethod::Right), vec![Yuv420, Yuv422]);
    assert_eq!(implemented(EncodingMethod::Top), vec![Yuv420]);
    assert_eq!(implemented(EncodingMethod::Bottom), vec![Yuv420]);
    assert!(implemented(EncodingMethod::TwoD).is_empty());
}

#[test]
fn combine_cells_follow_scheme_order() {
    for scheme in PairScheme::ALL {
        let entry = dispatch_combine(scheme, ChromaFamily::Yuv420).unwrap();
        assert_eq!(entry.hues, scheme.hues());
        assert_eq!(entry.block, ChromaBlock::YUV420);
        assert_eq!(
            dispatch_combine(scheme, ChromaFamily::Yuv422).unwrap().block,
            ChromaBlock::YUV422
        );
        assert!(dispatch_combine(scheme, ChromaFamily::Yuv411).is_none());
        assert!(dispatch_combine(scheme, ChromaFamily::Yuv444).is_none());
    }
    assert_eq!(
        dispatch_combine(PairScheme::CyanRed, ChromaFamily::Yuv420).unwrap().hues,
        (Hue::Cyan, Hue::Red)
    );
}

#[test]
fn dispatched_entry_applies() {
    let mut src = Frame::new(PixelFormat::I420, 4, 2).unwrap();
    src.fill_yuv(10, 128, 128);
    src.plane_mut(0).set_sample(0, 0, 99);
    let mut dst = Frame::new(PixelFormat::I420, 4, 2).unwrap();
    let entry = dispatch_split(EncodingMethod::Left, ChromaFamily::Yuv420).unwrap();
    entry.apply(&src, &mut dst, src.lanes()).unwrap();
    assert_eq!(dst.plane(0).row(0), &[99, 99, 10, 10]);
}
