use super::*;

#[test]
fn vocabulary_roundtrips() {
    for m in EncodingMethod::ALL {
        assert_eq!(m.as_str().parse::<EncodingMethod>().unwrap(), m);
        assert_eq!(m.to_string(), m.as_str());
    }
    for p in PairScheme::ALL {
        assert_eq!(p.as_str().parse::<PairScheme>().unwrap(), p);
    }
}

#[test]
fn table_order_matches_discriminants() {
    for (i, m) in EncodingMethod::ALL.into_iter().enumerate() {
        assert_eq!(m.index(), i);
    }
    for (i, p) in PairScheme::ALL.into_iter().enumerate() {
        assert_eq!(p.index(), i);
    }
}

#[test]
fn parsing_is_lenient_on_case_and_spelling() {
    assert_eq!(
        " Cyan-Grey ".parse::<EncodingMethod>().unwrap(),
        EncodingMethod::CyanGray
    );
    assert_eq!("2D".parse::<EncodingMethod>().unwrap(), EncodingMethod::TwoD);
    assert_eq!("GB".parse::<PairScheme>().unwrap(), PairScheme::GreenBlue);
}

#[test]
fn legacy_codes_are_accepted() {
    assert_eq!("1004".parse::<EncodingMethod>().unwrap(), EncodingMethod::Red);
    assert_eq!("1021".parse::<EncodingMethod>().unwrap(), EncodingMethod::CyanFill);
    assert_eq!("2002".parse::<EncodingMethod>().unwrap(), EncodingMethod::Bottom);
    assert_eq!(EncodingMethod::from_code(1022), None);
    for m in EncodingMethod::ALL {
        assert_eq!(EncodingMethod::from_code(m.code()), Some(m));
    }
}

#[test]
fn unknown_values_report_config_fallback() {
    let err = "purple".parse::<EncodingMethod>().unwrap_err();
    assert!(err.is_recoverable());
    let err = "xx".parse::<PairScheme>().unwrap_err();
    assert!(matches!(
        err,
        StereoError::ConfigFallback { ref fallback, .. } if fallback == "rc"
    ));
}

#[test]
fn kinds_cover_every_method() {
    assert_eq!(EncodingMethod::TwoD.kind(), MethodKind::TwoD);
    assert_eq!(
        EncodingMethod::YellowFill.kind(),
        MethodKind::Anaglyph(Hue::Yellow, Rendering::Fill)
    );
    assert_eq!(
        EncodingMethod::MagentaGray.kind(),
        MethodKind::Anaglyph(Hue::Magenta, Rendering::Grayscale)
    );
    assert_eq!(EncodingMethod::Top.kind(), MethodKind::Spatial(Half::Top));
    let fills = EncodingMethod::ALL
        .into_iter()
        .filter(|m| matches!(m.kind(), MethodKind::Anaglyph(_, Rendering::Fill)))
        .count();
    assert_eq!(fills, 3);
}

#[test]
fn schemes_name_left_hue_first() {
    assert_eq!(PairScheme::RedCyan.hues(), (Hue::Red, Hue::Cyan));
    assert_eq!(PairScheme::CyanRed.hues(), (Hue::Cyan, Hue::Red));
    assert_eq!(PairScheme::YellowBlue.hues(), (Hue::Yellow, Hue::Blue));
    assert_eq!(PairScheme::default(), PairScheme::RedCyan);
}

#[test]
fn serde_uses_vocabulary_strings() {
    let json = serde_json::to_string(&EncodingMethod::RedGray).unwrap();
    assert_eq!(json, "\"red-gray\"");
    let m: EncodingMethod = serde_json::from_str("\"yellow-fill\"").unwrap();
    assert_eq!(m, EncodingMethod::YellowFill);
    let p: PairScheme = serde_json::from_str("\"mg\"").unwrap();
    assert_eq!(p, PairScheme::MagentaGreen);
    assert!(serde_json::from_str::<PairScheme>("\"zz\"").is_err());
}
