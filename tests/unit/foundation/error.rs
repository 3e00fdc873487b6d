use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StereoError::unsupported_chroma("RV32")
            .to_string()
            .contains("unsupported chroma format:")
    );
    assert!(
        StereoError::allocation("x")
            .to_string()
            .contains("allocation failure:")
    );
    assert!(
        StereoError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(StereoError::io("x").to_string().contains("io error:"));
}

#[test]
fn unsupported_method_names_method_and_family() {
    let err = StereoError::unsupported_method(EncodingMethod::Red, ChromaFamily::Yuv411);
    let msg = err.to_string();
    assert!(msg.contains("red"));
    assert!(msg.contains("4:1:1"));
}

#[test]
fn only_config_fallback_is_recoverable() {
    assert!(StereoError::config_fallback("left", "purple", "red").is_recoverable());
    assert!(!StereoError::allocation("x").is_recoverable());
    assert!(!StereoError::unsupported_chroma("x").is_recoverable());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StereoError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn unsupported_scheme_uses_short_name() {
    let err = StereoError::unsupported_scheme(PairScheme::GreenMagenta, ChromaFamily::Yuv444);
    assert_eq!(
        err.to_string(),
        "unsupported method/format combination: gm on 4:4:4"
    );
}
