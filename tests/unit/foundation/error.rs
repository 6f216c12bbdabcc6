use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        OverprintError::invalid_source("x")
            .to_string()
            .contains("invalid image source:")
    );
    assert!(
        OverprintError::source_unavailable("x")
            .to_string()
            .contains("image source unavailable:")
    );
    assert!(
        OverprintError::map_unavailable("x")
            .to_string()
            .contains("map snapshot unavailable:")
    );
    assert!(
        OverprintError::invalid_overlay("x")
            .to_string()
            .contains("invalid overlay:")
    );
    assert!(
        OverprintError::encoding("x")
            .to_string()
            .contains("encoding failed:")
    );
    assert!(
        OverprintError::not_loaded("x")
            .to_string()
            .contains("no image loaded:")
    );
    assert!(
        OverprintError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = OverprintError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
