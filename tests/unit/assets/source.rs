use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose};

use super::*;

fn tiny_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 200, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn resolves_raw_base64() {
    let payload = general_purpose::STANDARD.encode(tiny_png(3, 2));
    let decoded = DiskSourceResolver::new()
        .resolve(&ImageSource::base64(payload))
        .unwrap();
    assert_eq!((decoded.width, decoded.height), (3, 2));
}

#[test]
fn resolves_base64_with_data_uri_prefix() {
    let payload = general_purpose::STANDARD.encode(tiny_png(2, 2));
    let source = ImageSource::base64(format!("data:image/png;base64,{payload}"));
    let decoded = DiskSourceResolver::new().resolve(&source).unwrap();
    assert_eq!((decoded.width, decoded.height), (2, 2));
}

#[test]
fn resolves_data_uri_through_uri_variant() {
    let payload = general_purpose::STANDARD.encode(tiny_png(4, 1));
    let source = ImageSource::uri(format!("data:image/png;base64,{payload}"));
    let decoded = DiskSourceResolver::new().resolve(&source).unwrap();
    assert_eq!((decoded.width, decoded.height), (4, 1));
}

#[test]
fn resolves_local_file_plain_and_file_uri() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.png");
    std::fs::write(&path, tiny_png(5, 7)).unwrap();

    let resolver = DiskSourceResolver::new();

    let decoded = resolver.resolve(&ImageSource::local_file(&path)).unwrap();
    assert_eq!((decoded.width, decoded.height), (5, 7));

    let decoded = resolver
        .resolve(&ImageSource::uri(path.display().to_string()))
        .unwrap();
    assert_eq!((decoded.width, decoded.height), (5, 7));

    let decoded = resolver
        .resolve(&ImageSource::uri(format!("file://{}", path.display())))
        .unwrap();
    assert_eq!((decoded.width, decoded.height), (5, 7));
}

#[test]
fn missing_file_is_source_unavailable() {
    let err = DiskSourceResolver::new()
        .resolve(&ImageSource::local_file("/definitely/not/here.png"))
        .unwrap_err();
    assert!(matches!(err, OverprintError::SourceUnavailable(_)), "{err}");
}

#[test]
fn network_schemes_are_unavailable_to_the_disk_resolver() {
    let err = DiskSourceResolver::new()
        .resolve(&ImageSource::uri("https://x/img.jpg"))
        .unwrap_err();
    assert!(matches!(err, OverprintError::SourceUnavailable(_)), "{err}");
}

#[test]
fn unknown_scheme_is_invalid_source() {
    let err = DiskSourceResolver::new()
        .resolve(&ImageSource::uri("gopher://x/img.jpg"))
        .unwrap_err();
    assert!(matches!(err, OverprintError::InvalidSource(_)), "{err}");
}

#[test]
fn undecodable_base64_is_source_unavailable() {
    let err = DiskSourceResolver::new()
        .resolve(&ImageSource::base64("@@@not-base64@@@"))
        .unwrap_err();
    assert!(matches!(err, OverprintError::SourceUnavailable(_)), "{err}");
}

#[test]
fn json_shapes_map_to_tags() {
    let s = ImageSource::from_json(r#"{"uri": "https://x/img.jpg"}"#).unwrap();
    assert_eq!(s, ImageSource::uri("https://x/img.jpg"));

    let s = ImageSource::from_json(r#"{"base64": "aGk="}"#).unwrap();
    assert_eq!(s, ImageSource::base64("aGk="));

    let s = ImageSource::from_json(r#"{"localFilePath": "/tmp/a.png"}"#).unwrap();
    assert_eq!(s, ImageSource::local_file("/tmp/a.png"));

    let err = ImageSource::from_json("{}").unwrap_err();
    assert!(matches!(err, OverprintError::InvalidSource(_)), "{err}");
}

#[test]
fn display_locator_forms() {
    assert_eq!(ImageSource::uri("https://x/a.jpg").display_locator(), "https://x/a.jpg");
    assert_eq!(
        ImageSource::local_file("/tmp/a.png").display_locator(),
        "file:///tmp/a.png"
    );
    assert_eq!(ImageSource::base64("aGk=").display_locator(), "");
}
