use super::*;

fn gradient_frame(width: u32, height: u32) -> FrameRgba {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[
                ((x * 255) / width.max(1)) as u8,
                ((y * 255) / height.max(1)) as u8,
                128,
                255,
            ]);
        }
    }
    FrameRgba {
        width,
        height,
        data,
    }
}

#[test]
fn png_ignores_quality() {
    let frame = gradient_frame(16, 16);
    let a = encode_frame(&frame, OutputFormat::Png, 0.1).unwrap();
    let b = encode_frame(&frame, OutputFormat::Png, 0.9).unwrap();
    assert_eq!(a, b);
}

#[test]
fn png_roundtrips_dimensions() {
    let frame = gradient_frame(9, 5);
    let bytes = encode_frame(&frame, OutputFormat::Png, 1.0).unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (9, 5));
}

#[test]
fn jpeg_quality_changes_output() {
    let frame = gradient_frame(32, 32);
    let low = encode_frame(&frame, OutputFormat::Jpeg, 0.05).unwrap();
    let high = encode_frame(&frame, OutputFormat::Jpeg, 0.95).unwrap();
    assert_ne!(low, high);

    let img = image::load_from_memory(&high).unwrap();
    assert_eq!((img.width(), img.height()), (32, 32));
}

#[test]
fn jpeg_quality_clamps_out_of_range() {
    let frame = gradient_frame(8, 8);
    let a = encode_frame(&frame, OutputFormat::Jpeg, -3.0).unwrap();
    let b = encode_frame(&frame, OutputFormat::Jpeg, 7.0).unwrap();
    assert!(!a.is_empty());
    assert!(!b.is_empty());
}

#[test]
fn unknown_format_names_fall_back_to_jpeg() {
    assert_eq!(OutputFormat::from_name("png"), OutputFormat::Png);
    assert_eq!(OutputFormat::from_name("PNG"), OutputFormat::Png);
    assert_eq!(OutputFormat::from_name("jpeg"), OutputFormat::Jpeg);
    assert_eq!(OutputFormat::from_name("webp"), OutputFormat::Jpeg);
    assert_eq!(OutputFormat::from_name(""), OutputFormat::Jpeg);

    let f: OutputFormat = serde_json::from_str("\"png\"").unwrap();
    assert_eq!(f, OutputFormat::Png);
    let f: OutputFormat = serde_json::from_str("\"gif\"").unwrap();
    assert_eq!(f, OutputFormat::Jpeg);
}

#[test]
fn mismatched_buffer_is_rejected() {
    let frame = FrameRgba {
        width: 4,
        height: 4,
        data: vec![0; 7],
    };
    assert!(encode_frame(&frame, OutputFormat::Png, 1.0).is_err());
}
