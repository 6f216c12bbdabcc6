#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose};
use overprint::{DecodedImage, ImageSource, decode_image};

/// Encode a solid-color RGBA image as PNG bytes.
pub fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

/// A solid-color base image decoded into the engine's working format.
pub fn solid_base(width: u32, height: u32, rgba: [u8; 4]) -> DecodedImage {
    decode_image(&png_bytes(width, height, rgba)).unwrap()
}

/// A solid-color image as a base64 source descriptor.
pub fn base64_source(width: u32, height: u32, rgba: [u8; 4]) -> ImageSource {
    ImageSource::base64(general_purpose::STANDARD.encode(png_bytes(width, height, rgba)))
}

/// Write a solid-color PNG under `dir` and return its path.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32, rgba: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, png_bytes(width, height, rgba)).unwrap();
    path
}

/// A solid-color premultiplied image built directly, bypassing the decoder.
pub fn solid_decoded(width: u32, height: u32, rgba: [u8; 4]) -> DecodedImage {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    let a = u16::from(rgba[3]);
    let premul = |c: u8| (((u16::from(c) * a) + 127) / 255) as u8;
    for _ in 0..width * height {
        data.extend_from_slice(&[premul(rgba[0]), premul(rgba[1]), premul(rgba[2]), rgba[3]]);
    }
    DecodedImage {
        width,
        height,
        rgba8_premul: Arc::new(data),
    }
}

/// Largest per-channel difference between two pixels.
pub fn channel_diff(a: [u8; 4], b: [u8; 4]) -> u8 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| x.abs_diff(y))
        .max()
        .unwrap_or(0)
}
