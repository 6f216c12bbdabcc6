use image::ImageEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};

use crate::{
    assets::decode::unpremultiply_rgba8_in_place,
    foundation::core::clamp_unit,
    foundation::error::{OverprintError, OverprintResult},
    render::frame::FrameRgba,
};

/// Output encoding for the flattened surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossy JPEG; `quality` maps linearly onto the encoder's 0–100 scale.
    #[default]
    Jpeg,
    /// Lossless PNG at maximum compression; `quality` is ignored.
    Png,
}

impl OutputFormat {
    /// Map a format name to a variant.
    ///
    /// Unknown names fall back to JPEG — a documented fallback matching the
    /// host bindings this engine replaces, not an error.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "png" => Self::Png,
            _ => Self::Jpeg,
        }
    }

    /// The file extension used when persisting output bytes.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        }
    }
}

impl From<String> for OutputFormat {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<&str> for OutputFormat {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

/// Flatten a finished surface to encoded bytes.
///
/// `quality` is clamped to [0,1] and only meaningful for JPEG.
pub fn encode_frame(
    frame: &FrameRgba,
    format: OutputFormat,
    quality: f64,
) -> OverprintResult<Vec<u8>> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.data.len() != expected {
        return Err(OverprintError::validation("frame buffer size mismatch"));
    }

    let mut rgba = frame.data.clone();
    unpremultiply_rgba8_in_place(&mut rgba);

    let mut out = Vec::new();
    match format {
        OutputFormat::Png => {
            let encoder =
                PngEncoder::new_with_quality(&mut out, CompressionType::Best, FilterType::Adaptive);
            encoder
                .write_image(
                    &rgba,
                    frame.width,
                    frame.height,
                    image::ExtendedColorType::Rgba8,
                )
                .map_err(|e| OverprintError::encoding(format!("png encode: {e}")))?;
        }
        OutputFormat::Jpeg => {
            // JPEG carries no alpha channel.
            let rgb: Vec<u8> = rgba
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            let q = (clamp_unit(quality) * 100.0).round().clamp(1.0, 100.0) as u8;
            let encoder = JpegEncoder::new_with_quality(&mut out, q);
            encoder
                .write_image(
                    &rgb,
                    frame.width,
                    frame.height,
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| OverprintError::encoding(format!("jpeg encode: {e}")))?;
        }
    }

    if out.is_empty() {
        return Err(OverprintError::encoding("encoder produced no bytes"));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/raster.rs"]
mod tests;
