use crate::{
    assets::source::ImageSource,
    encode::raster::OutputFormat,
    foundation::error::{OverprintError, OverprintResult},
    overlay::model::OverlaySet,
};

/// Everything needed for a one-shot modify-and-export call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyImageOptions {
    /// The base image.
    pub source: ImageSource,
    /// Overlays to composite; empty by default.
    #[serde(default)]
    pub overlays: OverlaySet,
    /// Output encoding; JPEG by default.
    #[serde(default)]
    pub output_format: OutputFormat,
    /// JPEG quality in [0,1]; clamped, ignored for PNG.
    #[serde(default = "default_quality")]
    pub quality: f64,
}

impl ModifyImageOptions {
    /// Options with no overlays and default output settings.
    pub fn new(source: ImageSource) -> Self {
        Self {
            source,
            overlays: OverlaySet::default(),
            output_format: OutputFormat::default(),
            quality: default_quality(),
        }
    }

    /// Parse options from host-supplied JSON.
    pub fn from_json(json: &str) -> OverprintResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| OverprintError::validation(format!("parse modify options: {e}")))
    }
}

/// Output settings for a render against accumulated editor state.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Output encoding; JPEG by default.
    #[serde(default)]
    pub output_format: OutputFormat,
    /// JPEG quality in [0,1]; clamped, ignored for PNG.
    #[serde(default = "default_quality")]
    pub quality: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            quality: default_quality(),
        }
    }
}

impl RenderOptions {
    /// Render options for a given format at default quality.
    pub fn with_format(format: OutputFormat) -> Self {
        Self {
            output_format: format,
            ..Self::default()
        }
    }
}

/// What the caller gets back from a load or render.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ModifiedImageResult {
    /// Locator of the persisted output (or the source locator for loads).
    pub uri: String,
    /// Output surface width in pixels; always the base image's width.
    pub width: u32,
    /// Output surface height in pixels; always the base image's height.
    pub height: u32,
}

fn default_quality() -> f64 {
    0.92
}
