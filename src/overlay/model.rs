use crate::{
    assets::source::ImageSource,
    foundation::core::{Point, Size},
    map::snapshot::GeoCoordinate,
};

/// A positioned, styled piece of text layered onto the base image.
///
/// `position` is the left-aligned baseline anchor; rotation pivots around
/// it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextOverlay {
    /// The text to draw.
    pub text: String,
    /// Baseline anchor in base-image pixels.
    pub position: Point,
    /// Font and fill styling.
    #[serde(default)]
    pub style: TextStyle,
    /// Clockwise rotation in degrees around `position`.
    #[serde(default)]
    pub rotation: f64,
}

/// Styling for a [`TextOverlay`].
///
/// Color strings are CSS-style hex; unparseable values degrade to opaque
/// black at paint time rather than failing the render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Font size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Glyph fill color.
    #[serde(default = "default_text_color")]
    pub color: String,
    /// Font family name, CSS generic families included.
    #[serde(default = "default_font_family")]
    pub font_family: String,
    /// Optional background box fill behind the measured text.
    #[serde(default)]
    pub background_color: Option<String>,
    /// Overlay opacity in [0,1]; out-of-range values clamp.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Font weight.
    #[serde(default)]
    pub font_weight: FontWeight,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            color: default_text_color(),
            font_family: default_font_family(),
            background_color: None,
            opacity: default_opacity(),
            font_weight: FontWeight::default(),
        }
    }
}

/// Font weight for text overlays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

/// A raster image layered onto the base image.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageOverlay {
    /// Where the overlay pixels come from.
    pub source: ImageSource,
    /// Top-left corner of the drawn rect in base-image pixels.
    pub position: Point,
    /// Target size; the source's natural size when unset.
    #[serde(default)]
    pub size: Option<Size>,
    /// Overlay opacity in [0,1]; out-of-range values clamp.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Clockwise rotation in degrees around the rect center.
    #[serde(default)]
    pub rotation: f64,
}

/// A map snapshot layered onto the base image.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOverlay {
    /// Geographic center of the snapshot.
    pub coordinates: GeoCoordinate,
    /// Map zoom level.
    #[serde(default = "default_zoom_level")]
    pub zoom_level: f64,
    /// Snapshot dimensions.
    #[serde(default)]
    pub style: MapStyle,
    /// Top-left placement on the base image.
    #[serde(default)]
    pub position: Point,
    /// Markers drawn over the snapshot.
    #[serde(default)]
    pub markers: Vec<MapMarker>,
}

/// Snapshot dimensions for a [`MapOverlay`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MapStyle {
    /// Snapshot width in pixels.
    #[serde(default = "default_map_width")]
    pub width: f64,
    /// Snapshot height in pixels.
    #[serde(default = "default_map_height")]
    pub height: f64,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            width: default_map_width(),
            height: default_map_height(),
        }
    }
}

/// A pin placed on the map snapshot.
///
/// A marker without a coordinate cannot be projected and is silently
/// skipped; that is documented policy, not an error.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MapMarker {
    /// Geographic position of the pin.
    #[serde(default)]
    pub coordinate: Option<GeoCoordinate>,
    /// Optional label drawn in a box above the pin.
    #[serde(default)]
    pub title: Option<String>,
    /// Pin color; defaults to red.
    #[serde(default)]
    pub color: Option<String>,
    /// Pin bounding-box height in pixels; defaults to 30.
    #[serde(default)]
    pub size: Option<f64>,
}

/// A pre-rasterized UI component layered onto the base image.
///
/// The component subtree is rasterized by an external collaborator before
/// it reaches the compositor; an overlay whose `rendered_image_uri` is still
/// unset is a no-op.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentOverlay {
    /// Locator of the pre-rasterized component image.
    #[serde(default)]
    pub rendered_image_uri: Option<String>,
    /// Top-left corner of the drawn rect in base-image pixels.
    #[serde(default)]
    pub position: Point,
    /// Target size; the rasterized image's natural size when unset.
    #[serde(default)]
    pub size: Option<Size>,
    /// Overlay opacity in [0,1]; out-of-range values clamp.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Clockwise rotation in degrees around the rect center.
    #[serde(default)]
    pub rotation: f64,
}

/// The ordered aggregate of overlays for one render.
///
/// Categories paint in the fixed order text, images, map, components, with
/// caller list order inside each category. The order is contractual: later
/// categories paint over earlier ones.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlaySet {
    /// Text overlays, painted first.
    #[serde(default)]
    pub text: Vec<TextOverlay>,
    /// Image overlays.
    #[serde(default)]
    pub images: Vec<ImageOverlay>,
    /// At most one map overlay.
    #[serde(default)]
    pub map: Option<MapOverlay>,
    /// Component overlays, painted last.
    #[serde(default)]
    pub components: Vec<ComponentOverlay>,
}

impl OverlaySet {
    /// True when no overlay of any category is present.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
            && self.images.is_empty()
            && self.map.is_none()
            && self.components.is_empty()
    }
}

fn default_font_size() -> f64 {
    16.0
}

fn default_text_color() -> String {
    "#000000".to_string()
}

fn default_font_family() -> String {
    "sans-serif".to_string()
}

fn default_opacity() -> f64 {
    1.0
}

fn default_zoom_level() -> f64 {
    14.0
}

fn default_map_width() -> f64 {
    300.0
}

fn default_map_height() -> f64 {
    200.0
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/model.rs"]
mod tests;
