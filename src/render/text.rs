use crate::{
    foundation::error::{OverprintError, OverprintResult},
    overlay::model::FontWeight,
};

/// RGBA8 brush color carried through Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Measured extents of a laid-out text run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// Full layout width in pixels.
    pub width: f64,
    /// First-line ascent above the baseline in pixels.
    pub ascent: f64,
    /// First-line descent below the baseline in pixels.
    pub descent: f64,
}

/// Stateful helper for building Parley text layouts against system fonts.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape and lay out plain text.
    ///
    /// `family` is a CSS-style family source; generic families such as
    /// `sans-serif` resolve through the system font collection.
    pub fn layout_plain(
        &mut self,
        text: &str,
        family: &str,
        size_px: f32,
        weight: FontWeight,
        brush: TextBrushRgba8,
    ) -> OverprintResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(OverprintError::validation(
                "text font size must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family.to_string())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(match weight {
            FontWeight::Normal => parley::style::FontWeight::NORMAL,
            FontWeight::Bold => parley::style::FontWeight::BOLD,
        }));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Measure a built layout: full width plus first-line ascent/descent.
    pub fn measure(layout: &parley::Layout<TextBrushRgba8>) -> TextMetrics {
        let width = f64::from(layout.width());
        let (ascent, descent) = layout
            .lines()
            .next()
            .map(|line| {
                let m = line.metrics();
                (f64::from(m.ascent), f64::from(m.descent))
            })
            .unwrap_or((0.0, 0.0));
        TextMetrics {
            width,
            ascent,
            descent,
        }
    }
}
