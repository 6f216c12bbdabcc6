use std::sync::Arc;

use kurbo::{Affine, Circle, RoundedRect, Shape, Vec2};
use rayon::prelude::*;

use crate::{
    assets::decode::DecodedImage,
    assets::source::{ImageSource, SourceResolver},
    foundation::color::Rgba8,
    foundation::core::{Point, Size, clamp_unit},
    foundation::error::{OverprintError, OverprintResult},
    foundation::math::deg_to_rad,
    map::snapshot::{MapSnapshot, MapSnapshotProvider, MapSnapshotRequest},
    overlay::model::{FontWeight, MapMarker, MapOverlay, OverlaySet, TextOverlay},
    render::frame::FrameRgba,
    render::text::{TextBrushRgba8, TextLayoutEngine},
};

/// Default pin bounding-box height in pixels.
const PIN_SIZE_PX: f64 = 30.0;
/// Marker title label font size.
const TITLE_FONT_SIZE: f32 = 12.0;
/// Corner radius of the marker title box.
const TITLE_CORNER_RADIUS: f64 = 5.0;
/// Gap between the title box and the top of the pin.
const TITLE_GAP_PX: f64 = 5.0;

/// The overlay compositing engine.
///
/// Owns a fresh drawing surface per [`Compositor::render`] call, sized
/// exactly to the base image; overlays are clipped by it and never grow it.
/// Overlay image sources are resolved concurrently up front; painting onto
/// the single surface is strictly serial in the contractual category order
/// text → images → map → components.
pub struct Compositor<'a> {
    resolver: &'a dyn SourceResolver,
    maps: Option<&'a dyn MapSnapshotProvider>,
    text_engine: TextLayoutEngine,
}

impl<'a> Compositor<'a> {
    /// Construct a compositor over the given collaborators.
    pub fn new(
        resolver: &'a dyn SourceResolver,
        maps: Option<&'a dyn MapSnapshotProvider>,
    ) -> Self {
        Self {
            resolver,
            maps,
            text_engine: TextLayoutEngine::new(),
        }
    }

    /// Composite `overlays` onto `base` and read back the finished surface.
    ///
    /// Fail-fast: the first source or snapshot resolution failure aborts the
    /// whole render; no partially painted frame escapes.
    #[tracing::instrument(skip_all, fields(width = base.width, height = base.height))]
    pub fn render(
        &mut self,
        base: &DecodedImage,
        overlays: &OverlaySet,
    ) -> OverprintResult<FrameRgba> {
        let width_u16: u16 = base
            .width
            .try_into()
            .map_err(|_| OverprintError::validation("base image width exceeds surface limit"))?;
        let height_u16: u16 = base
            .height
            .try_into()
            .map_err(|_| OverprintError::validation("base image height exceeds surface limit"))?;

        tracing::debug!(
            text = overlays.text.len(),
            images = overlays.images.len(),
            map = overlays.map.is_some(),
            components = overlays.components.len(),
            "compositing overlays"
        );

        // Front-load all IO: overlay sources resolve concurrently, the
        // snapshot provider runs once. Painting below never suspends.
        let resolver = self.resolver;
        let image_pixels: Vec<DecodedImage> = overlays
            .images
            .par_iter()
            .map(|o| resolver.resolve(&o.source))
            .collect::<OverprintResult<_>>()?;

        let component_pixels: Vec<Option<DecodedImage>> = overlays
            .components
            .par_iter()
            .map(|o| match &o.rendered_image_uri {
                Some(uri) => resolver.resolve(&ImageSource::uri(uri.clone())).map(Some),
                None => Ok(None),
            })
            .collect::<OverprintResult<_>>()?;

        let map_snapshot = match &overlays.map {
            Some(overlay) => Some(self.snapshot_for(overlay)?),
            None => None,
        };

        let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);

        let base_paint = rgba_premul_to_image(&base.rgba8_premul, base.width, base.height)?;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(base_paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(base.width),
            f64::from(base.height),
        ));

        for overlay in &overlays.text {
            self.draw_text(&mut ctx, overlay)?;
        }
        for (overlay, pixels) in overlays.images.iter().zip(&image_pixels) {
            draw_image_like(
                &mut ctx,
                pixels,
                overlay.position,
                overlay.size,
                overlay.opacity,
                overlay.rotation,
            )?;
        }
        if let (Some(overlay), Some(snapshot)) = (&overlays.map, &map_snapshot) {
            self.draw_map(&mut ctx, overlay, snapshot)?;
        }
        for (overlay, pixels) in overlays.components.iter().zip(&component_pixels) {
            let Some(pixels) = pixels else {
                tracing::debug!("skipping component overlay without a rasterized image");
                continue;
            };
            draw_image_like(
                &mut ctx,
                pixels,
                overlay.position,
                overlay.size,
                overlay.opacity,
                overlay.rotation,
            )?;
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRgba {
            width: base.width,
            height: base.height,
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }

    fn snapshot_for(&self, overlay: &MapOverlay) -> OverprintResult<MapSnapshot> {
        let provider = self.maps.ok_or_else(|| {
            OverprintError::map_unavailable("no map snapshot provider configured")
        })?;
        let size = Size::new(overlay.style.width, overlay.style.height)
            .map_err(|_| OverprintError::invalid_overlay("map style width/height must be > 0"))?;
        provider.snapshot(&MapSnapshotRequest {
            center: overlay.coordinates,
            zoom_level: overlay.zoom_level,
            size,
        })
    }

    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        overlay: &TextOverlay,
    ) -> OverprintResult<()> {
        if overlay.text.is_empty() {
            return Ok(());
        }
        let style = &overlay.style;
        let opacity = clamp_unit(style.opacity) as f32;
        if opacity <= 0.0 {
            return Ok(());
        }

        let color = Rgba8::parse_or_black(&style.color);
        let layout = self.text_engine.layout_plain(
            &overlay.text,
            &style.font_family,
            style.font_size as f32,
            style.font_weight,
            TextBrushRgba8 {
                r: color.r,
                g: color.g,
                b: color.b,
                a: color.a,
            },
        )?;
        let metrics = TextLayoutEngine::measure(&layout);

        // The whole text+background unit rotates around the baseline anchor.
        let mut unit = Affine::translate((overlay.position.x, overlay.position.y));
        if overlay.rotation != 0.0 {
            unit = unit * Affine::rotate(deg_to_rad(overlay.rotation));
        }

        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }

        if let Some(bg) = style.background_color.as_deref() {
            let bg = Rgba8::parse_or_black(bg);
            ctx.set_transform(affine_to_cpu(unit));
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
            // The box spans the measured ascent above the baseline, extended
            // by the descent below it.
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                -metrics.ascent,
                metrics.width,
                metrics.descent,
            ));
        }

        // Glyph coordinates run from the layout's top edge; shift so the
        // first baseline lands on the anchor.
        ctx.set_transform(affine_to_cpu(unit * Affine::translate((0.0, -metrics.ascent))));
        draw_glyph_runs(ctx, &layout);

        if opacity < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }

    fn draw_map(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        overlay: &MapOverlay,
        snapshot: &MapSnapshot,
    ) -> OverprintResult<()> {
        let pos = overlay.position;

        let paint =
            rgba_premul_to_image(&snapshot.image.rgba8_premul, snapshot.image.width, snapshot.image.height)?;
        ctx.set_transform(affine_to_cpu(Affine::translate((pos.x, pos.y))));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(snapshot.image.width),
            f64::from(snapshot.image.height),
        ));

        for marker in &overlay.markers {
            let Some(coordinate) = marker.coordinate else {
                tracing::debug!("skipping map marker without a coordinate");
                continue;
            };
            let projected = (snapshot.projector)(coordinate);
            let tip = Point::new(pos.x + projected.x, pos.y + projected.y);
            self.draw_marker(ctx, marker, tip)?;
        }
        Ok(())
    }

    fn draw_marker(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        marker: &MapMarker,
        tip: Point,
    ) -> OverprintResult<()> {
        let size = marker
            .size
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(PIN_SIZE_PX);
        let color = marker
            .color
            .as_deref()
            .map(Rgba8::parse_or_black)
            .unwrap_or(Rgba8::PIN_RED);

        // Teardrop pin: a round head with a triangular tip resting on the
        // projected point.
        let head_radius = size * 0.32;
        let head_cy = tip.y - size + head_radius;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        fill_shape(ctx, &Circle::new((tip.x, head_cy), head_radius));

        let mut tip_path = kurbo::BezPath::new();
        tip_path.move_to((tip.x - head_radius * 0.8, head_cy + head_radius * 0.5));
        tip_path.line_to((tip.x + head_radius * 0.8, head_cy + head_radius * 0.5));
        tip_path.line_to((tip.x, tip.y));
        tip_path.close_path();
        ctx.fill_path(&bezpath_to_cpu(&tip_path));

        let Some(title) = marker.title.as_deref().filter(|t| !t.is_empty()) else {
            return Ok(());
        };

        let layout = self.text_engine.layout_plain(
            title,
            "sans-serif",
            TITLE_FONT_SIZE,
            FontWeight::Bold,
            TextBrushRgba8 {
                r: 0,
                g: 0,
                b: 0,
                a: 255,
            },
        )?;
        let metrics = TextLayoutEngine::measure(&layout);
        let text_height = metrics.ascent + metrics.descent;
        let box_width = metrics.width + 10.0;
        let box_height = text_height + 5.0;
        let box_x = tip.x - box_width / 2.0;
        let box_y = tip.y - size - box_height - TITLE_GAP_PX;

        let bg = Rgba8::WHITE.with_alpha_factor(0.7);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        fill_shape(
            ctx,
            &RoundedRect::new(
                box_x,
                box_y,
                box_x + box_width,
                box_y + box_height,
                TITLE_CORNER_RADIUS,
            ),
        );

        ctx.set_transform(affine_to_cpu(Affine::translate((box_x + 5.0, box_y + 2.5))));
        draw_glyph_runs(ctx, &layout);
        Ok(())
    }
}

/// Paint a resolved image (overlay or component) onto the surface.
///
/// `size` falls back to the image's natural size; rotation pivots around
/// the placed rect's center.
fn draw_image_like(
    ctx: &mut vello_cpu::RenderContext,
    pixels: &DecodedImage,
    position: Point,
    size: Option<Size>,
    opacity: f64,
    rotation: f64,
) -> OverprintResult<()> {
    let natural_w = f64::from(pixels.width);
    let natural_h = f64::from(pixels.height);
    if natural_w <= 0.0 || natural_h <= 0.0 {
        return Ok(());
    }

    let target = match size {
        Some(s) => Size::new(s.width, s.height)
            .map_err(|_| OverprintError::invalid_overlay("overlay size must be finite and > 0"))?,
        None => Size {
            width: natural_w,
            height: natural_h,
        },
    };
    let opacity = clamp_unit(opacity) as f32;
    if opacity <= 0.0 {
        return Ok(());
    }

    let mut tr = Affine::translate((position.x, position.y));
    if rotation != 0.0 {
        let center = Vec2::new(target.width / 2.0, target.height / 2.0);
        tr = tr * Affine::translate(center) * Affine::rotate(deg_to_rad(rotation))
            * Affine::translate(-center);
    }
    let tr = tr * Affine::scale_non_uniform(target.width / natural_w, target.height / natural_h);

    let paint = rgba_premul_to_image(&pixels.rgba8_premul, pixels.width, pixels.height)?;
    ctx.set_transform(affine_to_cpu(tr));
    ctx.set_paint(paint);
    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity);
    }
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, natural_w, natural_h));
    if opacity < 1.0 {
        ctx.pop_layer();
    }
    Ok(())
}

fn draw_glyph_runs(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<TextBrushRgba8>,
) {
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(run.run().font())
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn fill_shape(ctx: &mut vello_cpu::RenderContext, shape: &impl Shape) {
    let mut path = kurbo::BezPath::new();
    for el in shape.path_elements(0.1) {
        path.push(el);
    }
    ctx.fill_path(&bezpath_to_cpu(&path));
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> OverprintResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| OverprintError::validation("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| OverprintError::validation("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(OverprintError::validation("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> OverprintResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}
