use crate::{
    assets::decode::DecodedImage,
    assets::source::{DiskSourceResolver, ImageSource, SourceResolver},
    editor::options::{ModifiedImageResult, ModifyImageOptions, RenderOptions},
    encode::raster::encode_frame,
    encode::sink::{StorageSink, TempDirSink},
    foundation::error::{OverprintError, OverprintResult},
    map::snapshot::MapSnapshotProvider,
    overlay::model::{ComponentOverlay, ImageOverlay, MapMarker, MapOverlay, OverlaySet, TextOverlay},
    render::compositor::Compositor,
};

struct LoadedBase {
    locator: String,
    image: DecodedImage,
}

/// Stateful editing facade: load a base image, accumulate overlays, render.
///
/// State machine: `Empty → Loaded(+overlays)*`. A render never consumes
/// state — the editor stays `Loaded` so further overlays and repeat renders
/// are possible. Loading a new base image discards all accumulated overlays.
///
/// A single editor drives one render at a time; overlay lists are not
/// synchronized for concurrent mutation.
pub struct ImageEditor {
    resolver: Box<dyn SourceResolver>,
    maps: Option<Box<dyn MapSnapshotProvider>>,
    sink: Box<dyn StorageSink>,
    base: Option<LoadedBase>,
    overlays: OverlaySet,
}

impl ImageEditor {
    /// Construct an editor over explicit collaborators.
    pub fn new(
        resolver: Box<dyn SourceResolver>,
        maps: Option<Box<dyn MapSnapshotProvider>>,
        sink: Box<dyn StorageSink>,
    ) -> Self {
        Self {
            resolver,
            maps,
            sink,
            base: None,
            overlays: OverlaySet::default(),
        }
    }

    /// Editor with the bundled disk resolver and temp-dir sink, no map
    /// provider.
    pub fn with_defaults() -> Self {
        Self::new(
            Box::new(DiskSourceResolver::new()),
            None,
            Box::new(TempDirSink::new()),
        )
    }

    /// True once a base image has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.base.is_some()
    }

    /// The accumulated overlays.
    pub fn overlays(&self) -> &OverlaySet {
        &self.overlays
    }

    /// Resolve `source` as the new base image and report its natural size.
    ///
    /// Discards any previously accumulated overlays.
    #[tracing::instrument(skip_all)]
    pub fn load_image(&mut self, source: &ImageSource) -> OverprintResult<ModifiedImageResult> {
        let image = self.resolver.resolve(source)?;
        tracing::debug!(width = image.width, height = image.height, "base image loaded");

        let locator = source.display_locator();
        let result = ModifiedImageResult {
            uri: locator.clone(),
            width: image.width,
            height: image.height,
        };
        self.overlays = OverlaySet::default();
        self.base = Some(LoadedBase { locator, image });
        Ok(result)
    }

    /// Append a text overlay.
    pub fn add_text(&mut self, overlay: TextOverlay) -> OverprintResult<()> {
        self.require_loaded("add_text")?;
        self.overlays.text.push(overlay);
        Ok(())
    }

    /// Append an image overlay.
    pub fn add_image(&mut self, overlay: ImageOverlay) -> OverprintResult<()> {
        self.require_loaded("add_image")?;
        self.overlays.images.push(overlay);
        Ok(())
    }

    /// Append a component overlay.
    pub fn add_component(&mut self, overlay: ComponentOverlay) -> OverprintResult<()> {
        self.require_loaded("add_component")?;
        self.overlays.components.push(overlay);
        Ok(())
    }

    /// Set (or replace) the map overlay.
    pub fn set_map(&mut self, overlay: MapOverlay) -> OverprintResult<()> {
        self.require_loaded("set_map")?;
        self.overlays.map = Some(overlay);
        Ok(())
    }

    /// Append a marker to the current map overlay.
    pub fn add_marker(&mut self, marker: MapMarker) -> OverprintResult<()> {
        self.require_loaded("add_marker")?;
        let map = self.overlays.map.as_mut().ok_or_else(|| {
            OverprintError::invalid_overlay("add_marker requires a map overlay to be set")
        })?;
        map.markers.push(marker);
        Ok(())
    }

    /// Reset the overlay lists without touching the base image.
    pub fn clear_overlays(&mut self) {
        self.overlays = OverlaySet::default();
    }

    /// Composite, encode and persist against the accumulated state.
    #[tracing::instrument(skip_all, fields(format = ?options.output_format))]
    pub fn render(&mut self, options: &RenderOptions) -> OverprintResult<ModifiedImageResult> {
        let base = self
            .base
            .as_ref()
            .ok_or_else(|| OverprintError::not_loaded("render requires a loaded image"))?;

        let mut compositor = Compositor::new(self.resolver.as_ref(), self.maps.as_deref());
        let frame = compositor.render(&base.image, &self.overlays)?;
        let bytes = encode_frame(&frame, options.output_format, options.quality)?;
        let uri = self.sink.persist(&bytes, options.output_format.extension())?;

        tracing::debug!(uri = %uri, "render persisted");
        Ok(ModifiedImageResult {
            uri,
            width: frame.width,
            height: frame.height,
        })
    }

    /// One-shot entry point: load `options.source`, replace the overlays,
    /// render with the requested output settings.
    pub fn modify_image(
        &mut self,
        options: &ModifyImageOptions,
    ) -> OverprintResult<ModifiedImageResult> {
        self.load_image(&options.source)?;
        self.overlays = options.overlays.clone();
        self.render(&RenderOptions {
            output_format: options.output_format,
            quality: options.quality,
        })
    }

    /// Locator of the currently loaded base image, if any.
    pub fn base_locator(&self) -> Option<&str> {
        self.base.as_ref().map(|b| b.locator.as_str())
    }

    fn require_loaded(&self, op: &str) -> OverprintResult<()> {
        if self.base.is_none() {
            return Err(OverprintError::not_loaded(format!(
                "{op} requires a loaded image"
            )));
        }
        Ok(())
    }
}
