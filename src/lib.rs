//! Overprint composites overlays onto a base raster image and exports the
//! flattened result.
//!
//! Application code describes a layered edit declaratively — a base photo
//! plus text labels, stickers, a map snippet, pre-rasterized UI components —
//! and receives back a single encoded image and its locator.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: every overlay source goes through the [`SourceResolver`]
//!    seam (concurrently); map overlays go through a [`MapSnapshotProvider`].
//! 2. **Composite**: the [`Compositor`] paints the base image and then each
//!    overlay category in the fixed contractual order
//!    text → images → map → components onto one surface sized exactly to the
//!    base.
//! 3. **Encode**: the finished surface flattens to PNG (lossless) or JPEG
//!    (quality-scaled) bytes.
//! 4. **Persist**: bytes go to a [`StorageSink`], whose locator is returned.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No IO in the paint loop**: acquisition is front-loaded through the
//!   resolver/provider seams; compositing itself never suspends.
//! - **Premultiplied RGBA8 end-to-end**: decoded sources, the surface, and
//!   the readback all carry premultiplied pixels; the encoder
//!   un-premultiplies on the way out.
//! - **Fail-fast**: the first structural failure (source, snapshot, encode)
//!   aborts the render; cosmetic problems degrade to documented defaults.
//!
//! # Getting started
//!
//! ```no_run
//! use overprint::{ImageEditor, ImageSource, ModifyImageOptions};
//!
//! let mut editor = ImageEditor::with_defaults();
//! let options = ModifyImageOptions::new(ImageSource::local_file("/tmp/photo.jpg"));
//! let result = editor.modify_image(&options)?;
//! println!("{} ({}x{})", result.uri, result.width, result.height);
//! # Ok::<(), overprint::OverprintError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod editor;
mod encode;
mod foundation;
mod map;
mod overlay;
mod render;

pub use assets::decode::{DecodedImage, decode_image};
pub use assets::source::{DiskSourceResolver, ImageSource, SourceResolver};
pub use editor::facade::ImageEditor;
pub use editor::options::{ModifiedImageResult, ModifyImageOptions, RenderOptions};
pub use encode::raster::{OutputFormat, encode_frame};
pub use encode::sink::{InMemorySink, PersistedArtifact, StorageSink, TempDirSink};
pub use foundation::color::Rgba8;
pub use foundation::core::{Point, Size, clamp_unit};
pub use foundation::error::{OverprintError, OverprintResult};
pub use map::snapshot::{
    GeoCoordinate, GeoProjector, MapSnapshot, MapSnapshotProvider, MapSnapshotRequest,
};
pub use overlay::model::{
    ComponentOverlay, FontWeight, ImageOverlay, MapMarker, MapOverlay, MapStyle, OverlaySet,
    TextOverlay, TextStyle,
};
pub use render::compositor::Compositor;
pub use render::frame::FrameRgba;
pub use render::text::{TextBrushRgba8, TextLayoutEngine, TextMetrics};
