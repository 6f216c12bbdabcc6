use crate::{
    assets::decode::DecodedImage,
    foundation::core::{Point, Size},
    foundation::error::OverprintResult,
};

/// A geographic coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoCoordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Construct a coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// What the compositor asks a provider to render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapSnapshotRequest {
    /// Geographic center of the snapshot.
    pub center: GeoCoordinate,
    /// Zoom level.
    pub zoom_level: f64,
    /// Snapshot dimensions in pixels.
    pub size: Size,
}

/// Projects a geographic coordinate to a pixel offset within a snapshot's
/// own coordinate space.
pub type GeoProjector = Box<dyn Fn(GeoCoordinate) -> Point + Send + Sync>;

/// A rendered map snapshot plus its coordinate projection.
pub struct MapSnapshot {
    /// The snapshot raster, natural size equal to the requested size.
    pub image: DecodedImage,
    /// Maps geographic coordinates into `image`'s pixel space.
    pub projector: GeoProjector,
}

impl std::fmt::Debug for MapSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapSnapshot")
            .field("width", &self.image.width)
            .field("height", &self.image.height)
            .finish()
    }
}

/// Produces map snapshots for map overlays.
///
/// Tile rendering and geocoding live behind this seam; the compositor only
/// consumes the returned raster and projection. Failure surfaces as
/// [`crate::OverprintError::MapUnavailable`] and, under the fail-fast
/// policy, aborts the render that requested the snapshot. Implementations
/// own any timeout policy.
pub trait MapSnapshotProvider: Send + Sync {
    /// Render a snapshot for `request`.
    fn snapshot(&self, request: &MapSnapshotRequest) -> OverprintResult<MapSnapshot>;
}
