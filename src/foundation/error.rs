/// Convenience result type used across the crate.
pub type OverprintResult<T> = Result<T, OverprintError>;

/// Top-level error taxonomy surfaced by engine APIs.
///
/// Structural failures (a source that cannot be resolved, a map provider
/// that cannot produce a snapshot, an encoder that produces no bytes) abort
/// the operation that requested them. Cosmetic problems (an unparseable
/// color string, a marker without a coordinate) degrade to documented
/// defaults and never appear here.
#[derive(thiserror::Error, Debug)]
pub enum OverprintError {
    /// Malformed or unsupported image source descriptor.
    #[error("invalid image source: {0}")]
    InvalidSource(String),

    /// The source was well-formed but its bytes could not be fetched or decoded.
    #[error("image source unavailable: {0}")]
    SourceUnavailable(String),

    /// The map snapshot provider failed or is not configured.
    #[error("map snapshot unavailable: {0}")]
    MapUnavailable(String),

    /// An overlay descriptor is structurally unusable.
    #[error("invalid overlay: {0}")]
    InvalidOverlay(String),

    /// The output encoder failed to produce bytes.
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// A facade operation was invoked before any base image was loaded.
    #[error("no image loaded: {0}")]
    NotLoaded(String),

    /// Invalid user-provided data or violated internal invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OverprintError {
    /// Build an [`OverprintError::InvalidSource`] value.
    pub fn invalid_source(msg: impl Into<String>) -> Self {
        Self::InvalidSource(msg.into())
    }

    /// Build an [`OverprintError::SourceUnavailable`] value.
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable(msg.into())
    }

    /// Build an [`OverprintError::MapUnavailable`] value.
    pub fn map_unavailable(msg: impl Into<String>) -> Self {
        Self::MapUnavailable(msg.into())
    }

    /// Build an [`OverprintError::InvalidOverlay`] value.
    pub fn invalid_overlay(msg: impl Into<String>) -> Self {
        Self::InvalidOverlay(msg.into())
    }

    /// Build an [`OverprintError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build an [`OverprintError::NotLoaded`] value.
    pub fn not_loaded(msg: impl Into<String>) -> Self {
        Self::NotLoaded(msg.into())
    }

    /// Build an [`OverprintError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
