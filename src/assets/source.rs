use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose};

use crate::{
    assets::decode::{DecodedImage, decode_image},
    foundation::error::{OverprintError, OverprintResult},
};

/// Where a base or overlay image comes from.
///
/// Exactly one tag is populated; hosts hand the engine JSON shaped as
/// `{"uri": ...}`, `{"base64": ...}` or `{"localFilePath": ...}`. Anything
/// else fails deserialization and surfaces as
/// [`OverprintError::InvalidSource`] at the entry point.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ImageSource {
    /// A URL: `file://`, `data:` or a plain filesystem path for the bundled
    /// resolver; network and platform schemes for host resolvers.
    Uri {
        /// The URL string.
        uri: String,
    },
    /// Raw base64-encoded image bytes, with or without a `data:` URI prefix.
    Base64 {
        /// The encoded payload.
        base64: String,
    },
    /// A local filesystem path.
    LocalFilePath {
        /// The path to the image file.
        #[serde(rename = "localFilePath")]
        local_file_path: PathBuf,
    },
}

impl ImageSource {
    /// Build a URI source.
    pub fn uri(uri: impl Into<String>) -> Self {
        Self::Uri { uri: uri.into() }
    }

    /// Build a base64 source.
    pub fn base64(payload: impl Into<String>) -> Self {
        Self::Base64 {
            base64: payload.into(),
        }
    }

    /// Build a local-file source.
    pub fn local_file(path: impl Into<PathBuf>) -> Self {
        Self::LocalFilePath {
            local_file_path: path.into(),
        }
    }

    /// Parse a source descriptor from host-supplied JSON.
    ///
    /// A shape carrying none of the three tags is malformed and fails with
    /// [`OverprintError::InvalidSource`].
    pub fn from_json(json: &str) -> OverprintResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| OverprintError::invalid_source(format!("parse image source: {e}")))
    }

    /// A caller-facing locator for result payloads.
    ///
    /// URIs pass through, local paths become `file://` locators, base64
    /// payloads have no address and map to an empty string (the behavior of
    /// the host bindings this engine replaces).
    pub fn display_locator(&self) -> String {
        match self {
            Self::Uri { uri } => uri.clone(),
            Self::LocalFilePath { local_file_path } => {
                format!("file://{}", local_file_path.display())
            }
            Self::Base64 { .. } => String::new(),
        }
    }
}

/// Resolves an [`ImageSource`] into decoded pixels plus natural size.
///
/// The compositor never embeds network or filesystem logic itself; it calls
/// this contract once per distinct source it needs to draw. Implementations
/// own any timeout policy.
pub trait SourceResolver: Send + Sync {
    /// Fetch and decode `source`.
    ///
    /// Fails with [`OverprintError::SourceUnavailable`] when the bytes
    /// cannot be fetched or decoded, [`OverprintError::InvalidSource`] when
    /// the descriptor itself is malformed.
    fn resolve(&self, source: &ImageSource) -> OverprintResult<DecodedImage>;
}

/// The bundled resolver: local filesystem paths, `file://` URIs, `data:`
/// URIs and raw base64.
///
/// Remote acquisition (`http(s)`, platform `content://`) is the host
/// adapter's job and reported as [`OverprintError::SourceUnavailable`] here.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiskSourceResolver;

impl DiskSourceResolver {
    /// Construct the resolver.
    pub fn new() -> Self {
        Self
    }

    fn load_from_uri(&self, uri: &str) -> OverprintResult<Vec<u8>> {
        if let Some(path) = uri.strip_prefix("file://") {
            return self.load_from_file(Path::new(path));
        }
        if let Some(rest) = uri.strip_prefix("data:") {
            return decode_data_uri_payload(rest);
        }

        match uri.split_once("://") {
            Some(("http" | "https" | "content", _)) => Err(OverprintError::source_unavailable(
                format!("'{uri}' requires a resolver with network/content support"),
            )),
            Some((scheme, _)) => Err(OverprintError::invalid_source(format!(
                "unsupported uri scheme '{scheme}'"
            ))),
            // No scheme: treat as a plain filesystem path.
            None => self.load_from_file(Path::new(uri)),
        }
    }

    fn load_from_file(&self, path: &Path) -> OverprintResult<Vec<u8>> {
        tracing::debug!(path = %path.display(), "reading image source from file");
        std::fs::read(path).map_err(|e| {
            OverprintError::source_unavailable(format!("read '{}': {e}", path.display()))
        })
    }

    fn load_from_base64(&self, payload: &str) -> OverprintResult<Vec<u8>> {
        // Accept both a raw payload and a full data URI.
        let payload = match payload.split_once("base64,") {
            Some((_, rest)) => rest,
            None => payload,
        };
        let payload: String = payload.split_whitespace().collect();
        if payload.is_empty() {
            return Err(OverprintError::invalid_source("empty base64 payload"));
        }
        general_purpose::STANDARD
            .decode(payload.as_bytes())
            .map_err(|e| OverprintError::source_unavailable(format!("decode base64: {e}")))
    }
}

impl SourceResolver for DiskSourceResolver {
    fn resolve(&self, source: &ImageSource) -> OverprintResult<DecodedImage> {
        let bytes = match source {
            ImageSource::Uri { uri } => self.load_from_uri(uri)?,
            ImageSource::Base64 { base64 } => self.load_from_base64(base64)?,
            ImageSource::LocalFilePath { local_file_path } => {
                self.load_from_file(local_file_path)?
            }
        };

        decode_image(&bytes)
            .map_err(|e| OverprintError::source_unavailable(format!("decode image bytes: {e}")))
    }
}

fn decode_data_uri_payload(rest: &str) -> OverprintResult<Vec<u8>> {
    let Some((_, payload)) = rest.split_once("base64,") else {
        return Err(OverprintError::invalid_source(
            "data uri must carry a base64 payload",
        ));
    };
    let payload: String = payload.split_whitespace().collect();
    general_purpose::STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| OverprintError::source_unavailable(format!("decode data uri: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
