use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context;

use crate::foundation::error::OverprintResult;

/// Persists encoded output bytes and returns an addressable locator.
///
/// The engine does not care about the concrete storage backend; hosts may
/// write temp files, app caches, or object stores.
pub trait StorageSink: Send + Sync {
    /// Persist `bytes` under a name carrying `extension`, returning the
    /// locator handed back to the caller.
    fn persist(&self, bytes: &[u8], extension: &str) -> OverprintResult<String>;
}

static SEQ: AtomicU64 = AtomicU64::new(0);

/// Writes output into a directory (the system temp dir by default) and
/// returns `file://` locators.
#[derive(Clone, Debug)]
pub struct TempDirSink {
    dir: PathBuf,
}

impl Default for TempDirSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TempDirSink {
    /// Sink writing into the system temp directory.
    pub fn new() -> Self {
        Self {
            dir: std::env::temp_dir(),
        }
    }

    /// Sink writing into a caller-chosen directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl StorageSink for TempDirSink {
    fn persist(&self, bytes: &[u8], extension: &str) -> OverprintResult<String> {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let name = format!(
            "overprint-{}-{}-{}.{}",
            std::process::id(),
            nanos,
            SEQ.fetch_add(1, Ordering::Relaxed),
            extension
        );
        let path = self.dir.join(name);
        std::fs::write(&path, bytes)
            .with_context(|| format!("write output to '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "persisted output");
        Ok(format!("file://{}", path.display()))
    }
}

/// One artifact captured by [`InMemorySink`].
#[derive(Clone, Debug)]
pub struct PersistedArtifact {
    /// Locator returned to the caller.
    pub locator: String,
    /// Extension the engine asked for.
    pub extension: String,
    /// Encoded output bytes.
    pub bytes: Vec<u8>,
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    artifacts: Mutex<Vec<PersistedArtifact>>,
}

impl InMemorySink {
    /// Create a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the captured artifacts.
    pub fn artifacts(&self) -> Vec<PersistedArtifact> {
        self.artifacts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl StorageSink for InMemorySink {
    fn persist(&self, bytes: &[u8], extension: &str) -> OverprintResult<String> {
        let mut artifacts = self.artifacts.lock().unwrap_or_else(|e| e.into_inner());
        let locator = format!("mem://{}.{extension}", artifacts.len());
        artifacts.push(PersistedArtifact {
            locator: locator.clone(),
            extension: extension.to_string(),
            bytes: bytes.to_vec(),
        });
        Ok(locator)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
