//! Map snapshot collaborator interface.

/// Snapshot request/response types and the provider seam.
pub mod snapshot;
