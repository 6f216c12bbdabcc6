//! The compositing pipeline.

/// The overlay compositor.
pub mod compositor;
/// Finished-surface readback.
pub mod frame;
/// Text layout and measurement.
pub mod text;
