//! The stateful editing facade and its option types.

/// The editor facade.
pub mod facade;
/// Entry-point option and result types.
pub mod options;
