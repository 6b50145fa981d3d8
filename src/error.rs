//! Error types.
//!
//! Only configuration and control-thread lookups can fail. Rendering never
//! returns an error.

use thiserror::Error;

/// Result type for kernel operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by configuration and parameter lookups.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// Numeric address does not name a parameter.
    #[error("unknown parameter address: {0}")]
    UnknownParameterAddress(u64),

    /// Index does not name a factory preset.
    #[error("unknown factory preset: {0}")]
    UnknownPreset(usize),

    /// Sample rate is zero, negative or not finite.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f64),

    /// Channel count is zero.
    #[error("invalid channel count: {0}")]
    InvalidChannelCount(usize),

    /// Maximum frames per render call is zero.
    #[error("invalid maximum frame count: {0}")]
    InvalidMaxFrames(usize),
}
