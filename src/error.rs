//! Error types for the conversion pipeline.
use thiserror::Error;

use crate::resampling::ResamplingError;

/// Result type alias using [`PipelineError`]
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors raised while building or driving a conversion pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Requested channel mapping isn't one of `{eq, 1->2, 6->2}`.
    #[error("unsupported channel conversion: {from} -> {to} channels")]
    UnsupportedChannelConversion {
        /// Source channel count.
        from: u16,
        /// Target channel count.
        to: u16,
    },

    /// Sample rates differ but resampling was disabled via configuration.
    #[error("resampling disabled but rates differ ({from} Hz -> {to} Hz)")]
    ResamplingDisabled {
        /// Source sample rate in Hz.
        from: u32,
        /// Target sample rate in Hz.
        to: u32,
    },

    /// `ResampleMethod` option did not match a recognized method name.
    #[error("unknown resample method: {0}")]
    UnknownResampleMethod(String),

    /// The underlying resampler rejected its construction parameters.
    #[error("resampler initialization failed: {0}")]
    ResamplerInitFailed(String),

    /// A resample step failed at runtime.
    #[error("resample step failed: {0}")]
    ResampleFailed(String),

    /// Encountered a sample encoding outside the supported set.
    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Channel remap was asked to handle an encoding it doesn't implement.
    #[error("unsupported channel layout for encoding: {0}")]
    UnsupportedChannelLayout(String),
}

impl From<ResamplingError> for PipelineError {
    fn from(err: ResamplingError) -> Self {
        match err {
            ResamplingError::InitializationFailed(msg) => PipelineError::ResamplerInitFailed(msg),
            other => PipelineError::ResampleFailed(other.to_string()),
        }
    }
}
