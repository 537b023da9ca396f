//! Conversion descriptor: the opaque handle owning one pipeline's state.

use crate::format::SoundParams;
use crate::resampling::Resampler;

/// Owned state for one source->target conversion, built once per playback
/// session and driven by repeated [`crate::pipeline::convert`] calls.
///
/// Holds no interior mutability, so it is `Send` but not `Sync` by
/// construction: exactly one producer thread is expected to own it for its
/// entire lifetime (§5).
pub struct ConversionDescriptor {
    pub(crate) from: SoundParams,
    pub(crate) to: SoundParams,
    /// Present only if `from.sample_rate != to.sample_rate`.
    pub(crate) resampler: Option<Resampler>,
    /// Input frames (interleaved, `from.channels` wide) accepted but not
    /// yet consumed by the resampler. Always a whole number of frames.
    pub(crate) carry_buffer: Vec<f32>,
}

impl ConversionDescriptor {
    pub(crate) fn new(from: SoundParams, to: SoundParams, resampler: Option<Resampler>) -> Self {
        Self {
            from,
            to,
            resampler,
            carry_buffer: Vec::new(),
        }
    }

    /// Source sound parameters this descriptor was built for.
    #[must_use]
    pub fn from_params(&self) -> SoundParams {
        self.from
    }

    /// Target sound parameters this descriptor was built for.
    #[must_use]
    pub fn to_params(&self) -> SoundParams {
        self.to
    }

    /// Number of carried-over float samples currently held across calls.
    #[must_use]
    pub fn carry_len(&self) -> usize {
        self.carry_buffer.len()
    }
}
