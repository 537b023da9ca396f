//! The pipeline orchestrator: `build`, `convert`, and the ordered stage
//! decision tree described in §4.H.

use crate::channel;
use crate::endian;
use crate::error::PipelineError;
use crate::fastpath;
use crate::fixed_float;
use crate::format::{Encoding, SampleFormat, SoundParams};
use crate::options::{ResampleMethod, ResampleOptions};
use crate::resampling::{Resampler, ResamplerBackend, ResamplingQuality};
use crate::sign;
use log::{debug, trace, warn};

use super::descriptor::ConversionDescriptor;

fn validate_channel_conversion(from: u16, to: u16) -> Result<(), PipelineError> {
    let ok = matches!((from, to), (1, 2) | (6, 2))
        || (from == to && matches!(from, 1 | 2 | 6));
    if ok {
        Ok(())
    } else {
        Err(PipelineError::UnsupportedChannelConversion { from, to })
    }
}

fn method_quality(method: ResampleMethod) -> ResamplingQuality {
    match method {
        ResampleMethod::SincBestQuality => ResamplingQuality::Maximum,
        ResampleMethod::SincMediumQuality => ResamplingQuality::Balanced,
        ResampleMethod::SincFastest => ResamplingQuality::Fast,
        // Neither zero-order-hold nor linear interpolation has a distinct
        // quality preset in the rubato backend; both map to its fastest
        // fixed-ratio path.
        ResampleMethod::ZeroOrderHold | ResampleMethod::Linear => ResamplingQuality::Fast,
    }
}

fn zita_quality(level: u32) -> ResamplingQuality {
    match level {
        0 => ResamplingQuality::Fast,
        1 => ResamplingQuality::Balanced,
        2 => ResamplingQuality::High,
        _ => ResamplingQuality::Maximum,
    }
}

fn build_resampler(
    from: &SoundParams,
    to: &SoundParams,
    options: &dyn ResampleOptions,
) -> Result<Resampler, PipelineError> {
    if !options.enable_resample() {
        return Err(PipelineError::ResamplingDisabled {
            from: from.sample_rate,
            to: to.sample_rate,
        });
    }

    let (backend, quality) = if let Some(level) = options.zita_resample_quality() {
        (ResamplerBackend::R8Brain, zita_quality(level))
    } else {
        let method = ResampleMethod::from_str_ci(options.resample_method())?;
        (ResamplerBackend::Rubato, method_quality(method))
    };

    Resampler::new(
        backend,
        from.sample_rate,
        to.sample_rate,
        from.channels as usize,
        quality,
    )
    .map_err(PipelineError::from)
}

/// Build a conversion descriptor for `from -> to`, per §4.H's construction
/// contract. `from` and `to` must differ in at least one field: requesting
/// an identical pair is a programmer error (§3's invariant), not a
/// recoverable one.
pub fn build(
    from: SoundParams,
    to: SoundParams,
    options: &dyn ResampleOptions,
) -> Result<ConversionDescriptor, PipelineError> {
    assert_ne!(
        from, to,
        "build() requires from and to to differ in at least one field"
    );

    validate_channel_conversion(from.channels, to.channels)?;

    let resampler = if from.sample_rate != to.sample_rate {
        debug!(
            "building resampler {} Hz -> {} Hz ({} ch, method {:?})",
            from.sample_rate,
            to.sample_rate,
            from.channels,
            options.zita_resample_quality()
        );
        Some(build_resampler(&from, &to, options)?)
    } else {
        None
    };

    debug!(
        "built conversion descriptor: {} {}Hz/{}ch -> {} {}Hz/{}ch",
        from.format.encoding,
        from.sample_rate,
        from.channels,
        to.format.encoding,
        to.sample_rate,
        to.channels
    );

    Ok(ConversionDescriptor::new(from, to, resampler))
}

/// Working buffer threaded through the stage pipeline: either raw
/// fixed-point bytes or interleaved float samples, whichever the current
/// stage produced.
enum Working {
    Bytes(Vec<u8>),
    Floats(Vec<f32>),
}

impl Working {
    fn into_floats(self, format: SampleFormat) -> Result<Vec<f32>, PipelineError> {
        match self {
            Working::Floats(f) => Ok(f),
            Working::Bytes(b) => fixed_float::to_float(&b, format),
        }
    }

    fn into_bytes(self) -> Vec<u8> {
        match self {
            Working::Bytes(b) => b,
            Working::Floats(f) => f.iter().flat_map(|v| v.to_ne_bytes()).collect(),
        }
    }
}

impl ConversionDescriptor {
    /// Drive `input` through the ordered conversion stages and return a
    /// freshly allocated output buffer. The caller's `input` is never
    /// written to.
    pub fn convert(&mut self, input: &[u8]) -> Result<Vec<u8>, PipelineError> {
        let from = self.from;
        let to = self.to;

        // Stage 1: normalize endianness.
        let mut current_fmt = from.format;
        let mut working: Working = {
            let mut bytes = input.to_vec();
            if !current_fmt.is_native() {
                endian::swap_to_native(&mut bytes, current_fmt)?;
                current_fmt = current_fmt.with_endianness(crate::format::Endianness::native());
            }
            Working::Bytes(bytes)
        };

        // A float source is already sample data, not bytes awaiting
        // quantization; reinterpret immediately so every later stage can
        // rely on `Working::Floats` whenever `current_fmt` is float.
        if current_fmt.is_float() {
            if let Working::Bytes(bytes) = &working {
                let floats = bytes
                    .chunks_exact(4)
                    .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
                    .collect();
                working = Working::Floats(floats);
            }
        }

        // Stage 2: fast-path reducer, only at equal rates and matching
        // signedness.
        if from.sample_rate == to.sample_rate
            && current_fmt.is_signed() == to.format.is_signed()
            && fastpath::classify(current_fmt.encoding, to.format.encoding).is_some()
        {
            if let Working::Bytes(bytes) = &working {
                trace!(
                    "fast path {} -> {} ({} bytes)",
                    current_fmt.encoding,
                    to.format.encoding,
                    bytes.len()
                );
                let reduced = fastpath::reduce(bytes, current_fmt.encoding, to.format.encoding)?;
                working = Working::Bytes(reduced);
                current_fmt = current_fmt.with_encoding(to.format.encoding);
            }
        }

        // Stage 3: convert to float if rates differ, target is float, or a
        // width/container change remains that the fast path didn't already
        // resolve. `bit_width()` alone doesn't distinguish S24's 4-byte
        // padded container from S24Packed's 3-byte one, so a container
        // mismatch at the same bit width (e.g. S24 -> S24Packed) must also
        // route through the float round-trip rather than falling through to
        // stage 5's sign-flip-or-fail branch.
        let rates_differ = from.sample_rate != to.sample_rate;
        let need_float = !current_fmt.is_float()
            && (rates_differ
                || to.format.is_float()
                || current_fmt.bit_width() != to.format.bit_width()
                || current_fmt.encoding.is_packed_24() != to.format.encoding.is_packed_24());

        if need_float {
            let floats = working.into_floats(current_fmt)?;
            working = Working::Floats(floats);
            current_fmt = SampleFormat::float32_native();
        }

        // Stage 4: resample.
        if rates_differ {
            let resampler = self
                .resampler
                .as_mut()
                .expect("resampler must exist whenever rates differ");

            let fresh = working.into_floats(current_fmt)?;
            let mut combined = std::mem::take(&mut self.carry_buffer);
            combined.extend_from_slice(&fresh);

            let (produced, consumed_frames) = resampler.process_counted(&combined).map_err(|e| {
                PipelineError::ResampleFailed(e.to_string())
            })?;

            let channels = from.channels as usize;
            let consumed_samples = consumed_frames * channels;
            self.carry_buffer = combined[consumed_samples..].to_vec();

            trace!(
                "resampled {} frames, carrying {} samples into next call",
                consumed_frames,
                self.carry_buffer.len()
            );

            working = Working::Floats(produced);
        }

        // Stage 5: float -> target encoding, or a sign-only flip.
        match working {
            Working::Floats(floats) if !to.format.is_float() => {
                let target_native = SampleFormat::new(
                    to.format.encoding,
                    crate::format::Endianness::native(),
                );
                let bytes = fixed_float::from_float(&floats, target_native)?;
                working = Working::Bytes(bytes);
                current_fmt = target_native;
            }
            Working::Bytes(mut bytes) => {
                if current_fmt.encoding != to.format.encoding {
                    if current_fmt.bit_width() == to.format.bit_width()
                        && current_fmt.is_signed() != to.format.is_signed()
                    {
                        current_fmt = sign::flip_sign(&mut bytes, current_fmt)?;
                    } else {
                        warn!(
                            "unreconcilable encoding mismatch {} -> {} after stage 5",
                            current_fmt.encoding, to.format.encoding
                        );
                        return Err(PipelineError::UnsupportedFormat(format!(
                            "cannot reconcile {} with target {} without a float round-trip",
                            current_fmt.encoding, to.format.encoding
                        )));
                    }
                }
                working = Working::Bytes(bytes);
            }
            other => working = other,
        }

        // Stage 6: channel remap.
        let mut bytes = working.into_bytes();
        if from.channels != to.channels {
            bytes = match (from.channels, to.channels) {
                (1, 2) => channel::mono_to_stereo(&bytes, current_fmt)?,
                (6, 2) => channel::downmix_5_1_to_stereo(&bytes, current_fmt)?,
                _ => {
                    return Err(PipelineError::UnsupportedChannelConversion {
                        from: from.channels,
                        to: to.channels,
                    })
                }
            };
        }

        // Stage 7: endianness fix-up to the declared target endianness.
        if !to.format.is_native() {
            endian::swap(&mut bytes, to.format)?;
        }

        Ok(bytes)
    }
}
