//! Channel remapping: mono -> stereo duplication, 5.1 -> stereo down-mix.

use crate::error::PipelineError;
use crate::fixed_float::{normalize_sample, quantize_sample, read_fixed_sample, write_fixed_sample};
use crate::format::{Encoding, SampleFormat};

/// Fixed 2x6 down-mix matrix, `[output_channel][source_channel]`, source
/// order `{L, R, C, LFE, Ls, Rs}`.
const DOWNMIX_MATRIX: [[f64; 6]; 2] = [
    [1.000, 0.000, 0.707, 0.707, -0.8165, -0.5774],
    [0.000, 1.000, 0.707, 0.707, 0.5774, 0.8165],
];

/// Normalization scalar chosen to prevent clipping under worst-case matrix
/// loading.
const DOWNMIX_SCALAR: f64 = 0.2626;

/// Sample encodings the 5.1 down-mix understands directly.
#[must_use]
pub fn supports_5_1_encoding(encoding: Encoding) -> bool {
    matches!(encoding, Encoding::S16 | Encoding::S32 | Encoding::Float32)
}

/// Duplicate each mono sample into both stereo channels. Output is exactly
/// twice the input size in bytes; format is unchanged.
pub fn mono_to_stereo(input: &[u8], format: SampleFormat) -> Result<Vec<u8>, PipelineError> {
    let width = format.bytes_per_sample();
    if input.len() % width != 0 {
        return Err(PipelineError::UnsupportedFormat(format!(
            "buffer length {} is not a multiple of sample width {}",
            input.len(),
            width
        )));
    }

    let mut out = Vec::with_capacity(input.len() * 2);
    for sample in input.chunks_exact(width) {
        out.extend_from_slice(sample);
        out.extend_from_slice(sample);
    }
    Ok(out)
}

/// Down-mix interleaved 5.1 frames to stereo via the fixed matrix. Promotes
/// to `f64` for the accumulation regardless of the source encoding, per
/// §9's overflow-avoidance note, then clamps and quantizes back.
///
/// Output buffer size is exactly one-third of the input size in bytes.
pub fn downmix_5_1_to_stereo(
    input: &[u8],
    format: SampleFormat,
) -> Result<Vec<u8>, PipelineError> {
    if !supports_5_1_encoding(format.encoding) {
        return Err(PipelineError::UnsupportedChannelLayout(format!(
            "{}",
            format.encoding
        )));
    }

    let width = format.bytes_per_sample();
    let frame_bytes = width * 6;
    if input.len() % frame_bytes != 0 {
        return Err(PipelineError::UnsupportedFormat(format!(
            "buffer length {} is not a multiple of the 5.1 frame size {}",
            input.len(),
            frame_bytes
        )));
    }

    let mut out = Vec::with_capacity(input.len() / 3);

    for frame in input.chunks_exact(frame_bytes) {
        let mut src = [0.0f64; 6];
        for (ch, sample_bytes) in frame.chunks_exact(width).enumerate() {
            src[ch] = if format.is_float() {
                f64::from(f32::from_ne_bytes([
                    sample_bytes[0],
                    sample_bytes[1],
                    sample_bytes[2],
                    sample_bytes[3],
                ]))
            } else {
                f64::from(normalize_sample(
                    read_fixed_sample(sample_bytes, format.encoding),
                    format.encoding,
                ))
            };
        }

        for out_ch in 0..2 {
            let mixed: f64 = DOWNMIX_MATRIX[out_ch]
                .iter()
                .zip(src.iter())
                .map(|(coeff, sample)| coeff * sample)
                .sum::<f64>()
                * DOWNMIX_SCALAR;
            let clamped = mixed.clamp(-1.0, 1.0) as f32;

            if format.is_float() {
                out.extend_from_slice(&clamped.to_ne_bytes());
            } else {
                let q = quantize_sample(clamped, format.encoding);
                write_fixed_sample(&mut out, q, format.encoding);
            }
        }
    }

    Ok(out)
}
