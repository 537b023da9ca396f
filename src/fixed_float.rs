//! Lossy quantization between integer PCM and normalized `[-1.0, 1.0]` float.
//!
//! Byte layout convention: every width other than 24-packed is read/written
//! in host-native order (`to_ne_bytes`/`from_ne_bytes`); the later
//! [`crate::endian`] stage is responsible for converting to/from the
//! declared wire endianness. 24-packed samples are constructed and read via
//! explicit little-endian byte shifts, per the fixed convention the
//! fast-path reducers (4.E) also rely on.

use crate::error::PipelineError;
use crate::format::{Encoding, SampleFormat};

const INT32_MAX_F: f64 = i32::MAX as f64;
const S24_MAX_F: f64 = ((1i32 << 23) - 1) as f64;

fn full_scale(encoding: Encoding) -> f64 {
    if encoding.bit_width() == 24 {
        S24_MAX_F
    } else {
        INT32_MAX_F
    }
}

/// Round half-to-even (banker's rounding), hand-rolled to avoid relying on
/// a newer-than-MSRV standard library rounding mode.
fn round_half_to_even(x: f64) -> f64 {
    let floor = x.floor();
    let diff = x - floor;
    if diff < 0.5 {
        floor
    } else if diff > 0.5 {
        floor + 1.0
    } else if (floor as i64) % 2 == 0 {
        floor
    } else {
        floor + 1.0
    }
}

/// Quantize one normalized float sample to a fixed-point integer for
/// `encoding`, per §4.D: scale, clamp, round-half-to-even, shift for
/// narrower widths, then add the unsigned offset.
#[must_use]
pub fn quantize_sample(x: f32, encoding: Encoding) -> i64 {
    let scale = full_scale(encoding);
    let scaled = f64::from(x) * scale;
    let clamped = scaled.clamp(-scale, scale);
    let rounded = round_half_to_even(clamped) as i64;

    let shifted = match encoding.bit_width() {
        8 => rounded >> 24,
        16 => rounded >> 16,
        _ => rounded,
    };

    if encoding.is_signed() {
        shifted
    } else {
        let offset: i64 = 1i64 << (encoding.bit_width() - 1);
        shifted + offset
    }
}

/// Normalize one fixed-point integer (already read as a signed value via
/// [`read_fixed_sample`]) to a float in `[-1.0, 1.0)`, per §4.D.
#[must_use]
pub fn normalize_sample(raw: i64, encoding: Encoding) -> f32 {
    let width = encoding.bit_width();
    let centered = if encoding.is_signed() {
        raw as f64
    } else {
        let offset: i64 = 1i64 << (width - 1);
        (raw - offset) as f64
    };
    let max_plus_one = (1i64 << (width - 1)) as f64;
    (centered / max_plus_one) as f32
}

/// Write one quantized sample's bytes for `encoding` into `out`.
pub fn write_fixed_sample(out: &mut Vec<u8>, value: i64, encoding: Encoding) {
    match encoding {
        Encoding::U8 | Encoding::S8 => out.push(value as u8),
        Encoding::U16 | Encoding::S16 => out.extend_from_slice(&(value as u16).to_ne_bytes()),
        Encoding::U24 | Encoding::S24 => out.extend_from_slice(&(value as i32).to_ne_bytes()),
        Encoding::U24Packed | Encoding::S24Packed => {
            let v = value as i32;
            out.push((v & 0xFF) as u8);
            out.push(((v >> 8) & 0xFF) as u8);
            out.push(((v >> 16) & 0xFF) as u8);
        }
        Encoding::U32 | Encoding::S32 => out.extend_from_slice(&(value as u32).to_ne_bytes()),
        Encoding::Float32 => unreachable!("float samples never go through write_fixed_sample"),
    }
}

/// Read one native-layout fixed sample as a signed integer, sign-extending
/// 24-bit values and keeping unsigned values non-negative.
#[must_use]
pub fn read_fixed_sample(bytes: &[u8], encoding: Encoding) -> i64 {
    match encoding {
        Encoding::U8 => i64::from(bytes[0]),
        Encoding::S8 => i64::from(bytes[0] as i8),
        Encoding::U16 => i64::from(u16::from_ne_bytes([bytes[0], bytes[1]])),
        Encoding::S16 => i64::from(i16::from_ne_bytes([bytes[0], bytes[1]])),
        Encoding::U24 => {
            let v = i32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            i64::from(v) & 0x00FF_FFFF
        }
        Encoding::S24 => {
            let v = i32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            i64::from((v << 8) >> 8)
        }
        Encoding::U24Packed => {
            i64::from(bytes[0]) | (i64::from(bytes[1]) << 8) | (i64::from(bytes[2]) << 16)
        }
        Encoding::S24Packed => {
            let v = i32::from(bytes[0]) | (i32::from(bytes[1]) << 8) | (i32::from(bytes[2]) << 16);
            i64::from((v << 8) >> 8)
        }
        Encoding::U32 => i64::from(u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])),
        Encoding::S32 => i64::from(i32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])),
        Encoding::Float32 => unreachable!("float samples never go through read_fixed_sample"),
    }
}

/// Convert a buffer of fixed-point samples to normalized floats.
pub fn to_float(buffer: &[u8], format: SampleFormat) -> Result<Vec<f32>, PipelineError> {
    if format.is_float() {
        return Err(PipelineError::UnsupportedFormat(
            "to_float called on an already-float buffer".to_string(),
        ));
    }
    let width = format.bytes_per_sample();
    if buffer.len() % width != 0 {
        return Err(PipelineError::UnsupportedFormat(format!(
            "buffer length {} is not a multiple of sample width {}",
            buffer.len(),
            width
        )));
    }

    Ok(buffer
        .chunks_exact(width)
        .map(|chunk| {
            let raw = read_fixed_sample(chunk, format.encoding);
            normalize_sample(raw, format.encoding)
        })
        .collect())
}

/// Convert a buffer of normalized floats to fixed-point samples of `format`.
pub fn from_float(samples: &[f32], format: SampleFormat) -> Result<Vec<u8>, PipelineError> {
    if format.is_float() {
        return Err(PipelineError::UnsupportedFormat(
            "from_float called with a float target format".to_string(),
        ));
    }

    let mut out = Vec::with_capacity(samples.len() * format.bytes_per_sample());
    for &x in samples {
        let q = quantize_sample(x, format.encoding);
        write_fixed_sample(&mut out, q, format.encoding);
    }
    Ok(out)
}
