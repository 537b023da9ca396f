//! Bit-width reducers that bypass the float round-trip (§4.E).
//!
//! Each reducer only applies when source and target sample rates match and
//! signedness is unchanged; a subsequent sign flip ([`crate::sign`]) handles
//! any sign mismatch.

use crate::error::PipelineError;
use crate::format::Encoding;

/// The narrowing conversions this module implements directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// 32-bit -> 24-bit padded-to-32.
    Width32To24Padded,
    /// 32-bit -> 24-bit packed-in-3-bytes.
    Width32To24Packed,
    /// 32-bit -> 16-bit.
    Width32To16,
    /// 24-bit (either container) -> 16-bit.
    Width24To16,
}

/// Determine whether `(from, to)` is a fast-path-eligible narrowing, given
/// matching signedness (checked by the caller via [`Encoding::is_signed`]).
#[must_use]
pub fn classify(from: Encoding, to: Encoding) -> Option<Reduction> {
    if from.is_float() || to.is_float() {
        return None;
    }
    match (from.bit_width(), to.bit_width(), to.is_packed_24()) {
        (32, 24, true) => Some(Reduction::Width32To24Packed),
        (32, 24, false) => Some(Reduction::Width32To24Padded),
        (32, 16, _) => Some(Reduction::Width32To16),
        (24, 16, _) => Some(Reduction::Width24To16),
        _ => None,
    }
}

fn read_i32_native(bytes: &[u8]) -> i32 {
    i32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn read_24_as_i32(bytes: &[u8], packed: bool) -> i32 {
    if packed {
        let v = i32::from(bytes[0]) | (i32::from(bytes[1]) << 8) | (i32::from(bytes[2]) << 16);
        (v << 8) >> 8
    } else {
        (read_i32_native(bytes) << 8) >> 8
    }
}

/// Apply a fast-path reduction over an entire buffer, returning the
/// narrowed byte buffer. `from`/`to` must already have been classified by
/// [`classify`] and must carry matching signedness.
pub fn reduce(input: &[u8], from: Encoding, to: Encoding) -> Result<Vec<u8>, PipelineError> {
    let reduction = classify(from, to).ok_or_else(|| {
        PipelineError::UnsupportedFormat(format!("no fast path from {from} to {to}"))
    })?;

    let src_width = from.bytes_per_sample();
    if input.len() % src_width != 0 {
        return Err(PipelineError::UnsupportedFormat(format!(
            "buffer length {} is not a multiple of sample width {}",
            input.len(),
            src_width
        )));
    }

    let mut out = Vec::with_capacity((input.len() / src_width) * to.bytes_per_sample());

    match reduction {
        Reduction::Width32To16 => {
            for chunk in input.chunks_exact(4) {
                let v = read_i32_native(chunk) >> 16;
                out.extend_from_slice(&(v as i16).to_ne_bytes());
            }
        }
        Reduction::Width32To24Padded => {
            for chunk in input.chunks_exact(4) {
                let v = read_i32_native(chunk) >> 8;
                out.extend_from_slice(&v.to_ne_bytes());
            }
        }
        Reduction::Width32To24Packed => {
            // Bytes 1, 2, 3 of the 32-bit little-endian word, i.e. the
            // three highest bytes, discarding the lowest byte. Extracted
            // numerically so it's independent of host byte order.
            for chunk in input.chunks_exact(4) {
                let v = read_i32_native(chunk);
                out.push(((v >> 8) & 0xFF) as u8);
                out.push(((v >> 16) & 0xFF) as u8);
                out.push(((v >> 24) & 0xFF) as u8);
            }
        }
        Reduction::Width24To16 => {
            let packed = from.is_packed_24();
            for chunk in input.chunks_exact(src_width) {
                let v = read_24_as_i32(chunk, packed) >> 8;
                out.extend_from_slice(&(v as i16).to_ne_bytes());
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_table() {
        assert_eq!(
            classify(Encoding::S32, Encoding::S24),
            Some(Reduction::Width32To24Padded)
        );
        assert_eq!(
            classify(Encoding::S32, Encoding::S24Packed),
            Some(Reduction::Width32To24Packed)
        );
        assert_eq!(
            classify(Encoding::S32, Encoding::S16),
            Some(Reduction::Width32To16)
        );
        assert_eq!(
            classify(Encoding::S24, Encoding::S16),
            Some(Reduction::Width24To16)
        );
        assert_eq!(classify(Encoding::S16, Encoding::S8), None);
    }

    #[test]
    fn float_is_never_fast_pathed() {
        assert_eq!(classify(Encoding::Float32, Encoding::S16), None);
        assert_eq!(classify(Encoding::S32, Encoding::Float32), None);
    }

    #[test]
    fn scenario_32_to_16_max_values() {
        // Spec scenario 4: S32-LE max-positive / max-negative -> S16-LE.
        let input = vec![0x00, 0x00, 0x00, 0x7F, 0x00, 0x00, 0x00, 0x80u8];
        let out = reduce(&input, Encoding::S32, Encoding::S16).unwrap();
        assert_eq!(out, vec![0xFF, 0x7F, 0x00, 0x80]);
    }

    #[test]
    fn width_32_to_24_packed_drops_low_byte() {
        let v: i32 = 0x1234_5678;
        let input = v.to_ne_bytes().to_vec();
        let out = reduce(&input, Encoding::S32, Encoding::S24Packed).unwrap();
        assert_eq!(out, vec![0x56, 0x34, 0x12]);
    }
}
