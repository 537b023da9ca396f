//! In-place signed/unsigned toggling at matching widths.

use crate::error::PipelineError;
use crate::format::{Encoding, Endianness, SampleFormat};

/// Flip the top bit of every sample in `buffer` (native-endian, per
/// `format`) and return the sign-flipped format tag.
///
/// Supported at widths 8, 16, 24-padded, and 32; 24-packed is not
/// supported here because sign flips on packed samples always co-occur
/// with a full fixed/float conversion in the orchestrator.
pub fn flip_sign(buffer: &mut [u8], format: SampleFormat) -> Result<SampleFormat, PipelineError> {
    if format.is_float() {
        return Err(PipelineError::UnsupportedFormat(
            "sign flip is not defined for float samples".to_string(),
        ));
    }
    if format.encoding.is_packed_24() {
        return Err(PipelineError::UnsupportedFormat(
            "sign flip is not supported directly on 24-packed samples".to_string(),
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

    // The top bit sits in the most-significant byte of the native-endian
    // representation: last byte on little-endian, first byte on big-endian.
    match format.encoding {
        Encoding::U8 | Encoding::S8 => {
            for b in buffer.iter_mut() {
                *b ^= 0x80;
            }
        }
        Encoding::U16 | Encoding::S16 | Encoding::U24 | Encoding::S24 | Encoding::U32
        | Encoding::S32 => {
            let msb_index = match Endianness::native() {
                Endianness::Little => width - 1,
                Endianness::Big => 0,
            };
            for sample in buffer.chunks_exact_mut(width) {
                sample[msb_index] ^= 0x80;
            }
        }
        _ => unreachable!("float/packed already rejected above"),
    }

    Ok(format.with_encoding(format.encoding.sign_flipped()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Endianness;

    #[test]
    fn flip_is_involution_for_every_width() {
        for (enc, mut buf) in [
            (Encoding::U8, vec![0x00, 0x80, 0xFF]),
            (Encoding::S16, vec![0x00, 0x00, 0xFF, 0x7F]),
            (Encoding::S24, vec![0x00, 0x00, 0x00, 0x80]),
            (Encoding::S32, vec![0x00, 0x00, 0x00, 0x7F]),
        ] {
            let fmt = SampleFormat::new(enc, Endianness::native());
            let original = buf.clone();
            let flipped = flip_sign(&mut buf, fmt).unwrap();
            let back = flip_sign(&mut buf, flipped).unwrap();
            assert_eq!(buf, original);
            assert_eq!(back, fmt);
        }
    }

    #[test]
    fn flip_toggles_bit_7_for_8_bit() {
        let fmt = SampleFormat::new(Encoding::U8, Endianness::native());
        let mut buf = vec![0x00];
        flip_sign(&mut buf, fmt).unwrap();
        assert_eq!(buf, vec![0x80]);
    }

    #[test]
    fn packed_24_is_rejected() {
        let fmt = SampleFormat::new(Encoding::S24Packed, Endianness::native());
        let mut buf = vec![0x00, 0x00, 0x00];
        assert!(flip_sign(&mut buf, fmt).is_err());
    }
}
