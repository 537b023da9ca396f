//! In-place byte-order reversal on typed sample buffers.

use crate::error::PipelineError;
use crate::format::SampleFormat;

/// Swap `buffer` in place so every sample of `format` becomes native-endian.
///
/// No-op for 8-bit and float formats. Fails with
/// [`PipelineError::UnsupportedFormat`] if `format`'s byte width isn't one
/// of 1, 2, 3, or 4 bytes.
pub fn swap_to_native(buffer: &mut [u8], format: SampleFormat) -> Result<(), PipelineError> {
    swap(buffer, format)
}

/// Swap `buffer` in place between native and `format`'s declared
/// endianness. Byte swapping is its own inverse, so this function also
/// serves as "swap to declared endianness from native".
pub fn swap(buffer: &mut [u8], format: SampleFormat) -> Result<(), PipelineError> {
    if !format.encoding.has_endianness() {
        return Ok(());
    }

    let width = format.bytes_per_sample();
    if buffer.len() % width != 0 {
        return Err(PipelineError::UnsupportedFormat(format!(
            "buffer length {} is not a multiple of sample width {}",
            buffer.len(),
            width
        )));
    }

    match width {
        2 => {
            for pair in buffer.chunks_exact_mut(2) {
                pair.swap(0, 1);
            }
        }
        3 => {
            // 24-packed: swap the outer two bytes of each 3-byte group.
            for group in buffer.chunks_exact_mut(3) {
                group.swap(0, 2);
            }
        }
        4 => {
            for quad in buffer.chunks_exact_mut(4) {
                quad.swap(0, 3);
                quad.swap(1, 2);
            }
        }
        other => {
            return Err(PipelineError::UnsupportedFormat(format!(
                "no endianness swap defined for {other}-byte samples"
            )))
        }
    }

    Ok(())
}
