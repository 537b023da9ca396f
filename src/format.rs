//! Sample-format model: encoding tags and the sound-parameter triple.

use std::fmt;

/// Byte order of a multi-byte fixed-point sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    /// Endianness native to this build target.
    #[must_use]
    pub const fn native() -> Self {
        #[cfg(target_endian = "little")]
        {
            Endianness::Little
        }
        #[cfg(target_endian = "big")]
        {
            Endianness::Big
        }
    }

    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Endianness::Little => Endianness::Big,
            Endianness::Big => Endianness::Little,
        }
    }
}

/// A closed set of sample encodings. Float implies 32-bit by construction,
/// and 24-packed is a distinct variant from 24-padded so the two container
/// sizes (3 vs 4 bytes) can never be confused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    U8,
    S8,
    U16,
    S16,
    /// 24-bit, padded into a 4-byte little/big-endian container.
    U24,
    S24,
    /// 24-bit, packed into exactly 3 bytes per sample.
    U24Packed,
    S24Packed,
    U32,
    S32,
    /// Normalized 32-bit float in `[-1.0, 1.0]`. Always signed, never
    /// endianness-swapped (treated as native).
    Float32,
}

impl Encoding {
    /// Bytes occupied by one sample of this encoding.
    #[must_use]
    pub const fn bytes_per_sample(self) -> usize {
        match self {
            Encoding::U8 | Encoding::S8 => 1,
            Encoding::U16 | Encoding::S16 => 2,
            Encoding::U24Packed | Encoding::S24Packed => 3,
            Encoding::U24 | Encoding::S24 | Encoding::U32 | Encoding::S32 | Encoding::Float32 => 4,
        }
    }

    /// Bit width used for sign-flip / fast-path bookkeeping. 24-packed and
    /// 24-padded share a width of 24 even though their container differs.
    #[must_use]
    pub const fn bit_width(self) -> u32 {
        match self {
            Encoding::U8 | Encoding::S8 => 8,
            Encoding::U16 | Encoding::S16 => 16,
            Encoding::U24 | Encoding::S24 | Encoding::U24Packed | Encoding::S24Packed => 24,
            Encoding::U32 | Encoding::S32 | Encoding::Float32 => 32,
        }
    }

    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            Encoding::S8
                | Encoding::S16
                | Encoding::S24
                | Encoding::S24Packed
                | Encoding::S32
                | Encoding::Float32
        )
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Encoding::Float32)
    }

    #[must_use]
    pub const fn is_packed_24(self) -> bool {
        matches!(self, Encoding::U24Packed | Encoding::S24Packed)
    }

    /// An 8-bit encoding carries no meaningful byte order, and float is
    /// always treated as native.
    #[must_use]
    pub const fn has_endianness(self) -> bool {
        self.bit_width() > 8 && !self.is_float()
    }

    /// The unsigned counterpart of a signed encoding of the same width
    /// (and vice versa), used by the sign flipper to update the format tag.
    #[must_use]
    pub const fn sign_flipped(self) -> Self {
        match self {
            Encoding::U8 => Encoding::S8,
            Encoding::S8 => Encoding::U8,
            Encoding::U16 => Encoding::S16,
            Encoding::S16 => Encoding::U16,
            Encoding::U24 => Encoding::S24,
            Encoding::S24 => Encoding::U24,
            Encoding::U24Packed => Encoding::S24Packed,
            Encoding::S24Packed => Encoding::U24Packed,
            Encoding::U32 => Encoding::S32,
            Encoding::S32 => Encoding::U32,
            Encoding::Float32 => Encoding::Float32,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Encoding::U8 => "U8",
            Encoding::S8 => "S8",
            Encoding::U16 => "U16",
            Encoding::S16 => "S16",
            Encoding::U24 => "U24",
            Encoding::S24 => "S24",
            Encoding::U24Packed => "U24Packed",
            Encoding::S24Packed => "S24Packed",
            Encoding::U32 => "U32",
            Encoding::S32 => "S32",
            Encoding::Float32 => "Float32",
        };
        f.write_str(name)
    }
}

/// A complete sample-format descriptor: encoding plus byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleFormat {
    pub encoding: Encoding,
    pub endianness: Endianness,
}

impl SampleFormat {
    #[must_use]
    pub const fn new(encoding: Encoding, endianness: Endianness) -> Self {
        Self {
            encoding,
            endianness,
        }
    }

    /// A float format is always treated as native-endian.
    #[must_use]
    pub const fn float32_native() -> Self {
        Self::new(Encoding::Float32, Endianness::native())
    }

    #[must_use]
    pub const fn bytes_per_sample(self) -> usize {
        self.encoding.bytes_per_sample()
    }

    #[must_use]
    pub const fn bit_width(self) -> u32 {
        self.encoding.bit_width()
    }

    #[must_use]
    pub const fn is_signed(self) -> bool {
        self.encoding.is_signed()
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        self.encoding.is_float()
    }

    /// Returns a copy with the encoding replaced, endianness unchanged.
    #[must_use]
    pub const fn with_encoding(self, encoding: Encoding) -> Self {
        Self {
            encoding,
            endianness: self.endianness,
        }
    }

    /// Returns a copy with the endianness replaced, encoding unchanged.
    #[must_use]
    pub const fn with_endianness(self, endianness: Endianness) -> Self {
        Self {
            encoding: self.encoding,
            endianness,
        }
    }

    /// True if this format needs byte-swapping to become native-endian.
    #[must_use]
    pub const fn is_native(self) -> bool {
        if !self.encoding.has_endianness() {
            return true;
        }
        matches!(
            (self.endianness, Endianness::native()),
            (Endianness::Little, Endianness::Little) | (Endianness::Big, Endianness::Big)
        )
    }
}

/// Number of channels a [`SoundParams`] may carry. The pipeline only
/// understands mono, stereo, and 5.1 surround sources.
pub const SUPPORTED_CHANNEL_COUNTS: [u16; 3] = [1, 2, 6];

/// The `(format, rate, channels)` triple describing one side of a
/// conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundParams {
    pub format: SampleFormat,
    pub sample_rate: u32,
    pub channels: u16,
}

impl SoundParams {
    #[must_use]
    pub const fn new(format: SampleFormat, sample_rate: u32, channels: u16) -> Self {
        Self {
            format,
            sample_rate,
            channels,
        }
    }

    #[must_use]
    pub const fn bytes_per_frame(self) -> usize {
        self.format.bytes_per_sample() * self.channels as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_per_sample_table() {
        assert_eq!(Encoding::U8.bytes_per_sample(), 1);
        assert_eq!(Encoding::S16.bytes_per_sample(), 2);
        assert_eq!(Encoding::S24Packed.bytes_per_sample(), 3);
        assert_eq!(Encoding::S24.bytes_per_sample(), 4);
        assert_eq!(Encoding::S32.bytes_per_sample(), 4);
        assert_eq!(Encoding::Float32.bytes_per_sample(), 4);
    }

    #[test]
    fn sign_flip_is_involution() {
        for enc in [
            Encoding::U8,
            Encoding::S16,
            Encoding::U24,
            Encoding::S24Packed,
            Encoding::U32,
        ] {
            assert_eq!(enc.sign_flipped().sign_flipped(), enc);
        }
    }

    #[test]
    fn eight_bit_has_no_endianness() {
        assert!(!Encoding::U8.has_endianness());
        assert!(!Encoding::Float32.has_endianness());
        assert!(Encoding::S16.has_endianness());
        assert!(Encoding::S24Packed.has_endianness());
    }

    #[test]
    fn packed_vs_padded_24_differ_in_size_not_range() {
        assert_eq!(Encoding::S24.bit_width(), Encoding::S24Packed.bit_width());
        assert_ne!(
            Encoding::S24.bytes_per_sample(),
            Encoding::S24Packed.bytes_per_sample()
        );
    }
}
