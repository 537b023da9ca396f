//! Soul Player Audio
//!
//! A synchronous, single-threaded PCM conversion pipeline: it takes audio
//! in one `(sample format, sample rate, channel count)` and produces audio
//! in another, handling fixed/float quantization, endianness, bit-width
//! fast paths, arbitrary-ratio resampling, and mono/5.1 channel remapping
//! along the way.
//!
//! Decoding, playback output, and UI concerns live outside this crate; it
//! consumes raw byte buffers and an options interface, and is oblivious to
//! where either comes from.
//!
//! # Example: building and driving a conversion
//!
//! ```rust
//! use soul_audio::format::{Encoding, Endianness, SampleFormat, SoundParams};
//! use soul_audio::options::StaticResampleOptions;
//! use soul_audio::pipeline;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let from = SoundParams::new(
//!     SampleFormat::new(Encoding::U8, Endianness::Little),
//!     8000,
//!     1,
//! );
//! let to = SoundParams::new(
//!     SampleFormat::new(Encoding::S16, Endianness::Little),
//!     8000,
//!     2,
//! );
//!
//! let options = StaticResampleOptions::default();
//! let mut descriptor = pipeline::build(from, to, &options)?;
//!
//! let input = [0x80u8]; // mid-scale unsigned 8-bit
//! let output = descriptor.convert(&input)?;
//! assert_eq!(output, vec![0x00, 0x00, 0x00, 0x00]);
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod endian;
mod error;
pub mod fastpath;
pub mod fixed_float;
pub mod format;
pub mod options;
pub mod pipeline;
pub mod resampling;
pub mod sign;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{PipelineError, Result};
