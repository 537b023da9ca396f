//! Black-box property tests against the public `pipeline` API, independent
//! of the `test-utils` feature.

use soul_audio::format::{Encoding, Endianness, SampleFormat, SoundParams};
use soul_audio::options::StaticResampleOptions;
use soul_audio::pipeline;

fn s16le() -> SampleFormat {
    SampleFormat::new(Encoding::S16, Endianness::Little)
}

#[test]
fn mono_to_stereo_duplicates_every_frame() {
    let from = SoundParams::new(s16le(), 44100, 1);
    let to = SoundParams::new(s16le(), 44100, 2);
    let mut descriptor = pipeline::build(from, to, &StaticResampleOptions::default()).unwrap();

    let input: Vec<u8> = (0..50i16)
        .flat_map(|v| (v * 300).to_le_bytes())
        .collect();
    let output = descriptor.convert(&input).unwrap();

    assert_eq!(output.len(), input.len() * 2);
    for (frame_in, frame_out) in input.chunks_exact(2).zip(output.chunks_exact(4)) {
        assert_eq!(&frame_out[0..2], frame_in);
        assert_eq!(&frame_out[2..4], frame_in);
    }
}

#[test]
fn downmix_5_1_silence_stays_silent() {
    let from = SoundParams::new(s16le(), 48000, 6);
    let to = SoundParams::new(s16le(), 48000, 2);
    let mut descriptor = pipeline::build(from, to, &StaticResampleOptions::default()).unwrap();

    let input = vec![0u8; 2 * 6 * 20]; // 20 silent 5.1 frames
    let output = descriptor.convert(&input).unwrap();

    assert_eq!(output.len(), 2 * 2 * 20);
    assert!(output.iter().all(|&b| b == 0));
}

#[test]
fn unsupported_channel_pairs_are_rejected_at_build() {
    let from = SoundParams::new(s16le(), 44100, 1);
    let to = SoundParams::new(s16le(), 44100, 6);
    let result = pipeline::build(from, to, &StaticResampleOptions::default());
    assert!(result.is_err());
}

#[test]
fn unknown_resample_method_fails_construction() {
    use soul_audio::options::StaticResampleOptions as Opts;

    let from = SoundParams::new(s16le(), 44100, 2);
    let to = SoundParams::new(s16le(), 48000, 2);
    let options = Opts {
        resample_method: "DoesNotExist".to_string(),
        ..Opts::default()
    };
    let result = pipeline::build(from, to, &options);
    assert!(result.is_err());
}

#[test]
fn downmix_5_1_float_to_s16_matches_worked_example() {
    // Spec scenario 5: {0.5, 0.5, 0, 0, 0, 0} -> Left = Right = round(0.5 *
    // 0.2626 * 32767) = 4301 = 0x10CD, little-endian [0xCD, 0x10].
    let from = SoundParams::new(SampleFormat::float32_native(), 44100, 6);
    let to = SoundParams::new(s16le(), 44100, 2);
    let mut descriptor = pipeline::build(from, to, &StaticResampleOptions::default()).unwrap();

    let mut input = Vec::new();
    for v in [0.5f32, 0.5, 0.0, 0.0, 0.0, 0.0] {
        input.extend_from_slice(&v.to_ne_bytes());
    }

    let output = descriptor.convert(&input).unwrap();
    assert_eq!(output, vec![0xCD, 0x10, 0xCD, 0x10]);
}

#[test]
fn sign_only_difference_round_trips_bit_for_bit() {
    // S16 <-> U16 at the same rate/channels only differs in sign: the
    // orchestrator should use the cheap sign-flip path, not a float
    // round-trip, and the result should be exact.
    let from = SoundParams::new(SampleFormat::new(Encoding::S16, Endianness::Little), 44100, 1);
    let to = SoundParams::new(SampleFormat::new(Encoding::U16, Endianness::Little), 44100, 1);
    let mut descriptor = pipeline::build(from, to, &StaticResampleOptions::default()).unwrap();

    let input = vec![0x00u8, 0x80]; // S16 min (-32768)
    let output = descriptor.convert(&input).unwrap();
    assert_eq!(output, vec![0x00, 0x00]); // U16 zero
}
