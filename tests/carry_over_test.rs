//! Resampler carry-over conservation: whatever frames a `convert` call
//! doesn't hand to the resampler must reappear, untouched, as input to the
//! next call rather than being dropped or duplicated.

use soul_audio::format::{Encoding, Endianness, SampleFormat, SoundParams};
use soul_audio::options::StaticResampleOptions;
use soul_audio::pipeline;

fn stereo_s16le(rate: u32) -> SoundParams {
    SoundParams::new(SampleFormat::new(Encoding::S16, Endianness::Little), rate, 2)
}

fn stereo_s16le_bytes(frame_count: usize) -> Vec<u8> {
    (0..frame_count as i16)
        .flat_map(|v| {
            let sample = v.wrapping_mul(37).to_le_bytes();
            [sample, sample].concat()
        })
        .collect()
}

/// The default `StaticResampleOptions` resolve to `ResamplingQuality::Balanced`
/// (rubato's `SincFixedIn`), whose fixed chunk size is 1024 frames; a
/// `convert` call only ever resamples whole multiples of that many frames,
/// carrying any ragged remainder forward.
const CHUNK_FRAMES: usize = 1024;

#[test]
fn splitting_one_input_across_two_calls_carries_the_remainder() {
    let options = StaticResampleOptions::default();

    // Two full chunks' worth of input, so both the single-call and
    // split-call runs fully drain their carry buffers by the end.
    let all_frames = CHUNK_FRAMES * 2;

    // Single call over the whole input.
    let mut whole = pipeline::build(stereo_s16le(44100), stereo_s16le(48000), &options).unwrap();
    let input = stereo_s16le_bytes(all_frames);
    let whole_out = whole.convert(&input).unwrap();
    assert_eq!(whole.carry_len(), 0);

    // Same logical input, split into two calls at an arbitrary, non-chunk
    // aligned boundary that still lands exactly on the second chunk
    // boundary once the pieces are combined.
    let mut split = pipeline::build(stereo_s16le(44100), stereo_s16le(48000), &options).unwrap();
    let split_point = (CHUNK_FRAMES + CHUNK_FRAMES / 4) * 4; // mid-way through the 2nd chunk
    let (first_half, second_half) = input.split_at(split_point);

    let mut split_out = split.convert(first_half).unwrap();
    assert!(
        split.carry_len() > 0,
        "first call left a ragged, sub-chunk remainder that should be carried forward"
    );
    split_out.extend(split.convert(second_half).unwrap());

    // The combined input is an exact multiple of the chunk size, so once
    // both calls have run nothing should still be pending.
    assert_eq!(split.carry_len(), 0);

    let whole_frames = whole_out.len() / 4;
    let split_frames = split_out.len() / 4;
    assert!(
        (whole_frames as i64 - split_frames as i64).abs() <= 2,
        "whole-input frame count {whole_frames} vs split-input frame count {split_frames}"
    );
}

#[test]
fn carry_buffer_never_exceeds_one_resampler_chunk() {
    let options = StaticResampleOptions::default();
    let mut descriptor =
        pipeline::build(stereo_s16le(44100), stereo_s16le(48000), &options).unwrap();

    // Feed buffers repeatedly, crossing several chunk boundaries; the carry
    // buffer should accumulate between crossings but never hold a full
    // chunk's worth of frames, since a full chunk is always drained by the
    // resampler before the call returns.
    let per_call = stereo_s16le_bytes(150);
    let mut max_carry = 0usize;
    for _ in 0..50 {
        descriptor.convert(&per_call).unwrap();
        max_carry = max_carry.max(descriptor.carry_len());
    }

    assert!(
        max_carry < CHUNK_FRAMES * 2,
        "carry buffer grew to {max_carry} samples, resampler may not be consuming input"
    );
}
