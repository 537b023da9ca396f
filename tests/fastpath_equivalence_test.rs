//! The bit-width fast path is an optimization, not a different algorithm:
//! for inputs it's eligible for, it must agree with the full float
//! round-trip to within a rounding unit.

use soul_audio::fastpath;
use soul_audio::fixed_float::{from_float, to_float};
use soul_audio::format::{Encoding, Endianness, SampleFormat};

fn native(encoding: Encoding) -> SampleFormat {
    SampleFormat::new(encoding, Endianness::native())
}

fn s32_samples() -> Vec<i32> {
    let mut values = vec![0, 1, -1, i32::MAX, i32::MIN, i32::MAX / 2, i32::MIN / 2];
    // A spread of values exercising every byte of the word.
    for shift in 0..24 {
        values.push(1i32 << shift);
        values.push(-(1i32 << shift));
    }
    values
}

fn s32_bytes(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_ne_bytes()).collect()
}

fn s16_from_bytes(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|c| i16::from_ne_bytes([c[0], c[1]]))
        .collect()
}

#[test]
fn fast_path_32_to_16_matches_float_round_trip_within_one_lsb() {
    let values = s32_samples();
    let input = s32_bytes(&values);

    let fast = fastpath::reduce(&input, Encoding::S32, Encoding::S16).unwrap();
    let floats = to_float(&input, native(Encoding::S32)).unwrap();
    let full = from_float(&floats, native(Encoding::S16)).unwrap();

    let fast_samples = s16_from_bytes(&fast);
    let full_samples = s16_from_bytes(&full);

    assert_eq!(fast_samples.len(), full_samples.len());
    for (i, (f, g)) in fast_samples.iter().zip(full_samples.iter()).enumerate() {
        let diff = i32::from(*f) - i32::from(*g);
        assert!(
            diff.abs() <= 1,
            "sample {i}: fast-path {f} vs float round-trip {g} (source {:#010x})",
            values[i]
        );
    }
}

#[test]
fn fast_path_32_to_24_padded_matches_float_round_trip_within_one_lsb() {
    let values = s32_samples();
    let input = s32_bytes(&values);

    let fast = fastpath::reduce(&input, Encoding::S32, Encoding::S24).unwrap();
    let floats = to_float(&input, native(Encoding::S32)).unwrap();
    let full = from_float(&floats, native(Encoding::S24)).unwrap();

    for (i, (f, g)) in fast.chunks_exact(4).zip(full.chunks_exact(4)).enumerate() {
        let fv = i32::from_ne_bytes([f[0], f[1], f[2], f[3]]) << 8 >> 8;
        let gv = i32::from_ne_bytes([g[0], g[1], g[2], g[3]]) << 8 >> 8;
        assert!(
            (fv - gv).abs() <= 1,
            "sample {i}: fast-path {fv} vs float round-trip {gv} (source {:#010x})",
            values[i]
        );
    }
}
