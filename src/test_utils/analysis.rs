//! Audio analysis tools for verification
//!
//! Provides the DFT-based frequency analysis and channel-extraction helpers
//! the pipeline's quality tests use to check that resampling/remapping
//! preserved a signal's dominant frequency.

use std::f32::consts::PI;

/// Convert linear amplitude to dB
fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -100.0 // Silence
    } else {
        20.0 * linear.log10()
    }
}

/// Simple FFT-based frequency analysis
///
/// Returns power spectrum (frequency, magnitude) pairs.
/// Uses a basic DFT implementation for testing (slow but accurate).
///
/// # Arguments
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
/// Vector of (frequency_hz, magnitude_db) tuples
fn analyze_frequency_spectrum(samples: &[f32], sample_rate: u32) -> Vec<(f32, f32)> {
    let n = samples.len().min(4096); // Limit to 4096 samples for DFT
    let samples = &samples[0..n];

    let mut spectrum = Vec::new();

    // Simple DFT (not optimized, but works for tests)
    for k in 0..n / 2 {
        let mut real = 0.0;
        let mut imag = 0.0;

        for (i, &sample) in samples.iter().enumerate() {
            let angle = -2.0 * PI * (k as f32) * (i as f32) / (n as f32);
            real += sample * angle.cos();
            imag += sample * angle.sin();
        }

        let magnitude = (real * real + imag * imag).sqrt() / (n as f32);
        let magnitude_db = linear_to_db(magnitude);
        let frequency = (k as f32 * sample_rate as f32) / (n as f32);

        spectrum.push((frequency, magnitude_db));
    }

    spectrum
}

/// Find the dominant frequency in a signal
///
/// Returns the frequency with the highest magnitude in the spectrum.
pub fn find_dominant_frequency(samples: &[f32], sample_rate: u32) -> f32 {
    let spectrum = analyze_frequency_spectrum(samples, sample_rate);

    spectrum
        .into_iter()
        .max_by(|(_, mag_a), (_, mag_b)| mag_a.partial_cmp(mag_b).unwrap())
        .map(|(freq, _)| freq)
        .unwrap_or(0.0)
}

/// Extract mono channel from stereo interleaved signal
///
/// # Arguments
/// * `stereo` - Stereo interleaved samples (L, R, L, R, ...)
/// * `channel` - 0 for left, 1 for right
pub fn extract_mono(stereo: &[f32], channel: usize) -> Vec<f32> {
    stereo
        .chunks_exact(2)
        .map(|chunk| chunk[channel])
        .collect()
}
