//! Test signal generation for audio testing
//!
//! Generates the one standard test signal the pipeline's quality tests need:
//! a single-frequency sine wave, stereo-interleaved.

use std::f32::consts::PI;

/// Generate a sine wave
///
/// # Arguments
/// * `frequency` - Frequency in Hz
/// * `sample_rate` - Sample rate in Hz
/// * `duration` - Duration in seconds
/// * `amplitude` - Peak amplitude (0.0 to 1.0)
///
/// # Returns
/// Stereo interleaved samples (L, R, L, R, ...)
pub fn generate_sine_wave(
    frequency: f32,
    sample_rate: u32,
    duration: f32,
    amplitude: f32,
) -> Vec<f32> {
    let num_samples = (sample_rate as f32 * duration) as usize;
    let mut samples = Vec::with_capacity(num_samples * 2); // Stereo

    for i in 0..num_samples {
        let t = i as f32 / sample_rate as f32;
        let sample = (2.0 * PI * frequency * t).sin() * amplitude;
        samples.push(sample); // Left
        samples.push(sample); // Right
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_wave_generation() {
        let signal = generate_sine_wave(440.0, 44100, 1.0, 1.0);

        // Should be stereo
        assert_eq!(signal.len(), 44100 * 2);

        // Check peak amplitude
        let max_amplitude = signal.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
        assert!(max_amplitude > 0.99 && max_amplitude <= 1.0);
    }
}
