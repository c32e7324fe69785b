//! Dominant-frequency measurement
//!
//! Combines windowing with the FFT engine to locate the strongest spectral
//! peak of a waveform. Used to report what a pitch shift did to the audio.

use super::fft::FftEngine;
use super::windowing::{apply_window, centered_segment};
use crate::audio::Waveform;
use crate::filters::windows::WindowType;

/// Longest segment analysed, in samples
const MAX_ANALYSIS_LEN: usize = 65536;

/// Peaks below this magnitude count as silence
const SILENCE_FLOOR: f64 = 1e-9;

/// Frequency in Hz of the strongest non-DC spectral peak
///
/// Analyses at most 65536 samples from the middle of the
/// waveform with a Hann window, refining the peak by parabolic
/// interpolation over the neighbouring bins.
///
/// # Returns
/// `None` for empty or silent input
pub fn dominant_frequency(waveform: &Waveform) -> Option<f64> {
    let segment = centered_segment(waveform.samples(), MAX_ANALYSIS_LEN);
    if segment.len() < 2 {
        return None;
    }

    let windowed = apply_window(segment, WindowType::Hann);
    let mut engine = FftEngine::new(segment.len().next_power_of_two());
    let spectrum = engine.compute_magnitude(&windowed).ok()?;

    let (peak_bin, &peak_mag) = spectrum
        .iter()
        .enumerate()
        .skip(1)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))?;

    if peak_mag < SILENCE_FLOOR {
        return None;
    }

    let offset = if peak_bin + 1 < spectrum.len() {
        let (a, b, c) = (spectrum[peak_bin - 1], peak_mag, spectrum[peak_bin + 1]);
        let denom = a - 2.0 * b + c;
        if denom.abs() > f64::EPSILON {
            0.5 * (a - c) / denom
        } else {
            0.0
        }
    } else {
        0.0
    };

    let bin_hz = engine.bin_to_hz(1, waveform.sample_rate() as f64);
    Some((peak_bin as f64 + offset) * bin_hz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn tone(freq: f64, sample_rate: u32, len: usize) -> Waveform {
        let samples = (0..len)
            .map(|n| (2.0 * PI * freq * n as f64 / sample_rate as f64).sin())
            .collect();
        Waveform::new(samples, sample_rate).unwrap()
    }

    #[test]
    fn test_detects_sine_frequency() {
        for freq in [220.0, 440.0, 880.0, 3000.0] {
            let detected = dominant_frequency(&tone(freq, 16000, 16000)).unwrap();
            assert!((detected - freq).abs() < 2.0, "{} detected as {}", freq, detected);
        }
    }

    #[test]
    fn test_long_signal_uses_centre_segment() {
        let detected = dominant_frequency(&tone(1000.0, 44100, 44100 * 5)).unwrap();
        assert!((detected - 1000.0).abs() < 2.0);
    }

    #[test]
    fn test_silence_and_empty() {
        let silent = Waveform::new(vec![0.0; 4096], 16000).unwrap();
        assert!(dominant_frequency(&silent).is_none());

        let empty = Waveform::new(Vec::new(), 16000).unwrap();
        assert!(dominant_frequency(&empty).is_none());
    }
}
