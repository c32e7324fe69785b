//! Adaptive Wiener filter for broadband noise removal
//!
//! Local-statistics MMSE filter: each sample is pulled towards the mean of
//! its neighbourhood in proportion to how much of the local variance is
//! explained by noise. Matches the behaviour of the classic `wiener`
//! routine found in scientific Python stacks for 1-D signals.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wiener filter errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("non-finite sample at index {index}")]
    NonFiniteSample { index: usize },

    #[error("window size must be odd and at least 1, got {0}")]
    InvalidWindowSize(usize),

    #[error("noise power must be finite and non-negative, got {0}")]
    InvalidNoisePower(f64),
}

/// Wiener filter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WienerConfig {
    /// Local window length in samples (odd)
    pub window_size: usize,

    /// Noise power override; estimated from the signal when `None`
    pub noise_power: Option<f64>,
}

impl Default for WienerConfig {
    fn default() -> Self {
        Self {
            window_size: 3,
            noise_power: None,
        }
    }
}

impl WienerConfig {
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.window_size == 0 || self.window_size % 2 == 0 {
            return Err(FilterError::InvalidWindowSize(self.window_size));
        }
        if let Some(noise) = self.noise_power {
            if !noise.is_finite() || noise < 0.0 {
                return Err(FilterError::InvalidNoisePower(noise));
            }
        }
        Ok(())
    }
}

/// Wiener denoising filter
#[derive(Debug, Clone)]
pub struct WienerFilter {
    config: WienerConfig,
}

impl WienerFilter {
    /// Create a filter, validating the configuration
    pub fn new(config: WienerConfig) -> Result<Self, FilterError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Filter a signal
    ///
    /// # Returns
    /// Filtered signal of the same length as `signal`
    pub fn apply(&self, signal: &[f64]) -> Result<Vec<f64>, FilterError> {
        if let Some(index) = signal.iter().position(|s| !s.is_finite()) {
            return Err(FilterError::NonFiniteSample { index });
        }
        if signal.is_empty() {
            return Ok(Vec::new());
        }

        let local_mean = moving_average(signal, self.config.window_size);
        let squares: Vec<f64> = signal.iter().map(|&s| s * s).collect();
        let local_power = moving_average(&squares, self.config.window_size);

        let local_var: Vec<f64> = local_power
            .iter()
            .zip(local_mean.iter())
            .map(|(&p, &m)| p - m * m)
            .collect();

        let noise = self
            .config
            .noise_power
            .unwrap_or_else(|| local_var.iter().sum::<f64>() / local_var.len() as f64);

        let output = signal
            .iter()
            .zip(local_mean.iter().zip(local_var.iter()))
            .map(|(&x, (&mean, &var))| {
                // var <= noise also covers the 0/0 case of a flat neighbourhood
                if var <= noise {
                    mean
                } else {
                    mean + (1.0 - noise / var) * (x - mean)
                }
            })
            .collect();

        Ok(output)
    }
}

/// Centred moving average with zeros outside the signal
///
/// Running sum over an odd-length window; output has the input's length.
fn moving_average(signal: &[f64], window_size: usize) -> Vec<f64> {
    let half = window_size / 2;
    let n = signal.len();
    let scale = 1.0 / window_size as f64;

    let mut output = Vec::with_capacity(n);
    let mut sum: f64 = signal.iter().take(half + 1).sum();

    for i in 0..n {
        output.push(sum * scale);

        // Slide: add the sample entering on the right, drop the one leaving on the left
        let entering = i + half + 1;
        if entering < n {
            sum += signal[entering];
        }
        if i >= half {
            sum -= signal[i - half];
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    /// Deterministic uniform noise in [-amplitude, amplitude]
    fn lcg_noise(len: usize, amplitude: f64, seed: u64) -> Vec<f64> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
                (unit * 2.0 - 1.0) * amplitude
            })
            .collect()
    }

    fn sine(freq: f64, sample_rate: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|n| (2.0 * PI * freq * n as f64 / sample_rate).sin())
            .collect()
    }

    fn mse(a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum::<f64>() / a.len() as f64
    }

    #[test]
    fn test_moving_average_zero_padded_edges() {
        let avg = moving_average(&[3.0, 6.0, 9.0, 12.0], 3);
        assert_eq!(avg.len(), 4);
        assert!((avg[0] - 3.0).abs() < 1e-12); // (0 + 3 + 6) / 3
        assert!((avg[1] - 6.0).abs() < 1e-12);
        assert!((avg[2] - 9.0).abs() < 1e-12);
        assert!((avg[3] - 7.0).abs() < 1e-12); // (9 + 12 + 0) / 3
    }

    #[test]
    fn test_moving_average_window_longer_than_signal() {
        let avg = moving_average(&[1.0, 2.0], 5);
        assert!((avg[0] - 0.6).abs() < 1e-12);
        assert!((avg[1] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_output_length_matches_input() {
        let filter = WienerFilter::new(WienerConfig::default()).unwrap();
        for len in [1, 2, 3, 10, 16000] {
            let signal = sine(440.0, 16000.0, len);
            assert_eq!(filter.apply(&signal).unwrap().len(), len);
        }
    }

    #[test]
    fn test_empty_signal() {
        let filter = WienerFilter::new(WienerConfig::default()).unwrap();
        assert!(filter.apply(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_constant_signal_has_no_nan() {
        let filter = WienerFilter::new(WienerConfig::default()).unwrap();
        let output = filter.apply(&[0.25; 64]).unwrap();
        assert!(output.iter().all(|s| s.is_finite()));
        // Interior samples equal the local mean of a constant
        assert!((output[32] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_reduces_broadband_noise() {
        let clean = sine(440.0, 16000.0, 16000);
        let noise = lcg_noise(clean.len(), 0.3, 7);
        let noisy: Vec<f64> = clean.iter().zip(&noise).map(|(c, n)| c + n).collect();

        let filter = WienerFilter::new(WienerConfig::default()).unwrap();
        let denoised = filter.apply(&noisy).unwrap();

        let before = mse(&noisy, &clean);
        let after = mse(&denoised, &clean);
        assert!(after < before * 0.8, "mse before {} after {}", before, after);
    }

    #[test]
    fn test_zero_noise_power_is_identity() {
        let config = WienerConfig {
            window_size: 3,
            noise_power: Some(0.0),
        };
        let filter = WienerFilter::new(config).unwrap();
        let signal = sine(440.0, 16000.0, 256);
        let output = filter.apply(&signal).unwrap();
        for (a, b) in signal.iter().zip(&output) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rejects_non_finite_samples() {
        let filter = WienerFilter::new(WienerConfig::default()).unwrap();
        let err = filter.apply(&[0.0, 1.0, f64::NAN]).unwrap_err();
        assert_eq!(err, FilterError::NonFiniteSample { index: 2 });
    }

    #[test]
    fn test_rejects_even_window() {
        let config = WienerConfig {
            window_size: 4,
            noise_power: None,
        };
        assert_eq!(
            WienerFilter::new(config).unwrap_err(),
            FilterError::InvalidWindowSize(4)
        );
    }
}
