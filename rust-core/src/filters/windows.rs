//! Window functions for STFT analysis/synthesis and spectral measurement

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/D)
    /// Sidelobe attenuation: ~31 dB, perfect overlap-add at 75% overlap
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/D)
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/D) + 0.08*cos(4πn/D)
    Blackman,

    /// Rectangular window (no windowing)
    Rectangular,
}

impl Default for WindowType {
    fn default() -> Self {
        WindowType::Hann
    }
}

/// Generate symmetric window coefficients (D = M - 1)
///
/// Symmetric windows suit one-shot analysis of a finished buffer.
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (M)
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    if length == 1 {
        return vec![1.0];
    }
    generate_with_period(window_type, length, length.saturating_sub(1) as f64)
}

/// Generate periodic window coefficients (D = M)
///
/// The periodic form is what frame-based STFT processing wants: shifted
/// copies at hop M/4 sum to a constant.
pub fn generate_periodic_window(window_type: WindowType, length: usize) -> Vec<f64> {
    generate_with_period(window_type, length, length as f64)
}

fn generate_with_period(window_type: WindowType, length: usize, period: f64) -> Vec<f64> {
    let mut window = Vec::with_capacity(length);

    match window_type {
        WindowType::Hann => {
            for n in 0..length {
                let angle = 2.0 * PI * n as f64 / period;
                window.push(0.5 - 0.5 * angle.cos());
            }
        }

        WindowType::Hamming => {
            for n in 0..length {
                let angle = 2.0 * PI * n as f64 / period;
                window.push(0.54 - 0.46 * angle.cos());
            }
        }

        WindowType::Blackman => {
            for n in 0..length {
                let angle1 = 2.0 * PI * n as f64 / period;
                let angle2 = 4.0 * PI * n as f64 / period;
                window.push(0.42 - 0.5 * angle1.cos() + 0.08 * angle2.cos());
            }
        }

        WindowType::Rectangular => {
            window.resize(length, 1.0);
        }
    }

    window
}
