//! Windowing helpers applied to time-domain segments before an FFT

use crate::filters::windows::{generate_window, WindowType};

/// Apply window to signal
///
/// # Returns
/// Windowed copy of `signal`
pub fn apply_window(signal: &[f64], window_type: WindowType) -> Vec<f64> {
    let window = generate_window(window_type, signal.len());

    signal
        .iter()
        .zip(window.iter())
        .map(|(&s, &w)| s * w)
        .collect()
}

/// Extract the `length` samples centred in `signal`
///
/// Returns the whole signal when it is not longer than `length`.
pub fn centered_segment(signal: &[f64], length: usize) -> &[f64] {
    if signal.len() <= length {
        return signal;
    }
    let start = (signal.len() - length) / 2;
    &signal[start..start + length]
}
