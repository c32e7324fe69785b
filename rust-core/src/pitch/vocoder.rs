//! Phase vocoder time-scale modification
//!
//! Stretches a spectrogram in time without touching its frequency content:
//! magnitudes are interpolated between neighbouring frames, phases are
//! re-accumulated from each bin's instantaneous frequency so partials stay
//! continuous across the new frame positions.

use crate::spectrum::Stft;
use ndarray::Array2;
use num_complex::Complex;
use realfft::FftError;
use std::f64::consts::PI;

/// Time-stretch a spectrogram by `rate`
///
/// # Arguments
/// * `spectrogram` - Complex STFT of shape (bins, frames)
/// * `rate` - Speed-up factor: >1 shortens, <1 lengthens
/// * `hop_length` - Hop used to compute `spectrogram`
///
/// # Returns
/// Spectrogram with `ceil(frames / rate)` frames
pub fn phase_vocoder(
    spectrogram: &Array2<Complex<f64>>,
    rate: f64,
    hop_length: usize,
) -> Array2<Complex<f64>> {
    let (n_bins, n_frames) = spectrogram.dim();
    if n_bins == 0 || n_frames == 0 {
        return Array2::zeros((n_bins, 0));
    }

    let n_steps = (n_frames as f64 / rate).ceil() as usize;
    let mut stretched = Array2::zeros((n_bins, n_steps));

    // Expected phase advance per hop for each bin centre
    let phi_advance: Vec<f64> = (0..n_bins)
        .map(|k| {
            if n_bins > 1 {
                PI * hop_length as f64 * k as f64 / (n_bins - 1) as f64
            } else {
                0.0
            }
        })
        .collect();

    let mut phase_acc: Vec<f64> = spectrogram.column(0).iter().map(|c| c.arg()).collect();

    // Frames past the end read as silence
    let frame = |k: usize, t: usize| -> Complex<f64> {
        if t < n_frames {
            spectrogram[[k, t]]
        } else {
            Complex::new(0.0, 0.0)
        }
    };

    for step_index in 0..n_steps {
        let step = step_index as f64 * rate;
        let t = step.floor() as usize;
        let alpha = step - step.floor();

        for k in 0..n_bins {
            let left = frame(k, t);
            let right = frame(k, t + 1);

            let magnitude = (1.0 - alpha) * left.norm() + alpha * right.norm();
            stretched[[k, step_index]] = Complex::from_polar(magnitude, phase_acc[k]);

            let mut dphase = right.arg() - left.arg() - phi_advance[k];
            dphase -= 2.0 * PI * (dphase / (2.0 * PI)).round();
            phase_acc[k] += phi_advance[k] + dphase;
        }
    }

    stretched
}

/// Change the duration of a signal by `rate` while keeping its pitch
///
/// # Returns
/// Signal of length `round(signal.len() / rate)`
pub fn time_stretch(stft: &Stft, signal: &[f64], rate: f64) -> Result<Vec<f64>, FftError> {
    let spectrogram = stft.forward(signal)?;
    let stretched = phase_vocoder(&spectrogram, rate, stft.hop_length());
    let length = (signal.len() as f64 / rate).round() as usize;
    stft.inverse(&stretched, length)
}
