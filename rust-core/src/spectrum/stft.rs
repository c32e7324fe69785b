//! Short-time Fourier transform and its inverse
//!
//! Frames are centred: the signal is zero-padded by n_fft/2 on both sides,
//! so frame t covers samples around t*hop. The inverse uses weighted
//! overlap-add normalised by the summed squared window, which makes
//! forward + inverse an identity for any window with non-zero overlap sum.

use crate::filters::windows::{generate_periodic_window, WindowType};
use ndarray::Array2;
use num_complex::Complex;
use realfft::{ComplexToReal, FftError, RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// STFT processor
pub struct Stft {
    n_fft: usize,
    hop_length: usize,
    window: Vec<f64>,
    r2c: Arc<dyn RealToComplex<f64>>,
    c2r: Arc<dyn ComplexToReal<f64>>,
}

impl Stft {
    /// Create an STFT processor
    ///
    /// # Arguments
    /// * `n_fft` - Frame length (even)
    /// * `hop_length` - Frame advance in samples
    /// * `window_type` - Analysis/synthesis window (periodic form)
    ///
    /// `hop_length` must be non-zero; `PitchShiftConfig::validate` checks
    /// this before any `Stft` is built.
    pub(crate) fn new(n_fft: usize, hop_length: usize, window_type: WindowType) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(n_fft);
        let c2r = planner.plan_fft_inverse(n_fft);

        Self {
            n_fft,
            hop_length,
            window: generate_periodic_window(window_type, n_fft),
            r2c,
            c2r,
        }
    }

    pub fn n_fft(&self) -> usize {
        self.n_fft
    }

    pub fn hop_length(&self) -> usize {
        self.hop_length
    }

    /// Number of frequency bins per frame
    pub fn num_bins(&self) -> usize {
        self.n_fft / 2 + 1
    }

    /// Forward transform
    ///
    /// # Returns
    /// Complex spectrogram of shape (bins, frames)
    pub fn forward(&self, signal: &[f64]) -> Result<Array2<Complex<f64>>, FftError> {
        let pad = self.n_fft / 2;
        let mut padded = vec![0.0; signal.len() + 2 * pad];
        padded[pad..pad + signal.len()].copy_from_slice(signal);

        let n_frames = 1 + (padded.len() - self.n_fft) / self.hop_length;
        let mut spectrogram = Array2::zeros((self.num_bins(), n_frames));

        let mut frame = self.r2c.make_input_vec();
        let mut spectrum = self.r2c.make_output_vec();

        for t in 0..n_frames {
            let start = t * self.hop_length;
            for ((dst, &src), &w) in frame
                .iter_mut()
                .zip(&padded[start..start + self.n_fft])
                .zip(&self.window)
            {
                *dst = src * w;
            }

            self.r2c.process(&mut frame, &mut spectrum)?;

            for (k, &value) in spectrum.iter().enumerate() {
                spectrogram[[k, t]] = value;
            }
        }

        Ok(spectrogram)
    }

    /// Inverse transform
    ///
    /// # Arguments
    /// * `spectrogram` - Complex spectrogram of shape (bins, frames)
    /// * `length` - Exact number of output samples (trimmed or zero-padded)
    pub fn inverse(
        &self,
        spectrogram: &Array2<Complex<f64>>,
        length: usize,
    ) -> Result<Vec<f64>, FftError> {
        let pad = self.n_fft / 2;

        // Frames beyond what `length` can use are dropped
        let padded_length = length + 2 * pad;
        let n_frames = spectrogram
            .ncols()
            .min(padded_length.div_ceil(self.hop_length));

        if n_frames == 0 {
            return Ok(vec![0.0; length]);
        }

        let expected_len = self.n_fft + self.hop_length * (n_frames - 1);
        let mut output = vec![0.0; expected_len];
        let mut window_sum = vec![0.0; expected_len];

        let mut spectrum = self.c2r.make_input_vec();
        let mut frame = self.c2r.make_output_vec();
        let last_bin = spectrum.len() - 1;
        let scale = 1.0 / self.n_fft as f64;

        for t in 0..n_frames {
            for (k, dst) in spectrum.iter_mut().enumerate() {
                *dst = spectrogram[[k, t]];
            }
            // A real signal has purely real DC and Nyquist bins
            spectrum[0].im = 0.0;
            spectrum[last_bin].im = 0.0;

            self.c2r.process(&mut spectrum, &mut frame)?;

            let start = t * self.hop_length;
            for (i, (&sample, &w)) in frame.iter().zip(&self.window).enumerate() {
                output[start + i] += sample * scale * w;
                window_sum[start + i] += w * w;
            }
        }

        for (sample, &norm) in output.iter_mut().zip(&window_sum) {
            if norm > f64::MIN_POSITIVE {
                *sample /= norm;
            }
        }

        let mut trimmed: Vec<f64> = output.into_iter().skip(pad).collect();
        trimmed.resize(length, 0.0);
        Ok(trimmed)
    }
}
