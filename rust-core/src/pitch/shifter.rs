//! Pitch shifter: phase-vocoder stretch followed by resampling

use super::resample::resample;
use super::vocoder::time_stretch;
use super::{PitchFactor, ShiftError};
use crate::audio::Waveform;
use crate::filters::WindowType;
use crate::spectrum::Stft;
use serde::{Deserialize, Serialize};

/// Pitch shifter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchShiftConfig {
    /// STFT frame length (even)
    pub n_fft: usize,

    /// STFT hop in samples
    pub hop_length: usize,

    /// Analysis/synthesis window
    pub window: WindowType,
}

impl Default for PitchShiftConfig {
    fn default() -> Self {
        Self {
            n_fft: 2048,
            hop_length: 512,
            window: WindowType::Hann,
        }
    }
}

impl PitchShiftConfig {
    pub fn validate(&self) -> Result<(), ShiftError> {
        if self.n_fft < 4 || self.n_fft % 2 != 0 {
            return Err(ShiftError::InvalidConfig(format!(
                "n_fft must be even and at least 4, got {}",
                self.n_fft
            )));
        }
        if self.hop_length == 0 || self.hop_length > self.n_fft {
            return Err(ShiftError::InvalidConfig(format!(
                "hop_length must be in 1..={}, got {}",
                self.n_fft, self.hop_length
            )));
        }
        if self.window == WindowType::Rectangular && self.hop_length == self.n_fft {
            tracing::warn!("rectangular window without overlap will produce audible frame edges");
        }
        Ok(())
    }
}

/// Duration-preserving pitch shifter
pub struct PitchShifter {
    stft: Stft,
}

impl PitchShifter {
    pub fn new(config: &PitchShiftConfig) -> Result<Self, ShiftError> {
        config.validate()?;
        Ok(Self {
            stft: Stft::new(config.n_fft, config.hop_length, config.window),
        })
    }

    /// Shift the pitch of `waveform` by `factor`
    ///
    /// # Returns
    /// Waveform with the same length and sample rate
    pub fn shift(&self, waveform: &Waveform, factor: PitchFactor) -> Result<Waveform, ShiftError> {
        let semitones = factor.semitones();
        if waveform.is_empty() || semitones == 0.0 {
            return Ok(waveform.clone());
        }

        // Stretch by `rate`, then play back `rate` times faster at the original rate
        let rate = 2f64.powf(-semitones / 12.0);
        tracing::debug!(semitones, rate, samples = waveform.len(), "shifting pitch");

        let stretched = time_stretch(&self.stft, waveform.samples(), rate)?;
        let mut shifted = resample(&stretched, rate).map_err(ShiftError::Resample)?;
        shifted.resize(waveform.len(), 0.0);

        Ok(waveform.with_samples(shifted))
    }
}
