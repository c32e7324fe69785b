//! Duration-preserving pitch shifting
//!
//! Time-stretch with a phase vocoder, then resample back to the original
//! length: the net effect moves every partial by the same ratio.

pub mod vocoder;
pub mod resample;
pub mod shifter;

pub use shifter::{PitchShiftConfig, PitchShifter};

use thiserror::Error;

/// Largest accepted shift in either direction, in semitones (4 octaves)
///
/// The stretched signal is `factor` times the input length, so an
/// unbounded factor means an unbounded intermediate buffer.
pub const MAX_SEMITONES: f64 = 48.0;

#[derive(Error, Debug)]
pub enum ShiftError {
    #[error("FFT error: {0}")]
    Fft(#[from] realfft::FftError),

    #[error("{0}")]
    Resample(String),

    #[error("invalid pitch shift configuration: {0}")]
    InvalidConfig(String),
}

/// Pitch change ratio, validated to be finite, positive and within ±4 octaves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchFactor(f64);

impl PitchFactor {
    /// Validate a raw factor
    ///
    /// # Returns
    /// The rejected value on failure
    pub fn new(factor: f64) -> Result<Self, f64> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(factor);
        }
        if (12.0 * factor.log2()).abs() > MAX_SEMITONES {
            return Err(factor);
        }
        Ok(Self(factor))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Shift in semitones: 12 * log2(factor)
    pub fn semitones(&self) -> f64 {
        12.0 * self.0.log2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semitones() {
        assert!((PitchFactor::new(2.0).unwrap().semitones() - 12.0).abs() < 1e-12);
        assert!((PitchFactor::new(0.5).unwrap().semitones() + 12.0).abs() < 1e-12);
        assert_eq!(PitchFactor::new(1.0).unwrap().semitones(), 0.0);

        let default_factor = PitchFactor::new(1.5).unwrap();
        assert!((default_factor.semitones() - 7.019550008653874).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_positive_and_non_finite() {
        for bad in [0.0, -1.0, -0.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(PitchFactor::new(bad).is_err(), "{} accepted", bad);
        }
    }

    #[test]
    fn test_rejects_beyond_four_octaves() {
        assert!(PitchFactor::new(16.0).is_ok());
        assert!(PitchFactor::new(1.0 / 16.0).is_ok());
        assert!(PitchFactor::new(17.0).is_err());
        assert!(PitchFactor::new(0.05).is_err());
    }
}
