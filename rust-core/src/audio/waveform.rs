//! Mono waveform container

use super::AudioError;

/// Mono audio samples paired with their sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl Waveform {
    /// Create a waveform
    ///
    /// # Errors
    /// `AudioError::InvalidSampleRate` when `sample_rate` is zero
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Result<Self, AudioError> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate(sample_rate));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Downmix interleaved frames to mono by averaging the channels
    pub fn from_interleaved(
        interleaved: &[f32],
        channels: usize,
        sample_rate: u32,
    ) -> Result<Self, AudioError> {
        if channels == 0 {
            return Err(AudioError::NoChannels);
        }
        let samples = interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().map(|&s| s as f64).sum::<f64>() / channels as f64)
            .collect();
        Self::new(samples, sample_rate)
    }

    /// New waveform at the same sample rate
    pub fn with_samples(&self, samples: Vec<f64>) -> Self {
        Self {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}
