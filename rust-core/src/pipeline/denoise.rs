//! Audio denoising: load → Wiener filter → save

use super::{denoise, ensure_input_exists, load_audio, save_audio};
use crate::config::Settings;
use crate::error::Result;
use crate::filters::WienerFilter;
use crate::media::Ffmpeg;
use std::path::{Path, PathBuf};
use tracing::info;

/// Summary of a finished denoise run
#[derive(Debug, Clone, PartialEq)]
pub struct DenoiseReport {
    pub output: PathBuf,
    pub sample_rate: u32,
    pub samples: usize,
    pub duration_secs: f64,
}

/// Removes broadband noise from an audio file
pub struct DenoisePipeline {
    settings: Settings,
}

impl DenoisePipeline {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn run(&self, input: &Path, output: &Path) -> Result<DenoiseReport> {
        ensure_input_exists(input)?;
        self.settings.validate()?;
        let filter = WienerFilter::new(self.settings.wiener.clone())?;

        info!(input = %input.display(), "loading audio");
        let waveform = load_audio(input)?;
        info!(
            sample_rate = waveform.sample_rate(),
            duration_secs = waveform.duration_secs(),
            "loaded audio"
        );

        info!("removing noise");
        let cleaned = denoise(&filter, &waveform)?;

        info!(output = %output.display(), "saving audio");
        let tools = Ffmpeg::new(&self.settings.media);
        save_audio(
            &cleaned,
            output,
            self.settings.output.wav_format,
            &tools,
            self.settings.scratch_dir.as_deref(),
        )?;

        info!(output = %output.display(), "denoising complete");
        Ok(DenoiseReport {
            output: output.to_path_buf(),
            sample_rate: cleaned.sample_rate(),
            samples: cleaned.len(),
            duration_secs: cleaned.duration_secs(),
        })
    }
}
