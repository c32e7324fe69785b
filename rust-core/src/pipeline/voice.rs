//! Video voice changer: extract audio → denoise → pitch shift → remux
//!
//! Intermediate audio lives in a per-run scratch directory that is removed
//! on every exit path. The rebuilt video is staged next to the output and
//! only moved into place once ffmpeg has finished.

use super::{create_scratch, denoise, ensure_input_exists, load_audio};
use crate::audio::encode::write_wav;
use crate::config::Settings;
use crate::error::{CleanupWarning, Error, Result};
use crate::filters::WienerFilter;
use crate::media::{Ffmpeg, FrameRate, VideoAsset};
use crate::pitch::{PitchFactor, PitchShifter};
use crate::scratch::{ScratchDir, StagedOutput};
use crate::spectrum::dominant_frequency;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const SOURCE_AUDIO: &str = "source_audio.wav";
const PROCESSED_AUDIO: &str = "processed_audio.wav";

/// Summary of a finished voice-change run
#[derive(Debug)]
pub struct VoiceChangeReport {
    pub output: PathBuf,
    pub frame_rate: FrameRate,
    pub semitones: f64,
    pub sample_rate: u32,
    /// Strongest frequency of the extracted audio, before processing
    pub dominant_hz_before: Option<f64>,
    /// Strongest frequency of the processed audio
    pub dominant_hz_after: Option<f64>,
    /// Set when the scratch directory could not be fully removed
    pub cleanup_warning: Option<CleanupWarning>,
}

/// Denoises and pitch-shifts the audio track of a video
pub struct VoiceChangePipeline {
    settings: Settings,
}

impl VoiceChangePipeline {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn run(&self, input: &Path, output: &Path, pitch_factor: f64) -> Result<VoiceChangeReport> {
        ensure_input_exists(input)?;
        let factor = PitchFactor::new(pitch_factor).map_err(Error::InvalidPitchFactor)?;
        self.settings.validate()?;

        let filter = WienerFilter::new(self.settings.wiener.clone())?;
        let shifter = PitchShifter::new(&self.settings.pitch_shift)?;
        let tools = Ffmpeg::new(&self.settings.media);

        info!(input = %input.display(), "loading video");
        let video = tools.probe(input)?;
        if !video.has_audio() {
            return Err(Error::NoAudioTrack(input.to_path_buf()));
        }

        let scratch = create_scratch(self.settings.scratch_dir.as_deref(), "voice-changer-")?;
        let result = self.process(&tools, &filter, &shifter, &video, factor, &scratch, output);

        let cleanup_warning = match scratch.close() {
            Ok(()) => None,
            Err(warning) => {
                warn!("{}", warning);
                Some(warning)
            }
        };

        let mut report = result?;
        report.cleanup_warning = cleanup_warning;
        info!(output = %output.display(), "voice change complete");
        Ok(report)
    }

    #[allow(clippy::too_many_arguments)]
    fn process(
        &self,
        tools: &Ffmpeg,
        filter: &WienerFilter,
        shifter: &PitchShifter,
        video: &VideoAsset,
        factor: PitchFactor,
        scratch: &ScratchDir,
        output: &Path,
    ) -> Result<VoiceChangeReport> {
        let source_audio = scratch.file(SOURCE_AUDIO);
        info!("extracting audio");
        tools.extract_audio(&video.path, &source_audio)?;

        info!("processing audio");
        let waveform = load_audio(&source_audio)?;
        let dominant_hz_before = dominant_frequency(&waveform);

        info!("removing noise");
        let cleaned = denoise(filter, &waveform)?;

        info!(factor = factor.value(), semitones = factor.semitones(), "shifting pitch");
        let shifted = shifter.shift(&cleaned, factor)?;
        let dominant_hz_after = dominant_frequency(&shifted);
        debug!(?dominant_hz_before, ?dominant_hz_after, "dominant frequency");

        let processed_audio = scratch.file(PROCESSED_AUDIO);
        write_wav(&shifted, &processed_audio, self.settings.output.wav_format)
            .map_err(|e| Error::encode(&processed_audio, e))?;

        info!(frame_rate = %video.frame_rate, "merging audio into video");
        let staged = StagedOutput::new(output)?;
        tools.replace_audio(&video.path, &processed_audio, video.frame_rate, staged.path())?;

        info!(output = %output.display(), "saving video");
        staged.commit()?;

        Ok(VoiceChangeReport {
            output: output.to_path_buf(),
            frame_rate: video.frame_rate,
            semitones: factor.semitones(),
            sample_rate: shifted.sample_rate(),
            dominant_hz_before,
            dominant_hz_after,
            cleanup_warning: None,
        })
    }
}
