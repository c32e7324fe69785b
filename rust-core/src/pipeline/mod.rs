//! End-to-end processing pipelines behind the two command-line tools

pub mod denoise;
pub mod voice;

pub use denoise::{DenoisePipeline, DenoiseReport};
pub use voice::{VoiceChangePipeline, VoiceChangeReport};

use crate::audio::{self, WavFormat, Waveform};
use crate::error::{Error, Result};
use crate::filters::WienerFilter;
use crate::media::Ffmpeg;
use crate::scratch::{ScratchDir, StagedOutput};
use std::path::Path;

/// Fail early when the input path does not exist
pub(crate) fn ensure_input_exists(input: &Path) -> Result<()> {
    if !input.exists() {
        return Err(Error::InputNotFound(input.to_path_buf()));
    }
    Ok(())
}

pub(crate) fn load_audio(path: &Path) -> Result<Waveform> {
    audio::load(path).map_err(|e| Error::decode(path, e))
}

pub(crate) fn denoise(filter: &WienerFilter, waveform: &Waveform) -> Result<Waveform> {
    let cleaned = filter.apply(waveform.samples())?;
    Ok(waveform.with_samples(cleaned))
}

/// Fresh scratch directory under `root`, or the system temp location
pub(crate) fn create_scratch(root: Option<&Path>, prefix: &str) -> Result<ScratchDir> {
    let scratch = match root {
        Some(root) => ScratchDir::create_in(root, prefix)?,
        None => ScratchDir::create(prefix)?,
    };
    Ok(scratch)
}

/// Write a waveform to `output`, choosing the encoder from its extension
///
/// WAV is encoded directly; anything else is encoded as WAV in a scratch
/// directory and converted by ffmpeg.
pub(crate) fn save_audio(
    waveform: &Waveform,
    output: &Path,
    format: WavFormat,
    tools: &Ffmpeg,
    scratch_root: Option<&Path>,
) -> Result<()> {
    if audio::is_wav_path(output) {
        return audio::save_wav(waveform, output, format).map_err(|e| Error::encode(output, e));
    }

    tracing::debug!(path = %output.display(), "non-WAV output, transcoding with ffmpeg");
    let scratch = create_scratch(scratch_root, "noise-eraser-")?;
    let intermediate = scratch.file("cleaned.wav");

    let result = audio::encode::write_wav(waveform, &intermediate, format)
        .map_err(|e| Error::encode(&intermediate, e))
        .and_then(|()| {
            let staged = StagedOutput::new(output)?;
            tools
                .transcode_audio(&intermediate, staged.path())
                .map_err(|e| Error::encode(output, e))?;
            staged.commit()?;
            Ok(())
        });

    if let Err(warning) = scratch.close() {
        tracing::warn!("{}", warning);
    }
    result
}
