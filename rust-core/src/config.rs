//! Settings shared by both tools
//!
//! Every field has a default, so a settings file only needs the values it
//! changes.

use crate::audio::WavFormat;
use crate::error::{Error, Result};
use crate::filters::WienerConfig;
use crate::media::MediaConfig;
use crate::pitch::PitchShiftConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output file options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub wav_format: WavFormat,
}

/// Complete settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub wiener: WienerConfig,
    pub pitch_shift: PitchShiftConfig,
    pub media: MediaConfig,
    pub output: OutputConfig,

    /// Parent of the per-run scratch directories; system temp when unset
    pub scratch_dir: Option<PathBuf>,
}

impl Settings {
    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.wiener
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;
        self.pitch_shift
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;
        if self.media.extract_sample_rate == 0 {
            return Err(Error::Config("extract_sample_rate must be positive".into()));
        }
        if self.media.video_codec.trim().is_empty() || self.media.audio_codec.trim().is_empty() {
            return Err(Error::Config("codec names must not be empty".into()));
        }
        Ok(())
    }
}
