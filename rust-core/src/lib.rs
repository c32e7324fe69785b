//! Voice Workbench - offline audio cleanup and voice changing
//!
//! Wiener-filter denoising and phase-vocoder pitch shifting for audio
//! files, plus a video pipeline that swaps in the processed audio track.

pub mod audio;
pub mod config;
pub mod error;
pub mod filters;
pub mod logging;
pub mod media;
pub mod pipeline;
pub mod pitch;
pub mod scratch;
pub mod spectrum;

pub use audio::Waveform;
pub use config::Settings;
pub use error::{CleanupWarning, Error, ErrorKind, Result};
pub use filters::{WienerConfig, WienerFilter, WindowType};
pub use pipeline::{DenoisePipeline, VoiceChangePipeline};
pub use pitch::{PitchFactor, PitchShifter};
