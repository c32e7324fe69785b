//! Audio file loading and saving
//!
//! Decoding goes through symphonia, so any supported container/codec can
//! be read; output is written as WAV with hound.

pub mod waveform;
pub mod decode;
pub mod encode;

pub use waveform::Waveform;
pub use decode::load;
pub use encode::{is_wav_path, save_wav, WavFormat};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unrecognised audio format: {0}")]
    Probe(String),

    #[error("no decodable audio track found")]
    NoAudioTrack,

    #[error("decoder error: {0}")]
    Decoder(String),

    #[error("stream does not declare a sample rate")]
    UnknownSampleRate,

    #[error("audio has no channels")]
    NoChannels,

    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}
