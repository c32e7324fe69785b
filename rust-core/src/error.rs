//! Crate-level error type

use crate::audio::AudioError;
use crate::filters::FilterError;
use crate::media::MediaError;
use crate::pitch::ShiftError;
use std::path::PathBuf;
use thiserror::Error;

pub use crate::scratch::CleanupWarning;

#[derive(Error, Debug)]
pub enum Error {
    #[error("input file '{}' does not exist", .0.display())]
    InputNotFound(PathBuf),

    /// Factor that is not finite, not positive, or more than
    /// [`MAX_SEMITONES`](crate::pitch::MAX_SEMITONES) away from 1.0.
    ///
    /// The bound exists because the phase-vocoder stretch buffer is
    /// `factor` times the input length; without it a large factor grows that
    /// buffer without limit.
    #[error("pitch factor must be a positive number within 4 octaves of 1.0, got {0}")]
    InvalidPitchFactor(f64),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to decode '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: AudioError,
    },

    #[error("failed to encode '{}': {reason}", .path.display())]
    Encode { path: PathBuf, reason: String },

    #[error("noise filter failed: {0}")]
    Filter(#[from] FilterError),

    #[error("pitch shift failed: {0}")]
    Shift(#[from] ShiftError),

    #[error("'{}' has no audio track", .0.display())]
    NoAudioTrack(PathBuf),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broad class of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad paths, factors or settings; nothing was processed
    InputValidation,
    Decode,
    Encode,
    /// Filtering or pitch shifting
    Processing,
    /// ffmpeg/ffprobe problems
    Media,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InputNotFound(_) | Error::InvalidPitchFactor(_) | Error::Config(_) => {
                ErrorKind::InputValidation
            }
            Error::Decode { .. } | Error::NoAudioTrack(_) => ErrorKind::Decode,
            Error::Encode { .. } => ErrorKind::Encode,
            Error::Filter(_) | Error::Shift(_) => ErrorKind::Processing,
            Error::Media(_) => ErrorKind::Media,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn decode(path: &std::path::Path, source: AudioError) -> Self {
        Error::Decode {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn encode(path: &std::path::Path, reason: impl ToString) -> Self {
        Error::Encode {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
