//! Video container handling through the ffmpeg command-line tools
//!
//! Probing, audio extraction and audio-track replacement are delegated to
//! `ffprobe`/`ffmpeg` subprocesses; nothing here decodes video itself.

pub mod runner;
pub mod probe;
pub mod ffmpeg;

pub use ffmpeg::{Ffmpeg, MediaConfig};
pub use probe::{AudioTrackInfo, FrameRate, VideoAsset};
pub use runner::CommandRunner;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("'{0}' not found; is it installed and on PATH?")]
    ToolNotFound(String),

    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with status {}: {stderr}", .status.map(|c| c.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    CommandFailed {
        program: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("invalid probe output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("probe failed: {0}")]
    Probe(String),

    #[error("'{}' has no video stream", .0.display())]
    NoVideoStream(PathBuf),
}
