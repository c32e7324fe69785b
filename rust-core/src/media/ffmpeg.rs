//! Audio-track demux/remux and transcoding through ffmpeg

use super::probe::{parse_probe_json, FrameRate, VideoAsset};
use super::runner::CommandRunner;
use super::MediaError;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// ffmpeg tool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// ffmpeg executable (name on PATH or full path)
    pub ffmpeg: PathBuf,

    /// ffprobe executable
    pub ffprobe: PathBuf,

    /// Sample rate of the audio extracted from the source video
    pub extract_sample_rate: u32,

    /// Encoder for the rebuilt video stream
    pub video_codec: String,

    /// Encoder for the replacement audio stream
    pub audio_codec: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
            extract_sample_rate: 44100,
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
        }
    }
}

/// ffmpeg/ffprobe front end
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    ffmpeg: CommandRunner,
    ffprobe: CommandRunner,
    config: MediaConfig,
}

impl Ffmpeg {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            ffmpeg: CommandRunner::new(&config.ffmpeg),
            ffprobe: CommandRunner::new(&config.ffprobe),
            config: config.clone(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.ffmpeg.is_available() && self.ffprobe.is_available()
    }

    /// Read frame rate, frame count and audio presence of a video
    pub fn probe(&self, video: &Path) -> Result<VideoAsset, MediaError> {
        let mut args: Vec<OsString> = ["-v", "error", "-show_streams", "-show_format", "-of", "json"]
            .iter()
            .map(OsString::from)
            .collect();
        args.push(video.as_os_str().to_os_string());

        let output = self.ffprobe.run(&args)?;
        let asset = parse_probe_json(&output.stdout, video)?;

        tracing::debug!(
            path = %video.display(),
            frame_rate = %asset.frame_rate,
            frame_count = ?asset.frame_count,
            has_audio = asset.has_audio(),
            "probed video"
        );
        Ok(asset)
    }

    /// Write the first audio stream of `video` to `dest` as 16-bit PCM WAV
    pub fn extract_audio(&self, video: &Path, dest: &Path) -> Result<(), MediaError> {
        let rate = self.config.extract_sample_rate.to_string();
        let args: Vec<OsString> = vec![
            "-y".into(),
            "-v".into(),
            "error".into(),
            "-i".into(),
            video.as_os_str().to_os_string(),
            "-map".into(),
            "0:a:0".into(),
            "-vn".into(),
            "-acodec".into(),
            "pcm_s16le".into(),
            "-ar".into(),
            rate.into(),
            dest.as_os_str().to_os_string(),
        ];
        self.ffmpeg.run(&args)?;
        Ok(())
    }

    /// Mux the video stream of `video` with `audio` into `dest`
    ///
    /// The video is re-encoded at exactly `frame_rate`; the source audio
    /// track is discarded.
    pub fn replace_audio(
        &self,
        video: &Path,
        audio: &Path,
        frame_rate: FrameRate,
        dest: &Path,
    ) -> Result<(), MediaError> {
        let args: Vec<OsString> = vec![
            "-y".into(),
            "-v".into(),
            "error".into(),
            "-i".into(),
            video.as_os_str().to_os_string(),
            "-i".into(),
            audio.as_os_str().to_os_string(),
            "-map".into(),
            "0:v:0".into(),
            "-map".into(),
            "1:a:0".into(),
            "-c:v".into(),
            self.config.video_codec.clone().into(),
            "-r".into(),
            frame_rate.to_string().into(),
            "-c:a".into(),
            self.config.audio_codec.clone().into(),
            dest.as_os_str().to_os_string(),
        ];
        self.ffmpeg.run(&args)?;
        Ok(())
    }

    /// Convert an audio file to the format implied by `dest`'s extension
    pub fn transcode_audio(&self, source: &Path, dest: &Path) -> Result<(), MediaError> {
        let args: Vec<OsString> = vec![
            "-y".into(),
            "-v".into(),
            "error".into(),
            "-i".into(),
            source.as_os_str().to_os_string(),
            dest.as_os_str().to_os_string(),
        ];
        self.ffmpeg.run(&args)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MediaConfig::default();
        assert_eq!(config.extract_sample_rate, 44100);
        assert_eq!(config.video_codec, "libx264");
        assert_eq!(config.audio_codec, "aac");
    }

    #[test]
    fn test_missing_tools_reported() {
        let config = MediaConfig {
            ffmpeg: PathBuf::from("voice-workbench-missing-ffmpeg"),
            ffprobe: PathBuf::from("voice-workbench-missing-ffprobe"),
            ..Default::default()
        };
        let tools = Ffmpeg::new(&config);

        assert!(!tools.is_available());
        assert!(matches!(
            tools.probe(Path::new("clip.mp4")),
            Err(MediaError::ToolNotFound(_))
        ));
    }
}
