//! Video stream properties from ffprobe JSON

use super::MediaError;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Exact frame rate as a rational number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRate {
    pub num: u32,
    pub den: u32,
}

impl FrameRate {
    pub fn as_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl FromStr for FrameRate {
    type Err = MediaError;

    /// Parse ffprobe's "num/den" (or plain integer) notation
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MediaError::Probe(format!("invalid frame rate '{}'", s));

        let (num, den) = match s.trim().split_once('/') {
            Some((n, d)) => (n.trim(), d.trim()),
            None => (s.trim(), "1"),
        };
        let num: u32 = num.parse().map_err(|_| invalid())?;
        let den: u32 = den.parse().map_err(|_| invalid())?;

        if num == 0 || den == 0 {
            return Err(invalid());
        }
        Ok(Self { num, den })
    }
}

/// Properties of the source video needed to rebuild it
#[derive(Debug, Clone, PartialEq)]
pub struct VideoAsset {
    pub path: PathBuf,
    pub frame_rate: FrameRate,
    pub frame_count: Option<u64>,
    pub duration_secs: Option<f64>,
    pub audio: Option<AudioTrackInfo>,
}

impl VideoAsset {
    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }
}

/// First audio stream of a container
#[derive(Debug, Clone, PartialEq)]
pub struct AudioTrackInfo {
    pub codec: Option<String>,
    pub sample_rate: Option<u32>,
    pub channels: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
    nb_frames: Option<String>,
    duration: Option<String>,
    sample_rate: Option<String>,
    channels: Option<u32>,
    #[serde(default)]
    disposition: ProbeDisposition,
}

#[derive(Debug, Default, Deserialize)]
struct ProbeDisposition {
    #[serde(default)]
    attached_pic: u8,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Build a `VideoAsset` from `ffprobe -show_streams -show_format -of json`
pub fn parse_probe_json(json: &str, path: &Path) -> Result<VideoAsset, MediaError> {
    let probe: ProbeOutput = serde_json::from_str(json)?;

    // Cover art shows up as a video stream; skip it
    let video = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video") && s.disposition.attached_pic == 0)
        .ok_or_else(|| MediaError::NoVideoStream(path.to_path_buf()))?;

    let frame_rate = [&video.r_frame_rate, &video.avg_frame_rate]
        .into_iter()
        .flatten()
        .find_map(|rate| rate.parse::<FrameRate>().ok())
        .ok_or_else(|| MediaError::Probe(format!("no usable frame rate in '{}'", path.display())))?;

    let frame_count = video.nb_frames.as_deref().and_then(|n| n.parse().ok());

    let duration_secs = video
        .duration
        .as_deref()
        .or_else(|| probe.format.as_ref().and_then(|f| f.duration.as_deref()))
        .and_then(|d| d.parse().ok());

    let audio = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"))
        .map(|s| AudioTrackInfo {
            codec: s.codec_name.clone(),
            sample_rate: s.sample_rate.as_deref().and_then(|r| r.parse().ok()),
            channels: s.channels,
        });

    Ok(VideoAsset {
        path: path.to_path_buf(),
        frame_rate,
        frame_count,
        duration_secs,
        audio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "streams": [
            {
                "index": 0,
                "codec_name": "h264",
                "codec_type": "video",
                "r_frame_rate": "30000/1001",
                "avg_frame_rate": "30000/1001",
                "nb_frames": "300",
                "duration": "10.010000",
                "disposition": { "default": 1, "attached_pic": 0 }
            },
            {
                "index": 1,
                "codec_name": "aac",
                "codec_type": "audio",
                "sample_rate": "48000",
                "channels": 2
            }
        ],
        "format": { "duration": "10.032000" }
    }"#;

    #[test]
    fn test_parse_frame_rate() {
        let rate: FrameRate = "30000/1001".parse().unwrap();
        assert_eq!(rate, FrameRate { num: 30000, den: 1001 });
        assert!((rate.as_f64() - 29.97).abs() < 0.01);
        assert_eq!(rate.to_string(), "30000/1001");

        let rate: FrameRate = "25".parse().unwrap();
        assert_eq!(rate.to_string(), "25");

        assert!("0/0".parse::<FrameRate>().is_err());
        assert!("abc".parse::<FrameRate>().is_err());
    }

    #[test]
    fn test_parse_probe_output() {
        let asset = parse_probe_json(SAMPLE, Path::new("clip.mp4")).unwrap();

        assert_eq!(asset.frame_rate, FrameRate { num: 30000, den: 1001 });
        assert_eq!(asset.frame_count, Some(300));
        assert_eq!(asset.duration_secs, Some(10.01));
        assert!(asset.has_audio());

        let audio = asset.audio.unwrap();
        assert_eq!(audio.codec.as_deref(), Some("aac"));
        assert_eq!(audio.sample_rate, Some(48000));
        assert_eq!(audio.channels, Some(2));
    }

    #[test]
    fn test_falls_back_to_average_frame_rate() {
        let json = r#"{"streams": [
            {"codec_type": "video", "r_frame_rate": "0/0", "avg_frame_rate": "24/1"}
        ]}"#;
        let asset = parse_probe_json(json, Path::new("clip.mkv")).unwrap();
        assert_eq!(asset.frame_rate, FrameRate { num: 24, den: 1 });
        assert_eq!(asset.frame_count, None);
        assert!(!asset.has_audio());
    }

    #[test]
    fn test_cover_art_is_not_a_video_stream() {
        let json = r#"{"streams": [
            {"codec_type": "audio", "sample_rate": "44100", "channels": 2},
            {"codec_type": "video", "r_frame_rate": "90000/1", "disposition": {"attached_pic": 1}}
        ]}"#;
        assert!(matches!(
            parse_probe_json(json, Path::new("song.mp3")),
            Err(MediaError::NoVideoStream(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_probe_json("not json", Path::new("x.mp4")),
            Err(MediaError::Json(_))
        ));
    }
}
