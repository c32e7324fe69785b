//! WAV encoding with hound

use super::{AudioError, Waveform};
use crate::scratch::StagedOutput;
use hound::{SampleFormat, WavSpec, WavWriter};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Sample encoding used for WAV output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WavFormat {
    /// 16-bit signed integer PCM, samples clipped to [-1, 1]
    #[default]
    Pcm16,

    /// 32-bit IEEE float
    Float32,
}

/// True when `path` has a `.wav` extension (any case)
pub fn is_wav_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}

/// Write a mono WAV file
///
/// The file is written to a staged sibling and renamed onto `path` once
/// complete; an existing file at `path` is replaced.
pub fn save_wav(waveform: &Waveform, path: &Path, format: WavFormat) -> Result<(), AudioError> {
    let staged = StagedOutput::new(path)?;
    write_wav(waveform, staged.path(), format)?;
    staged.commit()?;
    Ok(())
}

/// Write a mono WAV file directly, without staging
pub fn write_wav(waveform: &Waveform, path: &Path, format: WavFormat) -> Result<(), AudioError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: waveform.sample_rate(),
        bits_per_sample: match format {
            WavFormat::Pcm16 => 16,
            WavFormat::Float32 => 32,
        },
        sample_format: match format {
            WavFormat::Pcm16 => SampleFormat::Int,
            WavFormat::Float32 => SampleFormat::Float,
        },
    };

    let file = File::create(path)?;
    let mut writer = WavWriter::new(BufWriter::new(file), spec)?;

    match format {
        WavFormat::Pcm16 => {
            for &s in waveform.samples() {
                writer.write_sample(to_pcm16(s))?;
            }
        }
        WavFormat::Float32 => {
            for &s in waveform.samples() {
                writer.write_sample(s as f32)?;
            }
        }
    }

    writer.finalize()?;

    tracing::debug!(
        path = %path.display(),
        samples = waveform.len(),
        sample_rate = waveform.sample_rate(),
        ?format,
        "wrote wav"
    );
    Ok(())
}

#[inline]
fn to_pcm16(sample: f64) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f64).round() as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::decode::load;

    #[test]
    fn test_pcm16_clipping() {
        assert_eq!(to_pcm16(0.0), 0);
        assert_eq!(to_pcm16(1.0), i16::MAX);
        assert_eq!(to_pcm16(3.5), i16::MAX);
        assert_eq!(to_pcm16(-2.0), -i16::MAX);
    }

    #[test]
    fn test_wav_extension_detection() {
        assert!(is_wav_path(Path::new("a/b/out.wav")));
        assert!(is_wav_path(Path::new("OUT.WAV")));
        assert!(!is_wav_path(Path::new("out.flac")));
        assert!(!is_wav_path(Path::new("wav")));
    }

    #[test]
    fn test_saved_wav_keeps_rate_and_length() {
        let dir = tempfile::tempdir().unwrap();
        let waveform = Waveform::new(
            (0..8000).map(|n| (n as f64 * 0.01).sin() * 0.5).collect(),
            8000,
        )
        .unwrap();

        for (name, format) in [("pcm.wav", WavFormat::Pcm16), ("float.wav", WavFormat::Float32)] {
            let path = dir.path().join(name);
            save_wav(&waveform, &path, format).unwrap();

            let loaded = load(&path).unwrap();
            assert_eq!(loaded.sample_rate(), 8000);
            assert_eq!(loaded.len(), 8000);
            assert!((loaded.samples()[100] - waveform.samples()[100]).abs() < 1e-3);
        }
    }

    #[test]
    fn test_save_into_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.wav");
        let waveform = Waveform::new(vec![0.0; 16], 8000).unwrap();

        assert!(matches!(
            save_wav(&waveform, &path, WavFormat::Pcm16),
            Err(AudioError::Io(_))
        ));
        assert!(!path.exists());
    }
}
