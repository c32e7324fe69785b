//! Denoise pipeline end to end on generated WAV files

use hound::{SampleFormat, WavSpec, WavWriter};
use std::f64::consts::PI;
use std::path::Path;
use voice_workbench::audio::{self, WavFormat};
use voice_workbench::{DenoisePipeline, Error, ErrorKind, Settings};

fn write_tone(path: &Path, freq: f64, sample_rate: u32, seconds: f64, noise: f64) {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    let len = (sample_rate as f64 * seconds) as usize;

    let mut state: u32 = 12345;
    for n in 0..len {
        state = state.wrapping_mul(1103515245).wrapping_add(12345);
        let jitter = ((state >> 16) as f64 / 32768.0 - 1.0) * noise;
        let value = 0.5 * (2.0 * PI * freq * n as f64 / sample_rate as f64).sin() + jitter;
        writer
            .write_sample((value.clamp(-1.0, 1.0) * i16::MAX as f64) as i16)
            .unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn test_one_second_tone_keeps_rate_and_duration() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tone.wav");
    let output = dir.path().join("clean.wav");
    write_tone(&input, 440.0, 16000, 1.0, 0.0);

    let report = DenoisePipeline::new(Settings::default())
        .run(&input, &output)
        .unwrap();

    assert!(output.exists());
    assert_eq!(report.sample_rate, 16000);
    assert_eq!(report.samples, 16000);

    let loaded = audio::load(&output).unwrap();
    assert_eq!(loaded.sample_rate(), 16000);
    assert_eq!(loaded.len(), 16000);
    assert!((loaded.duration_secs() - 1.0).abs() < 1e-9);
}

#[test]
fn test_noisy_input_gets_quieter_residual() {
    let dir = tempfile::tempdir().unwrap();
    let clean_path = dir.path().join("clean.wav");
    let noisy_path = dir.path().join("noisy.wav");
    let output = dir.path().join("denoised.wav");
    write_tone(&clean_path, 440.0, 16000, 1.0, 0.0);
    write_tone(&noisy_path, 440.0, 16000, 1.0, 0.2);

    let mut settings = Settings::default();
    settings.output.wav_format = WavFormat::Float32;
    DenoisePipeline::new(settings).run(&noisy_path, &output).unwrap();

    let clean = audio::load(&clean_path).unwrap();
    let noisy = audio::load(&noisy_path).unwrap();
    let denoised = audio::load(&output).unwrap();

    let residual = |w: &voice_workbench::Waveform| {
        w.samples()
            .iter()
            .zip(clean.samples())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
    };
    assert!(residual(&denoised) < residual(&noisy));
}

#[test]
fn test_overwrites_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tone.wav");
    let output = dir.path().join("out.wav");
    write_tone(&input, 440.0, 8000, 0.5, 0.0);
    std::fs::write(&output, b"stale").unwrap();

    DenoisePipeline::new(Settings::default())
        .run(&input, &output)
        .unwrap();

    assert_eq!(audio::load(&output).unwrap().len(), 4000);
}

#[test]
fn test_missing_input_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("absent.wav");
    let output = dir.path().join("out.wav");

    let err = DenoisePipeline::new(Settings::default())
        .run(&input, &output)
        .unwrap_err();

    assert!(matches!(err, Error::InputNotFound(_)));
    assert_eq!(err.kind(), ErrorKind::InputValidation);
    assert!(!output.exists());
}

#[test]
fn test_corrupt_input_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.wav");
    let output = dir.path().join("out.wav");
    std::fs::write(&input, b"RIFF....not really a wave file").unwrap();

    let err = DenoisePipeline::new(Settings::default())
        .run(&input, &output)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(!output.exists());
}
