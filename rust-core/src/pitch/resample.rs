//! Band-limited resampling with rubato
//!
//! Whole-buffer helper around `SincFixedIn`: feeds fixed-size chunks,
//! flushes the interpolator tail with silence and drops its latency so the
//! output lines up sample-for-sample with the input.

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

/// Input chunk length fed to the resampler
const CHUNK_SIZE: usize = 1024;

/// Sinc interpolation kernel length
const SINC_LEN: usize = 256;

/// Resample `signal` by `ratio` (output rate / input rate)
///
/// # Returns
/// `ceil(signal.len() * ratio)` samples
pub fn resample(signal: &[f64], ratio: f64) -> Result<Vec<f64>, String> {
    if signal.is_empty() {
        return Ok(Vec::new());
    }
    if (ratio - 1.0).abs() < f64::EPSILON {
        return Ok(signal.to_vec());
    }

    let params = SincInterpolationParameters {
        sinc_len: SINC_LEN,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f64>::new(ratio, 1.0, params, CHUNK_SIZE, 1)
        .map_err(|e| format!("failed to create resampler: {}", e))?;

    let expected = (signal.len() as f64 * ratio).ceil() as usize;
    // Interpolator latency, in output samples
    let delay = (SINC_LEN as f64 / 2.0 * ratio) as usize;

    // Pad with silence so the tail (and the latency) comes out in full chunks
    let needed_input = signal.len() + SINC_LEN + CHUNK_SIZE;
    let padded_len = needed_input.div_ceil(CHUNK_SIZE) * CHUNK_SIZE;
    let mut padded = signal.to_vec();
    padded.resize(padded_len, 0.0);

    let mut output = Vec::with_capacity(expected + delay + CHUNK_SIZE);
    for chunk in padded.chunks_exact(CHUNK_SIZE) {
        let frames = resampler
            .process(&[chunk], None)
            .map_err(|e| format!("resampling failed: {}", e))?;
        if let Some(channel) = frames.into_iter().next() {
            output.extend(channel);
        }
    }

    let mut aligned: Vec<f64> = output.into_iter().skip(delay).collect();
    aligned.resize(expected, 0.0);
    Ok(aligned)
}
