//! Spectral analysis and STFT processing

pub mod fft;
pub mod windowing;
pub mod stft;
pub mod analysis;

pub use fft::FftEngine;
pub use windowing::apply_window;
pub use stft::Stft;
pub use analysis::dominant_frequency;
