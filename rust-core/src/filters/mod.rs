//! Window functions and the Wiener denoising filter

pub mod windows;
pub mod wiener;

pub use windows::{WindowType, generate_window, generate_periodic_window};
pub use wiener::{FilterError, WienerConfig, WienerFilter};
