//! # Delta-Sigma Spectrum Core
//!
//! Log-binned, double-sided power spectra for the noise plots of
//! oversampled converters.
//!
//! ## Overview
//!
//! A delta-sigma modulator pushes its quantization noise away from the signal
//! band. Plotting that spectrum on log-log axes needs fine bins near the band
//! and wide bins far from it, on both sides of a band-pass center. This crate
//! takes a one-sided FFT (computed elsewhere) and produces those bins:
//!
//! - **Bin geometry**: 8-sample bins aligned on the tone, growing by 1.1x
//!   per step up to 1024 samples in both sidebands
//! - **Power averaging**: mean `|X|^2` per bin, in dB
//! - **Tone placement**: the standard test-tone scenario for a given OSR
//!
//! ## Signal Flow
//!
//! ```text
//! modulator output → window → FFT → X[0..=N/2] → bplogsmooth → (f - f0, dB)
//!                  (upstream, not in this crate)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use dsm_core::{bplogsmooth, ToneConfig};
//! use num_complex::Complex64;
//!
//! let tone = ToneConfig::default();
//! let x = vec![Complex64::new(1e-3, 0.0); tone.fft_len / 2 + 1];
//!
//! let smoothed = bplogsmooth(&x, tone.test_tone_bin(), tone.f0).unwrap();
//! for (f, p) in smoothed.iter() {
//!     assert!(f > -0.125 && f < 0.375);
//!     assert!((p - (-60.0)).abs() < 1e-9);
//! }
//! ```

pub mod bplogsmooth;
pub mod db;
pub mod observe;
pub mod rounding;
pub mod tone;
pub mod types;

// Re-export main types
pub use bplogsmooth::{bplogsmooth, bplogsmooth_with_fft_len, BinRange, LogBins, SmoothedSpectrum};
pub use db::{dbp, dbv, undbp, undbv};
pub use observe::{init_logging, LogConfig};
pub use rounding::mround;
pub use tone::ToneConfig;
pub use types::{Complex, DspError, DspResult, PowerSample, SpectrumSample};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bplogsmooth::{bplogsmooth, bplogsmooth_with_fft_len, LogBins, SmoothedSpectrum};
    pub use crate::db::{dbp, dbv};
    pub use crate::tone::ToneConfig;
    pub use crate::types::{Complex, DspError, DspResult, PowerSample};
}
