//! Test-tone placement for noise-spectrum measurements
//!
//! An oversampled converter is measured with a sine placed inside its signal
//! band, a third of the band width above the band center `f0`. `ToneConfig` holds
//! that scenario and derives the bins the smoother needs from it.
//!
//! ```text
//!   fB = ceil(N / (2*OSR))          signal bandwidth in bins
//!   ftest = round(f0*N + fB/3)      test tone bin
//! ```
//!
//! ## Example
//!
//! ```rust
//! use dsm_core::tone::ToneConfig;
//!
//! let tone = ToneConfig::default();
//! assert_eq!(tone.signal_bandwidth_bins(), 64);
//! assert_eq!(tone.test_tone_bin(), 1045);
//! assert_eq!(tone.tone_bin(), 1024);
//! ```

use serde::{Deserialize, Serialize};

use crate::bplogsmooth::LogBins;
use crate::rounding::{mround, mround_index};
use crate::types::{DspError, DspResult};

/// Test-tone scenario for a noise-spectrum measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneConfig {
    /// FFT length `N`. Default: 8192
    pub fft_len: usize,
    /// Band center in cycles/sample. Default: 1/8
    pub f0: f64,
    /// Oversampling ratio. Default: 64
    pub osr: usize,
    /// Peak amplitude of the test sine. Default: 0.5
    pub amplitude: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            fft_len: 8192,
            f0: 0.125,
            osr: 64,
            amplitude: 0.5,
        }
    }
}

impl ToneConfig {
    /// Low-pass scenario: band at DC.
    pub fn lowpass(fft_len: usize, osr: usize) -> Self {
        Self {
            fft_len,
            f0: 0.0,
            osr,
            ..Default::default()
        }
    }

    /// Band-pass scenario centered at `f0`.
    pub fn bandpass(fft_len: usize, f0: f64, osr: usize) -> Self {
        Self {
            fft_len,
            f0,
            osr,
            ..Default::default()
        }
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Load a tone from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Signal bandwidth in bins: `ceil(N / (2*OSR))`.
    pub fn signal_bandwidth_bins(&self) -> usize {
        self.fft_len.div_ceil(2 * self.osr.max(1))
    }

    /// Bin of the band center, `round(f0*N)`.
    pub fn tone_bin(&self) -> usize {
        mround_index(self.f0 * self.fft_len as f64).max(0) as usize
    }

    /// Bin of the test sine, `round(f0*N + fB/3)`.
    pub fn test_tone_bin(&self) -> usize {
        tone_offset_bin(self.fft_len, self.f0, self.signal_bandwidth_bins() as f64 / 3.0)
    }

    /// Test sine frequency in cycles/sample, on the bin grid.
    pub fn test_tone_frequency(&self) -> f64 {
        self.test_tone_bin() as f64 / self.fft_len as f64
    }

    /// Check the scenario can be smoothed: the test tone must sit above the band center.
    pub fn validate(&self) -> DspResult<()> {
        if self.osr == 0 {
            return Err(DspError::InvalidOversamplingRatio(self.osr));
        }
        self.log_bins().map(|_| ())
    }

    /// Bin geometry for this scenario.
    pub fn log_bins(&self) -> DspResult<LogBins> {
        LogBins::new(self.fft_len, self.test_tone_bin(), self.f0)
    }
}

/// The test-tone bin for a tone `offset` bins above `f0`: `round(f0*N + offset)`.
pub fn tone_offset_bin(fft_len: usize, f0: f64, offset: f64) -> usize {
    mround(f0 * fft_len as f64 + offset).max(0.0) as usize
}
