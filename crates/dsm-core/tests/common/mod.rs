//! Synthetic modulator-like spectra for integration tests.
//!
//! The windowing and FFT here stand in for the upstream measurement chain.

use std::f64::consts::PI;

use dsm_core::ToneConfig;
use rustfft::{num_complex::Complex64, Fft, FftPlanner};

/// Deterministic uniform noise in `[-0.5, 0.5)` from a 32-bit LCG.
pub struct Lcg(u32);

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self(seed)
    }

    pub fn next_uniform(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.0 as f64 / 4_294_967_296.0 - 0.5
    }
}

/// Periodic Hann window.
pub fn ds_hann(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f64 / n as f64).cos()))
        .collect()
}

/// One-sided spectrum `X[0..=N/2]` of a Hann-windowed test sine plus flat
/// noise, scaled by `N/4` so a full-scale bin-centered sine reads 0 dB.
pub fn tone_spectrum(tone: &ToneConfig, noise_amplitude: f64, seed: u32) -> Vec<Complex64> {
    let n = tone.fft_len;
    let ftest = tone.test_tone_bin();
    let window = ds_hann(n);
    let mut noise = Lcg::new(seed);

    let mut buffer: Vec<Complex64> = (0..n)
        .map(|i| {
            let sine = tone.amplitude * (2.0 * PI * ftest as f64 / n as f64 * i as f64).sin();
            let v = sine + noise_amplitude * noise.next_uniform();
            Complex64::new(v * window[i], 0.0)
        })
        .collect();

    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(n).process(&mut buffer);

    let scale = n as f64 / 4.0;
    buffer.truncate(n / 2 + 1);
    for x in buffer.iter_mut() {
        *x /= scale;
    }
    buffer
}
