//! Core types for spectrum smoothing
//!
//! The smoother consumes the output of an upstream FFT: a one-sided spectrum
//! whose samples may be complex (the usual case) or already real. Both are
//! reduced to power through [`PowerSample`], so the binning code never cares
//! which one it was handed.
//!
//! ```text
//!   index:  0      1      2     ...    tbin    ...    N/2
//!           |------|------|-----...-----|------...-----|
//!           DC                        tone         Nyquist
//! ```

use num_complex::{Complex32, Complex64};

/// Type alias for complex numbers using f64 precision
pub type Complex = Complex64;

/// A single spectrum sample as produced by an FFT
pub type SpectrumSample = Complex64;

/// A buffer of spectrum samples
pub type SpectrumBuffer = Vec<SpectrumSample>;

/// Result type for DSP operations
pub type DspResult<T> = Result<T, DspError>;

/// Errors that can occur while binning a spectrum
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DspError {
    #[error("Test tone bin {tbin} is not above the tone bin {tone_bin}; tbin must lie in the upper sideband")]
    PreconditionViolation { tbin: usize, tone_bin: usize },

    #[error("Invalid tone frequency: {0}. Must be finite and within [0, 0.5)")]
    InvalidToneFrequency(f64),

    #[error("Spectrum too short: expected {expected}, got {actual}")]
    SpectrumTooShort { expected: usize, actual: usize },

    #[error("Invalid FFT length: {0}. Must be even and non-zero")]
    InvalidFftLength(usize),

    #[error("Invalid oversampling ratio: {0}. Must be at least 1")]
    InvalidOversamplingRatio(usize),

    #[error("Test tone bin {tbin} leaves no room below the Nyquist bin {nyquist}")]
    ToneBeyondNyquist { tbin: usize, nyquist: usize },
}

/// A spectrum sample that can report its power `|x|^2`.
///
/// For real samples this is the squared value.
pub trait PowerSample: Copy {
    fn power(self) -> f64;
}

impl PowerSample for f64 {
    #[inline]
    fn power(self) -> f64 {
        self * self
    }
}

impl PowerSample for f32 {
    #[inline]
    fn power(self) -> f64 {
        let x = self as f64;
        x * x
    }
}

impl PowerSample for Complex64 {
    #[inline]
    fn power(self) -> f64 {
        self.norm_sqr()
    }
}

impl PowerSample for Complex32 {
    #[inline]
    fn power(self) -> f64 {
        self.norm_sqr() as f64
    }
}

/// Sum of `|x|^2` over a slice.
#[inline]
pub fn energy<S: PowerSample>(samples: &[S]) -> f64 {
    samples.iter().map(|&s| s.power()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_real_power_is_square() {
        assert_relative_eq!((-3.0f64).power(), 9.0, epsilon = 1e-12);
        assert_relative_eq!(0.5f32.power(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_complex_power_is_norm_sqr() {
        assert_relative_eq!(Complex64::new(3.0, -4.0).power(), 25.0, epsilon = 1e-12);
        assert_relative_eq!(Complex32::new(0.0, 2.0).power(), 4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_energy_sums_powers() {
        let samples = [Complex64::new(1.0, 1.0), Complex64::new(0.0, 2.0)];
        assert_relative_eq!(energy(&samples), 6.0, epsilon = 1e-12);
        assert_eq!(energy::<f64>(&[]), 0.0);
    }

    #[test]
    fn test_error_messages() {
        let err = DspError::PreconditionViolation { tbin: 3, tone_bin: 5 };
        assert!(err.to_string().contains("upper sideband"));

        let err = DspError::SpectrumTooShort { expected: 2, actual: 1 };
        assert_eq!(err.to_string(), "Spectrum too short: expected 2, got 1");
    }
}
