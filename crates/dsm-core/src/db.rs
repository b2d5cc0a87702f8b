//! Decibel conversion helpers
//!
//! Power and amplitude ratios to and from decibels. Unlike display-oriented
//! conversions these do not clamp: a zero ratio maps to `-inf` dB, so an
//! empty noise bin is visible as such in a log-log plot.
//!
//! ## Example
//!
//! ```rust
//! use dsm_core::db::{dbp, dbv, undbp};
//!
//! // 10 * log10(100) = 20 dB
//! assert!((dbp(100.0) - 20.0).abs() < 1e-10);
//! // 20 * log10(10) = 20 dB
//! assert!((dbv(10.0) - 20.0).abs() < 1e-10);
//! assert!((undbp(-20.0) - 0.01).abs() < 1e-12);
//! assert_eq!(dbp(0.0), f64::NEG_INFINITY);
//! ```

/// Convert a power ratio to dB: `10 * log10(|x|)`.
#[inline]
pub fn dbp(power: f64) -> f64 {
    if power == 0.0 {
        f64::NEG_INFINITY
    } else {
        10.0 * power.abs().log10()
    }
}

/// Convert an amplitude ratio to dB: `20 * log10(|x|)`.
#[inline]
pub fn dbv(amplitude: f64) -> f64 {
    if amplitude == 0.0 {
        f64::NEG_INFINITY
    } else {
        20.0 * amplitude.abs().log10()
    }
}

/// Convert dB back to a power ratio: `10^(db/10)`.
#[inline]
pub fn undbp(db: f64) -> f64 {
    10.0f64.powf(db / 10.0)
}

/// Convert dB back to an amplitude ratio: `10^(db/20)`.
#[inline]
pub fn undbv(db: f64) -> f64 {
    10.0f64.powf(db / 20.0)
}

/// Batch convert power ratios to dB.
pub fn power_to_db(input: &[f64]) -> Vec<f64> {
    input.iter().map(|&x| dbp(x)).collect()
}

/// Batch convert dB back to power ratios.
pub fn db_to_power(input: &[f64]) -> Vec<f64> {
    input.iter().map(|&db| undbp(db)).collect()
}
