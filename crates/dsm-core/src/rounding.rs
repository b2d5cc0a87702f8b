//! Nearest-integer rounding shared by every bin computation.
//!
//! Ties round away from zero: `mround(2.5) == 3`, `mround(-2.5) == -3`.
//! The tone bin and every geometric growth step go through this one rule,
//! so the tone-aligned edges and the grown edges agree.

/// Round to the nearest integer, ties away from zero.
///
/// Computed as `sign(x) * floor(|x| + 0.5)`.
#[inline]
pub fn mround(x: f64) -> f64 {
    let magnitude = (x.abs() + 0.5).floor();
    if x < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

/// [`mround`] as a signed bin index.
#[inline]
pub fn mround_index(x: f64) -> i64 {
    mround(x) as i64
}
