//! Band-pass log smoothing: log-binned double-sided power spectra
//!
//! Averages the power of a one-sided FFT over bins that grow geometrically
//! away from a test tone, so a noise-shaped spectrum reads cleanly on a
//! log-log plot on both sides of the tone. Frequencies are reported relative
//! to the tone frequency `f0`, which makes the lower sideband negative.
//!
//! ## Bin Geometry
//!
//! ```text
//!  lower sideband (mirrored)          tone           upper sideband
//!  |<-- grows x1.1 --|-8-|-8-|  ...  |-8-|3|-8-|-8-|-- grows x1.1 -->|
//!  0                              f0*N   tbin                    N/2-1
//! ```
//!
//! - Edges are aligned to multiples of 8 measured from the tone bin
//!   `round(f0*N)`, so the test tone at `tbin` lands in a narrow bin of its own.
//! - Outside the tone region each step is `round(min(n*1.1, 1024))`.
//! - The outermost bin of each sideband absorbs whatever is left of the span.
//!
//! ## Example
//!
//! ```rust
//! use dsm_core::bplogsmooth::bplogsmooth;
//! use num_complex::Complex64;
//!
//! // One-sided spectrum of an 8192-point FFT, flat at 0 dB
//! let x = vec![Complex64::new(1.0, 0.0); 8192 / 2 + 1];
//! let smoothed = bplogsmooth(&x, 1045, 0.125).unwrap();
//!
//! assert_eq!(smoothed.freq.len(), smoothed.power_db.len());
//! assert!(smoothed.power_db.iter().all(|p| p.abs() < 1e-9));
//! assert!(smoothed.freq.windows(2).all(|w| w[0] < w[1]));
//! ```

use serde::{Deserialize, Serialize};

use crate::db::dbp;
use crate::rounding::mround_index;
use crate::types::{energy, DspError, DspResult, PowerSample};

/// Width of the bins around the tone and the first step of each walk.
pub const INITIAL_WIDTH: usize = 8;

/// Geometric growth factor of the bin width per step.
pub const GROWTH_FACTOR: f64 = 1.1;

/// Largest step the walk grows to.
pub const MAX_WIDTH: usize = 1024;

/// Offset past `tbin` of the extra upper edge that closes the tone bin.
const TONE_EDGE_OFFSET: i64 = 3;

/// A closed range `[start, stop]` of spectrum indices averaged into one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinRange {
    pub start: usize,
    pub stop: usize,
}

impl BinRange {
    /// Number of spectrum samples in the bin.
    #[inline]
    pub fn width(&self) -> usize {
        self.stop - self.start + 1
    }

    /// Center index of the bin (may be a half index).
    #[inline]
    pub fn center(&self) -> f64 {
        (self.start + self.stop) as f64 / 2.0
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.stop
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

impl Direction {
    #[inline]
    fn sign(self) -> i64 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }
}

/// Next step width: `round(min(n * 1.1, 1024))`.
#[inline]
fn grow(n: i64) -> i64 {
    mround_index(f64::min(n as f64 * GROWTH_FACTOR, MAX_WIDTH as f64))
}

/// Walk bin edges outward from `from` with a geometrically growing step.
///
/// The first candidate is one initial step past `from`. Each candidate `m` is
/// kept while `keep(m, n)` holds for the current step `n`; the step then grows
/// and the walk advances by the grown step.
fn walk_edges(from: i64, direction: Direction, keep: impl Fn(i64, i64) -> bool) -> Vec<i64> {
    let mut edges = Vec::new();
    let mut n = INITIAL_WIDTH as i64;
    let mut m = from + direction.sign() * n;
    while keep(m, n) {
        edges.push(m);
        n = grow(n);
        m += direction.sign() * n;
    }
    edges
}

/// Bin geometry for one FFT length, tone bin and tone frequency.
///
/// Bins are stored frequency-ascending: the lower sideband first (outermost
/// bin at index 0), then the upper sideband. Together they tile
/// `[0, fft_len/2 - 1]` without gaps or overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct LogBins {
    fft_len: usize,
    f0: f64,
    tbin: usize,
    tone_bin: usize,
    bins: Vec<BinRange>,
    lower_len: usize,
}

impl LogBins {
    /// Build the bin geometry.
    ///
    /// Fails with [`DspError::PreconditionViolation`] unless
    /// `tbin > round(f0 * fft_len)`.
    pub fn new(fft_len: usize, tbin: usize, f0: f64) -> DspResult<Self> {
        if fft_len == 0 || fft_len % 2 != 0 {
            return Err(DspError::InvalidFftLength(fft_len));
        }
        if !f0.is_finite() || !(0.0..0.5).contains(&f0) {
            return Err(DspError::InvalidToneFrequency(f0));
        }

        let n = INITIAL_WIDTH as i64;
        let nyquist = (fft_len / 2) as i64;
        let bin0 = mround_index(f0 * fft_len as f64);
        let tone = tbin as i64;
        if tone <= bin0 {
            return Err(DspError::PreconditionViolation {
                tbin,
                tone_bin: bin0 as usize,
            });
        }

        // Edges below are 1-based spectrum positions; converted on output.
        let bin1 = (tone - bin0) % n + bin0;
        let bind = bin1 - bin0;

        let mut upper: Vec<i64> = (bin1..=tone).step_by(INITIAL_WIDTH).collect();
        upper.extend((tone + TONE_EDGE_OFFSET..=tone + bind).step_by(INITIAL_WIDTH));
        upper[0] = upper[0].max(1);

        let last = upper[upper.len() - 1];
        if last > nyquist {
            return Err(DspError::ToneBeyondNyquist {
                tbin,
                nyquist: nyquist as usize,
            });
        }
        let half_span = fft_len as f64 / 2.0;
        upper.extend(walk_edges(last, Direction::Up, |m, n| {
            m as f64 + n as f64 / 2.0 < half_span
        }));
        tracing::trace!(edges = upper.len(), "upper sideband walk");

        // Mirror of the tone region: 2*bind samples below bin1, at least one edge
        let span = (2 * bind - 1).max(1);
        let mut lower: Vec<i64> = (bin1 - span + 1..=bin1)
            .rev()
            .step_by(INITIAL_WIDTH)
            .map(|b| b - 1)
            .take_while(|&b| b >= 1)
            .collect();
        if let Some(&innermost) = lower.last() {
            lower.extend(walk_edges(innermost, Direction::Down, |m, n| {
                m as f64 - n as f64 / 2.0 > 1.0
            }));
        }
        tracing::trace!(edges = lower.len(), "lower sideband walk");

        let mut bins = Vec::with_capacity(lower.len() + upper.len());
        // Lower sideband: `lower` holds stop edges walking down; each start is
        // the next stop + 1, and the outermost bin starts at 1.
        for (i, &stop) in lower.iter().enumerate().rev() {
            let start = lower.get(i + 1).map_or(1, |&next| next + 1);
            bins.push(to_range(start, stop));
        }
        // Upper sideband: each stop is the next start - 1, the last ends at Nyquist.
        for (i, &start) in upper.iter().enumerate() {
            let stop = upper.get(i + 1).map_or(nyquist, |&next| next - 1);
            bins.push(to_range(start, stop));
        }

        Ok(Self {
            fft_len,
            f0,
            tbin,
            tone_bin: bin0 as usize,
            bins,
            lower_len: lower.len(),
        })
    }

    pub fn fft_len(&self) -> usize {
        self.fft_len
    }

    pub fn f0(&self) -> f64 {
        self.f0
    }

    pub fn tbin(&self) -> usize {
        self.tbin
    }

    /// The tone's own bin, `round(f0 * fft_len)`.
    pub fn tone_bin(&self) -> usize {
        self.tone_bin
    }

    /// All bins, frequency-ascending.
    pub fn bins(&self) -> &[BinRange] {
        &self.bins
    }

    /// Bins below the tone region, outermost first.
    pub fn lower_sideband(&self) -> &[BinRange] {
        &self.bins[..self.lower_len]
    }

    /// Bins from the tone region up to Nyquist.
    pub fn upper_sideband(&self) -> &[BinRange] {
        &self.bins[self.lower_len..]
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Bin center frequencies relative to `f0`, normalized by the FFT length.
    pub fn frequencies(&self) -> Vec<f64> {
        self.bins
            .iter()
            .map(|b| b.center() / self.fft_len as f64 - self.f0)
            .collect()
    }

    /// Mean power of each bin in dB.
    ///
    /// `x` must hold at least `fft_len / 2` samples.
    pub fn average_power_db<S: PowerSample>(&self, x: &[S]) -> DspResult<Vec<f64>> {
        let needed = self.fft_len / 2;
        if x.len() < needed {
            return Err(DspError::SpectrumTooShort {
                expected: needed,
                actual: x.len(),
            });
        }
        Ok(self
            .bins
            .iter()
            .map(|b| dbp(energy(&x[b.start..=b.stop]) / b.width() as f64))
            .collect())
    }
}

/// 1-based internal edges to a 0-based range.
#[inline]
fn to_range(start: i64, stop: i64) -> BinRange {
    BinRange {
        start: (start - 1) as usize,
        stop: (stop - 1) as usize,
    }
}

/// Result of [`bplogsmooth`]: one `(f, p)` point per bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothedSpectrum {
    /// Bin center frequencies relative to `f0`, in cycles/sample.
    pub freq: Vec<f64>,
    /// Mean bin power in dB.
    pub power_db: Vec<f64>,
    /// Spectrum index ranges behind each point.
    pub bins: Vec<BinRange>,
}

impl SmoothedSpectrum {
    pub fn len(&self) -> usize {
        self.freq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freq.is_empty()
    }

    /// Iterate `(frequency, power_db)` pairs in ascending frequency.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.freq.iter().copied().zip(self.power_db.iter().copied())
    }

    /// The loudest bin as `(frequency, power_db)`.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.iter().max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Smooth a one-sided spectrum into log-spaced bins and convert to dB.
///
/// `x` is the first `N/2 + 1` samples of an `N`-point FFT, so the FFT length
/// is taken as `2 * (x.len() - 1)`. `tbin` is the test tone's bin and must lie
/// above the tone bin `round(f0 * N)`; `f0` is in cycles/sample.
pub fn bplogsmooth<S: PowerSample>(x: &[S], tbin: usize, f0: f64) -> DspResult<SmoothedSpectrum> {
    if x.len() < 2 {
        return Err(DspError::SpectrumTooShort {
            expected: 2,
            actual: x.len(),
        });
    }
    bplogsmooth_with_fft_len(x, 2 * (x.len() - 1), tbin, f0)
}

/// [`bplogsmooth`] with an explicit FFT length.
///
/// Accepts any array holding at least `fft_len / 2` samples, such as the full
/// two-sided spectrum; only `x[..fft_len / 2]` is read.
pub fn bplogsmooth_with_fft_len<S: PowerSample>(
    x: &[S],
    fft_len: usize,
    tbin: usize,
    f0: f64,
) -> DspResult<SmoothedSpectrum> {
    let geometry = LogBins::new(fft_len, tbin, f0)?;
    let power_db = geometry.average_power_db(x)?;

    tracing::debug!(
        fft_len,
        tbin,
        tone_bin = geometry.tone_bin(),
        bins = geometry.len(),
        "log-binned spectrum"
    );

    Ok(SmoothedSpectrum {
        freq: geometry.frequencies(),
        power_db,
        bins: geometry.bins,
    })
}
