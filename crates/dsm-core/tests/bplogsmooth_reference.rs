//! End-to-end check of the smoother against stored reference output.

mod common;

use approx::relative_eq;
use dsm_core::observe::{init_logging, LogConfig};
use dsm_core::{bplogsmooth, DspError, ToneConfig};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Reference {
    noise_seed: u32,
    noise_amplitude: f64,
    amplitude: f64,
    fft_len: usize,
    f0: f64,
    osr: usize,
    tbin: usize,
    start_bin: Vec<usize>,
    stop_bin: Vec<usize>,
    f: Vec<f64>,
    p: Vec<f64>,
}

fn reference() -> Reference {
    serde_json::from_str(include_str!("data/bplogsmooth_reference.json"))
        .expect("reference data should parse")
}

fn scenario(r: &Reference) -> ToneConfig {
    ToneConfig::bandpass(r.fft_len, r.f0, r.osr).with_amplitude(r.amplitude)
}

/// `|a - b| <= atol + rtol * |b|`
fn allclose(actual: &[f64], expected: &[f64], atol: f64, rtol: f64) -> bool {
    actual.len() == expected.len()
        && actual
            .iter()
            .zip(expected)
            .all(|(&a, &b)| (a - b).abs() <= atol + rtol * b.abs())
}

#[test]
fn test_scenario_matches_reference_tone() {
    let r = reference();
    let tone = scenario(&r);
    assert_eq!(tone.signal_bandwidth_bins(), 64);
    assert_eq!(tone.test_tone_bin(), r.tbin);
}

#[test]
fn test_reference_bin_geometry() {
    let r = reference();
    let bins = scenario(&r).log_bins().unwrap();
    let start: Vec<usize> = bins.bins().iter().map(|b| b.start).collect();
    let stop: Vec<usize> = bins.bins().iter().map(|b| b.stop).collect();
    assert_eq!(start, r.start_bin);
    assert_eq!(stop, r.stop_bin);
}

#[test]
fn test_reference_spectrum() {
    init_logging(&LogConfig::quiet());

    let r = reference();
    let x = common::tone_spectrum(&scenario(&r), r.noise_amplitude, r.noise_seed);
    assert_eq!(x.len(), r.fft_len / 2 + 1);

    let smoothed = bplogsmooth(&x, r.tbin, r.f0).unwrap();
    assert_eq!(smoothed.freq.len(), smoothed.power_db.len());
    assert!(allclose(&smoothed.freq, &r.f, 1e-9, 1e-5));
    assert!(allclose(&smoothed.power_db, &r.p, 1e-9, 1e-5));

    for (i, (a, b)) in smoothed.power_db.iter().zip(&r.p).enumerate() {
        assert!(
            relative_eq!(*a, *b, epsilon = 1e-9, max_relative = 1e-5),
            "bin {}: {} dB vs reference {} dB",
            i,
            a,
            b
        );
    }
}

#[test]
fn test_tone_bin_is_loudest() {
    let r = reference();
    let x = common::tone_spectrum(&scenario(&r), r.noise_amplitude, r.noise_seed);
    let smoothed = bplogsmooth(&x, r.tbin, r.f0).unwrap();

    let (f_peak, p_peak) = smoothed.peak().unwrap();
    // Hann leaves 0.25, 0.5, 0.25 in bins 1044..=1046: mean power 0.125
    assert!((f_peak - (1045.0 / 8192.0 - 0.125)).abs() < 1e-12);
    assert!((p_peak - 10.0 * 0.125f64.log10()).abs() < 1e-3);

    // Everything else sits on the noise floor
    for (f, p) in smoothed.iter().filter(|&(f, _)| f != f_peak) {
        assert!(p < -90.0, "f={} p={}", f, p);
    }
}

#[test]
fn test_repeat_runs_are_bit_identical() {
    let r = reference();
    let x = common::tone_spectrum(&scenario(&r), r.noise_amplitude, r.noise_seed);
    let a = bplogsmooth(&x, r.tbin, r.f0).unwrap();
    let b = bplogsmooth(&x, r.tbin, r.f0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_lower_sideband_tone_is_rejected() {
    let r = reference();
    let x = common::tone_spectrum(&scenario(&r), r.noise_amplitude, r.noise_seed);
    let err = bplogsmooth(&x, 1000, r.f0).unwrap_err();
    assert_eq!(err, DspError::PreconditionViolation { tbin: 1000, tone_bin: 1024 });
}
