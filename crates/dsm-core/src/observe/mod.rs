//! # Observability
//!
//! The smoother reports through `tracing`:
//!
//! - `debug`: one event per smoothed spectrum (FFT length, tone bins, bin count)
//! - `trace`: edge counts of each sideband walk
//!
//! ```rust,ignore
//! use dsm_core::observe::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::default().with_filter("dsm_core=trace"));
//! ```

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
