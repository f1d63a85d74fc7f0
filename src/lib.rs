//! # eeg-bandpass — zero-phase Butterworth band-pass filtering in pure Rust
//!
//! `eeg-bandpass` turns a raw sampled signal (typically one EEG electrode)
//! into a band-limited copy of itself with no phase shift.  Both steps are
//! ported from SciPy and behave like
//! `filtfilt(*butter(order, [low, high], btype='band'), x)`.
//!
//! ## Pipeline overview
//!
//! ```text
//! FilterSpec { 1 Hz, 30 Hz, fs = 100 Hz, order 5 }
//!   │
//!   ├─ design()              analog prototype → band-pass → bilinear
//!   │                        stability checked, centre gain = 1
//!   │
//!   └─→ Coefficients { b[2N+1], a[2N+1] }     (shareable, immutable)
//!          │
//!          ├─ apply_zero_phase()    odd padding → forward pass →
//!          │                        backward pass → strip padding
//!          └─→ Vec<f64>             same length, zero phase, |H|²
//! ```
//!
//! ## Quick start
//!
//! ```
//! use eeg_bandpass::{apply_zero_phase, design, FilterSpec};
//!
//! let spec   = FilterSpec::default();              // 1–30 Hz @ 100 Hz, order 5
//! let coeffs = design(&spec).unwrap();
//!
//! let raw: Vec<f64> = (0..500).map(|i| (i as f64 * 0.3).sin() + 2.0).collect();
//! let filtered = apply_zero_phase(&coeffs, &raw).unwrap();
//! assert_eq!(filtered.len(), raw.len());
//! ```
//!
//! ## Several channels
//!
//! Coefficients are designed once and reused; channels are filtered
//! independently and may run in parallel:
//!
//! ```
//! use eeg_bandpass::{bandpass, FilterSpec};
//!
//! let a3 = vec![0.0_f64; 300];
//! let a4 = vec![1.0_f64; 300];
//! let out = bandpass(&FilterSpec::default(), &[a3, a4]).unwrap();
//! assert_eq!(out.len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod spectrum;

use rayon::prelude::*;

// ── Crate-root re-exports ─────────────────────────────────────────────────

// config
pub use config::{FilterSpec, MAX_ORDER};

// error
pub use error::{FilterError, Result};

// filter — design, application, response
pub use filter::{
    apply_zero_phase, apply_zero_phase_channels, design, frequency_response, gain_db,
    lfilter, lfilter_zi, Coefficients,
};

// spectrum
pub use spectrum::{amplitude_spectrum, dominant_frequency};

/// Design the filter described by `spec` once and zero-phase filter every
/// channel with it.
///
/// Channels may have different lengths; each is filtered independently on
/// the rayon thread pool.  The inputs are never modified.
///
/// # Errors
///
/// Any error from [`design`], or the first (in channel order) error from
/// [`apply_zero_phase`].  No partial output is returned.
pub fn bandpass(spec: &FilterSpec, channels: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let coeffs = design(spec)?;
    channels
        .par_iter()
        .map(|ch| apply_zero_phase(&coeffs, ch))
        .collect()
}
