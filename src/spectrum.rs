//! Amplitude spectrum helpers for checking what a filter left behind.
//!
//! `amplitude_spectrum` mirrors `numpy.fft.rfft` scaled to sine amplitude:
//! a full-length sine of amplitude `A` that falls exactly on a bin reads `A`.
use rustfft::{num_complex::Complex, FftPlanner};

/// Single-sided amplitude spectrum of `x`: `n / 2 + 1` bins spaced
/// `sample_rate_hz / n` apart.
///
/// Bin `k` holds `2·|X[k]| / n` (DC and, for even `n`, Nyquist hold `|X[k]| / n`).
pub fn amplitude_spectrum(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    if n == 0 {
        return vec![];
    }
    let mut buf: Vec<Complex<f64>> = x.iter().map(|&v| Complex { re: v, im: 0.0 }).collect();
    let mut planner: FftPlanner<f64> = FftPlanner::new();
    planner.plan_fft_forward(n).process(&mut buf);

    let n_bins = n / 2 + 1;
    buf[..n_bins]
        .iter()
        .enumerate()
        .map(|(k, c)| {
            let edge = k == 0 || (n % 2 == 0 && k == n / 2);
            let scale = if edge { 1.0 } else { 2.0 };
            scale * c.norm() / n as f64
        })
        .collect()
}

/// Frequency in Hz of spectrum bin `k` for a length-`n` signal.
pub fn bin_frequency(k: usize, n: usize, sample_rate_hz: f64) -> f64 {
    k as f64 * sample_rate_hz / n as f64
}

/// Index of the bin closest to `freq_hz` for a length-`n` signal.
pub fn nearest_bin(freq_hz: f64, n: usize, sample_rate_hz: f64) -> usize {
    let k = (freq_hz * n as f64 / sample_rate_hz).round().max(0.0) as usize;
    k.min(n / 2)
}

/// Frequency in Hz of the strongest non-DC component of `x`.
///
/// Returns `None` for signals shorter than two samples.
pub fn dominant_frequency(x: &[f64], sample_rate_hz: f64) -> Option<f64> {
    let spec = amplitude_spectrum(x);
    let (k, _) = spec
        .iter()
        .enumerate()
        .skip(1)
        .max_by(|a, b| a.1.total_cmp(b.1))?;
    Some(bin_frequency(k, x.len(), sample_rate_hz))
}
