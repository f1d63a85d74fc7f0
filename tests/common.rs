/// Shared helpers for synthetic test signals.
use std::f64::consts::PI;

#[allow(unused)]
/// `amp · sin(2π·freq·t)` sampled at `fs` for `n` samples.
pub fn sine(n: usize, freq: f64, amp: f64, fs: f64) -> Vec<f64> {
    (0..n).map(|i| amp * (2.0 * PI * freq * i as f64 / fs).sin()).collect()
}

#[allow(unused)]
/// Element-wise sum of equally long signals.
pub fn mix(parts: &[Vec<f64>]) -> Vec<f64> {
    let n = parts[0].len();
    (0..n).map(|i| parts.iter().map(|p| p[i]).sum()).collect()
}

#[allow(unused)]
/// Hann window of length `n`; tapers a signal to zero at both ends.
pub fn hann(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / (n - 1) as f64).cos())
        .collect()
}

#[allow(unused)]
/// Maximum absolute difference between two slices.
pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).fold(0.0_f64, f64::max)
}

#[allow(unused)]
/// Root mean square of a slice.
pub fn rms(x: &[f64]) -> f64 {
    (x.iter().map(|v| v * v).sum::<f64>() / x.len() as f64).sqrt()
}

#[allow(unused)]
/// Attenuation in dB between two amplitudes (positive = attenuated).
pub fn attenuation_db(before: f64, after: f64) -> f64 {
    20.0 * (before / after.max(f64::MIN_POSITIVE)).log10()
}
