//! Frequency response of a transfer function, like `scipy.signal.freqz`.
use std::f64::consts::PI;

use rustfft::num_complex::Complex64;

use super::design::Coefficients;
use super::poly::eval_at_unit_circle;

/// `|B(e^{jω}) / A(e^{jω})|` for raw coefficient vectors.
pub(crate) fn magnitude_at_omega(b: &[f64], a: &[f64], omega: f64) -> f64 {
    (eval_at_unit_circle(b, omega) / eval_at_unit_circle(a, omega)).norm()
}

/// Complex response of a single causal pass at `freq_hz`.
pub fn frequency_response(coeffs: &Coefficients, freq_hz: f64, sample_rate_hz: f64) -> Complex64 {
    let omega = 2.0 * PI * freq_hz / sample_rate_hz;
    eval_at_unit_circle(coeffs.feedforward(), omega) / eval_at_unit_circle(coeffs.feedback(), omega)
}

/// Single-pass gain in dB at `freq_hz`.
///
/// Zero-phase filtering runs the filter twice, so its gain is twice this.
pub fn gain_db(coeffs: &Coefficients, freq_hz: f64, sample_rate_hz: f64) -> f64 {
    20.0 * frequency_response(coeffs, freq_hz, sample_rate_hz).norm().log10()
}
