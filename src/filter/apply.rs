//! Forward-backward zero-phase IIR filtering.
//!
//! Matches `scipy.signal.filtfilt(b, a, x)` with its defaults
//! (`padtype='odd'`, `padlen = 3 * max(len(a), len(b))`, `method='pad'`).
//!
//! The forward and backward phase responses cancel exactly; the magnitude
//! response is applied twice, so the effective gain is `|H(e^{jω})|²` and the
//! −3 dB band edges of the single-pass design become −6 dB edges.
use log::trace;
use ndarray::{Array2, Axis};
use rayon::prelude::*;

use super::design::Coefficients;
use crate::error::{FilterError, Result};

/// Zero-phase filter every row (channel) of `data` ([C, T]) in parallel.
///
/// Returns a new array; `data` is left untouched.  Fails with the first
/// channel error in row order.
pub fn apply_zero_phase_channels(data: &Array2<f64>, coeffs: &Coefficients) -> Result<Array2<f64>> {
    let inputs: Vec<Vec<f64>> = data.axis_iter(Axis(0)).map(|row| row.to_vec()).collect();
    let rows: Vec<Vec<f64>> = inputs
        .par_iter()
        .map(|row| apply_zero_phase(coeffs, row))
        .collect::<Result<_>>()?;

    let mut out = Array2::<f64>::zeros(data.dim());
    for (ch, row) in rows.iter().enumerate() {
        out.row_mut(ch).assign(&ndarray::ArrayView1::from(row));
    }
    Ok(out)
}

/// Apply `coeffs` forward and backward to `x`, returning a new signal of the
/// same length with zero net phase shift.
///
/// # Errors
///
/// * [`FilterError::SignalTooShort`] if `x.len() <= 3 * coeffs.taps()`.
/// * [`FilterError::NonFiniteInput`] if any sample is NaN or infinite.
pub fn apply_zero_phase(coeffs: &Coefficients, x: &[f64]) -> Result<Vec<f64>> {
    let padlen = 3 * coeffs.taps();
    if x.len() <= padlen {
        return Err(FilterError::SignalTooShort { len: x.len(), min: padlen });
    }
    if let Some(index) = x.iter().position(|v| !v.is_finite()) {
        return Err(FilterError::NonFiniteInput { index });
    }

    let (b, a) = (coeffs.feedforward(), coeffs.feedback());
    let zi = lfilter_zi(b, a);
    let ext = odd_ext(x, padlen);
    trace!("filtfilt: {} samples, padlen {padlen}, zi {:?}", x.len(), zi);

    // Forward pass, starting in steady state for a constant ext[0].
    let z0: Vec<f64> = zi.iter().map(|v| v * ext[0]).collect();
    let mut y = lfilter(b, a, &ext, &z0);

    // Backward pass, starting in steady state for the last forward output.
    y.reverse();
    let z0: Vec<f64> = zi.iter().map(|v| v * y[0]).collect();
    let mut y = lfilter(b, a, &y, &z0);
    y.reverse();

    Ok(y[padlen..padlen + x.len()].to_vec())
}

/// One causal pass of the difference equation in transposed direct form II.
///
/// `b` and `a` may differ in length; the shorter one is zero-padded to
/// `n = max(len b, len a)` and both are divided by `a[0]`.  `zi` holds the
/// `n − 1` initial delay-line values (missing entries start at zero).
/// An empty `b` or `a`, or `a[0] == 0`, yields an all-zero output.
///
/// ```text
/// y[k]   = b[0]·x[k] + z[0]
/// z[i]   = b[i+1]·x[k] − a[i+1]·y[k] + z[i+1]
/// z[n−2] = b[n−1]·x[k] − a[n−1]·y[k]
/// ```
pub fn lfilter(b: &[f64], a: &[f64], x: &[f64], zi: &[f64]) -> Vec<f64> {
    let Some((b, a)) = monic_pair(b, a) else {
        return vec![0.0; x.len()];
    };
    let n = b.len();
    let mut z = zi.to_vec();
    z.resize(n.saturating_sub(1), 0.0);

    let mut y = Vec::with_capacity(x.len());
    for &xk in x {
        let yk = b[0] * xk + z.first().copied().unwrap_or(0.0);
        for i in 0..n.saturating_sub(1) {
            let next = if i + 1 < n - 1 { z[i + 1] } else { 0.0 };
            z[i] = b[i + 1] * xk - a[i + 1] * yk + next;
        }
        y.push(yk);
    }
    y
}

/// Delay-line state of [`lfilter`] in steady state for a unit step input.
///
/// Matches `scipy.signal.lfilter_zi`.  With DC gain `G = Σb / Σa` the state
/// is `zi[i] = Σ_{k>i} (b[k] − a[k]·G)`.  A band-pass filter has `G = 0`.
/// Unequal lengths and a non-unit `a[0]` are handled as in [`lfilter`].
pub fn lfilter_zi(b: &[f64], a: &[f64]) -> Vec<f64> {
    let Some((b, a)) = monic_pair(b, a) else {
        return vec![0.0; b.len().max(a.len()).saturating_sub(1)];
    };
    let n = b.len();
    let sum_a: f64 = a.iter().sum();
    let gain = if sum_a.abs() > f64::EPSILON { b.iter().sum::<f64>() / sum_a } else { 0.0 };

    let mut zi = vec![0.0; n.saturating_sub(1)];
    let mut acc = 0.0;
    for i in (0..zi.len()).rev() {
        acc += b[i + 1] - a[i + 1] * gain;
        zi[i] = acc;
    }
    zi
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Odd extension of `padlen` samples on each side (matches scipy's `odd_ext`).
///
/// Left:  `2·x[0] − x[i]`     for i = padlen, …, 1
/// Right: `2·x[n−1] − x[n−1−i]` for i = 1, …, padlen
///
/// Requires `padlen < x.len()`.
fn odd_ext(x: &[f64], padlen: usize) -> Vec<f64> {
    let n = x.len();
    let first = x[0];
    let last = x[n - 1];

    let mut out = Vec::with_capacity(n + 2 * padlen);
    out.extend((1..=padlen).rev().map(|i| 2.0 * first - x[i]));
    out.extend_from_slice(x);
    out.extend((1..=padlen).map(|i| 2.0 * last - x[n - 1 - i]));
    out
}

/// Zero-pad `b` and `a` to a common length and divide both by `a[0]`.
///
/// `None` when either is empty or `a[0]` is zero or non-finite.
fn monic_pair(b: &[f64], a: &[f64]) -> Option<(Vec<f64>, Vec<f64>)> {
    let a0 = *a.first()?;
    if b.is_empty() || a0 == 0.0 || !a0.is_finite() {
        return None;
    }
    let n = b.len().max(a.len());
    let pad = |c: &[f64]| -> Vec<f64> {
        (0..n).map(|k| c.get(k).copied().unwrap_or(0.0) / a0).collect()
    };
    Some((pad(b), pad(a)))
}
