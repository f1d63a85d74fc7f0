//! Digital Butterworth band-pass design matching `scipy.signal.butter(btype='band')`.
//!
//! For a band `[low, high]` (fractions of Nyquist) and prototype order `N`:
//!   • analog low-pass prototype: `N` poles on the unit circle, left half-plane
//!   • pre-warp both edges: `Ω = 2·tan(π·w / 2)`  (sample period 1)
//!   • low-pass → band-pass: `s → (s² + Ω₀²) / (B·s)`, doubling the poles and
//!     adding `N` zeros at the origin
//!   • bilinear transform `s = 2·(1 − z⁻¹) / (1 + z⁻¹)`
//!   • expand to transfer-function form and normalise the gain at the band
//!     centre to 1
use std::f64::consts::PI;

use log::{debug, warn};
use rustfft::num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::poly::{is_schur_stable, max_root_radius, poly_from_roots, split_real};
use super::response::magnitude_at_omega;
use crate::config::FilterSpec;
use crate::error::{FilterError, Result};

/// Imaginary residue tolerated after expansion, relative to the largest
/// coefficient magnitude.
const IMAG_TOLERANCE: f64 = 1e-8;

/// Pole radius above which a stable design is logged as marginal.
const MARGINAL_POLE_RADIUS: f64 = 0.999;

/// Transfer function `H(z) = B(z) / A(z)` in difference-equation form.
///
/// ```text
/// a[0]·y[n] = b[0]·x[n] + … + b[M]·x[n−M] − a[1]·y[n−1] − … − a[M]·y[n−M]
/// ```
///
/// `a[0]` is always `1.0`.  Immutable once built; share it freely across
/// threads and channels.  Deserialising goes through [`Coefficients::new`],
/// so stored coefficients are validated and normalised the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoefficients")]
pub struct Coefficients {
    feedforward: Vec<f64>,
    feedback: Vec<f64>,
}

impl Coefficients {
    /// Build coefficients from raw `b` / `a` vectors, normalising `a[0]` to 1.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidSpec`] if either vector is empty, any value is
    /// non-finite, or `a[0] == 0`.
    pub fn new(feedforward: Vec<f64>, feedback: Vec<f64>) -> Result<Self> {
        if feedforward.is_empty() || feedback.is_empty() {
            return Err(FilterError::InvalidSpec("empty coefficient vector".into()));
        }
        if feedforward.iter().chain(&feedback).any(|v| !v.is_finite()) {
            return Err(FilterError::InvalidSpec("non-finite coefficient".into()));
        }
        let a0 = feedback[0];
        if a0 == 0.0 {
            return Err(FilterError::InvalidSpec("leading feedback coefficient is zero".into()));
        }
        Ok(Self {
            feedforward: feedforward.iter().map(|v| v / a0).collect(),
            feedback: feedback.iter().map(|v| v / a0).collect(),
        })
    }

    /// Numerator `b`.
    pub fn feedforward(&self) -> &[f64] {
        &self.feedforward
    }

    /// Denominator `a`, with `a[0] == 1.0`.
    pub fn feedback(&self) -> &[f64] {
        &self.feedback
    }

    /// `max(len(b), len(a))`, the number of taps the recursion runs over.
    pub fn taps(&self) -> usize {
        self.feedforward.len().max(self.feedback.len())
    }
}

/// Unvalidated wire form of [`Coefficients`].
#[derive(Deserialize)]
struct RawCoefficients {
    feedforward: Vec<f64>,
    feedback: Vec<f64>,
}

impl TryFrom<RawCoefficients> for Coefficients {
    type Error = FilterError;

    fn try_from(raw: RawCoefficients) -> Result<Self> {
        Coefficients::new(raw.feedforward, raw.feedback)
    }
}

/// Design a zero-phase-ready Butterworth band-pass filter.
///
/// Pure and deterministic: the same spec always yields bit-identical
/// coefficients.
///
/// # Errors
///
/// * [`FilterError::InvalidSpec`] — see [`FilterSpec::normalized_band`].
/// * [`FilterError::UnstableFilter`] — a pole lies on or outside the unit
///   circle, either in the designed pole set or in the roots of the expanded
///   feedback polynomial (high order with a narrow band).
/// * [`FilterError::NonRealCoefficients`] — the expansion did not cancel
///   between conjugate pairs.
///
/// # Examples
///
/// ```
/// use eeg_bandpass::{design, FilterSpec};
///
/// let c = design(&FilterSpec::default()).unwrap();
/// assert_eq!(c.feedforward().len(), 11);
/// assert_eq!(c.feedback()[0], 1.0);
/// ```
pub fn design(spec: &FilterSpec) -> Result<Coefficients> {
    let (low, high) = spec.normalized_band()?;
    let order = spec.order;

    let (poles, w0) = digital_poles(low, high, order);

    let unstable = |pole_magnitude: f64| FilterError::UnstableFilter {
        pole_magnitude,
        order,
        low_hz: spec.low_cutoff_hz,
        high_hz: spec.high_cutoff_hz,
    };

    let max_radius = poles.iter().map(|p| p.norm()).fold(0.0_f64, f64::max);
    if max_radius >= 1.0 || !max_radius.is_finite() {
        return Err(unstable(max_radius));
    }

    // N zeros at the analog origin land on z = 1, the N zeros at infinity
    // on z = −1, so B(z) ∝ (1 − z⁻²)ᴺ.
    let zeros: Vec<Complex64> = std::iter::repeat(Complex64::new(1.0, 0.0))
        .take(order)
        .chain(std::iter::repeat(Complex64::new(-1.0, 0.0)).take(order))
        .collect();

    let (b, b_imag) = split_real(&poly_from_roots(&zeros));
    let (a, a_imag) = split_real(&poly_from_roots(&poles));

    // Expansion loses precision when many poles cluster near z = 1; the
    // polynomial can then describe an unstable filter even though every
    // designed pole is inside the circle.  The step-down test alone is too
    // eager near |z| = 1, so a measured root outside the circle must agree.
    let feedback_radius = max_root_radius(&a);
    if !is_schur_stable(&a) && feedback_radius >= 1.0 {
        return Err(unstable(feedback_radius));
    }

    let scale_b = b.iter().map(|v| v.abs()).fold(0.0_f64, f64::max).max(1.0);
    let scale_a = a.iter().map(|v| v.abs()).fold(0.0_f64, f64::max).max(1.0);
    let max_imag = (b_imag / scale_b).max(a_imag / scale_a);
    if max_imag > IMAG_TOLERANCE {
        return Err(FilterError::NonRealCoefficients { max_imag });
    }

    // Unity gain at the digital image of the analog centre frequency.
    let omega0 = 2.0 * (w0 / 2.0).atan();
    let gain = magnitude_at_omega(&b, &a, omega0);
    let b: Vec<f64> = b.iter().map(|v| v / gain).collect();

    if feedback_radius > MARGINAL_POLE_RADIUS {
        warn!(
            "butterworth band-pass {:.3}–{:.3} Hz order {order} is marginally stable \
             (max pole radius {feedback_radius:.6})",
            spec.low_cutoff_hz, spec.high_cutoff_hz
        );
    }
    debug!(
        "designed butterworth band-pass {:.3}–{:.3} Hz @ {} Hz, order {order}, \
         {} taps, max pole radius {feedback_radius:.6}",
        spec.low_cutoff_hz,
        spec.high_cutoff_hz,
        spec.sample_rate_hz,
        b.len()
    );

    Coefficients::new(b, a)
}

/// Digital band-pass poles for Nyquist-fraction edges `low`/`high`, plus the
/// pre-warped analog centre frequency.
fn digital_poles(low: f64, high: f64, order: usize) -> (Vec<Complex64>, f64) {
    let wl = prewarp(low);
    let wh = prewarp(high);
    let bw = wh - wl;
    let w0 = (wl * wh).sqrt();

    let analog = lowpass_to_bandpass(&butter_prototype(order), bw, w0);
    (analog.iter().map(|&s| bilinear(s)).collect(), w0)
}

/// Pre-warp a Nyquist-fraction frequency onto the analog axis of the bilinear
/// transform with sample period 1.
pub fn prewarp(w: f64) -> f64 {
    2.0 * (PI * w / 2.0).tan()
}

/// Analog Butterworth low-pass prototype poles of order `n` (cutoff 1 rad/s).
///
/// Matches `scipy.signal.buttap`: `p_k = −exp(jπ·m / 2n)` for
/// `m = −n+1, −n+3, …, n−1`.  No zeros, unity DC gain.
pub fn butter_prototype(n: usize) -> Vec<Complex64> {
    (0..n)
        .map(|k| {
            let m = 2.0 * k as f64 - (n as f64 - 1.0);
            -Complex64::from_polar(1.0, PI * m / (2.0 * n as f64))
        })
        .collect()
}

/// Map low-pass prototype poles to band-pass poles with bandwidth `bw` and
/// centre `w0` (both rad/s).  Each pole `p` yields the two roots of
/// `s² − p·bw·s + w0²`.
pub fn lowpass_to_bandpass(poles: &[Complex64], bw: f64, w0: f64) -> Vec<Complex64> {
    let w0_sq = Complex64::new(w0 * w0, 0.0);
    let scaled: Vec<Complex64> = poles.iter().map(|&p| p * (bw / 2.0)).collect();
    let disc: Vec<Complex64> = scaled.iter().map(|&p| (p * p - w0_sq).sqrt()).collect();

    scaled
        .iter()
        .zip(&disc)
        .map(|(&p, &d)| p + d)
        .chain(scaled.iter().zip(&disc).map(|(&p, &d)| p - d))
        .collect()
}

/// Bilinear transform of one analog root: `z = (2 + s) / (2 − s)`.
pub fn bilinear(s: Complex64) -> Complex64 {
    let two = Complex64::new(2.0, 0.0);
    (two + s) / (two - s)
}
