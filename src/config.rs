//! Filter configuration.
//!
//! [`FilterSpec`] holds every tunable parameter of the band-pass design.  The
//! defaults match the values the EEG upload service filters with.
use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};

/// Largest prototype order [`FilterSpec::normalized_band`] accepts.
///
/// Far beyond anything that survives the stability check, but small enough
/// that the coefficient arithmetic never overflows.
pub const MAX_ORDER: usize = 50;

/// Frequency specification of a Butterworth band-pass filter.
///
/// All fields are `pub` so you can construct one with struct-update syntax:
///
/// ```
/// use eeg_bandpass::FilterSpec;
///
/// let spec = FilterSpec {
///     high_cutoff_hz: 40.0,  // keep low gamma
///     order:          4,
///     ..FilterSpec::default()
/// };
/// assert!(spec.validate().is_ok());
/// ```
///
/// Or just call [`FilterSpec::default()`] for the service settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Lower -3 dB edge of the pass band in Hz.
    ///
    /// Default: `1.0` Hz.
    pub low_cutoff_hz: f64,

    /// Upper -3 dB edge of the pass band in Hz.  Must stay below Nyquist.
    ///
    /// Default: `30.0` Hz.
    pub high_cutoff_hz: f64,

    /// Sampling rate of the signals this filter will be applied to, in Hz.
    ///
    /// Default: `100.0` Hz.
    pub sample_rate_hz: f64,

    /// Order of the low-pass prototype.  The band-pass filter has twice as
    /// many poles, so the coefficient vectors have `2 * order + 1` entries.
    ///
    /// Orders above ~8 with narrow bands quickly become numerically unstable
    /// in transfer-function form; [`crate::design`] rejects any design that does.
    ///
    /// Default: `5`.
    pub order: usize,
}

impl Default for FilterSpec {
    /// Returns the service configuration: 1–30 Hz · 100 Hz sampling · order 5.
    fn default() -> Self {
        Self {
            low_cutoff_hz: 1.0,
            high_cutoff_hz: 30.0,
            sample_rate_hz: 100.0,
            order: 5,
        }
    }
}

impl FilterSpec {
    /// Build a spec from its four fields.  Nothing is checked until
    /// [`validate`](Self::validate) or [`crate::design`] runs.
    pub fn new(low_cutoff_hz: f64, high_cutoff_hz: f64, sample_rate_hz: f64, order: usize) -> Self {
        Self { low_cutoff_hz, high_cutoff_hz, sample_rate_hz, order }
    }

    /// Half the sampling rate.
    pub fn nyquist_hz(&self) -> f64 {
        0.5 * self.sample_rate_hz
    }

    /// Cutoffs as fractions of Nyquist, `(low, high)`, both in `(0, 1)`.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidSpec`] if the band violates
    /// `0 < low < high < fs / 2`, `order == 0` or `order > MAX_ORDER`.
    ///
    /// ```
    /// use eeg_bandpass::FilterSpec;
    /// let (lo, hi) = FilterSpec::default().normalized_band().unwrap();
    /// assert_eq!((lo, hi), (0.02, 0.6));
    /// ```
    pub fn normalized_band(&self) -> Result<(f64, f64)> {
        if self.order == 0 {
            return Err(FilterError::InvalidSpec("order must be at least 1".into()));
        }
        if self.order > MAX_ORDER {
            return Err(FilterError::InvalidSpec(format!(
                "order {} exceeds the maximum of {MAX_ORDER}",
                self.order
            )));
        }
        let fields = [
            ("low_cutoff_hz", self.low_cutoff_hz),
            ("high_cutoff_hz", self.high_cutoff_hz),
            ("sample_rate_hz", self.sample_rate_hz),
        ];
        for (name, v) in fields {
            if !v.is_finite() {
                return Err(FilterError::InvalidSpec(format!("{name} is not finite ({v})")));
            }
        }
        if self.sample_rate_hz <= 0.0 {
            return Err(FilterError::InvalidSpec(format!(
                "sample rate must be positive, got {} Hz",
                self.sample_rate_hz
            )));
        }

        let nyq = self.nyquist_hz();
        let low = self.low_cutoff_hz / nyq;
        let high = self.high_cutoff_hz / nyq;

        if !(low > 0.0 && low < 1.0) {
            return Err(FilterError::InvalidSpec(format!(
                "low cutoff {} Hz outside (0, {nyq}) Hz",
                self.low_cutoff_hz
            )));
        }
        if !(high > 0.0 && high < 1.0) {
            return Err(FilterError::InvalidSpec(format!(
                "high cutoff {} Hz outside (0, {nyq}) Hz",
                self.high_cutoff_hz
            )));
        }
        if low >= high {
            return Err(FilterError::InvalidSpec(format!(
                "low cutoff {} Hz must be below high cutoff {} Hz",
                self.low_cutoff_hz, self.high_cutoff_hz
            )));
        }
        Ok((low, high))
    }

    /// Check the band and order without designing anything.
    pub fn validate(&self) -> Result<()> {
        self.normalized_band().map(|_| ())
    }

    /// Minimum signal length (exclusive) accepted by the zero-phase
    /// applicator for filters designed from this spec.  Saturates at
    /// `usize::MAX` for orders no valid spec can have.
    ///
    /// ```
    /// use eeg_bandpass::FilterSpec;
    /// // order 5 → 11 coefficients → 3 · 11 = 33 padding samples
    /// assert_eq!(FilterSpec::default().min_signal_len(), 33);
    /// ```
    pub fn min_signal_len(&self) -> usize {
        self.order.saturating_mul(2).saturating_add(1).saturating_mul(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(FilterSpec::default().validate().is_ok());
    }

    #[test]
    fn zero_order_rejected() {
        let spec = FilterSpec { order: 0, ..FilterSpec::default() };
        assert!(matches!(spec.validate(), Err(FilterError::InvalidSpec(_))));
    }

    #[test]
    fn huge_order_rejected_without_overflow() {
        for order in [MAX_ORDER + 1, usize::MAX / 4, usize::MAX / 2, usize::MAX] {
            let spec = FilterSpec { order, ..FilterSpec::default() };
            assert!(
                matches!(spec.validate(), Err(FilterError::InvalidSpec(_))),
                "order {order} accepted"
            );
        }
        let spec = FilterSpec { order: MAX_ORDER, ..FilterSpec::default() };
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn min_signal_len_saturates() {
        let spec = FilterSpec { order: usize::MAX / 2, ..FilterSpec::default() };
        assert_eq!(spec.min_signal_len(), usize::MAX);
        let spec = FilterSpec { order: usize::MAX / 4, ..FilterSpec::default() };
        assert_eq!(spec.min_signal_len(), usize::MAX);
        let spec = FilterSpec { order: 2, ..FilterSpec::default() };
        assert_eq!(spec.min_signal_len(), 15);
    }

    #[test]
    fn edges_at_nyquist_or_zero_rejected() {
        for (lo, hi) in [(0.0, 30.0), (1.0, 50.0), (-1.0, 30.0), (30.0, 30.0)] {
            let spec = FilterSpec::new(lo, hi, 100.0, 5);
            assert!(
                matches!(spec.validate(), Err(FilterError::InvalidSpec(_))),
                "({lo}, {hi}) accepted"
            );
        }
    }

    #[test]
    fn non_finite_rejected() {
        let spec = FilterSpec::new(f64::NAN, 30.0, 100.0, 5);
        assert!(matches!(spec.validate(), Err(FilterError::InvalidSpec(_))));
        let spec = FilterSpec::new(1.0, 30.0, f64::INFINITY, 5);
        assert!(matches!(spec.validate(), Err(FilterError::InvalidSpec(_))));
    }

    #[test]
    fn spec_roundtrips_through_json() {
        let spec = FilterSpec::default();
        let s = serde_json::to_string(&spec).unwrap();
        let back: FilterSpec = serde_json::from_str(&s).unwrap();
        assert_eq!(spec, back);
    }
}
