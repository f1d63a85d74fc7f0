//! Error type shared by the designer and the zero-phase applicator.
use thiserror::Error;

/// Every failure is local to one `design` / `apply_zero_phase` call and is
/// recoverable by adjusting the inputs. No partial output is ever produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Bad frequency or order parameters.
    #[error("invalid filter spec: {0}")]
    InvalidSpec(String),

    /// The `FilterSpec` yields a digital filter with a pole on or outside the unit
    /// circle. Lower the order or widen the band.
    #[error(
        "unstable filter: pole magnitude {pole_magnitude:.6} >= 1 \
         (order {order}, band {low_hz}–{high_hz} Hz); lower the order or widen the band"
    )]
    UnstableFilter {
        pole_magnitude: f64,
        order: usize,
        low_hz: f64,
        high_hz: f64,
    },

    /// Polynomial expansion left an imaginary residue that should have
    /// cancelled between conjugate pairs.
    #[error("coefficient expansion is not real: max imaginary part {max_imag:.3e}")]
    NonRealCoefficients { max_imag: f64 },

    /// Too few samples for odd-reflection edge padding.
    #[error("signal too short: {len} samples, need more than {min}")]
    SignalTooShort { len: usize, min: usize },

    /// A NaN or infinite sample would contaminate the whole IIR output.
    #[error("non-finite sample at index {index}")]
    NonFiniteInput { index: usize },
}

pub type Result<T> = std::result::Result<T, FilterError>;
