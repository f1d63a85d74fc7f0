//! Butterworth band-pass design and zero-phase application.
//!
//! - [`design`]: analog prototype → band-pass transform → bilinear transform,
//!   matching `scipy.signal.butter(order, [low, high], btype='band')`.
//! - [`apply`]: forward-backward filtering with odd edge padding, matching
//!   `scipy.signal.filtfilt`.
//! - [`response`]: frequency response of designed coefficients.

pub mod apply;
pub mod design;
pub mod poly;
pub mod response;

pub use apply::{apply_zero_phase, apply_zero_phase_channels, lfilter, lfilter_zi};
pub use design::{bilinear, butter_prototype, design, lowpass_to_bandpass, prewarp, Coefficients};
pub use response::{frequency_response, gain_db};
