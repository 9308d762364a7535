//! Low-pass filter design and application.
//!
//! [`design`] produces Kaiser-windowed impulse responses;
//! [`LowPassFilter1d`]/[`LowPassFilter2d`] apply them as strided
//! convolutions with edge padding.

pub mod design;

mod lowpass;

pub use lowpass::*;
