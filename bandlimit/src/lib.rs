//! Band-limited low-pass filter design and alias-free resampling.
//!
//! Kaiser-window FIR design (sinc in 1-D, radially symmetric jinc in 2-D)
//! plus the resampling operators that apply it: decimation as strided
//! convolution with edge padding, interpolation as zero-stuffing through a
//! matched filter with exact alignment cropping. Signals are `ndarray`
//! arrays with arbitrary leading batch/channel axes and one or two trailing
//! signal axes; every lane is filtered independently with the same
//! coefficients.
//!
//! Kernels are immutable once constructed and validated up front via
//! [`kernel::KernelLifecycle`]; construct once per parameter set and reuse.
//!
//! ```
//! use bandlimit::kernel::KernelLifecycle;
//! use bandlimit::resample::{DownSample1d, ResampleConfig, UpSample1d};
//! use ndarray::Array1;
//!
//! let x = Array1::linspace(0.0f64, 1.0, 32).into_dyn();
//!
//! let up = UpSample1d::<f64>::try_new(ResampleConfig::new(2)).unwrap();
//! let y = up.apply(&x).unwrap();
//! assert_eq!(y.shape(), &[64]);
//!
//! let down = DownSample1d::<f64>::try_new(ResampleConfig::new(2)).unwrap();
//! let z = down.apply(&y).unwrap();
//! assert_eq!(z.shape(), &[32]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod filter;
pub mod kernel;
pub mod resample;
pub mod special;
