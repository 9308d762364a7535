//! Padding and convolution primitives backing the `bandlimit` kernels.
//!
//! This crate carries the array-level machinery the filter and resampler
//! kernels are built on: edge extension of the trailing signal axes
//! ([`PadMode`], [`pad_1d`], [`pad_2d`]) and valid strided convolution with
//! its zero-stuffing transpose ([`convolve_1d`], [`conv_transpose_1d`] and
//! the 2-D counterparts). Everything operates on [`ndarray`] views and is
//! generic over [`num_traits::NumAssign`] scalars.

#![cfg_attr(not(feature = "std"), no_std)]

use core::{error, fmt};

pub mod conv;
pub mod pad;

pub use conv::*;
pub use pad::*;

/// Errors raised by the convolution primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required input was empty.
    EmptyInput {
        /// Name of the argument that is empty.
        arg: &'static str,
    },
    /// An argument value is invalid.
    InvalidArgument {
        /// Name of the argument.
        arg: &'static str,
        /// Human readable reason.
        reason: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput { arg } => write!(f, "Input `{arg}` was empty."),
            Error::InvalidArgument { arg, reason } => {
                write!(f, "Invalid argument `{arg}`: {reason}")
            }
        }
    }
}

impl error::Error for Error {}

/// Result alias for the convolution primitives.
pub type Result<T> = core::result::Result<T, Error>;
