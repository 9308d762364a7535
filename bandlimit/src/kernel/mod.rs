//! Shared kernel substrate.
//!
//! Defines the constructor-validation lifecycle and the error types used by
//! the filter design and resampler kernels.

mod errors;
mod lifecycle;

pub use errors::*;
pub use lifecycle::*;
