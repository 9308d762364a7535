//! Alias-free integer rate conversion.
//!
//! Upsampling zero-stuffs through a matched low-pass filter and crops to
//! exact alignment; downsampling low-pass filters with the decimation ratio
//! as convolution stride. Both directions share [`ResampleConfig`] and the
//! ratio-matched Kaiser design (`cutoff = 0.5/ratio`,
//! `half_width = 0.6/ratio`).

mod downsample;
mod upsample;

pub use downsample::*;
pub use upsample::*;
