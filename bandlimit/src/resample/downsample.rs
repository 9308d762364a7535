//! Downsampling as low-pass filtering with stride.
//!
//! Pure delegation: the decimation ratio becomes the convolution stride of
//! a matched [`LowPassFilter1d`]/[`LowPassFilter2d`], so anti-aliasing and
//! subsampling happen in one pass.

use crate::filter::{LowPassConfig, LowPassFilter1d, LowPassFilter2d};
use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle};
use crate::special::Bessel;
use nalgebra::RealField;
use ndarray::{ArrayBase, ArrayD, Data, IxDyn};
use num_traits::{Float, NumAssign};

use super::{resample_spec, resolve_resample_params, ResampleConfig};

/// Downsampler over the trailing axis of a batched 1-D signal.
#[derive(Debug, Clone, PartialEq)]
pub struct DownSample1d<F> {
    ratio: usize,
    lowpass: LowPassFilter1d<F>,
}

impl<F> KernelLifecycle for DownSample1d<F>
where
    F: Float + RealField + Bessel,
{
    type Config = ResampleConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let kernel_size = resolve_resample_params(&config)?;
        let spec = resample_spec(config.ratio, kernel_size)?;
        Ok(Self {
            ratio: config.ratio,
            lowpass: LowPassFilter1d::try_new(LowPassConfig::new(spec))?,
        })
    }
}

impl<F> DownSample1d<F>
where
    F: Float + NumAssign,
{
    /// The rate-conversion ratio.
    pub fn ratio(&self) -> usize {
        self.ratio
    }

    /// Divide the trailing axis length by the ratio (floor semantics).
    pub fn apply<S>(&self, x: &ArrayBase<S, IxDyn>) -> Result<ArrayD<F>, ExecInvariantViolation>
    where
        S: Data<Elem = F>,
    {
        self.lowpass.apply(x, self.ratio)
    }
}

/// Downsampler over the two trailing axes of a batched 2-D field.
#[derive(Debug, Clone, PartialEq)]
pub struct DownSample2d<F> {
    ratio: usize,
    lowpass: LowPassFilter2d<F>,
}

impl<F> KernelLifecycle for DownSample2d<F>
where
    F: Float + RealField + Bessel,
{
    type Config = ResampleConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let kernel_size = resolve_resample_params(&config)?;
        let spec = resample_spec(config.ratio, kernel_size)?;
        Ok(Self {
            ratio: config.ratio,
            lowpass: LowPassFilter2d::try_new(LowPassConfig::new(spec))?,
        })
    }
}

impl<F> DownSample2d<F>
where
    F: Float + NumAssign,
{
    /// The rate-conversion ratio.
    pub fn ratio(&self) -> usize {
        self.ratio
    }

    /// Divide both trailing axis lengths by the ratio (floor semantics).
    pub fn apply<S>(&self, x: &ArrayBase<S, IxDyn>) -> Result<ArrayD<F>, ExecInvariantViolation>
    where
        S: Data<Elem = F>,
    {
        self.lowpass.apply(x, self.ratio)
    }
}
