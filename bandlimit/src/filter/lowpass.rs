//! Strided low-pass filtering of batched signals.
//!
//! A kernel owns its designed impulse response and applies it as a valid
//! strided convolution after replicate-padding the trailing axis (axes) by
//! half the kernel size. Replicate padding is used rather than zeros so the
//! boundary does not see an artificial discontinuity. One trailing sample is
//! dropped from the raw convolution output before reshaping; this trim is a
//! fixed alignment contract of the pad/kernel-size convention.

use alloc::vec::Vec;

use crate::filter::design::{
    design_lowpass_1d, design_lowpass_2d, FilterSpec, ImpulseResponse, ImpulseResponse2d,
};
use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle};
use crate::special::Bessel;
use bandlimit_core::{convolve_1d, convolve_2d, pad_1d, pad_2d, PadMode};
use nalgebra::RealField;
use ndarray::{s, Array2, Array3, ArrayBase, ArrayD, Data, IxDyn};
use num_traits::{Float, NumAssign};

/// Constructor config for [`LowPassFilter1d`] and [`LowPassFilter2d`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowPassConfig<F> {
    /// Filter design parameters.
    pub spec: FilterSpec<F>,
    /// Replicate-pad the signal edges before convolving. Defaults to on;
    /// without padding the convolution runs valid and shortens the output.
    pub pad: bool,
}

impl<F> LowPassConfig<F> {
    /// Config with edge padding enabled.
    pub fn new(spec: FilterSpec<F>) -> Self {
        Self { spec, pad: true }
    }
}

/// Trailing-axis output length for one filtered lane.
fn filtered_len(len: usize, kernel_size: usize, stride: usize, pad: bool) -> usize {
    let padded = if pad {
        len + 2 * (kernel_size / 2)
    } else {
        len
    };
    let count = if padded < kernel_size {
        0
    } else {
        (padded - kernel_size) / stride + 1
    };
    count.saturating_sub(1)
}

fn check_stride(stride: usize) -> Result<(), ExecInvariantViolation> {
    if stride == 0 {
        return Err(ExecInvariantViolation::InvalidState {
            reason: "stride must be greater than zero",
        });
    }
    Ok(())
}

/// Low-pass filter over the trailing axis of a batched 1-D signal.
#[derive(Debug, Clone, PartialEq)]
pub struct LowPassFilter1d<F> {
    spec: FilterSpec<F>,
    pad: bool,
    response: ImpulseResponse<F>,
}

impl<F> KernelLifecycle for LowPassFilter1d<F>
where
    F: Float + RealField + Bessel,
{
    type Config = LowPassConfig<F>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let response = design_lowpass_1d(&config.spec)?;
        Ok(Self {
            spec: config.spec,
            pad: config.pad,
            response,
        })
    }
}

impl<F> LowPassFilter1d<F>
where
    F: Float + NumAssign,
{
    /// Design parameters this kernel was built from.
    pub fn spec(&self) -> &FilterSpec<F> {
        &self.spec
    }

    /// The designed impulse response.
    pub fn response(&self) -> &ImpulseResponse<F> {
        &self.response
    }

    /// Filter and decimate the trailing axis by `stride`.
    ///
    /// Leading batch/channel axes are preserved and never mixed; every lane
    /// is convolved with the same coefficients. With padding enabled the
    /// trailing axis shrinks from `len` to exactly `len / stride`.
    pub fn apply<S>(
        &self,
        x: &ArrayBase<S, IxDyn>,
        stride: usize,
    ) -> Result<ArrayD<F>, ExecInvariantViolation>
    where
        S: Data<Elem = F>,
    {
        check_stride(stride)?;
        let ndim = x.ndim();
        if ndim == 0 {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "input must have a trailing signal axis",
            });
        }
        let len = x.shape()[ndim - 1];
        if len == 0 {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "trailing signal axis must be non-empty",
            });
        }
        let batch: usize = x.shape()[..ndim - 1].iter().product();
        let kernel_size = self.spec.kernel_size;
        let half_size = kernel_size / 2;
        let out_len = filtered_len(len, kernel_size, stride, self.pad);

        let flat = x
            .to_owned()
            .into_shape_with_order((batch, len))
            .map_err(|_| ExecInvariantViolation::InvalidState {
                reason: "input could not be flattened to lanes",
            })?;
        let mut out = Array2::zeros((batch, out_len));
        for (lane, mut slot) in flat.rows().into_iter().zip(out.rows_mut()) {
            let filtered = if self.pad {
                let padded = pad_1d(lane, half_size, PadMode::Replicate)?;
                convolve_1d(padded.view(), self.response.taps(), stride)?
            } else {
                convolve_1d(lane, self.response.taps(), stride)?
            };
            slot.assign(&filtered.slice(s![..out_len]));
        }

        let mut shape: Vec<usize> = x.shape()[..ndim - 1].to_vec();
        shape.push(out_len);
        out.into_shape_with_order(IxDyn(&shape))
            .map_err(|_| ExecInvariantViolation::InvalidState {
                reason: "output could not be reshaped to the batch layout",
            })
    }
}

/// Low-pass filter over the two trailing axes of a batched 2-D field.
#[derive(Debug, Clone, PartialEq)]
pub struct LowPassFilter2d<F> {
    spec: FilterSpec<F>,
    pad: bool,
    response: ImpulseResponse2d<F>,
}

impl<F> KernelLifecycle for LowPassFilter2d<F>
where
    F: Float + RealField + Bessel,
{
    type Config = LowPassConfig<F>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let response = design_lowpass_2d(&config.spec)?;
        Ok(Self {
            spec: config.spec,
            pad: config.pad,
            response,
        })
    }
}

impl<F> LowPassFilter2d<F>
where
    F: Float + NumAssign,
{
    /// Design parameters this kernel was built from.
    pub fn spec(&self) -> &FilterSpec<F> {
        &self.spec
    }

    /// The designed impulse response.
    pub fn response(&self) -> &ImpulseResponse2d<F> {
        &self.response
    }

    /// Filter and decimate both trailing axes by `stride`.
    pub fn apply<S>(
        &self,
        x: &ArrayBase<S, IxDyn>,
        stride: usize,
    ) -> Result<ArrayD<F>, ExecInvariantViolation>
    where
        S: Data<Elem = F>,
    {
        check_stride(stride)?;
        let ndim = x.ndim();
        if ndim < 2 {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "input must have two trailing spatial axes",
            });
        }
        let (height, width) = (x.shape()[ndim - 2], x.shape()[ndim - 1]);
        if height == 0 || width == 0 {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "trailing spatial axes must be non-empty",
            });
        }
        let batch: usize = x.shape()[..ndim - 2].iter().product();
        let kernel_size = self.spec.kernel_size;
        let half_size = kernel_size / 2;
        let out_h = filtered_len(height, kernel_size, stride, self.pad);
        let out_w = filtered_len(width, kernel_size, stride, self.pad);

        let flat: Array3<F> = x
            .to_owned()
            .into_shape_with_order((batch, height, width))
            .map_err(|_| ExecInvariantViolation::InvalidState {
                reason: "input could not be flattened to fields",
            })?;
        let mut out = Array3::zeros((batch, out_h, out_w));
        for b in 0..batch {
            let field = flat.slice(s![b, .., ..]);
            let filtered = if self.pad {
                let padded = pad_2d(field, half_size, PadMode::Replicate)?;
                convolve_2d(padded.view(), self.response.taps(), stride)?
            } else {
                convolve_2d(field, self.response.taps(), stride)?
            };
            out.slice_mut(s![b, .., ..])
                .assign(&filtered.slice(s![..out_h, ..out_w]));
        }

        let mut shape: Vec<usize> = x.shape()[..ndim - 2].to_vec();
        shape.push(out_h);
        shape.push(out_w);
        out.into_shape_with_order(IxDyn(&shape))
            .map_err(|_| ExecInvariantViolation::InvalidState {
                reason: "output could not be reshaped to the batch layout",
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array1, Array2, Array3, Axis};

    fn lowpass_1d(cutoff: f64, half_width: f64, kernel_size: usize) -> LowPassFilter1d<f64> {
        let spec = FilterSpec::new(cutoff, half_width, kernel_size).unwrap();
        LowPassFilter1d::try_new(LowPassConfig::new(spec)).unwrap()
    }

    #[test]
    fn stride_one_preserves_length() {
        let filter = lowpass_1d(0.25, 0.3, 12);
        let x = Array1::from_iter((0..64).map(|i| (i as f64 * 0.1).sin())).into_dyn();
        let y = filter.apply(&x, 1).unwrap();
        assert_eq!(y.shape(), &[64]);
    }

    #[test]
    fn stride_two_halves_length() {
        // cutoff 0.25, half_width 0.3, kernel 12, input 64, stride 2 -> 32.
        let filter = lowpass_1d(0.25, 0.3, 12);
        let x = Array1::from_iter((0..64).map(|i| (i as f64 * 0.2).cos())).into_dyn();
        let y = filter.apply(&x, 2).unwrap();
        assert_eq!(y.shape(), &[32]);
    }

    #[test]
    fn dc_input_passes_with_unit_gain() {
        let filter = lowpass_1d(0.25, 0.3, 12);
        let x = ArrayD::from_elem(IxDyn(&[48]), 0.75f64);
        let y = filter.apply(&x, 1).unwrap();
        for &v in y.iter() {
            assert_abs_diff_eq!(v, 0.75, epsilon = 1e-10);
        }
    }

    #[test]
    fn lanes_are_filtered_independently() {
        let filter = lowpass_1d(0.25, 0.3, 12);
        let mut x = Array2::zeros((2, 32));
        x.row_mut(0).fill(1.0f64);
        x.row_mut(1).fill(-2.0);
        let y = filter.apply(&x.into_dyn(), 2).unwrap();
        assert_eq!(y.shape(), &[2, 16]);
        for &v in y.index_axis(Axis(0), 0).iter() {
            assert_abs_diff_eq!(v, 1.0, epsilon = 1e-10);
        }
        for &v in y.index_axis(Axis(0), 1).iter() {
            assert_abs_diff_eq!(v, -2.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn batch_and_channel_axes_are_preserved() {
        let filter = lowpass_1d(0.25, 0.3, 12);
        let x = Array3::from_elem((2, 3, 16), 1.0f64).into_dyn();
        let y = filter.apply(&x, 2).unwrap();
        assert_eq!(y.shape(), &[2, 3, 8]);
    }

    #[test]
    fn disabled_padding_runs_valid() {
        let spec = FilterSpec::new(0.25f64, 0.3, 12).unwrap();
        let filter = LowPassFilter1d::try_new(LowPassConfig {
            spec,
            pad: false,
        })
        .unwrap();
        let x = ArrayD::from_elem(IxDyn(&[64]), 1.0f64);
        let y = filter.apply(&x, 1).unwrap();
        // (64 - 12) + 1 placements, minus the trailing trim.
        assert_eq!(y.shape(), &[52]);
    }

    #[test]
    fn short_input_yields_empty_output_without_panicking() {
        let filter = lowpass_1d(0.25, 0.3, 12);
        let x = ArrayD::from_elem(IxDyn(&[1]), 1.0f64);
        let y = filter.apply(&x, 2).unwrap();
        assert_eq!(y.shape(), &[0]);
    }

    #[test]
    fn zero_stride_is_rejected_at_apply() {
        let filter = lowpass_1d(0.25, 0.3, 12);
        let x = ArrayD::from_elem(IxDyn(&[16]), 1.0f64);
        assert!(matches!(
            filter.apply(&x, 0),
            Err(ExecInvariantViolation::InvalidState { .. })
        ));
    }

    #[test]
    fn lowpass_2d_strides_both_axes() {
        let spec = FilterSpec::new(0.25f64, 0.3, 12).unwrap();
        let filter = LowPassFilter2d::try_new(LowPassConfig::new(spec)).unwrap();
        let x = ArrayD::from_elem(IxDyn(&[1, 8, 8]), 1.0f64);
        let y = filter.apply(&x, 2).unwrap();
        assert_eq!(y.shape(), &[1, 4, 4]);
        for &v in y.iter() {
            assert_abs_diff_eq!(v, 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn lowpass_2d_requires_two_spatial_axes() {
        let spec = FilterSpec::new(0.25f64, 0.3, 12).unwrap();
        let filter = LowPassFilter2d::try_new(LowPassConfig::new(spec)).unwrap();
        let x = ArrayD::from_elem(IxDyn(&[8]), 1.0f64);
        assert!(matches!(
            filter.apply(&x, 2),
            Err(ExecInvariantViolation::InvalidState { .. })
        ));
    }
}
