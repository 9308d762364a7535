//! Upsampling by zero-stuffing through a matched low-pass filter.
//!
//! The signal is reflect-padded, zero-stuffed by the ratio via transposed
//! convolution with a Kaiser-sinc (1-D) or Kaiser-jinc (2-D) filter, scaled
//! to restore the energy lost to stuffing, then cropped so the output is
//! exactly `ratio` times the input length and phase-aligned: output sample
//! `k * ratio` corresponds to input sample `k`.

use alloc::vec::Vec;

use crate::filter::design::{
    design_lowpass_1d, design_lowpass_2d, FilterSpec, ImpulseResponse, ImpulseResponse2d,
};
use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle};
use crate::special::Bessel;
use bandlimit_core::{conv_transpose_1d, conv_transpose_2d, pad_1d, pad_2d, PadMode};
use nalgebra::RealField;
use ndarray::{s, Array2, Array3, ArrayBase, ArrayD, Data, IxDyn};
use num_traits::{Float, NumAssign};

/// Constructor config for the resampler kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResampleConfig {
    /// Integer rate-conversion ratio.
    pub ratio: usize,
    /// Tap count override; defaults to `(6 * ratio / 2) * 2` so the filter
    /// main lobe spans roughly the same number of output samples at any
    /// ratio. Must be even and at least `ratio`.
    pub kernel_size: Option<usize>,
}

impl ResampleConfig {
    /// Config with the default kernel size for `ratio`.
    pub fn new(ratio: usize) -> Self {
        Self {
            ratio,
            kernel_size: None,
        }
    }
}

pub(crate) fn resolve_resample_params(config: &ResampleConfig) -> Result<usize, ConfigError> {
    if config.ratio == 0 {
        return Err(ConfigError::InvalidArgument {
            arg: "ratio",
            reason: "ratio must be greater than zero",
        });
    }
    let kernel_size = config
        .kernel_size
        .unwrap_or(6 * config.ratio / 2 * 2);
    if kernel_size < config.ratio {
        return Err(ConfigError::InvalidArgument {
            arg: "kernel_size",
            reason: "kernel_size must be at least the ratio",
        });
    }
    Ok(kernel_size)
}

/// Low-pass design parameters matched to a resampling ratio: the cutoff sits
/// at the new Nyquist rate and the transition band narrows proportionally.
pub(crate) fn resample_spec<F>(ratio: usize, kernel_size: usize) -> Result<FilterSpec<F>, ConfigError>
where
    F: Float,
{
    let r = F::from(ratio).unwrap();
    FilterSpec::new(
        F::from(0.5).unwrap() / r,
        F::from(0.6).unwrap() / r,
        kernel_size,
    )
}

/// Upsampler over the trailing axis of a batched 1-D signal.
#[derive(Debug, Clone, PartialEq)]
pub struct UpSample1d<F> {
    ratio: usize,
    kernel_size: usize,
    pad: usize,
    response: ImpulseResponse<F>,
}

impl<F> KernelLifecycle for UpSample1d<F>
where
    F: Float + RealField + Bessel,
{
    type Config = ResampleConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let kernel_size = resolve_resample_params(&config)?;
        let spec = resample_spec(config.ratio, kernel_size)?;
        let response = design_lowpass_1d(&spec)?;
        Ok(Self {
            ratio: config.ratio,
            kernel_size,
            pad: kernel_size / config.ratio - 1,
            response,
        })
    }
}

impl<F> UpSample1d<F>
where
    F: Float + NumAssign,
{
    /// The rate-conversion ratio.
    pub fn ratio(&self) -> usize {
        self.ratio
    }

    /// The matched low-pass impulse response.
    pub fn response(&self) -> &ImpulseResponse<F> {
        &self.response
    }

    /// Multiply the trailing axis length by the ratio.
    pub fn apply<S>(&self, x: &ArrayBase<S, IxDyn>) -> Result<ArrayD<F>, ExecInvariantViolation>
    where
        S: Data<Elem = F>,
    {
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
        let ratio = self.ratio;
        let out_len = len * ratio;
        let crop_left = self.pad * ratio + (self.kernel_size - ratio) / 2;
        let crop_right = self.pad * ratio + (self.kernel_size - ratio + 1) / 2;
        let scale = F::from(ratio).unwrap();

        let flat = x
            .to_owned()
            .into_shape_with_order((batch, len))
            .map_err(|_| ExecInvariantViolation::InvalidState {
                reason: "input could not be flattened to lanes",
            })?;
        let mut out = Array2::zeros((batch, out_len));
        for (lane, mut slot) in flat.rows().into_iter().zip(out.rows_mut()) {
            let padded = pad_1d(lane, self.pad, PadMode::Reflect)?;
            let raw = conv_transpose_1d(padded.view(), self.response.taps(), ratio)?;
            let cropped = raw
                .slice(s![crop_left..raw.len() - crop_right])
                .mapv(|v| v * scale);
            slot.assign(&cropped);
        }

        let mut shape: Vec<usize> = x.shape()[..ndim - 1].to_vec();
        shape.push(out_len);
        out.into_shape_with_order(IxDyn(&shape))
            .map_err(|_| ExecInvariantViolation::InvalidState {
                reason: "output could not be reshaped to the batch layout",
            })
    }
}

/// Upsampler over the two trailing axes of a batched 2-D field.
#[derive(Debug, Clone, PartialEq)]
pub struct UpSample2d<F> {
    ratio: usize,
    kernel_size: usize,
    pad: usize,
    response: ImpulseResponse2d<F>,
}

impl<F> KernelLifecycle for UpSample2d<F>
where
    F: Float + RealField + Bessel,
{
    type Config = ResampleConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let kernel_size = resolve_resample_params(&config)?;
        let spec = resample_spec(config.ratio, kernel_size)?;
        let response = design_lowpass_2d(&spec)?;
        Ok(Self {
            ratio: config.ratio,
            kernel_size,
            pad: kernel_size / 2 - config.ratio / 2,
            response,
        })
    }
}

impl<F> UpSample2d<F>
where
    F: Float + NumAssign,
{
    /// The rate-conversion ratio.
    pub fn ratio(&self) -> usize {
        self.ratio
    }

    /// The matched low-pass impulse response.
    pub fn response(&self) -> &ImpulseResponse2d<F> {
        &self.response
    }

    /// Multiply both trailing axis lengths by the ratio.
    pub fn apply<S>(&self, x: &ArrayBase<S, IxDyn>) -> Result<ArrayD<F>, ExecInvariantViolation>
    where
        S: Data<Elem = F>,
    {
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
        let ratio = self.ratio;
        let (out_h, out_w) = (height * ratio, width * ratio);
        let crop_left = self.pad * ratio + (self.kernel_size - ratio) / 2;
        let crop_right = self.pad * ratio + (self.kernel_size - ratio + 1) / 2;
        // Energy lost to zero-stuffing scales with the ratio per axis.
        let scale = F::from(ratio * ratio).unwrap();

        let flat: Array3<F> = x
            .to_owned()
            .into_shape_with_order((batch, height, width))
            .map_err(|_| ExecInvariantViolation::InvalidState {
                reason: "input could not be flattened to fields",
            })?;
        let mut out = Array3::zeros((batch, out_h, out_w));
        for b in 0..batch {
            let field = flat.slice(s![b, .., ..]);
            let padded = pad_2d(field, self.pad, PadMode::Reflect)?;
            let raw = conv_transpose_2d(padded.view(), self.response.taps(), ratio)?;
            let (raw_h, raw_w) = raw.dim();
            let cropped = raw
                .slice(s![
                    crop_left..raw_h - crop_right,
                    crop_left..raw_w - crop_right
                ])
                .mapv(|v| v * scale);
            out.slice_mut(s![b, .., ..]).assign(&cropped);
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
    use ndarray::Array1;

    fn slow_sine(len: usize) -> ArrayD<f64> {
        Array1::from_iter(
            (0..len).map(|i| (2.0 * core::f64::consts::PI * i as f64 / 64.0).sin()),
        )
        .into_dyn()
    }

    #[test]
    fn output_length_is_exactly_ratio_times_input() {
        for (ratio, len) in [(2usize, 64usize), (3, 10), (4, 7), (2, 1)] {
            let up = UpSample1d::<f64>::try_new(ResampleConfig::new(ratio)).unwrap();
            let x = slow_sine(len);
            let y = up.apply(&x).unwrap();
            assert_eq!(y.shape(), &[len * ratio], "ratio {ratio} len {len}");
        }
    }

    #[test]
    fn default_kernel_size_tracks_ratio() {
        let up = UpSample1d::<f64>::try_new(ResampleConfig::new(2)).unwrap();
        assert_eq!(up.response().kernel_size(), 12);
        let up = UpSample1d::<f64>::try_new(ResampleConfig::new(3)).unwrap();
        assert_eq!(up.response().kernel_size(), 18);
    }

    #[test]
    fn dc_input_stays_near_its_level() {
        let up = UpSample1d::<f64>::try_new(ResampleConfig::new(2)).unwrap();
        let x = ArrayD::from_elem(IxDyn(&[32]), 1.0f64);
        let y = up.apply(&x).unwrap();
        // Polyphase branches of a finite kernel differ slightly; the level
        // is preserved to within the filter ripple.
        for &v in y.iter() {
            assert_abs_diff_eq!(v, 1.0, epsilon = 5e-2);
        }
    }

    #[test]
    fn upsampled_signal_is_phase_aligned() {
        let up = UpSample1d::<f64>::try_new(ResampleConfig::new(2)).unwrap();
        let x = slow_sine(64);
        let y = up.apply(&x).unwrap();
        for k in 8..56 {
            assert_abs_diff_eq!(y[[2 * k]], x[[k]], epsilon = 5e-2);
        }
    }

    #[test]
    fn leading_axes_are_preserved() {
        let up = UpSample1d::<f64>::try_new(ResampleConfig::new(3)).unwrap();
        let x = ArrayD::from_elem(IxDyn(&[2, 4, 8]), 0.5f64);
        let y = up.apply(&x).unwrap();
        assert_eq!(y.shape(), &[2, 4, 24]);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        assert!(UpSample1d::<f64>::try_new(ResampleConfig::new(0)).is_err());
        assert!(UpSample1d::<f64>::try_new(ResampleConfig {
            ratio: 2,
            kernel_size: Some(7),
        })
        .is_err());
        assert!(UpSample1d::<f64>::try_new(ResampleConfig {
            ratio: 8,
            kernel_size: Some(4),
        })
        .is_err());
    }

    #[test]
    fn upsample_2d_doubles_both_axes() {
        let up = UpSample2d::<f64>::try_new(ResampleConfig::new(2)).unwrap();
        let x = ArrayD::from_elem(IxDyn(&[1, 8, 8]), 1.0f64);
        let y = up.apply(&x).unwrap();
        assert_eq!(y.shape(), &[1, 16, 16]);
        for &v in y.iter() {
            assert_abs_diff_eq!(v, 1.0, epsilon = 5e-2);
        }
    }

    #[test]
    fn upsample_2d_rejects_vector_input() {
        let up = UpSample2d::<f64>::try_new(ResampleConfig::new(2)).unwrap();
        let x = ArrayD::from_elem(IxDyn(&[8]), 1.0f64);
        assert!(matches!(
            up.apply(&x),
            Err(ExecInvariantViolation::InvalidState { .. })
        ));
    }
}
