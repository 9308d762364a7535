//! Kaiser-window low-pass impulse response design.
//!
//! Parameter selection follows the standard Kaiser estimates (the same
//! empirical fits behind
//! [`scipy.signal.kaiser_beta`](https://docs.scipy.org/doc/scipy/reference/generated/scipy.signal.kaiser_beta.html)):
//! a stopband attenuation is estimated from the requested transition band
//! and kernel length, then the window shape parameter β is chosen by the
//! three-regime rule. The windowed ideal response is a sinc in 1-D and a
//! radially symmetric jinc (Bessel `J1`) in 2-D, normalized to unit DC gain.

use crate::kernel::ConfigError;
use crate::special::Bessel;
use nalgebra::RealField;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use num_traits::Float;

/// Low-pass design parameters, immutable once constructed.
///
/// `cutoff` is a fraction of the sample rate, normally in `(0, 0.5]`;
/// values above 0.5 are tolerated and `cutoff == 0` designs the degenerate
/// all-zero "mute" response. `half_width` sets the transition steepness and
/// `kernel_size` must be a positive even tap count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec<F> {
    /// Cutoff frequency as a fraction of the sample rate.
    pub cutoff: F,
    /// Transition half-width as a fraction of the sample rate.
    pub half_width: F,
    /// Number of taps; must be even and positive.
    pub kernel_size: usize,
}

impl<F> FilterSpec<F>
where
    F: Float,
{
    /// Construct a validated spec.
    pub fn new(cutoff: F, half_width: F, kernel_size: usize) -> Result<Self, ConfigError> {
        let spec = Self {
            cutoff,
            half_width,
            kernel_size,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cutoff >= F::zero()) {
            return Err(ConfigError::InvalidArgument {
                arg: "cutoff",
                reason: "cutoff must not be negative",
            });
        }
        if !(self.half_width > F::zero()) {
            return Err(ConfigError::InvalidArgument {
                arg: "half_width",
                reason: "half_width must be positive",
            });
        }
        if self.kernel_size == 0 || self.kernel_size % 2 != 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "kernel_size",
                reason: "kernel_size must be a positive even number",
            });
        }
        Ok(())
    }
}

/// Designed 1-D impulse response, shaped for single-channel convolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpulseResponse<F> {
    taps: Array1<F>,
}

impl<F> ImpulseResponse<F> {
    /// Filter coefficients.
    pub fn taps(&self) -> ArrayView1<'_, F> {
        self.taps.view()
    }

    /// Number of taps.
    pub fn kernel_size(&self) -> usize {
        self.taps.len()
    }
}

/// Designed 2-D impulse response on a square grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpulseResponse2d<F> {
    taps: Array2<F>,
}

impl<F> ImpulseResponse2d<F> {
    /// Filter coefficients.
    pub fn taps(&self) -> ArrayView2<'_, F> {
        self.taps.view()
    }

    /// Side length of the square kernel.
    pub fn kernel_size(&self) -> usize {
        self.taps.dim().0
    }
}

/// Select the Kaiser window shape parameter β for a transition band.
///
/// The attenuation estimate is
/// `A = 2.285 * (kernel_size / 2 - 1) * π * (4 * half_width) + 7.95`; larger
/// kernels or wider transition bands need less aggressive tapering.
pub fn kaiser_beta<F>(half_width: F, kernel_size: usize) -> F
where
    F: Float + RealField,
{
    let half_size = kernel_size / 2;
    let delta_f = F::from(4.0).unwrap() * half_width;
    let a = F::from(2.285).unwrap()
        * F::from(half_size.saturating_sub(1)).unwrap()
        * F::pi()
        * delta_f
        + F::from(7.95).unwrap();

    if a > F::from(50.0).unwrap() {
        F::from(0.1102).unwrap() * (a - F::from(8.7).unwrap())
    } else if a >= F::from(21.0).unwrap() {
        let excess = a - F::from(21.0).unwrap();
        F::from(0.5842).unwrap() * Float::powf(excess, F::from(0.4).unwrap())
            + F::from(0.07886).unwrap() * excess
    } else {
        F::zero()
    }
}

/// Symmetric (non-periodic) Kaiser window of length `n`.
pub fn kaiser_window<F>(n: usize, beta: F) -> Array1<F>
where
    F: Float + Bessel,
{
    if n == 0 {
        return Array1::zeros(0);
    }
    if n == 1 {
        return Array1::from_elem(1, F::one());
    }
    let denom = beta.i0();
    let half = F::from(n - 1).unwrap() / F::from(2.0).unwrap();
    Array1::from_shape_fn(n, |i| {
        let x = (F::from(i).unwrap() - half) / half;
        let arg = beta * Float::sqrt(Float::max(F::one() - x * x, F::zero()));
        arg.i0() / denom
    })
}

/// Normalized sinc, `sin(πx)/(πx)` with `sinc(0) = 1`.
pub fn sinc<F>(x: F) -> F
where
    F: Float + RealField,
{
    if x == F::zero() {
        return F::one();
    }
    let px = F::pi() * x;
    Float::sin(px) / px
}

/// Radial jinc profile, `J1(2π·cutoff·r)/r` with the `r → 0` limit `π·cutoff`.
fn jinc<F>(cutoff: F, r: F) -> F
where
    F: Float + RealField + Bessel,
{
    if r == F::zero() {
        return F::pi() * cutoff;
    }
    (F::two_pi() * cutoff * r).j1() / r
}

/// Offset sample position of tap `i`, in cutoff-scaled units.
fn tap_position<F>(i: usize, kernel_size: usize, cutoff: F) -> F
where
    F: Float,
{
    let half = F::from(kernel_size / 2).unwrap();
    (F::from(i).unwrap() - half + F::from(0.5).unwrap())
        * (F::from(2.0).unwrap() * cutoff)
}

/// Design a Kaiser-windowed sinc low-pass impulse response.
///
/// The result sums to 1 (unit DC gain, no constant-component leak) whenever
/// `cutoff > 0`, and is all zeros for `cutoff == 0`.
pub fn design_lowpass_1d<F>(spec: &FilterSpec<F>) -> Result<ImpulseResponse<F>, ConfigError>
where
    F: Float + RealField + Bessel,
{
    spec.validate()?;
    let k = spec.kernel_size;
    if spec.cutoff == F::zero() {
        return Ok(ImpulseResponse {
            taps: Array1::zeros(k),
        });
    }

    let window = kaiser_window(k, kaiser_beta(spec.half_width, k));
    let two_cutoff = F::from(2.0).unwrap() * spec.cutoff;
    let mut taps = Array1::from_shape_fn(k, |i| {
        let t = tap_position(i, k, spec.cutoff);
        two_cutoff * window[i] * sinc(two_cutoff * t)
    });
    let sum = taps.sum();
    taps.mapv_inplace(|h| h / sum);
    Ok(ImpulseResponse { taps })
}

/// Design a Kaiser-windowed jinc low-pass impulse response on a square grid.
///
/// The radial profile is evaluated on the Euclidean radius of the same
/// offset sample positions as the 1-D design, windowed by the outer product
/// of the 1-D Kaiser window, then normalized to unit sum.
pub fn design_lowpass_2d<F>(spec: &FilterSpec<F>) -> Result<ImpulseResponse2d<F>, ConfigError>
where
    F: Float + RealField + Bessel,
{
    spec.validate()?;
    let k = spec.kernel_size;
    if spec.cutoff == F::zero() {
        return Ok(ImpulseResponse2d {
            taps: Array2::zeros((k, k)),
        });
    }

    let window = kaiser_window(k, kaiser_beta(spec.half_width, k));
    let pos = Array1::from_shape_fn(k, |i| tap_position(i, k, spec.cutoff));
    let mut taps = Array2::from_shape_fn((k, k), |(i, j)| {
        let r = Float::hypot(pos[i], pos[j]);
        window[i] * window[j] * jinc(spec.cutoff, r)
    });
    let sum = taps.sum();
    taps.mapv_inplace(|h| h / sum);
    Ok(ImpulseResponse2d { taps })
}
