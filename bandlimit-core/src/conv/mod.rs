//! Valid strided convolution and its zero-stuffing transpose.
//!
//! The forward form is the cross-correlation convention of the usual
//! framework `conv` primitives: the kernel slides over the input without
//! implicit padding, advancing by `stride` samples per output. The
//! transposed form is its adjoint, equivalent to inserting `stride - 1`
//! zeros between input samples and running a full convolution.

use crate::{Error, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use num_traits::NumAssign;

fn check_stride(stride: usize) -> Result<()> {
    if stride == 0 {
        return Err(Error::InvalidArgument {
            arg: "stride",
            reason: "stride must be greater than zero",
        });
    }
    Ok(())
}

/// Number of valid kernel placements along one axis.
fn valid_count(len: usize, kernel: usize, stride: usize) -> usize {
    if len < kernel {
        0
    } else {
        (len - kernel) / stride + 1
    }
}

/// Valid cross-correlation of `x` with `kernel`, advancing by `stride`.
///
/// Output length is `(x.len() - kernel.len()) / stride + 1`, or zero when
/// the kernel outsizes the input.
///
/// # Examples
/// ```
/// use bandlimit_core::convolve_1d;
/// use ndarray::array;
///
/// let x = array![1.0, 2.0, 3.0, 4.0];
/// let k = array![1.0, 1.0];
/// assert_eq!(convolve_1d(x.view(), k.view(), 1).unwrap(), array![3.0, 5.0, 7.0]);
/// assert_eq!(convolve_1d(x.view(), k.view(), 2).unwrap(), array![3.0, 7.0]);
/// ```
pub fn convolve_1d<T>(x: ArrayView1<'_, T>, kernel: ArrayView1<'_, T>, stride: usize) -> Result<Array1<T>>
where
    T: NumAssign + Copy,
{
    check_stride(stride)?;
    if kernel.is_empty() {
        return Err(Error::EmptyInput { arg: "kernel" });
    }
    let count = valid_count(x.len(), kernel.len(), stride);
    let mut out = Array1::zeros(count);
    for (o, slot) in out.iter_mut().enumerate() {
        let base = o * stride;
        let mut acc = T::zero();
        for (j, &kv) in kernel.iter().enumerate() {
            acc += x[base + j] * kv;
        }
        *slot = acc;
    }
    Ok(out)
}

/// Transposed (fractionally-strided) convolution of `x` with `kernel`.
///
/// Output length is `(x.len() - 1) * stride + kernel.len()`; an empty input
/// yields an empty output.
///
/// # Examples
/// ```
/// use bandlimit_core::conv_transpose_1d;
/// use ndarray::array;
///
/// let x = array![1.0, 2.0];
/// let k = array![1.0, 1.0, 1.0];
/// let y = conv_transpose_1d(x.view(), k.view(), 2).unwrap();
/// assert_eq!(y, array![1.0, 1.0, 3.0, 2.0, 2.0]);
/// ```
pub fn conv_transpose_1d<T>(
    x: ArrayView1<'_, T>,
    kernel: ArrayView1<'_, T>,
    stride: usize,
) -> Result<Array1<T>>
where
    T: NumAssign + Copy,
{
    check_stride(stride)?;
    if kernel.is_empty() {
        return Err(Error::EmptyInput { arg: "kernel" });
    }
    if x.is_empty() {
        return Ok(Array1::zeros(0));
    }
    let mut out = Array1::zeros((x.len() - 1) * stride + kernel.len());
    for (i, &xv) in x.iter().enumerate() {
        let base = i * stride;
        for (j, &kv) in kernel.iter().enumerate() {
            out[base + j] += xv * kv;
        }
    }
    Ok(out)
}

/// Valid cross-correlation over both trailing axes of a 2-D field.
pub fn convolve_2d<T>(x: ArrayView2<'_, T>, kernel: ArrayView2<'_, T>, stride: usize) -> Result<Array2<T>>
where
    T: NumAssign + Copy,
{
    check_stride(stride)?;
    let (kh, kw) = kernel.dim();
    if kh == 0 || kw == 0 {
        return Err(Error::EmptyInput { arg: "kernel" });
    }
    let (h, w) = x.dim();
    let (oh, ow) = (valid_count(h, kh, stride), valid_count(w, kw, stride));
    let mut out = Array2::zeros((oh, ow));
    for r in 0..oh {
        for c in 0..ow {
            let (br, bc) = (r * stride, c * stride);
            let mut acc = T::zero();
            for i in 0..kh {
                for j in 0..kw {
                    acc += x[[br + i, bc + j]] * kernel[[i, j]];
                }
            }
            out[[r, c]] = acc;
        }
    }
    Ok(out)
}

/// Transposed convolution over both trailing axes of a 2-D field.
pub fn conv_transpose_2d<T>(
    x: ArrayView2<'_, T>,
    kernel: ArrayView2<'_, T>,
    stride: usize,
) -> Result<Array2<T>>
where
    T: NumAssign + Copy,
{
    check_stride(stride)?;
    let (kh, kw) = kernel.dim();
    if kh == 0 || kw == 0 {
        return Err(Error::EmptyInput { arg: "kernel" });
    }
    let (h, w) = x.dim();
    if h == 0 || w == 0 {
        return Ok(Array2::zeros((0, 0)));
    }
    let mut out = Array2::zeros(((h - 1) * stride + kh, (w - 1) * stride + kw));
    for r in 0..h {
        for c in 0..w {
            let xv = x[[r, c]];
            let (br, bc) = (r * stride, c * stride);
            for i in 0..kh {
                for j in 0..kw {
                    out[[br + i, bc + j]] += xv * kernel[[i, j]];
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};

    #[test]
    fn strided_convolution_subsamples_valid_placements() {
        let x = array![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        let k = array![0.5f64, 0.5];
        let y = convolve_1d(x.view(), k.view(), 2).unwrap();
        assert_eq!(y, array![1.5, 3.5, 5.5]);
    }

    #[test]
    fn kernel_longer_than_input_yields_empty_output() {
        let x = array![1.0f64, 2.0];
        let k = array![1.0f64, 1.0, 1.0];
        let y = convolve_1d(x.view(), k.view(), 1).unwrap();
        assert!(y.is_empty());
    }

    #[test]
    fn zero_stride_is_rejected() {
        let x = array![1.0f64, 2.0];
        let k = array![1.0f64];
        assert_eq!(
            convolve_1d(x.view(), k.view(), 0),
            Err(Error::InvalidArgument {
                arg: "stride",
                reason: "stride must be greater than zero",
            })
        );
    }

    #[test]
    fn transpose_matches_explicit_zero_stuffing() {
        let x = array![1.0f64, -2.0, 0.5];
        let k = array![0.25f64, 0.5, 0.25, 0.125];
        let stride = 3;

        let y = conv_transpose_1d(x.view(), k.view(), stride).unwrap();

        // Stuff stride-1 zeros after each sample, then full convolution.
        let mut stuffed = Array1::zeros((x.len() - 1) * stride + 1);
        for (i, &v) in x.iter().enumerate() {
            stuffed[i * stride] = v;
        }
        let mut full = Array1::zeros(stuffed.len() + k.len() - 1);
        for (i, &v) in stuffed.iter().enumerate() {
            for (j, &kv) in k.iter().enumerate() {
                full[i + j] += v * kv;
            }
        }

        assert_eq!(y.len(), full.len());
        for (a, b) in y.iter().zip(full.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn convolve_2d_box_kernel_averages_neighborhood() {
        let x = array![[1.0f64, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let k = array![[0.25f64, 0.25], [0.25, 0.25]];
        let y = convolve_2d(x.view(), k.view(), 1).unwrap();
        assert_eq!(y, array![[3.0, 4.0], [6.0, 7.0]]);
    }

    #[test]
    fn conv_transpose_2d_output_shape() {
        let x = Array1::from_iter((0..6).map(|v| v as f64))
            .into_shape_with_order((2, 3))
            .unwrap();
        let k = array![[1.0f64, 0.0], [0.0, 1.0]];
        let y = conv_transpose_2d(x.view(), k.view(), 2).unwrap();
        assert_eq!(y.dim(), ((2 - 1) * 2 + 2, (3 - 1) * 2 + 2));
    }
}
