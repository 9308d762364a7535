//! Edge extension of the trailing signal axes.
//!
//! Two boundary treatments are supported: [`PadMode::Replicate`] repeats the
//! boundary sample and [`PadMode::Reflect`] mirrors the interior samples
//! without repeating the edge, matching the `replicate`/`reflect` modes of
//! the usual N-d framework padding calls.

use crate::{Error, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Boundary treatment for [`pad_1d`] and [`pad_2d`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadMode {
    /// Repeat the boundary sample.
    Replicate,
    /// Mirror interior samples, excluding the boundary sample itself.
    Reflect,
}

/// Fold an out-of-range index back into `[0, n)` for the given mode.
///
/// Reflection folds with period `2(n - 1)`, so arbitrarily large pads stay
/// in range; a length-1 lane always resolves to index 0.
fn edge_index(i: isize, n: isize, mode: PadMode) -> usize {
    match mode {
        PadMode::Replicate => i.clamp(0, n - 1) as usize,
        PadMode::Reflect => {
            if n == 1 {
                return 0;
            }
            let period = 2 * (n - 1);
            let mut k = i.rem_euclid(period);
            if k >= n {
                k = period - k;
            }
            k as usize
        }
    }
}

/// Pad a 1-D lane by `pad` samples on each side.
///
/// # Examples
/// ```
/// use bandlimit_core::{pad_1d, PadMode};
/// use ndarray::array;
///
/// let x = array![1.0, 2.0, 3.0, 4.0];
/// let replicated = pad_1d(x.view(), 2, PadMode::Replicate).unwrap();
/// assert_eq!(replicated, array![1.0, 1.0, 1.0, 2.0, 3.0, 4.0, 4.0, 4.0]);
///
/// let reflected = pad_1d(x.view(), 2, PadMode::Reflect).unwrap();
/// assert_eq!(reflected, array![3.0, 2.0, 1.0, 2.0, 3.0, 4.0, 3.0, 2.0]);
/// ```
pub fn pad_1d<T>(x: ArrayView1<'_, T>, pad: usize, mode: PadMode) -> Result<Array1<T>>
where
    T: Copy,
{
    if x.is_empty() {
        return Err(Error::EmptyInput { arg: "x" });
    }
    let n = x.len() as isize;
    Ok(Array1::from_iter(
        (0..x.len() + 2 * pad).map(|j| x[edge_index(j as isize - pad as isize, n, mode)]),
    ))
}

/// Pad a 2-D field by `pad` samples on every side.
pub fn pad_2d<T>(x: ArrayView2<'_, T>, pad: usize, mode: PadMode) -> Result<Array2<T>>
where
    T: Copy,
{
    let (h, w) = x.dim();
    if h == 0 || w == 0 {
        return Err(Error::EmptyInput { arg: "x" });
    }
    Ok(Array2::from_shape_fn((h + 2 * pad, w + 2 * pad), |(r, c)| {
        let i = edge_index(r as isize - pad as isize, h as isize, mode);
        let j = edge_index(c as isize - pad as isize, w as isize, mode);
        x[[i, j]]
    }))
}
