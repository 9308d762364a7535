//! Bessel evaluations backing the Kaiser window and the 2-D jinc profile.
//!
//! Polynomial and rational approximations from Abramowitz & Stegun
//! (9.8.1/9.8.2 for `I0`, 9.4.4/9.4.6 for `J1`), accurate to roughly 1e-7,
//! which is ample for window shaping.

use num_traits::Float;

/// Bessel function evaluations required by filter design.
pub trait Bessel: Sized {
    /// Modified Bessel function of the first kind, order 0.
    fn i0(self) -> Self;
    /// Bessel function of the first kind, order 1.
    fn j1(self) -> Self;
}

impl Bessel for f64 {
    fn i0(self) -> Self {
        let ax = Float::abs(self);
        if ax < 3.75 {
            let t = (self / 3.75) * (self / 3.75);
            1.0 + t
                * (3.5156229
                    + t * (3.0899424
                        + t * (1.2067492
                            + t * (0.2659732 + t * (0.0360768 + t * 0.0045813)))))
        } else {
            let t = 3.75 / ax;
            (Float::exp(ax) / Float::sqrt(ax))
                * (0.39894228
                    + t * (0.01328592
                        + t * (0.00225319
                            + t * (-0.00157565
                                + t * (0.00916281
                                    + t * (-0.02057706
                                        + t * (0.02635537
                                            + t * (-0.01647633 + t * 0.00392377))))))))
        }
    }

    fn j1(self) -> Self {
        let ax = Float::abs(self);
        if ax < 8.0 {
            let y = self * self;
            let p1 = self
                * (72_362_614_232.0
                    + y * (-7_895_059_235.0
                        + y * (242_396_853.1
                            + y * (-2_972_611.439
                                + y * (15_704.482_60 + y * (-30.160_366_06))))));
            let p2 = 144_725_228_442.0
                + y * (2_300_535_178.0
                    + y * (18_583_304.74 + y * (99_447.433_94 + y * (376.999_139_7 + y))));
            p1 / p2
        } else {
            let z = 8.0 / ax;
            let y = z * z;
            let xx = ax - 2.356_194_491;
            let p1 = 1.0
                + y * (0.183_105e-2
                    + y * (-0.351_639_649_6e-4
                        + y * (0.245_752_017_4e-5 + y * (-0.240_337_019e-6))));
            let p2 = 0.046_874_999_95
                + y * (-0.200_269_087_3e-3
                    + y * (0.844_919_909_6e-5
                        + y * (-0.882_289_87e-6 + y * 0.105_787_412e-6)));
            let ans = Float::sqrt(0.636_619_772 / ax)
                * (Float::cos(xx) * p1 - z * Float::sin(xx) * p2);
            if self < 0.0 {
                -ans
            } else {
                ans
            }
        }
    }
}

impl Bessel for f32 {
    fn i0(self) -> Self {
        (self as f64).i0() as f32
    }

    fn j1(self) -> Self {
        (self as f64).j1() as f32
    }
}
