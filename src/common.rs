// Copyright 2026 the Arcspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations and tolerances.

use core::f64::consts::{PI, TAU};

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("arcspline requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs;
    fn atan2(self, other: Self) -> Self => atan2;
    fn cosh(self) -> Self => cosh;
    fn exp(self) -> Self => exp;
    fn hypot(self, other: Self) -> Self => hypot;
    fn sin_cos(self) -> (Self, Self) => sincos;
    fn sinh(self) -> Self => sinh;
}

/// Magnitudes below this are treated as zero (radii, determinants, tension offsets).
pub const ZERO_EPSILON: f64 = 1e-10;

/// Smallest pivot magnitude accepted by the linear solvers.
pub const PIVOT_EPSILON: f64 = 1e-12;

/// Sweep angles (in radians) smaller than this produce no Bézier segment.
pub const MIN_SWEEP: f64 = 1e-5;

/// Is `x` zero within [`ZERO_EPSILON`]?
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < ZERO_EPSILON
}

/// Normalize an angle in radians to the range `[0, 2π)`.
///
/// # Examples
///
/// ```
/// use arcspline::common::to_0_2pi;
/// use core::f64::consts::{FRAC_PI_2, PI};
///
/// assert!((to_0_2pi(-FRAC_PI_2) - 1.5 * PI).abs() < 1e-12);
/// assert_eq!(to_0_2pi(0.0), 0.0);
/// ```
#[inline]
pub fn to_0_2pi(angle: f64) -> f64 {
    let r = angle % TAU;
    if r < 0.0 {
        // A tiny negative remainder can round up to exactly 2π.
        let r = r + TAU;
        if r >= TAU {
            0.0
        } else {
            r
        }
    } else {
        r
    }
}

/// Normalize an angle in radians to the range `(-π, π]`.
///
/// Unlike `atan2`, which returns either `π` or `-π` on the negative x axis
/// depending on the sign of zero, this always picks `π`.
#[inline]
pub fn to_pi_pi(angle: f64) -> f64 {
    let r = to_0_2pi(angle);
    if r > PI {
        r - TAU
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;

    #[test]
    fn angle_normalization() {
        assert!((to_0_2pi(3.0 * TAU + 1.0) - 1.0).abs() < 1e-12);
        assert!((to_0_2pi(-1.0) - (TAU - 1.0)).abs() < 1e-12);
        assert_eq!(to_0_2pi(TAU), 0.0);
        assert_eq!(to_0_2pi(-1e-20), 0.0);

        assert_eq!(to_pi_pi(-PI), PI);
        assert_eq!(to_pi_pi(PI), PI);
        assert!((to_pi_pi(1.5 * PI) + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn zero_test() {
        assert!(is_zero(0.0));
        assert!(is_zero(-1e-11));
        assert!(!is_zero(1e-9));
    }
}
