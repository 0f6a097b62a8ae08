// Copyright 2026 the Arcspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use crate::{ParamCurve, Point};

/// A single cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBez {
    /// The start point.
    pub p0: Point,
    /// The first control point.
    pub p1: Point,
    /// The second control point.
    pub p2: Point,
    /// The end point.
    pub p3: Point,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> CubicBez {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// Create a segment from four consecutive points of a chained point list,
    /// as produced by the arc and ellipse conversions.
    #[inline]
    pub fn from_points([p0, p1, p2, p3]: [Point; 4]) -> CubicBez {
        CubicBez { p0, p1, p2, p3 }
    }

    /// The cubic that starts at `p0`, ends at `p3` and passes through `q1`
    /// and `q2` at `t = 1/3` and `t = 2/3`.
    ///
    /// The control points are a fixed linear combination of the four inputs.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcspline::{CubicBez, ParamCurve, Point};
    ///
    /// let q1 = Point::new(1.0, 2.0);
    /// let c = CubicBez::through_points((0.0, 0.0).into(), q1, (2.0, 2.0).into(), (3.0, 0.0).into());
    /// assert!(c.eval(1.0 / 3.0).distance(q1) < 1e-12);
    /// ```
    pub fn through_points(p0: Point, q1: Point, q2: Point, p3: Point) -> CubicBez {
        let (p0v, q1v, q2v, p3v) = (p0.to_vec2(), q1.to_vec2(), q2.to_vec2(), p3.to_vec2());
        let p1 = (-5.0 * p0v + 18.0 * q1v - 9.0 * q2v + 2.0 * p3v) / 6.0;
        let p2 = (-5.0 * p3v + 18.0 * q2v - 9.0 * q1v + 2.0 * p0v) / 6.0;
        CubicBez {
            p0,
            p1: p1.to_point(),
            p2: p2.to_point(),
            p3,
        }
    }
}

impl ParamCurve for CubicBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let v = self.p0.to_vec2() * (mt * mt * mt)
            + (self.p1.to_vec2() * (mt * mt * 3.0)
                + (self.p2.to_vec2() * (mt * 3.0) + self.p3.to_vec2() * t) * t)
                * t;
        v.to_point()
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p3
    }
}
