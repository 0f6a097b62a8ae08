// Copyright 2026 the Arcspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Splines under tension.
//!
//! A tension spline interpolates its knots with hyperbolic segments
//! parametrized by chord length. Low tension approaches a clamped cubic
//! spline; high tension pulls each segment toward its chord.

use alloc::vec::Vec;

use crate::common::ZERO_EPSILON;
use crate::cubicspline::scratch;
use crate::linear::Tridiagonal;
use crate::{ParamCurve, Point, SplineError, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Tensions below this are raised to it.
///
/// The system coefficients shrink with the square of the tension, so very
/// small values lose all precision.
pub const MIN_TENSION: f64 = 1e-3;

/// Above this argument `sinh` and `cosh` are replaced by their exponential
/// asymptotes, which do not overflow.
const HYPERBOLIC_CUTOFF: f64 = 20.0;

/// Remove knots closer than `tolerance` to the previously kept knot.
///
/// The knots are compacted in place and the new length is returned. Applying
/// the same tolerance again removes nothing.
///
/// # Examples
///
/// ```
/// use arcspline::{dedup_knots, Point};
///
/// let mut knots = vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1e-9),
///     Point::new(1.0, 0.0),
/// ];
/// assert_eq!(dedup_knots(&mut knots, 1e-6), 2);
/// ```
pub fn dedup_knots(knots: &mut Vec<Point>, tolerance: f64) -> usize {
    let before = knots.len();
    knots.dedup_by(|next, kept| next.distance(*kept) < tolerance);
    if knots.len() != before {
        log::trace!("removed {} duplicate knots", before - knots.len());
    }
    knots.len()
}

/// A spline under tension through a sequence of knots.
#[derive(Clone, Debug)]
pub struct TensionSpline {
    knots: Vec<Point>,
    chords: Vec<f64>,
    curvatures: Vec<Vec2>,
    sigma: f64,
    closed: bool,
}

impl TensionSpline {
    /// Fit a tension spline through `knots`.
    ///
    /// Knots within `tolerance` of their predecessor are dropped first. If
    /// the first and last knots are within `tolerance` of each other the
    /// curve is treated as closed and gets the same tangent at both ends.
    ///
    /// Tension is relative to the mean chord length; it is raised to at
    /// least [`MIN_TENSION`]. Scaling all knots (and `tolerance`) by a
    /// common factor scales the curve by the same factor.
    ///
    /// The first and last rows of the system use the diagonal of their
    /// single chord, so the open and closed curves through the same knots
    /// differ only in the end slope.
    pub fn new(
        mut knots: Vec<Point>,
        tension: f64,
        tolerance: f64,
    ) -> Result<TensionSpline, SplineError> {
        let tolerance = tolerance.max(ZERO_EPSILON);
        let closed = match (knots.first(), knots.last()) {
            (Some(first), Some(last)) => knots.len() > 1 && first.distance(*last) < tolerance,
            _ => false,
        };
        let n = dedup_knots(&mut knots, tolerance);
        if n < 2 {
            log::debug!("tension spline with {n} distinct knots");
            return Err(SplineError::TooFewKnots(n));
        }
        let segments = n - 1;

        let mut chords = scratch(segments)?;
        let mut dirs = scratch(segments)?;
        for w in knots.windows(2) {
            let d = w[1] - w[0];
            let h = d.hypot();
            chords.push(h);
            dirs.push(d / h);
        }
        let total: f64 = chords.iter().sum();
        let mean = total / segments as f64;
        let sigma = tension.max(MIN_TENSION) / mean;

        // End slopes: the first chord at the start, and at the end either the
        // last chord or, when closed, the first one again.
        let start_slope = dirs[0];
        let end_slope = if closed { dirs[0] } else { dirs[segments - 1] };

        // Every row is multiplied by the mean chord, which leaves the
        // solution unchanged and makes the pivots independent of the
        // coordinate scale.
        let mut rhs = scratch(n)?;
        rhs.push((dirs[0] - start_slope) * mean);
        for i in 1..segments {
            rhs.push((dirs[i] - dirs[i - 1]) * mean);
        }
        rhs.push((end_slope - dirs[segments - 1]) * mean);

        let row = |h: f64| {
            let (diag, off) = coefficients(sigma, h);
            (diag * mean, off * mean)
        };
        let mut system = Tridiagonal::new(n)?;
        let (mut prev_diag, mut prev_off) = row(chords[0]);
        system.set_row(0, 0.0, prev_diag, prev_off);
        for i in 1..segments {
            let (diag, off) = row(chords[i]);
            system.set_row(i, prev_off, prev_diag + diag, off);
            (prev_diag, prev_off) = (diag, off);
        }
        system.set_row(segments, prev_off, prev_diag, 0.0);
        log::trace!("tension spline: {n} knots, sigma {sigma}, closed {closed}");
        system.solve(&mut rhs)?;

        Ok(TensionSpline {
            knots,
            chords,
            curvatures: rhs,
            sigma,
            closed,
        })
    }

    /// The knots after duplicate removal.
    #[inline]
    pub fn knots(&self) -> &[Point] {
        &self.knots
    }

    /// The length of each chord between consecutive knots.
    #[inline]
    pub fn chords(&self) -> &[f64] {
        &self.chords
    }

    /// The solved curvature term at each knot.
    ///
    /// The second derivative at knot `i` is `sigma² · curvatures[i]`.
    #[inline]
    pub fn curvatures(&self) -> &[Vec2] {
        &self.curvatures
    }

    /// The tension factor scaled by the mean chord length.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Whether the first and last knots coincided.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The number of segments, one fewer than the number of knots.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.chords.len()
    }

    /// Segment `i`, or `None` past the last segment.
    pub fn segment(&self, i: usize) -> Option<TensionSegment> {
        let chord = *self.chords.get(i)?;
        Some(TensionSegment {
            p0: self.knots[i],
            p1: self.knots[i + 1],
            z0: self.curvatures[i],
            z1: self.curvatures[i + 1],
            chord,
            sigma: self.sigma,
        })
    }

    /// Evaluate segment `i` at distance `s` along its chord, `0 <= s <= chords()[i]`.
    #[inline]
    pub fn eval(&self, i: usize, s: f64) -> Option<Point> {
        self.segment(i).map(|seg| seg.eval_at_length(s))
    }
}

/// The diagonal and off-diagonal contribution of a chord of length `h`.
fn coefficients(sigma: f64, h: f64) -> (f64, f64) {
    let x = sigma * h;
    let diag = sigma * coth(x) - 1.0 / h;
    let off = 1.0 / h - sigma * csch(x);
    (diag, off)
}

fn coth(x: f64) -> f64 {
    if x > HYPERBOLIC_CUTOFF {
        1.0
    } else {
        x.cosh() / x.sinh()
    }
}

fn csch(x: f64) -> f64 {
    if x > HYPERBOLIC_CUTOFF {
        2.0 * (-x).exp()
    } else {
        1.0 / x.sinh()
    }
}

/// `sinh(a) / sinh(b)` for `0 <= a <= b`.
fn sinh_ratio(a: f64, b: f64) -> f64 {
    if b > HYPERBOLIC_CUTOFF {
        (a - b).exp() * (1.0 - (-2.0 * a).exp()) / (1.0 - (-2.0 * b).exp())
    } else {
        a.sinh() / b.sinh()
    }
}

/// One segment of a [`TensionSpline`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TensionSegment {
    /// The start knot.
    pub p0: Point,
    /// The end knot.
    pub p1: Point,
    /// Curvature term at the start knot.
    pub z0: Vec2,
    /// Curvature term at the end knot.
    pub z1: Vec2,
    /// Distance from `p0` to `p1`.
    pub chord: f64,
    /// Tension factor of the whole spline.
    pub sigma: f64,
}

impl TensionSegment {
    /// Evaluate at distance `s` along the chord.
    ///
    /// `s` is clamped to `[0, chord]`.
    pub fn eval_at_length(&self, s: f64) -> Point {
        let h = self.chord;
        let s = s.clamp(0.0, h);
        let x = self.sigma * h;
        let a = sinh_ratio(self.sigma * (h - s), x);
        let b = sinh_ratio(self.sigma * s, x);
        let u = (h - s) / h;
        let t = s / h;
        let p = self.z0 * a
            + self.z1 * b
            + (self.p0.to_vec2() - self.z0) * u
            + (self.p1.to_vec2() - self.z1) * t;
        p.to_point()
    }
}

impl ParamCurve for TensionSegment {
    /// Evaluate at `t * chord` along the chord.
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.eval_at_length(t * self.chord)
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Boundary, CubicSpline, EndCondition};

    fn zigzag() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 1.0),
            Point::new(4.0, 0.0),
        ]
    }

    /// Numerical derivative with respect to arc length.
    fn slope(spline: &TensionSpline, i: usize, s: f64) -> Vec2 {
        let eps = 1e-6;
        let a = spline.eval(i, s - eps).unwrap();
        let b = spline.eval(i, s + eps).unwrap();
        (b - a) / (2.0 * eps)
    }

    #[test]
    fn interpolates_knots() {
        let knots = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 3.0),
            Point::new(5.0, 3.5),
            Point::new(6.0, 0.0),
            Point::new(9.0, -1.0),
        ];
        for tension in [0.1, 1.0, 10.0, 1000.0] {
            let spline = TensionSpline::new(knots.clone(), tension, 1e-6).unwrap();
            assert!(!spline.is_closed());
            assert_eq!(spline.segment_count(), 4);
            for i in 0..4 {
                let h = spline.chords()[i];
                let a = spline.eval(i, 0.0).unwrap();
                let b = spline.eval(i, h).unwrap();
                assert!(a.distance(knots[i]) < 1e-9, "tension {tension}: {a:?}");
                assert!(b.distance(knots[i + 1]) < 1e-9, "tension {tension}: {b:?}");
                let mid = spline.eval(i, 0.5 * h).unwrap();
                assert!(mid.is_finite());
            }
            assert!(spline.eval(4, 0.0).is_none());
        }
    }

    #[test]
    fn sigma_scales_with_mean_chord() {
        let spline = TensionSpline::new(zigzag(), 2.0, 1e-6).unwrap();
        let expected = 2.0 * 4.0 / (4.0 * 2.0_f64.sqrt());
        assert!((spline.sigma() - expected).abs() < 1e-12);
        for h in spline.chords() {
            assert!((h - 2.0_f64.sqrt()).abs() < 1e-12);
        }
    }

    #[test]
    fn scaled_knots_give_scaled_curve() {
        let reference = TensionSpline::new(zigzag(), MIN_TENSION, 1e-9).unwrap();
        for scale in [1e-6, 1e4, 1e6] {
            let knots = zigzag()
                .into_iter()
                .map(|p| (p.to_vec2() * scale).to_point())
                .collect();
            let spline = TensionSpline::new(knots, MIN_TENSION, 1e-9 * scale).unwrap();
            let ratio = spline.sigma() * scale / reference.sigma();
            assert!((ratio - 1.0).abs() < 1e-12, "scale {scale}: sigma ratio {ratio}");
            for i in 0..reference.segment_count() {
                let h = reference.chords()[i];
                for t in [0.25, 0.5, 0.75] {
                    let a = reference.eval(i, t * h).unwrap();
                    let b = spline.eval(i, t * h * scale).unwrap();
                    let b = (b.to_vec2() / scale).to_point();
                    assert!(a.distance(b) < 1e-6, "scale {scale}, segment {i}: {a:?} vs {b:?}");
                }
            }
        }
        let mid = reference.eval(1, 0.5 * reference.chords()[1]).unwrap();
        assert!(mid.distance(Point::new(1.5, 0.46875)) < 1e-6, "{mid:?}");
    }

    #[test]
    fn end_slopes_follow_chords() {
        let spline = TensionSpline::new(zigzag(), 1.0, 1e-6).unwrap();
        let h = spline.chords()[0];
        let d0 = Vec2::new(1.0, 1.0).normalize();
        let d3 = Vec2::new(1.0, -1.0).normalize();
        assert!((slope(&spline, 0, 2e-6) - d0).hypot() < 1e-4);
        assert!((slope(&spline, 3, h - 2e-6) - d3).hypot() < 1e-4);
    }

    #[test]
    fn closed_curve_has_matching_end_slopes() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(0.0, 1e-9),
        ];
        let spline = TensionSpline::new(square, 1.0, 1e-6).unwrap();
        assert!(spline.is_closed());
        assert_eq!(spline.knots().len(), 5);
        let last = spline.segment_count() - 1;
        let h = spline.chords()[last];
        let start = slope(&spline, 0, 2e-6);
        let end = slope(&spline, last, h - 2e-6);
        assert!((start - Vec2::new(1.0, 0.0)).hypot() < 1e-4);
        assert!((end - Vec2::new(1.0, 0.0)).hypot() < 1e-4);

        let open = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(0.0, 0.5),
        ];
        assert!(!TensionSpline::new(open, 1.0, 1e-6).unwrap().is_closed());
    }

    #[test]
    fn duplicate_knots() {
        let mut knots = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1e-9),
            Point::new(1.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 1e-7),
        ];
        assert_eq!(dedup_knots(&mut knots, 1e-6), 3);
        assert_eq!(
            knots,
            [
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(2.0, 0.0)
            ]
        );
        assert_eq!(dedup_knots(&mut knots, 1e-6), 3);

        // Each knot is compared to the last one kept, not to its neighbor.
        let mut creeping = vec![
            Point::new(0.0, 0.0),
            Point::new(0.6e-6, 0.0),
            Point::new(1.2e-6, 0.0),
        ];
        assert_eq!(dedup_knots(&mut creeping, 1e-6), 2);
        assert_eq!(creeping[1], Point::new(1.2e-6, 0.0));
        assert_eq!(dedup_knots(&mut creeping, 1e-6), 2);
    }

    #[test]
    fn too_few_knots() {
        let knots = vec![Point::new(0.0, 0.0), Point::new(1e-9, 0.0)];
        assert_eq!(
            TensionSpline::new(knots, 1.0, 1e-6).unwrap_err(),
            SplineError::TooFewKnots(1)
        );
        assert_eq!(
            TensionSpline::new(Vec::new(), 1.0, 1e-6).unwrap_err(),
            SplineError::TooFewKnots(0)
        );
    }

    #[test]
    fn low_tension_approaches_cubic_spline() {
        let knots = zigzag();
        let tension = TensionSpline::new(knots.clone(), 0.01, 1e-9).unwrap();
        let h = tension.chords()[0];
        let d0 = Vec2::new(1.0, 1.0).normalize();
        let d3 = Vec2::new(1.0, -1.0).normalize();
        let cubic = CubicSpline::new(
            knots,
            Boundary::Open {
                start: EndCondition::Clamped(d0 * h),
                end: EndCondition::Clamped(d3 * h),
            },
            1.0,
        )
        .unwrap();
        for i in 0..4 {
            for j in 0..=8 {
                let t = j as f64 / 8.0;
                let a = tension.eval(i, t * h).unwrap();
                let b = cubic.eval(i, t).unwrap();
                assert!(a.distance(b) < 1e-3, "segment {i} at {t}: {a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn high_tension_hugs_chords() {
        let spline = TensionSpline::new(zigzag(), 200.0, 1e-6).unwrap();
        for i in 0..spline.segment_count() {
            let seg = spline.segment(i).unwrap();
            let mid = seg.eval(0.5);
            assert!(mid.distance(seg.p0.midpoint(seg.p1)) < 0.05, "{mid:?}");
            assert_eq!(seg.start(), seg.p0);
            assert_eq!(seg.end(), seg.p1);
        }
    }
}
