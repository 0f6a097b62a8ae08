// Copyright 2026 the Arcspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interpolating cubic splines.
//!
//! A [`CubicSpline`] passes through every knot and is described by one
//! tangent per knot. Each pair of consecutive knots, together with their
//! tangents, forms a cubic Hermite segment on the parameter range `[0, 1]`.
//! The tangents are found by solving the C² continuity conditions: a
//! tridiagonal system for open curves, or a cyclic one for closed curves.

use alloc::vec::Vec;

use crate::common::ZERO_EPSILON;
use crate::linear::{DenseMatrix, SolveError, Tridiagonal};
use crate::{CubicBez, ParamCurve, Point, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// The largest closed spline [`CubicSpline::new`] accepts.
///
/// Closed splines are solved with a dense `n × n` system.
pub const MAX_CLOSED_KNOTS: usize = 512;

/// An error fitting a spline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SplineError {
    /// Fewer than two knots were given (after duplicate removal, where it applies).
    #[error("a spline needs at least 2 knots, got {0}")]
    TooFewKnots(usize),
    /// A closed spline has more knots than the dense solver accepts.
    #[error("closed spline has {count} knots, at most {max} are supported")]
    TooManyKnots {
        /// Number of knots given.
        count: usize,
        /// The limit, [`MAX_CLOSED_KNOTS`].
        max: usize,
    },
    /// Scratch storage could not be allocated.
    #[error("could not allocate scratch space for {0} knots")]
    Alloc(usize),
    /// The linear system for the spline could not be solved.
    #[error("spline system could not be solved: {0}")]
    Solve(#[from] SolveError),
}

/// How an open spline behaves at one of its ends.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndCondition {
    /// Zero curvature at the end (a natural spline).
    Free,
    /// The end tangent is tied to the first (or last) chord: `v0 + v1 = 2 (k1 - k0)`.
    Cantilever,
    /// The end tangent is given.
    Clamped(Vec2),
}

/// The boundary conditions of a [`CubicSpline`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Boundary {
    /// An open curve from the first knot to the last.
    Open {
        /// Condition at the first knot.
        start: EndCondition,
        /// Condition at the last knot.
        end: EndCondition,
    },
    /// A closed curve; the last knot is joined back to the first.
    Closed,
}

impl Boundary {
    /// A natural spline, free at both ends.
    pub const FREE: Boundary = Boundary::Open {
        start: EndCondition::Free,
        end: EndCondition::Free,
    };

    /// An open spline with both end tangents given.
    #[inline]
    pub fn clamped(start: Vec2, end: Vec2) -> Boundary {
        Boundary::Open {
            start: EndCondition::Clamped(start),
            end: EndCondition::Clamped(end),
        }
    }
}

/// A cubic spline through a sequence of knots.
#[derive(Clone, Debug)]
pub struct CubicSpline {
    knots: Vec<Point>,
    tangents: Vec<Vec2>,
    closed: bool,
}

impl CubicSpline {
    /// Fit a spline through `knots`.
    ///
    /// A `tension` other than 1 scales every tangent: values below 1 pull the
    /// curve toward the control polygon, values above 1 make it rounder.
    ///
    /// Closed splines are periodic over the knots, so the first knot should
    /// not be repeated at the end.
    pub fn new(
        knots: Vec<Point>,
        boundary: Boundary,
        tension: f64,
    ) -> Result<CubicSpline, SplineError> {
        let n = knots.len();
        if n < 2 {
            log::debug!("cubic spline with {n} knots");
            return Err(SplineError::TooFewKnots(n));
        }
        let (mut tangents, closed) = match boundary {
            Boundary::Open { start, end } => (open_tangents(&knots, start, end)?, false),
            Boundary::Closed => (closed_tangents(&knots)?, true),
        };
        if (tension - 1.0).abs() > ZERO_EPSILON {
            for v in &mut tangents {
                *v *= tension;
            }
        }
        Ok(CubicSpline {
            knots,
            tangents,
            closed,
        })
    }

    /// The knots the spline passes through.
    #[inline]
    pub fn knots(&self) -> &[Point] {
        &self.knots
    }

    /// The tangent at each knot, with respect to the segment parameter.
    #[inline]
    pub fn tangents(&self) -> &[Vec2] {
        &self.tangents
    }

    /// Whether the spline was fitted as a closed curve.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The number of segments: one per knot when closed, one fewer when open.
    #[inline]
    pub fn segment_count(&self) -> usize {
        if self.closed {
            self.knots.len()
        } else {
            self.knots.len() - 1
        }
    }

    /// The segment starting at knot `i`.
    ///
    /// For closed splines the index wraps around; for open splines an index
    /// past the last segment returns `None`.
    pub fn segment(&self, i: usize) -> Option<HermiteSegment> {
        let n = self.knots.len();
        let (i, j) = if self.closed {
            let i = i % n;
            (i, (i + 1) % n)
        } else if i + 1 < n {
            (i, i + 1)
        } else {
            return None;
        };
        Some(HermiteSegment {
            p0: self.knots[i],
            p1: self.knots[j],
            v0: self.tangents[i],
            v1: self.tangents[j],
        })
    }

    /// Evaluate segment `i` at parameter `t`.
    #[inline]
    pub fn eval(&self, i: usize, t: f64) -> Option<Point> {
        self.segment(i).map(|seg| seg.eval(t))
    }

    /// The spline as a sequence of cubic Bézier segments.
    pub fn cubics(&self) -> impl Iterator<Item = CubicBez> + '_ {
        (0..self.segment_count())
            .filter_map(|i| self.segment(i))
            .map(|seg| seg.to_cubic())
    }
}

fn open_tangents(
    knots: &[Point],
    start: EndCondition,
    end: EndCondition,
) -> Result<Vec<Vec2>, SplineError> {
    let n = knots.len();
    log::trace!("open cubic spline: banded solve over {n} knots");
    let mut system = Tridiagonal::new(n)?;
    let mut rhs = scratch(n)?;

    let first = knots[1] - knots[0];
    let (diag, sup, v) = match start {
        EndCondition::Clamped(v) => (1.0, 0.0, v),
        EndCondition::Cantilever => (1.0, 1.0, 2.0 * first),
        EndCondition::Free => (1.0, 0.5, 1.5 * first),
    };
    system.set_row(0, 0.0, diag, sup);
    rhs.push(v);

    for i in 1..n - 1 {
        system.set_row(i, 1.0, 4.0, 1.0);
        rhs.push(3.0 * (knots[i + 1] - knots[i - 1]));
    }

    let last = knots[n - 1] - knots[n - 2];
    let (sub, diag, v) = match end {
        EndCondition::Clamped(v) => (0.0, 1.0, v),
        EndCondition::Cantilever => (1.0, 1.0, 2.0 * last),
        EndCondition::Free => (0.5, 1.0, 1.5 * last),
    };
    system.set_row(n - 1, sub, diag, 0.0);
    rhs.push(v);

    system.solve(&mut rhs)?;
    Ok(rhs)
}

fn closed_tangents(knots: &[Point]) -> Result<Vec<Vec2>, SplineError> {
    let n = knots.len();
    if n > MAX_CLOSED_KNOTS {
        log::debug!("closed cubic spline with {n} knots exceeds {MAX_CLOSED_KNOTS}");
        return Err(SplineError::TooManyKnots {
            count: n,
            max: MAX_CLOSED_KNOTS,
        });
    }
    log::trace!("closed cubic spline: dense solve over {n} knots");
    let mut system = DenseMatrix::new(n)?;
    let mut rhs = scratch(n)?;
    for i in 0..n {
        let prev = (i + n - 1) % n;
        let next = (i + 1) % n;
        // With two knots the neighbors coincide; assign rather than accumulate.
        system[(i, prev)] = 1.0;
        system[(i, next)] = 1.0;
        system[(i, i)] = 4.0;
        rhs.push(3.0 * (knots[next] - knots[prev]));
    }
    system.solve(&mut rhs)?;
    Ok(rhs)
}

/// An empty vector with room for `n` elements.
pub(crate) fn scratch<T>(n: usize) -> Result<Vec<T>, SplineError> {
    let mut v = Vec::new();
    v.try_reserve_exact(n).map_err(|_| SplineError::Alloc(n))?;
    Ok(v)
}

/// A cubic Hermite segment: end points and the tangents there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HermiteSegment {
    /// The start point.
    pub p0: Point,
    /// The end point.
    pub p1: Point,
    /// The tangent at the start.
    pub v0: Vec2,
    /// The tangent at the end.
    pub v1: Vec2,
}

impl HermiteSegment {
    /// The same curve as a cubic Bézier.
    #[inline]
    pub fn to_cubic(&self) -> CubicBez {
        CubicBez {
            p0: self.p0,
            p1: self.p0 + self.v0 * (1.0 / 3.0),
            p2: self.p1 - self.v1 * (1.0 / 3.0),
            p3: self.p1,
        }
    }
}

impl ParamCurve for HermiteSegment {
    fn eval(&self, t: f64) -> Point {
        let chord = self.p1 - self.p0;
        let b2 = 3.0 * chord - 2.0 * self.v0 - self.v1;
        let b3 = -2.0 * chord + self.v0 + self.v1;
        self.p0 + (self.v0 + (b2 + b3 * t) * t) * t
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
