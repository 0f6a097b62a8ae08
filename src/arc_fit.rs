// Copyright 2026 the Arcspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fitting circular arcs to points, tangents and bulge factors.

use core::f64::consts::TAU;

use crate::common::{to_0_2pi, to_pi_pi, ZERO_EPSILON};
use crate::{Arc, Point, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// An error fitting a circular arc.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArcFitError {
    /// The points are collinear (or coincide), so no circle passes through them.
    #[error("points are collinear")]
    Collinear,
    /// The tangent is parallel to the chord, so no circle touches it.
    #[error("tangent is parallel to the chord")]
    Degenerate,
}

impl Arc {
    /// The circular arc that starts at `start`, passes through `through` and
    /// ends at `end`.
    ///
    /// Angles of the three points about the center are measured in `(-π, π]`,
    /// so a point on the negative x axis of the circle always has angle `π`.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcspline::{Arc, Point};
    /// use core::f64::consts::PI;
    ///
    /// let arc = Arc::from_three_points((0.0, 0.0).into(), (1.0, 1.0).into(), (2.0, 0.0).into())
    ///     .unwrap();
    /// assert!(arc.center.distance(Point::new(1.0, 0.0)) < 1e-12);
    /// assert!((arc.start_angle - PI).abs() < 1e-12);
    /// // Clockwise over the top.
    /// assert!((arc.sweep_angle + PI).abs() < 1e-12);
    /// ```
    pub fn from_three_points(start: Point, through: Point, end: Point) -> Result<Arc, ArcFitError> {
        let center = line_crossing(
            start.midpoint(end),
            (end - start).turn_90(),
            through.midpoint(end),
            (end - through).turn_90(),
        )
        .ok_or_else(|| {
            log::debug!("no arc through collinear points {start}, {through}, {end}");
            ArcFitError::Collinear
        })?;
        let radius = start.distance(center);

        let a = to_pi_pi((start - center).atan2());
        let b = to_pi_pi((through - center).atan2());
        let c = to_pi_pi((end - center).atan2());
        let sweep = if a < c {
            if a < b && b < c {
                c - a
            } else {
                c - a - TAU
            }
        } else if a > b && b > c {
            c - a
        } else {
            TAU - (a - c)
        };
        Ok(Arc::new(center, (radius, radius), a, sweep))
    }

    /// The circular arc from `start` to `end` whose direction at `start` is
    /// `tangent`.
    pub fn from_tangent(start: Point, end: Point, tangent: Vec2) -> Result<Arc, ArcFitError> {
        let center = line_crossing(
            start.midpoint(end),
            (end - start).turn_90(),
            start,
            tangent.turn_90(),
        )
        .ok_or_else(|| {
            log::debug!("tangent {tangent} is parallel to the chord from {start} to {end}");
            ArcFitError::Degenerate
        })?;
        let radius = start.distance(center);

        let start_angle = (start - center).atan2();
        let end_angle = (end - center).atan2();
        let sweep = if tangent.cross(start - center) > 0.0 {
            -to_0_2pi(start_angle - end_angle)
        } else {
            to_0_2pi(end_angle - start_angle)
        };
        Ok(Arc::new(center, (radius, radius), start_angle, sweep))
    }

    /// The circular arc from `start` to `end` with the given bulge factor.
    ///
    /// The bulge is the ratio of the arc's height above the chord to half the
    /// chord length, or equivalently `tan(sweep / 4)`. Positive values bulge
    /// to the right of the chord, giving a counter-clockwise arc; `1.0` is a
    /// half circle. A zero bulge is a straight line and fails with
    /// [`ArcFitError::Collinear`].
    pub fn from_bulge(start: Point, end: Point, bulge: f64) -> Result<Arc, ArcFitError> {
        let chord = end - start;
        let right = Vec2::new(chord.y, -chord.x);
        let through = start.midpoint(end) + right * (0.5 * bulge);
        Arc::from_three_points(start, through, end)
    }
}

/// The crossing of the lines `p + s u` and `q + t w`.
///
/// Lines that are parallel to within a relative tolerance, or that have a
/// zero direction, do not cross.
fn line_crossing(p: Point, u: Vec2, q: Point, w: Vec2) -> Option<Point> {
    let denom = u.cross(w);
    if denom.abs() <= ZERO_EPSILON * u.hypot() * w.hypot() {
        return None;
    }
    let h = u.cross(p - q) / denom;
    Some(q + w * h)
}
