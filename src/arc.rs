// Copyright 2026 the Arcspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elliptical arcs, and their conversion to cubic Béziers.

use core::f64::consts::{FRAC_PI_2, PI, TAU};

use arrayvec::ArrayVec;

use crate::common::{is_zero, to_0_2pi, MIN_SWEEP};
use crate::{CubicBez, Ellipse, Point, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// The largest number of points [`Arc::to_cubic_points`] produces: five
/// chained segments.
pub const MAX_ARC_POINTS: usize = 16;

/// A single arc segment of an axis-aligned ellipse.
///
/// Angles are in radians and parametric: the point at angle `θ` is
/// `center + (rx cos θ, ry sin θ)`. A positive sweep runs from the positive
/// x axis toward the positive y axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    /// The arc's centre point.
    pub center: Point,
    /// The arc's radii, where the vector's x-component is the radius in the
    /// positive x direction.
    pub radii: Vec2,
    /// The start angle in radians.
    pub start_angle: f64,
    /// The angle between the start and end of the arc.
    pub sweep_angle: f64,
}

impl Arc {
    /// Create a new `Arc`.
    #[inline]
    pub fn new(
        center: impl Into<Point>,
        radii: impl Into<Vec2>,
        start_angle: f64,
        sweep_angle: f64,
    ) -> Arc {
        Arc {
            center: center.into(),
            radii: radii.into(),
            start_angle,
            sweep_angle,
        }
    }

    /// The point on the underlying ellipse at the given angle.
    #[inline]
    pub fn point_at(&self, angle: f64) -> Point {
        let (s, c) = angle.sin_cos();
        self.center + Vec2::new(self.radii.x * c, self.radii.y * s)
    }

    /// The start point of the arc.
    #[inline]
    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    /// The end point of the arc.
    #[inline]
    pub fn end_point(&self) -> Point {
        self.point_at(self.start_angle + self.sweep_angle)
    }

    /// Convert the arc to chained cubic Bézier points.
    ///
    /// The result holds `3k + 1` points for `k` segments; segment `i` is
    /// `points[3i..3i + 4]`. It is empty when the x radius or the sweep is
    /// too small to draw. A zero y radius is taken to be equal to the x
    /// radius, and the sweep is clamped to one full turn.
    ///
    /// Sweeps up to a quarter turn become one segment. Longer arcs are split
    /// at the quadrant boundaries so that whole quadrants reuse the exact
    /// points of [`Ellipse::to_cubic_points`].
    pub fn to_cubic_points(&self) -> ArrayVec<Point, MAX_ARC_POINTS> {
        let mut points = ArrayVec::new();
        let rx = self.radii.x;
        let mut ry = self.radii.y;
        let sweep = self.sweep_angle.clamp(-TAU, TAU);
        if is_zero(rx) || sweep.abs() < MIN_SWEEP || sweep.is_nan() {
            log::debug!("arc with radius {rx} and sweep {sweep} has no segments");
            return points;
        }
        if is_zero(ry) {
            ry = rx;
        }
        let radii = Vec2::new(rx, ry);

        if sweep.abs() < FRAC_PI_2 + MIN_SWEEP {
            chain(
                &mut points,
                small_arc(self.center, radii, self.start_angle, sweep),
            );
        } else if sweep > 0.0 {
            positive_sweep(
                &mut points,
                self.center,
                radii,
                to_0_2pi(self.start_angle),
                sweep,
            );
        } else {
            // Draw the mirror image from the end and walk it backwards.
            positive_sweep(
                &mut points,
                self.center,
                radii,
                to_0_2pi(self.start_angle + sweep),
                -sweep,
            );
            points.reverse();
        }
        points
    }

    /// The arc as a sequence of cubic Bézier segments.
    pub fn cubics(&self) -> impl Iterator<Item = CubicBez> {
        let points = self.to_cubic_points();
        let n = points.len().saturating_sub(1) / 3;
        (0..n).map(move |i| {
            CubicBez::new(
                points[3 * i],
                points[3 * i + 1],
                points[3 * i + 2],
                points[3 * i + 3],
            )
        })
    }
}

/// Append a segment, sharing its start with the current last point.
///
/// The incoming start point replaces the previous end point, so exact
/// quadrant points win over computed ones.
fn chain(points: &mut ArrayVec<Point, MAX_ARC_POINTS>, segment: [Point; 4]) {
    if points.is_empty() {
        points.extend(segment);
        return;
    }
    if points.remaining_capacity() < 3 {
        log::debug!("arc point buffer full, dropping segment");
        return;
    }
    let last = points.len() - 1;
    points[last] = segment[0];
    points.extend(segment[1..].iter().copied());
}

/// Decompose an arc with `0 <= start < 2π` and a positive sweep of more
/// than a quarter turn.
fn positive_sweep(
    points: &mut ArrayVec<Point, MAX_ARC_POINTS>,
    center: Point,
    radii: Vec2,
    start: f64,
    mut sweep: f64,
) {
    // The next quadrant boundary, and the ellipse quadrant that begins there.
    let (boundary, mut quadrant) = if start < FRAC_PI_2 {
        (FRAC_PI_2, 1)
    } else if start < PI {
        (PI, 2)
    } else if start < 3.0 * FRAC_PI_2 {
        (3.0 * FRAC_PI_2, 3)
    } else {
        (TAU, 0)
    };

    let lead = boundary - start;
    if lead > MIN_SWEEP {
        chain(points, small_arc(center, radii, start, lead));
    }
    sweep -= lead;

    let ellipse = Ellipse { center, radii }.to_cubic_points();
    let mut whole = 0;
    while sweep >= FRAC_PI_2 {
        let k = 3 * quadrant;
        chain(
            points,
            [ellipse[k], ellipse[k + 1], ellipse[k + 2], ellipse[k + 3]],
        );
        quadrant = (quadrant + 1) % 4;
        sweep -= FRAC_PI_2;
        whole += 1;
    }

    if sweep > MIN_SWEEP {
        let angle = quadrant as f64 * FRAC_PI_2;
        chain(points, small_arc(center, radii, angle, sweep));
    }
    log::trace!(
        "arc from {start:.6} split into {whole} quadrant(s), lead {lead:.6}, tail {sweep:.6}"
    );
}

/// One cubic for an arc of at most a quarter turn.
///
/// The segment is built for a circle of radius `rx` symmetric about the x
/// axis, rotated to the middle angle, then scaled along y by `ry / rx`.
fn small_arc(center: Point, radii: Vec2, start: f64, sweep: f64) -> [Point; 4] {
    let r = radii.x;
    let y_scale = radii.y / radii.x;
    let (sin_half, cos_half) = (0.5 * sweep).sin_cos();
    let b = r * sin_half;
    let c = r * cos_half;
    let x = 4.0 * (r - c) / 3.0;
    let y = b - x * c / b;

    let (s, co) = (start + 0.5 * sweep).sin_cos();
    let place = |px: f64, py: f64| {
        Point::new(
            center.x + px * co - py * s,
            center.y + (px * s + py * co) * y_scale,
        )
    };
    [place(c, -b), place(c + x, -y), place(c + x, y), place(c, b)]
}
