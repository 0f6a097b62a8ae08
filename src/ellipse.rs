// Copyright 2026 the Arcspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned ellipses.

use crate::{CubicBez, Point, Vec2};

/// Handle length, relative to the radius, of a cubic approximating a
/// quarter circle: 4(√2 − 1)/3.
pub const QUARTER_ARC_HANDLE: f64 = 0.5522847498307933984022516;

/// An axis-aligned ellipse.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ellipse {
    /// The center.
    pub center: Point,
    /// The radius along the x axis (`x`) and the y axis (`y`).
    pub radii: Vec2,
}

impl Ellipse {
    /// A new ellipse from center and radii.
    #[inline]
    pub fn new(center: impl Into<Point>, radii: impl Into<Vec2>) -> Ellipse {
        Ellipse {
            center: center.into(),
            radii: radii.into(),
        }
    }

    /// The ellipse as 4 chained cubic segments.
    ///
    /// The points start at angle 0 (the positive x axis) and run
    /// counter-clockwise in a y-up frame. Point `3k` is on an axis and
    /// segment `k` is `points[3k..3k + 4]`; the last point repeats the first.
    ///
    /// ```text
    ///         4   3   2
    ///     5               1
    ///     6              0,12
    ///     7               11
    ///         8   9   10
    /// ```
    pub fn to_cubic_points(&self) -> [Point; 13] {
        let Point { x: cx, y: cy } = self.center;
        let Vec2 { x: rx, y: ry } = self.radii;
        let dx = rx * QUARTER_ARC_HANDLE;
        let dy = ry * QUARTER_ARC_HANDLE;
        [
            Point::new(cx + rx, cy),
            Point::new(cx + rx, cy + dy),
            Point::new(cx + dx, cy + ry),
            Point::new(cx, cy + ry),
            Point::new(cx - dx, cy + ry),
            Point::new(cx - rx, cy + dy),
            Point::new(cx - rx, cy),
            Point::new(cx - rx, cy - dy),
            Point::new(cx - dx, cy - ry),
            Point::new(cx, cy - ry),
            Point::new(cx + dx, cy - ry),
            Point::new(cx + rx, cy - dy),
            Point::new(cx + rx, cy),
        ]
    }

    /// One quadrant of [`to_cubic_points`](Ellipse::to_cubic_points).
    ///
    /// Quadrant 0 runs from angle 0 to π/2, quadrant 1 from π/2 to π and so
    /// on. The index is taken modulo 4.
    pub fn quadrant(&self, quadrant: usize) -> CubicBez {
        let points = self.to_cubic_points();
        let k = 3 * (quadrant % 4);
        CubicBez::new(points[k], points[k + 1], points[k + 2], points[k + 3])
    }

    /// A quarter ellipse from `from` to `to`.
    ///
    /// The ellipse is centered at `(to.x, from.y)`, so `from` lies on its
    /// horizontal axis and `to` on its vertical axis. Radii are signed: the
    /// quarter can face any of the four directions.
    pub fn quadrant_to_cubic(from: Point, to: Point) -> CubicBez {
        let rx = from.x - to.x;
        let ry = to.y - from.y;
        let center = Point::new(to.x, from.y);
        let dx = rx * QUARTER_ARC_HANDLE;
        let dy = ry * QUARTER_ARC_HANDLE;
        CubicBez {
            p0: from,
            p1: Point::new(center.x + rx, center.y + dy),
            p2: Point::new(center.x + dx, center.y + ry),
            p3: to,
        }
    }
}
