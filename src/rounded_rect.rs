// Copyright 2026 the Arcspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rectangle with rounded corners.

use crate::{CubicBez, Ellipse, Point, Rect, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A rectangle with elliptical corners.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundedRect {
    /// Coordinates of the rectangle.
    pub rect: Rect,
    /// Corner radii along x and y, shared by all four corners.
    pub radii: Vec2,
}

impl RoundedRect {
    /// A new rectangle from minimum and maximum coordinates.
    #[inline]
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64, radii: impl Into<Vec2>) -> RoundedRect {
        RoundedRect::from_rect(Rect::new(x0, y0, x1, y1), radii)
    }

    /// A new rounded rectangle from a [`Rect`].
    #[inline]
    pub fn from_rect(rect: Rect, radii: impl Into<Vec2>) -> RoundedRect {
        RoundedRect {
            rect,
            radii: radii.into(),
        }
    }

    /// The width of the rectangle.
    ///
    /// Note: nothing forbids negative width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.rect.width()
    }

    /// The height of the rectangle.
    ///
    /// Note: nothing forbids negative height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.rect.height()
    }

    /// The corner radii actually used.
    ///
    /// Each radius is made non-negative and limited to half the width or
    /// height.
    pub fn radii(&self) -> Vec2 {
        Vec2::new(
            self.radii.x.abs().min(0.5 * self.width().abs()),
            self.radii.y.abs().min(0.5 * self.height().abs()),
        )
    }

    /// The outline as four corner segments.
    ///
    /// Segment `i` is `points[4i..4i + 4]`. The corners follow the quadrants
    /// of [`Ellipse::to_cubic_points`]: `+x +y` first, then `-x +y`, `-x -y`
    /// and `+x -y`. Each segment ends on the edge the next one starts from;
    /// the straight sides between them are left to the caller.
    pub fn to_cubic_points(&self) -> [Point; 16] {
        let radii = self.radii();
        let ellipse = Ellipse::new(self.rect.center(), radii).to_cubic_points();
        let dx = 0.5 * self.width().abs() - radii.x;
        let dy = 0.5 * self.height().abs() - radii.y;
        let offsets = [
            Vec2::new(dx, dy),
            Vec2::new(-dx, dy),
            Vec2::new(-dx, -dy),
            Vec2::new(dx, -dy),
        ];
        let mut points = [Point::ZERO; 16];
        for (corner, offset) in offsets.into_iter().enumerate() {
            for j in 0..4 {
                points[4 * corner + j] = ellipse[3 * corner + j] + offset;
            }
        }
        points
    }

    /// The four corners as cubic Bézier segments.
    pub fn corners(&self) -> [CubicBez; 4] {
        let p = self.to_cubic_points();
        core::array::from_fn(|i| {
            CubicBez::from_points([p[4 * i], p[4 * i + 1], p[4 * i + 2], p[4 * i + 3]])
        })
    }
}
