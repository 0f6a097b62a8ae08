// Copyright 2026 the Arcspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc, ellipse and spline conversion to cubic Béziers.
//!
//! The arcspline library turns sparse geometric descriptions (circular and
//! elliptical arcs, ellipses, rounded rectangles, bulge arcs) into chained
//! cubic Bézier points, and fits smooth interpolating curves through ordered
//! point sequences. Everything works on plain [`Point`] and [`Vec2`] values
//! from [kurbo][]; nothing is retained between calls.
//!
//! # Examples
//!
//! Converting a half circle to Bézier points:
//!
//! ```
//! use arcspline::{Arc, Point};
//! use core::f64::consts::PI;
//!
//! let arc = Arc::new((0.0, 0.0), (1.0, 1.0), 0.0, PI);
//! let points = arc.to_cubic_points();
//! // Two quarter segments sharing their middle point.
//! assert_eq!(points.len(), 7);
//! assert!(points[0].distance(Point::new(1.0, 0.0)) < 1e-9);
//! assert!(points[6].distance(Point::new(-1.0, 0.0)) < 1e-9);
//! ```
//!
//! Fitting a spline through freehand samples:
//!
//! ```
//! use arcspline::{Boundary, CubicSpline, ParamCurve, Point};
//!
//! let knots = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 8.0),
//!     Point::new(20.0, 0.0),
//!     Point::new(30.0, 8.0),
//! ];
//! let spline = CubicSpline::new(knots, Boundary::FREE, 1.0).unwrap();
//! for cubic in spline.cubics() {
//!     assert!(cubic.eval(0.5).is_finite());
//! }
//! ```
//!
//! # Feature Flags
//!
//! - `std` (enabled by default): Get floating point functions from the standard library.
//! - `libm`: Use floating point implementations from [libm][] for `no_std` environments.
//! - `mint`: Forwarded to kurbo: `From`/`Into` conversion of [`Point`] and [`Vec2`] with [mint][] types.
//! - `serde`: Implement `serde::Deserialize` and `serde::Serialize` on the value types.
//! - `schemars`: Forwarded to kurbo: JSON schemas for [`Point`], [`Vec2`] and [`Rect`] using [schemars][].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//! The crate requires an allocator (it uses [alloc]) for the spline solvers.
//!
//! # Logging
//!
//! Failure paths and solver path selection are reported through the [log][]
//! facade at `debug` and `trace` level. No logger is installed by this crate.
//!
//! [kurbo]: https://docs.rs/kurbo
//! [libm]: https://docs.rs/libm
//! [mint]: https://docs.rs/mint
//! [schemars]: https://docs.rs/schemars
//! [log]: https://docs.rs/log

// LINEBENDER LINT SET - lib.rs - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision
)]
// The following lints are part of the Linebender standard set,
// but resolving them has been deferred for now.
#![allow(
    clippy::use_self,
    clippy::return_self_not_must_use,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::exhaustive_enums,
    clippy::unseparated_literal_suffix,
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason
)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("arcspline requires either the `std` or `libm` feature");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

extern crate alloc;

mod arc;
mod arc_fit;
pub mod common;
mod cubicbez;
mod cubicspline;
mod ellipse;
pub mod linear;
mod param_curve;
mod rounded_rect;
mod tensionspline;

pub use crate::arc::*;
pub use crate::arc_fit::*;
pub use crate::cubicbez::*;
pub use crate::cubicspline::*;
pub use crate::ellipse::*;
pub use crate::param_curve::*;
pub use crate::rounded_rect::*;
pub use crate::tensionspline::*;

pub use kurbo::{Point, Rect, Vec2};
