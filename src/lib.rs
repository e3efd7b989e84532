#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time fractal evaluator
//!
//! An escape-time fractal colors each sample point of the complex
//! plane by how many iterations of the quadratic map `z = z*z + c`
//! are needed before the point's orbit leaves the disc of radius 2.
//! Once an orbit's magnitude exceeds 2 it is guaranteed to diverge,
//! so the iteration index at which that happens (the "escape
//! iteration") is a finite classification of every point, and the
//! resulting 2D integer field is what a renderer turns into the
//! familiar fractal imagery.
//!
//! The evaluator samples a rectangular region of the plane at a
//! caller-chosen density and produces that field.  Points whose
//! orbits never leave the disc within the iteration budget hold a
//! sentinel value instead, so a consumer can tell "escaped at
//! iteration zero" apart from "never escaped at all".
//!
//! Two constant modes are supported: Mandelbrot, where every point is
//! its own constant and the orbit starts at zero, and Julia, where a
//! single fixed constant is shared by every point and the orbit
//! starts at the point itself.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
extern crate num;

pub mod error;
pub mod evaluate;
pub mod grid;
pub mod render;

pub use error::EvalError;
pub use evaluate::{evaluate, evaluate_threaded, ConstantMode, EscapeField};
pub use grid::{Region, SampleGrid};
