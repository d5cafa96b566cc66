// ABOUTME: Pure geometric kernel over normalized 2D landmark positions
// ABOUTME: Vertex-centered angles, Euclidean distance, and midpoints with degeneracy guards

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kinema Motion Intelligence

//! # Geometric Kernel
//!
//! Pure, deterministic functions over landmark positions.
//!
//! Numeric edge cases are neutralized at the source: the acos argument is
//! clamped to `[-1, 1]` and a small epsilon keeps the denominator away
//! from zero, so degenerate input (coincident points) yields a finite
//! angle instead of NaN.

use crate::landmarks::Landmark;

/// Guard against division by zero for degenerate (coincident) landmarks.
const MAGNITUDE_EPSILON: f64 = 1e-6;

/// Angle at vertex `b` between rays `b -> a` and `b -> c`, in degrees.
///
/// Range is `[0, 180]`. Symmetric in `a` and `c`. Coincident points
/// produce a finite value rather than NaN.
#[must_use]
pub fn angle(a: &Landmark, b: &Landmark, c: &Landmark) -> f64 {
    let (bax, bay) = (a.x - b.x, a.y - b.y);
    let (bcx, bcy) = (c.x - b.x, c.y - b.y);

    let dot = bax.mul_add(bcx, bay * bcy);
    let mag_ba = bax.hypot(bay);
    let mag_bc = bcx.hypot(bcy);

    let cos = (dot / (mag_ba * mag_bc + MAGNITUDE_EPSILON)).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Euclidean distance between two landmarks in normalized space.
#[must_use]
pub fn distance(a: &Landmark, b: &Landmark) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Arithmetic midpoint of two landmarks.
///
/// The result carries no visibility; it is a derived point, not an
/// estimator output.
#[must_use]
pub fn midpoint(a: &Landmark, b: &Landmark) -> Landmark {
    Landmark::new(f64::midpoint(a.x, b.x), f64::midpoint(a.y, b.y))
}
