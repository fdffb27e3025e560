//! Quadratic and cubic Bézier evaluation and sampling

use std::ops::{Add, Mul};

use crate::error::{ForgeError, ForgeResult, ensure_at_least};

/// A point type Bézier curves can be evaluated over (`Vec2`, `Vec3`, ...)
pub trait CurvePoint: Copy + Add<Output = Self> + Mul<f32, Output = Self> {}

impl<T> CurvePoint for T where T: Copy + Add<Output = T> + Mul<f32, Output = T> {}

fn check_parameter(t: f32) -> ForgeResult<()> {
    if (0.0..=1.0).contains(&t) {
        Ok(())
    } else {
        Err(ForgeError::invalid_parameter(format!(
            "curve parameter t must be within [0, 1], got {t}"
        )))
    }
}

#[inline]
fn quadratic_at<P: CurvePoint>(t: f32, p0: P, p1: P, p2: P) -> P {
    let mt = 1.0 - t;
    p0 * (mt * mt) + p1 * (2.0 * mt * t) + p2 * (t * t)
}

#[inline]
fn cubic_at<P: CurvePoint>(t: f32, p0: P, p1: P, p2: P, p3: P) -> P {
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let t2 = t * t;
    p0 * (mt2 * mt) + p1 * (3.0 * mt2 * t) + p2 * (3.0 * mt * t2) + p3 * (t2 * t)
}

/// Evaluate a quadratic Bézier curve at `t ∈ [0, 1]`
pub fn quadratic_bezier<P: CurvePoint>(t: f32, p0: P, p1: P, p2: P) -> ForgeResult<P> {
    check_parameter(t)?;
    Ok(quadratic_at(t, p0, p1, p2))
}

/// Evaluate a cubic Bézier curve at `t ∈ [0, 1]`
pub fn cubic_bezier<P: CurvePoint>(t: f32, p0: P, p1: P, p2: P, p3: P) -> ForgeResult<P> {
    check_parameter(t)?;
    Ok(cubic_at(t, p0, p1, p2, p3))
}

/// Parameters `i / (count - 1)` for `i in 0..count`, so both end points are hit exactly
fn sample_parameters(count: u32) -> ForgeResult<impl Iterator<Item = f32>> {
    ensure_at_least("curve sample count", count, 2)?;
    let last = (count - 1) as f32;
    Ok((0..count).map(move |i| i as f32 / last))
}

/// Sample `count` evenly spaced points along a quadratic Bézier curve
pub fn sample_quadratic<P: CurvePoint>(p0: P, p1: P, p2: P, count: u32) -> ForgeResult<Vec<P>> {
    Ok(sample_parameters(count)?
        .map(|t| quadratic_at(t, p0, p1, p2))
        .collect())
}

/// Sample `count` evenly spaced points along a cubic Bézier curve
pub fn sample_cubic<P: CurvePoint>(
    p0: P,
    p1: P,
    p2: P,
    p3: P,
    count: u32,
) -> ForgeResult<Vec<P>> {
    Ok(sample_parameters(count)?
        .map(|t| cubic_at(t, p0, p1, p2, p3))
        .collect())
}
