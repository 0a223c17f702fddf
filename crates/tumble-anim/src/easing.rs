//! Easing curves for timed interpolation.
//!
//! Every curve maps normalized time `t` in `[0, 1]` to normalized progress,
//! with `evaluate(0) == 0` and `evaluate(1) == 1`. Curves may leave `[0, 1]`
//! in between (a bezier with y control points outside the unit range
//! overshoots).

use serde::{Deserialize, Serialize};

use crate::error::{AnimError, AnimResult};

/// Control points of the standard "ease" curve used as an accelerating curve.
const EASE_IN: (f64, f64, f64, f64) = (0.42, 0.0, 1.0, 1.0);
const EASE_OUT: (f64, f64, f64, f64) = (0.0, 0.0, 0.58, 1.0);
const EASE_IN_OUT: (f64, f64, f64, f64) = (0.42, 0.0, 0.58, 1.0);

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_MIN_SLOPE: f64 = 1e-3;
const BISECTION_PRECISION: f64 = 1e-7;
const BISECTION_MAX_ITERATIONS: usize = 32;

/// A timing curve.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Quadratic acceleration.
    QuadIn,
    /// Quadratic deceleration.
    QuadOut,
    /// Cubic acceleration.
    CubicIn,
    /// Cubic deceleration.
    CubicOut,
    /// Cubic acceleration then deceleration.
    CubicInOut,
    /// Accelerating "ease" curve, cubic-bezier(0.42, 0, 1, 1).
    EaseIn,
    /// Decelerating "ease" curve, cubic-bezier(0, 0, 0.58, 1).
    EaseOut,
    /// Symmetric "ease" curve, cubic-bezier(0.42, 0, 0.58, 1).
    EaseInOut,
    /// Custom cubic bezier with control points `(x1, y1)` and `(x2, y2)`.
    Bezier(f64, f64, f64, f64),
}

impl Easing {
    /// Evaluate the curve at normalized time `t`. `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match *self {
            Self::Linear => t,
            Self::QuadIn => t * t,
            Self::QuadOut => t * (2.0 - t),
            Self::CubicIn => t * t * t,
            Self::CubicOut => {
                let t1 = 1.0 - t;
                1.0 - t1 * t1 * t1
            }
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let t1 = -2.0 * t + 2.0;
                    1.0 - t1 * t1 * t1 / 2.0
                }
            }
            Self::EaseIn => bezier(t, EASE_IN),
            Self::EaseOut => bezier(t, EASE_OUT),
            Self::EaseInOut => bezier(t, EASE_IN_OUT),
            Self::Bezier(x1, y1, x2, y2) => bezier(t, (x1, y1, x2, y2)),
        }
    }

    /// Check that the curve is well formed.
    ///
    /// Bezier x control points must lie in `[0, 1]` so that time stays monotonic.
    pub fn validate(&self) -> AnimResult<()> {
        if let Self::Bezier(x1, y1, x2, y2) = *self {
            if [x1, y1, x2, y2].iter().any(|v| !v.is_finite()) {
                return Err(AnimError::InvalidInterpolation(
                    "bezier control points must be finite".into(),
                ));
            }
            if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                return Err(AnimError::InvalidInterpolation(format!(
                    "bezier x control points must be within [0, 1], got {x1} and {x2}"
                )));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Easing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::QuadIn => write!(f, "quad-in"),
            Self::QuadOut => write!(f, "quad-out"),
            Self::CubicIn => write!(f, "cubic-in"),
            Self::CubicOut => write!(f, "cubic-out"),
            Self::CubicInOut => write!(f, "cubic-in-out"),
            Self::EaseIn => write!(f, "ease-in"),
            Self::EaseOut => write!(f, "ease-out"),
            Self::EaseInOut => write!(f, "ease-in-out"),
            Self::Bezier(x1, y1, x2, y2) => write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})"),
        }
    }
}

/// Polynomial coefficients of one bezier axis with endpoints 0 and 1.
fn coefficients(p1: f64, p2: f64) -> (f64, f64, f64) {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    (a, b, c)
}

fn sample((a, b, c): (f64, f64, f64), s: f64) -> f64 {
    ((a * s + b) * s + c) * s
}

fn slope((a, b, c): (f64, f64, f64), s: f64) -> f64 {
    (3.0 * a * s + 2.0 * b) * s + c
}

/// Evaluate a unit cubic bezier: find the curve parameter whose x equals `t`,
/// then return the y at that parameter.
fn bezier(t: f64, (x1, y1, x2, y2): (f64, f64, f64, f64)) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    if x1 == y1 && x2 == y2 {
        return t;
    }

    let xc = coefficients(x1, x2);
    let yc = coefficients(y1, y2);
    sample(yc, solve_for_x(xc, t))
}

fn solve_for_x(xc: (f64, f64, f64), x: f64) -> f64 {
    let mut s = x;
    for _ in 0..NEWTON_ITERATIONS {
        let d = slope(xc, s);
        if d.abs() < NEWTON_MIN_SLOPE {
            break;
        }
        let err = sample(xc, s) - x;
        if err.abs() < BISECTION_PRECISION {
            return s;
        }
        s -= err / d;
    }

    // Newton stalled on a flat stretch; bisect instead.
    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..BISECTION_MAX_ITERATIONS {
        let value = sample(xc, s);
        if (value - x).abs() < BISECTION_PRECISION {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}
