//! Value-to-value mapping for deriving display properties from progress.

use serde::{Deserialize, Serialize};

use crate::error::{AnimError, AnimResult};

/// What to do with inputs outside the input range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Continue the slope of the nearest segment.
    #[default]
    Extend,
    /// Pin to the nearest output endpoint.
    Clamp,
    /// Return the input unchanged.
    Identity,
}

/// Piecewise-linear mapping from an increasing input range to an output range.
///
/// ```
/// use tumble_anim::Interpolation;
///
/// let spin = Interpolation::new(vec![0.0, 1.0], vec![0.0, 720.0]).unwrap();
/// assert_eq!(spin.map(0.5), 360.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    input: Vec<f64>,
    output: Vec<f64>,
    extrapolate_left: Extrapolate,
    extrapolate_right: Extrapolate,
}

impl Interpolation {
    /// Build an interpolation. Ranges must have equal length of at least two,
    /// be finite, and the input range must be non-decreasing.
    pub fn new(input: Vec<f64>, output: Vec<f64>) -> AnimResult<Self> {
        if input.len() < 2 {
            return Err(AnimError::InvalidInterpolation(
                "input range needs at least two points".into(),
            ));
        }
        if input.len() != output.len() {
            return Err(AnimError::InvalidInterpolation(format!(
                "input range has {} points but output range has {}",
                input.len(),
                output.len()
            )));
        }
        if input.iter().chain(output.iter()).any(|v| !v.is_finite()) {
            return Err(AnimError::InvalidInterpolation(
                "ranges must be finite".into(),
            ));
        }
        if input.windows(2).any(|w| w[1] < w[0]) {
            return Err(AnimError::InvalidInterpolation(
                "input range must be non-decreasing".into(),
            ));
        }
        Ok(Self {
            input,
            output,
            extrapolate_left: Extrapolate::Extend,
            extrapolate_right: Extrapolate::Extend,
        })
    }

    /// Use the same extrapolation on both sides.
    pub fn extrapolate(mut self, mode: Extrapolate) -> Self {
        self.extrapolate_left = mode;
        self.extrapolate_right = mode;
        self
    }

    /// Set extrapolation below the input range.
    pub fn extrapolate_left(mut self, mode: Extrapolate) -> Self {
        self.extrapolate_left = mode;
        self
    }

    /// Set extrapolation above the input range.
    pub fn extrapolate_right(mut self, mode: Extrapolate) -> Self {
        self.extrapolate_right = mode;
        self
    }

    /// Map an input value to the output range.
    pub fn map(&self, x: f64) -> f64 {
        let last = self.input.len() - 1;
        // Pick the segment containing x, or the outermost one.
        let segment = self
            .input
            .windows(2)
            .position(|w| x < w[1])
            .unwrap_or(last - 1);

        let (in_lo, in_hi) = (self.input[segment], self.input[segment + 1]);
        let (out_lo, out_hi) = (self.output[segment], self.output[segment + 1]);

        if x < in_lo {
            match self.extrapolate_left {
                Extrapolate::Clamp => return out_lo,
                Extrapolate::Identity => return x,
                Extrapolate::Extend => {}
            }
        }
        if x > in_hi {
            match self.extrapolate_right {
                Extrapolate::Clamp => return out_hi,
                Extrapolate::Identity => return x,
                Extrapolate::Extend => {}
            }
        }

        if in_hi == in_lo {
            return if x <= in_lo { out_lo } else { out_hi };
        }
        out_lo + (x - in_lo) / (in_hi - in_lo) * (out_hi - out_lo)
    }
}
