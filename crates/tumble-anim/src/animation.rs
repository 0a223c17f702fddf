//! Declarative animation descriptions and their frame-by-frame runners.

use std::collections::VecDeque;

use crate::driver::ValueId;
use crate::easing::Easing;
use crate::error::{AnimError, AnimResult};
use crate::spring::{SpringConfig, SpringMotion};

/// Slack for comparing accumulated frame times against durations.
pub(crate) const TIME_EPSILON_MS: f64 = 1e-6;

/// A description of how one or more animated values should move.
///
/// Leaf animations start from whatever the value holds at the moment they
/// begin, so the second phase of a sequence continues where the first ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Animation {
    /// Interpolate `value` to `to` over `duration_ms` along `easing`.
    Timing {
        /// The value being animated.
        value: ValueId,
        /// Target value.
        to: f64,
        /// Duration in milliseconds.
        duration_ms: f64,
        /// Timing curve.
        easing: Easing,
    },
    /// Move `value` to `to` with spring physics.
    Spring {
        /// The value being animated.
        value: ValueId,
        /// Target value.
        to: f64,
        /// Spring parameters.
        config: SpringConfig,
    },
    /// Wait without touching any value.
    Delay(f64),
    /// Run children one after another.
    Sequence(Vec<Animation>),
    /// Run children together; finishes when the slowest child finishes.
    Parallel(Vec<Animation>),
}

impl Animation {
    /// A timed interpolation.
    pub fn timing(value: ValueId, to: f64, duration_ms: f64, easing: Easing) -> Self {
        Self::Timing {
            value,
            to,
            duration_ms,
            easing,
        }
    }

    /// A spring interpolation.
    pub fn spring(value: ValueId, to: f64, config: SpringConfig) -> Self {
        Self::Spring { value, to, config }
    }

    /// A pause.
    pub fn delay(duration_ms: f64) -> Self {
        Self::Delay(duration_ms)
    }

    /// Sequential composition.
    pub fn sequence(children: Vec<Animation>) -> Self {
        Self::Sequence(children)
    }

    /// Parallel composition with a join on the slowest child.
    pub fn parallel(children: Vec<Animation>) -> Self {
        Self::Parallel(children)
    }

    /// Every value this animation drives, without duplicates.
    pub fn values(&self) -> Vec<ValueId> {
        let mut out = Vec::new();
        self.collect_values(&mut out);
        out
    }

    fn collect_values(&self, out: &mut Vec<ValueId>) {
        match self {
            Self::Timing { value, .. } | Self::Spring { value, .. } => {
                if !out.contains(value) {
                    out.push(*value);
                }
            }
            Self::Delay(_) => {}
            Self::Sequence(children) | Self::Parallel(children) => {
                for child in children {
                    child.collect_values(out);
                }
            }
        }
    }

    /// Check durations, springs, curves and targets.
    pub fn validate(&self) -> AnimResult<()> {
        match self {
            Self::Timing {
                to,
                duration_ms,
                easing,
                ..
            } => {
                check_duration(*duration_ms)?;
                check_target(*to)?;
                easing.validate()
            }
            Self::Spring { to, config, .. } => {
                check_target(*to)?;
                config.validate()
            }
            Self::Delay(duration_ms) => check_duration(*duration_ms),
            Self::Sequence(children) | Self::Parallel(children) => {
                children.iter().try_for_each(Animation::validate)
            }
        }
    }
}

fn check_duration(duration_ms: f64) -> AnimResult<()> {
    if duration_ms.is_finite() && duration_ms >= 0.0 {
        Ok(())
    } else {
        Err(AnimError::InvalidDuration(duration_ms))
    }
}

fn check_target(to: f64) -> AnimResult<()> {
    if to.is_finite() {
        Ok(())
    } else {
        Err(AnimError::InvalidInterpolation(format!(
            "target must be finite, got {to}"
        )))
    }
}

/// Outcome of stepping a runner by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Step {
    Running,
    /// Finished; `leftover_ms` of the frame was not needed.
    Done { leftover_ms: f64 },
}

/// Mutable playback state of an [`Animation`].
#[derive(Debug)]
pub(crate) enum Runner {
    Timing {
        value: ValueId,
        to: f64,
        duration_ms: f64,
        easing: Easing,
        from: Option<f64>,
        elapsed_ms: f64,
    },
    Spring {
        value: ValueId,
        to: f64,
        config: SpringConfig,
        motion: Option<SpringMotion>,
        elapsed_ms: f64,
    },
    Delay {
        remaining_ms: f64,
    },
    Sequence {
        pending: VecDeque<Animation>,
        current: Option<Box<Runner>>,
    },
    Parallel {
        children: Vec<Runner>,
    },
}

impl From<Animation> for Runner {
    fn from(animation: Animation) -> Self {
        match animation {
            Animation::Timing {
                value,
                to,
                duration_ms,
                easing,
            } => Self::Timing {
                value,
                to,
                duration_ms,
                easing,
                from: None,
                elapsed_ms: 0.0,
            },
            Animation::Spring { value, to, config } => Self::Spring {
                value,
                to,
                config,
                motion: None,
                elapsed_ms: 0.0,
            },
            Animation::Delay(duration_ms) => Self::Delay {
                remaining_ms: duration_ms,
            },
            Animation::Sequence(children) => Self::Sequence {
                pending: children.into(),
                current: None,
            },
            Animation::Parallel(children) => Self::Parallel {
                children: children.into_iter().map(Runner::from).collect(),
            },
        }
    }
}

impl Runner {
    /// Advance by `dt_ms`, writing into `values`.
    pub(crate) fn step(&mut self, values: &mut [f64], dt_ms: f64) -> Step {
        match self {
            Self::Timing {
                value,
                to,
                duration_ms,
                easing,
                from,
                elapsed_ms,
            } => {
                let slot = &mut values[value.index()];
                let start = *from.get_or_insert(*slot);
                *elapsed_ms += dt_ms;
                if *elapsed_ms + TIME_EPSILON_MS >= *duration_ms {
                    *slot = *to;
                    return Step::Done {
                        leftover_ms: (*elapsed_ms - *duration_ms).max(0.0),
                    };
                }
                let progress = easing.evaluate(*elapsed_ms / *duration_ms);
                *slot = start + progress * (*to - start);
                Step::Running
            }
            Self::Spring {
                value,
                to,
                config,
                motion,
                elapsed_ms,
            } => {
                let slot = &mut values[value.index()];
                let motion = *motion.get_or_insert_with(|| SpringMotion::new(config, *slot, *to));
                *elapsed_ms += dt_ms;
                let (position, velocity) = motion.sample(*elapsed_ms / 1000.0);
                if motion.is_at_rest(position, velocity) {
                    *slot = *to;
                    return Step::Done { leftover_ms: 0.0 };
                }
                *slot = position;
                Step::Running
            }
            Self::Delay { remaining_ms } => {
                *remaining_ms -= dt_ms;
                if *remaining_ms <= TIME_EPSILON_MS {
                    Step::Done {
                        leftover_ms: (-*remaining_ms).max(0.0),
                    }
                } else {
                    Step::Running
                }
            }
            Self::Sequence { pending, current } => {
                let mut dt_ms = dt_ms;
                loop {
                    let runner = match current {
                        Some(runner) => runner,
                        None => match pending.pop_front() {
                            Some(next) => current.insert(Box::new(Runner::from(next))),
                            None => return Step::Done { leftover_ms: dt_ms },
                        },
                    };
                    match runner.step(values, dt_ms) {
                        Step::Running => return Step::Running,
                        Step::Done { leftover_ms } => {
                            *current = None;
                            dt_ms = leftover_ms;
                        }
                    }
                }
            }
            Self::Parallel { children } => {
                let mut leftover = dt_ms;
                children.retain_mut(|child| match child.step(values, dt_ms) {
                    Step::Running => true,
                    Step::Done { leftover_ms } => {
                        leftover = leftover.min(leftover_ms);
                        false
                    }
                });
                if children.is_empty() {
                    Step::Done {
                        leftover_ms: leftover,
                    }
                } else {
                    Step::Running
                }
            }
        }
    }
}
