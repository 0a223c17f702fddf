use tracing::{trace, warn};

use crate::animation::{Animation, Runner, Step, TIME_EPSILON_MS};
use crate::clock::FrameClock;
use crate::error::{AnimError, AnimResult};
use crate::event::DriverEvent;

/// Handle to an animated value owned by a [`Driver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueId(usize);

impl ValueId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the value in its driver.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ValueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "value#{}", self.0)
    }
}

/// Handle to a started animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

impl std::fmt::Display for AnimationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "anim#{}", self.0)
    }
}

/// Handle to a scheduled one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

#[derive(Debug)]
struct Active {
    id: AnimationId,
    values: Vec<ValueId>,
    runner: Runner,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    id: TimerId,
    due_ms: f64,
}

/// The frame-driven animation driver.
///
/// Owns animated values, running animations and timers. Nothing moves until
/// [`Driver::advance`] is called with the duration of the elapsed frame;
/// completions come back as [`DriverEvent`]s from that call.
#[derive(Debug, Default)]
pub struct Driver {
    clock: FrameClock,
    values: Vec<f64>,
    active: Vec<Active>,
    timers: Vec<Timer>,
    pending: Vec<DriverEvent>,
    next_animation: u64,
    next_timer: u64,
}

impl Driver {
    /// Create an empty driver at time 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new animated value.
    pub fn create_value(&mut self, initial: f64) -> ValueId {
        self.values.push(initial);
        ValueId::new(self.values.len() - 1)
    }

    /// Current value, or `None` for an id this driver did not create.
    pub fn value(&self, id: ValueId) -> Option<f64> {
        self.values.get(id.index()).copied()
    }

    /// Jump a value. Any animation driving it is stopped.
    pub fn set_value(&mut self, id: ValueId, value: f64) -> AnimResult<()> {
        self.check_value(id)?;
        self.stop_driving(&[id]);
        self.values[id.index()] = value;
        Ok(())
    }

    /// Start an animation.
    ///
    /// Running animations that drive any of the same values are stopped and
    /// report `finished: false` on the next [`Driver::advance`].
    pub fn start(&mut self, animation: Animation) -> AnimResult<AnimationId> {
        animation.validate()?;
        let values = animation.values();
        for id in &values {
            self.check_value(*id)?;
        }
        self.stop_driving(&values);

        let id = AnimationId(self.next_animation);
        self.next_animation += 1;
        trace!(%id, values = values.len(), "animation started");
        self.active.push(Active {
            id,
            values,
            runner: Runner::from(animation),
        });
        Ok(id)
    }

    /// Stop an animation. Returns `false` if it was not running.
    pub fn stop(&mut self, id: AnimationId) -> bool {
        let before = self.active.len();
        self.active.retain(|a| a.id != id);
        let stopped = self.active.len() != before;
        if stopped {
            self.pending.push(DriverEvent::AnimationEnded {
                id,
                finished: false,
            });
        }
        stopped
    }

    /// Schedule a timer `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: f64) -> AnimResult<TimerId> {
        if !delay_ms.is_finite() || delay_ms < 0.0 {
            return Err(AnimError::InvalidDuration(delay_ms));
        }
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.push(Timer {
            id,
            due_ms: self.clock.now_ms() + delay_ms,
        });
        Ok(id)
    }

    /// Cancel a timer. Returns `false` if it already fired or never existed.
    pub fn cancel_timer(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Advance by one frame of `dt_ms` milliseconds.
    ///
    /// Returns events for animations stopped since the last frame, then the
    /// events of this frame in time order. A timer due partway through the
    /// frame fires after the animations that ended before it and before those
    /// that end later.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<DriverEvent> {
        let dt_ms = if dt_ms.is_finite() && dt_ms >= 0.0 {
            dt_ms
        } else {
            warn!(dt_ms, "ignoring invalid frame delta");
            0.0
        };
        let mut cursor = self.clock.now_ms();
        self.clock.advance(dt_ms);
        let now = self.clock.now_ms();

        let mut events = std::mem::take(&mut self.pending);
        while let Some(timer) = self.take_next_due(now) {
            self.step_active((timer.due_ms - cursor).max(0.0), &mut events);
            cursor = cursor.max(timer.due_ms);
            events.push(DriverEvent::TimerFired { id: timer.id });
        }
        self.step_active((now - cursor).max(0.0), &mut events);

        if !events.is_empty() {
            trace!(
                frame = self.clock.frame(),
                now,
                dt_ms = self.clock.last_delta_ms(),
                events = events.len(),
                "frame events"
            );
        }
        events
    }

    /// Remove and return the earliest timer due by `now`.
    fn take_next_due(&mut self, now: f64) -> Option<Timer> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now + TIME_EPSILON_MS)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i)?;
        Some(self.timers.remove(index))
    }

    fn step_active(&mut self, dt_ms: f64, events: &mut Vec<DriverEvent>) {
        let values = &mut self.values;
        self.active.retain_mut(|active| match active.runner.step(values, dt_ms) {
            Step::Running => true,
            Step::Done { .. } => {
                events.push(DriverEvent::AnimationEnded {
                    id: active.id,
                    finished: true,
                });
                false
            }
        });
    }

    /// Whether an animation is still running.
    pub fn is_running(&self, id: AnimationId) -> bool {
        self.active.iter().any(|a| a.id == id)
    }

    /// Whether a timer is still waiting to fire.
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Whether there is nothing left to animate, fire, or report.
    pub fn is_idle(&self) -> bool {
        self.active.is_empty() && self.timers.is_empty() && self.pending.is_empty()
    }

    /// Milliseconds elapsed on the driver's clock.
    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.clock.frame()
    }

    fn check_value(&self, id: ValueId) -> AnimResult<()> {
        if id.index() < self.values.len() {
            Ok(())
        } else {
            Err(AnimError::UnknownValue(id))
        }
    }

    fn stop_driving(&mut self, values: &[ValueId]) {
        let pending = &mut self.pending;
        self.active.retain(|active| {
            let overlaps = active.values.iter().any(|v| values.contains(v));
            if overlaps {
                trace!(id = %active.id, "animation taken over");
                pending.push(DriverEvent::AnimationEnded {
                    id: active.id,
                    finished: false,
                });
            }
            !overlaps
        });
    }
}
