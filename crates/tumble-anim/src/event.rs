use crate::driver::{AnimationId, TimerId};

/// Something the driver reports back from [`crate::Driver::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverEvent {
    /// An animation stopped running.
    AnimationEnded {
        /// The animation that ended.
        id: AnimationId,
        /// `true` if it ran to completion, `false` if it was stopped or
        /// taken over by a newer animation on the same value.
        finished: bool,
    },
    /// A scheduled timer came due.
    TimerFired {
        /// The timer that fired.
        id: TimerId,
    },
}

impl DriverEvent {
    /// Whether this event reports the end of the given animation.
    pub fn ends(&self, animation: AnimationId) -> bool {
        matches!(self, Self::AnimationEnded { id, .. } if *id == animation)
    }

    /// Whether this event reports the given timer firing.
    pub fn fires(&self, timer: TimerId) -> bool {
        matches!(self, Self::TimerFired { id } if *id == timer)
    }
}

impl std::fmt::Display for DriverEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AnimationEnded { id, finished: true } => write!(f, "{id} finished"),
            Self::AnimationEnded {
                id,
                finished: false,
            } => write!(f, "{id} stopped"),
            Self::TimerFired { id } => write!(f, "{id} fired"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Animation, Driver, Easing};

    #[test]
    fn matches_its_own_handles() {
        let mut driver = Driver::new();
        let v = driver.create_value(0.0);
        let anim = driver
            .start(Animation::timing(v, 1.0, 10.0, Easing::Linear))
            .unwrap();
        let timer = driver.schedule(5.0).unwrap();
        let events = driver.advance(20.0);
        assert!(events[0].ends(anim));
        assert!(!events[0].fires(timer));
        assert!(events[1].fires(timer));
        assert_eq!(events[0].to_string(), "anim#0 finished");
        assert_eq!(events[1].to_string(), "timer#0 fired");
    }
}
