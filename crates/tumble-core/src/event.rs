use serde::Serialize;

use crate::face::Face;
use crate::haptics::ImpactKind;

/// Identifier of one started roll. The first roll is `roll#1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RollId(u64);

impl RollId {
    pub(crate) fn new(n: u64) -> Self {
        Self(n)
    }

    /// Sequence number of the roll.
    pub fn number(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RollId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "roll#{}", self.0)
    }
}

/// What happened during a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RollEventKind {
    /// The tracks were launched.
    Started {
        /// The new roll.
        roll: RollId,
    },
    /// A roll was requested while another was in progress.
    Rejected {
        /// The roll still in progress.
        active: RollId,
    },
    /// The start-of-roll haptic pulse was fired.
    HapticFired {
        /// The roll that fired it.
        roll: RollId,
        /// Pulse intensity.
        kind: ImpactKind,
    },
    /// The deferred face change ran.
    FaceChanged {
        /// The roll that scheduled it.
        roll: RollId,
        /// Face shown before.
        from: Face,
        /// Face shown now.
        to: Face,
    },
    /// The track group ended and the die accepts rolls again.
    Finished {
        /// The roll that ended.
        roll: RollId,
        /// Face shown when the roll ended.
        face: Face,
        /// `false` if the group was stopped before every track completed.
        completed: bool,
    },
}

impl RollEventKind {
    /// The roll this event belongs to.
    pub fn roll(&self) -> RollId {
        match self {
            Self::Started { roll }
            | Self::HapticFired { roll, .. }
            | Self::FaceChanged { roll, .. }
            | Self::Finished { roll, .. } => *roll,
            Self::Rejected { active } => *active,
        }
    }

    /// Short lowercase name, as used in timelines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Started { .. } => "started",
            Self::Rejected { .. } => "rejected",
            Self::HapticFired { .. } => "haptic",
            Self::FaceChanged { .. } => "face",
            Self::Finished { .. } => "finished",
        }
    }
}

/// A timestamped roll event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RollEvent {
    /// Driver time in milliseconds when the event happened.
    pub at_ms: f64,
    /// What happened.
    #[serde(flatten)]
    pub kind: RollEventKind,
}

impl RollEvent {
    /// Create an event at the given driver time.
    pub fn new(at_ms: f64, kind: RollEventKind) -> Self {
        Self { at_ms, kind }
    }
}

impl std::fmt::Display for RollEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>8.1} ms  {:<8} {}", self.at_ms, self.kind.name(), self.kind.roll())?;
        match self.kind {
            RollEventKind::Started { .. } => Ok(()),
            RollEventKind::Rejected { .. } => write!(f, " still rolling"),
            RollEventKind::HapticFired { kind, .. } => write!(f, " {kind}"),
            RollEventKind::FaceChanged { from, to, .. } => write!(f, " {from} -> {to}"),
            RollEventKind::Finished {
                face, completed, ..
            } => {
                if completed {
                    write!(f, " on {face}")
                } else {
                    write!(f, " on {face} (interrupted)")
                }
            }
        }
    }
}

/// Accumulates roll events over the widget's lifetime.
#[derive(Debug, Default)]
pub struct RollLog {
    events: Vec<RollEvent>,
    max_events: usize,
}

impl RollLog {
    /// Create a log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: RollEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// All retained events, oldest first.
    pub fn events(&self) -> &[RollEvent] {
        &self.events
    }

    /// Events belonging to one roll.
    pub fn events_for_roll(&self, roll: RollId) -> Vec<&RollEvent> {
        self.events.iter().filter(|e| e.kind.roll() == roll).collect()
    }

    /// Number of retained events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events are retained.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all retained events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(at_ms: f64, n: u64) -> RollEvent {
        RollEvent::new(at_ms, RollEventKind::Started { roll: RollId::new(n) })
    }

    #[test]
    fn log_trims_oldest_first() {
        let mut log = RollLog::new(2);
        for i in 1..=5 {
            log.push(started(i as f64, i));
        }
        assert_eq!(log.len(), 2);
        assert_eq!(log.events()[0].kind.roll().number(), 4);
        assert_eq!(log.events()[1].kind.roll().number(), 5);
    }

    #[test]
    fn unlimited_log_keeps_everything() {
        let mut log = RollLog::new(0);
        for i in 0..500 {
            log.push(started(0.0, i));
        }
        assert_eq!(log.len(), 500);
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn filter_by_roll() {
        let mut log = RollLog::new(0);
        let first = RollId::new(1);
        log.push(started(0.0, 1));
        log.push(RollEvent::new(10.0, RollEventKind::Rejected { active: first }));
        log.push(started(2000.0, 2));
        assert_eq!(log.events_for_roll(first).len(), 2);
        assert_eq!(log.events_for_roll(RollId::new(2)).len(), 1);
    }

    #[test]
    fn display_lines() {
        let roll = RollId::new(3);
        let changed = RollEvent::new(
            150.0,
            RollEventKind::FaceChanged {
                roll,
                from: Face::One,
                to: Face::Five,
            },
        );
        insta::assert_snapshot!(changed.to_string().trim(), @"150.0 ms  face     roll#3 1 -> 5");
        let stopped = RollEvent::new(
            90.0,
            RollEventKind::Finished {
                roll,
                face: Face::Two,
                completed: false,
            },
        );
        insta::assert_snapshot!(stopped.to_string().trim(), @"90.0 ms  finished roll#3 on 2 (interrupted)");
    }

    #[test]
    fn json_shape() {
        let event = RollEvent::new(
            0.0,
            RollEventKind::HapticFired {
                roll: RollId::new(1),
                kind: ImpactKind::ImpactLight,
            },
        );
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"at_ms":0.0,"event":"haptic_fired","roll":1,"kind":"impactLight"}"#
        );
    }
}
