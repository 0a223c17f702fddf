use rand::Rng;
use tracing::{debug, trace, warn};
use tumble_anim::{
    AnimResult, Animation, AnimationId, Driver, DriverEvent, Extrapolate, Interpolation, TimerId,
    ValueId,
};

use crate::config::RollConfig;
use crate::error::RollResult;
use crate::event::{RollEvent, RollEventKind, RollId, RollLog};
use crate::face::Face;
use crate::haptics::Haptics;

/// Driver values animated during a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tracks {
    /// Spin progress, 0 to 1.
    pub rotation: ValueId,
    /// Die scale, resting at 1.
    pub scale: ValueId,
    /// Die opacity, resting at 1.
    pub opacity: ValueId,
}

/// Outcome of a roll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollAttempt {
    /// A new roll was launched.
    Started(RollId),
    /// A roll was already in progress; nothing changed.
    Rejected,
}

impl RollAttempt {
    /// Whether the request launched a roll.
    pub fn is_started(self) -> bool {
        matches!(self, Self::Started(_))
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveRoll {
    id: RollId,
    group: AnimationId,
}

/// Sequences one roll at a time: resets and launches the three tracks,
/// fires the haptic pulse, and swaps the face on a timer.
///
/// The roller never advances time itself. Feed it every [`DriverEvent`]
/// returned by [`Driver::advance`] through [`DieRoller::handle`].
#[derive(Debug)]
pub struct DieRoller<R, H> {
    config: RollConfig,
    rng: R,
    haptics: H,
    tracks: Tracks,
    spin: Interpolation,
    face: Face,
    active: Option<ActiveRoll>,
    face_timers: Vec<(TimerId, RollId)>,
    rolls_started: u64,
    rolls_completed: u64,
    log: RollLog,
}

impl<R: Rng, H: Haptics> DieRoller<R, H> {
    /// Validate `config` and create the roller's tracks in `driver`.
    pub fn new(config: RollConfig, rng: R, haptics: H, driver: &mut Driver) -> RollResult<Self> {
        config.validate()?;
        let spin = Interpolation::new(vec![0.0, 1.0], vec![0.0, config.spin_degrees])?
            .extrapolate(Extrapolate::Extend);
        let tracks = Tracks {
            rotation: driver.create_value(0.0),
            scale: driver.create_value(1.0),
            opacity: driver.create_value(1.0),
        };
        let log = RollLog::new(config.max_events);
        Ok(Self {
            config,
            rng,
            haptics,
            tracks,
            spin,
            face: Face::default(),
            active: None,
            face_timers: Vec::new(),
            rolls_started: 0,
            rolls_completed: 0,
            log,
        })
    }

    /// Request a roll.
    ///
    /// While a roll is in progress this only logs a rejection. Otherwise the
    /// roll is launched and the haptic pulse fires before this returns.
    pub fn attempt_roll(&mut self, driver: &mut Driver) -> RollAttempt {
        let now = driver.now_ms();
        if let Some(active) = self.active {
            trace!(roll = %active.id, "roll rejected");
            self.log
                .push(RollEvent::new(now, RollEventKind::Rejected { active: active.id }));
            return RollAttempt::Rejected;
        }

        let (group, timer) = match self.launch(driver) {
            Ok(handles) => handles,
            Err(e) => {
                warn!(error = %e, "driver refused roll tracks");
                return RollAttempt::Rejected;
            }
        };

        self.rolls_started += 1;
        let id = RollId::new(self.rolls_started);
        self.active = Some(ActiveRoll { id, group });
        self.face_timers.push((timer, id));
        debug!(roll = %id, %group, %timer, at_ms = now, "roll started");
        self.log
            .push(RollEvent::new(now, RollEventKind::Started { roll: id }));

        self.haptics
            .trigger(self.config.haptic, self.config.haptic_options);
        self.log.push(RollEvent::new(
            now,
            RollEventKind::HapticFired {
                roll: id,
                kind: self.config.haptic,
            },
        ));

        RollAttempt::Started(id)
    }

    fn launch(&self, driver: &mut Driver) -> AnimResult<(AnimationId, TimerId)> {
        let c = &self.config;
        let t = self.tracks;
        // Opacity is not reset: it always ends a roll at 1.
        driver.set_value(t.rotation, 0.0)?;
        driver.set_value(t.scale, 1.0)?;

        let group = Animation::parallel(vec![
            Animation::timing(t.rotation, 1.0, c.spin_duration_ms, c.spin_easing),
            Animation::sequence(vec![
                Animation::timing(t.scale, c.shrink_scale, c.shrink_duration_ms, c.shrink_easing),
                Animation::spring(t.scale, 1.0, c.bounce_spring),
            ]),
            Animation::sequence(vec![
                Animation::timing(t.opacity, c.fade_opacity, c.fade_out_ms, c.fade_easing),
                Animation::timing(t.opacity, 1.0, c.fade_in_ms, c.fade_easing),
            ]),
        ]);
        let group = driver.start(group)?;
        match driver.schedule(c.face_change_delay_ms) {
            Ok(timer) => Ok((group, timer)),
            Err(e) => {
                driver.stop(group);
                Err(e)
            }
        }
    }

    /// React to one driver event. Returns the roll event it caused, if any.
    pub fn handle(&mut self, driver: &Driver, event: &DriverEvent) -> Option<RollEvent> {
        let now = driver.now_ms();
        let kind = match *event {
            DriverEvent::TimerFired { id } => {
                let pos = self.face_timers.iter().position(|(timer, _)| *timer == id)?;
                let (_, roll) = self.face_timers.swap_remove(pos);
                let from = self.face;
                self.face = Face::roll(&mut self.rng);
                debug!(%roll, %from, to = %self.face, at_ms = now, "face changed");
                RollEventKind::FaceChanged {
                    roll,
                    from,
                    to: self.face,
                }
            }
            DriverEvent::AnimationEnded { id, finished } => {
                let active = self.active.filter(|a| a.group == id)?;
                self.active = None;
                if finished {
                    self.rolls_completed += 1;
                }
                debug!(roll = %active.id, face = %self.face, finished, at_ms = now, "roll finished");
                RollEventKind::Finished {
                    roll: active.id,
                    face: self.face,
                    completed: finished,
                }
            }
        };
        let event = RollEvent::new(now, kind);
        self.log.push(event);
        Some(event)
    }
}

impl<R, H> DieRoller<R, H> {
    /// Face currently shown.
    pub fn face(&self) -> Face {
        self.face
    }

    /// Whether a roll is in progress.
    pub fn is_rolling(&self) -> bool {
        self.active.is_some()
    }

    /// The roll in progress, if any.
    pub fn current_roll(&self) -> Option<RollId> {
        self.active.map(|a| a.id)
    }

    /// Driver values owned by this roller.
    pub fn tracks(&self) -> Tracks {
        self.tracks
    }

    /// Rolls launched so far.
    pub fn rolls_started(&self) -> u64 {
        self.rolls_started
    }

    /// Rolls whose tracks all ran to completion.
    pub fn rolls_completed(&self) -> u64 {
        self.rolls_completed
    }

    /// Rotation in degrees for a spin progress value.
    pub fn rotation_deg(&self, progress: f64) -> f64 {
        self.spin.map(progress)
    }

    /// The validated configuration.
    pub fn config(&self) -> &RollConfig {
        &self.config
    }

    /// The haptics device.
    pub fn haptics(&self) -> &H {
        &self.haptics
    }

    /// Mutable access to the haptics device.
    pub fn haptics_mut(&mut self) -> &mut H {
        &mut self.haptics
    }

    /// Every roll event retained so far.
    pub fn log(&self) -> &RollLog {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::haptics::RecordingHaptics;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn roller(driver: &mut Driver) -> DieRoller<StdRng, RecordingHaptics> {
        DieRoller::new(
            RollConfig::default(),
            StdRng::seed_from_u64(42),
            RecordingHaptics::new(),
            driver,
        )
        .unwrap()
    }

    fn step(driver: &mut Driver, roller: &mut DieRoller<StdRng, RecordingHaptics>) -> Vec<RollEvent> {
        driver
            .advance(FRAME_MS)
            .iter()
            .filter_map(|e| roller.handle(driver, e))
            .collect()
    }

    #[test]
    fn mounts_idle_on_one() {
        let mut driver = Driver::new();
        let roller = roller(&mut driver);
        assert_eq!(roller.face(), Face::One);
        assert!(!roller.is_rolling());
        assert_eq!(roller.rolls_started(), 0);
        assert!(roller.log().is_empty());
        let t = roller.tracks();
        assert_eq!(driver.value(t.rotation), Some(0.0));
        assert_eq!(driver.value(t.scale), Some(1.0));
        assert_eq!(driver.value(t.opacity), Some(1.0));
    }

    #[test]
    fn roll_is_synchronous_and_fires_one_pulse() {
        let mut driver = Driver::new();
        let mut roller = roller(&mut driver);
        let attempt = roller.attempt_roll(&mut driver);
        assert!(attempt.is_started());
        assert!(roller.is_rolling());
        assert_eq!(roller.haptics().count(), 1);
        assert_eq!(roller.face(), Face::One);
        assert_eq!(roller.log().len(), 2);
    }

    #[test]
    fn second_roll_while_rolling_changes_nothing() {
        let mut driver = Driver::new();
        let mut roller = roller(&mut driver);
        roller.attempt_roll(&mut driver);
        for _ in 0..3 {
            step(&mut driver, &mut roller);
        }
        let t = roller.tracks();
        let rotation = driver.value(t.rotation);
        let scale = driver.value(t.scale);

        assert_eq!(roller.attempt_roll(&mut driver), RollAttempt::Rejected);
        assert_eq!(driver.value(t.rotation), rotation);
        assert_eq!(driver.value(t.scale), scale);
        assert_eq!(roller.haptics().count(), 1);
        assert_eq!(roller.rolls_started(), 1);
        assert!(matches!(
            roller.log().events().last().map(|e| e.kind),
            Some(RollEventKind::Rejected { .. })
        ));
    }

    #[test]
    fn face_changes_once_at_delay_and_roll_ends_with_longest_track() {
        let mut driver = Driver::new();
        let mut roller = roller(&mut driver);
        roller.attempt_roll(&mut driver);

        let mut face_at = None;
        let mut finished_at = None;
        let mut face_changes = 0;
        while finished_at.is_none() && driver.now_ms() < 5000.0 {
            for event in step(&mut driver, &mut roller) {
                match event.kind {
                    RollEventKind::FaceChanged { .. } => {
                        face_changes += 1;
                        face_at = Some(event.at_ms);
                    }
                    RollEventKind::Finished { completed, .. } => {
                        assert!(completed);
                        finished_at = Some(event.at_ms);
                    }
                    _ => {}
                }
            }
            if face_at.is_none() {
                assert_eq!(roller.face(), Face::One);
            }
        }

        assert_eq!(face_changes, 1);
        let face_at = face_at.unwrap();
        assert!((150.0 - 1e-6..150.0 + FRAME_MS).contains(&face_at), "face at {face_at}");
        let finished_at = finished_at.unwrap();
        // The bounce spring outlasts the spin and the fade.
        assert!(finished_at > 600.0, "finished at {finished_at}");
        assert!(!roller.is_rolling());
        assert_eq!(roller.rolls_completed(), 1);

        let t = roller.tracks();
        assert_eq!(driver.value(t.scale), Some(1.0));
        assert_eq!(driver.value(t.opacity), Some(1.0));
        assert_eq!(driver.value(t.rotation), Some(1.0));
        assert!((roller.rotation_deg(1.0) - 720.0).abs() < 1e-9);
    }

    #[test]
    fn next_roll_resets_rotation_and_scale() {
        let mut driver = Driver::new();
        let mut roller = roller(&mut driver);
        roller.attempt_roll(&mut driver);
        while roller.is_rolling() {
            step(&mut driver, &mut roller);
        }
        let attempt = roller.attempt_roll(&mut driver);
        assert_eq!(attempt, RollAttempt::Started(RollId::new(2)));
        let t = roller.tracks();
        assert_eq!(driver.value(t.rotation), Some(0.0));
        assert_eq!(driver.value(t.scale), Some(1.0));
        assert_eq!(roller.haptics().count(), 2);
    }

    #[test]
    fn stopped_group_still_clears_rolling() {
        let mut driver = Driver::new();
        let mut roller = roller(&mut driver);
        roller.attempt_roll(&mut driver);
        step(&mut driver, &mut roller);
        let t = roller.tracks();
        driver.set_value(t.scale, 1.0).unwrap();

        let events = step(&mut driver, &mut roller);
        assert!(events.iter().any(|e| matches!(
            e.kind,
            RollEventKind::Finished {
                completed: false,
                ..
            }
        )));
        assert!(!roller.is_rolling());
        assert_eq!(roller.rolls_completed(), 0);
    }

    #[test]
    fn foreign_events_are_ignored() {
        let mut driver = Driver::new();
        let mut roller = roller(&mut driver);
        let value = driver.create_value(0.0);
        driver
            .start(Animation::timing(value, 1.0, 10.0, Default::default()))
            .unwrap();
        driver.schedule(5.0).unwrap();
        let events = step(&mut driver, &mut roller);
        assert!(events.is_empty());
        assert_eq!(roller.face(), Face::One);
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let mut driver = Driver::new();
        let config = RollConfig::default().with_face_change_delay(-5.0);
        let result = DieRoller::new(
            config,
            StdRng::seed_from_u64(1),
            RecordingHaptics::new(),
            &mut driver,
        );
        assert!(result.is_err());
    }
}
