use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;
use tumble_anim::Driver;

use crate::config::RollConfig;
use crate::error::RollResult;
use crate::event::{RollEvent, RollLog};
use crate::face::Face;
use crate::haptics::Haptics;
use crate::press::PressFeedback;
use crate::roller::{DieRoller, RollAttempt};
use crate::view::{ButtonView, DiceView, DieTransform};

/// The die and its roll button, driven one frame at a time.
///
/// ```
/// use tumble_core::{DiceWidget, Face, NoHaptics, RollConfig};
///
/// let mut widget = DiceWidget::from_config(RollConfig::default().with_seed(7), NoHaptics).unwrap();
/// assert_eq!(widget.face(), Face::One);
/// assert!(widget.tap().is_started());
/// widget.run_until_idle(1000.0 / 60.0, 10_000.0);
/// assert!(!widget.is_rolling());
/// ```
#[derive(Debug)]
pub struct DiceWidget<R, H> {
    driver: Driver,
    roller: DieRoller<R, H>,
    press: PressFeedback,
}

impl<H: Haptics> DiceWidget<StdRng, H> {
    /// Build a widget whose face generator is seeded from `config.seed`,
    /// or from the thread generator when no seed is set.
    pub fn from_config(config: RollConfig, haptics: H) -> RollResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self::new(config, rng, haptics)
    }
}

impl<R: Rng, H: Haptics> DiceWidget<R, H> {
    /// Build a widget with an explicit face generator.
    pub fn new(config: RollConfig, rng: R, haptics: H) -> RollResult<Self> {
        let mut driver = Driver::new();
        let button = config.button.clone();
        let roller = DieRoller::new(config, rng, haptics, &mut driver)?;
        let press = PressFeedback::new(button, &mut driver);
        Ok(Self {
            driver,
            roller,
            press,
        })
    }

    /// Finger down on the button.
    pub fn press_in(&mut self) -> bool {
        let enabled = !self.roller.is_rolling();
        self.press.press_in(&mut self.driver, enabled)
    }

    /// Finger up from the button.
    pub fn press_out(&mut self) -> bool {
        self.press.press_out(&mut self.driver)
    }

    /// A completed tap on the button.
    pub fn press(&mut self) -> RollAttempt {
        self.roller.attempt_roll(&mut self.driver)
    }

    /// Press in, press out, then press, as one gesture.
    pub fn tap(&mut self) -> RollAttempt {
        self.press_in();
        self.press_out();
        self.press()
    }

    /// Advance one frame and return the roll events it produced.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<RollEvent> {
        let events = self.driver.advance(dt_ms);
        events
            .iter()
            .filter_map(|event| self.roller.handle(&self.driver, event))
            .collect()
    }

    /// Advance in `frame_ms` steps until nothing is left to animate or
    /// `limit_ms` has passed.
    pub fn run_until_idle(&mut self, frame_ms: f64, limit_ms: f64) -> Vec<RollEvent> {
        if !frame_ms.is_finite() || frame_ms <= 0.0 {
            warn!(frame_ms, "cannot run with a non-positive frame duration");
            return Vec::new();
        }
        let deadline = self.driver.now_ms() + limit_ms;
        let mut events = Vec::new();
        while !self.driver.is_idle() && self.driver.now_ms() < deadline {
            events.extend(self.advance(frame_ms));
        }
        events
    }
}

impl<R, H> DiceWidget<R, H> {
    /// Current look of the widget.
    pub fn view(&self) -> DiceView {
        let tracks = self.roller.tracks();
        let progress = self.driver.value(tracks.rotation).unwrap_or(0.0);
        let die = DieTransform {
            rotation_deg: self.roller.rotation_deg(progress),
            scale: self.driver.value(tracks.scale).unwrap_or(1.0),
            opacity: self.driver.value(tracks.opacity).unwrap_or(1.0),
        };
        let button = ButtonView::new(
            self.roller.is_rolling(),
            self.press.scale(&self.driver),
            self.press.config(),
        );
        DiceView::new(self.roller.face(), die, button)
    }

    /// Face currently shown.
    pub fn face(&self) -> Face {
        self.roller.face()
    }

    /// Whether a roll is in progress.
    pub fn is_rolling(&self) -> bool {
        self.roller.is_rolling()
    }

    /// Whether every animation and timer has finished.
    pub fn is_idle(&self) -> bool {
        self.driver.is_idle()
    }

    /// Milliseconds since the widget was built.
    pub fn now_ms(&self) -> f64 {
        self.driver.now_ms()
    }

    /// The roll sequencer.
    pub fn roller(&self) -> &DieRoller<R, H> {
        &self.roller
    }

    /// Mutable access to the roll sequencer.
    pub fn roller_mut(&mut self) -> &mut DieRoller<R, H> {
        &mut self.roller
    }

    /// The button press feedback.
    pub fn press_feedback(&self) -> &PressFeedback {
        &self.press
    }

    /// The animation driver.
    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    /// Every roll event retained so far.
    pub fn log(&self) -> &RollLog {
        self.roller.log()
    }
}
