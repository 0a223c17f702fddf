use tracing::{trace, warn};
use tumble_anim::{Animation, Driver, SpringConfig, ValueId};

use crate::config::ButtonConfig;

/// Spring-driven press scale of the roll button.
#[derive(Debug)]
pub struct PressFeedback {
    config: ButtonConfig,
    value: ValueId,
    pressed: bool,
}

impl PressFeedback {
    /// Create the press scale value in `driver`, resting at 1.
    pub fn new(config: ButtonConfig, driver: &mut Driver) -> Self {
        Self {
            config,
            value: driver.create_value(1.0),
            pressed: false,
        }
    }

    /// Finger down. Ignored while the button is disabled.
    pub fn press_in(&mut self, driver: &mut Driver, enabled: bool) -> bool {
        if !enabled {
            trace!("press ignored: button disabled");
            return false;
        }
        self.pressed = true;
        self.spring_to(driver, self.config.pressed_scale, self.config.press_in_spring);
        true
    }

    /// Finger up. Honored whenever a press is in progress, even if the
    /// button became disabled meanwhile, so it never stays shrunk.
    pub fn press_out(&mut self, driver: &mut Driver) -> bool {
        if !self.pressed {
            return false;
        }
        self.pressed = false;
        self.spring_to(driver, 1.0, self.config.press_out_spring);
        true
    }

    fn spring_to(&self, driver: &mut Driver, to: f64, spring: SpringConfig) {
        if let Err(e) = driver.start(Animation::spring(self.value, to, spring)) {
            warn!(error = %e, "press spring refused");
        }
    }

    /// Whether a press is in progress.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Current press scale.
    pub fn scale(&self, driver: &Driver) -> f64 {
        driver.value(self.value).unwrap_or(1.0)
    }

    /// The driver value holding the press scale.
    pub fn value(&self) -> ValueId {
        self.value
    }

    /// Press feedback settings.
    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }
}
