use std::path::Path;

use serde::{Deserialize, Serialize};
use tumble_anim::{Easing, SpringConfig};

use crate::error::{RollError, RollResult};
use crate::haptics::{HapticOptions, ImpactKind};

/// Timing and feel of a roll.
///
/// The face-change delay is tuned against the opacity track: the face swaps
/// while the die is faded, so changing the fade durations usually means
/// re-tuning the delay as well. [`RollConfig::validate`] only checks that
/// the swap lands inside the opacity track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollConfig {
    /// Duration of the spin in milliseconds.
    pub spin_duration_ms: f64,
    /// Rotation shown when spin progress reaches 1.
    pub spin_degrees: f64,
    /// Curve of the spin.
    pub spin_easing: Easing,
    /// Scale the die shrinks to before bouncing back.
    pub shrink_scale: f64,
    /// Duration of the shrink in milliseconds.
    pub shrink_duration_ms: f64,
    /// Curve of the shrink.
    pub shrink_easing: Easing,
    /// Spring that bounces the die back to full size.
    pub bounce_spring: SpringConfig,
    /// Opacity at the bottom of the flicker.
    pub fade_opacity: f64,
    /// Duration of the fade out in milliseconds.
    pub fade_out_ms: f64,
    /// Duration of the fade back in in milliseconds.
    pub fade_in_ms: f64,
    /// Curve of both fade phases.
    pub fade_easing: Easing,
    /// Delay after roll start before the new face is shown.
    pub face_change_delay_ms: f64,
    /// Pulse fired when a roll starts.
    pub haptic: ImpactKind,
    /// Delivery options for the pulse.
    pub haptic_options: HapticOptions,
    /// Seed for the face generator. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Maximum roll log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
    /// Press feedback of the roll button.
    pub button: ButtonConfig,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            spin_duration_ms: 600.0,
            spin_degrees: 720.0,
            spin_easing: Easing::CubicOut,
            shrink_scale: 0.4,
            shrink_duration_ms: 150.0,
            shrink_easing: Easing::EaseIn,
            bounce_spring: SpringConfig::new(3.0, 80.0),
            fade_opacity: 0.3,
            fade_out_ms: 150.0,
            fade_in_ms: 200.0,
            fade_easing: Easing::Linear,
            face_change_delay_ms: 150.0,
            haptic: ImpactKind::ImpactLight,
            haptic_options: HapticOptions::default(),
            seed: None,
            max_events: 0,
            button: ButtonConfig::default(),
        }
    }
}

impl RollConfig {
    /// Set the face generator seed for deterministic rolls.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the delay before the new face is shown.
    pub fn with_face_change_delay(mut self, delay_ms: f64) -> Self {
        self.face_change_delay_ms = delay_ms;
        self
    }

    /// Set the spin duration.
    pub fn with_spin_duration(mut self, duration_ms: f64) -> Self {
        self.spin_duration_ms = duration_ms;
        self
    }

    /// Set the bounce spring.
    pub fn with_bounce_spring(mut self, spring: SpringConfig) -> Self {
        self.bounce_spring = spring;
        self
    }

    /// Set the pulse fired at roll start.
    pub fn with_haptic(mut self, kind: ImpactKind, options: HapticOptions) -> Self {
        self.haptic = kind;
        self.haptic_options = options;
        self
    }

    /// Set the maximum roll log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Set the button press feedback.
    pub fn with_button(mut self, button: ButtonConfig) -> Self {
        self.button = button;
        self
    }

    /// Total duration of the opacity track.
    pub fn fade_duration_ms(&self) -> f64 {
        self.fade_out_ms + self.fade_in_ms
    }

    /// Parse a JSON config. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> RollResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> RollResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that every track can run and the face swap is masked by the fade.
    pub fn validate(&self) -> RollResult<()> {
        for (name, ms) in [
            ("spin_duration_ms", self.spin_duration_ms),
            ("shrink_duration_ms", self.shrink_duration_ms),
            ("fade_out_ms", self.fade_out_ms),
            ("fade_in_ms", self.fade_in_ms),
            ("face_change_delay_ms", self.face_change_delay_ms),
        ] {
            if !ms.is_finite() || ms < 0.0 {
                return Err(RollError::InvalidConfig(format!(
                    "{name} must be a non-negative number of milliseconds, got {ms}"
                )));
            }
        }
        if !self.spin_degrees.is_finite() {
            return Err(RollError::InvalidConfig(format!(
                "spin_degrees must be finite, got {}",
                self.spin_degrees
            )));
        }
        if !self.shrink_scale.is_finite() || self.shrink_scale < 0.0 {
            return Err(RollError::InvalidConfig(format!(
                "shrink_scale must be a non-negative scale, got {}",
                self.shrink_scale
            )));
        }
        if !(0.0..=1.0).contains(&self.fade_opacity) {
            return Err(RollError::InvalidConfig(format!(
                "fade_opacity must be within [0, 1], got {}",
                self.fade_opacity
            )));
        }
        let fade = self.fade_duration_ms();
        if self.face_change_delay_ms <= 0.0 || self.face_change_delay_ms >= fade {
            return Err(RollError::InvalidConfig(format!(
                "face_change_delay_ms ({}) must fall inside the opacity track (0 to {fade} ms)",
                self.face_change_delay_ms
            )));
        }
        self.spin_easing.validate()?;
        self.shrink_easing.validate()?;
        self.fade_easing.validate()?;
        self.bounce_spring.validate()?;
        self.button.validate()
    }
}

/// Press feedback of the roll button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// Scale the label shrinks to while pressed.
    pub pressed_scale: f64,
    /// Spring toward `pressed_scale` on press-in.
    pub press_in_spring: SpringConfig,
    /// Spring back to full size on press-out.
    pub press_out_spring: SpringConfig,
    /// Label opacity while the button is disabled.
    pub disabled_opacity: f64,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            pressed_scale: 0.9,
            press_in_spring: SpringConfig::default(),
            press_out_spring: SpringConfig::new(3.0, 40.0),
            disabled_opacity: 0.5,
        }
    }
}

impl ButtonConfig {
    /// Check scales, opacity and springs.
    pub fn validate(&self) -> RollResult<()> {
        if !self.pressed_scale.is_finite() || self.pressed_scale <= 0.0 {
            return Err(RollError::InvalidConfig(format!(
                "button.pressed_scale must be positive, got {}",
                self.pressed_scale
            )));
        }
        if !(0.0..=1.0).contains(&self.disabled_opacity) {
            return Err(RollError::InvalidConfig(format!(
                "button.disabled_opacity must be within [0, 1], got {}",
                self.disabled_opacity
            )));
        }
        self.press_in_spring.validate()?;
        self.press_out_spring.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn config_default_values() {
        let config = RollConfig::default();
        assert!((config.spin_duration_ms - 600.0).abs() < f64::EPSILON);
        assert!((config.spin_degrees - 720.0).abs() < f64::EPSILON);
        assert!((config.shrink_scale - 0.4).abs() < f64::EPSILON);
        assert!((config.fade_opacity - 0.3).abs() < f64::EPSILON);
        assert!((config.face_change_delay_ms - 150.0).abs() < f64::EPSILON);
        assert_eq!(config.haptic, ImpactKind::ImpactLight);
        assert_eq!(config.seed, None);
        assert!((config.button.pressed_scale - 0.9).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder_chain() {
        let config = RollConfig::default()
            .with_seed(123)
            .with_spin_duration(400.0)
            .with_face_change_delay(120.0)
            .with_max_events(50);
        assert_eq!(config.seed, Some(123));
        assert!((config.spin_duration_ms - 400.0).abs() < f64::EPSILON);
        assert!((config.face_change_delay_ms - 120.0).abs() < f64::EPSILON);
        assert_eq!(config.max_events, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn face_change_must_land_inside_fade() {
        let late = RollConfig::default().with_face_change_delay(400.0);
        assert!(matches!(late.validate(), Err(RollError::InvalidConfig(_))));
        let immediate = RollConfig::default().with_face_change_delay(0.0);
        assert!(immediate.validate().is_err());
    }

    #[test]
    fn rejects_bad_numbers() {
        let config = RollConfig {
            fade_in_ms: -1.0,
            ..RollConfig::default()
        };
        assert!(config.validate().is_err());

        let config = RollConfig {
            fade_opacity: 1.5,
            ..RollConfig::default()
        };
        assert!(config.validate().is_err());

        let config = RollConfig::default().with_bounce_spring(SpringConfig::new(-4.0, 80.0));
        assert!(matches!(config.validate(), Err(RollError::Anim(_))));

        let config = RollConfig::default().with_button(ButtonConfig {
            pressed_scale: 0.0,
            ..ButtonConfig::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn json_fills_in_defaults() {
        let config =
            RollConfig::from_json_str(r#"{"seed": 9, "spin_easing": "linear", "haptic": "rigid"}"#)
                .unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.spin_easing, Easing::Linear);
        assert_eq!(config.haptic, ImpactKind::Rigid);
        assert!((config.fade_in_ms - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn json_is_validated() {
        let err = RollConfig::from_json_str(r#"{"face_change_delay_ms": 1000}"#).unwrap_err();
        assert!(err.to_string().contains("face_change_delay_ms"));
        assert!(matches!(
            RollConfig::from_json_str("{not json"),
            Err(RollError::Parse(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"button": {{"pressed_scale": 0.8}}}}"#).unwrap();
        let config = RollConfig::load(file.path()).unwrap();
        assert!((config.button.pressed_scale - 0.8).abs() < f64::EPSILON);
        assert!((config.button.disabled_opacity - 0.5).abs() < f64::EPSILON);

        let missing = RollConfig::load(Path::new("/nonexistent/tumble.json"));
        assert!(matches!(missing, Err(RollError::Io(_))));
    }
}
