//! What the widget looks like at one instant.
//!
//! Everything here is plain data computed from the roller, the press
//! feedback and the driver's current values. Front ends only draw it.

use serde::Serialize;

use crate::config::ButtonConfig;
use crate::face::Face;

/// Button label while idle.
pub const ROLL_LABEL: &str = "Roll the dice";
/// Button label while a roll is in progress.
pub const ROLLING_LABEL: &str = "Rolling...";

/// Transform applied to the die image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DieTransform {
    /// Rotation in degrees.
    pub rotation_deg: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Opacity, 0 to 1.
    pub opacity: f64,
}

impl Default for DieTransform {
    fn default() -> Self {
        Self {
            rotation_deg: 0.0,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

/// State of the roll button.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ButtonView {
    /// Text on the button.
    pub label: &'static str,
    /// Whether taps are accepted.
    pub enabled: bool,
    /// Press scale.
    pub scale: f64,
    /// Label opacity; dimmed while disabled.
    pub label_opacity: f64,
}

impl ButtonView {
    /// Button for the given rolling state and press scale.
    pub fn new(rolling: bool, scale: f64, config: &ButtonConfig) -> Self {
        if rolling {
            Self {
                label: ROLLING_LABEL,
                enabled: false,
                scale,
                label_opacity: config.disabled_opacity,
            }
        } else {
            Self {
                label: ROLL_LABEL,
                enabled: true,
                scale,
                label_opacity: 1.0,
            }
        }
    }
}

/// Snapshot of the whole widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiceView {
    /// Face shown.
    pub face: Face,
    /// Image asset for the face.
    pub asset: &'static str,
    /// Die transform.
    pub die: DieTransform,
    /// Roll button.
    pub button: ButtonView,
}

impl DiceView {
    /// Compose a view.
    pub fn new(face: Face, die: DieTransform, button: ButtonView) -> Self {
        Self {
            face,
            asset: face.asset_name(),
            die,
            button,
        }
    }
}

impl std::fmt::Display for DiceView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rot {:.1} scale {:.3} alpha {:.2} | [{}] {} x{:.3} alpha {:.1}",
            self.asset,
            self.die.rotation_deg,
            self.die.scale,
            self.die.opacity,
            self.button.label,
            if self.button.enabled { "enabled" } else { "disabled" },
            self.button.scale,
            self.button.label_opacity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_button() {
        let button = ButtonView::new(false, 1.0, &ButtonConfig::default());
        assert_eq!(button.label, "Roll the dice");
        assert!(button.enabled);
        assert_eq!(button.label_opacity, 1.0);
    }

    #[test]
    fn rolling_button_is_dimmed() {
        let button = ButtonView::new(true, 0.95, &ButtonConfig::default());
        assert_eq!(button.label, "Rolling...");
        assert!(!button.enabled);
        assert_eq!(button.label_opacity, 0.5);
        assert_eq!(button.scale, 0.95);
    }

    #[test]
    fn view_text() {
        let view = DiceView::new(
            Face::Three,
            DieTransform {
                rotation_deg: 360.0,
                scale: 0.4,
                opacity: 0.3,
            },
            ButtonView::new(true, 1.0, &ButtonConfig::default()),
        );
        insta::assert_snapshot!(
            view.to_string(),
            @"DiceThree rot 360.0 scale 0.400 alpha 0.30 | [Rolling...] disabled x1.000 alpha 0.5"
        );
    }
}
