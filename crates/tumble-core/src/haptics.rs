//! Haptic feedback capability.
//!
//! The die only ever fires and forgets: there is no acknowledgement and no
//! failure path. Platforms provide their own [`Haptics`] implementation.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Intensity class of a haptic pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImpactKind {
    /// A selection tick.
    Selection,
    /// A light impact.
    #[default]
    ImpactLight,
    /// A medium impact.
    ImpactMedium,
    /// A heavy impact.
    ImpactHeavy,
    /// A rigid, sharp impact.
    Rigid,
    /// A soft, dull impact.
    Soft,
    /// Success notification pattern.
    NotificationSuccess,
    /// Warning notification pattern.
    NotificationWarning,
    /// Error notification pattern.
    NotificationError,
}

impl std::fmt::Display for ImpactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Selection => "selection",
            Self::ImpactLight => "impactLight",
            Self::ImpactMedium => "impactMedium",
            Self::ImpactHeavy => "impactHeavy",
            Self::Rigid => "rigid",
            Self::Soft => "soft",
            Self::NotificationSuccess => "notificationSuccess",
            Self::NotificationWarning => "notificationWarning",
            Self::NotificationError => "notificationError",
        };
        f.write_str(name)
    }
}

/// How a pulse should be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HapticOptions {
    /// Fall back to a plain vibration where no haptic engine exists.
    pub enable_vibrate_fallback: bool,
    /// Fire even if the user disabled haptics in system settings.
    pub ignore_system_settings: bool,
}

impl Default for HapticOptions {
    fn default() -> Self {
        Self {
            enable_vibrate_fallback: true,
            ignore_system_settings: false,
        }
    }
}

/// A device capable of haptic pulses.
pub trait Haptics {
    /// Fire one pulse.
    fn trigger(&mut self, kind: ImpactKind, options: HapticOptions);
}

impl<H: Haptics + ?Sized> Haptics for Box<H> {
    fn trigger(&mut self, kind: ImpactKind, options: HapticOptions) {
        (**self).trigger(kind, options);
    }
}

/// Haptics for devices without any.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn trigger(&mut self, _kind: ImpactKind, _options: HapticOptions) {}
}

/// Haptics that only log each pulse.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHaptics;

impl Haptics for LogHaptics {
    fn trigger(&mut self, kind: ImpactKind, options: HapticOptions) {
        debug!(
            %kind,
            fallback = options.enable_vibrate_fallback,
            ignore_settings = options.ignore_system_settings,
            "haptic pulse"
        );
    }
}

/// One recorded pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    /// Intensity class.
    pub kind: ImpactKind,
    /// Delivery options.
    pub options: HapticOptions,
}

/// Haptics that remember every pulse.
#[derive(Debug, Clone, Default)]
pub struct RecordingHaptics {
    pulses: Vec<Pulse>,
}

impl RecordingHaptics {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every pulse fired so far, oldest first.
    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    /// Number of pulses fired so far.
    pub fn count(&self) -> usize {
        self.pulses.len()
    }
}

impl Haptics for RecordingHaptics {
    fn trigger(&mut self, kind: ImpactKind, options: HapticOptions) {
        self.pulses.push(Pulse { kind, options });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_allow_fallback_and_respect_settings() {
        let options = HapticOptions::default();
        assert!(options.enable_vibrate_fallback);
        assert!(!options.ignore_system_settings);
    }

    #[test]
    fn recorder_counts_pulses() {
        let mut haptics = RecordingHaptics::new();
        haptics.trigger(ImpactKind::ImpactLight, HapticOptions::default());
        haptics.trigger(ImpactKind::Rigid, HapticOptions::default());
        assert_eq!(haptics.count(), 2);
        assert_eq!(haptics.pulses()[1].kind, ImpactKind::Rigid);
    }

    #[test]
    fn boxed_haptics_forward() {
        let mut boxed: Box<dyn Haptics> = Box::new(NoHaptics);
        boxed.trigger(ImpactKind::Soft, HapticOptions::default());
        let mut recorder = Box::new(RecordingHaptics::new());
        recorder.trigger(ImpactKind::Soft, HapticOptions::default());
        assert_eq!(recorder.count(), 1);
    }

    #[test]
    fn kind_names_match_platform_identifiers() {
        assert_eq!(ImpactKind::ImpactLight.to_string(), "impactLight");
        let kind: ImpactKind = serde_json::from_str("\"notificationError\"").unwrap();
        assert_eq!(kind, ImpactKind::NotificationError);
    }
}
