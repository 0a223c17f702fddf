//! Screen shake standing in for a haptic engine.

use tracing::debug;
use tumble_core::{HapticOptions, Haptics, ImpactKind};

/// How long one shake lasts, in seconds.
const SHAKE_SECS: f32 = 0.18;
/// Shakes per second.
const SHAKE_HZ: f32 = 38.0;

/// Haptics rendered as a short, decaying horizontal shake of the canvas.
#[derive(Debug, Clone, Default)]
pub struct ShakeHaptics {
    remaining: f32,
    amplitude: f32,
    pulses: u32,
}

impl ShakeHaptics {
    /// Create a resting shaker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Let `dt` seconds of the shake pass.
    pub fn update(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    /// Current horizontal offset in canvas pixels.
    pub fn offset(&self) -> f32 {
        if self.remaining <= 0.0 {
            return 0.0;
        }
        let elapsed = SHAKE_SECS - self.remaining;
        let decay = self.remaining / SHAKE_SECS;
        self.amplitude * decay * (elapsed * SHAKE_HZ * std::f32::consts::TAU).sin()
    }

    /// Whether a shake is in progress.
    pub fn is_shaking(&self) -> bool {
        self.remaining > 0.0
    }

    /// Pulses received so far.
    pub fn pulses(&self) -> u32 {
        self.pulses
    }
}

/// Shake amplitude in canvas pixels for a pulse kind.
fn amplitude(kind: ImpactKind) -> f32 {
    match kind {
        ImpactKind::Selection | ImpactKind::Soft => 1.0,
        ImpactKind::ImpactLight => 2.0,
        ImpactKind::ImpactMedium | ImpactKind::NotificationSuccess => 3.0,
        ImpactKind::Rigid | ImpactKind::NotificationWarning => 4.0,
        ImpactKind::ImpactHeavy | ImpactKind::NotificationError => 5.0,
    }
}

impl Haptics for ShakeHaptics {
    fn trigger(&mut self, kind: ImpactKind, options: HapticOptions) {
        self.pulses += 1;
        if !options.enable_vibrate_fallback {
            debug!(%kind, "no haptic engine and fallback disabled");
            return;
        }
        debug!(%kind, "haptic pulse rendered as shake");
        self.remaining = SHAKE_SECS;
        self.amplitude = amplitude(kind);
    }
}
