//! Die roll sequencer and presentation model for Tumble.
//!
//! A [`DiceWidget`] owns an animation [`Driver`](tumble_anim::Driver), a
//! [`DieRoller`] that launches the spin, bounce and flicker tracks of a roll,
//! and the [`PressFeedback`] of the roll button. Front ends advance the
//! widget once per frame and draw its [`DiceView`].

/// Roll and button configuration.
pub mod config;
pub mod error;
/// Roll lifecycle events and the bounded roll log.
pub mod event;
pub mod face;
pub mod haptics;
/// Press scale of the roll button.
pub mod press;
/// The roll sequencer.
pub mod roller;
pub mod view;
/// The widget tying driver, roller and button together.
pub mod widget;

pub use config::{ButtonConfig, RollConfig};
pub use error::{RollError, RollResult};
pub use event::{RollEvent, RollEventKind, RollId, RollLog};
pub use face::Face;
pub use haptics::{HapticOptions, Haptics, ImpactKind, LogHaptics, NoHaptics, Pulse, RecordingHaptics};
pub use press::PressFeedback;
pub use roller::{DieRoller, RollAttempt, Tracks};
pub use view::{ButtonView, DiceView, DieTransform, ROLL_LABEL, ROLLING_LABEL};
pub use widget::DiceWidget;
