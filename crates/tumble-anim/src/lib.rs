//! Frame-driven animation driver for Tumble.
//!
//! Animated values live inside a [`Driver`]. Callers describe motion as
//! [`Animation`] trees (timed curves, springs, delays, sequences and
//! parallel groups), start them, and advance the driver once per frame.
//! Completion is reported as [`DriverEvent`]s rather than callbacks, so the
//! caller decides what happens when a group joins or a timer fires.

/// Declarative animations and their runners.
pub mod animation;
/// Monotonic frame clock.
pub mod clock;
/// The driver that owns values, animations and timers.
pub mod driver;
/// Easing curves.
pub mod easing;
/// Error types for the animation crate.
pub mod error;
/// Events reported by the driver.
pub mod event;
/// Value-to-value interpolation.
pub mod interpolate;
/// Spring physics.
pub mod spring;

/// Re-export of [`animation::Animation`].
pub use animation::Animation;
/// Re-export of [`clock::FrameClock`].
pub use clock::FrameClock;
/// Re-exports of the driver and its handles.
pub use driver::{AnimationId, Driver, TimerId, ValueId};
/// Re-export of [`easing::Easing`].
pub use easing::Easing;
/// Re-exports of [`error::AnimError`] and [`error::AnimResult`].
pub use error::{AnimError, AnimResult};
/// Re-export of [`event::DriverEvent`].
pub use event::DriverEvent;
/// Re-exports of [`interpolate::Interpolation`] and [`interpolate::Extrapolate`].
pub use interpolate::{Extrapolate, Interpolation};
/// Re-exports of [`spring::SpringConfig`] and [`spring::SpringMotion`].
pub use spring::{SpringConfig, SpringMotion};
