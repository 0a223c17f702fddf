//! Error types for the animation driver.

use crate::driver::ValueId;

/// Convenience result type for animation operations.
pub type AnimResult<T> = Result<T, AnimError>;

/// Errors that can occur while building or driving animations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnimError {
    /// An animation or `set_value` referenced a value the driver does not own.
    #[error("unknown animated value: {0}")]
    UnknownValue(ValueId),

    /// Spring parameters produce a spring that never comes to rest.
    #[error("invalid spring: {0}")]
    InvalidSpring(String),

    /// Interpolation ranges are malformed.
    #[error("invalid interpolation: {0}")]
    InvalidInterpolation(String),

    /// A duration or frame delta was negative or not finite.
    #[error("invalid duration: {0} ms")]
    InvalidDuration(f64),
}
