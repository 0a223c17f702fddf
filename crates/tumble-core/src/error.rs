//! Error types for the roll sequencer.

use tumble_anim::AnimError;

/// Errors that can occur while configuring or building a die widget.
#[derive(Debug, thiserror::Error)]
pub enum RollError {
    /// The roll or button configuration is inconsistent.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The animation driver rejected an animation.
    #[error(transparent)]
    Anim(#[from] AnimError),

    /// A configuration file could not be read.
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file is not valid JSON for [`crate::RollConfig`].
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience result type for sequencer operations.
pub type RollResult<T> = Result<T, RollError>;
