//! Error types for curve conversion.

use thiserror::Error;

/// A converter configuration value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("tempo must be a finite number of beats per minute greater than 0, got {0}")]
    InvalidTempo(f64),

    #[error("delta time must be a finite number of seconds greater than 0, got {0}")]
    InvalidDeltaTime(f64),

    #[error("key tolerance must be finite and greater than 0, got {0}")]
    InvalidTolerance(f64),

    #[error("a bar must contain at least one beat")]
    InvalidBeatsPerBar,
}

/// Errors raised by [`MidiConverter`](crate::convert::MidiConverter).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The converter already handed its curves out.
    #[error("the converter has already been finalized")]
    Finalized,
}

/// A channel name could not be parsed into a [`ChannelKey`](crate::midi::ChannelKey).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseChannelKeyError {
    #[error("unknown channel name '{0}'")]
    UnknownChannel(String),

    #[error("channel index '{0}' must be an integer between 0 and 127, inclusive")]
    InvalidIndex(String),
}
