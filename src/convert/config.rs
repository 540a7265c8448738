//! Converter configuration.

use crate::error::ConfigError;

/// Relative tolerance under which two controller keys count as the same instant.
pub const DEFAULT_KEY_TOLERANCE: f64 = 1e-6;

/// Beats grouped into one bar when no other value is configured.
pub const DEFAULT_BEATS_PER_BAR: u32 = 4;

/// Fixed parameters of one conversion run.
///
/// # Examples
///
/// ```
/// use midicurve::convert::ConverterConfig;
///
/// let config = ConverterConfig::new(120.0, 0.01).with_beats_per_bar(3);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.seconds_per_beat(), 0.5);
///
/// assert!(ConverterConfig::new(0.0, 0.01).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConverterConfig {
    /// Tempo in beats per minute, fixed for the run
    pub bpm: f64,
    /// Quantum in seconds separating an "off" key from the "on" key after it
    pub delta_time: f64,
    /// Relative tolerance for coalescing controller keys
    pub key_tolerance: f64,
    /// Number of beats in one bar
    pub beats_per_bar: u32,
}

impl ConverterConfig {
    /// Creates a configuration with the default key tolerance and 4 beats per bar.
    ///
    /// Values are not checked here; see [`validate`](Self::validate).
    pub fn new(bpm: f64, delta_time: f64) -> Self {
        Self {
            bpm,
            delta_time,
            key_tolerance: DEFAULT_KEY_TOLERANCE,
            beats_per_bar: DEFAULT_BEATS_PER_BAR,
        }
    }

    /// Sets the relative tolerance under which controller keys coalesce.
    ///
    /// # Examples
    ///
    /// ```
    /// use midicurve::convert::ConverterConfig;
    ///
    /// let config = ConverterConfig::new(120.0, 0.01).with_key_tolerance(1e-3);
    /// assert_eq!(config.key_tolerance, 1e-3);
    /// ```
    pub fn with_key_tolerance(mut self, key_tolerance: f64) -> Self {
        self.key_tolerance = key_tolerance;
        self
    }

    /// Sets how many beats make up one bar.
    pub fn with_beats_per_bar(mut self, beats_per_bar: u32) -> Self {
        self.beats_per_bar = beats_per_bar;
        self
    }

    /// Checks that every value is finite and positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.bpm.is_finite() && self.bpm > 0.0) {
            return Err(ConfigError::InvalidTempo(self.bpm));
        }
        if !(self.delta_time.is_finite() && self.delta_time > 0.0) {
            return Err(ConfigError::InvalidDeltaTime(self.delta_time));
        }
        if !(self.key_tolerance.is_finite() && self.key_tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance(self.key_tolerance));
        }
        if self.beats_per_bar == 0 {
            return Err(ConfigError::InvalidBeatsPerBar);
        }
        Ok(())
    }

    /// Length of one beat in seconds.
    pub fn seconds_per_beat(&self) -> f64 {
        60.0 / self.bpm
    }
}
