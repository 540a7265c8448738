//! The event-to-curve conversion engine.
//!
//! A [`MidiConverter`] combines a [`BeatTracker`] (beat and bar curves) with
//! per-note and per-controller curves, and on finalize hands out a
//! [`CurveSet`] with every curve's tangent policy applied.

mod beat;
mod config;
mod converter;
mod curve_set;

pub use beat::BeatTracker;
pub use config::{ConverterConfig, DEFAULT_BEATS_PER_BAR, DEFAULT_KEY_TOLERANCE};
pub use converter::MidiConverter;
pub use curve_set::CurveSet;
