//! Midicurve - MIDI event streams to animation keyframe curves
//!
//! This library converts a timestamped stream of MIDI channel events into
//! keyframe curves for driving animation or any other time-varying parameter:
//!
//! - **Beat and bar curves**: step counters plus short pulses at each boundary
//! - **Note curves**: gated velocity per note number
//! - **Controller curves**: held values per controller number
//!
//! Each curve gets a tangent policy matching what it represents before it is
//! handed to the caller.
//!
//! # Examples
//!
//! ```
//! use midicurve::{MidiConverter, MidiEvent};
//!
//! let mut converter = MidiConverter::with_tempo(120.0, 1.0 / 60.0)?;
//!
//! // Advance at the animation frame rate, passing the events of each frame
//! for frame in 0..120 {
//!     let time = frame as f64 / 60.0;
//!     let events = match frame {
//!         30 => vec![MidiEvent::note_on(36, 127), MidiEvent::control_change(1, 64)],
//!         45 => vec![MidiEvent::note_off(36)],
//!         _ => Vec::new(),
//!     };
//!     converter.step(time, &events)?;
//! }
//!
//! let curves = converter.finalize()?;
//! let kick = curves.get_by_name("Note[36]").unwrap();
//! assert_eq!(kick.evaluate(0.5), Some(1.0));
//! // Note keys ramp from the on key down to the off key
//! assert!(kick.evaluate(0.6).unwrap() < 1.0);
//! assert_eq!(kick.evaluate(0.9), Some(0.0));
//! # Ok::<(), midicurve::ConvertError>(())
//! ```

pub mod convert;
pub mod curves;
pub mod error;
pub mod midi;

// Re-export commonly used types at the crate root
pub use convert::{BeatTracker, ConverterConfig, CurveSet, MidiConverter};
pub use curves::{CurveKind, Keyframe, KeyframeCurve, TangentMode};
pub use error::{ConfigError, ConvertError, ParseChannelKeyError};
pub use midi::{ChannelKey, MidiEvent, MidiMessage};
