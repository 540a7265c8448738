//! MIDI event stream to keyframe curve conversion.

use std::collections::BTreeMap;

use crate::curves::KeyframeCurve;
use crate::error::{ConfigError, ConvertError};
use crate::midi::{ChannelKey, MidiEvent, MidiMessage};

use super::beat::BeatTracker;
use super::config::ConverterConfig;
use super::curve_set::CurveSet;

/// Lifecycle of a converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Accepting time steps and events
    Recording,
    /// Curves have been handed out; nothing else is accepted
    Finalized,
}

/// Converts a timestamped stream of MIDI channel events into keyframe curves.
///
/// The converter owns one curve per tracked channel: beat count, beat pulse,
/// bar count, bar pulse, and a lazily created curve per note and per
/// controller index. The caller feeds it time steps in non-decreasing order
/// and calls [`finalize`](Self::finalize) once to apply the tangent policies
/// and take the curves.
///
/// # Ordering
///
/// Time steps must arrive in non-decreasing time order. Out-of-order input is
/// not detected and produces curves whose keys no longer follow the stream.
///
/// # Examples
///
/// ```
/// use midicurve::convert::{ConverterConfig, MidiConverter};
/// use midicurve::curves::TangentMode;
/// use midicurve::midi::{ChannelKey, MidiEvent};
///
/// let mut converter = MidiConverter::new(ConverterConfig::new(120.0, 0.01))?;
///
/// converter.step(1.0, &[MidiEvent::note_on(60, 100)])?;
/// converter.step(1.5, &[MidiEvent::note_off(60)])?;
///
/// let curves = converter.finalize()?;
/// let note = curves.get(ChannelKey::Note(60)).unwrap();
/// assert_eq!(note.len(), 2);
/// assert_eq!(note.key(0).unwrap().right_tangent, TangentMode::Linear);
///
/// // One-shot: the converter refuses further work
/// assert!(converter.finalize().is_err());
/// # Ok::<(), midicurve::ConvertError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MidiConverter {
    config: ConverterConfig,
    beats: BeatTracker,
    notes: BTreeMap<u8, KeyframeCurve>,
    controllers: BTreeMap<u8, KeyframeCurve>,
    state: State,
}

impl MidiConverter {
    /// Creates a converter for one run at a fixed tempo.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any configuration value is non-positive
    /// or not finite.
    pub fn new(config: ConverterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            beats: BeatTracker::new(&config),
            notes: BTreeMap::new(),
            controllers: BTreeMap::new(),
            state: State::Recording,
        })
    }

    /// Shorthand for `MidiConverter::new(ConverterConfig::new(bpm, delta_time))`.
    pub fn with_tempo(bpm: f64, delta_time: f64) -> Result<Self, ConfigError> {
        Self::new(ConverterConfig::new(bpm, delta_time))
    }

    /// The configuration this converter was built with.
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Returns true once [`finalize`](Self::finalize) has handed the curves out.
    ///
    /// # Examples
    ///
    /// ```
    /// use midicurve::MidiConverter;
    ///
    /// let mut converter = MidiConverter::with_tempo(120.0, 0.01)?;
    /// assert!(!converter.is_finalized());
    /// converter.finalize()?;
    /// assert!(converter.is_finalized());
    /// # Ok::<(), midicurve::ConvertError>(())
    /// ```
    pub fn is_finalized(&self) -> bool {
        self.state == State::Finalized
    }

    /// Index of the last recorded beat, or `None` before the first time step.
    pub fn current_beat(&self) -> Option<i64> {
        self.beats.current_beat()
    }

    fn ensure_recording(&self) -> Result<(), ConvertError> {
        match self.state {
            State::Recording => Ok(()),
            State::Finalized => Err(ConvertError::Finalized),
        }
    }

    /// Processes one time step: advances the beat tracker, then writes the
    /// events (if any) at `time`.
    ///
    /// A step with an empty slice is valid and only moves the beat tracker.
    pub fn step(&mut self, time: f64, events: &[MidiEvent]) -> Result<(), ConvertError> {
        self.advance(time)?;
        self.write_events(time, events)
    }

    /// Moves the beat tracker to `time`.
    ///
    /// Returns `true` if a new beat was recorded. Beat boundaries are only
    /// captured at the times passed here.
    pub fn advance(&mut self, time: f64) -> Result<bool, ConvertError> {
        self.ensure_recording()?;
        Ok(self.beats.advance(time))
    }

    /// Routes each event at `time` to its note or controller curve.
    ///
    /// Messages other than note-on, note-off and control change are dropped.
    /// Beat and bar curves are never touched here.
    pub fn write_events(&mut self, time: f64, events: &[MidiEvent]) -> Result<(), ConvertError> {
        self.ensure_recording()?;
        for event in events {
            match event.message() {
                MidiMessage::NoteOn { note, velocity } => self.write_note_on(note, time, velocity),
                MidiMessage::NoteOff { note } => self.write_note_off(note, time),
                MidiMessage::ControlChange { controller, value } => {
                    self.write_controller(controller, time, value)
                }
                MidiMessage::Unsupported(status) => {
                    log::trace!("ignoring status {status:#04x} at {time:.6}s");
                }
            }
        }
        Ok(())
    }

    /// Writes a note-on key: velocity 0-127 scaled to 0.0-1.0.
    ///
    /// Always appends; note keys are never coalesced.
    pub fn note_on(&mut self, note: u8, time: f64, velocity: u8) -> Result<(), ConvertError> {
        self.ensure_recording()?;
        self.write_note_on(note & 0x7F, time, velocity & 0x7F);
        Ok(())
    }

    /// Writes a zero key one `delta_time` before `time`.
    ///
    /// A note-off without a preceding note-on still writes its key.
    pub fn note_off(&mut self, note: u8, time: f64) -> Result<(), ConvertError> {
        self.ensure_recording()?;
        self.write_note_off(note & 0x7F, time);
        Ok(())
    }

    /// Writes a controller value, replacing the last key instead when it sits
    /// at (nearly) the same time.
    pub fn controller_change(
        &mut self,
        controller: u8,
        time: f64,
        value: u8,
    ) -> Result<(), ConvertError> {
        self.ensure_recording()?;
        self.write_controller(controller & 0x7F, time, value & 0x7F);
        Ok(())
    }

    fn write_note_on(&mut self, note: u8, time: f64, velocity: u8) {
        let value = f64::from(velocity) / 127.0;
        self.notes.entry(note).or_default().add_key(time, value);
    }

    fn write_note_off(&mut self, note: u8, time: f64) {
        let off_time = time - self.config.delta_time;
        self.notes.entry(note).or_default().add_key(off_time, 0.0);
    }

    fn write_controller(&mut self, controller: u8, time: f64, value: u8) {
        let tolerance = self.config.key_tolerance;
        self.controllers
            .entry(controller)
            .or_default()
            .set_or_add_key(time, f64::from(value), tolerance);
    }

    /// Returns the curve recorded so far for `key`, before any tangent policy.
    pub fn curve(&self, key: ChannelKey) -> Option<&KeyframeCurve> {
        match key {
            ChannelKey::BeatCount => Some(self.beats.beat_count()),
            ChannelKey::BeatClock => Some(self.beats.beat_clock()),
            ChannelKey::BarCount => Some(self.beats.bar_count()),
            ChannelKey::BarClock => Some(self.beats.bar_clock()),
            ChannelKey::Note(index) => self.notes.get(&index),
            ChannelKey::Cc(index) => self.controllers.get(&index),
        }
    }

    /// Applies each channel's tangent policy and hands the curves over.
    ///
    /// Runs once. Every later call to this or any mutating method returns
    /// [`ConvertError::Finalized`].
    pub fn finalize(&mut self) -> Result<CurveSet, ConvertError> {
        self.ensure_recording()?;
        self.state = State::Finalized;

        let [beat_count, beat_clock, bar_count, bar_clock] = self.beats.take_curves();
        let beat_curves = [
            (ChannelKey::BeatCount, beat_count),
            (ChannelKey::BeatClock, beat_clock),
            (ChannelKey::BarCount, bar_count),
            (ChannelKey::BarClock, bar_clock),
        ];
        let notes = std::mem::take(&mut self.notes)
            .into_iter()
            .map(|(index, curve)| (ChannelKey::Note(index), curve));
        let controllers = std::mem::take(&mut self.controllers)
            .into_iter()
            .map(|(index, curve)| (ChannelKey::Cc(index), curve));

        let mut set = CurveSet::default();
        for (key, mut curve) in beat_curves.into_iter().chain(notes).chain(controllers) {
            curve.apply(key.kind());
            set.insert(key, curve);
        }

        log::debug!(
            "finalized {} curves with {} keys",
            set.len(),
            set.key_count()
        );
        Ok(set)
    }
}
