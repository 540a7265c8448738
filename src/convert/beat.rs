//! Beat and bar tracking.
//!
//! The `BeatTracker` turns a continuous time cursor into discrete beat and bar
//! boundaries and records four curves: a counter and a pulse for each.

use crate::curves::KeyframeCurve;

use super::config::ConverterConfig;

/// Derives beat and bar boundaries from the caller's time cursor.
///
/// The tracker only reacts to the times it is given: advancing in large jumps
/// skips the beats in between. The first call always registers a beat, even
/// at `time = 0`, so every run starts with a `(time, 0)` count key.
///
/// # Pulse shape
///
/// For every beat after the first, the pulse curve gets a high key one
/// `delta_time` before the boundary and a low key on the boundary. The first
/// beat only writes the low key, since there is no earlier pulse to close.
///
/// # Examples
///
/// ```
/// use midicurve::convert::{BeatTracker, ConverterConfig};
///
/// // 120 BPM = 2 beats per second
/// let mut tracker = BeatTracker::new(&ConverterConfig::new(120.0, 0.01));
///
/// assert!(tracker.advance(0.0));
/// assert!(!tracker.advance(0.25)); // still beat 0
/// assert!(tracker.advance(0.5));
///
/// assert_eq!(tracker.current_beat(), Some(1));
/// assert_eq!(tracker.beat_count().len(), 2);
/// assert_eq!(tracker.beat_clock().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct BeatTracker {
    bpm: f64,
    delta_time: f64,
    beats_per_bar: i64,
    /// Last beat index seen; `None` until the first advance
    beat: Option<i64>,
    beat_count: KeyframeCurve,
    beat_clock: KeyframeCurve,
    bar_count: KeyframeCurve,
    bar_clock: KeyframeCurve,
}

impl BeatTracker {
    /// Creates a tracker with empty curves.
    pub fn new(config: &ConverterConfig) -> Self {
        Self {
            bpm: config.bpm,
            delta_time: config.delta_time,
            beats_per_bar: i64::from(config.beats_per_bar.max(1)),
            beat: None,
            beat_count: KeyframeCurve::new(),
            beat_clock: KeyframeCurve::new(),
            bar_count: KeyframeCurve::new(),
            bar_clock: KeyframeCurve::new(),
        }
    }

    /// Beat index containing `time`.
    pub fn beat_at(&self, time: f64) -> i64 {
        (self.bpm * time / 60.0).floor() as i64
    }

    /// Moves the cursor to `time`, writing keys if a new beat was entered.
    ///
    /// Returns `true` if a beat boundary was recorded. Calling again within
    /// the same beat does nothing.
    pub fn advance(&mut self, time: f64) -> bool {
        let beat = self.beat_at(time);
        if self.beat == Some(beat) {
            return false;
        }
        self.beat = Some(beat);

        self.beat_count.add_key(time, beat as f64);
        Self::write_pulse(&mut self.beat_clock, beat, time, self.delta_time);

        let on_bar = beat % self.beats_per_bar == 0;
        if on_bar {
            self.bar_count
                .add_key(time, (beat / self.beats_per_bar) as f64);
            Self::write_pulse(&mut self.bar_clock, beat, time, self.delta_time);
        }

        log::debug!(
            "beat {beat} at {time:.6}s{}",
            if on_bar { " (bar start)" } else { "" }
        );
        true
    }

    fn write_pulse(curve: &mut KeyframeCurve, beat: i64, time: f64, delta_time: f64) {
        if beat > 0 {
            curve.add_key(time - delta_time, 1.0);
        }
        curve.add_key(time, 0.0);
    }

    /// Index of the last recorded beat, or `None` before the first advance.
    pub fn current_beat(&self) -> Option<i64> {
        self.beat
    }

    /// Beat index at each recorded beat boundary.
    ///
    /// # Examples
    ///
    /// ```
    /// use midicurve::convert::{BeatTracker, ConverterConfig};
    ///
    /// let mut tracker = BeatTracker::new(&ConverterConfig::new(60.0, 0.01));
    /// tracker.advance(0.0);
    /// tracker.advance(2.0);
    ///
    /// let values: Vec<f64> = tracker.beat_count().iter().map(|k| k.value).collect();
    /// assert_eq!(values, vec![0.0, 2.0]);
    /// ```
    pub fn beat_count(&self) -> &KeyframeCurve {
        &self.beat_count
    }

    /// Pulse keys: high one quantum before each beat, low on the beat.
    pub fn beat_clock(&self) -> &KeyframeCurve {
        &self.beat_clock
    }

    /// Bar index at each beat that starts a bar.
    pub fn bar_count(&self) -> &KeyframeCurve {
        &self.bar_count
    }

    /// Pulse keys for bar starts, shaped like [`beat_clock`](Self::beat_clock).
    pub fn bar_clock(&self) -> &KeyframeCurve {
        &self.bar_clock
    }

    /// Moves the four curves out as `[beat count, beat clock, bar count, bar clock]`,
    /// leaving empty curves behind.
    pub(crate) fn take_curves(&mut self) -> [KeyframeCurve; 4] {
        [
            std::mem::take(&mut self.beat_count),
            std::mem::take(&mut self.beat_clock),
            std::mem::take(&mut self.bar_count),
            std::mem::take(&mut self.bar_clock),
        ]
    }
}
