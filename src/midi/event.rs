//! Pre-decoded MIDI channel events.

/// Status nibble of a note-off message.
pub const NOTE_OFF: u8 = 0x80;
/// Status nibble of a note-on message.
pub const NOTE_ON: u8 = 0x90;
/// Status nibble of a control change message.
pub const CONTROL_CHANGE: u8 = 0xB0;

/// A raw channel message: one status byte and two data bytes.
///
/// Decoding the byte stream into these triples happens upstream; the
/// converter only classifies them.
///
/// # Examples
///
/// ```
/// use midicurve::midi::{MidiEvent, MidiMessage};
///
/// let event = MidiEvent::new(0x93, 60, 100);
/// assert_eq!(event.channel(), 3);
/// assert_eq!(event.message(), MidiMessage::NoteOn { note: 60, velocity: 100 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MidiEvent {
    /// Status byte (message kind in the high nibble, channel in the low nibble)
    pub status: u8,
    /// First data byte (note or controller number)
    pub data1: u8,
    /// Second data byte (velocity or controller value)
    pub data2: u8,
}

impl MidiEvent {
    /// Create an event from its raw status and data bytes
    #[inline]
    pub fn new(status: u8, data1: u8, data2: u8) -> Self {
        Self {
            status,
            data1,
            data2,
        }
    }

    /// Create a note on event on channel 0
    #[inline]
    pub fn note_on(note: u8, velocity: u8) -> Self {
        Self::new(NOTE_ON, note, velocity)
    }

    /// Create a note off event on channel 0
    #[inline]
    pub fn note_off(note: u8) -> Self {
        Self::new(NOTE_OFF, note, 0)
    }

    /// Create a control change event on channel 0
    #[inline]
    pub fn control_change(controller: u8, value: u8) -> Self {
        Self::new(CONTROL_CHANGE, controller, value)
    }

    /// Returns a copy of this event moved to `channel` (0-15).
    #[inline]
    pub fn on_channel(self, channel: u8) -> Self {
        Self {
            status: (self.status & 0xF0) | (channel & 0x0F),
            ..self
        }
    }

    /// MIDI channel (0-15) from the low nibble of the status byte.
    #[inline]
    pub fn channel(&self) -> u8 {
        self.status & 0x0F
    }

    /// Classifies the event by its status nibble.
    ///
    /// Data bytes are masked to 7 bits. Note-on with velocity 0 stays a
    /// note-on and writes a zero-valued key.
    pub fn message(&self) -> MidiMessage {
        let data1 = self.data1 & 0x7F;
        let data2 = self.data2 & 0x7F;

        match self.status & 0xF0 {
            NOTE_ON => MidiMessage::NoteOn {
                note: data1,
                velocity: data2,
            },
            NOTE_OFF => MidiMessage::NoteOff { note: data1 },
            CONTROL_CHANGE => MidiMessage::ControlChange {
                controller: data1,
                value: data2,
            },
            _ => MidiMessage::Unsupported(self.status),
        }
    }
}

/// Classified view of a [`MidiEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage {
    NoteOn {
        /// MIDI note number (0-127)
        note: u8,
        /// Velocity (0-127)
        velocity: u8,
    },
    NoteOff {
        /// MIDI note number (0-127)
        note: u8,
    },
    ControlChange {
        /// Controller number (0-127)
        controller: u8,
        /// Controller value (0-127)
        value: u8,
    },
    /// Any other status; carries the raw status byte
    Unsupported(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(MidiEvent::note_on(60, 100), MidiEvent::new(0x90, 60, 100));
        assert_eq!(MidiEvent::note_off(60), MidiEvent::new(0x80, 60, 0));
        assert_eq!(MidiEvent::control_change(7, 64), MidiEvent::new(0xB0, 7, 64));
    }

    #[test]
    fn test_channel_is_ignored_for_classification() {
        let event = MidiEvent::control_change(1, 2).on_channel(15);
        assert_eq!(event.status, 0xBF);
        assert_eq!(event.channel(), 15);
        assert_eq!(
            event.message(),
            MidiMessage::ControlChange {
                controller: 1,
                value: 2
            }
        );
    }

    #[test]
    fn test_note_off_ignores_velocity() {
        assert_eq!(
            MidiEvent::new(0x85, 42, 99).message(),
            MidiMessage::NoteOff { note: 42 }
        );
    }

    #[test]
    fn test_unsupported_status() {
        // Pitch bend and program change are dropped by the converter
        assert_eq!(
            MidiEvent::new(0xE0, 0, 64).message(),
            MidiMessage::Unsupported(0xE0)
        );
        assert_eq!(
            MidiEvent::new(0xC2, 5, 0).message(),
            MidiMessage::Unsupported(0xC2)
        );
    }

    #[test]
    fn test_data_bytes_masked() {
        assert_eq!(
            MidiEvent::new(0x90, 0xFF, 0x80).message(),
            MidiMessage::NoteOn {
                note: 127,
                velocity: 0
            }
        );
    }
}
