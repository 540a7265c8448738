//! MIDI input types: raw channel events and the channel keys of output curves.

mod channel;
mod event;

pub use channel::ChannelKey;
pub use event::{CONTROL_CHANGE, MidiEvent, MidiMessage, NOTE_OFF, NOTE_ON};
