//! Converts a short drum groove into curves and prints them as JSON.
//!
//! Run with `RUST_LOG=debug` to see beat boundaries as they are recorded.

use anyhow::Result;
use midicurve::{ChannelKey, MidiConverter, MidiEvent};

const FRAME_RATE: f64 = 60.0;
const BPM: f64 = 120.0;

const KICK: u8 = 36;
const SNARE: u8 = 38;
const CUTOFF: u8 = 74;

fn main() -> Result<()> {
    env_logger::init();

    let mut converter = MidiConverter::with_tempo(BPM, 1.0 / FRAME_RATE)?;

    // Two bars at 30 frames per beat
    for frame in 0..240 {
        let time = frame as f64 / FRAME_RATE;
        let mut events = Vec::new();

        match frame % 60 {
            0 => events.push(MidiEvent::note_on(KICK, 120)),
            10 => events.push(MidiEvent::note_off(KICK)),
            30 => events.push(MidiEvent::note_on(SNARE, 90).on_channel(9)),
            40 => events.push(MidiEvent::note_off(SNARE).on_channel(9)),
            _ => {}
        }
        if frame % 15 == 0 {
            events.push(MidiEvent::control_change(CUTOFF, (frame / 2) as u8));
        }

        converter.step(time, &events)?;
    }

    let curves = converter.finalize()?;

    eprintln!("{} curves, {} keys", curves.len(), curves.key_count());
    if let Some(bars) = curves.get(ChannelKey::BarCount) {
        eprintln!("bars at: {:?}", bars.iter().map(|k| k.time).collect::<Vec<_>>());
    }

    println!("{}", serde_json::to_string_pretty(&curves)?);
    Ok(())
}
