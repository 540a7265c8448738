use midicurve::{ChannelKey, ConvertError, MidiConverter, MidiEvent, TangentMode};

const EPSILON: f64 = 1e-9;

fn pairs(curve: &midicurve::KeyframeCurve) -> Vec<(f64, f64)> {
    curve.iter().map(|k| (k.time, k.value)).collect()
}

fn assert_pairs(actual: &[(f64, f64)], expected: &[(f64, f64)]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for ((t, v), (et, ev)) in actual.iter().zip(expected) {
        assert!((t - et).abs() < EPSILON, "time {t} != {et}");
        assert!((v - ev).abs() < EPSILON, "value {v} != {ev}");
    }
}

#[test]
fn test_note_on_then_off() -> Result<(), ConvertError> {
    let mut converter = MidiConverter::with_tempo(120.0, 0.01)?;
    converter.step(1.0, &[MidiEvent::note_on(60, 100)])?;
    converter.step(1.5, &[MidiEvent::note_off(60)])?;
    let curves = converter.finalize()?;

    let note = curves.get(ChannelKey::Note(60)).unwrap();
    assert_pairs(&pairs(note), &[(1.0, 100.0 / 127.0), (1.49, 0.0)]);
    assert!((note.key(0).unwrap().value - 0.787).abs() < 1e-3);
    assert_eq!(
        note.key(0).unwrap().tangents(),
        (TangentMode::Constant, TangentMode::Linear)
    );
    assert_eq!(
        note.key(1).unwrap().tangents(),
        (TangentMode::Linear, TangentMode::Constant)
    );
    Ok(())
}

#[test]
fn test_beats_without_events() -> Result<(), ConvertError> {
    let mut converter = MidiConverter::with_tempo(120.0, 0.01)?;
    for time in [0.0, 0.5, 1.0, 1.5] {
        converter.step(time, &[])?;
    }
    let curves = converter.finalize()?;

    assert_pairs(
        &pairs(curves.get(ChannelKey::BeatCount).unwrap()),
        &[(0.0, 0.0), (0.5, 1.0), (1.0, 2.0), (1.5, 3.0)],
    );
    // Only beat 0 starts a bar in this range
    assert_pairs(
        &pairs(curves.get(ChannelKey::BarCount).unwrap()),
        &[(0.0, 0.0)],
    );
    assert_pairs(
        &pairs(curves.get(ChannelKey::BarClock).unwrap()),
        &[(0.0, 0.0)],
    );
    assert_pairs(
        &pairs(curves.get(ChannelKey::BeatClock).unwrap()),
        &[
            (0.0, 0.0),
            (0.49, 1.0),
            (0.5, 0.0),
            (0.99, 1.0),
            (1.0, 0.0),
            (1.49, 1.0),
            (1.5, 0.0),
        ],
    );
    Ok(())
}

#[test]
fn test_fifth_beat_starts_second_bar() -> Result<(), ConvertError> {
    let mut converter = MidiConverter::with_tempo(120.0, 0.01)?;
    for time in [0.0, 0.5, 1.0, 1.5, 2.0] {
        converter.step(time, &[])?;
    }
    let curves = converter.finalize()?;

    assert_pairs(
        &pairs(curves.get(ChannelKey::BarCount).unwrap()),
        &[(0.0, 0.0), (2.0, 1.0)],
    );
    assert_pairs(
        &pairs(curves.get(ChannelKey::BarClock).unwrap()),
        &[(0.0, 0.0), (1.99, 1.0), (2.0, 0.0)],
    );
    Ok(())
}

#[test]
fn test_first_step_seeds_beat_zero_at_any_time() -> Result<(), ConvertError> {
    let mut converter = MidiConverter::with_tempo(120.0, 0.01)?;
    converter.step(0.3, &[])?;
    let curves = converter.finalize()?;
    assert_pairs(
        &pairs(curves.get(ChannelKey::BeatCount).unwrap()),
        &[(0.3, 0.0)],
    );
    Ok(())
}

#[test]
fn test_controller_events_coalesce() -> Result<(), ConvertError> {
    let mut converter = MidiConverter::with_tempo(120.0, 0.01)?;
    converter.step(
        1.0,
        &[MidiEvent::control_change(10, 30), MidiEvent::control_change(10, 90)],
    )?;
    converter.step(1.0 + 1e-9, &[MidiEvent::control_change(10, 100)])?;
    converter.step(2.0, &[MidiEvent::control_change(10, 0)])?;
    let curves = converter.finalize()?;

    let cc = curves.get_by_name("CC[10]").unwrap();
    assert_pairs(&pairs(cc), &[(1.0, 100.0), (2.0, 0.0)]);
    assert!(cc.iter().all(|k| k.tangents() == (TangentMode::Constant, TangentMode::Constant)));
    // Held until the next update
    assert_eq!(cc.evaluate(1.99), Some(100.0));
    Ok(())
}

#[test]
fn test_note_retrigger_draws_a_gap() -> Result<(), ConvertError> {
    let mut converter = MidiConverter::with_tempo(120.0, 0.01)?;
    converter.step(1.0, &[MidiEvent::note_on(40, 127)])?;
    // Off and on at the same instant: the off key lands a quantum earlier
    converter.step(2.0, &[MidiEvent::note_off(40), MidiEvent::note_on(40, 127)])?;
    let curves = converter.finalize()?;

    let note = curves.get(ChannelKey::Note(40)).unwrap();
    assert_pairs(&pairs(note), &[(1.0, 1.0), (1.99, 0.0), (2.0, 1.0)]);
    assert_eq!(note.evaluate(2.0), Some(1.0));
    assert!(note.evaluate(1.995).unwrap() < 1e-9);
    Ok(())
}

#[test]
fn test_note_off_without_note_on() -> Result<(), ConvertError> {
    let mut converter = MidiConverter::with_tempo(120.0, 0.01)?;
    converter.step(3.0, &[MidiEvent::note_off(99).on_channel(9)])?;
    let curves = converter.finalize()?;
    assert_pairs(
        &pairs(curves.get(ChannelKey::Note(99)).unwrap()),
        &[(2.99, 0.0)],
    );
    Ok(())
}

#[test]
fn test_only_touched_channels_present() -> Result<(), ConvertError> {
    let mut converter = MidiConverter::with_tempo(90.0, 0.02)?;
    converter.step(0.0, &[MidiEvent::note_on(1, 64), MidiEvent::new(0xE0, 0, 64)])?;
    converter.step(0.1, &[MidiEvent::control_change(74, 12)])?;
    let curves = converter.finalize()?;

    let names: Vec<String> = curves.channels().map(|c| c.to_string()).collect();
    assert_eq!(
        names,
        vec!["BeatCount", "BeatClock", "BarCount", "BarClock", "Note[1]", "CC[74]"]
    );
    Ok(())
}

#[test]
fn test_beat_clock_shape() -> Result<(), ConvertError> {
    let mut converter = MidiConverter::with_tempo(60.0, 0.1)?;
    for frame in 0..=20 {
        converter.step(frame as f64 * 0.1, &[])?;
    }
    let curves = converter.finalize()?;
    let clock = curves.get(ChannelKey::BeatClock).unwrap();

    // Ramps up across the beat, holds high for one quantum, drops on the boundary
    assert!((clock.evaluate(0.45).unwrap() - 0.5).abs() < EPSILON);
    assert_eq!(clock.evaluate(0.95), Some(1.0));
    assert_eq!(clock.evaluate(1.0), Some(0.0));

    // The beat counter is a step function
    let count = curves.get(ChannelKey::BeatCount).unwrap();
    assert_eq!(count.evaluate(0.99), Some(0.0));
    assert_eq!(count.evaluate(1.5), Some(1.0));
    Ok(())
}
