//! End-to-end translation from raw APC40 bytes to the events sent downstream.

use apc_bridge_core::{Bridge, Direction, MidiEvent, Translator};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn run(messages: &[[u8; 3]]) -> Vec<MidiEvent> {
    init_logger();
    let mut bridge = Bridge::new(Vec::new()).with_event_log(true);
    for message in messages {
        bridge.handle_message(message).unwrap();
    }
    bridge.into_sink()
}

#[test]
fn test_pads_pass_through_byte_identical() {
    let messages = [[0x90, 53, 127], [0x80, 53, 127], [0x95, 82, 0]];
    let sent = run(&messages);

    let bytes: Vec<[u8; 3]> = sent.iter().map(MidiEvent::to_bytes).collect();
    assert_eq!(bytes, messages);
}

#[test]
fn test_jog_wheel_sequence() {
    // Cue level: 1 is a clockwise tick, 127 counter-clockwise
    let sent = run(&[[0xB0, 47, 1], [0xB0, 47, 127]]);
    assert_eq!(
        sent,
        vec![
            MidiEvent::note_on(0, 1, 127),
            MidiEvent::note_off(0, 0, 127),
            MidiEvent::note_on(0, 0, 127),
            MidiEvent::note_off(0, 1, 127),
        ]
    );
}

#[test]
fn test_encoder_turn_then_track_switch() {
    // Device control knob 1 turned up on track 1, then the same knob on track 2.
    let sent = run(&[[0xB0, 16, 50], [0xB0, 16, 51], [0xB1, 16, 60]]);
    assert_eq!(
        sent,
        vec![
            MidiEvent::note_on(0, 24, 127),
            MidiEvent::note_off(0, 25, 127),
            MidiEvent::note_on(0, 16, 50),
            MidiEvent::note_on(0, 25, 127),
            MidiEvent::note_off(0, 24, 127),
            MidiEvent::note_on(0, 16, 51),
            MidiEvent::note_on(1, 16, 60),
        ]
    );
}

#[test]
fn test_track_encoder_brackets_pulse() {
    let sent = run(&[[0xB0, 48, 10]]);
    assert_eq!(
        sent,
        vec![
            MidiEvent::note_on(0, 48, 10),
            MidiEvent::note_on(0, 66, 127),
            MidiEvent::note_off(0, 67, 127),
            MidiEvent::note_on(0, 48, 10),
        ]
    );
}

#[test]
fn test_fader_becomes_note() {
    let sent = run(&[[0xB3, 7, 100], [0xB3, 14, 0]]);
    assert_eq!(
        sent,
        vec![MidiEvent::note_on(3, 7, 100), MidiEvent::note_on(3, 14, 0)]
    );
}

#[test]
fn test_non_channel_messages_are_dropped() {
    init_logger();
    let mut bridge = Bridge::new(Vec::new());
    bridge
        .handle_message(&[0xF0, 0x47, 0x00, 0x73, 0x60, 0x00, 0x04, 0x41, 0x08, 0x04, 0x01, 0xF7])
        .unwrap();
    bridge.handle_message(&[0xF8]).unwrap();
    bridge.handle_message(&[0xB0, 16, 50]).unwrap();

    let stats = bridge.stats();
    assert_eq!(stats.ignored, 2);
    assert_eq!(stats.received, 1);
    assert_eq!(stats.emitted, 3);
}

#[test]
fn test_repeated_value_counts_as_ccw_for_both_banks() {
    let mut translator = Translator::new();
    for controller in (16..=23).chain(48..=55) {
        for value in [90, 10, 10] {
            translator.process(MidiEvent::control_change(0, controller, value));
        }
        let out = translator.process(MidiEvent::control_change(0, controller, 10));
        assert_eq!(out.direction(), Some(Direction::CounterClockwise));
    }
}

#[test]
fn test_history_is_per_controller() {
    let mut translator = Translator::new();
    translator.process(MidiEvent::control_change(0, 16, 100));

    for controller in 0..=127u8 {
        if controller == 16 {
            continue;
        }
        translator.process(MidiEvent::control_change(5, controller, 3));
    }

    let state = translator.controller_state(16).copied().unwrap();
    assert_eq!(state.last_value, 100);
    assert_eq!(state.last_channel, Some(0));

    let out = translator.process(MidiEvent::control_change(0, 16, 101));
    assert_eq!(out.direction(), Some(Direction::Clockwise));
}
