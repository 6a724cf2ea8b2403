//! CC to Note translation.

use std::fmt;

use super::mapping::{Apc40Mapping, PulseNotes, Rule};
use super::state::{ControllerState, ControllerTable};
use crate::midi::MidiEvent;

/// Rotation direction inferred for an encoder tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Infer direction from the previous and current absolute value.
    ///
    /// Equal readings and a zero value count as counter-clockwise.
    pub fn infer(previous: u8, value: u8) -> Self {
        if value <= previous || value == 0 {
            Self::CounterClockwise
        } else {
            Self::Clockwise
        }
    }

    /// Direction of a cue level tick, which carries it in the value.
    pub fn from_jog_value(value: u8) -> Self {
        if value > Apc40Mapping::CUE_LEVEL_CCW_THRESHOLD {
            Self::CounterClockwise
        } else {
            Self::Clockwise
        }
    }

    /// Note On for the direction's note followed by Note Off for the opposite one.
    fn pulse(self, notes: PulseNotes, channel: u8) -> [MidiEvent; 2] {
        let (on, off) = match self {
            Self::CounterClockwise => (notes.ccw, notes.cw),
            Self::Clockwise => (notes.cw, notes.ccw),
        };
        [
            MidiEvent::note_on(channel, on, Apc40Mapping::PULSE_VELOCITY),
            MidiEvent::note_off(channel, off, Apc40Mapping::PULSE_VELOCITY),
        ]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clockwise => f.write_str("CW"),
            Self::CounterClockwise => f.write_str("CCW"),
        }
    }
}

/// Ordered output of a single `process` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    events: Vec<MidiEvent>,
    direction: Option<Direction>,
    pulse: Option<MidiEvent>,
}

impl Translation {
    fn empty() -> Self {
        Self::default()
    }

    fn single(event: MidiEvent) -> Self {
        Self {
            events: vec![event],
            ..Self::default()
        }
    }

    fn with_pulse(events: Vec<MidiEvent>, direction: Direction, pulse: MidiEvent) -> Self {
        Self {
            events,
            direction: Some(direction),
            pulse: Some(pulse),
        }
    }

    pub fn events(&self) -> &[MidiEvent] {
        &self.events
    }

    /// Direction of the synthesized pulse, if one was emitted.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// The first synthesized Note On of a direction pulse.
    pub fn pulse_note_on(&self) -> Option<&MidiEvent> {
        self.pulse.as_ref()
    }
}

/// Stateful translator from APC40 controller input to note sequences.
///
/// Owns the controller history exclusively. Each call to [`Translator::process`]
/// records the incoming CC before building its output, so callers must feed
/// events strictly in arrival order.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    controllers: ControllerTable,
}

impl Translator {
    pub fn new() -> Self {
        Self {
            controllers: ControllerTable::new(),
        }
    }

    /// Translate one inbound event into the events to forward, in send order.
    pub fn process(&mut self, event: MidiEvent) -> Translation {
        match event {
            MidiEvent::NoteOn { .. } | MidiEvent::NoteOff { .. } => Translation::single(event),
            MidiEvent::ControlChange {
                channel,
                controller,
                value,
            } => self.process_cc(channel, controller, value),
        }
    }

    fn process_cc(&mut self, channel: u8, controller: u8, value: u8) -> Translation {
        let Some(state) = self.controllers.get_mut(controller) else {
            log::warn!("Dropping CC with out of range controller {}", controller);
            return Translation::empty();
        };

        let previous = *state;
        state.record(value, channel);

        let controller_note = MidiEvent::note_on(channel, controller, value);

        match Apc40Mapping::classify(controller) {
            Rule::JogWheel => {
                let direction = Direction::from_jog_value(value);
                let [on, off] = direction.pulse(Apc40Mapping::CUE_LEVEL_NOTES, channel);
                Translation::with_pulse(vec![on, off], direction, on)
            }
            Rule::EncoderBankA => {
                if previous.channel_changed(channel) {
                    return Translation::single(controller_note);
                }
                let direction = Direction::infer(previous.last_value, value);
                let notes = Apc40Mapping::bank_a_notes(controller);
                let [on, off] = direction.pulse(notes, channel);
                Translation::with_pulse(vec![on, off, controller_note], direction, on)
            }
            Rule::EncoderBankB => {
                let direction = Direction::infer(previous.last_value, value);
                let notes = Apc40Mapping::bank_b_notes(controller);
                let [on, off] = direction.pulse(notes, channel);
                // The controller note brackets the pulse on both sides.
                Translation::with_pulse(
                    vec![controller_note, on, off, controller_note],
                    direction,
                    on,
                )
            }
            Rule::Passthrough => Translation::single(controller_note),
        }
    }

    /// History recorded for a controller.
    pub fn controller_state(&self, controller: u8) -> Option<&ControllerState> {
        self.controllers.get(controller)
    }
}
