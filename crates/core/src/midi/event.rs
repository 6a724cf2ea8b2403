//! Typed MIDI channel messages handled by the bridge.
//!
//! Only the three message classes the APC40 sends in its Ableton modes are
//! modelled. Everything else is dropped at the byte boundary.

use std::fmt;

const STATUS_NOTE_OFF: u8 = 0x80;
const STATUS_NOTE_ON: u8 = 0x90;
const STATUS_CONTROL_CHANGE: u8 = 0xB0;

/// A channel voice message as seen by the translation engine.
///
/// Channels are zero-based (0-15); all other fields are 7-bit (0-127).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MidiEvent {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
}

impl MidiEvent {
    pub const fn note_on(channel: u8, note: u8, velocity: u8) -> Self {
        Self::NoteOn {
            channel,
            note,
            velocity,
        }
    }

    pub const fn note_off(channel: u8, note: u8, velocity: u8) -> Self {
        Self::NoteOff {
            channel,
            note,
            velocity,
        }
    }

    pub const fn control_change(channel: u8, controller: u8, value: u8) -> Self {
        Self::ControlChange {
            channel,
            controller,
            value,
        }
    }

    /// Decode a raw message delivered by the input port.
    ///
    /// Returns `None` for anything that is not a complete Note On, Note Off or
    /// Control Change, or whose data bytes are out of the 7-bit range. A Note
    /// On with velocity 0 is kept as a Note On so that passthrough stays
    /// byte-identical.
    pub fn from_bytes(message: &[u8]) -> Option<Self> {
        if message.len() < 3 {
            return None;
        }

        let status = message[0];
        let (data1, data2) = (message[1], message[2]);
        if status < 0x80 || data1 > 0x7F || data2 > 0x7F {
            return None;
        }

        let channel = status & 0x0F;
        match status & 0xF0 {
            STATUS_NOTE_OFF => Some(Self::note_off(channel, data1, data2)),
            STATUS_NOTE_ON => Some(Self::note_on(channel, data1, data2)),
            STATUS_CONTROL_CHANGE => Some(Self::control_change(channel, data1, data2)),
            _ => None,
        }
    }

    /// Encode as a three byte channel message.
    pub fn to_bytes(&self) -> [u8; 3] {
        match *self {
            Self::NoteOn {
                channel,
                note,
                velocity,
            } => [STATUS_NOTE_ON | (channel & 0x0F), note & 0x7F, velocity & 0x7F],
            Self::NoteOff {
                channel,
                note,
                velocity,
            } => [STATUS_NOTE_OFF | (channel & 0x0F), note & 0x7F, velocity & 0x7F],
            Self::ControlChange {
                channel,
                controller,
                value,
            } => [
                STATUS_CONTROL_CHANGE | (channel & 0x0F),
                controller & 0x7F,
                value & 0x7F,
            ],
        }
    }

    pub fn channel(&self) -> u8 {
        match *self {
            Self::NoteOn { channel, .. }
            | Self::NoteOff { channel, .. }
            | Self::ControlChange { channel, .. } => channel,
        }
    }
}

/// Renders the operator log line, e.g. `[CH 1] Note  16 , Velocity  50 , Note on`.
impl fmt::Display for MidiEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (channel, number, amount, label, number_label, amount_label) = match *self {
            Self::NoteOn {
                channel,
                note,
                velocity,
            } => (channel, note, velocity, "Note on", "Note", "Velocity"),
            Self::NoteOff {
                channel,
                note,
                velocity,
            } => (channel, note, velocity, "Note off", "Note", "Velocity"),
            Self::ControlChange {
                channel,
                controller,
                value,
            } => (channel, controller, value, "CC", "Controller", "Value"),
        };

        write!(
            f,
            "[CH {}] {} {:>3} , {} {:>3} , {}",
            channel as u16 + 1,
            number_label,
            number,
            amount_label,
            amount,
            label
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_channel_messages() {
        assert_eq!(
            MidiEvent::from_bytes(&[0x92, 60, 100]),
            Some(MidiEvent::note_on(2, 60, 100))
        );
        assert_eq!(
            MidiEvent::from_bytes(&[0x8F, 60, 0]),
            Some(MidiEvent::note_off(15, 60, 0))
        );
        assert_eq!(
            MidiEvent::from_bytes(&[0xB0, 16, 50]),
            Some(MidiEvent::control_change(0, 16, 50))
        );
    }

    #[test]
    fn test_note_on_zero_velocity_stays_note_on() {
        assert_eq!(
            MidiEvent::from_bytes(&[0x90, 53, 0]),
            Some(MidiEvent::note_on(0, 53, 0))
        );
    }

    #[test]
    fn test_decode_rejects_other_messages() {
        // Clock, pitch bend, sysex, truncated and bad data bytes
        assert_eq!(MidiEvent::from_bytes(&[0xF8]), None);
        assert_eq!(MidiEvent::from_bytes(&[0xE0, 0, 64]), None);
        assert_eq!(
            MidiEvent::from_bytes(&[0xF0, 0x47, 0x00, 0x73, 0xF7]),
            None
        );
        assert_eq!(MidiEvent::from_bytes(&[0xB0, 16]), None);
        assert_eq!(MidiEvent::from_bytes(&[0xB0, 200, 10]), None);
        assert_eq!(MidiEvent::from_bytes(&[0x10, 16, 10]), None);
    }

    #[test]
    fn test_encode_matches_wire_format() {
        assert_eq!(MidiEvent::note_on(2, 0, 127).to_bytes(), [0x92, 0, 127]);
        assert_eq!(MidiEvent::note_off(0, 1, 127).to_bytes(), [0x80, 1, 127]);
        assert_eq!(
            MidiEvent::control_change(9, 47, 1).to_bytes(),
            [0xB9, 47, 1]
        );
    }

    #[test]
    fn test_display_log_format() {
        assert_eq!(
            MidiEvent::note_on(0, 16, 50).to_string(),
            "[CH 1] Note  16 , Velocity  50 , Note on"
        );
        assert_eq!(
            MidiEvent::note_off(15, 1, 127).to_string(),
            "[CH 16] Note   1 , Velocity 127 , Note off"
        );
    }
}
