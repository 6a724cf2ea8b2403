//! APC40 controller layout and the fixed CC rule table.
//!
//! # Controller Layout
//!
//! ```text
//! CC 16-23: Device control encoders (bank A) -> pulse notes 24-39
//! CC 47:    Cue level jog wheel              -> pulse notes 0-1
//! CC 48-55: Track control encoders (bank B)  -> pulse notes 66-81
//! other:    forwarded as Note On, note = CC number, velocity = CC value
//! ```
//!
//! Each encoder owns a pair of pulse notes: the even note means
//! counter-clockwise, the odd note clockwise.

/// The rule a Control Change is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Cue level knob; direction is encoded in the value itself.
    JogWheel,
    /// Device control encoders. Direction is inferred from history and
    /// suppressed when the encoder jumps channel.
    EncoderBankA,
    /// Track control encoders. Direction is inferred from history and the
    /// controller note brackets the pulse.
    EncoderBankB,
    /// Plain CC to Note On.
    Passthrough,
}

/// Note pair used for an encoder's direction pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseNotes {
    pub ccw: u8,
    pub cw: u8,
}

/// APC40 CC numbers and note assignments.
pub struct Apc40Mapping;

impl Apc40Mapping {
    // === Jog wheel ===
    pub const CUE_LEVEL: u8 = 47;
    /// Values above this are counter-clockwise ticks.
    pub const CUE_LEVEL_CCW_THRESHOLD: u8 = 65;
    pub const CUE_LEVEL_NOTES: PulseNotes = PulseNotes { ccw: 0, cw: 1 };

    // === Bank A encoders (CC 16-23) ===
    pub const BANK_A_FIRST: u8 = 16;
    pub const BANK_A_LAST: u8 = 23;
    pub const BANK_A_BASE_NOTE: u8 = 24;

    // === Bank B encoders (CC 48-55) ===
    pub const BANK_B_FIRST: u8 = 48;
    pub const BANK_B_LAST: u8 = 55;
    pub const BANK_B_BASE_NOTE: u8 = 66;

    /// Velocity of every synthesized pulse note.
    pub const PULSE_VELOCITY: u8 = 127;

    /// Classify a controller number. First match wins.
    pub fn classify(controller: u8) -> Rule {
        match controller {
            Self::CUE_LEVEL => Rule::JogWheel,
            Self::BANK_A_FIRST..=Self::BANK_A_LAST => Rule::EncoderBankA,
            Self::BANK_B_FIRST..=Self::BANK_B_LAST => Rule::EncoderBankB,
            _ => Rule::Passthrough,
        }
    }

    /// Pulse notes for a bank A encoder (CC 16-23).
    pub const fn bank_a_notes(controller: u8) -> PulseNotes {
        Self::encoder_notes(controller - Self::BANK_A_FIRST, Self::BANK_A_BASE_NOTE)
    }

    /// Pulse notes for a bank B encoder (CC 48-55).
    pub const fn bank_b_notes(controller: u8) -> PulseNotes {
        Self::encoder_notes(controller - Self::BANK_B_FIRST, Self::BANK_B_BASE_NOTE)
    }

    const fn encoder_notes(index: u8, base_note: u8) -> PulseNotes {
        let ccw = index * 2 + base_note;
        PulseNotes { ccw, cw: ccw + 1 }
    }

    /// Default name of the hardware input port.
    pub fn device_name() -> &'static str {
        "Akai APC40"
    }

    /// Default name of the virtual port the DAW listens on.
    pub fn virtual_port_name() -> &'static str {
        "Akai APC40 Virtual"
    }
}
