//! Core of the APC40 bridge.
//!
//! Translates Akai APC40 controller input into note sequences for a DAW:
//! - Note On/Off pass through unchanged
//! - Encoder CCs become a CW/CCW pulse note pair plus a controller note
//! - Every other CC becomes a Note On with the CC number as note
//!
//! Port handling lives in the `apc-bridge` binary; this crate only sees
//! decoded events and a [`MidiSink`] to write them to.

pub use bridge::{describe_translation, Bridge, BridgeStats, MidiSink};
pub use config::{ConfigError, ConfigFile, ConfigManager, Settings};
pub use engine::{
    Apc40Mapping, ControllerState, ControllerTable, Direction, PulseNotes, Rule, Translation,
    Translator, CONTROLLER_COUNT,
};
pub use error::{BridgeError, PortKind};
pub use midi::{DeviceMode, MidiEvent, MODE_SWITCH_LEN};

mod bridge;
mod config;
mod engine;
mod error;
mod midi;
