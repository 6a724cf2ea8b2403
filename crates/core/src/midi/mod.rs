mod event;
mod sysex;

pub use event::MidiEvent;
pub use sysex::{DeviceMode, MODE_SWITCH_LEN};
