//! One-shot APC40 mode switch sent before the bridge starts.

use apc_bridge_core::{BridgeError, DeviceMode, PortKind};
use midir::MidiOutput;

use crate::ports;

/// Open `port_name`, send the mode switch sysex once and close the port again.
pub fn send_mode_switch(
    client_name: &str,
    port_name: &str,
    mode: DeviceMode,
) -> Result<(), BridgeError> {
    let midi_out = MidiOutput::new(&format!("{} sysex", client_name))
        .map_err(|e| BridgeError::Init(e.to_string()))?;

    let port = ports::find_port(&midi_out, port_name, PortKind::Output)?;

    let mut connection = midi_out
        .connect(&port, "apc-bridge-sysex")
        .map_err(|e| BridgeError::Connect(e.to_string()))?;

    let message = mode.sysex();
    log::debug!("Sending mode switch {:02X?}", message);
    connection
        .send(&message)
        .map_err(|e| BridgeError::Send(e.to_string()))?;
    connection.close();

    log::info!("Switched \"{}\" to {} mode", port_name, mode);
    Ok(())
}
