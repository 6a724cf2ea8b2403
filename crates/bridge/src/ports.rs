//! MIDI port lookup and the output sink.

use apc_bridge_core::{BridgeError, MidiEvent, MidiSink, PortKind};
use midir::{MidiIO, MidiOutputConnection};

/// Names of every port the backend currently exposes.
pub fn port_names<T: MidiIO>(io: &T) -> Vec<String> {
    io.ports()
        .iter()
        .filter_map(|port| io.port_name(port).ok())
        .collect()
}

/// Find a port by name.
///
/// An exact match wins. Otherwise a port named `<name>:<suffix>` is accepted,
/// which is how ALSA reports client ports. Plain substring matches are not
/// used because the virtual output usually shares the device's name prefix.
pub fn find_port<T: MidiIO>(io: &T, name: &str, kind: PortKind) -> Result<T::Port, BridgeError> {
    let mut ports: Vec<(T::Port, String)> = io
        .ports()
        .into_iter()
        .filter_map(|port| io.port_name(&port).ok().map(|n| (port, n)))
        .collect();

    let position = ports
        .iter()
        .position(|(_, port_name)| port_name == name)
        .or_else(|| ports.iter().position(|(_, port_name)| is_client_port(port_name, name)));

    match position {
        Some(index) => {
            let (port, port_name) = ports.swap_remove(index);
            log::debug!("Resolved MIDI {} \"{}\" to \"{}\"", kind, name, port_name);
            Ok(port)
        }
        None => Err(BridgeError::PortNotFound {
            kind,
            name: name.to_string(),
            available: ports.into_iter().map(|(_, port_name)| port_name).collect(),
        }),
    }
}

fn is_client_port(port_name: &str, wanted: &str) -> bool {
    port_name
        .strip_prefix(wanted)
        .is_some_and(|rest| rest.starts_with(':'))
}

/// Writes translated events to a connected output port.
pub struct PortSink {
    connection: MidiOutputConnection,
}

impl PortSink {
    pub fn new(connection: MidiOutputConnection) -> Self {
        Self { connection }
    }

    /// Close the port.
    pub fn close(self) {
        self.connection.close();
    }
}

impl MidiSink for PortSink {
    fn send(&mut self, event: &MidiEvent) -> Result<(), BridgeError> {
        self.connection
            .send(&event.to_bytes())
            .map_err(|e| BridgeError::Send(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_port_match() {
        assert!(is_client_port("Akai APC40:Akai APC40 MIDI 1 24:0", "Akai APC40"));
        assert!(!is_client_port("Akai APC40 Virtual", "Akai APC40"));
        assert!(!is_client_port("Akai APC40", "Akai APC40"));
        assert!(!is_client_port("Launchpad", "Akai APC40"));
    }
}
