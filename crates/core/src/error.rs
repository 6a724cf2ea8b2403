use thiserror::Error;

use crate::config::ConfigError;

/// Which side of the bridge a port belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    Input,
    Output,
}

impl std::fmt::Display for PortKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortKind::Input => f.write_str("input"),
            PortKind::Output => f.write_str("output"),
        }
    }
}

/// Errors raised while setting up or running the bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("MIDI {kind} \"{name}\" not found. Available MIDI {kind}s: {}", format_ports(.available))]
    PortNotFound {
        kind: PortKind,
        name: String,
        available: Vec<String>,
    },

    #[error("Failed to initialize MIDI client: {0}")]
    Init(String),

    #[error("Failed to connect MIDI port: {0}")]
    Connect(String),

    #[error("Failed to send MIDI: {0}")]
    Send(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn format_ports(ports: &[String]) -> String {
    if ports.is_empty() {
        "(none)".to_string()
    } else {
        ports.join(", ")
    }
}
