use std::path::PathBuf;

use apc_bridge_core::{
    Bridge, BridgeError, ConfigError, ConfigManager, DeviceMode, PortKind, Settings,
};
use clap::Parser;
use midir::{Ignore, MidiInput, MidiOutput};
use tokio::sync::mpsc;

mod handshake;
mod ports;

use ports::PortSink;

/// Forwards an Akai APC40 to a virtual port, turning encoder and knob CCs
/// into note sequences a DAW can map.
#[derive(Parser, Debug)]
#[command(name = "apc-bridge")]
#[command(version, about = "Akai APC40 MIDI bridge")]
struct Args {
    /// Settings file (defaults to <config dir>/apc-bridge/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// MIDI input port the controller sends on
    #[arg(short, long)]
    input: Option<String>,

    /// MIDI output port translated events are sent to
    #[arg(short, long)]
    output: Option<String>,

    /// Send the mode switch sysex at startup
    #[arg(long)]
    sysex: bool,

    /// MIDI output port the mode switch is sent to
    #[arg(long)]
    sysex_port: Option<String>,

    /// Device mode for the mode switch: generic, live or alt-live
    #[arg(long)]
    mode: Option<DeviceMode>,

    /// Don't log translated events
    #[arg(short, long)]
    quiet: bool,

    /// List available MIDI ports and exit
    #[arg(short, long)]
    list: bool,
}

/// What the process was asked to do.
#[derive(Debug)]
enum Command {
    /// Print the available ports. No settings file is read or written.
    ListPorts,
    Run(Settings),
}

impl Command {
    fn from_args(args: &Args) -> Result<Self, BridgeError> {
        if args.list {
            return Ok(Command::ListPorts);
        }
        load_settings(args).map(Command::Run)
    }
}

fn load_settings(args: &Args) -> Result<Settings, BridgeError> {
    let mut manager = ConfigManager::new(args.config.clone());
    let mut settings = manager.load()?;
    log::debug!("Loaded settings from {}", manager.config_path().display());

    // Command line overrides apply to this run only.
    if let Some(input) = &args.input {
        settings.input_port = input.clone();
    }
    if let Some(output) = &args.output {
        settings.output_port = output.clone();
    }
    if args.sysex {
        settings.sysex_enabled = true;
    }
    if let Some(sysex_port) = &args.sysex_port {
        settings.sysex_port = sysex_port.clone();
    }
    if let Some(mode) = args.mode {
        settings.device_mode = mode;
    }
    if args.quiet {
        settings.log_events = false;
    }

    ConfigManager::validate_settings(&settings).map_err(ConfigError::ValidationError)?;
    Ok(settings)
}

/// Hand a raw message from the midir callback thread to the bridge loop.
/// Returns false once the loop has stopped receiving.
fn forward_message(tx: &mpsc::UnboundedSender<Vec<u8>>, message: &[u8]) -> bool {
    match tx.send(message.to_vec()) {
        Ok(()) => true,
        Err(_) => {
            log::trace!("Bridge loop stopped, dropping MIDI message {:02X?}", message);
            false
        }
    }
}

fn print_ports(client_name: &str) -> Result<(), anyhow::Error> {
    let midi_in = MidiInput::new(client_name)?;
    let midi_out = MidiOutput::new(client_name)?;

    println!("Available MIDI inputs:");
    for name in ports::port_names(&midi_in) {
        println!("  {}", name);
    }
    println!("Available MIDI outputs:");
    for name in ports::port_names(&midi_out) {
        println!("  {}", name);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match Command::from_args(&args)? {
        Command::ListPorts => return print_ports(&Settings::default().client_name),
        Command::Run(settings) => settings,
    };

    let mut midi_in = MidiInput::new(&format!("{} in", settings.client_name))?;
    midi_in.ignore(Ignore::All);
    let midi_out = MidiOutput::new(&format!("{} out", settings.client_name))?;

    // Both ends must exist before anything is sent to the device.
    let in_port = ports::find_port(&midi_in, &settings.input_port, PortKind::Input)?;
    let out_port = ports::find_port(&midi_out, &settings.output_port, PortKind::Output)?;

    if settings.sysex_enabled {
        handshake::send_mode_switch(
            &settings.client_name,
            &settings.sysex_port,
            settings.device_mode,
        )?;
    }

    let output = midi_out
        .connect(&out_port, "apc-bridge-output")
        .map_err(|e| anyhow::anyhow!("Failed to connect MIDI output: {}", e))?;
    log::info!("Connected to MIDI output: {}", settings.output_port);

    let (tx, mut rx) = mpsc::unbounded_channel::<Vec<u8>>();
    let input = midi_in
        .connect(
            &in_port,
            "apc-bridge-input",
            move |_timestamp, message, tx| {
                // Translation happens on the consumer side, in arrival order.
                forward_message(tx, message);
            },
            tx,
        )
        .map_err(|e| anyhow::anyhow!("Failed to connect MIDI input: {}", e))?;
    log::info!("Connected to MIDI input: {}", settings.input_port);

    let mut bridge = Bridge::new(PortSink::new(output)).with_event_log(settings.log_events);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            message = rx.recv() => match message {
                Some(message) => {
                    if let Err(e) = bridge.handle_message(&message) {
                        log::error!("{}", e);
                    }
                }
                None => {
                    log::warn!("MIDI input closed");
                    break;
                }
            },
            result = &mut shutdown => {
                if let Err(e) = result {
                    log::error!("Failed to listen for shutdown signal: {}", e);
                }
                log::info!("Shutting down");
                break;
            }
        }
    }

    let stats = bridge.stats();
    log::info!(
        "Received {} events, sent {}, ignored {} messages, {} send errors",
        stats.received,
        stats.emitted,
        stats.ignored,
        stats.send_errors
    );

    let _ = input.close();
    bridge.into_sink().close();
    Ok(())
}
