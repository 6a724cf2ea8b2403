//! Drives the translator from raw port input and forwards the result.

use crate::engine::{Translation, Translator};
use crate::error::BridgeError;
use crate::midi::MidiEvent;

/// Destination for translated events.
///
/// Implementations must deliver events in the order `send` is called.
pub trait MidiSink {
    fn send(&mut self, event: &MidiEvent) -> Result<(), BridgeError>;
}

/// Collects events in memory. Used by tests and dry runs.
impl MidiSink for Vec<MidiEvent> {
    fn send(&mut self, event: &MidiEvent) -> Result<(), BridgeError> {
        self.push(*event);
        Ok(())
    }
}

impl<S: MidiSink + ?Sized> MidiSink for &mut S {
    fn send(&mut self, event: &MidiEvent) -> Result<(), BridgeError> {
        (**self).send(event)
    }
}

/// Counters reported at shutdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeStats {
    /// Messages that decoded into an event
    pub received: u64,
    /// Events written to the sink
    pub emitted: u64,
    /// Raw messages that were not Note On, Note Off or CC
    pub ignored: u64,
    /// Events the sink rejected
    pub send_errors: u64,
}

/// Owns the translator and the output sink.
///
/// Each message is translated and fully written out before the call returns.
pub struct Bridge<S: MidiSink> {
    translator: Translator,
    sink: S,
    log_events: bool,
    stats: BridgeStats,
}

impl<S: MidiSink> Bridge<S> {
    pub fn new(sink: S) -> Self {
        Self {
            translator: Translator::new(),
            sink,
            log_events: false,
            stats: BridgeStats::default(),
        }
    }

    /// Log one line per inbound message describing what was sent.
    pub fn with_event_log(mut self, enabled: bool) -> Self {
        self.log_events = enabled;
        self
    }

    /// Handle a raw message from the input port.
    ///
    /// Messages the translator doesn't understand are counted and dropped.
    /// Returns the number of events sent.
    pub fn handle_message(&mut self, message: &[u8]) -> Result<usize, BridgeError> {
        match MidiEvent::from_bytes(message) {
            Some(event) => self.handle_event(event),
            None => {
                log::trace!("Ignoring MIDI message {:02X?}", message);
                self.stats.ignored += 1;
                Ok(0)
            }
        }
    }

    /// Translate a decoded event and send every resulting event in order.
    ///
    /// Stops at the first send failure so that later events of the same
    /// sequence are never sent without the ones before them.
    pub fn handle_event(&mut self, event: MidiEvent) -> Result<usize, BridgeError> {
        self.stats.received += 1;
        let translation = self.translator.process(event);

        if self.log_events {
            log_translation(&event, &translation);
        }

        for (sent, out) in translation.events().iter().enumerate() {
            if let Err(e) = self.sink.send(out) {
                self.stats.send_errors += 1;
                self.stats.emitted += sent as u64;
                return Err(e);
            }
        }

        let sent = translation.events().len();
        self.stats.emitted += sent as u64;
        Ok(sent)
    }

    pub fn stats(&self) -> BridgeStats {
        self.stats
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Operator log line for one translated message.
pub fn describe_translation(input: &MidiEvent, translation: &Translation) -> Option<String> {
    let primary = match input {
        MidiEvent::NoteOn { .. } | MidiEvent::NoteOff { .. } => *input,
        MidiEvent::ControlChange { controller, value, .. } => {
            // The jog wheel has no controller note; report its pulse instead.
            let controller_note = MidiEvent::note_on(input.channel(), *controller, *value);
            if translation.events().contains(&controller_note) {
                controller_note
            } else {
                *translation.pulse_note_on()?
            }
        }
    };

    let line = match (translation.direction(), translation.pulse_note_on()) {
        (Some(direction), Some(pulse)) if *pulse != primary => {
            format!("{primary}  | {pulse} , {direction}")
        }
        (Some(direction), _) => format!("{primary} , {direction}"),
        _ => primary.to_string(),
    };
    Some(line)
}

fn log_translation(input: &MidiEvent, translation: &Translation) {
    if let Some(line) = describe_translation(input, translation) {
        log::info!("{}", line);
    }
}
