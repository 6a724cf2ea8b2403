//! Translation engine.
//!
//! Turns APC40 controller input into note sequences a DAW can map, inferring
//! encoder direction from per-controller history.

mod mapping;
mod state;
mod translator;

pub use mapping::{Apc40Mapping, PulseNotes, Rule};
pub use state::{ControllerState, ControllerTable, CONTROLLER_COUNT};
pub use translator::{Direction, Translation, Translator};
