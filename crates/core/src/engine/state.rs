//! Per-controller history used for direction inference.

/// Number of addressable controllers.
pub const CONTROLLER_COUNT: usize = 128;

/// Last observation of a single controller, across all channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub last_value: u8,
    /// `None` until the controller is seen for the first time.
    pub last_channel: Option<u8>,
}

impl ControllerState {
    /// Whether the previous observation came from a different channel.
    /// A controller that was never seen has not changed channel.
    pub fn channel_changed(&self, channel: u8) -> bool {
        self.last_channel.is_some_and(|last| last != channel)
    }

    pub fn record(&mut self, value: u8, channel: u8) {
        self.last_value = value;
        self.last_channel = Some(channel);
    }
}

/// Fixed table of controller history, keyed by controller number only.
#[derive(Debug, Clone)]
pub struct ControllerTable {
    entries: [ControllerState; CONTROLLER_COUNT],
}

impl ControllerTable {
    pub fn new() -> Self {
        Self {
            entries: [ControllerState::default(); CONTROLLER_COUNT],
        }
    }

    pub fn get(&self, controller: u8) -> Option<&ControllerState> {
        self.entries.get(controller as usize)
    }

    pub fn get_mut(&mut self, controller: u8) -> Option<&mut ControllerState> {
        self.entries.get_mut(controller as usize)
    }
}

impl Default for ControllerTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_table() {
        let table = ControllerTable::new();
        for cc in 0..CONTROLLER_COUNT as u8 {
            assert_eq!(table.get(cc), Some(&ControllerState::default()));
        }
        assert!(table.get(128).is_none());
    }

    #[test]
    fn test_channel_zero_is_not_unset() {
        let mut state = ControllerState::default();
        assert!(!state.channel_changed(0));
        assert!(!state.channel_changed(5));

        state.record(10, 0);
        assert!(!state.channel_changed(0));
        assert!(state.channel_changed(1));
    }
}
