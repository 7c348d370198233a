use super::types::{InputEvent, Key, KeyState};

/// Per-tick input deltas.
///
/// `InputState` provides the current state (held keys, cursor position).
/// `InputFrame` records what changed since the previous tick, in arrival
/// order, so callback delivery is deterministic.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Key press/release transitions in arrival order.
    ///
    /// OS auto-repeats and redundant transitions (e.g. a release for a key
    /// never recorded as held) are filtered out by `InputState`.
    pub key_transitions: Vec<(Key, KeyState)>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.key_transitions.clear();
    }

    pub fn pressed(&self, key: Key) -> bool {
        self.key_transitions
            .iter()
            .any(|&(k, s)| k == key && s == KeyState::Pressed)
    }
}
