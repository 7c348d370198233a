use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState};

/// Current input state for a display.
///
/// Holds "is down" information and the cursor position. Per-tick transitions
/// are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Cursor position in logical pixels, if the cursor is over the window.
    pub cursor_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // On focus loss, clear the held set so keys cannot get
                    // stuck down while the window is in the background.
                    self.keys_down.clear();
                }
            }

            InputEvent::CursorMoved { x, y } => {
                self.cursor_pos = Some((x, y));
            }

            InputEvent::CursorLeft => {
                self.cursor_pos = None;
            }

            InputEvent::Key { key, state, repeat } => match state {
                KeyState::Pressed => {
                    let inserted = self.keys_down.insert(key);
                    if inserted && !repeat {
                        frame.key_transitions.push((key, KeyState::Pressed));
                    }
                }
                KeyState::Released => {
                    let removed = self.keys_down.remove(&key);
                    if removed {
                        frame.key_transitions.push((key, KeyState::Released));
                    }
                }
            },
        }

        frame.events.push(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}
