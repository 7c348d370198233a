//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform events into `InputEvent`s; they are applied
//! to engine state synchronously, and per-tick transitions are delivered to
//! key bindings at a defined point in the frame.

mod bindings;
mod frame;
mod state;
mod types;

pub use bindings::{KeyBindings, KeyCallback};
pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
