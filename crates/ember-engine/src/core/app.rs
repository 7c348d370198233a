use crate::input::InputEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// The runtime owns the window and GPU; the app sees translated input and a
/// per-frame context. [`crate::core::Engine`] is the standard implementation.
pub trait App {
    /// Called once after the window and GPU exist, with the physical surface
    /// size in pixels.
    fn on_start(&mut self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// Called for each translated input event as it arrives.
    fn on_input(&mut self, event: InputEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
