//! Script host seam.
//!
//! The engine calls out to gameplay logic through `ScriptHost` at three
//! points in the scene lifecycle. Hook failures are logged by the scene and
//! never propagated; a buggy script cannot take the frame loop down.
//! Embedding an actual scripting language behind this trait is up to the
//! application.

use anyhow::Result;

use crate::display::Display;
use crate::scene::Scene;
use crate::time::FrameTime;

pub trait ScriptHost {
    /// Called once when the scene transitions to running, before the first
    /// frame. Typical work: camera placement, key bindings, spawning.
    fn on_start(&mut self, _scene: &mut Scene, _display: &mut Display) -> Result<()> {
        Ok(())
    }

    /// Called every tick while the scene runs, before the chain renders.
    fn on_tick(
        &mut self,
        _scene: &mut Scene,
        _display: &mut Display,
        _time: FrameTime,
    ) -> Result<()> {
        Ok(())
    }

    /// Called during close, after the render chain has been cleared but
    /// while scene objects and entities are still alive.
    fn on_close(&mut self, _scene: &mut Scene) -> Result<()> {
        Ok(())
    }
}

/// Host that does nothing; for scenes without gameplay logic.
pub struct NullHost;

impl ScriptHost for NullHost {}
