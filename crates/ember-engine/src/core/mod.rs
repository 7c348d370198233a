//! Application contract and the standard engine loop.

mod app;
mod ctx;
mod engine;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
pub use engine::{Engine, EngineConfig};
