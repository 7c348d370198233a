//! Windowing runtime (winit integration).

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
