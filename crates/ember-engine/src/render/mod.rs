//! Rendering subsystem.
//!
//! `RenderChain` is an ordered dispatch list of weak references: it never
//! owns what it renders and never frees GPU resources. Render objects own
//! their GPU handles exclusively and release them exactly once, on drop.
//!
//! Per-object draw failures are isolated at the chain boundary: they are
//! logged with the object's identity and the pass continues.

mod chain;
mod ctx;
mod error;
mod handle;
mod object;
mod pipeline;

pub mod objects;

pub use chain::{PassStats, RenderChain};
pub use ctx::{DrawCtx, DEFAULT_AMBIENT};
pub use error::{ChainError, RenderError};
pub use handle::{MeshBuffers, ObjectUniforms, TextureBinding};
pub use object::{RenderObject, SceneObject};
pub use pipeline::{LinePipeline, MeshPipeline};
