//! Concrete render object variants and the factory that builds them.
//!
//! Each variant owns its GPU handles exclusively and shares only the
//! pipeline for its kind. `RenderObjectFactory` is the seam between scene
//! descriptions and GPU construction; scene loading is tested against a
//! stub factory, the engine supplies [`GpuObjectFactory`].

mod dynamic_model;
mod factory;
mod line;
mod static_model;

pub use dynamic_model::DynamicModel;
pub use factory::{GpuObjectFactory, RenderObjectFactory};
pub use line::Line;
pub use static_model::StaticModel;
