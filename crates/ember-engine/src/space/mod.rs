//! Spatial types shared across the engine.
//!
//! World transforms and the camera view live here; the projection matrix is
//! owned by `display::Display` since it is fixed per window.

mod camera;
mod transform;

pub use camera::Camera;
pub use transform::Transform;
