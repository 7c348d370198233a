//! Ember engine crate.
//!
//! A small real-time 3D engine: the platform + GPU runtime, a weakly
//! referencing render chain, scene lifecycle, and the script host seam used
//! by higher layers.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod display;
pub mod space;
pub mod render;
pub mod resources;
pub mod scene;
pub mod script;
