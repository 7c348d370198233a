//! Display context: viewport, projection, camera, and input state.
//!
//! One `Display` exists per window and outlives every scene rendered into it.
//! The projection matrix is derived once at construction and is immutable
//! thereafter; the camera and input state are the mutable parts.

use glam::Mat4;

use crate::input::{InputEvent, InputFrame, InputState};
use crate::space::Camera;

/// Perspective parameters used to derive the projection matrix.
#[derive(Debug, Clone, Copy)]
pub struct Perspective {
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

pub struct Display {
    width: u32,
    height: u32,
    projection: Mat4,
    camera: Camera,
    input: InputState,
    frame: InputFrame,
}

impl Display {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_perspective(width, height, Perspective::default())
    }

    pub fn with_perspective(width: u32, height: u32, perspective: Perspective) -> Self {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let projection = Mat4::perspective_rh(
            perspective.fov_y_degrees.to_radians(),
            aspect,
            perspective.z_near,
            perspective.z_far,
        );

        Self {
            width,
            height,
            projection,
            camera: Camera::default(),
            input: InputState::default(),
            frame: InputFrame::default(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Transitions accumulated since the previous tick.
    pub fn input_frame(&self) -> &InputFrame {
        &self.frame
    }

    /// Projection composed with the current camera view.
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.camera.view()
    }

    /// Applies a platform input event. Called by the runtime as events arrive;
    /// state becomes visible to the scene at the next tick boundary.
    pub fn apply_event(&mut self, ev: InputEvent) {
        self.input.apply_event(&mut self.frame, ev);
    }

    /// Discards per-tick input deltas. Called by the engine after a tick has
    /// consumed them.
    pub fn end_tick(&mut self) {
        self.frame.clear();
    }
}
