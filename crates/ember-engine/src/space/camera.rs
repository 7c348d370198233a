use glam::{Mat4, Vec3};

/// View transform for a display.
///
/// The camera is the one mutable piece of display state; the script host may
/// reposition it every tick.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn set_eye(&mut self, eye: Vec3) {
        self.eye = eye;
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.eye += delta;
        self.target += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_moves_world_opposite_to_eye() {
        let mut cam = Camera::default();
        cam.set_eye(Vec3::new(0.0, 0.0, 5.0));
        cam.look_at(Vec3::ZERO);
        let p = cam.view().transform_point3(Vec3::ZERO);
        // The origin sits 5 units in front of the camera (-Z in view space).
        assert!((p.z + 5.0).abs() < 1e-6);
    }
}
