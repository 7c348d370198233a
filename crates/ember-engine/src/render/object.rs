use std::cell::RefCell;
use std::rc::Rc;

use glam::Mat4;

use crate::display::Display;
use crate::space::Transform;

use super::ctx::DrawCtx;
use super::error::RenderError;

/// Shared-ownership handle to a render object. The scene holds the strong
/// reference; the render chain holds only weak ones.
pub type SceneObject = Rc<RefCell<dyn RenderObject>>;

/// Capability interface for everything the render chain can draw.
///
/// A flat interface plus per-variant data; no inheritance chains. The
/// contract for `draw`:
/// - bind the object's pipeline and bind groups
/// - upload the model-view-projection for this tick
/// - issue the draw call for every mesh segment, in source order
/// - report recoverable issues as `Err`, never panic past this boundary
pub trait RenderObject {
    /// Identity used in per-object failure logs.
    fn label(&self) -> &str;

    /// The object's own world transform.
    fn model_matrix(&self) -> Mat4;

    fn draw(&self, ctx: &mut DrawCtx<'_>) -> Result<(), RenderError>;

    /// Projection × view × model for the given display.
    fn mvp(&self, display: &Display) -> Mat4 {
        display.view_projection() * self.model_matrix()
    }

    /// Mutable transform access; `Some` only for dynamic variants that
    /// gameplay logic may move between frames.
    fn transform_mut(&mut self) -> Option<&mut Transform> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    struct Fixed(Transform);

    impl RenderObject for Fixed {
        fn label(&self) -> &str {
            "fixed"
        }
        fn model_matrix(&self) -> Mat4 {
            self.0.matrix()
        }
        fn draw(&self, _ctx: &mut DrawCtx<'_>) -> Result<(), RenderError> {
            Ok(())
        }
    }

    #[test]
    fn mvp_composes_projection_view_model() {
        let display = Display::new(800, 600);
        let object = Fixed(Transform::from_position(Vec3::new(0.0, 0.0, -2.0)));

        let expected =
            display.projection() * display.camera().view() * object.model_matrix();
        assert_eq!(object.mvp(&display), expected);
    }
}
