use std::rc::Rc;

use glam::Mat4;

use crate::device::RenderDevice;
use crate::render::{DrawCtx, MeshPipeline, RenderError, RenderObject};
use crate::resources::ModelData;
use crate::space::Transform;

use super::StaticModel;

/// A model whose transform gameplay logic may change between frames.
///
/// Drawing is identical to [`StaticModel`]; the only difference is that the
/// transform is exposed for mutation through `transform_mut`.
pub struct DynamicModel {
    inner: StaticModel,
}

impl DynamicModel {
    pub fn new(
        device: &RenderDevice,
        pipeline: Rc<MeshPipeline>,
        label: &str,
        model: &ModelData,
        transform: Transform,
        color: [f32; 4],
    ) -> Result<Self, RenderError> {
        Ok(Self {
            inner: StaticModel::new(device, pipeline, label, model, transform, color)?,
        })
    }
}

impl RenderObject for DynamicModel {
    fn label(&self) -> &str {
        self.inner.label()
    }

    fn model_matrix(&self) -> Mat4 {
        self.inner.model_matrix()
    }

    fn draw(&self, ctx: &mut DrawCtx<'_>) -> Result<(), RenderError> {
        self.inner.draw(ctx)
    }

    fn transform_mut(&mut self) -> Option<&mut Transform> {
        Some(&mut self.inner.transform)
    }
}
