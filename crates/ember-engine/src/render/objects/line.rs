use std::rc::Rc;

use glam::{Mat4, Vec3};

use crate::device::RenderDevice;
use crate::render::{DrawCtx, LinePipeline, MeshBuffers, ObjectUniforms, RenderError, RenderObject};
use crate::resources::MeshVertex;

/// A single colored line segment with world-space endpoints.
pub struct Line {
    label: String,
    pipeline: Rc<LinePipeline>,
    buffers: MeshBuffers,
    uniforms: ObjectUniforms,
    color: [f32; 4],
}

impl Line {
    pub fn new(
        device: &RenderDevice,
        pipeline: Rc<LinePipeline>,
        label: &str,
        from: Vec3,
        to: Vec3,
        color: [f32; 4],
    ) -> Self {
        let vertices = [
            MeshVertex {
                position: from.into(),
                ..Default::default()
            },
            MeshVertex {
                position: to.into(),
                ..Default::default()
            },
        ];
        let buffers = MeshBuffers::new(&device.device, label, &vertices, &[0, 1]);
        let uniforms = ObjectUniforms::new(&device.device, pipeline.object_layout(), label);

        Self {
            label: label.to_owned(),
            pipeline,
            buffers,
            uniforms,
            color,
        }
    }
}

impl RenderObject for Line {
    fn label(&self) -> &str {
        &self.label
    }

    // Endpoints are already in world space.
    fn model_matrix(&self) -> Mat4 {
        Mat4::IDENTITY
    }

    fn draw(&self, ctx: &mut DrawCtx<'_>) -> Result<(), RenderError> {
        self.pipeline.bind(&mut ctx.pass);
        self.uniforms
            .write(ctx.queue, ctx.view_projection, self.color, ctx.ambient);
        self.uniforms.bind(&mut ctx.pass);
        self.buffers.draw(&mut ctx.pass);
        Ok(())
    }
}
