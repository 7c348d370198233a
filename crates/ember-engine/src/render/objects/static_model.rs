use std::rc::Rc;

use glam::Mat4;

use crate::device::RenderDevice;
use crate::render::{
    DrawCtx, MeshBuffers, MeshPipeline, ObjectUniforms, RenderError, RenderObject, TextureBinding,
};
use crate::resources::ModelData;
use crate::space::Transform;

/// A textured, depth-tested model with a fixed world transform.
///
/// Owns one vertex/index buffer pair per mesh segment, drawn in the source
/// order of the model data.
pub struct StaticModel {
    label: String,
    pipeline: Rc<MeshPipeline>,
    segments: Vec<MeshBuffers>,
    uniforms: ObjectUniforms,
    texture: TextureBinding,
    pub(super) transform: Transform,
    color: [f32; 4],
}

impl StaticModel {
    pub fn new(
        device: &RenderDevice,
        pipeline: Rc<MeshPipeline>,
        label: &str,
        model: &ModelData,
        transform: Transform,
        color: [f32; 4],
    ) -> Result<Self, RenderError> {
        validate_geometry(model)?;

        let segments = model
            .segments
            .iter()
            .enumerate()
            .map(|(i, segment)| {
                MeshBuffers::new(
                    &device.device,
                    &format!("{label} segment {i}"),
                    &segment.vertices,
                    &segment.indices,
                )
            })
            .collect();

        let uniforms = ObjectUniforms::new(&device.device, pipeline.object_layout(), label);
        let texture = TextureBinding::solid(
            &device.device,
            &device.queue,
            pipeline.texture_layout(),
            label,
            [255, 255, 255, 255],
        );

        Ok(Self {
            label: label.to_owned(),
            pipeline,
            segments,
            uniforms,
            texture,
            transform,
            color,
        })
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

/// Rejects unusable geometry before any buffers are created: an index
/// pointing outside its own segment's vertices would draw garbage on the GPU.
fn validate_geometry(model: &ModelData) -> Result<(), RenderError> {
    if model.segments.is_empty() {
        return Err(RenderError::EmptyModel(model.name.clone()));
    }
    for (i, segment) in model.segments.iter().enumerate() {
        let limit = segment.vertices.len() as u32;
        if segment.indices.iter().any(|&index| index >= limit) {
            return Err(RenderError::BadResource(format!(
                "model {:?} segment {i} indexes out of range",
                model.name
            )));
        }
    }
    Ok(())
}

impl RenderObject for StaticModel {
    fn label(&self) -> &str {
        &self.label
    }

    fn model_matrix(&self) -> Mat4 {
        self.transform.matrix()
    }

    fn draw(&self, ctx: &mut DrawCtx<'_>) -> Result<(), RenderError> {
        self.pipeline.bind(&mut ctx.pass);
        let mvp = ctx.view_projection * self.model_matrix();
        self.uniforms.write(ctx.queue, mvp, self.color, ctx.ambient);
        self.uniforms.bind(&mut ctx.pass);
        self.texture.bind(&mut ctx.pass);
        for segment in &self.segments {
            segment.draw(&mut ctx.pass);
        }
        Ok(())
    }
}

// ── tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(indices: Vec<u32>) -> ModelData {
        let mut model = ModelData::from_raw(
            "tri",
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2],
        );
        model.segments[0].indices = indices;
        model
    }

    #[test]
    fn well_formed_geometry_passes_validation() {
        assert!(validate_geometry(&triangle(vec![0, 1, 2])).is_ok());
    }

    #[test]
    fn empty_model_is_rejected() {
        let model = ModelData {
            name: "void".to_owned(),
            segments: Vec::new(),
        };
        assert!(matches!(
            validate_geometry(&model),
            Err(RenderError::EmptyModel(_))
        ));
    }

    #[test]
    fn out_of_range_indices_are_a_bad_resource() {
        assert!(matches!(
            validate_geometry(&triangle(vec![0, 1, 5])),
            Err(RenderError::BadResource(_))
        ));
    }
}
