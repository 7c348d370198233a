use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

use crate::device::RenderDevice;
use crate::render::{LinePipeline, MeshPipeline, RenderError, SceneObject};
use crate::resources::ModelData;
use crate::space::Transform;

use super::{DynamicModel, Line, StaticModel};

/// Builds render objects from scene-level declarations.
///
/// The scene loader only ever talks to this trait, so loading and teardown
/// semantics are testable with a stub implementation and no device.
pub trait RenderObjectFactory {
    fn line(
        &self,
        label: &str,
        from: Vec3,
        to: Vec3,
        color: [f32; 4],
    ) -> Result<SceneObject, RenderError>;

    fn static_model(
        &self,
        label: &str,
        model: &ModelData,
        transform: Transform,
        color: [f32; 4],
    ) -> Result<SceneObject, RenderError>;

    fn dynamic_model(
        &self,
        label: &str,
        model: &ModelData,
        transform: Transform,
        color: [f32; 4],
    ) -> Result<SceneObject, RenderError>;
}

/// Factory backed by a real device; pipelines are built once and shared by
/// every object of the same kind.
pub struct GpuObjectFactory {
    device: RenderDevice,
    mesh_pipeline: Rc<MeshPipeline>,
    line_pipeline: Rc<LinePipeline>,
}

impl GpuObjectFactory {
    pub fn new(device: RenderDevice) -> Self {
        let mesh_pipeline = Rc::new(MeshPipeline::new(
            &device.device,
            device.color_format,
            device.depth_format,
        ));
        let line_pipeline = Rc::new(LinePipeline::new(
            &device.device,
            device.color_format,
            device.depth_format,
        ));

        Self {
            device,
            mesh_pipeline,
            line_pipeline,
        }
    }
}

impl RenderObjectFactory for GpuObjectFactory {
    fn line(
        &self,
        label: &str,
        from: Vec3,
        to: Vec3,
        color: [f32; 4],
    ) -> Result<SceneObject, RenderError> {
        let line = Line::new(
            &self.device,
            Rc::clone(&self.line_pipeline),
            label,
            from,
            to,
            color,
        );
        Ok(Rc::new(RefCell::new(line)))
    }

    fn static_model(
        &self,
        label: &str,
        model: &ModelData,
        transform: Transform,
        color: [f32; 4],
    ) -> Result<SceneObject, RenderError> {
        let object = StaticModel::new(
            &self.device,
            Rc::clone(&self.mesh_pipeline),
            label,
            model,
            transform,
            color,
        )?;
        Ok(Rc::new(RefCell::new(object)))
    }

    fn dynamic_model(
        &self,
        label: &str,
        model: &ModelData,
        transform: Transform,
        color: [f32; 4],
    ) -> Result<SceneObject, RenderError> {
        let object = DynamicModel::new(
            &self.device,
            Rc::clone(&self.mesh_pipeline),
            label,
            model,
            transform,
            color,
        )?;
        Ok(Rc::new(RefCell::new(object)))
    }
}
