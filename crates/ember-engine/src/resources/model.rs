use std::path::Path;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::ResourceError;

/// Vertex layout shared by every mesh pipeline.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// One indexed mesh segment; maps to one vertex/index buffer pair on the GPU.
#[derive(Debug, Clone)]
pub struct MeshSegment {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

/// CPU-side model geometry, segments in source order.
///
/// Segment order is load-bearing: a `StaticModel` built from this model draws
/// its segments in exactly this order every frame.
#[derive(Debug, Clone)]
pub struct ModelData {
    pub name: String,
    pub segments: Vec<MeshSegment>,
}

impl ModelData {
    /// Loads a Wavefront `.obj` file. Each object/group in the file becomes
    /// one segment, in file order.
    pub fn load_obj(path: &Path) -> Result<Self, ResourceError> {
        let load_options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ignore_points: true,
            ignore_lines: true,
        };
        let (models, _materials) =
            tobj::load_obj(path, &load_options).map_err(|source| ResourceError::Model {
                path: path.to_path_buf(),
                source,
            })?;

        let mut segments = Vec::with_capacity(models.len());
        for model in models {
            let mesh = model.mesh;
            let vertex_count = mesh.positions.len() / 3;
            let mut vertices = Vec::with_capacity(vertex_count);

            for i in 0..vertex_count {
                let position = [
                    mesh.positions[i * 3],
                    mesh.positions[i * 3 + 1],
                    mesh.positions[i * 3 + 2],
                ];
                let normal = if mesh.normals.len() >= (i + 1) * 3 {
                    [
                        mesh.normals[i * 3],
                        mesh.normals[i * 3 + 1],
                        mesh.normals[i * 3 + 2],
                    ]
                } else {
                    [0.0; 3]
                };
                let uv = if mesh.texcoords.len() >= (i + 1) * 2 {
                    [mesh.texcoords[i * 2], mesh.texcoords[i * 2 + 1]]
                } else {
                    [0.0; 2]
                };
                vertices.push(MeshVertex {
                    position,
                    normal,
                    uv,
                });
            }

            let mut segment = MeshSegment {
                vertices,
                indices: mesh.indices,
            };
            ensure_normals(&mut segment);
            segments.push(segment);
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self { name, segments })
    }

    /// Builds a single-segment model from inline geometry
    /// (the `rawstaticmodel` scene declaration). Missing normals are computed
    /// flat from the triangles.
    pub fn from_raw(name: &str, positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        let mut segment = MeshSegment {
            vertices: positions
                .into_iter()
                .map(|position| MeshVertex {
                    position,
                    ..Default::default()
                })
                .collect(),
            indices,
        };
        ensure_normals(&mut segment);

        Self {
            name: name.to_owned(),
            segments: vec![segment],
        }
    }
}

/// Accumulates area-weighted face normals per vertex, then normalizes.
pub fn compute_flat_normals(vertices: &mut [MeshVertex], indices: &[u32]) {
    for v in vertices.iter_mut() {
        v.normal = [0.0; 3];
    }

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if i0 >= vertices.len() || i1 >= vertices.len() || i2 >= vertices.len() {
            continue;
        }
        let p0 = Vec3::from(vertices[i0].position);
        let p1 = Vec3::from(vertices[i1].position);
        let p2 = Vec3::from(vertices[i2].position);
        // Magnitude weights by triangle area.
        let face = (p1 - p0).cross(p2 - p0);
        for i in [i0, i1, i2] {
            vertices[i].normal = (Vec3::from(vertices[i].normal) + face).into();
        }
    }

    for v in vertices.iter_mut() {
        let n = Vec3::from(v.normal);
        v.normal = if n.length() > 1e-6 {
            n.normalize().into()
        } else {
            Vec3::Y.into()
        };
    }
}

fn ensure_normals(segment: &mut MeshSegment) {
    let missing = segment
        .vertices
        .iter()
        .any(|v| Vec3::from(v.normal).length_squared() < 1e-6);
    if missing {
        compute_flat_normals(&mut segment.vertices, &segment.indices);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_computes_unit_normals() {
        let model = ModelData::from_raw(
            "tri",
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2],
        );

        assert_eq!(model.segments.len(), 1);
        for v in &model.segments[0].vertices {
            let n = Vec3::from(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-5);
            // CCW triangle in the XY plane faces +Z.
            assert!(n.z > 0.99);
        }
    }

    #[test]
    fn degenerate_geometry_falls_back_to_up_normal() {
        let model = ModelData::from_raw(
            "degenerate",
            vec![[0.0; 3], [0.0; 3], [0.0; 3]],
            vec![0, 1, 2],
        );
        for v in &model.segments[0].vertices {
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn obj_segments_preserve_file_order() {
        let dir = std::env::temp_dir().join("ember-model-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("two_tris.obj");
        std::fs::write(
            &path,
            "o first\n\
             v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             f 1 2 3\n\
             o second\n\
             v 0 0 1\nv 1 0 1\nv 0 1 1\n\
             f 4 5 6\n",
        )
        .unwrap();

        let model = ModelData::load_obj(&path).unwrap();
        assert_eq!(model.segments.len(), 2);
        assert_eq!(model.segments[0].vertices[0].position[2], 0.0);
        assert_eq!(model.segments[1].vertices[0].position[2], 1.0);
    }
}
