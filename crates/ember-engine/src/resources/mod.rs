//! Resource provider: model geometry and scene description access.
//!
//! The handler caches models by declared name for the lifetime of one scene.
//! Asset decoding beyond `.obj` geometry is out of scope; callers get opaque
//! `ModelData` handles.

mod handler;
mod model;

pub use handler::ResourceHandler;
pub use model::{compute_flat_normals, MeshSegment, MeshVertex, ModelData};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load model {path}")]
    Model {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },
}
