//! Scene lifecycle: description parsing, loading, running, closing.

use thiserror::Error;

use crate::render::{ChainError, RenderError};
use crate::resources::ResourceError;

mod description;
mod entity;
mod lifecycle;

pub use description::{DynamicObjectDecl, ResourceDecl, SceneDescription, StaticObjectDecl};
pub use entity::Entity;
pub use lifecycle::{Scene, SceneState};

/// Failures surfaced by scene operations. Loading aborts only on errors that
/// invalidate the whole document; per-item problems are logged and skipped.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("operation not allowed while scene is {0:?}")]
    InvalidState(SceneState),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error("scene description is not a valid document: {0}")]
    BadDescription(#[from] serde_json::Error),

    #[error("unknown resource {0:?}")]
    UnknownResource(String),

    #[error("entity {0:?} already exists")]
    DuplicateEntity(String),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Chain(#[from] ChainError),
}
