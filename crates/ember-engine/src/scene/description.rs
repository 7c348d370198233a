//! Scene description documents.
//!
//! A scene is declared as one JSON document with three optional sections:
//! `resources`, `staticObjects`, and `dynamicObjects`. The document is parsed
//! in two stages: the section layout first (failure here aborts the load),
//! then each item individually, so one malformed item is warned about and
//! skipped while the rest of its section still loads.

use serde::Deserialize;

use super::SceneError;

/// Section layout of a scene document. Items stay untyped until the loader
/// looks at them one by one.
#[derive(Debug, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub resources: Vec<serde_json::Value>,

    #[serde(default, rename = "staticObjects")]
    pub static_objects: Vec<serde_json::Value>,

    #[serde(default, rename = "dynamicObjects")]
    pub dynamic_objects: Vec<serde_json::Value>,
}

impl SceneDescription {
    pub fn parse(document: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(document)?)
    }
}

fn default_color() -> [f32; 4] {
    [1.0, 1.0, 1.0, 1.0]
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// One item of the `resources` section, discriminated by `type`. Only 3D
/// model resources exist today.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ResourceDecl {
    #[serde(rename = "model3d")]
    Model3d {
        #[serde(rename = "resourcename")]
        name: String,
        #[serde(rename = "filename")]
        file: String,
    },
}

/// One item of the `staticObjects` section, discriminated by `type`.
///
/// `name` is optional everywhere; it only feeds log and debug labels, and the
/// loader substitutes a type-derived fallback when it is absent.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum StaticObjectDecl {
    #[serde(rename = "line")]
    Line {
        #[serde(default)]
        name: String,
        tail: [f32; 3],
        head: [f32; 3],
        #[serde(default = "default_color")]
        color: [f32; 4],
    },

    #[serde(rename = "staticmodel")]
    StaticModel {
        #[serde(default)]
        name: String,
        resource: String,
        #[serde(default)]
        position: [f32; 3],
        #[serde(default = "default_scale")]
        scale: [f32; 3],
        #[serde(default = "default_color")]
        color: [f32; 4],
    },

    /// Inline geometry; flat normals are computed when absent.
    #[serde(rename = "rawstaticmodel")]
    RawStaticModel {
        #[serde(default)]
        name: String,
        vertices: Vec<[f32; 3]>,
        indices: Vec<u32>,
        #[serde(default)]
        position: [f32; 3],
        #[serde(default = "default_color")]
        color: [f32; 4],
    },
}

/// One item of the `dynamicObjects` section: a named instance of a loaded
/// model resource. No `type` field; every dynamic object is a model instance.
#[derive(Debug, Deserialize)]
pub struct DynamicObjectDecl {
    pub name: String,
    pub resource: String,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
    #[serde(default = "default_color")]
    pub color: [f32; 4],
}
