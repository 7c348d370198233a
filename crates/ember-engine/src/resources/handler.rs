use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::model::ModelData;
use super::ResourceError;

/// Name-addressed model cache for one scene session.
///
/// Exactly one handler is owned per scene; entries live until the scene
/// closes. Model handles are shared by `Rc` so the scene and its render
/// objects can reference the same geometry without copies.
pub struct ResourceHandler {
    root: PathBuf,
    models: HashMap<String, Rc<ModelData>>,
}

impl ResourceHandler {
    /// `root` is the directory containing one subdirectory per scene.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            models: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads a model file relative to the resource root.
    pub fn load_model(&self, filename: &str) -> Result<ModelData, ResourceError> {
        ModelData::load_obj(&self.root.join(filename))
    }

    /// Registers `model` under `name`.
    ///
    /// Collision policy: a later declaration wins and the replacement is
    /// warned about, so scene files stay a last-write-wins document.
    pub fn add_model(&mut self, name: &str, model: ModelData) {
        if self
            .models
            .insert(name.to_owned(), Rc::new(model))
            .is_some()
        {
            log::warn!("resource {name:?} declared more than once; later declaration wins");
        }
    }

    /// Looks up a model by declared name. Absence is an expected condition,
    /// not an error; callers decide whether it is fatal for them.
    pub fn model(&self, name: &str) -> Option<Rc<ModelData>> {
        self.models.get(name).cloned()
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Reads the scene description document for `scene_name`.
    pub fn read_description(&self, scene_name: &str) -> Result<String, ResourceError> {
        let path = self.root.join(scene_name).join("scene.json");
        std::fs::read_to_string(&path).map_err(|source| ResourceError::Io { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_declaration_wins_on_collision() {
        let mut handler = ResourceHandler::new("unused");
        handler.add_model("cube", ModelData::from_raw("a", vec![], vec![]));
        handler.add_model("cube", ModelData::from_raw("b", vec![], vec![]));

        assert_eq!(handler.model_count(), 1);
        assert_eq!(handler.model("cube").unwrap().name, "b");
    }

    #[test]
    fn unknown_name_is_none() {
        let handler = ResourceHandler::new("unused");
        assert!(handler.model("missing").is_none());
    }
}
