use std::rc::Rc;

use crate::render::{RenderObject, SceneObject};
use crate::space::Transform;

/// A named, script-addressable handle to a dynamic render object.
///
/// The entity holds the strong reference; the render chain only observes the
/// object weakly. Dropping the entity therefore removes the object from the
/// next pass automatically.
pub struct Entity {
    name: String,
    object: SceneObject,
}

impl Entity {
    pub fn new(name: impl Into<String>, object: SceneObject) -> Self {
        Self {
            name: name.into(),
            object,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object(&self) -> SceneObject {
        Rc::clone(&self.object)
    }

    /// Applies `f` to the object's transform. Returns false when the object
    /// is not movable.
    pub fn update_transform(&self, f: impl FnOnce(&mut Transform)) -> bool {
        let mut object = self.object.borrow_mut();
        match object.transform_mut() {
            Some(transform) => {
                f(transform);
                true
            }
            None => false,
        }
    }
}
