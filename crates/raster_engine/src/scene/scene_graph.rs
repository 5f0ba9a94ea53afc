//! Scene: one camera, a model arena and an ordered list of positions
//!
//! Models are stored once in a slot-map arena and referenced by
//! [`ModelKey`], so any number of positions (top-level or nested) can share
//! a model without shared ownership, and the hierarchy stays acyclic in
//! memory. Cycles expressed through keys are rejected by
//! [`validate_scene`](super::validation::validate_scene).

use slotmap::SlotMap;
use thiserror::Error;

use super::{Camera, Model, Position};

slotmap::new_key_type! {
    /// Handle of a model in a [`Scene`]'s arena
    pub struct ModelKey;
}

/// Scene structure errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// A position names a model key that is not in the arena
    #[error("position `{position}` references a model that is not in scene `{scene}`")]
    UnknownModel {
        /// Scene name
        scene: String,
        /// Offending position
        position: String,
    },

    /// A model is nested inside itself
    #[error("model `{model}` is nested inside itself via position `{position}`")]
    CyclicModel {
        /// Model that closes the cycle
        model: String,
        /// Position that closes the cycle
        position: String,
    },

    /// Explicit vertex replacement outside the vertex list
    #[error("model `{model}` has no vertex {index} (vertex count {len})")]
    VertexOutOfRange {
        /// Model name
        model: String,
        /// Requested index
        index: usize,
        /// Vertex list length
        len: usize,
    },
}

/// The top-level render request
///
/// Rendering order follows [`positions`](Self::positions) order. The
/// pipeline only ever borrows a scene immutably, so a scene can be rendered
/// repeatedly, including under different cameras via [`set_camera`](Self::set_camera).
#[derive(Debug, Clone)]
pub struct Scene {
    name: String,
    camera: Camera,
    models: SlotMap<ModelKey, Model>,
    positions: Vec<Position>,
    debug: bool,
}

impl Scene {
    /// Create an empty scene viewed through `camera`
    pub fn new(name: impl Into<String>, camera: Camera) -> Self {
        Self {
            name: name.into(),
            camera,
            models: SlotMap::with_key(),
            positions: Vec::new(),
            debug: false,
        }
    }

    /// Builder pattern: enable per-stage debug logging for renders of this scene
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Store a model in the arena
    pub fn add_model(&mut self, model: Model) -> ModelKey {
        self.models.insert(model)
    }

    /// Append a top-level position; it is drawn after every earlier one
    pub fn add_position(&mut self, position: Position) {
        self.positions.push(position);
    }

    /// Look up a model
    pub fn model(&self, key: ModelKey) -> Option<&Model> {
        self.models.get(key)
    }

    /// Look up a model for editing between renders
    pub fn model_mut(&mut self, key: ModelKey) -> Option<&mut Model> {
        self.models.get_mut(key)
    }

    /// Number of models in the arena
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Top-level positions, in draw order
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// First top-level position with the given name
    pub fn position(&self, name: &str) -> Option<&Position> {
        self.positions.iter().find(|position| position.name() == name)
    }

    /// First top-level position with the given name, for editing between renders
    pub fn position_mut(&mut self, name: &str) -> Option<&mut Position> {
        self.positions.iter_mut().find(|position| position.name() == name)
    }

    /// Current camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Swap the camera, leaving all geometry untouched
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether per-stage debug logging is requested
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Enable or disable per-stage debug logging
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    fn camera() -> Camera {
        Camera::orthographic(-1.0, 1.0, -1.0, 1.0).unwrap()
    }

    #[test]
    fn test_shared_model_across_positions() {
        let mut scene = Scene::new("shared", camera());
        let key = scene.add_model(Model::new("cube"));
        scene.add_position(Position::new("left", key).with_translation(Vec3::new(-1.0, 0.0, 0.0)));
        scene.add_position(Position::new("right", key).with_translation(Vec3::new(1.0, 0.0, 0.0)));

        assert_eq!(scene.model_count(), 1);
        assert_eq!(scene.positions().len(), 2);
        assert_eq!(scene.position("right").unwrap().model(), key);
        assert_eq!(scene.model(key).unwrap().name(), "cube");
    }

    #[test]
    fn test_position_lookup_preserves_order() {
        let mut scene = Scene::new("ordered", camera());
        let key = scene.add_model(Model::new("m"));
        for name in ["a", "b", "c"] {
            scene.add_position(Position::new(name, key));
        }
        let names: Vec<_> = scene.positions().iter().map(Position::name).collect();
        assert_eq!(names, ["a", "b", "c"]);

        scene.position_mut("b").unwrap().set_visible(false);
        assert!(!scene.position("b").unwrap().is_visible());
        assert!(scene.position("missing").is_none());
    }

    #[test]
    fn test_set_camera_keeps_geometry() {
        let mut scene = Scene::new("swap", camera());
        let key = scene.add_model(Model::new("m"));
        scene.add_position(Position::new("p", key));

        let perspective = Camera::perspective(-1.0, 1.0, -1.0, 1.0, 0.5).unwrap();
        scene.set_camera(perspective.clone());
        assert_eq!(scene.camera(), &perspective);
        assert_eq!(scene.positions().len(), 1);
    }
}
