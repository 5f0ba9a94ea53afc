//! Placements of models in scene space

use super::ModelKey;
use crate::foundation::math::{Mat4, Transform, Vec3};

/// A placement of one [`Model`](super::Model) in its parent's space
///
/// Top-level positions are placed in scene (world) space; positions nested
/// in a model are placed relative to that model. The position owns its
/// placement matrix; the referenced model is shared and never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    name: String,
    model: ModelKey,
    placement: Mat4,
    visible: bool,
}

impl Position {
    /// Place `model` at the origin of its parent space
    pub fn new(name: impl Into<String>, model: ModelKey) -> Self {
        Self {
            name: name.into(),
            model,
            placement: Mat4::identity(),
            visible: true,
        }
    }

    /// Builder pattern: place by translation only
    #[must_use]
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.placement = Mat4::new_translation(&translation);
        self
    }

    /// Builder pattern: place by a translation/rotation/scale transform
    #[must_use]
    pub fn with_transform(mut self, transform: &Transform) -> Self {
        self.placement = transform.to_matrix();
        self
    }

    /// Builder pattern: place by an explicit matrix
    #[must_use]
    pub fn with_matrix(mut self, matrix: Mat4) -> Self {
        self.placement = matrix;
        self
    }

    /// Builder pattern: set visibility
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Move this placement by `offset` in parent space
    pub fn translate(&mut self, offset: Vec3) {
        self.placement = Mat4::new_translation(&offset) * self.placement;
    }

    /// Replace the placement matrix
    pub fn set_matrix(&mut self, matrix: Mat4) {
        self.placement = matrix;
    }

    /// Show or hide this position and everything nested below it
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Position name used in diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key of the placed model in the owning scene's model arena
    pub fn model(&self) -> ModelKey {
        self.model
    }

    /// Placement matrix from model space to parent space
    pub fn matrix(&self) -> &Mat4 {
        &self.placement
    }

    /// Whether the pipeline visits this position
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point3;
    use approx::assert_relative_eq;
    use slotmap::KeyData;

    fn any_key() -> ModelKey {
        ModelKey::from(KeyData::from_ffi(1))
    }

    #[test]
    fn test_translate_accumulates() {
        let mut position = Position::new("p", any_key()).with_translation(Vec3::new(1.0, 0.0, 0.0));
        position.translate(Vec3::new(0.0, 2.0, -3.0));

        let moved = position.matrix().transform_point(&Point3::origin());
        assert_relative_eq!(moved, Point3::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn test_transform_placement() {
        let transform = Transform::from_translation(Vec3::new(0.0, 0.0, -5.0)).with_uniform_scale(2.0);
        let position = Position::new("p", any_key()).with_transform(&transform);

        let moved = position.matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(moved, Point3::new(2.0, 0.0, -5.0));
    }
}
