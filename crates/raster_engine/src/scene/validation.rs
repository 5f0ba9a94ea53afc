//! Pre-render validation of models and scenes
//!
//! Structural issues (empty lists) are advisory. Index-range issues make a
//! single primitive undrawable; the pipeline skips such primitives and
//! reports them, or refuses the render when strict index checking is on.
//! Dangling model keys and self-nesting are fatal [`SceneError`]s.

use std::collections::HashSet;

use thiserror::Error;

use super::{Model, ModelKey, Position, Primitive, Scene, SceneError};

/// Which index list of a primitive is out of range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexList {
    /// Vertex index list
    Vertex,
    /// Color index list
    Color,
}

impl std::fmt::Display for IndexList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Color => f.write_str("color"),
        }
    }
}

/// A single finding of the validation pass
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Primitives exist but there is nothing for them to index
    #[error("model `{model}` has primitives but no vertices")]
    NoVertices {
        /// Model name
        model: String,
    },

    /// Vertices exist but nothing draws them
    #[error("model `{model}` has vertices but no primitives")]
    NoPrimitives {
        /// Model name
        model: String,
    },

    /// Primitives exist but no colors were supplied
    #[error("model `{model}` has primitives but no colors")]
    NoColors {
        /// Model name
        model: String,
    },

    /// A primitive index exceeds its list
    #[error("model `{model}`: primitive {primitive} ({kind}) uses {list} index {index} but the {list} list has {len} entries")]
    IndexOutOfRange {
        /// Model name
        model: String,
        /// Position of the primitive in the model's primitive list
        primitive: usize,
        /// Primitive variant name
        kind: &'static str,
        /// Offending list
        list: IndexList,
        /// Offending index
        index: usize,
        /// Length of the list
        len: usize,
    },
}

impl ValidationIssue {
    /// Whether this issue makes a primitive undrawable
    pub fn is_index_error(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }
}

/// Collected validation findings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// True when nothing was found
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// All findings, in discovery order
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Index-range findings only
    pub fn index_errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|issue| issue.is_index_error())
    }

    /// Emit every finding as a warning
    pub fn log_warnings(&self) {
        for issue in &self.issues {
            log::warn!("{issue}");
        }
    }

    fn extend(&mut self, other: Self) {
        self.issues.extend(other.issues);
    }
}

/// Check a single primitive's indices against its model
///
/// Returns the first offending index, vertex list before color list.
pub fn check_primitive(model: &Model, number: usize, primitive: &Primitive) -> Result<(), ValidationIssue> {
    let lists = [
        (IndexList::Vertex, primitive.vertex_indices(), model.vertices().len()),
        (IndexList::Color, primitive.color_indices(), model.colors().len()),
    ];
    for (list, indices, len) in lists {
        if let Some(&index) = indices.iter().find(|&&index| index >= len) {
            return Err(ValidationIssue::IndexOutOfRange {
                model: model.name().to_owned(),
                primitive: number,
                kind: primitive.kind(),
                list,
                index,
                len,
            });
        }
    }
    Ok(())
}

/// Validate one model's own lists (nested children are not followed)
pub fn validate_model(model: &Model) -> ValidationReport {
    let mut report = ValidationReport::default();
    let name = || model.name().to_owned();
    let has_primitives = !model.primitives().is_empty();

    if has_primitives && model.vertices().is_empty() {
        report.issues.push(ValidationIssue::NoVertices { model: name() });
    }
    if !has_primitives && !model.vertices().is_empty() {
        report.issues.push(ValidationIssue::NoPrimitives { model: name() });
    }
    if has_primitives && model.colors().is_empty() {
        report.issues.push(ValidationIssue::NoColors { model: name() });
    }

    report.issues.extend(
        model
            .primitives()
            .iter()
            .enumerate()
            .filter_map(|(number, primitive)| check_primitive(model, number, primitive).err()),
    );
    report
}

/// Which part of the scene graph a validation pass walks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coverage {
    /// Every position, hidden ones included
    All,
    /// Only subtrees the pipeline would draw
    Visible,
}

/// Validate every model reachable from the scene's positions
///
/// Each model is reported once even when several positions share it.
/// Invisible positions are still checked.
pub fn validate_scene(scene: &Scene) -> Result<ValidationReport, SceneError> {
    walk(scene, Coverage::All)
}

/// Validate only the models the pipeline would draw
///
/// Invisible positions and invisible models are skipped together with
/// everything nested below them, exactly as rendering skips them.
pub fn validate_visible(scene: &Scene) -> Result<ValidationReport, SceneError> {
    walk(scene, Coverage::Visible)
}

fn walk(scene: &Scene, coverage: Coverage) -> Result<ValidationReport, SceneError> {
    let mut walker = Walker {
        scene,
        coverage,
        path: Vec::new(),
        visited: HashSet::new(),
        report: ValidationReport::default(),
    };
    for position in scene.positions() {
        walker.visit(position)?;
    }
    Ok(walker.report)
}

struct Walker<'a> {
    scene: &'a Scene,
    coverage: Coverage,
    path: Vec<ModelKey>,
    visited: HashSet<ModelKey>,
    report: ValidationReport,
}

impl Walker<'_> {
    fn visit(&mut self, position: &Position) -> Result<(), SceneError> {
        let visible_only = self.coverage == Coverage::Visible;
        if visible_only && !position.is_visible() {
            return Ok(());
        }
        let key = position.model();
        let model = resolve(self.scene, position)?;
        if visible_only && !model.is_visible() {
            return Ok(());
        }
        if self.path.contains(&key) {
            return Err(SceneError::CyclicModel {
                model: model.name().to_owned(),
                position: position.name().to_owned(),
            });
        }
        if !self.visited.insert(key) {
            // Already validated; its subtree was checked for cycles on the first visit
            return Ok(());
        }

        self.report.extend(validate_model(model));

        self.path.push(key);
        for child in model.children() {
            self.visit(child)?;
        }
        self.path.pop();
        Ok(())
    }
}

/// Resolve a position's model key against the scene arena
pub fn resolve<'a>(scene: &'a Scene, position: &Position) -> Result<&'a Model, SceneError> {
    scene.model(position.model()).ok_or_else(|| SceneError::UnknownModel {
        scene: scene.name().to_owned(),
        position: position.name().to_owned(),
    })
}
