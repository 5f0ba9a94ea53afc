//! Models: named vertex/color/primitive lists with optional nested children

use super::{Color, Position, Primitive, SceneError, Vertex};

/// A named geometric object
///
/// A model is built once by scene-construction code and only read by the
/// pipeline. It may be referenced by any number of [`Position`]s, and it
/// may itself nest child positions whose placement is relative to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    vertices: Vec<Vertex>,
    colors: Vec<Color>,
    primitives: Vec<Primitive>,
    children: Vec<Position>,
    visible: bool,
}

impl Model {
    /// Create an empty, visible model
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            colors: Vec::new(),
            primitives: Vec::new(),
            children: Vec::new(),
            visible: true,
        }
    }

    /// Model name used in diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a vertex, returning its index
    pub fn add_vertex(&mut self, vertex: impl Into<Vertex>) -> usize {
        self.vertices.push(vertex.into());
        self.vertices.len() - 1
    }

    /// Append several vertices, returning the index of the first one
    pub fn add_vertices<V: Into<Vertex>>(&mut self, vertices: impl IntoIterator<Item = V>) -> usize {
        let first = self.vertices.len();
        self.vertices.extend(vertices.into_iter().map(Into::into));
        first
    }

    /// Replace the vertex at `index`, returning the previous value
    pub fn replace_vertex(&mut self, index: usize, vertex: impl Into<Vertex>) -> Result<Vertex, SceneError> {
        let len = self.vertices.len();
        let slot = self
            .vertices
            .get_mut(index)
            .ok_or_else(|| SceneError::VertexOutOfRange {
                model: self.name.clone(),
                index,
                len,
            })?;
        Ok(std::mem::replace(slot, vertex.into()))
    }

    /// Append a color, returning its index
    pub fn add_color(&mut self, color: Color) -> usize {
        self.colors.push(color);
        self.colors.len() - 1
    }

    /// Append several colors, returning the index of the first one
    pub fn add_colors(&mut self, colors: impl IntoIterator<Item = Color>) -> usize {
        let first = self.colors.len();
        self.colors.extend(colors);
        first
    }

    /// Append a primitive
    pub fn add_primitive(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Append a line segment between vertices `v0`, `v1` colored by `c0`, `c1`
    pub fn add_line_segment(&mut self, v0: usize, v1: usize, c0: usize, c1: usize) {
        self.add_primitive(Primitive::line_segment(v0, v1, c0, c1));
    }

    /// Append a point primitive
    pub fn add_point(&mut self, vertex: usize, color: usize, radius: u32) {
        self.add_primitive(Primitive::point(vertex, color, radius));
    }

    /// Nest a child position, placed relative to this model
    pub fn add_child(&mut self, position: Position) {
        self.children.push(position);
    }

    /// Builder pattern: nest a child position
    #[must_use]
    pub fn with_child(mut self, position: Position) -> Self {
        self.add_child(position);
        self
    }

    /// Show or hide this model and everything nested below it
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Builder pattern: set visibility
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Whether the pipeline draws this model
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Vertex list
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Color list
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Primitive list, in draw order
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Nested child positions, in draw order
    pub fn children(&self) -> &[Position] {
        &self.children
    }
}
