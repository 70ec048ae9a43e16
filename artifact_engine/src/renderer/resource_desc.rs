/// Shader and drawable descriptors
///
/// Resources follow a build-then-create flow: describe the resource, then call
/// `create` against a `RenderContext`, which validates the descriptor and hands
/// it to the backend. The returned handle is owned by the backend.

use crate::error::{Error, Result};
use crate::flow::RenderContext;
use crate::renderer::{DrawableHandle, ShaderHandle};

// ===== SHADERS =====

/// Shader program descriptor (vertex + fragment source)
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderDesc {
    pub name: String,
    pub vertex_source: String,
    pub fragment_source: String,
}

impl ShaderDesc {
    pub fn new(
        name: impl Into<String>,
        vertex_source: impl Into<String>,
        fragment_source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            vertex_source: vertex_source.into(),
            fragment_source: fragment_source.into(),
        }
    }

    /// Check that both stages carry source text
    pub fn validate(&self) -> Result<()> {
        if self.vertex_source.trim().is_empty() {
            return Err(Error::InvalidResource(format!(
                "Shader '{}' has an empty vertex source", self.name
            )));
        }
        if self.fragment_source.trim().is_empty() {
            return Err(Error::InvalidResource(format!(
                "Shader '{}' has an empty fragment source", self.name
            )));
        }
        Ok(())
    }

    /// Validate and create the shader on `context`'s backend
    pub fn create(&self, context: &RenderContext) -> Result<ShaderHandle> {
        context.create_shader(self)
    }
}

// ===== VERTEX LAYOUT =====

/// Vertex attribute data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Float,
    Vec2,
    Vec3,
    Vec4,
    Mat4,
}

impl DataType {
    /// Number of f32 components
    pub fn component_count(&self) -> usize {
        match self {
            DataType::Float => 1,
            DataType::Vec2 => 2,
            DataType::Vec3 => 3,
            DataType::Vec4 => 4,
            DataType::Mat4 => 16,
        }
    }

    pub fn size_in_bytes(&self) -> usize {
        self.component_count() * std::mem::size_of::<f32>()
    }
}

/// Named vertex attribute
#[derive(Debug, Clone, PartialEq)]
pub struct VertexAttribute {
    pub name: String,
    pub data_type: DataType,
}

/// Interleaved vertex layout, attributes in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BufferLayout {
    attributes: Vec<VertexAttribute>,
}

impl BufferLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute
    pub fn with(mut self, data_type: DataType, name: impl Into<String>) -> Self {
        self.attributes.push(VertexAttribute {
            name: name.into(),
            data_type,
        });
        self
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// f32 components per vertex
    pub fn stride_components(&self) -> usize {
        self.attributes.iter().map(|a| a.data_type.component_count()).sum()
    }

    /// Bytes per vertex
    pub fn stride_bytes(&self) -> usize {
        self.stride_components() * std::mem::size_of::<f32>()
    }

    /// Byte offset of attribute `name` within a vertex
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        let mut offset = 0;
        for attribute in &self.attributes {
            if attribute.name == name {
                return Some(offset);
            }
            offset += attribute.data_type.size_in_bytes();
        }
        None
    }
}

// ===== DRAWABLES =====

/// Indexed geometry descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct DrawableDesc {
    pub name: String,
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    pub layout: BufferLayout,
}

impl DrawableDesc {
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<f32>,
        indices: Vec<u32>,
        layout: BufferLayout,
    ) -> Self {
        Self {
            name: name.into(),
            vertices,
            indices,
            layout,
        }
    }

    /// Number of whole vertices (0 for an empty layout)
    pub fn vertex_count(&self) -> usize {
        let stride = self.layout.stride_components();
        if stride == 0 {
            return 0;
        }
        self.vertices.len() / stride
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Check layout, vertex data and index range
    pub fn validate(&self) -> Result<()> {
        if self.layout.is_empty() {
            return Err(Error::InvalidResource(format!(
                "Drawable '{}' has an empty buffer layout", self.name
            )));
        }

        let stride = self.layout.stride_components();
        if self.vertices.is_empty() || self.vertices.len() % stride != 0 {
            return Err(Error::InvalidResource(format!(
                "Drawable '{}': {} floats is not a whole number of {}-component vertices",
                self.name, self.vertices.len(), stride
            )));
        }

        if self.indices.is_empty() {
            return Err(Error::InvalidResource(format!(
                "Drawable '{}' has no indices", self.name
            )));
        }

        let vertex_count = self.vertex_count();
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(Error::InvalidResource(format!(
                "Drawable '{}': index {} out of range (vertex count = {})",
                self.name, bad, vertex_count
            )));
        }

        Ok(())
    }

    /// Validate and upload the geometry on `context`'s backend
    pub fn create(&self, context: &RenderContext) -> Result<DrawableHandle> {
        context.create_drawable(self)
    }
}

#[cfg(test)]
#[path = "resource_desc_tests.rs"]
mod tests;
