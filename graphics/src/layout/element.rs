//! Input element descriptors.
//!
//! An [`InputElement`] describes one shader input: which semantic it carries,
//! its data format, the vertex-buffer slot it is read from, and how that slot
//! advances (per vertex or per instance).

use std::fmt;

/// Semantic meaning of an input element.
///
/// Semantics name the data an element carries. Together with the semantic
/// index they identify an element uniquely within a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexSemantic {
    /// Vertex position (typically float3).
    Position,
    /// Texture coordinates (typically float2).
    TexCoord,
    /// Vertex normal (typically float3).
    Normal,
    /// Tangent vector (float3 or float4).
    Tangent,
    /// Bitangent vector (typically float3).
    Bitangent,
    /// Vertex color (typically float4 or unorm4).
    Color,
    /// Bone indices for skinning (typically uint4).
    BlendIndices,
    /// Bone weights for skinning (typically float4).
    BlendWeights,
    /// One row of a per-instance world transform (float4).
    InstanceTransform,
}

impl VertexSemantic {
    /// Upper-case semantic name, as written in shader signatures.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Position => "POSITION",
            Self::TexCoord => "TEXCOORD",
            Self::Normal => "NORMAL",
            Self::Tangent => "TANGENT",
            Self::Bitangent => "BITANGENT",
            Self::Color => "COLOR",
            Self::BlendIndices => "BLENDINDICES",
            Self::BlendWeights => "BLENDWEIGHTS",
            Self::InstanceTransform => "INSTANCE_TRANSFORM",
        }
    }
}

impl fmt::Display for VertexSemantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scalar type of a vertex format or shader input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// 32-bit float, or a normalized integer read as float.
    Float,
    /// Signed integer.
    Sint,
    /// Unsigned integer.
    Uint,
}

/// Format of an input element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    /// Single 32-bit float.
    Float,
    /// Two 32-bit floats.
    Float2,
    /// Three 32-bit floats.
    Float3,
    /// Four 32-bit floats.
    Float4,
    /// Single 32-bit signed integer.
    Int,
    /// Two 32-bit signed integers.
    Int2,
    /// Three 32-bit signed integers.
    Int3,
    /// Four 32-bit signed integers.
    Int4,
    /// Single 32-bit unsigned integer.
    Uint,
    /// Two 32-bit unsigned integers.
    Uint2,
    /// Three 32-bit unsigned integers.
    Uint3,
    /// Four 32-bit unsigned integers.
    Uint4,
    /// Four 8-bit unsigned integers (normalized to 0.0-1.0).
    Unorm8x4,
    /// Four 8-bit signed integers (normalized to -1.0-1.0).
    Snorm8x4,
}

impl VertexFormat {
    /// Get the size in bytes of this format.
    pub const fn size(&self) -> u32 {
        match self {
            Self::Float | Self::Int | Self::Uint => 4,
            Self::Float2 | Self::Int2 | Self::Uint2 => 8,
            Self::Float3 | Self::Int3 | Self::Uint3 => 12,
            Self::Float4 | Self::Int4 | Self::Uint4 => 16,
            Self::Unorm8x4 | Self::Snorm8x4 => 4,
        }
    }

    /// Number of components the shader sees.
    pub const fn components(&self) -> u8 {
        match self {
            Self::Float | Self::Int | Self::Uint => 1,
            Self::Float2 | Self::Int2 | Self::Uint2 => 2,
            Self::Float3 | Self::Int3 | Self::Uint3 => 3,
            Self::Float4 | Self::Int4 | Self::Uint4 | Self::Unorm8x4 | Self::Snorm8x4 => 4,
        }
    }

    /// Scalar type the shader sees.
    pub const fn scalar_kind(&self) -> ScalarKind {
        match self {
            Self::Float
            | Self::Float2
            | Self::Float3
            | Self::Float4
            | Self::Unorm8x4
            | Self::Snorm8x4 => ScalarKind::Float,
            Self::Int | Self::Int2 | Self::Int3 | Self::Int4 => ScalarKind::Sint,
            Self::Uint | Self::Uint2 | Self::Uint3 | Self::Uint4 => ScalarKind::Uint,
        }
    }
}

/// How the vertex buffer advances: per-vertex or per-instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VertexStepMode {
    /// Buffer advances once per vertex (default).
    #[default]
    Vertex,
    /// Buffer advances once per `instance_step_rate` instances.
    Instance,
}

/// A single input element description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputElement {
    /// Semantic meaning of this element.
    pub semantic: VertexSemantic,
    /// Distinguishes elements sharing a semantic (e.g. the rows of a matrix).
    pub semantic_index: u32,
    /// Data format of this element.
    pub format: VertexFormat,
    /// Index of the vertex buffer slot this element reads from.
    pub input_slot: u32,
    /// Byte offset within the slot, or [`InputElement::APPEND_ALIGNED`].
    pub offset: u32,
    /// Per-vertex or per-instance data.
    pub step_mode: VertexStepMode,
    /// Instances drawn before advancing; must be 0 for per-vertex data.
    pub instance_step_rate: u32,
}

impl InputElement {
    /// Place the element directly after the previous element in the same slot.
    pub const APPEND_ALIGNED: u32 = u32::MAX;

    /// Create a per-vertex element.
    pub const fn per_vertex(
        semantic: VertexSemantic,
        semantic_index: u32,
        format: VertexFormat,
        input_slot: u32,
        offset: u32,
    ) -> Self {
        Self {
            semantic,
            semantic_index,
            format,
            input_slot,
            offset,
            step_mode: VertexStepMode::Vertex,
            instance_step_rate: 0,
        }
    }

    /// Create a per-instance element advancing every `instance_step_rate` instances.
    pub const fn per_instance(
        semantic: VertexSemantic,
        semantic_index: u32,
        format: VertexFormat,
        input_slot: u32,
        offset: u32,
        instance_step_rate: u32,
    ) -> Self {
        Self {
            semantic,
            semantic_index,
            format,
            input_slot,
            offset,
            step_mode: VertexStepMode::Instance,
            instance_step_rate,
        }
    }
}

impl fmt::Display for InputElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.semantic, self.semantic_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_format_size() {
        assert_eq!(VertexFormat::Float.size(), 4);
        assert_eq!(VertexFormat::Float2.size(), 8);
        assert_eq!(VertexFormat::Float3.size(), 12);
        assert_eq!(VertexFormat::Float4.size(), 16);
        assert_eq!(VertexFormat::Unorm8x4.size(), 4);
    }

    #[test]
    fn test_vertex_format_shader_view() {
        assert_eq!(VertexFormat::Unorm8x4.components(), 4);
        assert_eq!(VertexFormat::Unorm8x4.scalar_kind(), ScalarKind::Float);
        assert_eq!(VertexFormat::Int3.scalar_kind(), ScalarKind::Sint);
        assert_eq!(VertexFormat::Uint.components(), 1);
    }

    #[test]
    fn test_element_constructors() {
        let position = InputElement::per_vertex(
            VertexSemantic::Position,
            0,
            VertexFormat::Float3,
            0,
            0,
        );
        assert_eq!(position.step_mode, VertexStepMode::Vertex);
        assert_eq!(position.instance_step_rate, 0);

        let row = InputElement::per_instance(
            VertexSemantic::InstanceTransform,
            2,
            VertexFormat::Float4,
            2,
            32,
            1,
        );
        assert_eq!(row.step_mode, VertexStepMode::Instance);
        assert_eq!(row.to_string(), "INSTANCE_TRANSFORM2");
    }
}
