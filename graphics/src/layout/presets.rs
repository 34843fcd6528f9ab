//! Element tables shared by the engine's vertex shaders.

use super::element::{InputElement, VertexFormat, VertexSemantic};

/// Input elements of the shadow-map vertex shader.
///
/// - Slot 0 (per vertex, 32 bytes): position, texcoord, normal
/// - Slot 1 (per vertex, 24 bytes): tangent, bitangent
/// - Slot 2 (per instance, 64 bytes): the four rows of the instance transform
pub const SHADOW_INPUT_ELEMENTS: [InputElement; 9] = [
    InputElement::per_vertex(VertexSemantic::Position, 0, VertexFormat::Float3, 0, 0),
    InputElement::per_vertex(VertexSemantic::TexCoord, 0, VertexFormat::Float2, 0, 12),
    InputElement::per_vertex(VertexSemantic::Normal, 0, VertexFormat::Float3, 0, 20),
    InputElement::per_vertex(VertexSemantic::Tangent, 0, VertexFormat::Float3, 1, 0),
    InputElement::per_vertex(VertexSemantic::Bitangent, 0, VertexFormat::Float3, 1, 12),
    instance_row(0, 0),
    instance_row(1, 16),
    instance_row(2, 32),
    instance_row(3, 48),
];

/// One row of the per-instance transform in slot 2.
const fn instance_row(row: u32, offset: u32) -> InputElement {
    InputElement::per_instance(
        VertexSemantic::InstanceTransform,
        row,
        VertexFormat::Float4,
        2,
        offset,
        1,
    )
}
