//! Type conversions between Umbra types and wgpu types.

use crate::layout::{VertexFormat, VertexStepMode};

/// Convert VertexFormat to wgpu vertex format.
pub fn convert_vertex_format(format: VertexFormat) -> wgpu::VertexFormat {
    match format {
        VertexFormat::Float => wgpu::VertexFormat::Float32,
        VertexFormat::Float2 => wgpu::VertexFormat::Float32x2,
        VertexFormat::Float3 => wgpu::VertexFormat::Float32x3,
        VertexFormat::Float4 => wgpu::VertexFormat::Float32x4,
        VertexFormat::Int => wgpu::VertexFormat::Sint32,
        VertexFormat::Int2 => wgpu::VertexFormat::Sint32x2,
        VertexFormat::Int3 => wgpu::VertexFormat::Sint32x3,
        VertexFormat::Int4 => wgpu::VertexFormat::Sint32x4,
        VertexFormat::Uint => wgpu::VertexFormat::Uint32,
        VertexFormat::Uint2 => wgpu::VertexFormat::Uint32x2,
        VertexFormat::Uint3 => wgpu::VertexFormat::Uint32x3,
        VertexFormat::Uint4 => wgpu::VertexFormat::Uint32x4,
        VertexFormat::Unorm8x4 => wgpu::VertexFormat::Unorm8x4,
        VertexFormat::Snorm8x4 => wgpu::VertexFormat::Snorm8x4,
    }
}

/// Convert VertexStepMode to wgpu vertex step mode.
pub fn convert_step_mode(mode: VertexStepMode) -> wgpu::VertexStepMode {
    match mode {
        VertexStepMode::Vertex => wgpu::VertexStepMode::Vertex,
        VertexStepMode::Instance => wgpu::VertexStepMode::Instance,
    }
}
