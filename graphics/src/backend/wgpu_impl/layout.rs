//! Owned wgpu vertex buffer layouts.

use crate::error::GraphicsError;
use crate::layout::{InputLayoutDescriptor, VertexStepMode};

use super::conversion::{convert_step_mode, convert_vertex_format};

#[derive(Debug, Clone)]
struct WgpuVertexBuffer {
    array_stride: u64,
    step_mode: wgpu::VertexStepMode,
    attributes: Vec<wgpu::VertexAttribute>,
}

/// Vertex buffer layouts in wgpu form.
///
/// `wgpu::VertexBufferLayout` borrows its attributes, so this type owns them
/// and hands out borrowed layouts for pipeline creation.
#[derive(Debug, Clone)]
pub struct WgpuVertexLayout {
    buffers: Vec<WgpuVertexBuffer>,
}

impl WgpuVertexLayout {
    /// Convert a validated descriptor.
    ///
    /// # Errors
    ///
    /// wgpu advances instance data once per instance, so any other instance
    /// step rate is rejected with [`GraphicsError::FeatureNotSupported`].
    pub fn from_descriptor(descriptor: &InputLayoutDescriptor) -> Result<Self, GraphicsError> {
        let mut buffers: Vec<WgpuVertexBuffer> = descriptor
            .buffers
            .iter()
            .enumerate()
            .map(|(slot, buffer)| {
                if buffer.step_mode == VertexStepMode::Instance && buffer.instance_step_rate != 1 {
                    return Err(GraphicsError::FeatureNotSupported(format!(
                        "slot {slot} uses instance step rate {}; wgpu only supports 1",
                        buffer.instance_step_rate
                    )));
                }
                Ok(WgpuVertexBuffer {
                    array_stride: buffer.stride as u64,
                    step_mode: convert_step_mode(buffer.step_mode),
                    attributes: Vec::new(),
                })
            })
            .collect::<Result<_, _>>()?;

        for bound in &descriptor.elements {
            let slot = bound.element.input_slot as usize;
            if let Some(buffer) = buffers.get_mut(slot) {
                buffer.attributes.push(wgpu::VertexAttribute {
                    format: convert_vertex_format(bound.element.format),
                    offset: bound.offset as u64,
                    shader_location: bound.location,
                });
            }
        }

        Ok(Self { buffers })
    }

    /// Number of vertex buffer slots.
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Total number of attributes across all slots.
    pub fn attribute_count(&self) -> usize {
        self.buffers.iter().map(|b| b.attributes.len()).sum()
    }

    /// Layouts to pass as `wgpu::VertexState::buffers`.
    pub fn buffer_layouts(&self) -> Vec<wgpu::VertexBufferLayout<'_>> {
        self.buffers
            .iter()
            .map(|buffer| wgpu::VertexBufferLayout {
                array_stride: buffer.array_stride,
                step_mode: buffer.step_mode,
                attributes: &buffer.attributes,
            })
            .collect()
    }
}

/// Reject layouts that exceed the device's vertex input limits.
pub(crate) fn check_device_limits(
    descriptor: &InputLayoutDescriptor,
    limits: &wgpu::Limits,
) -> Result<(), GraphicsError> {
    if descriptor.buffer_count() as u32 > limits.max_vertex_buffers {
        return Err(GraphicsError::ResourceCreationFailed(format!(
            "input layout uses {} vertex buffers, device allows {}",
            descriptor.buffer_count(),
            limits.max_vertex_buffers
        )));
    }
    if descriptor.elements.len() as u32 > limits.max_vertex_attributes {
        return Err(GraphicsError::ResourceCreationFailed(format!(
            "input layout uses {} attributes, device allows {}",
            descriptor.elements.len(),
            limits.max_vertex_attributes
        )));
    }
    for (slot, buffer) in descriptor.buffers.iter().enumerate() {
        if buffer.stride > limits.max_vertex_buffer_array_stride {
            return Err(GraphicsError::ResourceCreationFailed(format!(
                "slot {slot} stride {} exceeds the device limit of {}",
                buffer.stride, limits.max_vertex_buffer_array_stride
            )));
        }
    }
    Ok(())
}
