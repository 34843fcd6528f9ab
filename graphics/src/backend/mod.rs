//! GPU backend abstraction layer.
//!
//! This module provides a trait-based abstraction for GPU backends,
//! allowing shader objects to be created on different GPU APIs.
//!
//! # Available Backends
//!
//! - `dummy` (default): No-op backend for testing and development
//! - `wgpu-backend`: Cross-platform backend using wgpu
//!
//! # Architecture
//!
//! Each backend implements the [`GpuBackend`] trait, which provides:
//! - Vertex and pixel shader object creation
//! - Input layout creation, checked against the shader's input signature

pub mod dummy;

#[cfg(feature = "wgpu-backend")]
pub mod wgpu_impl;

use std::sync::Arc;

use crate::error::GraphicsError;
use crate::instance::{BackendType, InstanceParameters};
use crate::layout::{InputElement, InputLayoutDescriptor};
use crate::shader::{CompiledShader, ShaderStage};

pub use dummy::{BackendCall, DummyBackend};

/// Handle to a device shader object.
pub enum GpuShaderHandle {
    /// Dummy backend (no GPU object)
    Dummy,
    /// wgpu backend shader module
    #[cfg(feature = "wgpu-backend")]
    Wgpu(Arc<wgpu::ShaderModule>),
}

impl std::fmt::Debug for GpuShaderHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dummy => write!(f, "GpuShaderHandle::Dummy"),
            #[cfg(feature = "wgpu-backend")]
            Self::Wgpu(module) => f.debug_tuple("GpuShaderHandle::Wgpu").field(module).finish(),
        }
    }
}

/// A shader object created on a device.
#[derive(Debug)]
pub struct GpuShader {
    stage: ShaderStage,
    entry_point: String,
    handle: GpuShaderHandle,
}

impl GpuShader {
    pub(crate) fn new(stage: ShaderStage, entry_point: &str, handle: GpuShaderHandle) -> Self {
        Self {
            stage,
            entry_point: entry_point.to_string(),
            handle,
        }
    }

    /// Stage this shader runs at.
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Entry point to name when building a pipeline.
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Backend-specific handle.
    pub fn handle(&self) -> &GpuShaderHandle {
        &self.handle
    }
}

/// Backend-specific part of an input layout.
pub enum GpuInputLayout {
    /// Dummy backend (no GPU object)
    Dummy,
    /// wgpu vertex buffer layouts, ready for pipeline creation
    #[cfg(feature = "wgpu-backend")]
    Wgpu(wgpu_impl::WgpuVertexLayout),
}

impl std::fmt::Debug for GpuInputLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dummy => write!(f, "GpuInputLayout::Dummy"),
            #[cfg(feature = "wgpu-backend")]
            Self::Wgpu(layout) => f.debug_tuple("GpuInputLayout::Wgpu").field(layout).finish(),
        }
    }
}

/// An input layout created on a device.
#[derive(Debug)]
pub struct InputLayout {
    descriptor: InputLayoutDescriptor,
    handle: GpuInputLayout,
}

impl InputLayout {
    pub(crate) fn new(descriptor: InputLayoutDescriptor, handle: GpuInputLayout) -> Self {
        Self { descriptor, handle }
    }

    /// The validated layout description.
    pub fn descriptor(&self) -> &InputLayoutDescriptor {
        &self.descriptor
    }

    /// Backend-specific handle.
    pub fn handle(&self) -> &GpuInputLayout {
        &self.handle
    }
}

/// GPU backend trait for abstracting different GPU APIs.
pub trait GpuBackend: Send + Sync + 'static {
    /// Get the backend name.
    fn name(&self) -> &'static str;

    /// Create a vertex shader object from compiled code.
    fn create_vertex_shader(&self, shader: &CompiledShader) -> Result<GpuShader, GraphicsError>;

    /// Create a pixel shader object from compiled code.
    fn create_pixel_shader(&self, shader: &CompiledShader) -> Result<GpuShader, GraphicsError>;

    /// Create an input layout for `elements`, checked against the input
    /// signature of a compiled vertex shader.
    fn create_input_layout(
        &self,
        elements: &[InputElement],
        shader: &CompiledShader,
    ) -> Result<InputLayout, GraphicsError>;
}

/// Fail unless compiled code targets `stage`.
pub(crate) fn expect_stage(
    shader: &CompiledShader,
    stage: ShaderStage,
) -> Result<(), GraphicsError> {
    if shader.stage() == stage {
        Ok(())
    } else {
        Err(GraphicsError::InvalidParameter(format!(
            "{} was compiled as {:?}, expected {:?}",
            shader.path().display(),
            shader.stage(),
            stage
        )))
    }
}

/// Build a layout descriptor and match it against the shader's signature.
///
/// Every backend runs this before creating its own layout object.
pub(crate) fn validate_input_layout(
    elements: &[InputElement],
    shader: &CompiledShader,
) -> Result<InputLayoutDescriptor, GraphicsError> {
    expect_stage(shader, ShaderStage::Vertex)?;
    let descriptor = InputLayoutDescriptor::from_elements(elements)?;
    descriptor.check_signature(shader.input_signature())?;
    Ok(descriptor.with_label(shader.entry_point()))
}

/// Selects and creates a backend according to `params`.
pub fn create_backend(params: &InstanceParameters) -> Result<Arc<dyn GpuBackend>, GraphicsError> {
    match params.backend {
        BackendType::Dummy => {
            log::info!("Using dummy backend");
            Ok(Arc::new(DummyBackend::new()))
        }
        BackendType::Wgpu => create_wgpu_backend(params),
        BackendType::Auto => {
            // Try wgpu backend if available
            match create_wgpu_backend(params) {
                Ok(backend) => return Ok(backend),
                Err(e) => log::warn!("Failed to create wgpu backend: {}", e),
            }

            // Fall back to dummy backend
            #[cfg(feature = "dummy")]
            {
                log::info!("Using dummy backend");
                return Ok(Arc::new(DummyBackend::new()));
            }

            #[cfg(not(feature = "dummy"))]
            {
                return Err(GraphicsError::InitializationFailed(
                    "no GPU backend available".into(),
                ));
            }
        }
    }
}

#[cfg(feature = "wgpu-backend")]
fn create_wgpu_backend(params: &InstanceParameters) -> Result<Arc<dyn GpuBackend>, GraphicsError> {
    let backend = wgpu_impl::WgpuBackend::with_params(params)?;
    log::info!("Using wgpu backend");
    Ok(Arc::new(backend))
}

#[cfg(not(feature = "wgpu-backend"))]
fn create_wgpu_backend(_params: &InstanceParameters) -> Result<Arc<dyn GpuBackend>, GraphicsError> {
    Err(GraphicsError::FeatureNotSupported(
        "built without the wgpu-backend feature".into(),
    ))
}

/// Check if a real GPU backend is available.
pub fn has_gpu_backend() -> bool {
    cfg!(feature = "wgpu-backend")
}
