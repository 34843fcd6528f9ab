//! # Umbra Graphics
//!
//! Shader objects and vertex input layouts for the Umbra renderer.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`ShaderCompiler`] - Compiles WGSL/GLSL sources and extracts input signatures
//! - [`ShadowVertexShader`] - Vertex shader and input layout used by the shadow pass
//! - [`GpuBackend`] - Trait for device implementations
//! - Multiple backend support: wgpu and Dummy (for testing)
//!
//! ## Example
//!
//! ```ignore
//! use umbra_graphics::{GraphicsInstance, ShadowVertexShader};
//!
//! let instance = GraphicsInstance::new()?;
//! let mut shadow = ShadowVertexShader::new("shaders/shadow.wgsl", "vs_main", "vs_5_0");
//! shadow.initialize(instance.backend().as_ref())?;
//! ```

pub mod backend;
pub mod error;
pub mod instance;
pub mod layout;
pub mod profiling;
pub mod shader;

// Re-export main types for convenience
pub use backend::{
    BackendCall, DummyBackend, GpuBackend, GpuInputLayout, GpuShader, GpuShaderHandle,
    InputLayout, create_backend, has_gpu_backend,
};
pub use error::GraphicsError;
pub use instance::{BackendType, GraphicsInstance, InstanceParameters, WgpuBackendType};
pub use layout::{
    InputElement, InputLayoutDescriptor, SHADOW_INPUT_ELEMENTS, VertexFormat, VertexSemantic,
    VertexStepMode,
};
pub use shader::{
    CompiledShader, PixelShader, ShaderCompiler, ShaderDesc, ShaderProfile, ShaderStage,
    ShadowVertexShader, VertexShader,
};

#[cfg(feature = "wgpu-backend")]
pub use backend::wgpu_impl::WgpuBackend;

/// Graphics library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the graphics subsystem.
///
/// This should be called before using any graphics functionality.
pub fn init() {
    log::info!("Umbra Graphics v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_dummy_backend() {
        let backend = DummyBackend::new();
        assert_eq!(backend.name(), "Dummy Backend");
    }

    #[test]
    fn test_shadow_table_exported() {
        assert_eq!(SHADOW_INPUT_ELEMENTS.len(), 9);
    }
}
