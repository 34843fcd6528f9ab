//! The shadow-map vertex shader.

use std::path::PathBuf;

use crate::backend::{GpuBackend, GpuShader, InputLayout};
use crate::error::GraphicsError;
use crate::layout::SHADOW_INPUT_ELEMENTS;

use super::compiler::ShaderCompiler;
use super::desc::ShaderDesc;
use super::vertex::VertexShader;

/// Vertex shader for rendering instanced meshes into a shadow map.
///
/// Uses [`SHADOW_INPUT_ELEMENTS`]: mesh geometry in slots 0 and 1 and a
/// per-instance transform in slot 2.
#[derive(Debug)]
pub struct ShadowVertexShader {
    inner: VertexShader,
}

impl ShadowVertexShader {
    /// Create a shadow vertex shader from a source file, entry point and profile.
    pub fn new(
        path: impl Into<PathBuf>,
        entry_point: impl Into<String>,
        profile: impl Into<String>,
    ) -> Self {
        Self::from_desc(ShaderDesc::new(path, entry_point, profile))
    }

    /// Create a shadow vertex shader from a full description.
    pub fn from_desc(desc: ShaderDesc) -> Self {
        Self {
            inner: VertexShader::new(desc, SHADOW_INPUT_ELEMENTS),
        }
    }

    /// Use a compiler with registered includes or include directories.
    pub fn with_compiler(mut self, compiler: ShaderCompiler) -> Self {
        self.inner = self.inner.with_compiler(compiler);
        self
    }

    /// Compile, create the shader object, then create the input layout.
    ///
    /// See [`VertexShader::initialize`].
    pub fn initialize(&mut self, device: &dyn GpuBackend) -> Result<(), GraphicsError> {
        self.inner.initialize(device)
    }

    /// Shader configuration.
    pub fn desc(&self) -> &ShaderDesc {
        self.inner.desc()
    }

    /// The device shader object, once initialized.
    pub fn vertex_shader(&self) -> Option<&GpuShader> {
        self.inner.vertex_shader()
    }

    /// The device input layout, once initialized.
    pub fn input_layout(&self) -> Option<&InputLayout> {
        self.inner.input_layout()
    }

    /// Whether initialization has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.inner.is_initialized()
    }

    /// The underlying general vertex shader.
    pub fn as_vertex_shader(&self) -> &VertexShader {
        &self.inner
    }
}
