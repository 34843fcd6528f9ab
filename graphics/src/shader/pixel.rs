//! Pixel (fragment) shaders.

use crate::backend::{GpuBackend, GpuShader};
use crate::error::GraphicsError;
use crate::profiling::profile_scope;

use super::compiler::ShaderCompiler;
use super::desc::ShaderDesc;
use super::profile::ShaderStage;

/// A pixel shader, compiled from a `ps_*` profile.
#[derive(Debug)]
pub struct PixelShader {
    desc: ShaderDesc,
    compiler: ShaderCompiler,
    shader: Option<GpuShader>,
}

impl PixelShader {
    /// Create an uninitialized pixel shader.
    pub fn new(desc: ShaderDesc) -> Self {
        Self {
            desc,
            compiler: ShaderCompiler::new(),
            shader: None,
        }
    }

    /// Use a compiler with registered includes or include directories.
    pub fn with_compiler(mut self, compiler: ShaderCompiler) -> Self {
        self.compiler = compiler;
        self
    }

    /// Compile the shader and create the device shader object.
    pub fn initialize(&mut self, device: &dyn GpuBackend) -> Result<(), GraphicsError> {
        profile_scope!("pixel_shader_initialize");

        let compiled = self
            .compiler
            .compile_stage(&self.desc, ShaderStage::Fragment)
            .inspect_err(|e| log::error!("{e}"))?;

        let shader = device.create_pixel_shader(&compiled)?;
        log::debug!(
            "Initialized pixel shader {} on {}",
            self.desc.path.display(),
            device.name()
        );
        self.shader = Some(shader);
        Ok(())
    }

    /// Shader configuration.
    pub fn desc(&self) -> &ShaderDesc {
        &self.desc
    }

    /// The device shader object, once initialized.
    pub fn pixel_shader(&self) -> Option<&GpuShader> {
        self.shader.as_ref()
    }

    /// Whether [`initialize`](Self::initialize) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.shader.is_some()
    }
}
