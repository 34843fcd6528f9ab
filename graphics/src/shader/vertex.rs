//! Vertex shaders with their input layouts.

use crate::backend::{GpuBackend, GpuShader, InputLayout};
use crate::error::GraphicsError;
use crate::layout::InputElement;
use crate::profiling::profile_scope;

use super::compiler::{CompiledShader, ShaderCompiler};
use super::desc::ShaderDesc;
use super::profile::ShaderStage;

/// A vertex shader and the input layout that feeds it.
///
/// Construction only stores configuration. [`VertexShader::initialize`]
/// compiles the source, creates the shader object, then creates the input
/// layout, stopping at the first failure. The shader and layout are stored
/// only when all three steps succeed.
///
/// # Example
///
/// ```ignore
/// let mut shader = VertexShader::new(
///     ShaderDesc::new("shaders/mesh.wgsl", "vs_main", "vs_5_0"),
///     MESH_ELEMENTS,
/// );
/// shader.initialize(backend.as_ref())?;
/// let layout = shader.input_layout().unwrap();
/// ```
#[derive(Debug)]
pub struct VertexShader {
    desc: ShaderDesc,
    elements: Vec<InputElement>,
    compiler: ShaderCompiler,
    shader: Option<GpuShader>,
    input_layout: Option<InputLayout>,
}

impl VertexShader {
    /// Create an uninitialized vertex shader.
    pub fn new(desc: ShaderDesc, elements: impl Into<Vec<InputElement>>) -> Self {
        Self {
            desc,
            elements: elements.into(),
            compiler: ShaderCompiler::new(),
            shader: None,
            input_layout: None,
        }
    }

    /// Use a compiler with registered includes or include directories.
    pub fn with_compiler(mut self, compiler: ShaderCompiler) -> Self {
        self.compiler = compiler;
        self
    }

    /// Compile the shader and create its device objects.
    ///
    /// # Errors
    ///
    /// - A compile failure is logged and returned before any device call.
    /// - A shader creation failure is returned before the layout is created.
    /// - A layout creation failure is returned as is.
    pub fn initialize(&mut self, device: &dyn GpuBackend) -> Result<(), GraphicsError> {
        profile_scope!("vertex_shader_initialize");

        let compiled = self.compile().inspect_err(|e| log::error!("{e}"))?;

        let shader = device.create_vertex_shader(&compiled)?;
        let input_layout = device.create_input_layout(&self.elements, &compiled)?;

        log::debug!(
            "Initialized vertex shader {} on {} ({} elements, {} slots)",
            self.desc.path.display(),
            device.name(),
            self.elements.len(),
            input_layout.descriptor().buffer_count()
        );

        self.shader = Some(shader);
        self.input_layout = Some(input_layout);
        Ok(())
    }

    fn compile(&self) -> Result<CompiledShader, GraphicsError> {
        self.compiler.compile_stage(&self.desc, ShaderStage::Vertex)
    }

    /// Shader configuration.
    pub fn desc(&self) -> &ShaderDesc {
        &self.desc
    }

    /// The input element table.
    pub fn elements(&self) -> &[InputElement] {
        &self.elements
    }

    /// The device shader object, once initialized.
    pub fn vertex_shader(&self) -> Option<&GpuShader> {
        self.shader.as_ref()
    }

    /// The device input layout, once initialized.
    pub fn input_layout(&self) -> Option<&InputLayout> {
        self.input_layout.as_ref()
    }

    /// Whether [`initialize`](Self::initialize) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.shader.is_some() && self.input_layout.is_some()
    }
}
