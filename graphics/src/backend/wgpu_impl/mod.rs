//! wgpu GPU backend implementation.
//!
//! This backend uses wgpu for cross-platform GPU access, supporting
//! Vulkan, Metal, DX12, and OpenGL. Shader objects are wgpu shader modules
//! built from the WGSL emitted by the shader compiler.

pub(crate) mod conversion;
mod layout;

use std::borrow::Cow;
use std::sync::Arc;

pub use layout::WgpuVertexLayout;

use layout::check_device_limits;

use crate::error::GraphicsError;
use crate::instance::InstanceParameters;
use crate::layout::InputElement;
use crate::shader::{CompiledShader, ShaderStage};

use super::{
    GpuBackend, GpuInputLayout, GpuShader, GpuShaderHandle, InputLayout, expect_stage,
    validate_input_layout,
};

/// wgpu-based GPU backend.
pub struct WgpuBackend {
    instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
}

impl std::fmt::Debug for WgpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WgpuBackend")
            .field("adapter", &self.adapter.get_info().name)
            .finish()
    }
}

impl WgpuBackend {
    /// Create a new wgpu backend with default parameters.
    pub fn new() -> Result<Self, GraphicsError> {
        Self::with_params(&InstanceParameters::default())
    }

    /// Create a new wgpu backend with custom parameters.
    pub fn with_params(params: &InstanceParameters) -> Result<Self, GraphicsError> {
        let backends = params.wgpu_backend.to_wgpu_backends();

        let mut flags = wgpu::InstanceFlags::default();
        if params.validation {
            flags |= wgpu::InstanceFlags::VALIDATION;
        }
        if params.debug {
            flags |= wgpu::InstanceFlags::DEBUG;
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            flags,
            backend_options: wgpu::BackendOptions::default(),
            memory_budget_thresholds: wgpu::MemoryBudgetThresholds::default(),
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .map_err(|e| {
            GraphicsError::InitializationFailed(format!("No compatible GPU adapter: {e}"))
        })?;

        log::info!("wgpu adapter: {:?}", adapter.get_info());

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Umbra Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::default(),
            experimental_features: wgpu::ExperimentalFeatures::default(),
            trace: wgpu::Trace::Off,
        }))
        .map_err(|e| GraphicsError::InitializationFailed(format!("Device creation failed: {e}")))?;

        Ok(Self {
            instance,
            adapter,
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }

    /// Get the wgpu instance.
    pub fn instance(&self) -> &wgpu::Instance {
        &self.instance
    }

    /// Get the wgpu adapter.
    pub fn adapter(&self) -> &wgpu::Adapter {
        &self.adapter
    }

    /// Get the wgpu device.
    pub fn device(&self) -> &Arc<wgpu::Device> {
        &self.device
    }

    /// Get the wgpu queue.
    pub fn queue(&self) -> &Arc<wgpu::Queue> {
        &self.queue
    }

    fn create_shader_module(
        &self,
        shader: &CompiledShader,
        stage: ShaderStage,
    ) -> Result<GpuShader, GraphicsError> {
        expect_stage(shader, stage)?;

        let label = format!("{}:{}", shader.path().display(), shader.entry_point());
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&label),
                source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(shader.wgsl())),
            });
        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(GraphicsError::ResourceCreationFailed(format!(
                "shader module '{label}' rejected by the device: {error}"
            )));
        }

        log::debug!("wgpu: created {stage:?} shader module '{label}'");
        Ok(GpuShader::new(
            stage,
            shader.entry_point(),
            GpuShaderHandle::Wgpu(Arc::new(module)),
        ))
    }
}

impl GpuBackend for WgpuBackend {
    fn name(&self) -> &'static str {
        "wgpu Backend"
    }

    fn create_vertex_shader(&self, shader: &CompiledShader) -> Result<GpuShader, GraphicsError> {
        self.create_shader_module(shader, ShaderStage::Vertex)
    }

    fn create_pixel_shader(&self, shader: &CompiledShader) -> Result<GpuShader, GraphicsError> {
        self.create_shader_module(shader, ShaderStage::Fragment)
    }

    fn create_input_layout(
        &self,
        elements: &[InputElement],
        shader: &CompiledShader,
    ) -> Result<InputLayout, GraphicsError> {
        let descriptor = validate_input_layout(elements, shader)?;

        check_device_limits(&descriptor, &self.device.limits())?;

        let layout = WgpuVertexLayout::from_descriptor(&descriptor)?;
        log::debug!(
            "wgpu: created input layout with {} attributes in {} buffers",
            layout.attribute_count(),
            layout.buffer_count()
        );
        Ok(InputLayout::new(descriptor, GpuInputLayout::Wgpu(layout)))
    }
}
