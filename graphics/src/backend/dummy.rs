//! Dummy GPU backend for testing and development.
//!
//! This backend doesn't create GPU objects but runs the same input layout
//! validation as real backends. It records every call so tests can check
//! which device calls were made and in what order, and it can be told to
//! fail at a chosen call.

use parking_lot::Mutex;

use crate::error::GraphicsError;
use crate::layout::InputElement;
use crate::shader::{CompiledShader, ShaderStage};

use super::{
    GpuBackend, GpuInputLayout, GpuShader, GpuShaderHandle, InputLayout, expect_stage,
    validate_input_layout,
};

/// A device call made on the dummy backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendCall {
    /// [`GpuBackend::create_vertex_shader`]
    CreateVertexShader,
    /// [`GpuBackend::create_pixel_shader`]
    CreatePixelShader,
    /// [`GpuBackend::create_input_layout`]
    CreateInputLayout,
}

/// Dummy GPU backend.
#[derive(Debug, Default)]
pub struct DummyBackend {
    calls: Mutex<Vec<BackendCall>>,
    fail_at: Option<BackendCall>,
}

impl DummyBackend {
    /// Create a new dummy backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dummy backend whose `call` always fails.
    pub fn failing_at(call: BackendCall) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_at: Some(call),
        }
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().clone()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: BackendCall) -> Result<(), GraphicsError> {
        log::trace!("DummyBackend: {:?}", call);
        self.calls.lock().push(call);
        if self.fail_at == Some(call) {
            return Err(GraphicsError::ResourceCreationFailed(format!(
                "dummy backend configured to fail at {call:?}"
            )));
        }
        Ok(())
    }
}

impl GpuBackend for DummyBackend {
    fn name(&self) -> &'static str {
        "Dummy Backend"
    }

    fn create_vertex_shader(&self, shader: &CompiledShader) -> Result<GpuShader, GraphicsError> {
        self.record(BackendCall::CreateVertexShader)?;
        expect_stage(shader, ShaderStage::Vertex)?;
        log::trace!(
            "DummyBackend: creating vertex shader '{}' ({} bytes of WGSL)",
            shader.entry_point(),
            shader.wgsl().len()
        );
        Ok(GpuShader::new(
            ShaderStage::Vertex,
            shader.entry_point(),
            GpuShaderHandle::Dummy,
        ))
    }

    fn create_pixel_shader(&self, shader: &CompiledShader) -> Result<GpuShader, GraphicsError> {
        self.record(BackendCall::CreatePixelShader)?;
        expect_stage(shader, ShaderStage::Fragment)?;
        log::trace!("DummyBackend: creating pixel shader '{}'", shader.entry_point());
        Ok(GpuShader::new(
            ShaderStage::Fragment,
            shader.entry_point(),
            GpuShaderHandle::Dummy,
        ))
    }

    fn create_input_layout(
        &self,
        elements: &[InputElement],
        shader: &CompiledShader,
    ) -> Result<InputLayout, GraphicsError> {
        self.record(BackendCall::CreateInputLayout)?;
        let descriptor = validate_input_layout(elements, shader)?;
        log::trace!(
            "DummyBackend: creating input layout ({} elements, {} slots)",
            descriptor.elements.len(),
            descriptor.buffer_count()
        );
        Ok(InputLayout::new(descriptor, GpuInputLayout::Dummy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{SHADOW_INPUT_ELEMENTS, VertexFormat, VertexSemantic};
    use crate::shader::{ShaderCompiler, ShaderDesc};

    const VS: &str = r#"
@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(5) row: vec4<f32>,
) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position, 1.0) + row;
}
"#;

    const PS: &str = r#"
@fragment
fn ps_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0);
}
"#;

    fn compile(source: &str, entry: &str, profile: &str) -> CompiledShader {
        ShaderCompiler::new()
            .compile_source(source, &ShaderDesc::new("memory/test.wgsl", entry, profile))
            .unwrap()
    }

    #[test]
    fn test_dummy_backend_name() {
        let backend = DummyBackend::new();
        assert_eq!(backend.name(), "Dummy Backend");
    }

    #[test]
    fn test_records_calls_in_order() {
        let backend = DummyBackend::new();
        let vs = compile(VS, "vs_main", "vs_5_0");

        backend.create_vertex_shader(&vs).unwrap();
        backend.create_input_layout(&SHADOW_INPUT_ELEMENTS, &vs).unwrap();

        assert_eq!(
            backend.calls(),
            vec![BackendCall::CreateVertexShader, BackendCall::CreateInputLayout]
        );
        backend.clear_calls();
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_injected_failure() {
        let backend = DummyBackend::failing_at(BackendCall::CreateVertexShader);
        let vs = compile(VS, "vs_main", "vs_5_0");

        let err = backend.create_vertex_shader(&vs).unwrap_err();
        assert!(matches!(err, GraphicsError::ResourceCreationFailed(_)));
        assert!(backend.create_input_layout(&SHADOW_INPUT_ELEMENTS, &vs).is_ok());
    }

    #[test]
    fn test_stage_is_checked() {
        let backend = DummyBackend::new();
        let ps = compile(PS, "ps_main", "ps_5_0");

        assert!(backend.create_pixel_shader(&ps).is_ok());
        assert!(matches!(
            backend.create_vertex_shader(&ps),
            Err(GraphicsError::InvalidParameter(_))
        ));
        assert!(backend.create_input_layout(&SHADOW_INPUT_ELEMENTS, &ps).is_err());
    }

    #[test]
    fn test_layout_must_cover_signature() {
        let backend = DummyBackend::new();
        let vs = compile(VS, "vs_main", "vs_5_0");
        let only_position = [InputElement::per_vertex(
            VertexSemantic::Position,
            0,
            VertexFormat::Float3,
            0,
            0,
        )];

        let err = backend.create_input_layout(&only_position, &vs).unwrap_err();
        assert!(matches!(err, GraphicsError::InputLayoutMismatch(_)));
    }
}
