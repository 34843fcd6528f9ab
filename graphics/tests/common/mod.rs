//! Common utilities for shader integration tests.
//!
//! This module provides shared test infrastructure that can be reused
//! across different backend implementations.

use std::path::PathBuf;
use std::sync::Arc;

use umbra_graphics::{
    BackendType, GpuBackend, GraphicsInstance, InstanceParameters, WgpuBackendType,
};

/// Path of a file under `tests/shaders/`.
pub fn shader_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("shaders")
        .join(name)
}

/// Install the test logger once per process.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// Backend Enumeration
// ============================================================================

/// Available GPU backends for testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Dummy backend (no actual GPU operations).
    Dummy,
    /// WebGPU backend (via wgpu).
    WebGpu,
}

impl Backend {
    /// Check if this backend is compiled in.
    pub fn is_available(&self) -> bool {
        match self {
            Backend::Dummy => true,
            Backend::WebGpu => umbra_graphics::has_gpu_backend(),
        }
    }

    /// Convert to InstanceParameters for creating a GraphicsInstance.
    pub fn to_instance_parameters(self) -> InstanceParameters {
        match self {
            Backend::Dummy => InstanceParameters::new().with_backend(BackendType::Dummy),
            Backend::WebGpu => InstanceParameters::new()
                .with_backend(BackendType::Wgpu)
                .with_wgpu_backend(WgpuBackendType::Auto),
        }
    }
}

// ============================================================================
// Test Context
// ============================================================================

/// Test context holding the graphics instance for one backend.
pub struct TestContext {
    /// The backend being tested.
    #[allow(dead_code)]
    pub backend: Backend,
    instance: Arc<GraphicsInstance>,
}

impl TestContext {
    /// Create a new test context for the given backend.
    ///
    /// Returns `None` if the backend is not compiled in or no adapter exists.
    pub fn new(backend: Backend) -> Option<Self> {
        init_logging();
        if !backend.is_available() {
            return None;
        }

        let instance = GraphicsInstance::with_parameters(backend.to_instance_parameters()).ok()?;
        Some(Self { backend, instance })
    }

    /// The device shader objects are created on.
    pub fn device(&self) -> &dyn GpuBackend {
        self.instance.backend().as_ref()
    }
}
