//! Graphics instance.
//!
//! The [`GraphicsInstance`] is the top-level entry point for the graphics system.
//! It owns the GPU backend that shader objects are created on, selected by
//! [`InstanceParameters`].

use std::str::FromStr;
use std::sync::Arc;

use crate::backend::{self, GpuBackend};
use crate::error::GraphicsError;

/// Environment variable that overrides [`InstanceParameters::backend`].
pub const BACKEND_ENV_VAR: &str = "UMBRA_BACKEND";

/// Which GPU backend to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackendType {
    /// Try wgpu first, fall back to the dummy backend.
    #[default]
    Auto,
    /// wgpu backend (cross-platform).
    Wgpu,
    /// Dummy backend (no GPU).
    Dummy,
}

impl FromStr for BackendType {
    type Err = GraphicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "wgpu" | "webgpu" => Ok(Self::Wgpu),
            "dummy" => Ok(Self::Dummy),
            other => Err(GraphicsError::InvalidParameter(format!(
                "unknown backend '{other}' (expected auto, wgpu or dummy)"
            ))),
        }
    }
}

/// Graphics API used underneath the wgpu backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WgpuBackendType {
    /// Let wgpu pick among the primary APIs.
    #[default]
    Auto,
    /// Vulkan.
    Vulkan,
    /// Metal.
    Metal,
    /// Direct3D 12.
    Dx12,
    /// OpenGL / GLES.
    Gl,
}

impl WgpuBackendType {
    /// wgpu backend flags for this API.
    #[cfg(feature = "wgpu-backend")]
    pub fn to_wgpu_backends(self) -> wgpu::Backends {
        match self {
            Self::Auto => wgpu::Backends::PRIMARY,
            Self::Vulkan => wgpu::Backends::VULKAN,
            Self::Metal => wgpu::Backends::METAL,
            Self::Dx12 => wgpu::Backends::DX12,
            Self::Gl => wgpu::Backends::GL,
        }
    }
}

/// Parameters for creating a [`GraphicsInstance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceParameters {
    /// Backend to create.
    pub backend: BackendType,
    /// API used by the wgpu backend.
    pub wgpu_backend: WgpuBackendType,
    /// Enable API validation layers.
    pub validation: bool,
    /// Enable debug labels and markers.
    pub debug: bool,
}

impl Default for InstanceParameters {
    fn default() -> Self {
        Self {
            backend: BackendType::default(),
            wgpu_backend: WgpuBackendType::default(),
            validation: cfg!(debug_assertions),
            debug: false,
        }
    }
}

impl InstanceParameters {
    /// Default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default parameters, with the backend taken from `UMBRA_BACKEND` when set.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::InvalidParameter`] if the variable holds an
    /// unknown backend name.
    pub fn from_env() -> Result<Self, GraphicsError> {
        Self::new().with_env_override(std::env::var(BACKEND_ENV_VAR).ok().as_deref())
    }

    fn with_env_override(self, value: Option<&str>) -> Result<Self, GraphicsError> {
        match value {
            Some(name) if !name.trim().is_empty() => {
                let backend = name.parse()?;
                log::debug!("{BACKEND_ENV_VAR} selects {backend:?}");
                Ok(self.with_backend(backend))
            }
            _ => Ok(self),
        }
    }

    /// Set the backend type.
    pub fn with_backend(mut self, backend: BackendType) -> Self {
        self.backend = backend;
        self
    }

    /// Set the API used by the wgpu backend.
    pub fn with_wgpu_backend(mut self, wgpu_backend: WgpuBackendType) -> Self {
        self.wgpu_backend = wgpu_backend;
        self
    }

    /// Enable or disable validation layers.
    pub fn with_validation(mut self, validation: bool) -> Self {
        self.validation = validation;
        self
    }

    /// Enable or disable debug labels.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// The graphics instance owns the GPU backend.
///
/// # Example
///
/// ```ignore
/// let instance = GraphicsInstance::new()?;
/// let mut shader = ShadowVertexShader::new("shadow.wgsl", "vs_main", "vs_5_0");
/// shader.initialize(instance.backend().as_ref())?;
/// ```
pub struct GraphicsInstance {
    parameters: InstanceParameters,
    backend: Arc<dyn GpuBackend>,
}

impl GraphicsInstance {
    /// Create a new graphics instance with parameters from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the graphics system cannot be initialized.
    pub fn new() -> Result<Arc<Self>, GraphicsError> {
        Self::with_parameters(InstanceParameters::from_env()?)
    }

    /// Create a new graphics instance with explicit parameters.
    pub fn with_parameters(parameters: InstanceParameters) -> Result<Arc<Self>, GraphicsError> {
        log::info!("Creating GraphicsInstance with {:?}", parameters);

        let backend = backend::create_backend(&parameters)?;
        log::info!("Using GPU backend: {}", backend.name());

        Ok(Arc::new(Self {
            parameters,
            backend,
        }))
    }

    /// Get the GPU backend.
    pub fn backend(&self) -> &Arc<dyn GpuBackend> {
        &self.backend
    }

    /// Name of the GPU backend in use.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Parameters this instance was created with.
    pub fn parameters(&self) -> &InstanceParameters {
        &self.parameters
    }
}

impl std::fmt::Debug for GraphicsInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphicsInstance")
            .field("backend", &self.backend.name())
            .finish()
    }
}
