//! Graphics error types.

use std::path::PathBuf;

/// Errors that can occur in the graphics system.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphicsError {
    /// A shader source could not be read, parsed, or validated.
    #[error(
        "The shader file {} cannot be compiled. Please run this executable from the directory \
         that contains the shader file.\n{message}",
        .path.display()
    )]
    ShaderCompilationFailed {
        /// Path of the shader source that failed.
        path: PathBuf,
        /// Compiler diagnostic.
        message: String,
    },
    /// A shader profile string (e.g. `vs_5_0`) is malformed or targets the wrong stage.
    #[error("invalid shader profile: {0}")]
    InvalidShaderProfile(String),
    /// Failed to initialize the graphics system.
    #[error("initialization failed: {0}")]
    InitializationFailed(String),
    /// Failed to create a resource.
    #[error("resource creation failed: {0}")]
    ResourceCreationFailed(String),
    /// The input layout does not match the shader's input signature.
    #[error("input layout mismatch: {0}")]
    InputLayoutMismatch(String),
    /// A requested feature is not supported.
    #[error("feature not supported: {0}")]
    FeatureNotSupported(String),
    /// Out of GPU memory.
    #[error("out of GPU memory")]
    OutOfMemory,
    /// The GPU device was lost.
    #[error("GPU device lost")]
    DeviceLost,
    /// An invalid parameter was provided.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GraphicsError {
    /// Build a compilation failure for the shader at `path`.
    pub(crate) fn compilation(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ShaderCompilationFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this error was produced before any device call was made.
    pub fn is_compile_error(&self) -> bool {
        matches!(
            self,
            Self::ShaderCompilationFailed { .. } | Self::InvalidShaderProfile(_)
        )
    }
}
