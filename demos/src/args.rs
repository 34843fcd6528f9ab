//! Command line arguments for the shader demos.
//!
//! Uses clap for CLI parsing with:
//! - Help text (`--help`)
//! - Validation and clear error messages

use std::path::PathBuf;

use clap::Parser;
use umbra_graphics::{BackendType, InstanceParameters, WgpuBackendType};

// ============================================================================
// CLI Backend Selection (clap enums with clearer naming)
// ============================================================================

/// Graphics backend selection for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CliBackend {
    /// Automatically select the best available backend (wgpu preferred).
    #[default]
    Auto,
    /// Cross-platform backend via wgpu.
    Wgpu,
    /// No-op backend for testing and CI environments.
    Dummy,
}

impl From<CliBackend> for BackendType {
    fn from(cli: CliBackend) -> Self {
        match cli {
            CliBackend::Auto => BackendType::Auto,
            CliBackend::Wgpu => BackendType::Wgpu,
            CliBackend::Dummy => BackendType::Dummy,
        }
    }
}

/// GPU API selection for wgpu backend.
///
/// Only relevant when using the wgpu backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CliGpuApi {
    /// Platform-appropriate default.
    #[default]
    Auto,
    /// Vulkan (Linux, Windows, Android).
    Vulkan,
    /// Metal (macOS and iOS).
    Metal,
    /// DirectX 12 (Windows).
    Dx12,
    /// OpenGL (cross-platform fallback).
    Gl,
}

impl From<CliGpuApi> for WgpuBackendType {
    fn from(cli: CliGpuApi) -> Self {
        match cli {
            CliGpuApi::Auto => WgpuBackendType::Auto,
            CliGpuApi::Vulkan => WgpuBackendType::Vulkan,
            CliGpuApi::Metal => WgpuBackendType::Metal,
            CliGpuApi::Dx12 => WgpuBackendType::Dx12,
            CliGpuApi::Gl => WgpuBackendType::Gl,
        }
    }
}

/// Arguments of the `shadow_shader` demo.
///
/// # Examples
///
/// ```bash
/// # Initialize shaders/shadow.wgsl on the best available backend
/// ./shadow_shader
///
/// # Run headless against another file
/// ./shadow_shader assets/shadow.vert --entry main --backend dummy
/// ```
#[derive(Parser, Debug, Clone)]
#[command(
    name = "shadow_shader",
    about = "Compile a shadow vertex shader and create its input layout",
    version
)]
pub struct ShadowShaderArgs {
    /// Shader source file (WGSL or GLSL).
    #[arg(default_value = "shaders/shadow.wgsl")]
    pub path: PathBuf,

    /// Entry point function.
    #[arg(long, default_value = "vs_main")]
    pub entry: String,

    /// Shader profile.
    #[arg(long, default_value = "vs_5_0")]
    pub profile: String,

    /// Extra directory searched for `#include` files.
    #[arg(long = "include-dir", short = 'I')]
    pub include_dirs: Vec<PathBuf>,

    /// Preprocessor define for GLSL sources, as NAME or NAME=VALUE.
    #[arg(long = "define", short = 'D')]
    pub defines: Vec<String>,

    /// Graphics backend to use.
    #[arg(long, default_value = "auto", value_enum)]
    pub backend: CliBackend,

    /// GPU API for wgpu backend.
    /// Only applies when --backend is 'wgpu' or 'auto'.
    #[arg(long, default_value = "auto", value_enum)]
    pub gpu_api: CliGpuApi,

    /// Enable GPU validation layers (slower but helps catch bugs).
    #[arg(long, conflicts_with = "no_validation")]
    pub validation: bool,

    /// Disable GPU validation layers.
    #[arg(long, conflicts_with = "validation")]
    pub no_validation: bool,
}

impl ShadowShaderArgs {
    /// Instance parameters selected by these arguments.
    pub fn instance_parameters(&self) -> InstanceParameters {
        if self.gpu_api != CliGpuApi::Auto
            && self.backend != CliBackend::Wgpu
            && self.backend != CliBackend::Auto
        {
            log::warn!(
                "--gpu-api has no effect when --backend is '{:?}'. \
                The --gpu-api option only applies to the wgpu backend.",
                self.backend
            );
        }

        // --validation forces on, --no-validation forces off, otherwise use debug default
        let validation = self.validation || (!self.no_validation && cfg!(debug_assertions));

        InstanceParameters::new()
            .with_backend(self.backend.into())
            .with_wgpu_backend(self.gpu_api.into())
            .with_validation(validation)
    }

    /// Defines split into name and value; a bare NAME is a boolean define.
    pub fn parsed_defines(&self) -> Vec<(String, umbra_graphics::shader::ShaderDef)> {
        use umbra_graphics::shader::ShaderDef;

        self.defines
            .iter()
            .map(|define| match define.split_once('=') {
                Some((name, value)) => {
                    let def = value
                        .parse::<i32>()
                        .map(ShaderDef::Int)
                        .unwrap_or(ShaderDef::Bool(value != "false"));
                    (name.to_string(), def)
                }
                None => (define.clone(), ShaderDef::Bool(true)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umbra_graphics::shader::ShaderDef;

    #[test]
    fn test_defaults() {
        let args = ShadowShaderArgs::try_parse_from(["shadow_shader"]).unwrap();
        assert_eq!(args.path, PathBuf::from("shaders/shadow.wgsl"));
        assert_eq!(args.entry, "vs_main");
        assert_eq!(args.profile, "vs_5_0");
        assert_eq!(args.backend, CliBackend::Auto);
    }

    #[test]
    fn test_backend_selection() {
        let args = ShadowShaderArgs::try_parse_from([
            "shadow_shader",
            "shadow.vert",
            "--entry",
            "main",
            "--backend",
            "dummy",
            "--no-validation",
        ])
        .unwrap();

        let params = args.instance_parameters();
        assert_eq!(params.backend, BackendType::Dummy);
        assert!(!params.validation);
    }

    #[test]
    fn test_validation_flags_conflict() {
        assert!(
            ShadowShaderArgs::try_parse_from(["shadow_shader", "--validation", "--no-validation"])
                .is_err()
        );
    }

    #[test]
    fn test_parsed_defines() {
        let args = ShadowShaderArgs::try_parse_from([
            "shadow_shader",
            "-D",
            "DEPTH_BIAS",
            "-D",
            "CASCADES=4",
        ])
        .unwrap();
        assert_eq!(
            args.parsed_defines(),
            vec![
                ("DEPTH_BIAS".to_string(), ShaderDef::Bool(true)),
                ("CASCADES".to_string(), ShaderDef::Int(4)),
            ]
        );
    }
}
