//! Shader compilation.
//!
//! The [`ShaderCompiler`] turns a shader source file into a [`CompiledShader`]:
//! the device-independent product that backends create shader objects and
//! input layouts from.
//!
//! Compilation runs these steps in order:
//!
//! 1. **Profile** - parse the target profile (`vs_5_0`, ...)
//! 2. **Read** - load the source file
//! 3. **Includes** - expand `#include` directives
//! 4. **Parse** - WGSL or GLSL through naga
//! 5. **Validate** - full naga validation
//! 6. **Entry point** - look up the entry point and check its stage
//! 7. **Signature** - collect the location-bound vertex inputs
//! 8. **Emit** - write normalized WGSL for the backends
//!
//! A failure at any step returns [`GraphicsError::ShaderCompilationFailed`]
//! (or [`GraphicsError::InvalidShaderProfile`]) naming the source file.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::GraphicsError;
use crate::layout::{ScalarKind, SignatureParameter};
use crate::profiling::profile_scope;

use super::desc::{ShaderDef, ShaderDesc, ShaderLanguage};
use super::profile::{ShaderProfile, ShaderStage};

/// A compiled shader entry point.
///
/// Holds normalized WGSL, so every backend consumes the same code regardless
/// of the source language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledShader {
    path: PathBuf,
    entry_point: String,
    profile: ShaderProfile,
    wgsl: String,
    input_signature: Vec<SignatureParameter>,
}

impl CompiledShader {
    /// Path of the source file this shader was compiled from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entry point function name.
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Target profile.
    pub fn profile(&self) -> ShaderProfile {
        self.profile
    }

    /// Stage of the entry point.
    pub fn stage(&self) -> ShaderStage {
        self.profile.stage
    }

    /// Normalized WGSL source handed to the device.
    pub fn wgsl(&self) -> &str {
        &self.wgsl
    }

    /// Location-bound inputs of the entry point, sorted by location.
    ///
    /// Empty for non-vertex stages.
    pub fn input_signature(&self) -> &[SignatureParameter] {
        &self.input_signature
    }
}

/// Shader compiler with `#include` resolution.
///
/// Includes are looked up, in order, among registered sources, next to the
/// including file, and in the include directories of the compiler and of the
/// [`ShaderDesc`]. Each include is expanded at most once per compilation.
///
/// # Example
///
/// ```ignore
/// let mut compiler = ShaderCompiler::new();
/// compiler.register_include("umbra/shadow_common.wgsl", SHADOW_COMMON);
///
/// let desc = ShaderDesc::new("shaders/shadow.wgsl", "vs_main", "vs_5_0");
/// let compiled = compiler.compile(&desc)?;
/// ```
#[derive(Debug, Default, Clone)]
pub struct ShaderCompiler {
    /// Registered include sources: path -> source text.
    includes: HashMap<String, String>,
    /// Directories searched for include files.
    include_dirs: Vec<PathBuf>,
}

impl ShaderCompiler {
    /// Create a new compiler without registered includes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single include source.
    ///
    /// The path is what appears in `#include "path"` directives.
    pub fn register_include(&mut self, path: &str, source: &str) {
        self.includes.insert(path.to_string(), source.to_string());
    }

    /// Add a directory searched for include files.
    pub fn add_include_dir(&mut self, dir: impl Into<PathBuf>) {
        self.include_dirs.push(dir.into());
    }

    /// Compile the shader described by `desc` from its source file.
    pub fn compile(&self, desc: &ShaderDesc) -> Result<CompiledShader, GraphicsError> {
        profile_scope!("shader_compile");

        // Profile errors take precedence over I/O so a typo is reported as such.
        desc.profile.parse::<ShaderProfile>()?;

        let source = std::fs::read_to_string(&desc.path).map_err(|e| {
            GraphicsError::compilation(&desc.path, format!("cannot read source: {e}"))
        })?;

        self.compile_source(&source, desc)
    }

    /// Compile a shader that must target `stage`.
    ///
    /// Unlike [`compile`](Self::compile), a malformed or wrong-stage profile is
    /// reported as [`GraphicsError::ShaderCompilationFailed`] naming the source
    /// file, so every failure carries the same diagnostic.
    pub fn compile_stage(
        &self,
        desc: &ShaderDesc,
        stage: ShaderStage,
    ) -> Result<CompiledShader, GraphicsError> {
        desc.profile
            .parse::<ShaderProfile>()
            .and_then(|profile| profile.expect_stage(stage))
            .map_err(|e| GraphicsError::compilation(&desc.path, e.to_string()))?;
        self.compile(desc)
    }

    /// Compile in-memory source text.
    ///
    /// `desc.path` is still used for diagnostics and as the base for
    /// relative includes.
    pub fn compile_source(
        &self,
        source: &str,
        desc: &ShaderDesc,
    ) -> Result<CompiledShader, GraphicsError> {
        profile_scope!("shader_compile_source");

        let profile: ShaderProfile = desc.profile.parse()?;
        let language = desc.language()?;
        let fail = |message: String| GraphicsError::compilation(&desc.path, message);

        let search_dirs: Vec<PathBuf> = self
            .include_dirs
            .iter()
            .chain(&desc.include_dirs)
            .cloned()
            .collect();
        // The root counts as included so self-includes and cycles stop at it.
        let mut included = HashSet::from([include_key(&desc.path)]);
        let resolved = self.resolve_includes(source, &desc.path, &search_dirs, &mut included)?;

        let module = match language {
            ShaderLanguage::Wgsl => {
                if !desc.defines.is_empty() {
                    log::warn!(
                        "{}: WGSL has no preprocessor, ignoring {} define(s)",
                        desc.path.display(),
                        desc.defines.len()
                    );
                }
                naga::front::wgsl::parse_str(&resolved).map_err(|e| {
                    fail(format!("WGSL parse error:\n{}", e.emit_to_string(&resolved)))
                })?
            }
            ShaderLanguage::Glsl => {
                let options = naga::front::glsl::Options {
                    stage: profile.stage.to_naga(),
                    defines: build_defines(&desc.defines),
                };
                let mut frontend = naga::front::glsl::Frontend::default();
                frontend
                    .parse(&options, &resolved)
                    .map_err(|errors| fail(format!("GLSL parse error:\n{errors}")))?
            }
        };

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        let module_info = validator
            .validate(&module)
            .map_err(|e| fail(format!("Validation error: {e}")))?;

        let entry = module
            .entry_points
            .iter()
            .find(|ep| ep.name == desc.entry_point)
            .ok_or_else(|| fail(format!("entry point '{}' not found", desc.entry_point)))?;
        if entry.stage != profile.stage.to_naga() {
            return Err(fail(format!(
                "entry point '{}' is a {:?} entry point but the profile is {profile}",
                desc.entry_point, entry.stage
            )));
        }

        let input_signature = if profile.stage == ShaderStage::Vertex {
            input_signature(&module, &entry.function).map_err(fail)?
        } else {
            Vec::new()
        };

        let wgsl = naga::back::wgsl::write_string(
            &module,
            &module_info,
            naga::back::wgsl::WriterFlags::empty(),
        )
        .map_err(|e| fail(format!("WGSL generation error: {e}")))?;

        log::debug!(
            "Compiled {} '{}' ({profile}, {} inputs)",
            desc.path.display(),
            desc.entry_point,
            input_signature.len()
        );

        Ok(CompiledShader {
            path: desc.path.clone(),
            entry_point: desc.entry_point.clone(),
            profile,
            wgsl,
            input_signature,
        })
    }

    /// Resolve `#include "path"` directives recursively.
    fn resolve_includes(
        &self,
        source: &str,
        origin: &Path,
        search_dirs: &[PathBuf],
        included: &mut HashSet<String>,
    ) -> Result<String, GraphicsError> {
        let mut result = String::with_capacity(source.len());

        for line in source.lines() {
            let Some(name) = parse_include_directive(line.trim()) else {
                result.push_str(line);
                result.push('\n');
                continue;
            };

            let (key, include_source, include_origin) = self
                .load_include(name, origin, search_dirs)
                .ok_or_else(|| {
                    GraphicsError::compilation(origin, format!("Include not found: \"{name}\""))
                })?;

            // Skip if already included (prevent double-inclusion)
            if !included.insert(key) {
                continue;
            }

            let resolved =
                self.resolve_includes(&include_source, &include_origin, search_dirs, included)?;
            result.push_str(&resolved);
            result.push('\n');
        }

        Ok(result)
    }

    /// Find an include by name. Returns its dedup key, source and origin path.
    fn load_include(
        &self,
        name: &str,
        origin: &Path,
        search_dirs: &[PathBuf],
    ) -> Option<(String, String, PathBuf)> {
        if let Some(source) = self.includes.get(name) {
            return Some((name.to_string(), source.clone(), origin.to_path_buf()));
        }

        let local = origin.parent().map(|dir| dir.join(name));
        local
            .into_iter()
            .chain(search_dirs.iter().map(|dir| dir.join(name)))
            .find_map(|candidate| {
                let source = std::fs::read_to_string(&candidate).ok()?;
                Some((include_key(&candidate), source, candidate))
            })
    }
}

/// Dedup key of an include file: its canonical path when it exists on disk.
fn include_key(path: &Path) -> String {
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

/// Build the naga preprocessor defines for GLSL.
fn build_defines(shader_defs: &[(String, ShaderDef)]) -> naga::FastHashMap<String, String> {
    let mut defines = naga::FastHashMap::default();
    for (name, def) in shader_defs {
        match def {
            ShaderDef::Bool(true) => {
                defines.insert(name.clone(), String::new());
            }
            ShaderDef::Bool(false) => {}
            ShaderDef::Int(v) => {
                defines.insert(name.clone(), v.to_string());
            }
            ShaderDef::UInt(v) => {
                defines.insert(name.clone(), v.to_string());
            }
        }
    }
    defines
}

/// Parse a `#include "path"` directive, returning the path if found.
fn parse_include_directive(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("#include")?;
    let rest = rest.trim();
    // Support both #include "path" and #include <path>
    if let Some(inner) = rest.strip_prefix('"') {
        inner.strip_suffix('"')
    } else if let Some(inner) = rest.strip_prefix('<') {
        inner.strip_suffix('>')
    } else {
        None
    }
}

/// Collect the location-bound inputs of an entry point function.
///
/// Inputs may be plain arguments or members of a struct argument. Built-ins
/// such as the vertex index are not part of the signature.
fn input_signature(
    module: &naga::Module,
    function: &naga::Function,
) -> Result<Vec<SignatureParameter>, String> {
    let mut params = Vec::new();

    for argument in &function.arguments {
        match &argument.binding {
            Some(binding) => push_input(module, binding, argument.ty, &mut params)?,
            None => {
                if let naga::TypeInner::Struct { members, .. } = &module.types[argument.ty].inner {
                    for member in members {
                        if let Some(binding) = &member.binding {
                            push_input(module, binding, member.ty, &mut params)?;
                        }
                    }
                }
            }
        }
    }

    params.sort_by_key(|p| p.location);
    Ok(params)
}

fn push_input(
    module: &naga::Module,
    binding: &naga::Binding,
    ty: naga::Handle<naga::Type>,
    params: &mut Vec<SignatureParameter>,
) -> Result<(), String> {
    let naga::Binding::Location { location, .. } = binding else {
        return Ok(());
    };

    let (scalar, components) = match &module.types[ty].inner {
        naga::TypeInner::Scalar(scalar) => (*scalar, 1),
        naga::TypeInner::Vector { size, scalar } => (*scalar, *size as u8),
        other => {
            return Err(format!(
                "vertex input at location {location} has unsupported type {other:?}"
            ));
        }
    };
    let kind = match scalar.kind {
        naga::ScalarKind::Float => ScalarKind::Float,
        naga::ScalarKind::Sint => ScalarKind::Sint,
        naga::ScalarKind::Uint => ScalarKind::Uint,
        other => {
            return Err(format!(
                "vertex input at location {location} has unsupported scalar kind {other:?}"
            ));
        }
    };

    params.push(SignatureParameter::new(*location, kind, components));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHADOW_WGSL: &str = r#"
struct Light {
    view_projection: mat4x4<f32>,
}

@group(0) @binding(0) var<uniform> light: Light;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(5) transform_0: vec4<f32>,
    @location(6) transform_1: vec4<f32>,
    @location(7) transform_2: vec4<f32>,
    @location(8) transform_3: vec4<f32>,
}

@vertex
fn vs_main(
    input: VertexInput,
    @builtin(instance_index) instance: u32,
) -> @builtin(position) vec4<f32> {
    let world = mat4x4<f32>(
        input.transform_0,
        input.transform_1,
        input.transform_2,
        input.transform_3,
    );
    return light.view_projection * world * vec4<f32>(input.position, 1.0);
}
"#;

    fn desc(entry: &str, profile: &str) -> ShaderDesc {
        ShaderDesc::new("memory/shadow.wgsl", entry, profile)
    }

    #[test]
    fn test_compile_wgsl_signature() {
        let compiler = ShaderCompiler::new();
        let compiled = compiler
            .compile_source(SHADOW_WGSL, &desc("vs_main", "vs_5_0"))
            .unwrap();

        assert_eq!(compiled.stage(), ShaderStage::Vertex);
        assert_eq!(compiled.entry_point(), "vs_main");
        let locations: Vec<u32> = compiled.input_signature().iter().map(|p| p.location).collect();
        assert_eq!(locations, vec![0, 5, 6, 7, 8]);
        assert_eq!(compiled.input_signature()[0].components, 3);
        assert!(compiled.input_signature().iter().all(|p| p.kind == ScalarKind::Float));
        assert!(compiled.wgsl().contains("vs_main"));
    }

    #[test]
    fn test_missing_entry_point() {
        let compiler = ShaderCompiler::new();
        let err = compiler
            .compile_source(SHADOW_WGSL, &desc("main", "vs_5_0"))
            .unwrap_err();
        assert!(matches!(err, GraphicsError::ShaderCompilationFailed { .. }));
    }

    #[test]
    fn test_stage_mismatch() {
        let compiler = ShaderCompiler::new();
        let err = compiler
            .compile_source(SHADOW_WGSL, &desc("vs_main", "ps_5_0"))
            .unwrap_err();
        assert!(err.is_compile_error());
    }

    #[test]
    fn test_bad_profile() {
        let compiler = ShaderCompiler::new();
        let err = compiler
            .compile_source(SHADOW_WGSL, &desc("vs_main", "vs5"))
            .unwrap_err();
        assert!(matches!(err, GraphicsError::InvalidShaderProfile(_)));
    }

    #[test]
    fn test_syntax_error() {
        let compiler = ShaderCompiler::new();
        let err = compiler
            .compile_source("@vertex fn vs_main( -> {", &desc("vs_main", "vs_5_0"))
            .unwrap_err();
        match err {
            GraphicsError::ShaderCompilationFailed { path, .. } => {
                assert_eq!(path, PathBuf::from("memory/shadow.wgsl"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let compiler = ShaderCompiler::new();
        let err = compiler
            .compile(&ShaderDesc::new("does/not/exist.wgsl", "vs_main", "vs_5_0"))
            .unwrap_err();
        assert!(matches!(err, GraphicsError::ShaderCompilationFailed { .. }));
    }

    #[test]
    fn test_registered_include() {
        let mut compiler = ShaderCompiler::new();
        compiler.register_include(
            "umbra/light.wgsl",
            "struct Light { view_projection: mat4x4<f32>, }\n\
             @group(0) @binding(0) var<uniform> light: Light;",
        );

        let source = r#"
#include "umbra/light.wgsl"
#include "umbra/light.wgsl"

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return light.view_projection * vec4<f32>(position, 1.0);
}
"#;
        let compiled = compiler
            .compile_source(source, &desc("vs_main", "vs_5_0"))
            .unwrap();
        assert_eq!(compiled.input_signature().len(), 1);
    }

    #[test]
    fn test_missing_include() {
        let compiler = ShaderCompiler::new();
        let source = "#include \"nonexistent/file.wgsl\"\n";
        let result = compiler.compile_source(source, &desc("vs_main", "vs_5_0"));
        assert!(result.is_err());
    }

    #[test]
    fn test_compile_glsl_with_defines() {
        let compiler = ShaderCompiler::new();
        let source = r#"#version 450

layout(location = 0) in vec3 position;
#ifdef USE_INSTANCING
layout(location = 5) in vec4 transform_0;
#endif

void main() {
#ifdef USE_INSTANCING
    gl_Position = vec4(position, 1.0) + transform_0;
#else
    gl_Position = vec4(position, 1.0);
#endif
}
"#;
        let base = ShaderDesc::new("memory/shadow.vert", "main", "vs_5_0");

        let plain = compiler.compile_source(source, &base).unwrap();
        assert_eq!(plain.input_signature().len(), 1);

        let instanced = compiler
            .compile_source(source, &base.clone().with_define("USE_INSTANCING", true))
            .unwrap();
        let locations: Vec<u32> = instanced.input_signature().iter().map(|p| p.location).collect();
        assert_eq!(locations, vec![0, 5]);
    }

    #[test]
    fn test_fragment_has_no_signature() {
        let compiler = ShaderCompiler::new();
        let source = r#"
@fragment
fn ps_main(@location(0) depth: f32) -> @location(0) vec4<f32> {
    return vec4<f32>(depth);
}
"#;
        let compiled = compiler
            .compile_source(source, &desc("ps_main", "ps_5_0"))
            .unwrap();
        assert!(compiled.input_signature().is_empty());
    }

    #[test]
    fn test_parse_include_directive() {
        assert_eq!(
            parse_include_directive(r#"#include "foo/bar.wgsl""#),
            Some("foo/bar.wgsl")
        );
        assert_eq!(
            parse_include_directive(r#"#include <foo/bar.wgsl>"#),
            Some("foo/bar.wgsl")
        );
        assert_eq!(parse_include_directive("#define FOO"), None);
        assert_eq!(parse_include_directive("// comment"), None);
    }
}
