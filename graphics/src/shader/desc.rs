//! Shader configuration.

use std::path::{Path, PathBuf};

use crate::error::GraphicsError;

/// Source language of a shader file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderLanguage {
    /// WebGPU Shading Language.
    Wgsl,
    /// OpenGL Shading Language (450 core).
    Glsl,
}

impl ShaderLanguage {
    /// Detect the language from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, GraphicsError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("wgsl") => Ok(Self::Wgsl),
            Some("glsl" | "vert" | "frag" | "comp" | "vs" | "fs") => Ok(Self::Glsl),
            Some("hlsl" | "fx") => Err(GraphicsError::compilation(
                path,
                "HLSL sources are not supported; provide WGSL or GLSL",
            )),
            _ => Err(GraphicsError::compilation(
                path,
                "cannot determine shader language from file extension",
            )),
        }
    }
}

/// Shader definition value for compile-time conditionals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderDef {
    /// Boolean definition (`#ifdef`, `#ifndef`).
    Bool(bool),
    /// Integer definition (`#if VAR == 5`).
    Int(i32),
    /// Unsigned integer definition.
    UInt(u32),
}

impl From<bool> for ShaderDef {
    fn from(v: bool) -> Self {
        ShaderDef::Bool(v)
    }
}

impl From<i32> for ShaderDef {
    fn from(v: i32) -> Self {
        ShaderDef::Int(v)
    }
}

impl From<u32> for ShaderDef {
    fn from(v: u32) -> Self {
        ShaderDef::UInt(v)
    }
}

/// Everything needed to compile one shader entry point from a file.
///
/// # Example
///
/// ```ignore
/// let desc = ShaderDesc::new("shaders/shadow.wgsl", "vs_main", "vs_5_0")
///     .with_include_dir("shaders/common");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDesc {
    /// Path of the shader source file.
    pub path: PathBuf,
    /// Entry point function name.
    pub entry_point: String,
    /// Target profile string, e.g. `vs_5_0`.
    pub profile: String,
    /// Source language; detected from the extension when `None`.
    pub language: Option<ShaderLanguage>,
    /// Preprocessor definitions (GLSL only).
    pub defines: Vec<(String, ShaderDef)>,
    /// Extra directories searched for `#include` files.
    pub include_dirs: Vec<PathBuf>,
}

impl ShaderDesc {
    /// Create a shader description.
    pub fn new(
        path: impl Into<PathBuf>,
        entry_point: impl Into<String>,
        profile: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            entry_point: entry_point.into(),
            profile: profile.into(),
            language: None,
            defines: Vec::new(),
            include_dirs: Vec::new(),
        }
    }

    /// Force the source language instead of detecting it.
    pub fn with_language(mut self, language: ShaderLanguage) -> Self {
        self.language = Some(language);
        self
    }

    /// Add a preprocessor definition.
    pub fn with_define(mut self, name: impl Into<String>, value: impl Into<ShaderDef>) -> Self {
        self.defines.push((name.into(), value.into()));
        self
    }

    /// Add a directory searched for `#include` files.
    pub fn with_include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_dirs.push(dir.into());
        self
    }

    /// Language of the source, explicit or detected.
    pub fn language(&self) -> Result<ShaderLanguage, GraphicsError> {
        match self.language {
            Some(language) => Ok(language),
            None => ShaderLanguage::from_path(&self.path),
        }
    }
}
