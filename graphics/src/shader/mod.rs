//! Shader compilation and shader objects.
//!
//! The shader system consists of:
//! - [`ShaderDesc`] - Source file, entry point and profile of one shader
//! - [`ShaderCompiler`] - Turns a description into a [`CompiledShader`]
//! - [`VertexShader`] / [`ShadowVertexShader`] - Vertex shader plus input layout
//! - [`PixelShader`] - Fragment-stage shader object
//!
//! # Example
//!
//! ```ignore
//! use umbra_graphics::shader::ShadowVertexShader;
//!
//! let mut shadow = ShadowVertexShader::new("shaders/shadow.wgsl", "vs_main", "vs_5_0");
//! if let Err(e) = shadow.initialize(backend.as_ref()) {
//!     // Presentation is up to the caller.
//!     eprintln!("{e}");
//! }
//! ```

mod compiler;
mod desc;
mod pixel;
mod profile;
mod shadow;
mod vertex;

pub use compiler::{CompiledShader, ShaderCompiler};
pub use desc::{ShaderDef, ShaderDesc, ShaderLanguage};
pub use pixel::PixelShader;
pub use profile::{ShaderProfile, ShaderStage};
pub use shadow::ShadowVertexShader;
pub use vertex::VertexShader;
