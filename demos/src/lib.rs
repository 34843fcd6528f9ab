//! Shared pieces of the Umbra command line demos.

pub mod args;

pub use args::{CliBackend, CliGpuApi, ShadowShaderArgs};
