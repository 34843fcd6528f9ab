//! Shader stages and target profiles.

use std::fmt;
use std::str::FromStr;

use crate::error::GraphicsError;

/// Shader stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader.
    Vertex,
    /// Fragment (pixel) shader.
    Fragment,
    /// Compute shader.
    Compute,
}

impl ShaderStage {
    /// Profile prefix for this stage (`vs`, `ps`, `cs`).
    pub fn profile_prefix(&self) -> &'static str {
        match self {
            Self::Vertex => "vs",
            Self::Fragment => "ps",
            Self::Compute => "cs",
        }
    }

    pub(crate) fn to_naga(self) -> naga::ShaderStage {
        match self {
            Self::Vertex => naga::ShaderStage::Vertex,
            Self::Fragment => naga::ShaderStage::Fragment,
            Self::Compute => naga::ShaderStage::Compute,
        }
    }
}

/// A target profile such as `vs_5_0`: a stage plus a shader-model version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderProfile {
    /// Stage the profile targets.
    pub stage: ShaderStage,
    /// Shader model major version.
    pub major: u8,
    /// Shader model minor version.
    pub minor: u8,
}

impl ShaderProfile {
    /// Create a profile.
    pub fn new(stage: ShaderStage, major: u8, minor: u8) -> Self {
        Self {
            stage,
            major,
            minor,
        }
    }

    /// Fail unless this profile targets `stage`.
    pub fn expect_stage(&self, stage: ShaderStage) -> Result<(), GraphicsError> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(GraphicsError::InvalidShaderProfile(format!(
                "{:?} shader requires a {}_* profile, got {self}",
                stage,
                stage.profile_prefix()
            )))
        }
    }
}

impl FromStr for ShaderProfile {
    type Err = GraphicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GraphicsError::InvalidShaderProfile(format!("\"{s}\""));

        let mut parts = s.trim().split('_');
        let stage = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            Some("vs") => ShaderStage::Vertex,
            Some("ps") => ShaderStage::Fragment,
            Some("cs") => ShaderStage::Compute,
            _ => return Err(invalid()),
        };
        let major = parts
            .next()
            .and_then(|v| v.parse::<u8>().ok())
            .ok_or_else(invalid)?;
        let minor = parts
            .next()
            .and_then(|v| v.parse::<u8>().ok())
            .ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self::new(stage, major, minor))
    }
}

impl fmt::Display for ShaderProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.stage.profile_prefix(),
            self.major,
            self.minor
        )
    }
}
