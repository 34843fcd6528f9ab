//! Shader input signatures.

use super::element::ScalarKind;

/// One location-bound input of a vertex entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignatureParameter {
    /// Shader location (`@location(n)` / `layout(location = n)`).
    pub location: u32,
    /// Scalar type of the input.
    pub kind: ScalarKind,
    /// Number of components (1-4).
    pub components: u8,
}

impl SignatureParameter {
    /// Create a new signature parameter.
    pub fn new(location: u32, kind: ScalarKind, components: u8) -> Self {
        Self {
            location,
            kind,
            components,
        }
    }
}
