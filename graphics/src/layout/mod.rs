//! Vertex input layouts.
//!
//! Input layouts describe how raw vertex-buffer bytes map to shader inputs.
//! A layout is declared as a table of [`InputElement`]s and validated into an
//! [`InputLayoutDescriptor`], which backends turn into device objects.
//!
//! Tables support several buffers, which lets meshes keep:
//!
//! - **Geometry and shading data apart**: positions and UVs in one buffer,
//!   tangent frames in another.
//! - **Instancing data** in a buffer with instance step mode.
//!
//! # Example
//!
//! ```ignore
//! const ELEMENTS: [InputElement; 2] = [
//!     InputElement::per_vertex(VertexSemantic::Position, 0, VertexFormat::Float3, 0, 0),
//!     InputElement::per_vertex(VertexSemantic::TexCoord, 0, VertexFormat::Float2, 0, 12),
//! ];
//!
//! let layout = InputLayoutDescriptor::from_elements(&ELEMENTS)?;
//! assert_eq!(layout.buffer_stride(0), 20);
//! ```

mod descriptor;
mod element;
mod presets;
mod signature;

pub use descriptor::{
    BoundElement, InputLayoutDescriptor, MAX_INPUT_SLOTS, VERTEX_ALIGNMENT, VertexBufferLayout,
};
pub use element::{InputElement, ScalarKind, VertexFormat, VertexSemantic, VertexStepMode};
pub use presets::SHADOW_INPUT_ELEMENTS;
pub use signature::SignatureParameter;
