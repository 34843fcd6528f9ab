//! Validated input layouts.
//!
//! An [`InputLayoutDescriptor`] is built from a table of [`InputElement`]s.
//! Building it resolves appended offsets, derives one [`VertexBufferLayout`]
//! per slot, and rejects tables no device would accept. Element `i` of the
//! table is bound to shader location `i`.

use std::collections::HashSet;

use crate::error::GraphicsError;

use super::element::{InputElement, VertexSemantic, VertexStepMode};
use super::signature::SignatureParameter;

/// Maximum number of vertex-buffer slots a layout may reference.
pub const MAX_INPUT_SLOTS: u32 = 32;

/// Required alignment of element offsets, in bytes.
pub const VERTEX_ALIGNMENT: u32 = 4;

/// Describes a single vertex buffer slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexBufferLayout {
    /// Stride in bytes between consecutive elements.
    pub stride: u32,
    /// How the buffer advances (per-vertex or per-instance).
    pub step_mode: VertexStepMode,
    /// Instances drawn before advancing (0 for per-vertex slots).
    pub instance_step_rate: u32,
}

impl VertexBufferLayout {
    /// Create a new per-vertex buffer layout with the given stride.
    pub fn new(stride: u32) -> Self {
        Self {
            stride,
            step_mode: VertexStepMode::Vertex,
            instance_step_rate: 0,
        }
    }

    /// Create a per-instance buffer layout.
    pub fn per_instance(stride: u32, instance_step_rate: u32) -> Self {
        Self {
            stride,
            step_mode: VertexStepMode::Instance,
            instance_step_rate,
        }
    }
}

/// An element with its offset resolved and its shader location assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundElement {
    /// The source element (offset may still be `APPEND_ALIGNED`).
    pub element: InputElement,
    /// Resolved byte offset within the slot.
    pub offset: u32,
    /// Shader location the element feeds.
    pub location: u32,
}

/// Describes the layout of input data across one or more vertex buffers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputLayoutDescriptor {
    /// Descriptions of each vertex buffer slot, indexed by slot.
    pub buffers: Vec<VertexBufferLayout>,
    /// The bound elements, in table order.
    pub elements: Vec<BoundElement>,
    /// Optional label for debugging.
    pub label: Option<String>,
}

impl InputLayoutDescriptor {
    /// Build and validate a layout from an element table.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::InvalidParameter`] if the table is empty, names
    /// the same semantic twice, uses an out-of-range slot or misaligned offset,
    /// or mixes step modes within a slot.
    pub fn from_elements(elements: &[InputElement]) -> Result<Self, GraphicsError> {
        if elements.is_empty() {
            return Err(GraphicsError::InvalidParameter(
                "input layout has no elements".into(),
            ));
        }

        let mut seen: HashSet<(VertexSemantic, u32)> = HashSet::new();
        let mut slot_ends: Vec<u32> = Vec::new();
        let mut next_offsets: Vec<u32> = Vec::new();
        let mut slot_modes: Vec<Option<(VertexStepMode, u32)>> = Vec::new();
        let mut bound = Vec::with_capacity(elements.len());

        for (location, element) in elements.iter().enumerate() {
            if !seen.insert((element.semantic, element.semantic_index)) {
                return Err(GraphicsError::InvalidParameter(format!(
                    "duplicate element {element}"
                )));
            }

            if element.input_slot >= MAX_INPUT_SLOTS {
                return Err(GraphicsError::InvalidParameter(format!(
                    "element {element} uses slot {} but only {MAX_INPUT_SLOTS} slots exist",
                    element.input_slot
                )));
            }

            if element.step_mode == VertexStepMode::Vertex && element.instance_step_rate != 0 {
                return Err(GraphicsError::InvalidParameter(format!(
                    "per-vertex element {element} has instance step rate {}",
                    element.instance_step_rate
                )));
            }

            let slot = element.input_slot as usize;
            if slot >= slot_ends.len() {
                slot_ends.resize(slot + 1, 0);
                next_offsets.resize(slot + 1, 0);
                slot_modes.resize(slot + 1, None);
            }

            let mode = (element.step_mode, element.instance_step_rate);
            match slot_modes[slot] {
                None => slot_modes[slot] = Some(mode),
                Some(existing) if existing != mode => {
                    return Err(GraphicsError::InvalidParameter(format!(
                        "element {element} disagrees with slot {slot} step mode {:?}/{}",
                        existing.0, existing.1
                    )));
                }
                Some(_) => {}
            }

            // Appended elements follow the previous element in the slot, not the furthest one.
            let offset = if element.offset == InputElement::APPEND_ALIGNED {
                next_offsets[slot]
            } else {
                element.offset
            };
            if offset % VERTEX_ALIGNMENT != 0 {
                return Err(GraphicsError::InvalidParameter(format!(
                    "element {element} offset {offset} is not {VERTEX_ALIGNMENT}-byte aligned"
                )));
            }

            let end = offset.checked_add(element.format.size()).ok_or_else(|| {
                GraphicsError::InvalidParameter(format!("element {element} offset overflows"))
            })?;
            slot_ends[slot] = slot_ends[slot].max(end);
            next_offsets[slot] = end;
            bound.push(BoundElement {
                element: *element,
                offset,
                location: location as u32,
            });
        }

        let buffers = slot_ends
            .iter()
            .zip(&slot_modes)
            .map(|(&stride, mode)| match mode {
                Some((VertexStepMode::Instance, rate)) => {
                    VertexBufferLayout::per_instance(stride, *rate)
                }
                _ => VertexBufferLayout::new(stride),
            })
            .collect();

        Ok(Self {
            buffers,
            elements: bound,
            label: None,
        })
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Override the stride of a slot.
    ///
    /// # Errors
    ///
    /// Fails if the slot does not exist or the stride is smaller than the
    /// end of the slot's last element.
    pub fn with_stride(mut self, slot: u32, stride: u32) -> Result<Self, GraphicsError> {
        let Some(buffer) = self.buffers.get_mut(slot as usize) else {
            return Err(GraphicsError::InvalidParameter(format!(
                "slot {slot} is not used by this layout"
            )));
        };
        if stride < buffer.stride || stride % VERTEX_ALIGNMENT != 0 {
            return Err(GraphicsError::InvalidParameter(format!(
                "stride {stride} for slot {slot} must be {VERTEX_ALIGNMENT}-byte aligned \
                 and at least {}",
                buffer.stride
            )));
        }
        buffer.stride = stride;
        Ok(self)
    }

    /// Get the number of vertex buffer slots.
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Get the stride for a specific slot.
    pub fn buffer_stride(&self, slot: usize) -> u32 {
        self.buffers.get(slot).map(|b| b.stride).unwrap_or(0)
    }

    /// Get all elements read from a specific slot.
    pub fn elements_for_slot(&self, slot: u32) -> impl Iterator<Item = &BoundElement> {
        self.elements
            .iter()
            .filter(move |bound| bound.element.input_slot == slot)
    }

    /// Find the element bound to a shader location.
    pub fn element_at(&self, location: u32) -> Option<&BoundElement> {
        self.elements.iter().find(|bound| bound.location == location)
    }

    /// Check that this layout feeds every input of a shader signature.
    ///
    /// Each signature location must be bound to an element with the same
    /// scalar type. Component counts may differ; missing components read as
    /// defaults. Elements the shader does not read are allowed.
    pub fn check_signature(&self, signature: &[SignatureParameter]) -> Result<(), GraphicsError> {
        for param in signature {
            let Some(bound) = self.element_at(param.location) else {
                return Err(GraphicsError::InputLayoutMismatch(format!(
                    "shader reads location {} but the layout has only {} elements",
                    param.location,
                    self.elements.len()
                )));
            };
            let kind = bound.element.format.scalar_kind();
            if kind != param.kind {
                return Err(GraphicsError::InputLayoutMismatch(format!(
                    "location {} ({}) is {:?} in the layout but {:?} in the shader",
                    param.location, bound.element, kind, param.kind
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::element::{ScalarKind, VertexFormat};

    fn position(slot: u32, offset: u32) -> InputElement {
        InputElement::per_vertex(VertexSemantic::Position, 0, VertexFormat::Float3, slot, offset)
    }

    fn texcoord(slot: u32, offset: u32) -> InputElement {
        InputElement::per_vertex(VertexSemantic::TexCoord, 0, VertexFormat::Float2, slot, offset)
    }

    #[test]
    fn test_single_slot_stride() {
        let layout = InputLayoutDescriptor::from_elements(&[position(0, 0), texcoord(0, 12)])
            .unwrap();
        assert_eq!(layout.buffer_count(), 1);
        assert_eq!(layout.buffer_stride(0), 20);
        assert_eq!(layout.buffers[0].step_mode, VertexStepMode::Vertex);
    }

    #[test]
    fn test_append_aligned_offsets() {
        let layout = InputLayoutDescriptor::from_elements(&[
            position(0, InputElement::APPEND_ALIGNED),
            texcoord(0, InputElement::APPEND_ALIGNED),
        ])
        .unwrap();
        assert_eq!(layout.elements[0].offset, 0);
        assert_eq!(layout.elements[1].offset, 12);
        assert_eq!(layout.buffer_stride(0), 20);
    }

    #[test]
    fn test_append_aligned_follows_previous_element() {
        let layout = InputLayoutDescriptor::from_elements(&[
            InputElement::per_vertex(VertexSemantic::Position, 0, VertexFormat::Float4, 0, 16),
            InputElement::per_vertex(VertexSemantic::Normal, 0, VertexFormat::Float, 0, 0),
            InputElement::per_vertex(
                VertexSemantic::TexCoord,
                0,
                VertexFormat::Float,
                0,
                InputElement::APPEND_ALIGNED,
            ),
        ])
        .unwrap();
        assert_eq!(layout.elements[2].offset, 4);
        assert_eq!(layout.buffer_stride(0), 32);
    }

    #[test]
    fn test_locations_follow_table_order() {
        let layout =
            InputLayoutDescriptor::from_elements(&[texcoord(1, 0), position(0, 0)]).unwrap();
        assert_eq!(layout.element_at(0).unwrap().element.semantic, VertexSemantic::TexCoord);
        assert_eq!(layout.element_at(1).unwrap().element.semantic, VertexSemantic::Position);
        assert_eq!(layout.elements_for_slot(1).count(), 1);
    }

    #[test]
    fn test_unused_slots_are_empty() {
        let layout = InputLayoutDescriptor::from_elements(&[position(2, 0)]).unwrap();
        assert_eq!(layout.buffer_count(), 3);
        assert_eq!(layout.buffer_stride(0), 0);
        assert_eq!(layout.buffer_stride(2), 12);
    }

    #[test]
    fn test_rejects_empty_table() {
        assert!(matches!(
            InputLayoutDescriptor::from_elements(&[]),
            Err(GraphicsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_semantic() {
        let result = InputLayoutDescriptor::from_elements(&[position(0, 0), position(1, 0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_slot_out_of_range() {
        let result = InputLayoutDescriptor::from_elements(&[position(MAX_INPUT_SLOTS, 0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_misaligned_offset() {
        let result = InputLayoutDescriptor::from_elements(&[position(0, 0), texcoord(0, 13)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_step_rate_on_vertex_data() {
        let mut element = position(0, 0);
        element.instance_step_rate = 1;
        assert!(InputLayoutDescriptor::from_elements(&[element]).is_err());
    }

    #[test]
    fn test_rejects_mixed_step_modes_in_slot() {
        let row = InputElement::per_instance(
            VertexSemantic::InstanceTransform,
            0,
            VertexFormat::Float4,
            0,
            12,
            1,
        );
        assert!(InputLayoutDescriptor::from_elements(&[position(0, 0), row]).is_err());
    }

    #[test]
    fn test_with_stride() {
        let layout = InputLayoutDescriptor::from_elements(&[position(0, 0)]).unwrap();
        let padded = layout.clone().with_stride(0, 16).unwrap();
        assert_eq!(padded.buffer_stride(0), 16);
        assert!(layout.clone().with_stride(0, 8).is_err());
        assert!(layout.with_stride(3, 16).is_err());
    }

    #[test]
    fn test_check_signature() {
        let layout = InputLayoutDescriptor::from_elements(&[position(0, 0), texcoord(0, 12)])
            .unwrap();

        let ok = [SignatureParameter::new(0, ScalarKind::Float, 3)];
        assert!(layout.check_signature(&ok).is_ok());

        // Fewer components than the layout provides is fine.
        let narrow = [SignatureParameter::new(1, ScalarKind::Float, 1)];
        assert!(layout.check_signature(&narrow).is_ok());

        let missing = [SignatureParameter::new(5, ScalarKind::Float, 4)];
        assert!(matches!(
            layout.check_signature(&missing),
            Err(GraphicsError::InputLayoutMismatch(_))
        ));

        let wrong_kind = [SignatureParameter::new(0, ScalarKind::Uint, 3)];
        assert!(matches!(
            layout.check_signature(&wrong_kind),
            Err(GraphicsError::InputLayoutMismatch(_))
        ));
    }
}
