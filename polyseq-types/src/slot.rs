//! Slot header and slot layout
//!
//! A slot is one fixed-stride storage unit: a [`SlotHeader`] immediately
//! followed by one element payload.

use crate::TypeDescriptor;
use std::mem::{align_of, size_of};

/// Slot carries a constructed value.
pub const SLOT_ALLOCATED: u32 = 0x1;

/// Per-slot metadata recording the occupying type.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SlotHeader {
    /// Descriptor of the value in the payload.
    pub ty: &'static TypeDescriptor,
    /// Slot flags, see [`SLOT_ALLOCATED`].
    pub flags: u32,
}

impl SlotHeader {
    /// Header of a slot about to receive a value of type `ty`.
    pub const fn allocated(ty: &'static TypeDescriptor) -> Self {
        Self {
            ty,
            flags: SLOT_ALLOCATED,
        }
    }

    /// Returns true if the slot carries a constructed value.
    pub const fn is_allocated(&self) -> bool {
        self.flags & SLOT_ALLOCATED != 0
    }
}

/// Byte layout of one slot for a given element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLayout {
    /// Offset of the payload from the start of the slot.
    pub payload_offset: usize,
    /// Distance between two consecutive slots.
    pub stride: usize,
    /// Alignment of every slot.
    pub align: usize,
}

impl SlotLayout {
    /// Computes the slot layout for elements described by `ty`.
    pub const fn for_type(ty: &TypeDescriptor) -> Self {
        let align = max(align_of::<SlotHeader>(), ty.align());
        let payload_offset = round_up(size_of::<SlotHeader>(), ty.align());
        let stride = round_up(payload_offset + ty.size(), align);
        Self {
            payload_offset,
            stride,
            align,
        }
    }
}

const fn max(a: usize, b: usize) -> usize {
    if a > b { a } else { b }
}

// `align` is always a power of two.
const fn round_up(n: usize, align: usize) -> usize {
    (n + align - 1) & !(align - 1)
}
