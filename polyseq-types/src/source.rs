//! Sequence-like sources consumed by container assignment, concatenation
//! and equality

use crate::{Element, ElementRef};

/// A finite sequence of type-erased values with a length and index access.
///
/// Containers accept any source when copying elements in, so they can be
/// filled from typed slices, slices of erased handles or other containers.
pub trait Source {
    /// Number of elements the source yields.
    fn source_len(&self) -> usize;

    /// Iterates the elements in order.
    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>>;

    /// Element at `index`, if any.
    fn element_at(&self, index: usize) -> Option<ElementRef<'_>> {
        self.elements().nth(index)
    }
}

impl<T: Element> Source for [T] {
    fn source_len(&self) -> usize {
        self.len()
    }

    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.iter().map(ElementRef::new)
    }

    fn element_at(&self, index: usize) -> Option<ElementRef<'_>> {
        self.get(index).map(ElementRef::new)
    }
}

impl<T: Element> Source for Vec<T> {
    fn source_len(&self) -> usize {
        self.len()
    }

    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.as_slice().elements()
    }

    fn element_at(&self, index: usize) -> Option<ElementRef<'_>> {
        self.as_slice().element_at(index)
    }
}

impl<T: Element, const N: usize> Source for [T; N] {
    fn source_len(&self) -> usize {
        N
    }

    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.as_slice().elements()
    }

    fn element_at(&self, index: usize) -> Option<ElementRef<'_>> {
        self.as_slice().element_at(index)
    }
}

fn shorten<'s>(element: &'s ElementRef<'_>) -> ElementRef<'s> {
    *element
}

impl Source for [ElementRef<'_>] {
    fn source_len(&self) -> usize {
        self.len()
    }

    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.iter().map(shorten)
    }

    fn element_at(&self, index: usize) -> Option<ElementRef<'_>> {
        self.get(index).map(shorten)
    }
}
