//! Iteration over array elements
//!
//! Two views are provided. [`Iter`] is a borrowing Rust iterator. [`Cursor`]
//! is a detached position for the init/next protocol: it holds no borrow,
//! so it survives mutation, and [`Array::at`] re-checks it against the
//! current length before every read.

use crate::Array;
use polyseq_types::{ElementRef, Result, Source};
use std::iter::FusedIterator;

/// A detached position in an [`Array`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor(usize);

impl Cursor {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Array {
    /// First position, or `None` for an empty array.
    pub fn iter_init(&self) -> Option<Cursor> {
        (!self.is_empty()).then_some(Cursor(0))
    }

    /// Position after `cursor`, or `None` once the last element is passed.
    pub fn iter_next(&self, cursor: Cursor) -> Option<Cursor> {
        let next = cursor.0 + 1;
        (next < self.len()).then_some(Cursor(next))
    }

    /// Element at `cursor`.
    pub fn at(&self, cursor: Cursor) -> Result<ElementRef<'_>> {
        self.get(cursor.0)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            array: self,
            front: 0,
            back: self.len(),
        }
    }
}

/// Borrowing iterator over the elements of an [`Array`].
#[derive(Clone)]
pub struct Iter<'a> {
    array: &'a Array,
    front: usize,
    back: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = ElementRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let element = unsafe { self.array.get_unchecked(self.front) };
        self.front += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(unsafe { self.array.get_unchecked(self.back) })
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Array {
    type Item = ElementRef<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Source for Array {
    fn source_len(&self) -> usize {
        self.len()
    }

    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.iter()
    }

    fn element_at(&self, index: usize) -> Option<ElementRef<'_>> {
        (index < self.len()).then(|| unsafe { self.get_unchecked(index) })
    }
}
