//! `Array` as an element type, so arrays nest

use crate::Array;
use polyseq_types::{DescriptorBuilder, Element, TryClone, TypeDescriptor};

/// Descriptor of [`Array`] (`Array`). Assigning an array deep-copies it.
#[cfg(not(feature = "serde"))]
pub static ARRAY: TypeDescriptor = DescriptorBuilder::<Array>::new(Array::NAME)
    .equal()
    .show()
    .build();

/// Descriptor of [`Array`] (`Array`). Assigning an array deep-copies it.
#[cfg(feature = "serde")]
pub static ARRAY: TypeDescriptor = DescriptorBuilder::<Array>::new(Array::NAME)
    .equal()
    .show()
    .to_json()
    .build();

impl Element for Array {
    fn descriptor() -> &'static TypeDescriptor {
        &ARRAY
    }
}

impl TryClone for Array {
    fn try_clone(&self) -> Option<Self> {
        self.copy().ok()
    }
}

/// Panics if the copy cannot be allocated; use [`TryClone`] to handle that.
/// `clone_from` backs the assign capability of [`ARRAY`], so
/// [`Array::set`] on nested arrays panics the same way.
impl Clone for Array {
    fn clone(&self) -> Self {
        self.try_clone().expect("out of memory while cloning Array")
    }

    fn clone_from(&mut self, source: &Self) {
        if !self.element_type().same_type(source.element_type()) {
            *self = source.clone();
            return;
        }
        if let Err(err) = self.assign_from(source) {
            panic!("cannot assign Array: {err}");
        }
    }
}

/// Element-wise equality; arrays of types without the equal capability
/// only compare equal when both are empty.
impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other).unwrap_or(false)
    }
}
