//! Borrowed handles to type-erased values

use crate::{Element, TypeDescriptor, dispatch};
use std::{
    fmt::{self, Debug, Display},
    marker::PhantomData,
    ptr::NonNull,
};

/// A borrowed, type-erased value: a payload pointer paired with the
/// descriptor of the type stored there.
///
/// Handles taken from a container are valid until the next operation that
/// reallocates or shifts its storage; the borrow checker enforces this
/// through the `'a` lifetime.
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    descriptor: &'static TypeDescriptor,
    ptr: NonNull<u8>,
    _marker: PhantomData<&'a ()>,
}

impl<'a> ElementRef<'a> {
    /// Borrows a typed value as an erased handle.
    ///
    /// # Panics
    /// If `T::descriptor()` was built for another type.
    pub fn new<T: Element>(value: &'a T) -> Self {
        let descriptor = T::descriptor();
        assert!(
            descriptor.is::<T>(),
            "descriptor '{}' does not describe {}",
            descriptor.name(),
            std::any::type_name::<T>()
        );
        Self {
            descriptor,
            ptr: NonNull::from(value).cast(),
            _marker: PhantomData,
        }
    }

    /// Builds a handle from a raw payload pointer.
    ///
    /// # Safety
    /// `ptr` must be non-null and point to an initialized value of the type
    /// described by `descriptor`, living (and not mutated) for `'a`.
    pub unsafe fn from_raw_parts(descriptor: &'static TypeDescriptor, ptr: *const u8) -> Self {
        Self {
            descriptor,
            ptr: unsafe { NonNull::new_unchecked(ptr.cast_mut()) },
            _marker: PhantomData,
        }
    }

    /// Descriptor of the referenced value.
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        self.descriptor
    }

    /// Name of the referenced value's type.
    pub fn type_name(&self) -> &'static str {
        self.descriptor.name()
    }

    /// Raw payload pointer.
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    /// Returns true if the referenced value is a `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.descriptor.is::<T>()
    }

    /// Returns the typed value if it is a `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&'a T> {
        if self.is::<T>() {
            Some(unsafe { &*self.ptr.as_ptr().cast::<T>() })
        } else {
            None
        }
    }
}

// Descriptors are only built for `Send + Sync` types, so a handle is as
// thread-safe as the `&T` it stands for.
unsafe impl Send for ElementRef<'_> {}
unsafe impl Sync for ElementRef<'_> {}

impl<'a, T: Element> From<&'a T> for ElementRef<'a> {
    fn from(value: &'a T) -> Self {
        ElementRef::new(value)
    }
}

impl Display for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch::show(*self, f)
    }
}

impl Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementRef<{}>({})", self.type_name(), self)
    }
}

/// Equality through the equal capability; types without it compare unequal.
impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        dispatch::equal(*self, *other).unwrap_or(false)
    }
}
