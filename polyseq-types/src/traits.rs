//! Core traits for element types and index keys

use crate::{ElementRef, Error, Result, TypeDescriptor, dispatch};
use num_traits::ToPrimitive;

/// Trait for Rust types that can be stored in a type-erased container.
///
/// Implementors hand out the `'static` descriptor that every container
/// operation dispatches through. It must be a descriptor built for `Self`:
/// [`ElementRef::new`] panics otherwise.
///
/// ```
/// use polyseq_types::{DescriptorBuilder, Element, TypeDescriptor};
///
/// #[derive(Clone, PartialEq, PartialOrd)]
/// struct Meters(f64);
///
/// static METERS: TypeDescriptor = DescriptorBuilder::<Meters>::new("Meters")
///     .equal()
///     .less_than()
///     .build();
///
/// impl Element for Meters {
///     fn descriptor() -> &'static TypeDescriptor {
///         &METERS
///     }
/// }
///
/// assert_eq!(Meters::descriptor().name(), "Meters");
/// ```
pub trait Element: Clone + Send + Sync + 'static {
    /// Returns the descriptor of this type.
    fn descriptor() -> &'static TypeDescriptor;
}

/// Trait for type that can fail cloning
///
/// Used for containers whose copy has to allocate.
pub trait TryClone: Sized {
    /// Returns Some(Self) if clone succeeds else None
    fn try_clone(&self) -> Option<Self>;
}

/// Trait for values usable as a positional key.
///
/// Native integers convert directly. Type-erased values go through their
/// type's integer conversion capability.
pub trait ArrayIndex {
    /// Converts the key to a signed position.
    fn to_index(&self) -> Result<i64>;
}

macro_rules! def_array_index {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ArrayIndex for $ty {
                #[inline]
                fn to_index(&self) -> Result<i64> {
                    self.to_i64()
                        .ok_or_else(|| Error::InvalidIndex(self.to_string()))
                }
            }
        )*
    };
}

def_array_index!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl ArrayIndex for ElementRef<'_> {
    fn to_index(&self) -> Result<i64> {
        dispatch::to_int(*self)
    }
}

impl<I: ArrayIndex + ?Sized> ArrayIndex for &I {
    fn to_index(&self) -> Result<i64> {
        (**self).to_index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_index() {
        assert_eq!(3usize.to_index().unwrap(), 3);
        assert_eq!((-1i32).to_index().unwrap(), -1);
        assert!(u64::MAX.to_index().is_err());
    }

    #[test]
    fn test_erased_index() {
        let boxed = 2i64;
        assert_eq!(ElementRef::new(&boxed).to_index().unwrap(), 2);

        let real = 1.9f64;
        assert_eq!(ElementRef::new(&real).to_index().unwrap(), 1);

        let text = String::from("two");
        assert!(matches!(
            ElementRef::new(&text).to_index(),
            Err(Error::MissingCapability { .. })
        ));
    }
}
