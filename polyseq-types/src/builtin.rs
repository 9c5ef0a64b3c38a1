//! Descriptors of the builtin element types

use crate::{DescriptorBuilder, Element, TypeDescriptor};

#[cfg(feature = "serde")]
const fn finish<T>(builder: DescriptorBuilder<T>) -> TypeDescriptor
where
    T: Clone + Send + Sync + serde::Serialize + serde::de::DeserializeOwned + 'static,
{
    builder.to_json().from_json().build()
}

#[cfg(not(feature = "serde"))]
const fn finish<T>(builder: DescriptorBuilder<T>) -> TypeDescriptor
where
    T: Clone + Send + Sync + 'static,
{
    builder.build()
}

macro_rules! def_numeric {
    ($($static:ident: $ty:ty => $name:literal),* $(,)?) => {
        $(
            #[doc = concat!("Descriptor of `", stringify!($ty), "` (`", $name, "`).")]
            pub static $static: TypeDescriptor = finish(
                DescriptorBuilder::<$ty>::new($name)
                    .equal()
                    .less_than()
                    .show()
                    .to_int(),
            );

            impl Element for $ty {
                fn descriptor() -> &'static TypeDescriptor {
                    &$static
                }
            }
        )*
    };
}

def_numeric!(
    INT8: i8 => "Int8",
    INT16: i16 => "Int16",
    INT32: i32 => "Int32",
    INT: i64 => "Int",
    UINT8: u8 => "UInt8",
    UINT16: u16 => "UInt16",
    UINT32: u32 => "UInt32",
    UINT64: u64 => "UInt64",
    USIZE: usize => "USize",
    REAL32: f32 => "Real32",
    REAL: f64 => "Real",
);

/// Descriptor of `bool` (`Bool`).
pub static BOOL: TypeDescriptor =
    finish(DescriptorBuilder::<bool>::new("Bool").equal().less_than().show());

/// Descriptor of `char` (`Char`).
pub static CHAR: TypeDescriptor =
    finish(DescriptorBuilder::<char>::new("Char").equal().less_than().show());

/// Descriptor of `String` (`String`).
pub static STRING: TypeDescriptor =
    finish(DescriptorBuilder::<String>::new("String").equal().less_than().show());

impl Element for bool {
    fn descriptor() -> &'static TypeDescriptor {
        &BOOL
    }
}

impl Element for char {
    fn descriptor() -> &'static TypeDescriptor {
        &CHAR
    }
}

impl Element for String {
    fn descriptor() -> &'static TypeDescriptor {
        &STRING
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Capability;

    #[test]
    fn test_builtin_capabilities() {
        for descriptor in [&INT, &REAL, &UINT8, &INT32] {
            assert!(descriptor.supports(Capability::Equal));
            assert!(descriptor.supports(Capability::LessThan));
            assert!(descriptor.supports(Capability::Show));
            assert!(descriptor.supports(Capability::ToInt));
        }
        for descriptor in [&BOOL, &CHAR, &STRING] {
            assert!(descriptor.supports(Capability::LessThan));
            assert!(!descriptor.supports(Capability::ToInt));
        }
    }

    #[test]
    fn test_builtin_layout() {
        assert_eq!(i64::descriptor().size(), 8);
        assert_eq!(char::descriptor().size(), 4);
        assert!(String::descriptor().needs_drop());
        assert!(!f64::descriptor().needs_drop());
        assert!(INT.is::<i64>());
        assert_ne!(INT, INT32);
    }
}
