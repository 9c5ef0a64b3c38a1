//! Named capabilities an element type can supply

use std::fmt::{self, Display};

/// A named operation an element type must provide to be usable with a given
/// container feature.
///
/// `Assign` and `Destruct` are mandatory and always present on a
/// [`TypeDescriptor`](crate::TypeDescriptor); the others are optional and only
/// required by the operations that use them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Copy-construct or overwrite a payload from a source value.
    Assign,

    /// Release the resources owned by a payload.
    Destruct,

    /// Equality, needed by `contains`, `remove_value` and `equals`.
    Equal,

    /// Strict ordering, needed by `sort`.
    LessThan,

    /// Human readable formatting, needed by `Display`.
    Show,

    /// Integer conversion, needed to use a value as an index key.
    ToInt,

    /// JSON encoding.
    #[cfg(feature = "serde")]
    Serialize,

    /// JSON decoding.
    #[cfg(feature = "serde")]
    Deserialize,
}

impl Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
