//! Error types for container operations

use crate::capability::Capability;
use thiserror::Error;

/// Result type for container operations
pub type Result<T> = std::result::Result<T, Error>;

/// Out-of-range access details
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutOfBounds {
    /// Index outside `[0, len)`
    #[error("Index '{index}' out of bounds for Array of size {len}.")]
    Index {
        /// The requested index
        index: i64,
        /// Length of the array at the time of the access
        len: usize,
    },

    /// Pop on an array with no elements
    #[error("Cannot pop. Array is empty!")]
    Empty,
}

/// Errors raised by descriptors, the dispatcher and the containers built on them
#[derive(Debug, Error)]
pub enum Error {
    /// Backing storage could not be allocated or grown
    #[error("Cannot allocate storage for {slots} slots, out of memory!")]
    OutOfMemory {
        /// Number of slots requested
        slots: usize,
    },

    /// Index-based access outside the live range
    #[error(transparent)]
    IndexOutOfBounds(#[from] OutOfBounds),

    /// Value looked up by equality is not present
    #[error("Object {0} not in Array!")]
    ValueNotFound(String),

    /// Value of another element type passed to a container
    #[error("Type mismatch: expected '{expected}', found '{found}'")]
    TypeMismatch {
        /// Element type of the container
        expected: &'static str,
        /// Type of the offending value
        found: &'static str,
    },

    /// Operation requires a capability the element type does not provide
    #[error("Type '{type_name}' does not implement the {capability} capability")]
    MissingCapability {
        /// Name of the element type
        type_name: &'static str,
        /// The capability that was requested
        capability: Capability,
    },

    /// Index key could not be converted to an integer
    #[error("Cannot use {0} as an index")]
    InvalidIndex(String),

    /// JSON conversion error
    #[cfg(feature = "serde")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true for both flavours of out-of-range access.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Error::IndexOutOfBounds(_))
    }
}
