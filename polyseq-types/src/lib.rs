//! Type support for polyseq containers
//!
//! This crate provides the contract between a type-erased container and the
//! element types it stores:
//!
//! - [`TypeDescriptor`]: byte size, alignment and the capability table
//!   (assign, destruct, and optionally equal, less-than, show, to-int) of one
//!   element type, built at compile time with [`DescriptorBuilder`]
//! - [`dispatch`]: resolves and invokes a capability for an erased value
//! - [`ElementRef`]: a borrowed, type-erased value
//! - [`SlotHeader`] / [`SlotLayout`]: per-slot metadata and stride computation
//! - [`Element`]: maps a Rust type to its descriptor; implemented for the
//!   builtin scalar types and `String`
//! - [`Source`]: a length-aware sequence of erased values a container can
//!   copy from
//!
//! # Features
//!
//! - `serde`: adds the JSON encode/decode capabilities
//!
//! ```
//! use polyseq_types::{Element, ElementRef, dispatch};
//!
//! let a = 3i64;
//! let b = 5i64;
//! assert!(dispatch::less_than(ElementRef::new(&a), ElementRef::new(&b))?);
//! assert_eq!(i64::descriptor().name(), "Int");
//! # Ok::<(), polyseq_types::Error>(())
//! ```

pub mod builtin;
mod capability;
mod descriptor;
pub mod dispatch;
mod element;
mod error;
mod slot;
mod source;
mod traits;

pub use capability::Capability;
pub use descriptor::{
    AssignFn, CloneIntoFn, DescriptorBuilder, DestructFn, PredicateFn, ShowFn, ToIntFn,
    TypeDescriptor,
};
#[cfg(feature = "serde")]
pub use descriptor::{FromJsonFn, ToJsonFn};
pub use element::ElementRef;
pub use error::{Error, OutOfBounds, Result};
pub use slot::{SLOT_ALLOCATED, SlotHeader, SlotLayout};
pub use source::Source;
pub use traits::{ArrayIndex, Element, TryClone};
