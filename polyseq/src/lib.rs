//! # polyseq
//!
//! A contiguous, growable array whose element type is picked at runtime.
//!
//! An [`Array`] stores values of one type described by a
//! [`TypeDescriptor`]. It owns a single block of fixed-stride slots, each a
//! small header recording the occupying type followed by the value's bytes,
//! and routes every element operation (copy, destroy, equality, ordering,
//! formatting) through the descriptor's capability table.
//!
//! ```
//! use polyseq::{Array, Error, builtin::INT};
//!
//! let mut a = Array::with_values(&INT, &[32i64, 6])?;
//! assert_eq!(a.len(), 2);
//! assert_eq!(a.get_as::<i64>(0)?, &32);
//!
//! a.concat(&[5i64, 1])?;
//! a.sort()?;
//! assert!(a.equals(&[1i64, 5, 6, 32])?);
//! println!("{a}");
//!
//! assert!(matches!(a.remove_value(&7i64), Err(Error::ValueNotFound(_))));
//! # #[cfg(feature = "bounds-check")]
//! assert!(a.get(4).unwrap_err().is_out_of_bounds());
//! # Ok::<(), Error>(())
//! ```
//!
//! # Invalidation
//!
//! [`ElementRef`]s and [`Iter`]s borrow the array, so the compiler rejects
//! any mutation while they are alive. A [`Cursor`] is a plain position: it
//! may outlive a mutation, in which case [`Array::at`] reports it as out of
//! bounds or returns whichever element now sits there.
//!
//! # Features
//!
//! - `bounds-check` (default): out-of-range indices return
//!   [`Error::IndexOutOfBounds`]. Without it they panic.
//! - `logging`: [`logger::init_logging`] installs a `tracing-subscriber`
//!   subscriber on stderr.
//! - `serde`: `Serialize` for [`Array`] plus [`Array::to_json`] and
//!   [`Array::from_json`].

mod array;
mod element;
mod iter;
#[cfg(feature = "serde")]
mod json;
#[cfg(feature = "logging")]
pub mod logger;
mod show;
mod sort;
mod storage;

pub use array::Array;
pub use element::ARRAY;
pub use iter::{Cursor, Iter};

pub use polyseq_types::{
    ArrayIndex, Capability, DescriptorBuilder, Element, ElementRef, Error, OutOfBounds, Result,
    Source, TryClone, TypeDescriptor, builtin, dispatch,
};
