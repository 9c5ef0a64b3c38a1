//! Capability dispatch
//!
//! Every optional capability is resolved here from the value's own
//! descriptor. Containers never call per-type code directly; they hand the
//! dispatcher erased handles and get back the result or a
//! [`Error::MissingCapability`].

use crate::{Capability, ElementRef, Error, Result, TypeDescriptor};
use std::fmt;

/// Fails with `MissingCapability` unless `descriptor` supports `capability`.
pub fn require(descriptor: &TypeDescriptor, capability: Capability) -> Result<()> {
    if descriptor.supports(capability) {
        Ok(())
    } else {
        Err(missing(descriptor, capability))
    }
}

fn missing(descriptor: &TypeDescriptor, capability: Capability) -> Error {
    Error::MissingCapability {
        type_name: descriptor.name(),
        capability,
    }
}

/// Equality of two values.
///
/// Values of different types are never equal.
pub fn equal(lhs: ElementRef<'_>, rhs: ElementRef<'_>) -> Result<bool> {
    let descriptor = lhs.descriptor();
    let eq = descriptor
        .equal_fn()
        .ok_or_else(|| missing(descriptor, Capability::Equal))?;
    if !descriptor.same_type(rhs.descriptor()) {
        return Ok(false);
    }
    Ok(unsafe { eq(lhs.as_ptr(), rhs.as_ptr()) })
}

/// Strict ordering of two values of the same type.
pub fn less_than(lhs: ElementRef<'_>, rhs: ElementRef<'_>) -> Result<bool> {
    let descriptor = lhs.descriptor();
    let lt = descriptor
        .less_than_fn()
        .ok_or_else(|| missing(descriptor, Capability::LessThan))?;
    if !descriptor.same_type(rhs.descriptor()) {
        return Err(Error::TypeMismatch {
            expected: descriptor.name(),
            found: rhs.type_name(),
        });
    }
    Ok(unsafe { lt(lhs.as_ptr(), rhs.as_ptr()) })
}

/// Formats a value through its show capability.
///
/// Types without one print as `<'Name' At 0x...>`.
pub fn show(value: ElementRef<'_>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value.descriptor().show_fn() {
        Some(show) => unsafe { show(value.as_ptr(), f) },
        None => write!(f, "<'{}' At {:p}>", value.type_name(), value.as_ptr()),
    }
}

/// Converts a value to an integer through its to-int capability.
pub fn to_int(value: ElementRef<'_>) -> Result<i64> {
    let descriptor = value.descriptor();
    let to_int = descriptor
        .to_int_fn()
        .ok_or_else(|| missing(descriptor, Capability::ToInt))?;
    unsafe { to_int(value.as_ptr()) }.ok_or_else(|| Error::InvalidIndex(value.to_string()))
}

/// Encodes a value as JSON.
#[cfg(feature = "serde")]
pub fn to_json(value: ElementRef<'_>) -> Result<serde_json::Value> {
    let descriptor = value.descriptor();
    let to_json = descriptor
        .to_json_fn()
        .ok_or_else(|| missing(descriptor, Capability::Serialize))?;
    Ok(unsafe { to_json(value.as_ptr()) }?)
}

/// Decodes a JSON value into uninitialized storage.
///
/// # Safety
/// `dst` must be uninitialized, properly aligned storage for one payload of
/// `descriptor`'s type. It is initialized only when `Ok` is returned.
#[cfg(feature = "serde")]
pub unsafe fn from_json(
    descriptor: &TypeDescriptor,
    value: &serde_json::Value,
    dst: *mut u8,
) -> Result<()> {
    let from_json = descriptor
        .from_json_fn()
        .ok_or_else(|| missing(descriptor, Capability::Deserialize))?;
    Ok(unsafe { from_json(value, dst) }?)
}
