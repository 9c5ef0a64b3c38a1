//! Runtime type descriptors
//!
//! A [`TypeDescriptor`] is the capability table of one element type: its
//! layout plus the function pointers every container operation is routed
//! through. Descriptors are built at compile time with [`DescriptorBuilder`]
//! and live in `static`s, so containers only ever hold `&'static` references
//! to them.

use crate::capability::Capability;
use std::{
    any::TypeId,
    fmt::{self, Debug, Display},
    marker::PhantomData,
};

/// Copy-constructs the value at `src` into the uninitialized payload at `dst`.
pub type CloneIntoFn = unsafe fn(src: *const u8, dst: *mut u8);

/// Overwrites the initialized payload at `dst` with the value at `src`,
/// releasing whatever the previous payload owned.
pub type AssignFn = unsafe fn(src: *const u8, dst: *mut u8);

/// Destroys the payload at `ptr` in place.
pub type DestructFn = unsafe fn(ptr: *mut u8);

/// Binary predicate over two payloads of the same type.
pub type PredicateFn = unsafe fn(lhs: *const u8, rhs: *const u8) -> bool;

/// Formats the payload at `ptr`.
pub type ShowFn = unsafe fn(ptr: *const u8, f: &mut fmt::Formatter<'_>) -> fmt::Result;

/// Converts the payload at `ptr` to an integer.
pub type ToIntFn = unsafe fn(ptr: *const u8) -> Option<i64>;

/// Encodes the payload at `ptr` as JSON.
#[cfg(feature = "serde")]
pub type ToJsonFn = unsafe fn(ptr: *const u8) -> serde_json::Result<serde_json::Value>;

/// Decodes a JSON value into the uninitialized payload at `dst`.
#[cfg(feature = "serde")]
pub type FromJsonFn = unsafe fn(value: &serde_json::Value, dst: *mut u8) -> serde_json::Result<()>;

/// Capability table of one element type.
pub struct TypeDescriptor {
    name: &'static str,
    size: usize,
    align: usize,
    needs_drop: bool,
    type_id: fn() -> TypeId,
    clone_into: CloneIntoFn,
    assign: AssignFn,
    destruct: DestructFn,
    equal: Option<PredicateFn>,
    less_than: Option<PredicateFn>,
    show: Option<ShowFn>,
    to_int: Option<ToIntFn>,
    #[cfg(feature = "serde")]
    to_json: Option<ToJsonFn>,
    #[cfg(feature = "serde")]
    from_json: Option<FromJsonFn>,
}

impl TypeDescriptor {
    /// Name of the element type, as used in formatting and errors.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Byte size of one payload.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Required alignment of one payload.
    pub const fn align(&self) -> usize {
        self.align
    }

    /// Whether destructing a payload does anything.
    pub const fn needs_drop(&self) -> bool {
        self.needs_drop
    }

    /// The Rust type this descriptor was built for.
    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Returns true if this descriptor was built for `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id() == TypeId::of::<T>()
    }

    /// Returns true if both descriptors describe the same Rust type.
    pub fn same_type(&self, other: &TypeDescriptor) -> bool {
        std::ptr::eq(self, other) || self.type_id() == other.type_id()
    }

    /// Capability query.
    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Assign | Capability::Destruct => true,
            Capability::Equal => self.equal.is_some(),
            Capability::LessThan => self.less_than.is_some(),
            Capability::Show => self.show.is_some(),
            Capability::ToInt => self.to_int.is_some(),
            #[cfg(feature = "serde")]
            Capability::Serialize => self.to_json.is_some(),
            #[cfg(feature = "serde")]
            Capability::Deserialize => self.from_json.is_some(),
        }
    }

    /// Copy-constructs `src` into `dst`.
    ///
    /// # Safety
    /// `src` must point to an initialized value of this type, `dst` to
    /// uninitialized, properly aligned storage for one payload.
    pub unsafe fn clone_into(&self, src: *const u8, dst: *mut u8) {
        unsafe { (self.clone_into)(src, dst) }
    }

    /// Assigns `src` over the initialized payload at `dst`.
    ///
    /// # Safety
    /// Both pointers must point to initialized values of this type.
    pub unsafe fn assign(&self, src: *const u8, dst: *mut u8) {
        unsafe { (self.assign)(src, dst) }
    }

    /// Destroys the payload at `ptr`.
    ///
    /// # Safety
    /// `ptr` must point to an initialized value of this type which is not
    /// used again afterwards.
    pub unsafe fn destruct(&self, ptr: *mut u8) {
        if self.needs_drop {
            unsafe { (self.destruct)(ptr) }
        }
    }

    pub(crate) fn equal_fn(&self) -> Option<PredicateFn> {
        self.equal
    }

    pub(crate) fn less_than_fn(&self) -> Option<PredicateFn> {
        self.less_than
    }

    pub(crate) fn show_fn(&self) -> Option<ShowFn> {
        self.show
    }

    pub(crate) fn to_int_fn(&self) -> Option<ToIntFn> {
        self.to_int
    }

    #[cfg(feature = "serde")]
    pub(crate) fn to_json_fn(&self) -> Option<ToJsonFn> {
        self.to_json
    }

    #[cfg(feature = "serde")]
    pub(crate) fn from_json_fn(&self) -> Option<FromJsonFn> {
        self.from_json
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.same_type(other)
    }
}

impl Eq for TypeDescriptor {}

impl Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("align", &self.align)
            .field("equal", &self.equal.is_some())
            .field("less_than", &self.less_than.is_some())
            .field("show", &self.show.is_some())
            .field("to_int", &self.to_int.is_some())
            .finish()
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Const builder for a [`TypeDescriptor`] of `T`.
///
/// Every optional capability is a separate method bounded on the Rust trait
/// that implements it, so a descriptor can only claim what `T` really does.
/// Element types must be `Send + Sync`; containers rely on it to cross
/// threads.
///
/// ```
/// use polyseq_types::{DescriptorBuilder, TypeDescriptor, Capability};
///
/// #[derive(Clone, PartialEq)]
/// struct Point(i32, i32);
///
/// static POINT: TypeDescriptor = DescriptorBuilder::<Point>::new("Point").equal().build();
///
/// assert!(POINT.supports(Capability::Equal));
/// assert!(!POINT.supports(Capability::LessThan));
/// assert_eq!(POINT.size(), 8);
/// ```
pub struct DescriptorBuilder<T> {
    descriptor: TypeDescriptor,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Clone + Send + Sync + 'static> DescriptorBuilder<T> {
    /// Starts a descriptor with the mandatory assign and destruct capabilities.
    pub const fn new(name: &'static str) -> Self {
        Self {
            descriptor: TypeDescriptor {
                name,
                size: std::mem::size_of::<T>(),
                align: std::mem::align_of::<T>(),
                needs_drop: std::mem::needs_drop::<T>(),
                type_id: TypeId::of::<T> as fn() -> TypeId,
                clone_into: erased::clone_into::<T> as CloneIntoFn,
                assign: erased::assign::<T> as AssignFn,
                destruct: erased::destruct::<T> as DestructFn,
                equal: None,
                less_than: None,
                show: None,
                to_int: None,
                #[cfg(feature = "serde")]
                to_json: None,
                #[cfg(feature = "serde")]
                from_json: None,
            },
            _marker: PhantomData,
        }
    }

    /// Finishes the descriptor.
    pub const fn build(self) -> TypeDescriptor {
        self.descriptor
    }
}

impl<T: Clone + Send + Sync + PartialEq + 'static> DescriptorBuilder<T> {
    /// Adds the equal capability through `PartialEq`.
    pub const fn equal(mut self) -> Self {
        self.descriptor.equal = Some(erased::equal::<T> as PredicateFn);
        self
    }
}

impl<T: Clone + Send + Sync + PartialOrd + 'static> DescriptorBuilder<T> {
    /// Adds the less-than capability through `PartialOrd`.
    pub const fn less_than(mut self) -> Self {
        self.descriptor.less_than = Some(erased::less_than::<T> as PredicateFn);
        self
    }
}

impl<T: Clone + Send + Sync + Display + 'static> DescriptorBuilder<T> {
    /// Adds the show capability through `Display`.
    pub const fn show(mut self) -> Self {
        self.descriptor.show = Some(erased::show::<T> as ShowFn);
        self
    }
}

impl<T: Clone + Send + Sync + num_traits::ToPrimitive + 'static> DescriptorBuilder<T> {
    /// Adds the integer conversion capability through `ToPrimitive`.
    pub const fn to_int(mut self) -> Self {
        self.descriptor.to_int = Some(erased::to_int::<T> as ToIntFn);
        self
    }
}

#[cfg(feature = "serde")]
impl<T: Clone + Send + Sync + serde::Serialize + 'static> DescriptorBuilder<T> {
    /// Adds JSON encoding through `serde::Serialize`.
    pub const fn to_json(mut self) -> Self {
        self.descriptor.to_json = Some(erased::to_json::<T> as ToJsonFn);
        self
    }
}

#[cfg(feature = "serde")]
impl<T: Clone + Send + Sync + serde::de::DeserializeOwned + 'static> DescriptorBuilder<T> {
    /// Adds JSON decoding through `serde::Deserialize`.
    pub const fn from_json(mut self) -> Self {
        self.descriptor.from_json = Some(erased::from_json::<T> as FromJsonFn);
        self
    }
}

mod erased {
    use std::fmt;

    pub(super) unsafe fn clone_into<T: Clone>(src: *const u8, dst: *mut u8) {
        unsafe {
            let value = (*src.cast::<T>()).clone();
            dst.cast::<T>().write(value);
        }
    }

    pub(super) unsafe fn assign<T: Clone>(src: *const u8, dst: *mut u8) {
        // `clone_from` drops (or reuses) whatever `dst` held before.
        unsafe { (*dst.cast::<T>()).clone_from(&*src.cast::<T>()) }
    }

    pub(super) unsafe fn destruct<T>(ptr: *mut u8) {
        unsafe { std::ptr::drop_in_place(ptr.cast::<T>()) }
    }

    pub(super) unsafe fn equal<T: PartialEq>(lhs: *const u8, rhs: *const u8) -> bool {
        unsafe { *lhs.cast::<T>() == *rhs.cast::<T>() }
    }

    pub(super) unsafe fn less_than<T: PartialOrd>(lhs: *const u8, rhs: *const u8) -> bool {
        unsafe { *lhs.cast::<T>() < *rhs.cast::<T>() }
    }

    pub(super) unsafe fn show<T: fmt::Display>(
        ptr: *const u8,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        unsafe { fmt::Display::fmt(&*ptr.cast::<T>(), f) }
    }

    pub(super) unsafe fn to_int<T: num_traits::ToPrimitive>(ptr: *const u8) -> Option<i64> {
        unsafe { (*ptr.cast::<T>()).to_i64() }
    }

    #[cfg(feature = "serde")]
    pub(super) unsafe fn to_json<T: serde::Serialize>(
        ptr: *const u8,
    ) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(unsafe { &*ptr.cast::<T>() })
    }

    #[cfg(feature = "serde")]
    pub(super) unsafe fn from_json<T: serde::de::DeserializeOwned>(
        value: &serde_json::Value,
        dst: *mut u8,
    ) -> serde_json::Result<()> {
        let decoded = <T as serde::Deserialize>::deserialize(value)?;
        unsafe { dst.cast::<T>().write(decoded) };
        Ok(())
    }
}
