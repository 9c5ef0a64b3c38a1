//! The type-erased growable array

use crate::storage::RawStorage;
use polyseq_types::{
    ArrayIndex, Capability, Element, ElementRef, Error, OutOfBounds, Result, Source,
    TypeDescriptor, dispatch,
};

/// A contiguous, growable sequence of values of one runtime-selected type.
///
/// Every element operation goes through the element type's
/// [`TypeDescriptor`]: values are copied in with its assign capability,
/// destroyed with its destruct capability, and compared, ordered or shown
/// through the [`dispatch`] functions.
///
/// Storage grows to `len + len / 2` slots when a write needs more room and
/// shrinks back to exactly `len` slots once more than half of `len` would
/// sit unused.
///
/// ```
/// use polyseq::Array;
///
/// let mut chars = Array::of::<char>();
/// for c in ['a', 'b', 'c', 'd'] {
///     chars.push(&c)?;
/// }
/// assert!(chars.contains(&'c')?);
///
/// chars.remove_value(&'c')?;
/// assert!(!chars.contains(&'c')?);
/// assert_eq!(chars.len(), 3);
/// # Ok::<(), polyseq::Error>(())
/// ```
pub struct Array {
    element_type: &'static TypeDescriptor,
    storage: RawStorage,
    len: usize,
}

// Descriptors are only built for `Send + Sync` types and the storage is
// owned exclusively.
unsafe impl Send for Array {}
unsafe impl Sync for Array {}

#[cfg(feature = "bounds-check")]
fn out_of_bounds<T>(err: OutOfBounds) -> Result<T> {
    Err(err.into())
}

#[cfg(not(feature = "bounds-check"))]
fn out_of_bounds<T>(err: OutOfBounds) -> Result<T> {
    panic!("{err}")
}

impl Array {
    /// Type name used when formatting.
    pub const NAME: &'static str = "Array";

    /// One-line description of the container.
    pub const BRIEF: &'static str = "Sequential Container";

    /// Creates an empty array of `element_type`. Nothing is allocated.
    pub const fn new(element_type: &'static TypeDescriptor) -> Self {
        Self {
            element_type,
            storage: RawStorage::new(element_type),
            len: 0,
        }
    }

    /// Creates an empty array of `T`.
    pub fn of<T: Element>() -> Self {
        Self::new(T::descriptor())
    }

    /// Creates an array holding copies of `values`, allocating exactly as
    /// many slots as there are values.
    pub fn with_values<S: Source + ?Sized>(
        element_type: &'static TypeDescriptor,
        values: &S,
    ) -> Result<Self> {
        let mut array = Self::new(element_type);
        array.assign_from(values)?;
        Ok(array)
    }

    /// Creates an array holding copies of a typed slice.
    ///
    /// ```
    /// let a = polyseq::Array::from_slice(&[32i64, 6])?;
    /// assert_eq!(a.len(), 2);
    /// assert_eq!(a.get_as::<i64>(0)?, &32);
    /// assert_eq!(a.get_as::<i64>(1)?, &6);
    /// # Ok::<(), polyseq::Error>(())
    /// ```
    pub fn from_slice<T: Element>(values: &[T]) -> Result<Self> {
        Self::with_values(T::descriptor(), values)
    }

    pub fn element_type(&self) -> &'static TypeDescriptor {
        self.element_type
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    fn check_type(&self, value: &ElementRef<'_>) -> Result<()> {
        if self.element_type.same_type(value.descriptor()) {
            Ok(())
        } else {
            Err(Error::TypeMismatch {
                expected: self.element_type.name(),
                found: value.type_name(),
            })
        }
    }

    /// Collects the values of `source` in one traversal, failing on the
    /// first one of another type. Only collected values are written.
    fn checked_values<'s, S: Source + ?Sized>(
        &self,
        source: &'s S,
    ) -> Result<Vec<ElementRef<'s>>> {
        source
            .elements()
            .map(|value| self.check_type(&value).map(|()| value))
            .collect()
    }

    fn check_index(&self, index: i64) -> Result<usize> {
        match usize::try_from(index) {
            Ok(at) if at < self.len => Ok(at),
            _ => out_of_bounds(OutOfBounds::Index {
                index,
                len: self.len,
            }),
        }
    }

    fn grow_for(&mut self, new_len: usize) -> Result<()> {
        let capacity = self.storage.capacity();
        if new_len <= capacity {
            return Ok(());
        }
        let new_capacity = new_len
            .checked_add(new_len / 2)
            .ok_or(Error::OutOfMemory { slots: new_len })?;
        tracing::trace!(
            element_type = self.element_type.name(),
            from = capacity,
            to = new_capacity,
            "growing array storage"
        );
        self.storage.resize(new_capacity)
    }

    fn shrink_to_len(&mut self) {
        let capacity = self.storage.capacity();
        if capacity <= self.len + self.len / 2 {
            return;
        }
        tracing::trace!(
            element_type = self.element_type.name(),
            from = capacity,
            to = self.len,
            "shrinking array storage"
        );
        if let Err(err) = self.storage.resize(self.len) {
            tracing::warn!(%err, capacity, "keeping oversized array storage");
        }
    }

    /// Writes a fresh copy of `value` into slot `index`.
    ///
    /// # Safety
    /// `index < capacity`, the slot is not live and `value` has the element
    /// type.
    unsafe fn write_slot(&mut self, index: usize, value: ElementRef<'_>) {
        unsafe {
            self.storage.init_header(index, self.element_type);
            self.element_type
                .clone_into(value.as_ptr(), self.storage.payload(index));
        }
    }

    /// # Safety
    /// Slot `index` holds a live value which is not used again.
    unsafe fn destruct_slot(&mut self, index: usize) {
        unsafe {
            let header = *self.storage.header(index);
            header.ty.destruct(self.storage.payload(index));
        }
    }

    /// # Safety
    /// `index < len`.
    unsafe fn element(&self, index: usize) -> ElementRef<'_> {
        unsafe {
            let header = *self.storage.header(index);
            debug_assert!(header.is_allocated());
            ElementRef::from_raw_parts(header.ty, self.storage.payload(index))
        }
    }

    /// Element at `index` without a bounds check.
    ///
    /// # Safety
    /// `index < len`.
    pub unsafe fn get_unchecked(&self, index: usize) -> ElementRef<'_> {
        unsafe { self.element(index) }
    }

    /// Destroys every element and releases the storage.
    pub fn clear(&mut self) {
        let len = std::mem::replace(&mut self.len, 0);
        for index in 0..len {
            unsafe { self.destruct_slot(index) };
        }
        if self.storage.capacity() > 0 {
            tracing::trace!(
                element_type = self.element_type.name(),
                released = self.storage.capacity(),
                "releasing array storage"
            );
        }
        self.storage.release();
    }

    /// Replaces the contents with copies of the elements of `source`,
    /// allocating exactly one slot per element.
    ///
    /// The array is left untouched if `source` holds a value of another type.
    pub fn assign_from<S: Source + ?Sized>(&mut self, source: &S) -> Result<()> {
        let values = self.checked_values(source)?;
        self.clear();

        self.storage.resize(values.len())?;
        for value in values {
            unsafe { self.write_slot(self.len, value) };
            self.len += 1;
        }
        Ok(())
    }

    /// Appends a copy of `value`.
    pub fn push<'v>(&mut self, value: impl Into<ElementRef<'v>>) -> Result<()> {
        let value = value.into();
        self.check_type(&value)?;
        self.grow_for(self.len + 1)?;
        unsafe { self.write_slot(self.len, value) };
        self.len += 1;
        Ok(())
    }

    /// Destroys the last element.
    pub fn pop(&mut self) -> Result<()> {
        if self.len == 0 {
            return out_of_bounds(OutOfBounds::Empty);
        }
        self.len -= 1;
        unsafe { self.destruct_slot(self.len) };
        self.shrink_to_len();
        Ok(())
    }

    /// Inserts a copy of `value` before `index`; `index == len` appends.
    pub fn insert<'v>(
        &mut self,
        index: impl ArrayIndex,
        value: impl Into<ElementRef<'v>>,
    ) -> Result<()> {
        let value = value.into();
        self.check_type(&value)?;
        let index = index.to_index()?;
        let at = match usize::try_from(index) {
            Ok(at) if at <= self.len => at,
            _ => {
                return out_of_bounds(OutOfBounds::Index {
                    index,
                    len: self.len,
                });
            }
        };

        self.grow_for(self.len + 1)?;
        unsafe {
            self.write_slot(self.len, value);
            self.storage.rotate_right(at, self.len);
        }
        self.len += 1;
        Ok(())
    }

    /// Removes the element at `index`, shifting the tail left.
    pub fn remove(&mut self, index: impl ArrayIndex) -> Result<()> {
        let at = self.check_index(index.to_index()?)?;
        self.remove_at(at);
        Ok(())
    }

    fn remove_at(&mut self, at: usize) {
        let last = self.len - 1;
        unsafe { self.storage.rotate_left(at, last) };
        self.len = last;
        unsafe { self.destruct_slot(last) };
        self.shrink_to_len();
    }

    /// Removes the first element equal to `value`.
    pub fn remove_value<'v>(&mut self, value: impl Into<ElementRef<'v>>) -> Result<()> {
        let value = value.into();
        match self.position(value)? {
            Some(at) => {
                self.remove_at(at);
                Ok(())
            }
            None => Err(Error::ValueNotFound(value.to_string())),
        }
    }

    /// Index of the first element equal to `value`.
    pub fn position<'v>(&self, value: impl Into<ElementRef<'v>>) -> Result<Option<usize>> {
        let value = value.into();
        dispatch::require(self.element_type, Capability::Equal)?;
        for (index, element) in self.iter().enumerate() {
            if dispatch::equal(element, value)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Returns true if an element equal to `value` is present.
    pub fn contains<'v>(&self, value: impl Into<ElementRef<'v>>) -> Result<bool> {
        Ok(self.position(value)?.is_some())
    }

    /// Appends copies of every element of `source`, growing at most once.
    pub fn concat<S: Source + ?Sized>(&mut self, source: &S) -> Result<()> {
        let values = self.checked_values(source)?;
        let new_len = self
            .len
            .checked_add(values.len())
            .ok_or(Error::OutOfMemory { slots: usize::MAX })?;
        self.grow_for(new_len)?;
        for value in values {
            unsafe { self.write_slot(self.len, value) };
            self.len += 1;
        }
        Ok(())
    }

    /// Element at `index`.
    pub fn get(&self, index: impl ArrayIndex) -> Result<ElementRef<'_>> {
        let at = self.check_index(index.to_index()?)?;
        Ok(unsafe { self.element(at) })
    }

    /// Typed element at `index`.
    pub fn get_as<T: Element>(&self, index: impl ArrayIndex) -> Result<&T> {
        let element = self.get(index)?;
        element.downcast_ref::<T>().ok_or_else(|| Error::TypeMismatch {
            expected: self.element_type.name(),
            found: T::descriptor().name(),
        })
    }

    /// Mutable typed element at `index`.
    pub fn get_mut_as<T: Element>(&mut self, index: impl ArrayIndex) -> Result<&mut T> {
        let at = self.check_index(index.to_index()?)?;
        if !self.element_type.is::<T>() {
            return Err(Error::TypeMismatch {
                expected: self.element_type.name(),
                found: T::descriptor().name(),
            });
        }
        Ok(unsafe { &mut *self.storage.payload(at).cast::<T>() })
    }

    /// Assigns a copy of `value` over the element at `index`. The previous
    /// value's resources are released by the type's assign capability.
    ///
    /// # Panics
    /// Assignment cannot report allocation failure. For nested arrays the
    /// deep copy panics if it runs out of memory; copy such values with
    /// [`TryClone`](polyseq_types::TryClone) first to handle that case.
    pub fn set<'v>(
        &mut self,
        index: impl ArrayIndex,
        value: impl Into<ElementRef<'v>>,
    ) -> Result<()> {
        let value = value.into();
        let at = self.check_index(index.to_index()?)?;
        self.check_type(&value)?;
        unsafe {
            self.element_type
                .assign(value.as_ptr(), self.storage.payload(at));
        }
        Ok(())
    }

    /// Exchanges the elements at `i` and `j`.
    pub fn swap(&mut self, i: impl ArrayIndex, j: impl ArrayIndex) -> Result<()> {
        let i = self.check_index(i.to_index()?)?;
        let j = self.check_index(j.to_index()?)?;
        unsafe { self.storage.swap(i, j) };
        Ok(())
    }

    /// Reverses the order of the elements in place.
    pub fn reverse(&mut self) {
        let len = self.len;
        for i in 0..len / 2 {
            unsafe { self.storage.swap(i, len - 1 - i) };
        }
    }

    /// Element-wise equality with `other`, fetching its elements by index.
    pub fn equals<S: Source + ?Sized>(&self, other: &S) -> Result<bool> {
        if self.len != other.source_len() {
            return Ok(false);
        }
        for (index, element) in self.iter().enumerate() {
            match other.element_at(index) {
                Some(theirs) if dispatch::equal(element, theirs)? => {}
                _ => return Ok(false),
            }
        }
        Ok(true)
    }

    /// Creates a new array of the same type holding copies of every element.
    ///
    /// The depth of the copy is the element type's: nested arrays are
    /// copied recursively.
    pub fn copy(&self) -> Result<Self> {
        let mut copy = Self::new(self.element_type);
        copy.concat(self)?;
        Ok(copy)
    }

    /// Grows the storage to hold at least `slots` slots, without slack.
    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    pub(crate) fn reserve_exact(&mut self, slots: usize) -> Result<()> {
        if slots > self.storage.capacity() {
            self.storage.resize(slots)?;
        }
        Ok(())
    }

    /// Appends an element constructed in place by `init`.
    ///
    /// # Safety
    /// On `Ok`, `init` must have initialized the payload it was given with a
    /// value of the element type. On `Err` it must have left it untouched.
    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    pub(crate) unsafe fn emplace(
        &mut self,
        init: impl FnOnce(*mut u8) -> Result<()>,
    ) -> Result<()> {
        self.grow_for(self.len + 1)?;
        unsafe {
            self.storage.init_header(self.len, self.element_type);
            init(self.storage.payload(self.len))?;
        }
        self.len += 1;
        Ok(())
    }

    pub(crate) unsafe fn less_than_at(&self, i: usize, j: usize) -> Result<bool> {
        unsafe { dispatch::less_than(self.element(i), self.element(j)) }
    }

    pub(crate) unsafe fn swap_slots(&mut self, i: usize, j: usize) {
        unsafe { self.storage.swap(i, j) }
    }
}

impl Drop for Array {
    fn drop(&mut self) {
        self.clear();
    }
}
