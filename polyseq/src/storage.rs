//! Raw slot storage
//!
//! One contiguous, exclusively owned block of `capacity` slots. The storage
//! knows slot geometry only; which slots hold live values is tracked by the
//! owning [`Array`](crate::Array).

use polyseq_types::{Error, Result, SlotHeader, SlotLayout, TypeDescriptor};
use std::{
    alloc::{self, Layout},
    mem::MaybeUninit,
    ptr::{self, NonNull},
};

#[derive(Debug)]
pub(crate) struct RawStorage {
    data: Option<NonNull<u8>>,
    capacity: usize,
    layout: SlotLayout,
}

impl RawStorage {
    pub(crate) const fn new(element_type: &TypeDescriptor) -> Self {
        Self {
            data: None,
            capacity: 0,
            layout: SlotLayout::for_type(element_type),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    fn block_layout(&self, slots: usize) -> Result<Layout> {
        slots
            .checked_mul(self.layout.stride)
            .and_then(|size| Layout::from_size_align(size, self.layout.align).ok())
            .ok_or(Error::OutOfMemory { slots })
    }

    /// Reallocates to exactly `slots` slots, preserving the bytes of the
    /// first `min(capacity, slots)` slots. On failure the block is untouched.
    pub(crate) fn resize(&mut self, slots: usize) -> Result<()> {
        if slots == self.capacity {
            return Ok(());
        }
        if slots == 0 {
            self.release();
            return Ok(());
        }

        let new_layout = self.block_layout(slots)?;
        let raw = match self.data {
            None => unsafe { alloc::alloc(new_layout) },
            Some(old) => {
                let old_layout = self.block_layout(self.capacity)?;
                unsafe { alloc::realloc(old.as_ptr(), old_layout, new_layout.size()) }
            }
        };

        let Some(data) = NonNull::new(raw) else {
            tracing::error!(slots, stride = self.layout.stride, "slot allocation failed");
            return Err(Error::OutOfMemory { slots });
        };
        self.data = Some(data);
        self.capacity = slots;
        Ok(())
    }

    /// Frees the block. Slot contents are not destructed.
    pub(crate) fn release(&mut self) {
        if let Some(data) = self.data.take() {
            if let Ok(layout) = self.block_layout(self.capacity) {
                unsafe { alloc::dealloc(data.as_ptr(), layout) };
            }
        }
        self.capacity = 0;
    }

    fn base(&self) -> *mut u8 {
        self.data.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    /// # Safety
    /// `index < capacity`.
    pub(crate) unsafe fn slot(&self, index: usize) -> *mut u8 {
        debug_assert!(index < self.capacity);
        unsafe { self.base().add(index * self.layout.stride) }
    }

    /// # Safety
    /// `index < capacity`.
    pub(crate) unsafe fn header(&self, index: usize) -> *mut SlotHeader {
        unsafe { self.slot(index).cast() }
    }

    /// # Safety
    /// `index < capacity`.
    pub(crate) unsafe fn payload(&self, index: usize) -> *mut u8 {
        unsafe { self.slot(index).add(self.layout.payload_offset) }
    }

    /// Clears the slot and writes a fresh header for `ty`.
    ///
    /// # Safety
    /// `index < capacity` and the slot holds no live value.
    pub(crate) unsafe fn init_header(&mut self, index: usize, ty: &'static TypeDescriptor) {
        unsafe {
            ptr::write_bytes(self.slot(index), 0, self.layout.stride);
            self.header(index).write(SlotHeader::allocated(ty));
        }
    }

    /// Exchanges two whole slots, header and payload.
    ///
    /// # Safety
    /// Both indices `< capacity`.
    pub(crate) unsafe fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        unsafe {
            ptr::swap_nonoverlapping(
                self.slot(i).cast::<MaybeUninit<u8>>(),
                self.slot(j).cast::<MaybeUninit<u8>>(),
                self.layout.stride,
            );
        }
    }

    /// Moves slot `last` to `first`, shifting `[first, last)` one slot right.
    ///
    /// # Safety
    /// `first <= last < capacity`.
    pub(crate) unsafe fn rotate_right(&mut self, first: usize, last: usize) {
        for index in (first..last).rev() {
            unsafe { self.swap(index, index + 1) };
        }
    }

    /// Moves slot `first` to `last`, shifting `(first, last]` one slot left.
    ///
    /// # Safety
    /// `first <= last < capacity`.
    pub(crate) unsafe fn rotate_left(&mut self, first: usize, last: usize) {
        for index in first..last {
            unsafe { self.swap(index, index + 1) };
        }
    }
}

impl Drop for RawStorage {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyseq_types::Element;

    #[test]
    fn test_resize_preserves_prefix() {
        let mut storage = RawStorage::new(u64::descriptor());
        storage.resize(2).unwrap();
        unsafe {
            storage.payload(0).cast::<u64>().write(11);
            storage.payload(1).cast::<u64>().write(22);
        }

        storage.resize(8).unwrap();
        assert_eq!(storage.capacity(), 8);
        unsafe {
            assert_eq!(storage.payload(0).cast::<u64>().read(), 11);
            assert_eq!(storage.payload(1).cast::<u64>().read(), 22);
        }

        storage.resize(1).unwrap();
        unsafe { assert_eq!(storage.payload(0).cast::<u64>().read(), 11) };

        storage.resize(0).unwrap();
        assert_eq!(storage.capacity(), 0);
        assert!(storage.data.is_none());
    }

    #[test]
    fn test_rotate() {
        let mut storage = RawStorage::new(u64::descriptor());
        storage.resize(4).unwrap();
        for i in 0..4 {
            unsafe { storage.payload(i).cast::<u64>().write(i as u64) };
        }

        let read = |s: &RawStorage| -> Vec<u64> {
            (0..4)
                .map(|i| unsafe { s.payload(i).cast::<u64>().read() })
                .collect()
        };

        unsafe { storage.rotate_right(1, 3) };
        assert_eq!(read(&storage), vec![0, 3, 1, 2]);

        unsafe { storage.rotate_left(1, 3) };
        assert_eq!(read(&storage), vec![0, 1, 2, 3]);

        unsafe { storage.swap(0, 3) };
        assert_eq!(read(&storage), vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_rotate_moves_headers() {
        let mut storage = RawStorage::new(String::descriptor());
        storage.resize(3).unwrap();
        for i in 0..3 {
            unsafe {
                storage.init_header(i, String::descriptor());
                storage.payload(i).cast::<String>().write(i.to_string());
            }
        }

        unsafe { storage.rotate_right(0, 2) };
        unsafe { storage.rotate_right(0, 0) };
        let shown: Vec<String> = (0..3)
            .map(|i| unsafe {
                assert!((*storage.header(i)).is_allocated());
                (*storage.payload(i).cast::<String>()).clone()
            })
            .collect();
        assert_eq!(shown, vec!["2", "0", "1"]);

        for i in 0..3 {
            unsafe { storage.payload(i).cast::<String>().drop_in_place() };
        }
    }

    #[test]
    fn test_stride_overflow_is_out_of_memory() {
        let mut storage = RawStorage::new(u64::descriptor());
        assert!(matches!(
            storage.resize(usize::MAX),
            Err(Error::OutOfMemory { slots: usize::MAX })
        ));
        assert_eq!(storage.capacity(), 0);
    }
}
