//! In-place partition sort

use crate::Array;
use polyseq_types::{Capability, Result, dispatch};

impl Array {
    /// Sorts the elements in place with the element type's less-than
    /// capability. The sort is not stable.
    ///
    /// ```
    /// let mut a = polyseq::Array::from_slice(&[5i64, 3, 1, 4, 2])?;
    /// a.sort()?;
    /// assert!(a.equals(&[1i64, 2, 3, 4, 5])?);
    /// # Ok::<(), polyseq::Error>(())
    /// ```
    pub fn sort(&mut self) -> Result<()> {
        dispatch::require(self.element_type(), Capability::LessThan)?;
        if self.len() > 1 {
            self.sort_range(0, self.len() - 1)?;
        }
        Ok(())
    }

    /// Sorts the inclusive range `[left, right]`. Only the smaller partition
    /// recurses, so the stack depth stays logarithmic.
    fn sort_range(&mut self, mut left: usize, mut right: usize) -> Result<()> {
        while left < right {
            let store = self.partition(left, right)?;

            if store - left < right - store {
                if store > left {
                    self.sort_range(left, store - 1)?;
                }
                left = store + 1;
            } else {
                if store < right {
                    self.sort_range(store + 1, right)?;
                }
                if store == left {
                    break;
                }
                right = store - 1;
            }
        }
        Ok(())
    }

    /// Partitions `[left, right]` around its middle element and returns the
    /// pivot's final index.
    fn partition(&mut self, left: usize, right: usize) -> Result<usize> {
        let mid = left + (right - left) / 2;
        // pivot stays at `right` until the scan is done
        unsafe { self.swap_slots(mid, right) };

        let mut store = left;
        for i in left..right {
            if unsafe { self.less_than_at(i, right)? } {
                unsafe { self.swap_slots(i, store) };
                store += 1;
            }
        }
        unsafe { self.swap_slots(store, right) };
        Ok(store)
    }
}
