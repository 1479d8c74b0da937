//! Heap capacity block and the three dynamically allocated element stores.
//!
//! A [`DynBlock`] owns raw heap storage the way the fixed block owns its
//! inline array: allocation and release only, never element lifetimes. The
//! stores mirror their fixed counterparts and add [`reallocation`]
//! (`DynRaw`), which relocates the live extent into a fresh buffer placed
//! at the location's gap split for the new capacity.
//!
//! [`reallocation`]: DynRaw::try_reallocate

use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use std::fmt;
use std::mem;
use std::ptr::{self, NonNull};
use std::slice;

use crate::raw::{self, Back, Front, Middle, RawSeq};

/// Error returned when the system refuses an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError;

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "memory allocation failed")
    }
}

impl std::error::Error for AllocError {}

// =============================================================================
// DynBlock
// =============================================================================

/// A uniquely owned heap buffer of element slots.
///
/// The block allocates and frees raw storage only; it never constructs or
/// drops elements. An empty block holds a dangling pointer and no
/// allocation. Zero-sized element types never allocate.
pub struct DynBlock<T> {
    ptr: NonNull<T>,
    cap: usize,
}

impl<T> DynBlock<T> {
    /// Creates a block with no buffer.
    #[inline]
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
        }
    }

    /// Allocates a block of exactly `cap` slots.
    pub fn try_with_capacity(cap: usize) -> Result<Self, AllocError> {
        if cap == 0 || mem::size_of::<T>() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap,
            });
        }
        let layout = Layout::array::<T>(cap).map_err(|_| AllocError)?;
        // SAFETY: layout has non-zero size (cap > 0, T is not zero-sized)
        let ptr = unsafe { alloc(layout) } as *mut T;
        match NonNull::new(ptr) {
            Some(ptr) => Ok(Self { ptr, cap }),
            None => Err(AllocError),
        }
    }

    /// Allocates a block of exactly `cap` slots, aborting on failure.
    pub fn with_capacity(cap: usize) -> Self {
        match Self::try_with_capacity(cap) {
            Ok(block) => block,
            Err(_) => match Layout::array::<T>(cap) {
                Ok(layout) => handle_alloc_error(layout),
                Err(_) => raw::capacity_overflow(),
            },
        }
    }

    /// Number of slots in the buffer.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// First slot of the buffer.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Mutable pointer to the first slot of the buffer.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Replaces the buffer with one of `new_cap` slots, relocating the live
    /// extent `[data_at, data_at + len)` to slot `offset` of the new
    /// buffer. The old buffer is released afterwards; the relocated
    /// elements are never dropped or duplicated.
    ///
    /// # Safety
    ///
    /// The source range must hold initialized elements inside this block,
    /// and `offset + len <= new_cap`.
    pub unsafe fn try_reallocate(
        &mut self,
        new_cap: usize,
        data_at: usize,
        len: usize,
        offset: usize,
    ) -> Result<(), AllocError> {
        debug_assert!(offset + len <= new_cap);
        let mut next = Self::try_with_capacity(new_cap)?;
        unsafe {
            ptr::copy_nonoverlapping(
                self.ptr.as_ptr().add(data_at),
                next.ptr.as_ptr().add(offset),
                len,
            );
        }
        mem::swap(self, &mut next);
        // the old buffer is released here when `next` drops
        Ok(())
    }
}

impl<T> Default for DynBlock<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for DynBlock<T> {
    fn drop(&mut self) {
        if self.cap != 0 && mem::size_of::<T>() != 0 {
            // SAFETY: matches the layout used at allocation time; the
            // multiply cannot overflow because the allocation succeeded
            unsafe {
                let layout = Layout::from_size_align_unchecked(
                    mem::size_of::<T>() * self.cap,
                    mem::align_of::<T>(),
                );
                dealloc(self.ptr.as_ptr() as *mut u8, layout);
            }
        }
    }
}

// SAFETY: the block uniquely owns its buffer
unsafe impl<T: Send> Send for DynBlock<T> {}
unsafe impl<T: Sync> Sync for DynBlock<T> {}

// =============================================================================
// DynRaw
// =============================================================================

/// A heap-backed store whose capacity can change at runtime.
pub trait DynRaw: RawSeq + Default {
    /// Allocates an empty store of exactly `cap` slots.
    fn try_with_capacity(cap: usize) -> Result<Self, AllocError>
    where
        Self: Sized;

    /// Reallocates to exactly `new_cap` slots, relocating the live extent
    /// to this location's placement for the new capacity. `new_cap` must
    /// be at least `len()`.
    fn try_reallocate(&mut self, new_cap: usize) -> Result<(), AllocError>;
}

// =============================================================================
// DynFront
// =============================================================================

/// Heap store with the live extent packed at the low end.
pub struct DynFront<T> {
    block: DynBlock<T>,
    len: usize,
}

impl<T> DynFront<T> {
    /// Creates an empty store with no buffer.
    #[inline]
    pub const fn new() -> Self {
        Self {
            block: DynBlock::new(),
            len: 0,
        }
    }
}

impl<T> Default for DynFront<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RawSeq for DynFront<T> {
    type Item = T;
    type Location = Front;

    const FIXED_CAPACITY: Option<usize> = None;
    const MAX_LEN: usize = usize::MAX;

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.block.capacity()
    }

    #[inline]
    fn front_gap(&self) -> usize {
        0
    }

    #[inline]
    fn back_gap(&self) -> usize {
        self.capacity() - self.len
    }

    #[inline]
    fn as_ptr(&self) -> *const T {
        self.block.as_ptr()
    }

    #[inline]
    fn as_mut_ptr(&mut self) -> *mut T {
        self.block.as_mut_ptr()
    }

    unsafe fn push_back(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        unsafe { self.block.as_mut_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    unsafe fn push_front(&mut self, value: T) {
        unsafe { self.insert(0, value) };
    }

    unsafe fn insert(&mut self, at: usize, value: T) {
        debug_assert!(at <= self.len && self.len < self.capacity());
        let base = self.block.as_mut_ptr();
        unsafe {
            ptr::copy(base.add(at), base.add(at + 1), self.len - at);
            base.add(at).write(value);
        }
        self.len += 1;
    }

    unsafe fn remove(&mut self, at: usize) -> T {
        debug_assert!(at < self.len);
        let base = self.block.as_mut_ptr();
        let value = unsafe {
            let value = base.add(at).read();
            ptr::copy(base.add(at + 1), base.add(at), self.len - at - 1);
            value
        };
        self.len -= 1;
        value
    }

    unsafe fn remove_range(&mut self, start: usize, end: usize) {
        debug_assert!(start <= end && end <= self.len);
        let len = self.len;
        let base = self.block.as_mut_ptr();
        self.len = start;
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(start), end - start));
            ptr::copy(base.add(end), base.add(start), len - end);
        }
        self.len = len - (end - start);
    }

    unsafe fn pop_back(&mut self) -> T {
        debug_assert!(self.len > 0);
        self.len -= 1;
        unsafe { self.block.as_mut_ptr().add(self.len).read() }
    }

    unsafe fn pop_front(&mut self) -> T {
        unsafe { self.remove(0) }
    }

    fn clear(&mut self) {
        let len = self.len;
        self.len = 0;
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.block.as_mut_ptr(), len));
        }
    }

    unsafe fn fill_from_slice(&mut self, src: &[T])
    where
        T: Clone,
    {
        debug_assert!(self.len == 0 && src.len() <= self.capacity());
        unsafe { raw::clone_into(src, self.block.as_mut_ptr()) };
        self.len = src.len();
    }

    unsafe fn extend_back(&mut self, extra: usize, value: &T)
    where
        T: Clone,
    {
        debug_assert!(self.len + extra <= self.capacity());
        unsafe { raw::clone_fill(self.block.as_mut_ptr().add(self.len), extra, value) };
        self.len += extra;
    }

    unsafe fn relocate_in(&mut self, src: *const T, len: usize) {
        debug_assert!(self.len == 0 && len <= self.capacity());
        unsafe { ptr::copy_nonoverlapping(src, self.block.as_mut_ptr(), len) };
        self.len = len;
    }

    unsafe fn forget_all(&mut self) {
        self.len = 0;
    }
}

impl<T> DynRaw for DynFront<T> {
    fn try_with_capacity(cap: usize) -> Result<Self, AllocError> {
        Ok(Self {
            block: DynBlock::try_with_capacity(cap)?,
            len: 0,
        })
    }

    fn try_reallocate(&mut self, new_cap: usize) -> Result<(), AllocError> {
        debug_assert!(new_cap >= self.len);
        unsafe { self.block.try_reallocate(new_cap, 0, self.len, 0) }
    }
}

impl<T: Clone> Clone for DynFront<T> {
    fn clone(&self) -> Self {
        // a copy gets a buffer of exactly the source's length
        let mut copy = Self {
            block: DynBlock::with_capacity(self.len),
            len: 0,
        };
        unsafe {
            let extent = slice::from_raw_parts(self.as_ptr(), self.len);
            raw::clone_into(extent, copy.block.as_mut_ptr());
        }
        copy.len = self.len;
        copy
    }
}

impl<T> Drop for DynFront<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

// =============================================================================
// DynBack
// =============================================================================

/// Heap store with the live extent packed at the high end.
pub struct DynBack<T> {
    block: DynBlock<T>,
    len: usize,
}

impl<T> DynBack<T> {
    /// Creates an empty store with no buffer.
    #[inline]
    pub const fn new() -> Self {
        Self {
            block: DynBlock::new(),
            len: 0,
        }
    }

    /// First slot of the live extent.
    #[inline]
    fn data(&mut self) -> *mut T {
        let gap = self.block.capacity() - self.len;
        unsafe { self.block.as_mut_ptr().add(gap) }
    }
}

impl<T> Default for DynBack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RawSeq for DynBack<T> {
    type Item = T;
    type Location = Back;

    const FIXED_CAPACITY: Option<usize> = None;
    const MAX_LEN: usize = usize::MAX;

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.block.capacity()
    }

    #[inline]
    fn front_gap(&self) -> usize {
        self.capacity() - self.len
    }

    #[inline]
    fn back_gap(&self) -> usize {
        0
    }

    #[inline]
    fn as_ptr(&self) -> *const T {
        let gap = self.block.capacity() - self.len;
        unsafe { self.block.as_ptr().add(gap) }
    }

    #[inline]
    fn as_mut_ptr(&mut self) -> *mut T {
        self.data()
    }

    unsafe fn push_back(&mut self, value: T) {
        let len = self.len;
        unsafe { self.insert(len, value) };
    }

    unsafe fn push_front(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        unsafe { self.data().sub(1).write(value) };
        self.len += 1;
    }

    unsafe fn insert(&mut self, at: usize, value: T) {
        debug_assert!(at <= self.len && self.len < self.capacity());
        let begin = self.data();
        unsafe {
            ptr::copy(begin, begin.sub(1), at);
            begin.add(at).sub(1).write(value);
        }
        self.len += 1;
    }

    unsafe fn remove(&mut self, at: usize) -> T {
        debug_assert!(at < self.len);
        let begin = self.data();
        let value = unsafe {
            let value = begin.add(at).read();
            ptr::copy(begin, begin.add(1), at);
            value
        };
        self.len -= 1;
        value
    }

    unsafe fn remove_range(&mut self, start: usize, end: usize) {
        debug_assert!(start <= end && end <= self.len);
        let len = self.len;
        let count = end - start;
        let begin = self.data();
        self.len = len - end;
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(begin.add(start), count));
            ptr::copy(begin, begin.add(count), start);
        }
        self.len = len - count;
    }

    unsafe fn pop_back(&mut self) -> T {
        let len = self.len;
        unsafe { self.remove(len - 1) }
    }

    unsafe fn pop_front(&mut self) -> T {
        debug_assert!(self.len > 0);
        let value = unsafe { self.data().read() };
        self.len -= 1;
        value
    }

    fn clear(&mut self) {
        let len = self.len;
        let begin = self.data();
        self.len = 0;
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(begin, len));
        }
    }

    unsafe fn fill_from_slice(&mut self, src: &[T])
    where
        T: Clone,
    {
        debug_assert!(self.len == 0 && src.len() <= self.capacity());
        unsafe {
            let dst = self.data().sub(src.len());
            raw::clone_into(src, dst);
        }
        self.len = src.len();
    }

    unsafe fn extend_back(&mut self, extra: usize, value: &T)
    where
        T: Clone,
    {
        debug_assert!(self.len + extra <= self.capacity());
        let len = self.len;
        unsafe { raw::extend_back_anchored(self.data(), len, extra, value) };
        self.len = len + extra;
    }

    unsafe fn relocate_in(&mut self, src: *const T, len: usize) {
        debug_assert!(self.len == 0 && len <= self.capacity());
        unsafe {
            let dst = self.data().sub(len);
            ptr::copy_nonoverlapping(src, dst, len);
        }
        self.len = len;
    }

    unsafe fn forget_all(&mut self) {
        self.len = 0;
    }
}

impl<T> DynRaw for DynBack<T> {
    fn try_with_capacity(cap: usize) -> Result<Self, AllocError> {
        Ok(Self {
            block: DynBlock::try_with_capacity(cap)?,
            len: 0,
        })
    }

    fn try_reallocate(&mut self, new_cap: usize) -> Result<(), AllocError> {
        debug_assert!(new_cap >= self.len);
        let data_at = self.capacity() - self.len;
        let offset = new_cap - self.len;
        unsafe { self.block.try_reallocate(new_cap, data_at, self.len, offset) }
    }
}

impl<T: Clone> Clone for DynBack<T> {
    fn clone(&self) -> Self {
        let mut copy = Self {
            block: DynBlock::with_capacity(self.len),
            len: 0,
        };
        unsafe {
            let extent = slice::from_raw_parts(self.as_ptr(), self.len);
            raw::clone_into(extent, copy.block.as_mut_ptr());
        }
        copy.len = self.len;
        copy
    }
}

impl<T> Drop for DynBack<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

// =============================================================================
// DynMiddle
// =============================================================================

/// Heap store with the live extent floating between two gaps.
pub struct DynMiddle<T> {
    block: DynBlock<T>,
    front_gap: usize,
    back_gap: usize,
}

impl<T> DynMiddle<T> {
    /// Creates an empty store with no buffer.
    #[inline]
    pub const fn new() -> Self {
        Self {
            block: DynBlock::new(),
            front_gap: 0,
            back_gap: 0,
        }
    }

    /// First slot of the live extent.
    #[inline]
    fn data(&mut self) -> *mut T {
        let front = self.front_gap;
        unsafe { self.block.as_mut_ptr().add(front) }
    }

    /// Re-centers toward the low end to open space at the back.
    fn recenter_for_back(&mut self) {
        debug_assert!(self.back_gap == 0 && self.front_gap > 0);
        let keep = self.front_gap / 2;
        let shift = self.front_gap - keep;
        let len = self.len();
        unsafe {
            let base = self.block.as_mut_ptr();
            ptr::copy(base.add(self.front_gap), base.add(keep), len);
        }
        self.front_gap = keep;
        self.back_gap += shift;
    }

    /// Re-centers toward the high end to open space at the front.
    fn recenter_for_front(&mut self) {
        debug_assert!(self.front_gap == 0 && self.back_gap > 0);
        let keep = self.back_gap / 2;
        let shift = self.back_gap - keep;
        let len = self.len();
        unsafe {
            let base = self.block.as_mut_ptr();
            ptr::copy(base, base.add(shift), len);
        }
        self.front_gap = shift;
        self.back_gap = keep;
    }
}

impl<T> Default for DynMiddle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RawSeq for DynMiddle<T> {
    type Item = T;
    type Location = Middle;

    const FIXED_CAPACITY: Option<usize> = None;
    const MAX_LEN: usize = usize::MAX;

    #[inline]
    fn len(&self) -> usize {
        self.capacity() - self.front_gap - self.back_gap
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.block.capacity()
    }

    #[inline]
    fn front_gap(&self) -> usize {
        self.front_gap
    }

    #[inline]
    fn back_gap(&self) -> usize {
        self.back_gap
    }

    #[inline]
    fn as_ptr(&self) -> *const T {
        unsafe { self.block.as_ptr().add(self.front_gap) }
    }

    #[inline]
    fn as_mut_ptr(&mut self) -> *mut T {
        self.data()
    }

    unsafe fn push_back(&mut self, value: T) {
        debug_assert!(self.len() < self.capacity());
        if self.back_gap == 0 {
            self.recenter_for_back();
        }
        let len = self.len();
        unsafe { self.block.as_mut_ptr().add(self.front_gap + len).write(value) };
        self.back_gap -= 1;
    }

    unsafe fn push_front(&mut self, value: T) {
        debug_assert!(self.len() < self.capacity());
        if self.front_gap == 0 {
            self.recenter_for_front();
        }
        unsafe { self.block.as_mut_ptr().add(self.front_gap - 1).write(value) };
        self.front_gap -= 1;
    }

    unsafe fn insert(&mut self, at: usize, value: T) {
        debug_assert!(at <= self.len() && self.len() < self.capacity());
        let len = self.len();
        if len - at <= at {
            // position is nearer the end: open the slot from the back gap
            if self.back_gap == 0 {
                self.recenter_for_back();
            }
            unsafe {
                let begin = self.data();
                ptr::copy(begin.add(at), begin.add(at + 1), len - at);
                begin.add(at).write(value);
            }
            self.back_gap -= 1;
        } else {
            if self.front_gap == 0 {
                self.recenter_for_front();
            }
            unsafe {
                let begin = self.data();
                ptr::copy(begin, begin.sub(1), at);
                begin.add(at).sub(1).write(value);
            }
            self.front_gap -= 1;
        }
    }

    unsafe fn remove(&mut self, at: usize) -> T {
        debug_assert!(at < self.len());
        let len = self.len();
        let begin = self.data();
        let value = unsafe { begin.add(at).read() };
        let after = len - at - 1;
        if after <= at {
            unsafe { ptr::copy(begin.add(at + 1), begin.add(at), after) };
            self.back_gap += 1;
        } else {
            unsafe { ptr::copy(begin, begin.add(1), at) };
            self.front_gap += 1;
        }
        value
    }

    unsafe fn remove_range(&mut self, start: usize, end: usize) {
        debug_assert!(start <= end && end <= self.len());
        let len = self.len();
        let count = end - start;
        let cap = self.capacity();
        let front = self.front_gap;
        let back = self.back_gap;
        let begin = self.data();
        let after = len - end;
        if after <= start {
            // tail is shorter: close the hole from the back. Only the head
            // counts as live while the drops run.
            self.back_gap = cap - front - start;
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(begin.add(start), count));
                ptr::copy(begin.add(end), begin.add(start), after);
            }
            self.back_gap = back + count;
        } else {
            self.front_gap = front + end;
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(begin.add(start), count));
                ptr::copy(begin, begin.add(count), start);
            }
            self.front_gap = front + count;
        }
    }

    unsafe fn pop_back(&mut self) -> T {
        debug_assert!(self.len() > 0);
        let len = self.len();
        let value = unsafe { self.block.as_mut_ptr().add(self.front_gap + len - 1).read() };
        self.back_gap += 1;
        value
    }

    unsafe fn pop_front(&mut self) -> T {
        debug_assert!(self.len() > 0);
        let value = unsafe { self.block.as_mut_ptr().add(self.front_gap).read() };
        self.front_gap += 1;
        value
    }

    fn clear(&mut self) {
        let len = self.len();
        let cap = self.capacity();
        let begin = self.data();
        self.front_gap = cap / 2;
        self.back_gap = cap - cap / 2;
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(begin, len));
        }
    }

    unsafe fn fill_from_slice(&mut self, src: &[T])
    where
        T: Clone,
    {
        debug_assert!(self.len() == 0 && src.len() <= self.capacity());
        let cap = self.capacity();
        let front = (cap - src.len()) / 2;
        unsafe { raw::clone_into(src, self.block.as_mut_ptr().add(front)) };
        self.front_gap = front;
        self.back_gap = cap - front - src.len();
    }

    unsafe fn extend_back(&mut self, extra: usize, value: &T)
    where
        T: Clone,
    {
        debug_assert!(self.len() + extra <= self.capacity());
        let len = self.len();
        let short = extra.saturating_sub(self.back_gap);
        if short > 0 {
            unsafe {
                let base = self.block.as_mut_ptr();
                ptr::copy(base.add(self.front_gap), base.add(self.front_gap - short), len);
            }
            self.front_gap -= short;
            self.back_gap += short;
        }
        unsafe {
            let end = self.block.as_mut_ptr().add(self.front_gap + len);
            raw::clone_fill(end, extra, value);
        }
        self.back_gap -= extra;
    }

    unsafe fn relocate_in(&mut self, src: *const T, len: usize) {
        debug_assert!(self.len() == 0 && len <= self.capacity());
        let cap = self.capacity();
        let front = (cap - len) / 2;
        unsafe { ptr::copy_nonoverlapping(src, self.block.as_mut_ptr().add(front), len) };
        self.front_gap = front;
        self.back_gap = cap - front - len;
    }

    unsafe fn forget_all(&mut self) {
        let cap = self.capacity();
        self.front_gap = cap / 2;
        self.back_gap = cap - cap / 2;
    }
}

impl<T> DynRaw for DynMiddle<T> {
    fn try_with_capacity(cap: usize) -> Result<Self, AllocError> {
        Ok(Self {
            block: DynBlock::try_with_capacity(cap)?,
            front_gap: cap / 2,
            back_gap: cap - cap / 2,
        })
    }

    fn try_reallocate(&mut self, new_cap: usize) -> Result<(), AllocError> {
        let len = self.len();
        debug_assert!(new_cap >= len);
        let offset = (new_cap - len) / 2;
        unsafe {
            self.block.try_reallocate(new_cap, self.front_gap, len, offset)?;
        }
        self.front_gap = offset;
        self.back_gap = new_cap - offset - len;
        Ok(())
    }
}

impl<T: Clone> Clone for DynMiddle<T> {
    fn clone(&self) -> Self {
        let len = self.len();
        let mut copy = Self {
            block: DynBlock::with_capacity(len),
            front_gap: len,
            back_gap: 0,
        };
        unsafe {
            let extent = slice::from_raw_parts(self.as_ptr(), len);
            raw::clone_into(extent, copy.block.as_mut_ptr());
        }
        copy.front_gap = 0;
        copy.back_gap = 0;
        copy
    }
}

impl<T> Drop for DynMiddle<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view<R: RawSeq>(store: &R) -> &[R::Item] {
        unsafe { slice::from_raw_parts(store.as_ptr(), store.len()) }
    }

    #[test]
    fn block_starts_null() {
        let block: DynBlock<u64> = DynBlock::new();
        assert_eq!(block.capacity(), 0);
    }

    #[test]
    fn block_zero_sized_elements_never_allocate() {
        let block: DynBlock<()> = DynBlock::with_capacity(1000);
        assert_eq!(block.capacity(), 1000);
    }

    #[test]
    fn front_reallocate_preserves_order() {
        let mut store: DynFront<u32> = DynFront::try_with_capacity(4).unwrap();
        unsafe {
            for v in 1..=4 {
                store.push_back(v);
            }
        }
        store.try_reallocate(16).unwrap();
        assert_eq!(store.capacity(), 16);
        assert_eq!(view(&store), &[1, 2, 3, 4]);
        assert_eq!(store.front_gap(), 0);
    }

    #[test]
    fn back_reallocate_stays_flush_to_end() {
        let mut store: DynBack<u32> = DynBack::try_with_capacity(4).unwrap();
        unsafe {
            for v in [4, 3, 2, 1] {
                store.push_front(v);
            }
        }
        store.try_reallocate(10).unwrap();
        assert_eq!(store.capacity(), 10);
        assert_eq!(view(&store), &[1, 2, 3, 4]);
        assert_eq!(store.front_gap(), 6);
        assert_eq!(store.back_gap(), 0);
    }

    #[test]
    fn middle_reallocate_recenters() {
        let mut store: DynMiddle<u32> = DynMiddle::try_with_capacity(4).unwrap();
        unsafe { store.fill_from_slice(&[5, 6, 7, 8]) };
        store.try_reallocate(10).unwrap();
        assert_eq!(store.capacity(), 10);
        assert_eq!(store.front_gap(), 3);
        assert_eq!(store.back_gap(), 3);
        assert_eq!(view(&store), &[5, 6, 7, 8]);
    }

    #[test]
    fn middle_push_front_after_reserve() {
        let mut store: DynMiddle<u32> = DynMiddle::try_with_capacity(10).unwrap();
        unsafe {
            store.fill_from_slice(&[5, 6, 7, 8]);
            store.push_front(4);
            store.push_front(3);
            store.push_front(2);
        }
        assert_eq!((store.front_gap(), store.back_gap()), (0, 3));

        unsafe { store.push_front(1) };
        assert_eq!((store.front_gap(), store.back_gap()), (1, 1));
        assert_eq!(view(&store), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn clone_gets_exact_capacity() {
        let mut store: DynFront<u32> = DynFront::try_with_capacity(10).unwrap();
        unsafe {
            for v in 1..=4 {
                store.push_back(v);
            }
        }
        let copy = store.clone();
        assert_eq!(copy.capacity(), 4);
        assert_eq!(view(&copy), view(&store));
    }

    #[test]
    fn shrink_to_zero_releases_buffer() {
        let mut store: DynFront<u32> = DynFront::try_with_capacity(8).unwrap();
        store.try_reallocate(0).unwrap();
        assert_eq!(store.capacity(), 0);
    }

    #[test]
    fn drop_cleans_up() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static DROP_COUNT: AtomicUsize = AtomicUsize::new(0);

        struct DropCounter;
        impl Drop for DropCounter {
            fn drop(&mut self) {
                DROP_COUNT.fetch_add(1, Ordering::SeqCst);
            }
        }

        DROP_COUNT.store(0, Ordering::SeqCst);

        {
            let mut store: DynMiddle<DropCounter> = DynMiddle::try_with_capacity(8).unwrap();
            unsafe {
                store.push_back(DropCounter);
                store.push_front(DropCounter);
            }
        }

        assert_eq!(DROP_COUNT.load(Ordering::SeqCst), 2);
    }
}
