//! Contract shared by the six element stores, plus the location markers
//! and the clone guards used by the bulk operations.
//!
//! An element store layers a live extent of initialized elements over a
//! capacity block of raw slots. The store owns the invariant that every
//! slot inside the extent is initialized and every slot outside it is not;
//! callers interact through the [`RawSeq`] contract and never touch raw
//! slots directly.
//!
//! All shifts and relocations here are `ptr::copy` moves. Rust values
//! relocate trivially, so the move-construct-then-destroy pair a C++
//! container would perform per element collapses into one memmove.

use std::mem;
use std::ptr;

/// Marker for stores that pack the live extent at the low end of the
/// capacity. Appending is cheap; prepending shifts the extent.
pub struct Front;

/// Marker for stores that pack the live extent at the high end of the
/// capacity. Prepending is cheap; appending shifts the extent.
pub struct Back;

/// Marker for stores that float the live extent in the middle of the
/// capacity. Both ends are cheap until a gap runs dry, at which point the
/// extent is re-centered.
pub struct Middle;

/// The element-management contract shared by all six stores.
///
/// Metadata is kept as integer lengths and gaps rather than interior
/// pointers, so a store moves freely (a self-referential pointer would not
/// survive a Rust move). Front-anchored stores report `front_gap() == 0`,
/// back-anchored stores `back_gap() == 0`, and centered stores maintain
/// `front_gap() + len() + back_gap() == capacity()`.
pub trait RawSeq {
    /// Element type held by the store.
    type Item;

    /// Location marker ([`Front`], [`Back`], or [`Middle`]); [`Buffered`]
    /// uses it to reject mismatched inline/heap pairings at compile time.
    ///
    /// [`Buffered`]: crate::Buffered
    type Location;

    /// Compile-time capacity for the inline stores, `None` for heap stores.
    const FIXED_CAPACITY: Option<usize>;

    /// Largest length representable in this store's metadata width.
    const MAX_LEN: usize;

    /// Number of live elements.
    fn len(&self) -> usize;

    /// Number of slots in the capacity block.
    fn capacity(&self) -> usize;

    /// Uninitialized slots below the live extent.
    fn front_gap(&self) -> usize;

    /// Uninitialized slots above the live extent.
    fn back_gap(&self) -> usize;

    /// First slot of the live extent. Dangling (but aligned) when the
    /// store has no capacity.
    fn as_ptr(&self) -> *const Self::Item;

    /// Mutable pointer to the first slot of the live extent.
    fn as_mut_ptr(&mut self) -> *mut Self::Item;

    /// Appends at the high end of the extent.
    ///
    /// # Safety
    ///
    /// `len() < capacity()`.
    unsafe fn push_back(&mut self, value: Self::Item);

    /// Prepends at the low end of the extent.
    ///
    /// # Safety
    ///
    /// `len() < capacity()`.
    unsafe fn push_front(&mut self, value: Self::Item);

    /// Inserts at position `at`, shifting neighbors to open a slot.
    ///
    /// # Safety
    ///
    /// `len() < capacity()` and `at <= len()`.
    unsafe fn insert(&mut self, at: usize, value: Self::Item);

    /// Removes and returns the element at `at`, closing the hole.
    ///
    /// # Safety
    ///
    /// `at < len()`.
    unsafe fn remove(&mut self, at: usize) -> Self::Item;

    /// Drops the elements in `[start, end)` and closes the hole.
    ///
    /// # Safety
    ///
    /// `start <= end <= len()`.
    unsafe fn remove_range(&mut self, start: usize, end: usize);

    /// Removes and returns the last element.
    ///
    /// # Safety
    ///
    /// `len() > 0`.
    unsafe fn pop_back(&mut self) -> Self::Item;

    /// Removes and returns the first element.
    ///
    /// # Safety
    ///
    /// `len() > 0`.
    unsafe fn pop_front(&mut self) -> Self::Item;

    /// Drops every live element. Centered stores reset their gaps to the
    /// empty-middle split.
    fn clear(&mut self);

    /// Clones `src` into the store as one block, placed at this location's
    /// gap split for the current capacity. Strong guarantee: if a clone
    /// panics the store is left empty and the finished clones are dropped.
    ///
    /// # Safety
    ///
    /// `len() == 0` and `src.len() <= capacity()`.
    unsafe fn fill_from_slice(&mut self, src: &[Self::Item])
    where
        Self::Item: Clone;

    /// Appends `extra` clones of `value` at the high end. Strong
    /// guarantee: a panicking clone restores the pre-call extent.
    ///
    /// # Safety
    ///
    /// `capacity() - len() >= extra`.
    unsafe fn extend_back(&mut self, extra: usize, value: &Self::Item)
    where
        Self::Item: Clone;

    /// Relocates `len` elements from `src` into the empty store, placed at
    /// this location's gap split. The caller must treat the source slots
    /// as moved-from afterwards.
    ///
    /// # Safety
    ///
    /// `len() == 0`, `len <= capacity()`, and `src` points at `len`
    /// initialized elements not owned by this store.
    unsafe fn relocate_in(&mut self, src: *const Self::Item, len: usize);

    /// Abandons every live element without dropping it.
    ///
    /// # Safety
    ///
    /// The caller takes over ownership of the abandoned elements.
    unsafe fn forget_all(&mut self);
}

#[cold]
#[inline(never)]
pub(crate) fn capacity_overflow() -> ! {
    panic!("sequence capacity overflow");
}

#[cold]
#[inline(never)]
pub(crate) fn alloc_failure() -> ! {
    panic!("sequence memory allocation failed");
}

/// Drops the clones written so far if one panics, leaving the caller's
/// metadata untouched.
struct InitGuard<T> {
    start: *mut T,
    written: usize,
}

impl<T> Drop for InitGuard<T> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.start, self.written));
        }
    }
}

/// Clones `src` element-wise into the slots starting at `dst`.
///
/// # Safety
///
/// `dst` must point at `src.len()` writable, uninitialized slots that do
/// not overlap `src`.
pub(crate) unsafe fn clone_into<T: Clone>(src: &[T], dst: *mut T) {
    let mut guard = InitGuard { start: dst, written: 0 };
    for value in src {
        unsafe { dst.add(guard.written).write(value.clone()) };
        guard.written += 1;
    }
    mem::forget(guard);
}

/// Writes `extra` clones of `value` into the slots starting at `dst`.
///
/// # Safety
///
/// `dst` must point at `extra` writable, uninitialized slots.
pub(crate) unsafe fn clone_fill<T: Clone>(dst: *mut T, extra: usize, value: &T) {
    let mut guard = InitGuard { start: dst, written: 0 };
    for _ in 0..extra {
        unsafe { dst.add(guard.written).write(value.clone()) };
        guard.written += 1;
    }
    mem::forget(guard);
}

/// Appends `extra` clones at the high end of a back-anchored extent.
///
/// The extent `[data, data + len)` is relocated `extra` slots lower and the
/// vacated top slots are filled with clones. If a clone panics, the
/// finished clones are dropped and the extent is relocated back up, so the
/// caller's metadata (still describing the pre-call extent) stays correct.
///
/// # Safety
///
/// The `extra` slots below `data` must be uninitialized and inside the
/// capacity block, and `[data, data + len)` must be initialized.
pub(crate) unsafe fn extend_back_anchored<T: Clone>(
    data: *mut T,
    len: usize,
    extra: usize,
    value: &T,
) {
    struct Restore<T> {
        begin: *mut T,
        len: usize,
        extra: usize,
        top: *mut T,
        written: usize,
    }

    impl<T> Drop for Restore<T> {
        fn drop(&mut self) {
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.top, self.written));
                ptr::copy(self.begin, self.begin.add(self.extra), self.len);
            }
        }
    }

    unsafe {
        let begin = data.sub(extra);
        ptr::copy(data, begin, len);
        let top = begin.add(len);
        let mut guard = Restore { begin, len, extra, top, written: 0 };
        for _ in 0..extra {
            top.add(guard.written).write(value.clone());
            guard.written += 1;
        }
        mem::forget(guard);
    }
}
