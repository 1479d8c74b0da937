//! Storage dispatchers: how a sequence owns its capacity block.
//!
//! Four disciplines sit behind one [`Store`] contract:
//!
//! - [`Static`] embeds a fixed store in the sequence object,
//! - [`Fixed`] boxes one on the heap, allocated on first use,
//! - [`Variable`] owns a growable heap store,
//! - [`Buffered`] starts inline and spills to the heap when the inline
//!   buffer overflows, returning when the contents fit again.
//!
//! The façade checks fullness and bounds; the dispatcher decides whether
//! and how capacity can change, then routes the element operation to the
//! underlying store.

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::slice;

use crate::dynamic::{AllocError, DynRaw};
use crate::growth::{Amortized, Growth};
use crate::raw::RawSeq;

/// Error from an explicit reservation or an internal growth step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveError {
    /// The storage cannot grow past its fixed capacity.
    CapacityExceeded,
    /// The system refused the allocation.
    AllocFailed,
}

impl fmt::Display for ReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReserveError::CapacityExceeded => write!(f, "fixed capacity exceeded"),
            ReserveError::AllocFailed => write!(f, "memory allocation failed"),
        }
    }
}

impl std::error::Error for ReserveError {}

impl From<AllocError> for ReserveError {
    fn from(_: AllocError) -> Self {
        ReserveError::AllocFailed
    }
}

/// Capacity of an inline store, for the dispatchers that require one.
fn inline_capacity<R: RawSeq>() -> usize {
    match R::FIXED_CAPACITY {
        Some(n) => n,
        None => panic!("this storage mode requires an inline element store"),
    }
}

/// The dispatcher contract behind [`Sequence`](crate::Sequence).
///
/// Element operations carry the same preconditions as [`RawSeq`]; the
/// façade establishes them (bounds checks, growth) before forwarding.
pub trait Store {
    /// Element type held by the storage.
    type Item;

    /// Largest length this storage can represent: the size-field maximum
    /// for the fixed-width storages, the platform word for the rest.
    const MAX_LEN: usize;

    /// Number of live elements.
    fn len(&self) -> usize;

    /// Current capacity in slots.
    fn capacity(&self) -> usize;

    /// Uninitialized slots below the live extent.
    fn front_gap(&self) -> usize;

    /// Uninitialized slots above the live extent.
    fn back_gap(&self) -> usize;

    /// Whether the current capacity block lives on the heap.
    fn is_dynamic(&self) -> bool;

    /// First slot of the live extent.
    fn as_ptr(&self) -> *const Self::Item;

    /// Mutable pointer to the first slot of the live extent.
    fn as_mut_ptr(&mut self) -> *mut Self::Item;

    /// Makes room for at least one more element, growing per the policy.
    fn try_grow(&mut self) -> Result<(), ReserveError>;

    /// Reallocates to exactly `n` slots (`n >= len()`).
    fn try_reserve(&mut self, n: usize) -> Result<(), ReserveError>;

    /// Gives back capacity not needed for the current length, where the
    /// storage mode allows it.
    fn shrink_to_fit(&mut self);

    /// Drops every live element. [`Fixed`] also releases its heap block.
    fn clear(&mut self);

    /// See [`RawSeq::push_back`].
    ///
    /// # Safety
    ///
    /// `len() < capacity()`.
    unsafe fn push_back(&mut self, value: Self::Item);

    /// See [`RawSeq::push_front`].
    ///
    /// # Safety
    ///
    /// `len() < capacity()`.
    unsafe fn push_front(&mut self, value: Self::Item);

    /// See [`RawSeq::insert`].
    ///
    /// # Safety
    ///
    /// `len() < capacity()` and `at <= len()`.
    unsafe fn insert(&mut self, at: usize, value: Self::Item);

    /// See [`RawSeq::remove`].
    ///
    /// # Safety
    ///
    /// `at < len()`.
    unsafe fn remove(&mut self, at: usize) -> Self::Item;

    /// See [`RawSeq::remove_range`].
    ///
    /// # Safety
    ///
    /// `start <= end <= len()`.
    unsafe fn remove_range(&mut self, start: usize, end: usize);

    /// See [`RawSeq::pop_back`].
    ///
    /// # Safety
    ///
    /// `len() > 0`.
    unsafe fn pop_back(&mut self) -> Self::Item;

    /// See [`RawSeq::pop_front`].
    ///
    /// # Safety
    ///
    /// `len() > 0`.
    unsafe fn pop_front(&mut self) -> Self::Item;

    /// See [`RawSeq::fill_from_slice`].
    ///
    /// # Safety
    ///
    /// `len() == 0` and `src.len() <= capacity()`.
    unsafe fn fill_from_slice(&mut self, src: &[Self::Item])
    where
        Self::Item: Clone;

    /// See [`RawSeq::extend_back`].
    ///
    /// # Safety
    ///
    /// `capacity() - len() >= extra`.
    unsafe fn extend_back(&mut self, extra: usize, value: &Self::Item)
    where
        Self::Item: Clone;

    /// See [`RawSeq::forget_all`].
    ///
    /// # Safety
    ///
    /// The caller takes over ownership of the abandoned elements.
    unsafe fn forget_all(&mut self);
}

// =============================================================================
// Static
// =============================================================================

/// Inline storage: the capacity block is embedded in the sequence object
/// and can never change.
pub struct Static<R> {
    inner: R,
}

impl<R: RawSeq + Default> Static<R> {
    /// Creates an empty storage.
    #[inline]
    pub fn new() -> Self {
        Self { inner: R::default() }
    }
}

impl<R: RawSeq + Default> Default for Static<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Clone> Clone for Static<R> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<R: RawSeq> Store for Static<R> {
    type Item = R::Item;

    const MAX_LEN: usize = R::MAX_LEN;

    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    #[inline]
    fn front_gap(&self) -> usize {
        self.inner.front_gap()
    }

    #[inline]
    fn back_gap(&self) -> usize {
        self.inner.back_gap()
    }

    #[inline]
    fn is_dynamic(&self) -> bool {
        false
    }

    #[inline]
    fn as_ptr(&self) -> *const R::Item {
        self.inner.as_ptr()
    }

    #[inline]
    fn as_mut_ptr(&mut self) -> *mut R::Item {
        self.inner.as_mut_ptr()
    }

    fn try_grow(&mut self) -> Result<(), ReserveError> {
        Err(ReserveError::CapacityExceeded)
    }

    fn try_reserve(&mut self, n: usize) -> Result<(), ReserveError> {
        if n <= self.inner.capacity() {
            Ok(())
        } else {
            Err(ReserveError::CapacityExceeded)
        }
    }

    fn shrink_to_fit(&mut self) {}

    fn clear(&mut self) {
        self.inner.clear();
    }

    unsafe fn push_back(&mut self, value: R::Item) {
        unsafe { self.inner.push_back(value) }
    }

    unsafe fn push_front(&mut self, value: R::Item) {
        unsafe { self.inner.push_front(value) }
    }

    unsafe fn insert(&mut self, at: usize, value: R::Item) {
        unsafe { self.inner.insert(at, value) }
    }

    unsafe fn remove(&mut self, at: usize) -> R::Item {
        unsafe { self.inner.remove(at) }
    }

    unsafe fn remove_range(&mut self, start: usize, end: usize) {
        unsafe { self.inner.remove_range(start, end) }
    }

    unsafe fn pop_back(&mut self) -> R::Item {
        unsafe { self.inner.pop_back() }
    }

    unsafe fn pop_front(&mut self) -> R::Item {
        unsafe { self.inner.pop_front() }
    }

    unsafe fn fill_from_slice(&mut self, src: &[R::Item])
    where
        R::Item: Clone,
    {
        unsafe { self.inner.fill_from_slice(src) }
    }

    unsafe fn extend_back(&mut self, extra: usize, value: &R::Item)
    where
        R::Item: Clone,
    {
        unsafe { self.inner.extend_back(extra, value) }
    }

    unsafe fn forget_all(&mut self) {
        unsafe { self.inner.forget_all() }
    }
}

// =============================================================================
// Fixed
// =============================================================================

/// Heap storage with a fixed capacity, allocated on first use.
///
/// A freshly created sequence owns nothing; the block appears on the first
/// growth or reservation and reports capacity 0 until then. `clear`
/// releases it again.
pub struct Fixed<R> {
    inner: Option<Box<R>>,
}

impl<R: RawSeq + Default> Fixed<R> {
    /// Creates an empty storage with no heap block.
    #[inline]
    pub fn new() -> Self {
        Self { inner: None }
    }

    fn ensure_allocated(&mut self) {
        if self.inner.is_none() {
            self.inner = Some(Box::new(R::default()));
        }
    }
}

impl<R: RawSeq + Default> Default for Fixed<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RawSeq + Clone> Clone for Fixed<R> {
    fn clone(&self) -> Self {
        // an empty source clones to the unallocated state
        match &self.inner {
            Some(inner) if inner.len() > 0 => Self {
                inner: Some(Box::new((**inner).clone())),
            },
            _ => Self { inner: None },
        }
    }
}

impl<R: RawSeq + Default> Store for Fixed<R> {
    type Item = R::Item;

    const MAX_LEN: usize = R::MAX_LEN;

    #[inline]
    fn len(&self) -> usize {
        self.inner.as_ref().map_or(0, |inner| inner.len())
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.inner.as_ref().map_or(0, |inner| inner.capacity())
    }

    #[inline]
    fn front_gap(&self) -> usize {
        self.inner.as_ref().map_or(0, |inner| inner.front_gap())
    }

    #[inline]
    fn back_gap(&self) -> usize {
        self.inner.as_ref().map_or(0, |inner| inner.back_gap())
    }

    #[inline]
    fn is_dynamic(&self) -> bool {
        true
    }

    #[inline]
    fn as_ptr(&self) -> *const R::Item {
        match &self.inner {
            Some(inner) => inner.as_ptr(),
            None => NonNull::dangling().as_ptr(),
        }
    }

    #[inline]
    fn as_mut_ptr(&mut self) -> *mut R::Item {
        match &mut self.inner {
            Some(inner) => inner.as_mut_ptr(),
            None => NonNull::dangling().as_ptr(),
        }
    }

    fn try_grow(&mut self) -> Result<(), ReserveError> {
        if self.inner.is_none() {
            self.ensure_allocated();
            return Ok(());
        }
        Err(ReserveError::CapacityExceeded)
    }

    fn try_reserve(&mut self, n: usize) -> Result<(), ReserveError> {
        if n > inline_capacity::<R>() {
            return Err(ReserveError::CapacityExceeded);
        }
        if n > 0 {
            self.ensure_allocated();
        }
        Ok(())
    }

    fn shrink_to_fit(&mut self) {
        if self.len() == 0 {
            self.inner = None;
        }
    }

    fn clear(&mut self) {
        // drops the elements and releases the block
        self.inner = None;
    }

    unsafe fn push_back(&mut self, value: R::Item) {
        unsafe { self.inner.as_deref_mut().unwrap_unchecked().push_back(value) }
    }

    unsafe fn push_front(&mut self, value: R::Item) {
        unsafe { self.inner.as_deref_mut().unwrap_unchecked().push_front(value) }
    }

    unsafe fn insert(&mut self, at: usize, value: R::Item) {
        unsafe { self.inner.as_deref_mut().unwrap_unchecked().insert(at, value) }
    }

    unsafe fn remove(&mut self, at: usize) -> R::Item {
        unsafe { self.inner.as_deref_mut().unwrap_unchecked().remove(at) }
    }

    unsafe fn remove_range(&mut self, start: usize, end: usize) {
        unsafe {
            self.inner
                .as_deref_mut()
                .unwrap_unchecked()
                .remove_range(start, end)
        }
    }

    unsafe fn pop_back(&mut self) -> R::Item {
        unsafe { self.inner.as_deref_mut().unwrap_unchecked().pop_back() }
    }

    unsafe fn pop_front(&mut self) -> R::Item {
        unsafe { self.inner.as_deref_mut().unwrap_unchecked().pop_front() }
    }

    unsafe fn fill_from_slice(&mut self, src: &[R::Item])
    where
        R::Item: Clone,
    {
        if src.is_empty() {
            return;
        }
        unsafe { self.inner.as_deref_mut().unwrap_unchecked().fill_from_slice(src) }
    }

    unsafe fn extend_back(&mut self, extra: usize, value: &R::Item)
    where
        R::Item: Clone,
    {
        if extra == 0 {
            return;
        }
        unsafe {
            self.inner
                .as_deref_mut()
                .unwrap_unchecked()
                .extend_back(extra, value)
        }
    }

    unsafe fn forget_all(&mut self) {
        if let Some(inner) = &mut self.inner {
            unsafe { inner.forget_all() };
        }
    }
}

// =============================================================================
// Variable
// =============================================================================

/// Growable heap storage.
///
/// The first allocation jumps straight to `INITIAL` slots; after that the
/// growth policy `G` decides each step. Explicit reservations reallocate
/// to exactly the requested size.
pub struct Variable<D, G = Amortized, const INITIAL: usize = 1> {
    inner: D,
    _growth: PhantomData<G>,
}

impl<D: DynRaw, G: Growth, const INITIAL: usize> Variable<D, G, INITIAL> {
    const INITIAL_NONZERO: () = assert!(INITIAL > 0, "initial capacity must be at least 1");

    /// Creates an empty storage with no buffer.
    #[inline]
    pub fn new() -> Self {
        let () = Self::INITIAL_NONZERO;
        Self {
            inner: D::default(),
            _growth: PhantomData,
        }
    }
}

impl<D: DynRaw, G: Growth, const INITIAL: usize> Default for Variable<D, G, INITIAL> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DynRaw + Clone, G: Growth, const INITIAL: usize> Clone for Variable<D, G, INITIAL> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _growth: PhantomData,
        }
    }
}

impl<D: DynRaw, G: Growth, const INITIAL: usize> Store for Variable<D, G, INITIAL> {
    type Item = D::Item;

    const MAX_LEN: usize = usize::MAX;

    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    #[inline]
    fn front_gap(&self) -> usize {
        self.inner.front_gap()
    }

    #[inline]
    fn back_gap(&self) -> usize {
        self.inner.back_gap()
    }

    #[inline]
    fn is_dynamic(&self) -> bool {
        true
    }

    #[inline]
    fn as_ptr(&self) -> *const D::Item {
        self.inner.as_ptr()
    }

    #[inline]
    fn as_mut_ptr(&mut self) -> *mut D::Item {
        self.inner.as_mut_ptr()
    }

    fn try_grow(&mut self) -> Result<(), ReserveError> {
        let cap = self.inner.capacity();
        let target = if cap < INITIAL {
            INITIAL
        } else {
            G::next_capacity(cap)
        };
        self.inner.try_reallocate(target).map_err(ReserveError::from)
    }

    fn try_reserve(&mut self, n: usize) -> Result<(), ReserveError> {
        self.inner.try_reallocate(n).map_err(ReserveError::from)
    }

    fn shrink_to_fit(&mut self) {
        let len = self.inner.len();
        if len < self.inner.capacity() {
            // keep the old buffer if the smaller one is refused
            let _ = self.inner.try_reallocate(len);
        }
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    unsafe fn push_back(&mut self, value: D::Item) {
        unsafe { self.inner.push_back(value) }
    }

    unsafe fn push_front(&mut self, value: D::Item) {
        unsafe { self.inner.push_front(value) }
    }

    unsafe fn insert(&mut self, at: usize, value: D::Item) {
        unsafe { self.inner.insert(at, value) }
    }

    unsafe fn remove(&mut self, at: usize) -> D::Item {
        unsafe { self.inner.remove(at) }
    }

    unsafe fn remove_range(&mut self, start: usize, end: usize) {
        unsafe { self.inner.remove_range(start, end) }
    }

    unsafe fn pop_back(&mut self) -> D::Item {
        unsafe { self.inner.pop_back() }
    }

    unsafe fn pop_front(&mut self) -> D::Item {
        unsafe { self.inner.pop_front() }
    }

    unsafe fn fill_from_slice(&mut self, src: &[D::Item])
    where
        D::Item: Clone,
    {
        unsafe { self.inner.fill_from_slice(src) }
    }

    unsafe fn extend_back(&mut self, extra: usize, value: &D::Item)
    where
        D::Item: Clone,
    {
        unsafe { self.inner.extend_back(extra, value) }
    }

    unsafe fn forget_all(&mut self) {
        unsafe { self.inner.forget_all() }
    }
}

// =============================================================================
// Buffered
// =============================================================================

enum BufferedState<R, D> {
    Inline(R),
    Spilled(D),
}

/// Small-buffer storage: inline until the buffer overflows, heap after.
///
/// The inline store and the heap store must anchor their extents at the
/// same location; the `Location` bound rejects mismatched pairings.
pub struct Buffered<R, D, G = Amortized> {
    state: BufferedState<R, D>,
    _growth: PhantomData<G>,
}

impl<R, D, G> Buffered<R, D, G>
where
    R: RawSeq + Default,
    D: DynRaw + RawSeq<Item = R::Item, Location = R::Location>,
    G: Growth,
{
    /// Creates an empty storage in the inline state.
    #[inline]
    pub fn new() -> Self {
        Self {
            state: BufferedState::Inline(R::default()),
            _growth: PhantomData,
        }
    }

    /// Moves the inline elements into a fresh heap store of `new_cap`
    /// slots and switches state.
    fn spill(&mut self, new_cap: usize) -> Result<(), ReserveError> {
        let BufferedState::Inline(inline) = &mut self.state else {
            unreachable!("spill from the heap state");
        };
        debug_assert!(new_cap >= inline.len());
        let mut heap = D::try_with_capacity(new_cap).map_err(ReserveError::from)?;
        unsafe {
            heap.relocate_in(inline.as_ptr(), inline.len());
            inline.forget_all();
        }
        self.state = BufferedState::Spilled(heap);
        Ok(())
    }

    /// Moves the heap elements back into a fresh inline store and drops
    /// the heap block. Requires `len() <= inline capacity`.
    fn unspill(&mut self) {
        let BufferedState::Spilled(heap) = &mut self.state else {
            return;
        };
        debug_assert!(heap.len() <= inline_capacity::<R>());
        let mut inline = R::default();
        unsafe {
            inline.relocate_in(heap.as_ptr(), heap.len());
            heap.forget_all();
        }
        self.state = BufferedState::Inline(inline);
    }
}

impl<R, D, G> Default for Buffered<R, D, G>
where
    R: RawSeq + Default,
    D: DynRaw + RawSeq<Item = R::Item, Location = R::Location>,
    G: Growth,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R, D, G> Clone for Buffered<R, D, G>
where
    R: RawSeq + Default + Clone,
    D: DynRaw + Clone + RawSeq<Item = R::Item, Location = R::Location>,
    G: Growth,
    R::Item: Clone,
{
    fn clone(&self) -> Self {
        let state = match &self.state {
            BufferedState::Inline(inline) => BufferedState::Inline(inline.clone()),
            BufferedState::Spilled(heap) if heap.len() <= inline_capacity::<R>() => {
                // the copy fits the buffer, so it starts at home
                let mut inline = R::default();
                unsafe {
                    let extent = slice::from_raw_parts(heap.as_ptr(), heap.len());
                    inline.fill_from_slice(extent);
                }
                BufferedState::Inline(inline)
            }
            BufferedState::Spilled(heap) => BufferedState::Spilled(heap.clone()),
        };
        Self {
            state,
            _growth: PhantomData,
        }
    }
}

impl<R, D, G> Store for Buffered<R, D, G>
where
    R: RawSeq + Default,
    D: DynRaw + RawSeq<Item = R::Item, Location = R::Location>,
    G: Growth,
{
    type Item = R::Item;

    const MAX_LEN: usize = usize::MAX;

    #[inline]
    fn len(&self) -> usize {
        match &self.state {
            BufferedState::Inline(inline) => inline.len(),
            BufferedState::Spilled(heap) => heap.len(),
        }
    }

    #[inline]
    fn capacity(&self) -> usize {
        match &self.state {
            BufferedState::Inline(inline) => inline.capacity(),
            BufferedState::Spilled(heap) => heap.capacity(),
        }
    }

    #[inline]
    fn front_gap(&self) -> usize {
        match &self.state {
            BufferedState::Inline(inline) => inline.front_gap(),
            BufferedState::Spilled(heap) => heap.front_gap(),
        }
    }

    #[inline]
    fn back_gap(&self) -> usize {
        match &self.state {
            BufferedState::Inline(inline) => inline.back_gap(),
            BufferedState::Spilled(heap) => heap.back_gap(),
        }
    }

    #[inline]
    fn is_dynamic(&self) -> bool {
        matches!(self.state, BufferedState::Spilled(_))
    }

    #[inline]
    fn as_ptr(&self) -> *const R::Item {
        match &self.state {
            BufferedState::Inline(inline) => inline.as_ptr(),
            BufferedState::Spilled(heap) => heap.as_ptr(),
        }
    }

    #[inline]
    fn as_mut_ptr(&mut self) -> *mut R::Item {
        match &mut self.state {
            BufferedState::Inline(inline) => inline.as_mut_ptr(),
            BufferedState::Spilled(heap) => heap.as_mut_ptr(),
        }
    }

    fn try_grow(&mut self) -> Result<(), ReserveError> {
        if let BufferedState::Spilled(heap) = &mut self.state {
            let target = G::next_capacity(heap.capacity());
            return heap.try_reallocate(target).map_err(ReserveError::from);
        }
        self.spill(G::next_capacity(inline_capacity::<R>()))
    }

    fn try_reserve(&mut self, n: usize) -> Result<(), ReserveError> {
        if matches!(self.state, BufferedState::Inline(_)) {
            if n <= inline_capacity::<R>() {
                // the buffer already covers it; inline capacity never changes
                return Ok(());
            }
            return self.spill(n);
        }
        if n <= inline_capacity::<R>() {
            self.unspill();
            return Ok(());
        }
        let BufferedState::Spilled(heap) = &mut self.state else {
            unreachable!();
        };
        heap.try_reallocate(n).map_err(ReserveError::from)
    }

    fn shrink_to_fit(&mut self) {
        let len = self.len();
        if !self.is_dynamic() {
            return;
        }
        if len <= inline_capacity::<R>() {
            self.unspill();
            return;
        }
        let BufferedState::Spilled(heap) = &mut self.state else {
            unreachable!();
        };
        if len < heap.capacity() {
            let _ = heap.try_reallocate(len);
        }
    }

    fn clear(&mut self) {
        match &mut self.state {
            BufferedState::Inline(inline) => inline.clear(),
            BufferedState::Spilled(heap) => heap.clear(),
        }
    }

    unsafe fn push_back(&mut self, value: R::Item) {
        match &mut self.state {
            BufferedState::Inline(inline) => unsafe { inline.push_back(value) },
            BufferedState::Spilled(heap) => unsafe { heap.push_back(value) },
        }
    }

    unsafe fn push_front(&mut self, value: R::Item) {
        match &mut self.state {
            BufferedState::Inline(inline) => unsafe { inline.push_front(value) },
            BufferedState::Spilled(heap) => unsafe { heap.push_front(value) },
        }
    }

    unsafe fn insert(&mut self, at: usize, value: R::Item) {
        match &mut self.state {
            BufferedState::Inline(inline) => unsafe { inline.insert(at, value) },
            BufferedState::Spilled(heap) => unsafe { heap.insert(at, value) },
        }
    }

    unsafe fn remove(&mut self, at: usize) -> R::Item {
        match &mut self.state {
            BufferedState::Inline(inline) => unsafe { inline.remove(at) },
            BufferedState::Spilled(heap) => unsafe { heap.remove(at) },
        }
    }

    unsafe fn remove_range(&mut self, start: usize, end: usize) {
        match &mut self.state {
            BufferedState::Inline(inline) => unsafe { inline.remove_range(start, end) },
            BufferedState::Spilled(heap) => unsafe { heap.remove_range(start, end) },
        }
    }

    unsafe fn pop_back(&mut self) -> R::Item {
        match &mut self.state {
            BufferedState::Inline(inline) => unsafe { inline.pop_back() },
            BufferedState::Spilled(heap) => unsafe { heap.pop_back() },
        }
    }

    unsafe fn pop_front(&mut self) -> R::Item {
        match &mut self.state {
            BufferedState::Inline(inline) => unsafe { inline.pop_front() },
            BufferedState::Spilled(heap) => unsafe { heap.pop_front() },
        }
    }

    unsafe fn fill_from_slice(&mut self, src: &[R::Item])
    where
        R::Item: Clone,
    {
        match &mut self.state {
            BufferedState::Inline(inline) => unsafe { inline.fill_from_slice(src) },
            BufferedState::Spilled(heap) => unsafe { heap.fill_from_slice(src) },
        }
    }

    unsafe fn extend_back(&mut self, extra: usize, value: &R::Item)
    where
        R::Item: Clone,
    {
        match &mut self.state {
            BufferedState::Inline(inline) => unsafe { inline.extend_back(extra, value) },
            BufferedState::Spilled(heap) => unsafe { heap.extend_back(extra, value) },
        }
    }

    unsafe fn forget_all(&mut self) {
        match &mut self.state {
            BufferedState::Inline(inline) => unsafe { inline.forget_all() },
            BufferedState::Spilled(heap) => unsafe { heap.forget_all() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamic::{DynFront, DynMiddle};
    use crate::fixed::{FixedFront, FixedMiddle};
    use crate::growth::{Exponential, Linear};

    fn push_all<S: Store<Item = u32>>(store: &mut S, values: &[u32]) {
        for &v in values {
            if store.len() == store.capacity() {
                store.try_grow().unwrap();
            }
            unsafe { store.push_back(v) };
        }
    }

    fn view<S: Store>(store: &S) -> &[S::Item] {
        unsafe { slice::from_raw_parts(store.as_ptr(), store.len()) }
    }

    #[test]
    fn static_growth_fails() {
        let mut store: Static<FixedFront<u32, 4>> = Static::new();
        push_all(&mut store, &[1, 2, 3, 4]);
        assert_eq!(store.try_grow(), Err(ReserveError::CapacityExceeded));
        assert_eq!(store.try_reserve(5), Err(ReserveError::CapacityExceeded));
        assert_eq!(store.try_reserve(4), Ok(()));
        assert!(!store.is_dynamic());
    }

    #[test]
    fn fixed_allocates_lazily() {
        let mut store: Fixed<FixedFront<u32, 10>> = Fixed::new();
        assert_eq!(store.capacity(), 0);
        assert!(store.is_dynamic());

        push_all(&mut store, &[1, 2, 3]);
        assert_eq!(store.capacity(), 10);
        assert_eq!(view(&store), &[1, 2, 3]);
    }

    #[test]
    fn fixed_reserve_allocates_and_caps() {
        let mut store: Fixed<FixedFront<u32, 10>> = Fixed::new();
        store.try_reserve(1).unwrap();
        assert_eq!(store.capacity(), 10);
        assert_eq!(store.try_reserve(11), Err(ReserveError::CapacityExceeded));
    }

    #[test]
    fn fixed_clear_releases_block() {
        let mut store: Fixed<FixedFront<u32, 10>> = Fixed::new();
        push_all(&mut store, &[1, 2, 3]);
        store.clear();
        assert_eq!(store.capacity(), 0);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn fixed_shrink_releases_only_when_empty() {
        let mut store: Fixed<FixedFront<u32, 10>> = Fixed::new();
        push_all(&mut store, &[1, 2, 3]);
        store.shrink_to_fit();
        assert_eq!(store.capacity(), 10);

        unsafe {
            store.remove_range(0, 3);
        }
        store.shrink_to_fit();
        assert_eq!(store.capacity(), 0);
    }

    #[test]
    fn variable_first_allocation_jumps_to_initial() {
        let mut store: Variable<DynFront<u32>, Amortized, 10> = Variable::new();
        assert_eq!(store.capacity(), 0);
        push_all(&mut store, &[42]);
        assert_eq!(store.capacity(), 10);
    }

    #[test]
    fn variable_growth_follows_the_policy() {
        let mut lin: Variable<DynFront<u32>, Linear<4>, 4> = Variable::new();
        let values: Vec<u32> = (0..9).collect();
        push_all(&mut lin, &values);
        assert_eq!(lin.capacity(), 12); // 4, 8, 12

        let mut exp: Variable<DynFront<u32>, Exponential<2, 1>, 2> = Variable::new();
        push_all(&mut exp, &[1, 2, 3, 4, 5]);
        assert_eq!(exp.capacity(), 8); // 2, 4, 8
    }

    #[test]
    fn variable_reserve_is_exact() {
        let mut store: Variable<DynFront<u32>> = Variable::new();
        store.try_reserve(7).unwrap();
        assert_eq!(store.capacity(), 7);
        push_all(&mut store, &[1, 2, 3]);
        store.shrink_to_fit();
        assert_eq!(store.capacity(), 3);
        assert_eq!(view(&store), &[1, 2, 3]);
    }

    #[test]
    fn variable_shrink_empty_releases_buffer() {
        let mut store: Variable<DynFront<u32>> = Variable::new();
        store.try_reserve(8).unwrap();
        store.shrink_to_fit();
        assert_eq!(store.capacity(), 0);
    }

    #[test]
    fn buffered_starts_inline() {
        let store: Buffered<FixedFront<u32, 6>, DynFront<u32>> = Buffered::new();
        assert_eq!(store.capacity(), 6);
        assert!(!store.is_dynamic());
    }

    #[test]
    fn buffered_reserve_within_buffer_is_noop() {
        let mut store: Buffered<FixedFront<u32, 6>, DynFront<u32>> = Buffered::new();
        push_all(&mut store, &[1, 2, 3]);
        store.try_reserve(6).unwrap();
        assert_eq!(store.capacity(), 6);
        assert!(!store.is_dynamic());
    }

    #[test]
    fn buffered_spills_and_returns() {
        let mut store: Buffered<FixedFront<u32, 6>, DynFront<u32>> = Buffered::new();
        push_all(&mut store, &[1, 2, 3]);

        store.try_reserve(10).unwrap();
        assert!(store.is_dynamic());
        assert_eq!(store.capacity(), 10);
        assert_eq!(view(&store), &[1, 2, 3]);

        store.shrink_to_fit();
        assert!(!store.is_dynamic());
        assert_eq!(store.capacity(), 6);
        assert_eq!(view(&store), &[1, 2, 3]);
    }

    #[test]
    fn buffered_grows_past_buffer_on_push() {
        let mut store: Buffered<FixedFront<u32, 4>, DynFront<u32>> = Buffered::new();
        push_all(&mut store, &[1, 2, 3, 4, 5]);
        assert!(store.is_dynamic());
        assert_eq!(view(&store), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn buffered_middle_keeps_gap_discipline() {
        let mut store: Buffered<FixedMiddle<u32, 4>, DynMiddle<u32>> = Buffered::new();
        push_all(&mut store, &[1, 2, 3, 4, 5]);
        assert!(store.is_dynamic());
        assert_eq!(
            store.front_gap() + store.len() + store.back_gap(),
            store.capacity()
        );
        assert_eq!(view(&store), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn max_len_tracks_width() {
        assert_eq!(<Static<FixedFront<u32, 4, u8>> as Store>::MAX_LEN, 255);
        assert_eq!(
            <Static<FixedFront<u32, 4, u16>> as Store>::MAX_LEN,
            u16::MAX as usize
        );
        assert_eq!(<Variable<DynFront<u32>> as Store>::MAX_LEN, usize::MAX);
        assert_eq!(
            <Buffered<FixedFront<u32, 4>, DynFront<u32>> as Store>::MAX_LEN,
            usize::MAX
        );
    }
}
