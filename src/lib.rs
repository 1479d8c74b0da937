//! # flexseq
//!
//! A contiguous sequence container configured at compile time, so one
//! abstraction covers the roles of an inplace vector, a reserved-once
//! heap vector, a growable vector, and a small-buffer hybrid.
//!
//! Two axes are chosen independently:
//!
//! | Storage | Owns the capacity block... |
//! |---------|----------------------------|
//! | [`Static`] | inline, embedded in the object; never changes |
//! | [`Fixed`] | on the heap, allocated lazily; never grows |
//! | [`Variable`] | on the heap, growing per a [`Growth`] policy |
//! | [`Buffered`] | inline until it overflows, then on the heap |
//!
//! | Location | Live elements sit... | Cheap end |
//! |----------|----------------------|-----------|
//! | front ([`FixedFront`]/[`DynFront`]) | packed at the low end | back |
//! | back ([`FixedBack`]/[`DynBack`]) | packed at the high end | front |
//! | middle ([`FixedMiddle`]/[`DynMiddle`]) | floating, centered | both |
//!
//! The centered stores re-center instead of failing when the working gap
//! runs dry, paying an occasional memmove for double-ended pushes without
//! a ring buffer's index arithmetic.
//!
//! Aliases cover the common picks: [`StaticSeq`], [`FixedSeq`], [`Seq`],
//! [`SmallSeq`], [`CenteredSeq`]. Any other combination is spelled out
//! directly:
//!
//! ```
//! use flexseq::{Buffered, DynMiddle, FixedMiddle, Sequence};
//!
//! // a small-buffer double-ended sequence: 8 slots inline, u8 metadata
//! type Scratch = Sequence<Buffered<FixedMiddle<u32, 8, u8>, DynMiddle<u32>>>;
//!
//! let mut s: Scratch = Sequence::new();
//! s.push_back(2);
//! s.push_front(1);
//! s.push_back(3);
//! assert_eq!(s, [1, 2, 3]);
//! assert!(!s.is_dynamic());
//! ```
//!
//! # Element access
//!
//! A sequence dereferences to a slice of its live extent, so indexing,
//! `get`, `iter`, and the rest of the slice API apply unchanged. Slice
//! borrows also pin the extent: any operation that could reallocate or
//! re-center takes `&mut self`, so no stale interior pointer can survive
//! it.
//!
//! ```
//! use flexseq::Seq;
//!
//! let mut seq: Seq<u32> = (1..=5).collect();
//! assert_eq!(seq[0], 1);
//! assert_eq!(seq.get(9), None);
//! seq.as_mut_slice().reverse();
//! assert_eq!(seq, [5, 4, 3, 2, 1]);
//! ```
//!
//! # Metadata width
//!
//! The fixed stores take a [`SizeInt`] parameter for their length and gap
//! fields; a capacity that does not fit the chosen width is rejected at
//! compile time.

#![warn(missing_docs)]

mod dynamic;
mod fixed;
mod growth;
mod raw;
mod seq;
#[cfg(feature = "serde")]
mod serde;
mod size;
mod store;

pub use dynamic::{AllocError, DynBack, DynBlock, DynFront, DynMiddle, DynRaw};
pub use fixed::{FixedBack, FixedBlock, FixedFront, FixedMiddle};
pub use growth::{Amortized, Exponential, Growth, Linear};
pub use raw::{Back, Front, Middle, RawSeq};
pub use seq::{CapacityError, IntoIter, Sequence};
pub use size::SizeInt;
pub use store::{Buffered, Fixed, ReserveError, Static, Store, Variable};

/// Inline fixed-capacity sequence of `N` elements (an inplace vector).
pub type StaticSeq<T, const N: usize, W = usize> = Sequence<Static<FixedFront<T, N, W>>>;

/// Heap-allocated fixed-capacity sequence; the block appears on first use
/// and `clear` releases it.
pub type FixedSeq<T, const N: usize, W = usize> = Sequence<Fixed<FixedFront<T, N, W>>>;

/// Growable heap sequence with amortized growth (a `Vec` work-alike).
pub type Seq<T> = Sequence<Variable<DynFront<T>>>;

/// Growable heap sequence keeping its elements centered, so both ends are
/// cheap to push.
pub type CenteredSeq<T> = Sequence<Variable<DynMiddle<T>>>;

/// Small-buffer sequence: `N` slots inline, spilling to the heap when they
/// run out and returning inline when the contents fit again.
pub type SmallSeq<T, const N: usize> = Sequence<Buffered<FixedFront<T, N>, DynFront<T>>>;
