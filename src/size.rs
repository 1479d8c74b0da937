//! Size-field width selection for the fixed-capacity stores.
//!
//! A sequence with a small inline capacity wastes space carrying `usize`
//! length and gap fields. The fixed stores keep their metadata in a caller
//! chosen unsigned integer instead, so a `FixedFront<i8, 3, u8>` occupies
//! four bytes rather than sixteen.

/// An unsigned integer usable as a length or gap field.
///
/// # Example
///
/// ```
/// use flexseq::SizeInt;
///
/// assert_eq!(u8::MAX_LEN, 255);
/// assert_eq!(u16::from_usize(1000).as_usize(), 1000);
/// ```
pub trait SizeInt: Copy + Eq + Default {
    /// Largest length representable in this width.
    const MAX_LEN: usize;

    /// Widens the field back to `usize`.
    fn as_usize(self) -> usize;

    /// Narrows a length into this width. `val` must not exceed
    /// [`MAX_LEN`](Self::MAX_LEN); the stores guarantee this because their
    /// capacity is checked against the width at compile time.
    fn from_usize(val: usize) -> Self;
}

macro_rules! impl_size_int {
    ($($ty:ty),*) => {
        $(
            impl SizeInt for $ty {
                const MAX_LEN: usize = <$ty>::MAX as usize;

                #[inline]
                fn as_usize(self) -> usize {
                    self as usize
                }

                #[inline]
                fn from_usize(val: usize) -> Self {
                    debug_assert!(val <= Self::MAX_LEN);
                    val as Self
                }
            }
        )*
    };
}

impl_size_int!(u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_size_int {
        ($($ty:ty => $name:ident),*) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(<$ty>::MAX_LEN, <$ty>::MAX as usize);
                    assert_eq!(<$ty>::from_usize(0).as_usize(), 0);
                    assert_eq!(<$ty>::from_usize(100).as_usize(), 100);
                    assert_eq!(<$ty as Default>::default().as_usize(), 0);
                }
            )*
        };
    }

    test_size_int!(
        u8 => u8_round_trip,
        u16 => u16_round_trip,
        u32 => u32_round_trip,
        u64 => u64_round_trip,
        usize => usize_round_trip
    );
}
