//! Capacity growth policies for the growable storages.
//!
//! A policy maps the current capacity to the next one when an insertion
//! finds the sequence full. Every policy makes strict progress: the result
//! is always greater than the input, so growth loops terminate.
//!
//! The exponential factor is a rational `NUM / DEN` rather than a float;
//! `Exponential<3, 2>` grows by 1.5x the way `Amortized` does, while
//! `Exponential<2, 1>` doubles.

/// Maps the current capacity to the next one.
pub trait Growth {
    /// Returns the capacity to reallocate to. Strictly greater than
    /// `current`.
    fn next_capacity(current: usize) -> usize;
}

/// Grows by a fixed number of elements per reallocation.
///
/// Suits workloads with a known, modest upper bound where exponential
/// over-allocation is unwelcome.
pub struct Linear<const STEP: usize = 1>;

impl<const STEP: usize> Linear<STEP> {
    const STEP_NONZERO: () = assert!(STEP > 0, "linear growth step must be at least 1");
}

impl<const STEP: usize> Growth for Linear<STEP> {
    #[inline]
    fn next_capacity(current: usize) -> usize {
        let () = Self::STEP_NONZERO;
        current + STEP
    }
}

/// Grows by the rational factor `NUM / DEN`, by at least `STEP` elements.
pub struct Exponential<const NUM: usize = 3, const DEN: usize = 2, const STEP: usize = 1>;

impl<const NUM: usize, const DEN: usize, const STEP: usize> Exponential<NUM, DEN, STEP> {
    const FACTOR_ABOVE_ONE: () = assert!(
        NUM > DEN && DEN > 0,
        "exponential growth factor must be greater than 1"
    );
    const STEP_NONZERO: () = assert!(STEP > 0, "exponential growth step must be at least 1");
}

impl<const NUM: usize, const DEN: usize, const STEP: usize> Growth for Exponential<NUM, DEN, STEP> {
    #[inline]
    fn next_capacity(current: usize) -> usize {
        let () = Self::FACTOR_ABOVE_ONE;
        let () = Self::STEP_NONZERO;
        // widen to avoid overflow in the multiply
        let raise = ((current as u128 * (NUM - DEN) as u128) / DEN as u128) as usize;
        current + raise.max(STEP)
    }
}

/// Grows the way `std::vec::Vec` tends to: half again the current capacity,
/// at least one element.
pub struct Amortized;

impl Growth for Amortized {
    #[inline]
    fn next_capacity(current: usize) -> usize {
        current + (current / 2).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_steps() {
        assert_eq!(<Linear<1>>::next_capacity(0), 1);
        assert_eq!(<Linear<1>>::next_capacity(5), 6);
        assert_eq!(<Linear<16>>::next_capacity(16), 32);
    }

    #[test]
    fn exponential_three_halves() {
        assert_eq!(<Exponential<3, 2>>::next_capacity(0), 1);
        assert_eq!(<Exponential<3, 2>>::next_capacity(1), 2);
        assert_eq!(<Exponential<3, 2>>::next_capacity(4), 6);
        assert_eq!(<Exponential<3, 2>>::next_capacity(6), 9);
        assert_eq!(<Exponential<3, 2>>::next_capacity(9), 13);
    }

    #[test]
    fn exponential_doubling() {
        assert_eq!(<Exponential<2, 1>>::next_capacity(8), 16);
        assert_eq!(<Exponential<2, 1>>::next_capacity(16), 32);
    }

    #[test]
    fn exponential_minimum_step() {
        // a tiny factor still makes progress
        assert_eq!(<Exponential<101, 100>>::next_capacity(10), 11);
        assert_eq!(<Exponential<101, 100, 8>>::next_capacity(10), 18);
    }

    #[test]
    fn amortized_sequence() {
        let mut cap = 0;
        let mut seen = Vec::new();
        for _ in 0..8 {
            cap = Amortized::next_capacity(cap);
            seen.push(cap);
        }
        assert_eq!(seen, [1, 2, 3, 4, 6, 9, 13, 19]);
    }

    #[test]
    fn growth_is_strict() {
        for cap in [0usize, 1, 2, 7, 100, 12345] {
            assert!(<Linear<1>>::next_capacity(cap) > cap);
            assert!(<Exponential<3, 2>>::next_capacity(cap) > cap);
            assert!(Amortized::next_capacity(cap) > cap);
        }
    }
}
