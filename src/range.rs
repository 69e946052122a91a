//! Inclusive numeric intervals.
//!
//! A [`Range`] is a plain `{min, max}` pair. The constructor does **not** reorder or reject
//! its bounds: callers pass already-ordered values and [`Range::is_ordered`] is checked during
//! input validation (see [`crate::input`]).
//!
//! # Examples
//! ```
//! use primerpair::range::Range;
//! let primer = Range::new(18, 25);
//! assert!(primer.contains(18) && primer.contains(25));
//! assert!(!primer.contains(26));
//! assert!(primer.is_subset_of(&Range::new(10, 30)));
//! ```
use core::fmt;

/// Closed interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Range<T> {
    min: T,
    max: T,
}

impl<T: Copy + PartialOrd> Range<T> {
    /// Build a range from already-ordered bounds.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn min(&self) -> T {
        self.min
    }

    #[inline]
    pub fn max(&self) -> T {
        self.max
    }

    /// `min <= value <= max`.
    #[inline]
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// `true` if every value of `self` is also inside `other`.
    #[inline]
    pub fn is_subset_of(&self, other: &Range<T>) -> bool {
        self.max <= other.max && self.min >= other.min
    }

    /// `true` when `min <= max`. Always `false` if either bound is NaN.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

impl Range<usize> {
    /// Number of integers covered by the range (0 when unordered).
    pub fn len(&self) -> usize {
        if self.max >= self.min { self.max - self.min + 1 } else { 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate every integer in the range, low to high.
    pub fn iter(&self) -> core::ops::RangeInclusive<usize> {
        self.min..=self.max
    }
}

impl Range<f64> {
    /// Unbounded in both directions; accepts every finite value.
    pub const UNBOUNDED: Range<f64> = Range { min: f64::NEG_INFINITY, max: f64::INFINITY };

    /// Both bounds are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

impl<T: fmt::Display> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_at_both_ends() {
        for (a, b) in [(0i64, 0i64), (3, 9), (-5, 5), (100, 1000)] {
            let r = Range::new(a, b);
            assert!(r.contains(a));
            assert!(r.contains(b));
            assert!(!r.contains(a - 1));
            assert!(!r.contains(b + 1));
        }
    }

    #[test]
    fn subset_requires_both_bounds_inside() {
        let outer = Range::new(10, 20);
        assert!(Range::new(10, 20).is_subset_of(&outer));
        assert!(Range::new(12, 18).is_subset_of(&outer));
        assert!(!Range::new(9, 18).is_subset_of(&outer));
        assert!(!Range::new(12, 21).is_subset_of(&outer));
    }

    #[test]
    fn constructor_keeps_unordered_bounds() {
        let r = Range::new(9usize, 3usize);
        assert_eq!((r.min(), r.max()), (9, 3));
        assert!(!r.is_ordered());
        assert!(r.is_empty());
        assert!(!r.contains(5));
    }

    #[test]
    fn float_ranges() {
        let tm = Range::new(55.0, 65.0);
        assert!(tm.contains(55.0) && tm.contains(65.0));
        assert!(!tm.contains(65.01));
        assert!(Range::<f64>::UNBOUNDED.contains(-1e300));
        assert!(!Range::new(f64::NAN, 1.0).is_ordered());
        assert!(!Range::<f64>::UNBOUNDED.is_finite());
    }

    #[test]
    fn usize_len_and_iter() {
        let r = Range::new(20usize, 25usize);
        assert_eq!(r.len(), 6);
        assert_eq!(r.iter().collect::<Vec<_>>(), vec![20, 21, 22, 23, 24, 25]);
        assert_eq!(r.to_string(), "20..=25");
    }
}
