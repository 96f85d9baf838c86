//! Interval bounds
//!
//! A bound is a position plus a flag saying whether the position itself
//! belongs to the interval. Bounds compare differently depending on
//! whether they sit on the lower or the upper side of an interval.

use std::cmp::Ordering;

/// A scalar position with an open/closed flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bound {
    pub value: i64,
    pub included: bool,
}

impl Bound {
    pub fn new(value: i64, included: bool) -> Self {
        Self { value, included }
    }

    /// Closed bound at `value`
    pub fn included(value: i64) -> Self {
        Self::new(value, true)
    }

    /// Open bound at `value`
    pub fn excluded(value: i64) -> Self {
        Self::new(value, false)
    }

    /// Same position with the inclusion flag flipped
    ///
    /// The flank next to an included bound must exclude that position,
    /// and vice versa.
    ///
    /// # Examples
    /// ```
    /// use exonmap::core::Bound;
    /// assert_eq!(Bound::included(30).inverted(), Bound::excluded(30));
    /// ```
    pub fn inverted(&self) -> Self {
        Self::new(self.value, !self.included)
    }

    /// First integer position admitted when used as a lower bound
    #[inline]
    pub fn first_covered(&self) -> i64 {
        if self.included {
            self.value
        } else {
            self.value.saturating_add(1)
        }
    }

    /// Last integer position admitted when used as an upper bound
    #[inline]
    pub fn last_covered(&self) -> i64 {
        if self.included {
            self.value
        } else {
            self.value.saturating_sub(1)
        }
    }
}

/// Order two bounds used as lower bounds.
///
/// At equal values an included bound admits more points on the left, so
/// it sorts first.
///
/// # Examples
/// ```
/// use exonmap::core::{cmp_lower, Bound};
/// use std::cmp::Ordering;
/// assert_eq!(cmp_lower(Bound::included(5), Bound::excluded(5)), Ordering::Less);
/// assert_eq!(cmp_lower(Bound::excluded(4), Bound::included(5)), Ordering::Less);
/// ```
#[inline]
pub fn cmp_lower(a: Bound, b: Bound) -> Ordering {
    a.value
        .cmp(&b.value)
        .then_with(|| b.included.cmp(&a.included))
}

/// Order two bounds used as upper bounds.
///
/// At equal values an included bound admits more points on the right, so
/// it sorts last.
#[inline]
pub fn cmp_upper(a: Bound, b: Bound) -> Ordering {
    a.value
        .cmp(&b.value)
        .then_with(|| a.included.cmp(&b.included))
}

/// The tighter (larger) of two lower bounds
#[inline]
pub fn max_lower(a: Bound, b: Bound) -> Bound {
    if cmp_lower(a, b) == Ordering::Less {
        b
    } else {
        a
    }
}

/// The tighter (smaller) of two upper bounds
#[inline]
pub fn min_upper(a: Bound, b: Bound) -> Bound {
    if cmp_upper(b, a) == Ordering::Less {
        b
    } else {
        a
    }
}

/// The looser (larger) of two upper bounds
#[inline]
pub fn max_upper(a: Bound, b: Bound) -> Bound {
    if cmp_upper(a, b) == Ordering::Less {
        b
    } else {
        a
    }
}

/// Whether a range running up to `upper` and one starting at `lower`
/// leave no uncovered point between them.
///
/// Two excluded bounds at the same value leave that value out.
#[inline]
pub fn touches(upper: Bound, lower: Bound) -> bool {
    lower.value < upper.value || (lower.value == upper.value && (lower.included || upper.included))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmp_lower_tie_break() {
        assert_eq!(cmp_lower(Bound::included(5), Bound::excluded(5)), Ordering::Less);
        assert_eq!(cmp_lower(Bound::excluded(5), Bound::included(5)), Ordering::Greater);
        assert_eq!(cmp_lower(Bound::excluded(5), Bound::excluded(5)), Ordering::Equal);
    }

    #[test]
    fn test_cmp_upper_tie_break() {
        assert_eq!(cmp_upper(Bound::included(5), Bound::excluded(5)), Ordering::Greater);
        assert_eq!(cmp_upper(Bound::excluded(5), Bound::included(5)), Ordering::Less);
        assert_eq!(cmp_upper(Bound::included(4), Bound::excluded(5)), Ordering::Less);
    }

    #[test]
    fn test_value_dominates_flag() {
        assert_eq!(cmp_lower(Bound::excluded(3), Bound::included(4)), Ordering::Less);
        assert_eq!(cmp_upper(Bound::included(3), Bound::excluded(4)), Ordering::Less);
    }

    #[test]
    fn test_tighter_bounds() {
        assert_eq!(max_lower(Bound::included(5), Bound::excluded(5)), Bound::excluded(5));
        assert_eq!(min_upper(Bound::included(9), Bound::excluded(9)), Bound::excluded(9));
        assert_eq!(max_upper(Bound::included(9), Bound::excluded(9)), Bound::included(9));
    }

    #[test]
    fn test_covered_positions() {
        assert_eq!(Bound::included(10).first_covered(), 10);
        assert_eq!(Bound::excluded(10).first_covered(), 11);
        assert_eq!(Bound::included(10).last_covered(), 10);
        assert_eq!(Bound::excluded(10).last_covered(), 9);
    }

    #[test]
    fn test_touches() {
        assert!(touches(Bound::included(10), Bound::excluded(10)));
        assert!(touches(Bound::excluded(10), Bound::included(10)));
        assert!(!touches(Bound::excluded(10), Bound::excluded(10)));
        assert!(!touches(Bound::included(10), Bound::included(11)));
        assert!(touches(Bound::excluded(12), Bound::excluded(11)));
    }
}
