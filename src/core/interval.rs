//! Interval algebra
//!
//! An [`Interval`] is either empty, a single contiguous range with
//! independently open or closed ends, or a normalized union of such ranges.
//! All operations are total: malformed bounds collapse to
//! [`Interval::Empty`] instead of failing, so intervals can be combined
//! without checking them first.
//!
//! # Example
//!
//! ```
//! use exonmap::core::{make_interval, Interval};
//!
//! let transcript = make_interval(0, 100, true, false);
//! let exon = Interval::closed(23, 42);
//! assert_eq!(transcript.intersection(&exon), exon);
//!
//! let gap = exon.relative_complement(&Interval::closed(0, 100));
//! assert_eq!(gap.measure(), 101 - 20);
//! ```

use crate::core::bound::{
    cmp_lower, cmp_upper, max_lower, max_upper, min_upper, touches, Bound,
};
use crate::core::error::{IntervalError, IntervalResult};
use std::cmp::Ordering;
use std::fmt;

/// A single contiguous range
///
/// Either `lower.value < upper.value`, or both values are equal and both
/// bounds are included (a single point). Anything else is not
/// representable and becomes [`Interval::Empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimpleInterval {
    lower: Bound,
    upper: Bound,
}

impl SimpleInterval {
    /// Build a range, or `None` when the bounds collapse or invert
    pub fn new(lower: Bound, upper: Bound) -> Option<Self> {
        let valid = lower.value < upper.value
            || (lower.value == upper.value && lower.included && upper.included);
        valid.then_some(Self { lower, upper })
    }

    pub fn lower(&self) -> Bound {
        self.lower
    }

    pub fn upper(&self) -> Bound {
        self.upper
    }

    /// Number of integer positions covered
    pub fn measure(&self) -> u64 {
        let first = self.lower.first_covered();
        let last = self.upper.last_covered();
        if last < first {
            0
        } else {
            last.abs_diff(first).saturating_add(1)
        }
    }

    /// Distance between the two bound values
    pub fn length(&self) -> u64 {
        self.upper.value.abs_diff(self.lower.value)
    }

    /// Whether integer `position` lies inside the range
    #[inline]
    pub fn contains(&self, position: i64) -> bool {
        position >= self.lower.first_covered() && position <= self.upper.last_covered()
    }

    fn intersect(&self, other: &SimpleInterval) -> Interval {
        Interval::from_bounds(
            max_lower(self.lower, other.lower),
            min_upper(self.upper, other.upper),
        )
    }

    /// The parts of `outer` left and right of `self`
    ///
    /// Inclusion flags flip at the shared boundary.
    fn flanks_within(&self, outer: &SimpleInterval) -> [Interval; 2] {
        let left = Interval::from_bounds(
            outer.lower,
            min_upper(outer.upper, self.lower.inverted()),
        );
        let right = Interval::from_bounds(
            max_lower(outer.lower, self.upper.inverted()),
            outer.upper,
        );
        [left, right]
    }
}

impl fmt::Display for SimpleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.lower.included { '[' } else { '(' };
        let close = if self.upper.included { ']' } else { ')' };
        write!(f, "{}{}, {}{}", open, self.lower.value, self.upper.value, close)
    }
}

/// Two or more sorted, pairwise disjoint ranges with gaps between them
///
/// Only the merge routine builds these, so the invariant always holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MultiInterval {
    parts: Vec<SimpleInterval>,
}

impl MultiInterval {
    pub fn parts(&self) -> &[SimpleInterval] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether there are no parts
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// An interval over integer positions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Interval {
    /// Identity for union, absorbing for intersection
    #[default]
    Empty,
    /// One contiguous range
    Simple(SimpleInterval),
    /// A normalized union of disjoint ranges
    Multi(MultiInterval),
}

/// Build an interval from raw bound values and flags
///
/// Returns [`Interval::Empty`] when `upper < lower`, or when the values
/// are equal and either bound is excluded.
///
/// # Examples
/// ```
/// use exonmap::core::make_interval;
///
/// assert!(make_interval(10, 10, false, false).is_empty());
/// assert_eq!(make_interval(10, 10, true, true).measure(), 1);
/// assert!(make_interval(20, 10, true, true).is_empty());
/// ```
pub fn make_interval(
    lower_value: i64,
    upper_value: i64,
    lower_included: bool,
    upper_included: bool,
) -> Interval {
    Interval::from_bounds(
        Bound::new(lower_value, lower_included),
        Bound::new(upper_value, upper_included),
    )
}

impl Interval {
    /// Normalize a pair of bounds
    pub fn from_bounds(lower: Bound, upper: Bound) -> Self {
        match SimpleInterval::new(lower, upper) {
            Some(simple) => Interval::Simple(simple),
            None => Interval::Empty,
        }
    }

    /// Closed range `[lower, upper]`
    pub fn closed(lower: i64, upper: i64) -> Self {
        make_interval(lower, upper, true, true)
    }

    /// Half-open range `[lower, upper)`
    pub fn half_open(lower: i64, upper: i64) -> Self {
        make_interval(lower, upper, true, false)
    }

    /// Single point `[position, position]`
    pub fn point(position: i64) -> Self {
        Self::closed(position, position)
    }

    /// Merge any collection of intervals into normalized form
    ///
    /// Empties are dropped, the remaining ranges sorted by lower bound and
    /// fused in one left-to-right pass wherever they overlap or touch.
    ///
    /// # Examples
    /// ```
    /// use exonmap::core::Interval;
    ///
    /// let merged = Interval::from_parts([
    ///     Interval::closed(5, 13),
    ///     Interval::closed(50, 60),
    ///     Interval::closed(70, 90),
    ///     Interval::closed(65, 70),
    /// ]);
    /// let expected = Interval::closed(5, 13).union(&Interval::closed(50, 90));
    /// assert_eq!(merged.parts(), expected.parts());
    /// ```
    pub fn from_parts<I>(intervals: I) -> Self
    where
        I: IntoIterator<Item = Interval>,
    {
        let mut simples = Vec::new();
        for interval in intervals {
            simples.extend_from_slice(interval.parts());
        }
        Self::merge(simples)
    }

    fn merge(mut simples: Vec<SimpleInterval>) -> Self {
        simples.sort_by(|a, b| cmp_lower(a.lower, b.lower));

        let mut merged: Vec<SimpleInterval> = Vec::with_capacity(simples.len());
        for next in simples {
            match merged.last_mut() {
                Some(running) if touches(running.upper, next.lower) => {
                    running.upper = max_upper(running.upper, next.upper);
                }
                _ => merged.push(next),
            }
        }

        match merged.as_slice() {
            [] => Interval::Empty,
            [single] => Interval::Simple(*single),
            _ => Interval::Multi(MultiInterval { parts: merged }),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Interval::Empty)
    }

    /// The contiguous ranges making up this interval, in ascending order
    pub fn parts(&self) -> &[SimpleInterval] {
        match self {
            Interval::Empty => &[],
            Interval::Simple(simple) => std::slice::from_ref(simple),
            Interval::Multi(multi) => &multi.parts,
        }
    }

    /// Lowest bound, `None` for the empty interval
    pub fn lower_bound(&self) -> Option<Bound> {
        self.parts().first().map(|p| p.lower)
    }

    /// Highest bound, `None` for the empty interval
    pub fn upper_bound(&self) -> Option<Bound> {
        self.parts().last().map(|p| p.upper)
    }

    /// Smallest simple interval containing every part
    pub fn hull(&self) -> Interval {
        match (self.lower_bound(), self.upper_bound()) {
            (Some(lower), Some(upper)) => Interval::from_bounds(lower, upper),
            _ => Interval::Empty,
        }
    }

    fn bounds(&self) -> IntervalResult<(Bound, Bound)> {
        match (self.lower_bound(), self.upper_bound()) {
            (Some(lower), Some(upper)) => Ok((lower, upper)),
            _ => Err(IntervalError::Empty),
        }
    }

    /// Both intervals start at the same bound (value and flag)
    pub fn lower_equal(&self, other: &Interval) -> IntervalResult<bool> {
        Ok(cmp_lower(self.bounds()?.0, other.bounds()?.0) == Ordering::Equal)
    }

    /// `self` admits points further left than `other`
    pub fn lower_less(&self, other: &Interval) -> IntervalResult<bool> {
        Ok(cmp_lower(self.bounds()?.0, other.bounds()?.0) == Ordering::Less)
    }

    /// `other` admits points further right than `self`
    pub fn upper_less(&self, other: &Interval) -> IntervalResult<bool> {
        Ok(cmp_upper(self.bounds()?.1, other.bounds()?.1) == Ordering::Less)
    }

    /// Both intervals end at the same bound (value and flag)
    pub fn upper_equal(&self, other: &Interval) -> IntervalResult<bool> {
        Ok(cmp_upper(self.bounds()?.1, other.bounds()?.1) == Ordering::Equal)
    }

    /// Points covered by both operands
    pub fn intersection(&self, other: &Interval) -> Interval {
        match (self, other) {
            (Interval::Empty, _) | (_, Interval::Empty) => Interval::Empty,
            (Interval::Simple(a), Interval::Simple(b)) => a.intersect(b),
            (Interval::Multi(multi), rest) | (rest, Interval::Multi(multi)) => {
                // union of (part ∩ rest) over every part
                Interval::from_parts(
                    multi
                        .parts
                        .iter()
                        .map(|part| Interval::Simple(*part).intersection(rest)),
                )
            }
        }
    }

    /// Points covered by either operand
    ///
    /// Overlapping or touching ranges fuse; each outer bound keeps the flag
    /// of the operand that supplied it.
    pub fn union(&self, other: &Interval) -> Interval {
        match (self, other) {
            (Interval::Empty, only) | (only, Interval::Empty) => only.clone(),
            _ => Self::merge(self.parts().iter().chain(other.parts()).copied().collect()),
        }
    }

    /// The part of `outer` not covered by `self`
    pub fn relative_complement(&self, outer: &Interval) -> Interval {
        match self {
            Interval::Empty => outer.clone(),
            Interval::Simple(inner) => Interval::from_parts(
                outer.parts().iter().flat_map(|part| inner.flanks_within(part)),
            ),
            Interval::Multi(multi) => multi.parts.iter().fold(outer.clone(), |rest, part| {
                rest.intersection(&Interval::Simple(*part).relative_complement(outer))
            }),
        }
    }

    /// Whether every point of `self` lies in `sup`
    ///
    /// Normalized intervals are canonical, so comparing the intersection
    /// structurally is exact. The empty interval is a subset of anything.
    pub fn subset(&self, sup: &Interval) -> bool {
        self.intersection(sup) == *self
    }

    /// Number of integer positions covered
    ///
    /// Saturates at `u64::MAX` for intervals spanning the whole `i64` range.
    pub fn measure(&self) -> u64 {
        self.parts()
            .iter()
            .fold(0u64, |total, part| total.saturating_add(part.measure()))
    }

    /// Sum of the bound-to-bound extents of all parts
    pub fn length(&self) -> u64 {
        self.parts()
            .iter()
            .fold(0u64, |total, part| total.saturating_add(part.length()))
    }

    /// Whether integer `position` is covered
    pub fn contains(&self, position: i64) -> bool {
        self.parts().iter().any(|part| part.contains(position))
    }

    /// Move every bound by `delta`, saturating at the ends of `i64`
    pub fn shifted(&self, delta: i64) -> Interval {
        self.map_parts(|part| {
            Interval::from_bounds(
                Bound::new(part.lower.value.saturating_add(delta), part.lower.included),
                Bound::new(part.upper.value.saturating_add(delta), part.upper.included),
            )
        })
    }

    /// Mirror every bound `v` to `axis_sum - v`
    ///
    /// Lower and upper bounds swap roles, each keeping its flag.
    pub fn reflected(&self, axis_sum: i64) -> Interval {
        self.map_parts(|part| {
            Interval::from_bounds(
                Bound::new(axis_sum.saturating_sub(part.upper.value), part.upper.included),
                Bound::new(axis_sum.saturating_sub(part.lower.value), part.lower.included),
            )
        })
    }

    fn map_parts<F>(&self, f: F) -> Interval
    where
        F: Fn(&SimpleInterval) -> Interval,
    {
        Interval::from_parts(self.parts().iter().map(f))
    }
}

impl From<SimpleInterval> for Interval {
    fn from(simple: SimpleInterval) -> Self {
        Interval::Simple(simple)
    }
}

impl FromIterator<Interval> for Interval {
    fn from_iter<T: IntoIterator<Item = Interval>>(iter: T) -> Self {
        Interval::from_parts(iter)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::Empty => write!(f, "∅"),
            _ => {
                for (i, part) in self.parts().iter().enumerate() {
                    if i > 0 {
                        write!(f, " U ")?;
                    }
                    write!(f, "{}", part)?;
                }
                Ok(())
            }
        }
    }
}
