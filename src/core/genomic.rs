//! Closed start/end presentation used at the data-access boundary
//!
//! Databases hand out 1-based inclusive `start`/`end` pairs. A
//! [`GenomicInterval`] carries exactly that, and converts to and from the
//! flagged bounds of [`SimpleInterval`].

use crate::core::interval::{Interval, SimpleInterval};
use std::fmt;

/// Inclusive `start..=end` range with plain integer ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenomicInterval {
    pub start: i64,
    pub end: i64,
}

impl GenomicInterval {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Closed presentation of a simple interval
    ///
    /// An excluded lower bound moves up by one, an excluded upper bound
    /// down by one. `None` when no integer position is covered.
    ///
    /// # Examples
    /// ```
    /// use exonmap::core::{make_interval, GenomicInterval};
    ///
    /// let open = make_interval(10, 20, false, false);
    /// let closed = GenomicInterval::from_simple(&open.parts()[0]).unwrap();
    /// assert_eq!(closed, GenomicInterval::new(11, 19));
    /// ```
    pub fn from_simple(simple: &SimpleInterval) -> Option<Self> {
        let start = simple.lower().first_covered();
        let end = simple.upper().last_covered();
        (start <= end).then_some(Self { start, end })
    }

    /// One closed range per covered part, in ascending order
    pub fn from_interval(interval: &Interval) -> Vec<Self> {
        interval.parts().iter().filter_map(Self::from_simple).collect()
    }

    /// Back to the algebra; empty when `end < start`
    pub fn to_interval(&self) -> Interval {
        Interval::closed(self.start, self.end)
    }

    /// Number of positions covered
    pub fn len(&self) -> u64 {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start + 1) as u64
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

impl From<GenomicInterval> for Interval {
    fn from(genomic: GenomicInterval) -> Self {
        genomic.to_interval()
    }
}

impl fmt::Display for GenomicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
