//! Positional navigation inside an interval
//!
//! Treats an interval as the ordered list of integer positions it covers,
//! skipping the gaps of a multi-interval. This is what splicing needs:
//! offset `n` into a transcript is the n-th covered exon position.

use crate::core::error::{IntervalError, IntervalResult};
use crate::core::interval::Interval;

impl Interval {
    /// The `n`-th covered position (0-based, ascending)
    ///
    /// # Examples
    /// ```
    /// use exonmap::core::Interval;
    ///
    /// let spliced = Interval::from_parts([Interval::closed(10, 12), Interval::closed(20, 22)]);
    /// assert_eq!(spliced.nth_element(0), Ok(10));
    /// assert_eq!(spliced.nth_element(3), Ok(20));
    /// assert!(spliced.nth_element(6).is_err());
    /// ```
    pub fn nth_element(&self, n: u64) -> IntervalResult<i64> {
        let out_of_range = || IntervalError::OutOfRange {
            index: n,
            measure: self.measure(),
        };
        let mut remaining = n;
        for part in self.parts() {
            let size = part.measure();
            if remaining < size {
                return part
                    .lower()
                    .first_covered()
                    .checked_add_unsigned(remaining)
                    .ok_or_else(out_of_range);
            }
            remaining -= size;
        }
        Err(out_of_range())
    }

    /// How many covered positions precede `position`, if it is covered
    pub fn index_of(&self, position: i64) -> Option<u64> {
        let mut before = 0u64;
        for part in self.parts() {
            if part.contains(position) {
                let offset = position.abs_diff(part.lower().first_covered());
                return Some(before.saturating_add(offset));
            }
            before = before.saturating_add(part.measure());
        }
        None
    }

    /// Walk `steps` covered positions forward from `start`
    ///
    /// Returns `Ok(None)` when the walk runs past the last covered
    /// position, and an error when `start` itself is not covered.
    pub fn advance(&self, start: i64, steps: u64) -> IntervalResult<Option<i64>> {
        let rank = self
            .index_of(start)
            .ok_or(IntervalError::NotCovered { position: start })?;
        let target = match rank.checked_add(steps) {
            Some(target) if target < self.measure() => target,
            _ => return Ok(None),
        };
        self.nth_element(target).map(Some)
    }

    /// Covered positions from `start` onwards, `count` of them at most
    ///
    /// Used to carve a fixed-length piece out of a spliced interval; the
    /// result keeps the gaps of `self`.
    pub fn subinterval(&self, start: i64, count: u64) -> IntervalResult<Interval> {
        if count == 0 {
            return Ok(Interval::Empty);
        }
        let rank = self
            .index_of(start)
            .ok_or(IntervalError::NotCovered { position: start })?;
        let last_rank = rank.saturating_add(count - 1).min(self.measure() - 1);
        let end = self.nth_element(last_rank)?;
        Ok(self.intersection(&Interval::closed(start, end)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interval::make_interval;

    fn spliced() -> Interval {
        Interval::from_parts([
            Interval::closed(100, 104),
            Interval::closed(200, 202),
            Interval::closed(300, 309),
        ])
    }

    #[test]
    fn test_nth_element_simple() {
        let a = Interval::closed(10, 19);
        assert_eq!(a.nth_element(0), Ok(10));
        assert_eq!(a.nth_element(9), Ok(19));
        assert_eq!(
            a.nth_element(10),
            Err(IntervalError::OutOfRange { index: 10, measure: 10 })
        );
    }

    #[test]
    fn test_nth_element_open_lower() {
        let a = make_interval(10, 19, false, true);
        assert_eq!(a.nth_element(0), Ok(11));
    }

    #[test]
    fn test_nth_element_multi() {
        let s = spliced();
        assert_eq!(s.nth_element(4), Ok(104));
        assert_eq!(s.nth_element(5), Ok(200));
        assert_eq!(s.nth_element(8), Ok(300));
        assert_eq!(s.nth_element(17), Ok(309));
        assert!(s.nth_element(18).is_err());
        assert!(Interval::Empty.nth_element(0).is_err());
    }

    #[test]
    fn test_index_of_inverts_nth_element() {
        let s = spliced();
        for n in 0..s.measure() {
            let position = s.nth_element(n).unwrap();
            assert_eq!(s.index_of(position), Some(n));
        }
        assert_eq!(s.index_of(150), None);
    }

    #[test]
    fn test_advance_skips_gaps() {
        let s = spliced();
        assert_eq!(s.advance(103, 0), Ok(Some(103)));
        assert_eq!(s.advance(103, 2), Ok(Some(200)));
        assert_eq!(s.advance(103, 5), Ok(Some(300)));
        assert_eq!(s.advance(103, 14), Ok(Some(309)));
        assert_eq!(s.advance(103, 15), Ok(None));
        assert_eq!(
            s.advance(150, 1),
            Err(IntervalError::NotCovered { position: 150 })
        );
    }

    #[test]
    fn test_subinterval_first_bases() {
        let s = spliced();
        let first_seven = s.subinterval(100, 7).unwrap();
        assert_eq!(first_seven.measure(), 7);
        assert_eq!(
            first_seven,
            Interval::from_parts([Interval::closed(100, 104), Interval::closed(200, 201)])
        );
    }

    #[test]
    fn test_subinterval_clipped_at_end() {
        let s = spliced();
        assert_eq!(s.subinterval(305, 100).unwrap(), Interval::closed(305, 309));
        assert!(s.subinterval(305, 0).unwrap().is_empty());
        assert!(s.subinterval(99, 3).is_err());
    }

    #[test]
    fn test_navigation_across_full_range() {
        let a = Interval::closed(i64::MIN, i64::MAX);
        assert_eq!(a.nth_element(0), Ok(i64::MIN));
        assert_eq!(a.nth_element(u64::MAX - 1), Ok(i64::MAX - 1));
        assert_eq!(a.index_of(i64::MAX - 1), Some(u64::MAX - 1));
        assert_eq!(a.advance(i64::MIN, u64::MAX - 1), Ok(Some(i64::MAX - 1)));
    }
}
