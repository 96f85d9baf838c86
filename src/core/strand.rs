//! Strand orientation and strand-aware end selection
//!
//! Every consumer that cares about 5'/3' direction goes through
//! [`Strand::five_prime_end`], [`Strand::three_prime_end`] and
//! [`Strand::orient`] so the rule lives in one place.

use crate::core::bound::Bound;
use crate::core::interval::Interval;

/// Strand orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Strand {
    #[default]
    Plus,
    Minus,
}

impl Strand {
    /// Get the complement strand
    ///
    /// # Examples
    /// ```
    /// use exonmap::core::Strand;
    /// assert_eq!(Strand::Plus.complement(), Strand::Minus);
    /// assert_eq!(Strand::Minus.complement(), Strand::Plus);
    /// ```
    pub fn complement(&self) -> Self {
        match self {
            Strand::Plus => Strand::Minus,
            Strand::Minus => Strand::Plus,
        }
    }

    /// Parse strand from char
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Strand::Plus),
            '-' => Some(Strand::Minus),
            _ => None,
        }
    }

    /// Parse a strand column: `+`/`-` or the numeric `1`/`-1` form
    ///
    /// # Examples
    /// ```
    /// use exonmap::core::Strand;
    /// assert_eq!(Strand::parse("-1"), Some(Strand::Minus));
    /// assert_eq!(Strand::parse("+"), Some(Strand::Plus));
    /// assert_eq!(Strand::parse("."), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "+" | "1" | "+1" => Some(Strand::Plus),
            "-" | "-1" => Some(Strand::Minus),
            _ => None,
        }
    }

    /// Strand from the sign of an integer (`1` or `-1`)
    pub fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            1 => Some(Strand::Plus),
            -1 => Some(Strand::Minus),
            _ => None,
        }
    }

    /// Convert to char
    pub fn to_char(&self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
        }
    }

    /// Combine two strands (feature strand + mapping orientation)
    ///
    /// # Examples
    /// ```
    /// use exonmap::core::Strand;
    /// assert_eq!(Strand::Minus.combine(Strand::Minus), Strand::Plus);
    /// assert_eq!(Strand::Plus.combine(Strand::Minus), Strand::Minus);
    /// ```
    pub fn combine(&self, other: Strand) -> Strand {
        if *self == other {
            Strand::Plus
        } else {
            Strand::Minus
        }
    }

    /// Bound at the 5' end: lower on plus, upper on minus
    pub fn five_prime_end(&self, interval: &Interval) -> Option<Bound> {
        match self {
            Strand::Plus => interval.lower_bound(),
            Strand::Minus => interval.upper_bound(),
        }
    }

    /// Bound at the 3' end: upper on plus, lower on minus
    pub fn three_prime_end(&self, interval: &Interval) -> Option<Bound> {
        self.complement().five_prime_end(interval)
    }

    /// Put items stored in ascending genomic order into 5'→3' order
    pub fn orient<T>(&self, mut items: Vec<T>) -> Vec<T> {
        if *self == Strand::Minus {
            items.reverse();
        }
        items
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strand_complement_involution() {
        assert_eq!(Strand::Plus.complement().complement(), Strand::Plus);
        assert_eq!(Strand::Minus.complement().complement(), Strand::Minus);
    }

    #[test]
    fn test_strand_from_char() {
        assert_eq!(Strand::from_char('+'), Some(Strand::Plus));
        assert_eq!(Strand::from_char('-'), Some(Strand::Minus));
        assert_eq!(Strand::from_char('.'), None);
    }

    #[test]
    fn test_strand_from_sign() {
        assert_eq!(Strand::from_sign(1), Some(Strand::Plus));
        assert_eq!(Strand::from_sign(-1), Some(Strand::Minus));
        assert_eq!(Strand::from_sign(0), None);
    }

    #[test]
    fn test_strand_combine() {
        assert_eq!(Strand::Plus.combine(Strand::Plus), Strand::Plus);
        assert_eq!(Strand::Minus.combine(Strand::Minus), Strand::Plus);
        assert_eq!(Strand::Plus.combine(Strand::Minus), Strand::Minus);
        assert_eq!(Strand::Minus.combine(Strand::Plus), Strand::Minus);
    }

    #[test]
    fn test_strand_display() {
        assert_eq!(format!("{}", Strand::Plus), "+");
        assert_eq!(format!("{}", Strand::Minus), "-");
    }

    #[test]
    fn test_prime_ends() {
        let exon = Interval::closed(100, 200);
        assert_eq!(Strand::Plus.five_prime_end(&exon), Some(Bound::included(100)));
        assert_eq!(Strand::Plus.three_prime_end(&exon), Some(Bound::included(200)));
        assert_eq!(Strand::Minus.five_prime_end(&exon), Some(Bound::included(200)));
        assert_eq!(Strand::Minus.three_prime_end(&exon), Some(Bound::included(100)));
        assert_eq!(Strand::Minus.five_prime_end(&Interval::Empty), None);
    }

    #[test]
    fn test_orient() {
        assert_eq!(Strand::Plus.orient(vec![1, 2, 3]), vec![1, 2, 3]);
        assert_eq!(Strand::Minus.orient(vec![1, 2, 3]), vec![3, 2, 1]);
    }
}
