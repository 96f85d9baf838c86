//! Amino-acid ↔ nucleotide coordinate conversion
//!
//! Both coordinate systems are 1-based. Amino acid `p` occupies
//! nucleotides `3(p-1)+1 ..= 3(p-1)+3`.

use crate::core::interval::Interval;

/// First nucleotide of the codon for amino acid `aa`
///
/// # Examples
/// ```
/// use exonmap::core::aa_to_nt;
/// assert_eq!(aa_to_nt(1, 0), 1);
/// assert_eq!(aa_to_nt(3, 0), 7);
/// assert_eq!(aa_to_nt(3, 10), 17);
/// ```
#[inline]
pub fn aa_to_nt(aa: i64, offset: i64) -> i64 {
    3 * (aa - 1) + 1 + offset
}

/// Amino acid containing nucleotide `nt`, plus the position within the codon
///
/// The remainder is 0, 1 or 2.
///
/// # Examples
/// ```
/// use exonmap::core::nt_to_aa;
/// assert_eq!(nt_to_aa(1, 0), (1, 0));
/// assert_eq!(nt_to_aa(8, 0), (3, 1));
/// ```
#[inline]
pub fn nt_to_aa(nt: i64, offset: i64) -> (i64, i64) {
    let shifted = nt - 1;
    (offset + shifted.div_euclid(3) + 1, shifted.rem_euclid(3))
}

/// An amino-acid interval lifted from nucleotides, with the codon
/// remainders left over at each end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AaInterval {
    pub interval: Interval,
    /// Codon position of the first covered nucleotide
    pub lower_remainder: i64,
    /// Codon position of the last covered nucleotide
    pub upper_remainder: i64,
}

/// Nucleotides covered by an amino-acid interval
///
/// Each part `[a, b]` becomes `[aa_to_nt(a), aa_to_nt(b) + 2]` so the last
/// codon is covered completely.
pub fn aa_interval_to_nt(interval: &Interval, offset: i64) -> Interval {
    interval
        .parts()
        .iter()
        .map(|part| {
            Interval::closed(
                aa_to_nt(part.lower().first_covered(), offset),
                aa_to_nt(part.upper().last_covered(), offset) + 2,
            )
        })
        .collect()
}

/// Amino acids touched by a nucleotide interval
///
/// Returns `None` when the interval covers no position.
pub fn nt_interval_to_aa(interval: &Interval, offset: i64) -> Option<AaInterval> {
    if interval.measure() == 0 {
        return None;
    }
    let lifted: Interval = interval
        .parts()
        .iter()
        .filter(|part| part.measure() > 0)
        .map(|part| {
            let (first, _) = nt_to_aa(part.lower().first_covered(), offset);
            let (last, _) = nt_to_aa(part.upper().last_covered(), offset);
            Interval::closed(first, last)
        })
        .collect();

    let (_, lower_remainder) = nt_to_aa(interval.nth_element(0).ok()?, offset);
    let (_, upper_remainder) = nt_to_aa(interval.nth_element(interval.measure() - 1).ok()?, offset);

    Some(AaInterval {
        interval: lifted,
        lower_remainder,
        upper_remainder,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interval::make_interval;

    #[test]
    fn test_aa_to_nt() {
        assert_eq!(aa_to_nt(1, 0), 1);
        assert_eq!(aa_to_nt(2, 0), 4);
        assert_eq!(aa_to_nt(3, 0), 7);
    }

    #[test]
    fn test_nt_to_aa_remainders() {
        assert_eq!(nt_to_aa(7, 0), (3, 0));
        assert_eq!(nt_to_aa(8, 0), (3, 1));
        assert_eq!(nt_to_aa(9, 0), (3, 2));
        assert_eq!(nt_to_aa(10, 0), (4, 0));
        assert_eq!(nt_to_aa(10, 5), (9, 0));
    }

    #[test]
    fn test_round_trip() {
        for p in 1..500 {
            assert_eq!(nt_to_aa(aa_to_nt(p, 0), 0), (p, 0));
        }
    }

    #[test]
    fn test_aa_interval_to_nt_covers_last_codon() {
        assert_eq!(aa_interval_to_nt(&Interval::closed(2, 4), 0), Interval::closed(4, 12));
        assert_eq!(aa_interval_to_nt(&Interval::point(1), 0), Interval::closed(1, 3));
        assert!(aa_interval_to_nt(&Interval::Empty, 0).is_empty());
    }

    #[test]
    fn test_nt_interval_to_aa() {
        let lifted = nt_interval_to_aa(&Interval::closed(5, 13), 0).unwrap();
        assert_eq!(lifted.interval, Interval::closed(2, 5));
        assert_eq!(lifted.lower_remainder, 1);
        assert_eq!(lifted.upper_remainder, 0);

        assert!(nt_interval_to_aa(&Interval::Empty, 0).is_none());
        assert!(nt_interval_to_aa(&make_interval(3, 4, false, false), 0).is_none());
    }

    #[test]
    fn test_interval_round_trip() {
        let aa = Interval::closed(10, 20);
        let lifted = nt_interval_to_aa(&aa_interval_to_nt(&aa, 0), 0).unwrap();
        assert_eq!(lifted.interval, aa);
        assert_eq!((lifted.lower_remainder, lifted.upper_remainder), (0, 2));
    }
}
