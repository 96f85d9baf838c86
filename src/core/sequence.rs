//! Sequence retrieval after remapping
//!
//! The mapper hands back a region, an interval and a strand. These helpers
//! turn that into bases through a [`SequenceSource`], reverse-complementing
//! minus-strand results and stitching spliced pieces together in 5'→3'
//! order.

use crate::core::assembly::{RegionId, Remapped, SequenceSource};
use crate::core::genomic::GenomicInterval;
use crate::core::interval::Interval;
use crate::core::Strand;

/// Complement one nucleotide, keeping case; IUPAC codes are paired
#[inline]
pub fn complement_base(base: u8) -> u8 {
    let upper = match base.to_ascii_uppercase() {
        b'A' => b'T',
        b'T' | b'U' => b'A',
        b'G' => b'C',
        b'C' => b'G',
        b'R' => b'Y',
        b'Y' => b'R',
        b'K' => b'M',
        b'M' => b'K',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        // S, W, N and anything unknown map to themselves
        _ => return base,
    };
    if base.is_ascii_lowercase() {
        upper.to_ascii_lowercase()
    } else {
        upper
    }
}

/// Reverse complement in place
///
/// # Examples
/// ```
/// use exonmap::core::sequence::revcomp_inplace;
///
/// let mut seq = b"AACGt".to_vec();
/// revcomp_inplace(&mut seq);
/// assert_eq!(seq, b"aCGTT");
/// ```
pub fn revcomp_inplace(seq: &mut [u8]) {
    seq.reverse();
    for base in seq.iter_mut() {
        *base = complement_base(*base);
    }
}

/// Bases of `interval` on `region`, read on `strand`
///
/// Multi-part intervals are fetched part by part and joined in 5'→3'
/// order, so a spliced transcript comes back as its mature sequence.
pub fn fetch_interval_sequence<Q: SequenceSource>(
    source: &Q,
    region: RegionId,
    interval: &Interval,
    strand: Strand,
) -> Result<Vec<u8>, Q::Error> {
    let mut bases = Vec::with_capacity(interval.measure() as usize);
    for span in GenomicInterval::from_interval(interval) {
        bases.extend(source.fetch_raw_sequence(region, span.start, span.end)?);
    }
    if strand == Strand::Minus {
        revcomp_inplace(&mut bases);
    }
    Ok(bases)
}

/// Bases for a remap result, oriented by its strand
pub fn fetch_oriented_sequence<Q: SequenceSource>(
    source: &Q,
    remapped: &Remapped,
) -> Result<Vec<u8>, Q::Error> {
    fetch_interval_sequence(source, remapped.region, &remapped.interval, remapped.strand)
}
