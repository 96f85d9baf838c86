//! Spliced transcripts
//!
//! A transcript is the union of its exons, read 5'→3'. On the minus strand
//! that means walking the exon list from the highest coordinate down, so
//! every offset here goes through the strand before it touches the
//! interval.

use crate::core::assembly::RegionId;
use crate::core::convert::{aa_interval_to_nt, nt_to_aa};
use crate::core::error::{IntervalError, IntervalResult};
use crate::core::genomic::GenomicInterval;
use crate::core::interval::Interval;
use crate::core::Strand;

/// Exons of one transcript on one sequence region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplicedTranscript {
    region: RegionId,
    strand: Strand,
    /// 5'→3' order
    exons: Vec<GenomicInterval>,
    spliced: Interval,
}

impl SplicedTranscript {
    /// Build from exon coordinates in any order
    ///
    /// Exons covering no position are dropped. Overlapping exons fuse in
    /// the spliced interval but stay separate in [`exons`](Self::exons).
    pub fn new<I>(region: RegionId, strand: Strand, exons: I) -> Self
    where
        I: IntoIterator<Item = GenomicInterval>,
    {
        let mut sorted: Vec<GenomicInterval> =
            exons.into_iter().filter(|e| !e.is_empty()).collect();
        sorted.sort();
        let spliced = sorted.iter().map(GenomicInterval::to_interval).collect();
        Self {
            region,
            strand,
            exons: strand.orient(sorted),
            spliced,
        }
    }

    pub fn region(&self) -> RegionId {
        self.region
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Exons in 5'→3' order
    pub fn exons(&self) -> &[GenomicInterval] {
        &self.exons
    }

    /// Covered genomic positions
    pub fn spliced(&self) -> &Interval {
        &self.spliced
    }

    /// First exon start to last exon end
    pub fn hull(&self) -> Interval {
        self.spliced.hull()
    }

    /// Genomic position of the first transcribed base
    pub fn start_site(&self) -> Option<i64> {
        self.strand.five_prime_end(&self.spliced).map(|b| b.value)
    }

    /// Genomic position of the last transcribed base
    pub fn end_site(&self) -> Option<i64> {
        self.strand.three_prime_end(&self.spliced).map(|b| b.value)
    }

    /// Number of bases in the mature transcript
    pub fn spliced_length(&self) -> u64 {
        self.spliced.measure()
    }

    /// Gaps between exons as a single interval
    pub fn intron_interval(&self) -> Interval {
        self.spliced.relative_complement(&self.hull())
    }

    /// Introns in 5'→3' order
    pub fn introns(&self) -> Vec<GenomicInterval> {
        self.strand
            .orient(GenomicInterval::from_interval(&self.intron_interval()))
    }

    /// Genomic position of transcript offset `offset` (0-based from the 5' end)
    pub fn genomic_position(&self, offset: u64) -> IntervalResult<i64> {
        oriented_nth(&self.spliced, self.strand, offset)
    }

    /// Transcript offset (0-based from the 5' end) of a genomic position
    pub fn transcript_offset(&self, position: i64) -> Option<u64> {
        oriented_index(&self.spliced, self.strand, position)
    }

    /// Genomic pieces of transcript offsets `first..=last`
    pub fn transcript_range(&self, first: u64, last: u64) -> IntervalResult<Interval> {
        oriented_range(&self.spliced, self.strand, first, last)
    }

    /// The first `count` bases from the 5' end, as genomic pieces
    ///
    /// Shorter transcripts come back whole.
    pub fn leading_bases(&self, count: u64) -> IntervalResult<Interval> {
        let available = count.min(self.spliced_length());
        if available == 0 {
            return Ok(Interval::Empty);
        }
        let range = self.transcript_range(0, available - 1)?;
        match range.lower_bound() {
            Some(lower) => self.spliced.subinterval(lower.first_covered(), available),
            None => Ok(Interval::Empty),
        }
    }

    /// Everything outside the coding region
    pub fn non_coding(&self, cds: &Interval) -> Interval {
        cds.hull().relative_complement(&self.spliced)
    }

    /// Split the non-coding part into (5' UTR, 3' UTR)
    ///
    /// Both are empty when `cds` is empty.
    pub fn utr_regions(&self, cds: &Interval) -> (Interval, Interval) {
        let coding = cds.hull();
        let (Some(cds_lower), Some(cds_upper)) = (coding.lower_bound(), coding.upper_bound()) else {
            return (Interval::Empty, Interval::Empty);
        };
        let (Some(lower), Some(upper)) = (self.spliced.lower_bound(), self.spliced.upper_bound())
        else {
            return (Interval::Empty, Interval::Empty);
        };

        let below = self
            .spliced
            .intersection(&Interval::from_bounds(lower, cds_lower.inverted()));
        let above = self
            .spliced
            .intersection(&Interval::from_bounds(cds_upper.inverted(), upper));

        let mut ordered = self.strand.orient(vec![below, above]).into_iter();
        let five_prime = ordered.next().unwrap_or_default();
        let three_prime = ordered.next().unwrap_or_default();
        (five_prime, three_prime)
    }

    /// Indices into [`exons`](Self::exons) of the exons overlapping `feature`
    pub fn supporting_exons(&self, feature: &Interval) -> Vec<usize> {
        self.exons
            .iter()
            .enumerate()
            .filter(|(_, exon)| !exon.to_interval().intersection(feature).is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    /// Coding positions: spliced bases inside the CDS span
    pub fn coding(&self, cds: &Interval) -> Interval {
        self.spliced.intersection(&cds.hull())
    }

    /// Genomic pieces encoding amino acids `aa` (1-based) of the protein
    ///
    /// Fails when the amino-acid range runs past the coding region.
    pub fn protein_to_genomic(&self, cds: &Interval, aa: &Interval) -> IntervalResult<Interval> {
        let coding = self.coding(cds);
        let nucleotides = aa_interval_to_nt(aa, 0);
        let mut pieces = Vec::with_capacity(nucleotides.parts().len());
        for part in nucleotides.parts() {
            let first = part.lower().first_covered();
            let last = part.upper().last_covered();
            if first < 1 {
                return Err(IntervalError::OutOfRange {
                    index: 0,
                    measure: coding.measure(),
                });
            }
            pieces.push(oriented_range(
                &coding,
                self.strand,
                (first - 1) as u64,
                (last - 1) as u64,
            )?);
        }
        Ok(Interval::from_parts(pieces))
    }

    /// Amino acid (1-based) and codon position encoded at a genomic position
    pub fn genomic_to_protein(&self, cds: &Interval, position: i64) -> Option<(i64, i64)> {
        let coding = self.coding(cds);
        let offset = oriented_index(&coding, self.strand, position)?;
        Some(nt_to_aa(offset as i64 + 1, 0))
    }
}

fn oriented_nth(interval: &Interval, strand: Strand, offset: u64) -> IntervalResult<i64> {
    match strand {
        Strand::Plus => interval.nth_element(offset),
        Strand::Minus => {
            let measure = interval.measure();
            if offset >= measure {
                return Err(IntervalError::OutOfRange {
                    index: offset,
                    measure,
                });
            }
            interval.nth_element(measure - 1 - offset)
        }
    }
}

fn oriented_index(interval: &Interval, strand: Strand, position: i64) -> Option<u64> {
    let index = interval.index_of(position)?;
    match strand {
        Strand::Plus => Some(index),
        Strand::Minus => Some(interval.measure() - 1 - index),
    }
}

fn oriented_range(
    interval: &Interval,
    strand: Strand,
    first: u64,
    last: u64,
) -> IntervalResult<Interval> {
    let a = oriented_nth(interval, strand, first)?;
    let b = oriented_nth(interval, strand, last)?;
    Ok(interval.intersection(&Interval::closed(a.min(b), a.max(b))))
}
