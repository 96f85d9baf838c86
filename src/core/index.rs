//! In-memory assembly index
//!
//! Uses rust-lapper for O(log n + k) overlap queries per source region.
//! This is the collaborator the CLI and tests run against; production
//! callers plug their own [`AssemblySource`] in front of a database.

use crate::core::assembly::{AssemblyMapping, AssemblySource, RegionId, SequenceSource};
use crate::core::error::{SequenceError, TableParseError};
use crate::core::interval::Interval;
use crate::formats::assembly::{parse_assembly_file, AssemblyTable};
use log::{info, warn};
use rust_lapper::Lapper;
use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::path::Path;

/// Type alias for source-range entries
pub type MappingInterval = rust_lapper::Interval<u64, AssemblyMapping>;

/// Assembly rows grouped by source region
#[derive(Default)]
pub struct AssemblyIndex {
    /// Source region -> interval tree of outgoing mappings
    maps: HashMap<RegionId, Lapper<u64, AssemblyMapping>>,
    /// Regions flagged sequence-level
    sequence_level: HashSet<RegionId>,
    /// Raw bases of sequence-level regions, when loaded
    sequences: HashMap<RegionId, Vec<u8>>,
}

impl AssemblyIndex {
    /// Build index from an assembly table file
    ///
    /// Automatically handles gzip and bzip2 compression.
    pub fn from_table_file<P: AsRef<Path>>(path: P) -> Result<Self, TableParseError> {
        let table = parse_assembly_file(path.as_ref())?;
        let index = Self::from_table(table);
        info!(
            "Loaded {} assembly mappings over {} source regions",
            index.total_mappings(),
            index.maps.len()
        );
        Ok(index)
    }

    /// Build index from parsed table data
    pub fn from_table(table: AssemblyTable) -> Self {
        let mut index = Self::from_mappings(table.mappings);
        index.sequence_level = table.sequence_level;
        index
    }

    /// Build index from bare rows; no region is flagged sequence-level
    pub fn from_mappings<I>(mappings: I) -> Self
    where
        I: IntoIterator<Item = AssemblyMapping>,
    {
        let mut by_region: HashMap<RegionId, Vec<MappingInterval>> = HashMap::new();

        for mapping in mappings {
            if mapping.source_start < 1 || mapping.source_end < mapping.source_start {
                warn!(
                    "Skipping assembly row {}:{}-{} with unusable source range",
                    mapping.source_region_id, mapping.source_start, mapping.source_end
                );
                continue;
            }
            let entry = rust_lapper::Interval {
                start: mapping.source_start as u64,
                // half-open in the tree
                stop: mapping.source_end as u64 + 1,
                val: mapping,
            };
            by_region
                .entry(entry.val.source_region_id)
                .or_default()
                .push(entry);
        }

        let maps = by_region
            .into_iter()
            .map(|(region, entries)| (region, Lapper::new(entries)))
            .collect();

        Self {
            maps,
            ..Self::default()
        }
    }

    /// Flag a region as sequence-level
    pub fn mark_sequence_level(&mut self, region: RegionId) {
        self.sequence_level.insert(region);
    }

    /// Attach raw bases to a region (position 1 is `bases[0]`)
    pub fn add_sequence(&mut self, region: RegionId, bases: Vec<u8>) {
        self.sequences.insert(region, bases);
    }

    /// Rows out of `region` overlapping `interval`, in source order
    pub fn query(&self, region: RegionId, interval: &Interval) -> Vec<&AssemblyMapping> {
        let Some(lapper) = self.maps.get(&region) else {
            return vec![];
        };
        let (Some(lower), Some(upper)) = (interval.lower_bound(), interval.upper_bound()) else {
            return vec![];
        };
        let first = lower.first_covered().max(1);
        let last = upper.last_covered();
        if last < first {
            return vec![];
        }

        lapper
            .find(first as u64, last as u64 + 1)
            .map(|entry| &entry.val)
            // the hull may span gaps of a multi-interval
            .filter(|m| !m.source_interval().intersection(interval).is_empty())
            .collect()
    }

    /// Check if a region has outgoing mappings
    pub fn has_region(&self, region: RegionId) -> bool {
        self.maps.contains_key(&region)
    }

    /// Get all source region ids
    pub fn source_regions(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.maps.keys().copied()
    }

    /// Get the number of mappings out of a region
    pub fn mapping_count(&self, region: RegionId) -> usize {
        self.maps.get(&region).map(|l| l.len()).unwrap_or(0)
    }

    /// Get total number of mappings across all regions
    pub fn total_mappings(&self) -> usize {
        self.maps.values().map(|l| l.len()).sum()
    }
}

impl AssemblySource for AssemblyIndex {
    type Error = Infallible;

    fn fetch_overlapping_assembly_mappings(
        &self,
        region: RegionId,
        interval: &Interval,
    ) -> Result<Vec<AssemblyMapping>, Infallible> {
        Ok(self.query(region, interval).into_iter().cloned().collect())
    }

    fn is_sequence_level(&self, region: RegionId) -> Result<bool, Infallible> {
        Ok(self.sequence_level.contains(&region))
    }
}

impl SequenceSource for AssemblyIndex {
    type Error = SequenceError;

    fn fetch_raw_sequence(
        &self,
        region: RegionId,
        start: i64,
        end: i64,
    ) -> Result<Vec<u8>, SequenceError> {
        let bases = self
            .sequences
            .get(&region)
            .ok_or(SequenceError::UnknownRegion(region))?;
        if start < 1 || end < start || end as usize > bases.len() {
            return Err(SequenceError::OutOfBounds {
                region,
                start,
                end,
                length: bases.len(),
            });
        }
        Ok(bases[(start - 1) as usize..end as usize].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Strand;

    fn mapping(source: RegionId, target: RegionId, start: i64, end: i64) -> AssemblyMapping {
        AssemblyMapping {
            source_region_id: source,
            target_region_id: target,
            source_start: start,
            source_end: end,
            target_start: 1,
            target_end: end - start + 1,
            rank: 1,
            orientation: Strand::Plus,
        }
    }

    fn create_test_index() -> AssemblyIndex {
        let mut index = AssemblyIndex::from_mappings(vec![
            mapping(1, 10, 1, 100),
            mapping(1, 11, 101, 200),
            mapping(1, 12, 201, 300),
            mapping(2, 13, 1, 50),
        ]);
        index.mark_sequence_level(10);
        index
    }

    #[test]
    fn test_index_creation() {
        let index = create_test_index();
        assert!(index.has_region(1));
        assert!(index.has_region(2));
        assert!(!index.has_region(3));
        assert_eq!(index.total_mappings(), 4);
        assert_eq!(index.mapping_count(1), 3);
        assert_eq!(index.mapping_count(3), 0);

        let mut regions: Vec<_> = index.source_regions().collect();
        regions.sort_unstable();
        assert_eq!(regions, vec![1, 2]);
    }

    #[test]
    fn test_query_closed_ends() {
        let index = create_test_index();
        // end of the first row is inclusive
        let hits = index.query(1, &Interval::point(100));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target_region_id, 10);

        let hits = index.query(1, &Interval::closed(100, 101));
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_query_respects_open_bounds() {
        let index = create_test_index();
        let hits = index.query(1, &Interval::half_open(50, 101));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_query_skips_gaps_of_multi() {
        let index = create_test_index();
        let spliced = Interval::from_parts([Interval::closed(10, 20), Interval::closed(250, 260)]);
        let mut targets: Vec<_> = index
            .query(1, &spliced)
            .iter()
            .map(|m| m.target_region_id)
            .collect();
        targets.sort_unstable();
        assert_eq!(targets, vec![10, 12]);
    }

    #[test]
    fn test_query_misses() {
        let index = create_test_index();
        assert!(index.query(1, &Interval::closed(400, 500)).is_empty());
        assert!(index.query(1, &Interval::Empty).is_empty());
        assert!(index.query(1, &Interval::closed(-20, 0)).is_empty());
        assert!(index.query(9, &Interval::closed(1, 10)).is_empty());
    }

    #[test]
    fn test_unusable_rows_skipped() {
        let index = AssemblyIndex::from_mappings(vec![mapping(1, 2, 0, 10), mapping(1, 2, 20, 10)]);
        assert_eq!(index.total_mappings(), 0);
    }

    #[test]
    fn test_sequence_level_flag() {
        let index = create_test_index();
        assert_eq!(index.is_sequence_level(10), Ok(true));
        assert_eq!(index.is_sequence_level(1), Ok(false));
    }

    #[test]
    fn test_fetch_raw_sequence() {
        let mut index = create_test_index();
        index.add_sequence(10, b"ACGTACGTAC".to_vec());
        assert_eq!(index.fetch_raw_sequence(10, 2, 5).unwrap(), b"CGTA");
        assert!(matches!(
            index.fetch_raw_sequence(10, 8, 12),
            Err(SequenceError::OutOfBounds { length: 10, .. })
        ));
        assert!(matches!(
            index.fetch_raw_sequence(99, 1, 2),
            Err(SequenceError::UnknownRegion(99))
        ));
    }
}
