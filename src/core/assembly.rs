//! Assembly coordinate mapping
//!
//! Remaps an interval on a coarse sequence region (a chromosome, say) down
//! to the sequence-level region that actually stores bases.
//!
//! The mapping algorithm:
//! 1. Stop if the current region is sequence-level
//! 2. Ask the assembly source for mappings overlapping the interval
//! 3. Stop if there are none; the region is as specific as it gets
//! 4. Take the candidate landing in the lowest-rank coordinate system
//! 5. Clip the interval to that candidate's source range
//! 6. Project the clipped interval by linear offset and repeat from 1
//!
//! The walk is a bounded loop with a visited-region guard, so a cycle in the
//! assembly graph surfaces as an error instead of running forever.

use crate::core::error::{MappingError, MappingResult};
use crate::core::genomic::GenomicInterval;
use crate::core::interval::Interval;
use crate::core::Strand;
use log::{debug, warn};
use rayon::prelude::*;
use std::collections::HashSet;

/// Identifier of a sequence region
pub type RegionId = u64;

/// Default hop limit; real assemblies are three or four levels deep
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// One row of the assembly table
///
/// Coordinates are 1-based and inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyMapping {
    pub source_region_id: RegionId,
    pub target_region_id: RegionId,
    pub source_start: i64,
    pub source_end: i64,
    pub target_start: i64,
    pub target_end: i64,
    /// Rank of the coordinate system of the target region; lower is more specific
    pub rank: u32,
    /// Orientation of the target relative to the source
    pub orientation: Strand,
}

impl AssemblyMapping {
    /// Source range as an interval
    pub fn source_interval(&self) -> Interval {
        Interval::closed(self.source_start, self.source_end)
    }

    /// Target range as an interval
    pub fn target_interval(&self) -> Interval {
        Interval::closed(self.target_start, self.target_end)
    }

    /// Project a source-region interval into target-region coordinates
    ///
    /// Plus orientation: `target = target_start + (value - source_start)`.
    /// Minus orientation mirrors inside the target range:
    /// `target = target_end - (value - source_start)`.
    pub fn project(&self, interval: &Interval) -> Interval {
        match self.orientation {
            Strand::Plus => interval.shifted(self.target_start.saturating_sub(self.source_start)),
            Strand::Minus => {
                interval.reflected(self.target_end.saturating_add(self.source_start))
            }
        }
    }

    /// Project a single source position
    #[inline]
    pub fn project_position(&self, position: i64) -> i64 {
        let offset = position.saturating_sub(self.source_start);
        match self.orientation {
            Strand::Plus => self.target_start.saturating_add(offset),
            Strand::Minus => self.target_end.saturating_sub(offset),
        }
    }
}

/// Data-access collaborator supplying assembly rows
pub trait AssemblySource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// All mappings out of `region` whose source range overlaps `interval`
    fn fetch_overlapping_assembly_mappings(
        &self,
        region: RegionId,
        interval: &Interval,
    ) -> Result<Vec<AssemblyMapping>, Self::Error>;

    /// Whether `region` belongs to a sequence-level coordinate system
    fn is_sequence_level(&self, region: RegionId) -> Result<bool, Self::Error>;
}

impl<S: AssemblySource + ?Sized> AssemblySource for &S {
    type Error = S::Error;

    fn fetch_overlapping_assembly_mappings(
        &self,
        region: RegionId,
        interval: &Interval,
    ) -> Result<Vec<AssemblyMapping>, Self::Error> {
        (**self).fetch_overlapping_assembly_mappings(region, interval)
    }

    fn is_sequence_level(&self, region: RegionId) -> Result<bool, Self::Error> {
        (**self).is_sequence_level(region)
    }
}

/// Data-access collaborator supplying raw bases
///
/// Callers use this after remapping; the mapper never fetches sequence.
pub trait SequenceSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Bases `start..=end` (1-based) of `region`, forward strand
    fn fetch_raw_sequence(
        &self,
        region: RegionId,
        start: i64,
        end: i64,
    ) -> Result<Vec<u8>, Self::Error>;
}

/// Mapper settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapperConfig {
    /// Maximum number of hops before the walk is declared broken
    pub max_depth: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Result of a remap: where the interval ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remapped {
    pub region: RegionId,
    pub interval: Interval,
    pub strand: Strand,
    /// Number of assembly mappings applied
    pub hops: usize,
}

impl Remapped {
    /// Closed `start`/`end` to hand to the sequence fetcher
    pub fn sequence_span(&self) -> Option<GenomicInterval> {
        GenomicInterval::from_interval(&self.interval.hull())
            .into_iter()
            .next()
    }
}

/// One entry of a batch remap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapQuery {
    pub region: RegionId,
    pub interval: Interval,
    pub strand: Strand,
}

/// Assembly coordinate mapper over an [`AssemblySource`]
pub struct AssemblyMapper<S> {
    source: S,
    config: MapperConfig,
}

impl<S: AssemblySource> AssemblyMapper<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, MapperConfig::default())
    }

    /// Create a new mapper with explicit settings
    pub fn with_config(source: S, config: MapperConfig) -> Self {
        Self { source, config }
    }

    /// Set the hop limit
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.config.max_depth = max_depth;
    }

    pub fn config(&self) -> MapperConfig {
        self.config
    }

    /// Get a reference to the underlying assembly source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Remap `interval` on `region` to the most specific region available
    ///
    /// Ignores strand; see [`AssemblyMapper::remap`] for the oriented form.
    pub fn remap_interval(
        &self,
        region: RegionId,
        interval: &Interval,
    ) -> MappingResult<(RegionId, Interval)> {
        let remapped = self.remap(region, interval, Strand::Plus)?;
        Ok((remapped.region, remapped.interval))
    }

    /// Remap a stranded interval, flipping the strand across
    /// minus-oriented mappings
    pub fn remap(
        &self,
        region: RegionId,
        interval: &Interval,
        strand: Strand,
    ) -> MappingResult<Remapped> {
        let mut current = Remapped {
            region,
            interval: interval.clone(),
            strand,
            hops: 0,
        };
        let mut visited = HashSet::new();

        loop {
            if !visited.insert(current.region) {
                warn!(
                    "Assembly cycle: region {} revisited while remapping from {}",
                    current.region, region
                );
                return Err(MappingError::Cycle {
                    region: current.region,
                });
            }

            if self
                .source
                .is_sequence_level(current.region)
                .map_err(source_error)?
            {
                debug!("Region {} is sequence-level after {} hops", current.region, current.hops);
                return Ok(current);
            }

            let candidates = self
                .source
                .fetch_overlapping_assembly_mappings(current.region, &current.interval)
                .map_err(source_error)?;

            // Only the covered part inside a mapping's source range is carried
            // over; min_by_key keeps the first of equal ranks
            let Some((best, covered)) = candidates
                .iter()
                .map(|m| (m, current.interval.intersection(&m.source_interval())))
                .filter(|(_, covered)| !covered.is_empty())
                .min_by_key(|(m, _)| m.rank)
            else {
                debug!("No mapping out of region {}; treating it as terminal", current.region);
                return Ok(current);
            };

            if current.hops >= self.config.max_depth {
                warn!("Gave up remapping region {} after {} hops", region, current.hops);
                return Err(MappingError::MappingNotFound {
                    region,
                    hops: current.hops,
                });
            }

            debug!(
                "Hop {}: region {} -> {} (rank {}, {} candidates)",
                current.hops + 1,
                current.region,
                best.target_region_id,
                best.rank,
                candidates.len()
            );

            if covered.measure() < current.interval.measure() {
                debug!(
                    "Clipped {} to {} at the edge of mapping {} -> {}",
                    current.interval,
                    covered,
                    best.source_region_id,
                    best.target_region_id
                );
            }

            current = Remapped {
                region: best.target_region_id,
                interval: best.project(&covered),
                strand: current.strand.combine(best.orientation),
                hops: current.hops + 1,
            };
        }
    }
}

impl<S: AssemblySource + Sync> AssemblyMapper<S> {
    /// Remap a batch of queries in parallel
    ///
    /// Results come back in query order.
    pub fn remap_many(&self, queries: &[RemapQuery]) -> Vec<MappingResult<Remapped>> {
        queries
            .par_iter()
            .map(|q| self.remap(q.region, &q.interval, q.strand))
            .collect()
    }
}

fn source_error<E>(err: E) -> MappingError
where
    E: std::error::Error + Send + Sync + 'static,
{
    MappingError::Source(Box::new(err))
}
