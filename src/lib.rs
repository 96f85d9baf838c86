//! ExonMap - interval algebra and coordinate mapping for genomic features
//!
//! Works with intervals whose ends are independently open or closed,
//! walks spliced transcripts position by position, converts between
//! amino-acid and nucleotide coordinates, and lifts features down an
//! assembly hierarchy until they land on sequence-level regions.
//!
//! # Features
//!
//! - Normalized multi-part intervals with exact set operations
//! - Strand-aware transcript offsets, introns and UTRs
//! - Multi-hop assembly mapping with cycle and depth protection
//! - Parallel batch remapping with rayon
//! - Support for compressed assembly tables (gzip, bzip2)
//!
//! # Example
//!
//! ```
//! use exonmap::{AssemblyIndex, AssemblyMapper, AssemblyMapping, Interval, Strand};
//!
//! let mut index = AssemblyIndex::from_mappings(vec![AssemblyMapping {
//!     source_region_id: 1,
//!     target_region_id: 2,
//!     source_start: 1,
//!     source_end: 1000,
//!     target_start: 501,
//!     target_end: 1500,
//!     rank: 1,
//!     orientation: Strand::Plus,
//! }]);
//! index.mark_sequence_level(2);
//!
//! let mapper = AssemblyMapper::new(index);
//! let remapped = mapper.remap(1, &Interval::closed(10, 20), Strand::Plus).unwrap();
//! assert_eq!(remapped.region, 2);
//! assert_eq!(remapped.interval, Interval::closed(510, 520));
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use core::{
    make_interval, AssemblyIndex, AssemblyMapper, AssemblyMapping, AssemblySource, Bound,
    ExonMapError, GenomicInterval, Interval, IntervalError, MapperConfig, MappingError, RegionId,
    Remapped, SequenceSource, SplicedTranscript, Strand, TableParseError,
};
pub use formats::{assembly, exons};
