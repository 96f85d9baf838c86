//! Core interval algebra and coordinate mapping
//!
//! This module contains the interval types, positional navigation,
//! amino-acid conversion, spliced transcripts and the assembly mapper.

mod assembly;
mod bound;
mod convert;
pub mod error;
mod genomic;
mod index;
mod interval;
pub mod io;
mod navigate;
pub mod sequence;
mod strand;
mod transcript;

pub use assembly::{
    AssemblyMapper, AssemblyMapping, AssemblySource, MapperConfig, RegionId, RemapQuery, Remapped,
    SequenceSource, DEFAULT_MAX_DEPTH,
};
pub use bound::{cmp_lower, cmp_upper, Bound};
pub use convert::{aa_interval_to_nt, aa_to_nt, nt_interval_to_aa, nt_to_aa, AaInterval};
pub use error::{
    ExonMapError, IntervalError, IntervalResult, MappingError, MappingResult, Result,
    SequenceError, TableParseError, TableResult,
};
pub use genomic::GenomicInterval;
pub use index::{AssemblyIndex, MappingInterval};
pub use interval::{make_interval, Interval, MultiInterval, SimpleInterval};
pub use io::{detect_compression, open_reader, CompressionFormat, DEFAULT_BUFFER_SIZE};
pub use sequence::{fetch_interval_sequence, fetch_oriented_sequence};
pub use strand::Strand;
pub use transcript::SplicedTranscript;
