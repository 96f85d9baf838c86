//! Table readers
//!
//! Readers for assembly-mapping tables and exon lists, and the batch
//! remapping pipeline for region files.

pub mod assembly;
pub mod exons;
pub mod remap;

pub use assembly::{parse_assembly_bytes, parse_assembly_file, parse_assembly_reader, AssemblyTable};
pub use exons::{
    assemble_transcripts, parse_exon_bytes, parse_exon_file, parse_exon_reader, read_transcripts,
    ExonRecord, TranscriptRecord,
};
pub use remap::{convert_remap_file, format_remapped, parse_query_line, ConversionStats};
