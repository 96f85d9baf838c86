//! Exon list parsing
//!
//! One exon per line, 1-based inclusive:
//!
//! ```text
//! # region start end strand [transcript]
//! 1   100 104 +  tx1
//! 1   200 202 +  tx1
//! ```
//!
//! Lines without a transcript column all belong to one unnamed transcript.

use crate::core::error::{TableParseError, TableResult};
use crate::core::io::open_reader;
use crate::core::{GenomicInterval, RegionId, SplicedTranscript, Strand};
use crate::formats::assembly::{parse_field, parse_strand};
use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One exon line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExonRecord {
    /// Transcript name, empty when the column is absent
    pub transcript: String,
    pub region: RegionId,
    pub exon: GenomicInterval,
    pub strand: Strand,
    /// Source line number, for error reporting
    pub line: usize,
}

/// A named transcript assembled from exon lines
#[derive(Debug, Clone)]
pub struct TranscriptRecord {
    pub name: String,
    pub transcript: SplicedTranscript,
}

fn parse_exon_line(fields: &[&str], line: usize) -> TableResult<ExonRecord> {
    if fields.len() != 4 && fields.len() != 5 {
        return Err(TableParseError::InvalidRecord {
            line,
            message: format!("Expected 4 or 5 fields on an exon line, got {}", fields.len()),
        });
    }

    let start = parse_field(fields[1], "exon start", line)?;
    let end = parse_field(fields[2], "exon end", line)?;
    if start > end {
        return Err(TableParseError::InvalidRecord {
            line,
            message: format!("Exon start ({}) > exon end ({})", start, end),
        });
    }

    Ok(ExonRecord {
        transcript: fields.get(4).map(|s| s.to_string()).unwrap_or_default(),
        region: parse_field(fields[0], "region", line)?,
        exon: GenomicInterval::new(start, end),
        strand: parse_strand(fields[3], line)?,
        line,
    })
}

/// Parse exon lines from a reader
pub fn parse_exon_reader<R: BufRead>(reader: R) -> TableResult<Vec<ExonRecord>> {
    let mut records = Vec::new();
    for (index, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        records.push(parse_exon_line(&fields, index + 1)?);
    }
    Ok(records)
}

/// Parse an exon list from a path (gzip/bzip2 aware)
pub fn parse_exon_file(path: &Path) -> TableResult<Vec<ExonRecord>> {
    if !path.exists() {
        return Err(TableParseError::FileNotFound(path.to_path_buf()));
    }
    parse_exon_reader(open_reader(path)?)
}

/// Parse an exon list from bytes (for testing)
pub fn parse_exon_bytes(data: &[u8]) -> TableResult<Vec<ExonRecord>> {
    parse_exon_reader(BufReader::new(data))
}

/// Group exon lines into transcripts, in order of first appearance
///
/// Every exon of a transcript must sit on the same region and strand.
pub fn assemble_transcripts(records: Vec<ExonRecord>) -> TableResult<Vec<TranscriptRecord>> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, (RegionId, Strand, Vec<GenomicInterval>)> = HashMap::new();

    for record in records {
        match groups.get_mut(&record.transcript) {
            Some((region, strand, exons)) => {
                if *region != record.region || *strand != record.strand {
                    return Err(TableParseError::InvalidRecord {
                        line: record.line,
                        message: format!(
                            "Exon of '{}' on {}{} but transcript is on {}{}",
                            record.transcript, record.region, record.strand, region, strand
                        ),
                    });
                }
                exons.push(record.exon);
            }
            None => {
                order.push(record.transcript.clone());
                groups.insert(
                    record.transcript,
                    (record.region, record.strand, vec![record.exon]),
                );
            }
        }
    }

    Ok(order
        .into_iter()
        .filter_map(|name| {
            let (region, strand, exons) = groups.remove(&name)?;
            Some(TranscriptRecord {
                transcript: SplicedTranscript::new(region, strand, exons),
                name,
            })
        })
        .collect())
}

/// Read and assemble transcripts from a path
pub fn read_transcripts(path: &Path) -> TableResult<Vec<TranscriptRecord>> {
    assemble_transcripts(parse_exon_file(path)?)
}
