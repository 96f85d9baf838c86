//! Batch remapping of region files
//!
//! Input lines are `<region> <start> <end> [strand]`, 1-based inclusive.
//! Each line is remapped to its sequence-level region and written as
//! `<region> <start> <end> <strand> <hops>`; lines that fail go to the
//! unmap file with the reason appended.

use crate::core::error::{TableParseError, TableResult};
use crate::core::io::{open_reader, DEFAULT_BUFFER_SIZE};
use crate::core::{
    AssemblyMapper, AssemblySource, Interval, MappingResult, RemapQuery, Remapped, Strand,
};
use crate::formats::assembly::{parse_field, parse_strand};
use log::info;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

/// Conversion statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

/// Parse one query line
pub fn parse_query_line(line: &str, line_number: usize) -> TableResult<RemapQuery> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(TableParseError::InvalidRecord {
            line: line_number,
            message: format!("Expected at least 3 fields, got {}", fields.len()),
        });
    }
    let start: i64 = parse_field(fields[1], "start", line_number)?;
    let end: i64 = parse_field(fields[2], "end", line_number)?;
    let strand = match fields.get(3) {
        Some(value) => parse_strand(value, line_number)?,
        None => Strand::Plus,
    };
    Ok(RemapQuery {
        region: parse_field(fields[0], "region", line_number)?,
        interval: Interval::closed(start, end),
        strand,
    })
}

/// Render a remap result as an output line
pub fn format_remapped(remapped: &Remapped) -> Option<String> {
    let span = remapped.sequence_span()?;
    Some(format!(
        "{}\t{}\t{}\t{}\t{}",
        remapped.region, span.start, span.end, remapped.strand, remapped.hops
    ))
}

/// Remap every line of `input`
///
/// # Arguments
/// * `input` - Query file (gzip/bzip2 aware)
/// * `output` - Destination for remapped lines
/// * `unmap` - Destination for lines that could not be remapped
/// * `mapper` - Mapper over a loaded assembly
/// * `threads` - Number of threads (1 = sequential)
pub fn convert_remap_file<S, P>(
    input: P,
    output: P,
    unmap: P,
    mapper: &AssemblyMapper<S>,
    threads: usize,
) -> TableResult<ConversionStats>
where
    S: AssemblySource + Sync,
    P: AsRef<Path>,
{
    let reader = open_reader(input.as_ref())?;
    let mut output_file =
        BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, File::create(output.as_ref())?);
    let mut unmap_file = BufWriter::with_capacity(64 * 1024, File::create(unmap.as_ref())?);

    let stats = if threads > 1 {
        convert_parallel(reader, &mut output_file, &mut unmap_file, mapper, threads)?
    } else {
        convert_sequential(reader, &mut output_file, &mut unmap_file, mapper)?
    };

    output_file.flush()?;
    unmap_file.flush()?;
    info!(
        "Remapped {} of {} queries ({} failed)",
        stats.success, stats.total, stats.failed
    );
    Ok(stats)
}

/// Write one outcome, updating the counters
fn write_outcome<W: Write, U: Write>(
    line: &str,
    outcome: TableResult<MappingResult<Remapped>>,
    output: &mut W,
    unmap: &mut U,
    stats: &mut ConversionStats,
) -> TableResult<()> {
    stats.total += 1;
    let failure = match outcome {
        Ok(Ok(remapped)) => match format_remapped(&remapped) {
            Some(rendered) => {
                writeln!(output, "{}", rendered)?;
                stats.success += 1;
                return Ok(());
            }
            None => "empty interval".to_string(),
        },
        Ok(Err(err)) => err.to_string(),
        Err(err) => err.to_string(),
    };
    writeln!(unmap, "{}\t# {}", line, failure)?;
    stats.failed += 1;
    Ok(())
}

fn is_skipped(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

fn convert_sequential<R, W, U, S>(
    reader: R,
    output: &mut W,
    unmap: &mut U,
    mapper: &AssemblyMapper<S>,
) -> TableResult<ConversionStats>
where
    R: BufRead,
    W: Write,
    U: Write,
    S: AssemblySource,
{
    let mut stats = ConversionStats::default();
    for (index, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line = line.trim_end();
        if is_skipped(line) {
            continue;
        }
        let outcome = parse_query_line(line, index + 1)
            .map(|q| mapper.remap(q.region, &q.interval, q.strand));
        write_outcome(line, outcome, output, unmap, &mut stats)?;
    }
    Ok(stats)
}

/// Reads every query, remaps them on a dedicated pool, then writes in input order
fn convert_parallel<R, W, U, S>(
    reader: R,
    output: &mut W,
    unmap: &mut U,
    mapper: &AssemblyMapper<S>,
    threads: usize,
) -> TableResult<ConversionStats>
where
    R: BufRead,
    W: Write,
    U: Write,
    S: AssemblySource + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| {
            TableParseError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to create thread pool: {}", e),
            ))
        })?;

    let mut lines = Vec::new();
    let mut parsed = Vec::new();
    for (index, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line = line.trim_end().to_string();
        if is_skipped(&line) {
            continue;
        }
        parsed.push(parse_query_line(&line, index + 1));
        lines.push(line);
    }

    let queries: Vec<RemapQuery> = parsed.iter().filter_map(|p| p.as_ref().ok().cloned()).collect();
    let mut remapped = pool.install(|| mapper.remap_many(&queries)).into_iter();

    let mut stats = ConversionStats::default();
    for (line, query) in lines.iter().zip(parsed) {
        let outcome = match query {
            Ok(_) => match remapped.next() {
                Some(result) => Ok(result),
                None => break,
            },
            Err(err) => Err(err),
        };
        write_outcome(line, outcome, output, unmap, &mut stats)?;
    }
    Ok(stats)
}
