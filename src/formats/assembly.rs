//! Assembly table parsing
//!
//! A flat, whitespace-separated dump of an assembly hierarchy.
//!
//! # Table Format
//!
//! ```text
//! # comment
//! map source target source_start source_end target_start target_end rank [ori]
//! seq region
//! ```
//!
//! - `map` lines are assembly rows, 1-based inclusive; `ori` is `+`/`-` or
//!   `1`/`-1` and defaults to `+`
//! - `seq` lines flag sequence-level regions

use crate::core::error::{TableParseError, TableResult};
use crate::core::io::open_reader;
use crate::core::{AssemblyMapping, RegionId, Strand};
use std::collections::HashSet;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Result of parsing an assembly table
#[derive(Debug, Clone, Default)]
pub struct AssemblyTable {
    /// All assembly rows, in file order
    pub mappings: Vec<AssemblyMapping>,
    /// Regions flagged sequence-level
    pub sequence_level: HashSet<RegionId>,
}

/// Parse an integer column, naming the field on failure
pub(crate) fn parse_field<T: std::str::FromStr>(
    value: &str,
    field: &'static str,
    line: usize,
) -> TableResult<T> {
    value.parse::<T>().map_err(|_| TableParseError::ParseInt {
        line,
        field,
        value: value.to_string(),
    })
}

/// Parse a strand column
pub(crate) fn parse_strand(value: &str, line: usize) -> TableResult<Strand> {
    Strand::parse(value).ok_or_else(|| TableParseError::InvalidStrand {
        line,
        value: value.to_string(),
    })
}

fn parse_map_line(fields: &[&str], line: usize) -> TableResult<AssemblyMapping> {
    if fields.len() != 8 && fields.len() != 9 {
        return Err(TableParseError::InvalidRecord {
            line,
            message: format!("Expected 8 or 9 fields on a map line, got {}", fields.len()),
        });
    }

    let mapping = AssemblyMapping {
        source_region_id: parse_field(fields[1], "source region", line)?,
        target_region_id: parse_field(fields[2], "target region", line)?,
        source_start: parse_field(fields[3], "source start", line)?,
        source_end: parse_field(fields[4], "source end", line)?,
        target_start: parse_field(fields[5], "target start", line)?,
        target_end: parse_field(fields[6], "target end", line)?,
        rank: parse_field(fields[7], "rank", line)?,
        orientation: match fields.get(8) {
            Some(value) => parse_strand(value, line)?,
            None => Strand::Plus,
        },
    };

    if mapping.source_start > mapping.source_end {
        return Err(TableParseError::InvalidRecord {
            line,
            message: format!(
                "Source start ({}) > source end ({})",
                mapping.source_start, mapping.source_end
            ),
        });
    }
    if mapping.source_end - mapping.source_start != mapping.target_end - mapping.target_start {
        return Err(TableParseError::InvalidRecord {
            line,
            message: "Source and target ranges differ in length".to_string(),
        });
    }

    Ok(mapping)
}

/// Parse an assembly table from a reader
pub fn parse_assembly_reader<R: BufRead>(reader: R) -> TableResult<AssemblyTable> {
    let mut table = AssemblyTable::default();

    for (index, line_result) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line_result?;
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        match fields[0] {
            "map" => table.mappings.push(parse_map_line(&fields, line_number)?),
            "seq" => {
                if fields.len() != 2 {
                    return Err(TableParseError::InvalidRecord {
                        line: line_number,
                        message: format!("Expected 2 fields on a seq line, got {}", fields.len()),
                    });
                }
                table
                    .sequence_level
                    .insert(parse_field(fields[1], "region", line_number)?);
            }
            other => {
                return Err(TableParseError::InvalidRecord {
                    line: line_number,
                    message: format!("Unknown record type '{}'", other),
                })
            }
        }
    }

    Ok(table)
}

/// Parse an assembly table from a path
///
/// Automatically detects and handles gzip/bzip2 compression.
pub fn parse_assembly_file(path: &Path) -> TableResult<AssemblyTable> {
    if !path.exists() {
        return Err(TableParseError::FileNotFound(path.to_path_buf()));
    }
    parse_assembly_reader(open_reader(path)?)
}

/// Parse an assembly table from bytes (for testing)
pub fn parse_assembly_bytes(data: &[u8]) -> TableResult<AssemblyTable> {
    parse_assembly_reader(BufReader::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const TABLE: &[u8] = b"\
# chromosome 1 built from two contigs
map 1 10 1 1000 1 1000 3
map\t1\t11\t1001\t2000\t51\t1050\t3\t-1

seq 10
seq 11
";

    #[test]
    fn test_parse_table() {
        let table = parse_assembly_bytes(TABLE).unwrap();
        assert_eq!(table.mappings.len(), 2);
        assert_eq!(table.mappings[0].orientation, Strand::Plus);
        assert_eq!(table.mappings[1].orientation, Strand::Minus);
        assert_eq!(table.mappings[1].target_start, 51);
        assert_eq!(table.mappings[1].rank, 3);
        assert!(table.sequence_level.contains(&10));
        assert!(table.sequence_level.contains(&11));
    }

    #[test]
    fn test_bad_number() {
        let err = parse_assembly_bytes(b"map 1 10 one 1000 1 1000 3\n").unwrap_err();
        assert!(matches!(
            err,
            TableParseError::ParseInt { line: 1, field: "source start", .. }
        ));
    }

    #[test]
    fn test_bad_strand() {
        let err = parse_assembly_bytes(b"map 1 10 1 10 1 10 3 ?\n").unwrap_err();
        assert!(matches!(err, TableParseError::InvalidStrand { line: 1, .. }));
    }

    #[test]
    fn test_length_mismatch() {
        let err = parse_assembly_bytes(b"\n\nmap 1 10 1 10 1 20 3\n").unwrap_err();
        assert!(matches!(err, TableParseError::InvalidRecord { line: 3, .. }));
    }

    #[test]
    fn test_unknown_record() {
        let err = parse_assembly_bytes(b"chain 1 2 3\n").unwrap_err();
        assert!(err.to_string().contains("Unknown record type 'chain'"));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_assembly_file(&PathBuf::from("/nonexistent/assembly.tsv")).unwrap_err();
        assert!(matches!(err, TableParseError::FileNotFound(_)));
    }
}
