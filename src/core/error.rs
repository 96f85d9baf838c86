//! Error types for ExonMap
//!
//! Defines all error types used throughout the library.

use crate::core::RegionId;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ExonMap operations
#[derive(Debug, Error)]
pub enum ExonMapError {
    /// Interval navigation errors
    #[error("Interval error: {0}")]
    Interval(#[from] IntervalError),

    /// Assembly mapping errors
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Table parsing errors
    #[error("Table parse error: {0}")]
    TableParse(#[from] TableParseError),

    /// Sequence retrieval errors
    #[error("Sequence error: {0}")]
    Sequence(#[from] SequenceError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by interval comparison and navigation.
///
/// None of the set operations fail; these only come from asking an
/// interval for something it does not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    /// Bound comparison on an empty interval
    #[error("Empty interval has no bounds")]
    Empty,

    /// Positional index beyond the covered length
    #[error("Index {index} out of range for interval covering {measure} positions")]
    OutOfRange { index: u64, measure: u64 },

    /// Walk started from a position outside the interval
    #[error("Position {position} is not covered by the interval")]
    NotCovered { position: i64 },
}

/// Errors that can occur during assembly coordinate mapping
///
/// `MappingNotFound` and `Cycle` both mean the start region has no terminal
/// resolution. `Cycle` is reported as soon as the walk revisits a region;
/// `MappingNotFound` covers walks that are still going at the hop limit.
/// A step with no outgoing mapping is not an error.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The hop limit was reached before a terminal region was found
    #[error("No terminal mapping for region {region} after {hops} hops")]
    MappingNotFound { region: RegionId, hops: usize },

    /// A region was reached twice while walking the assembly graph
    #[error("No terminal mapping: assembly cycle through region {region}")]
    Cycle { region: RegionId },

    /// The data-access collaborator failed
    #[error("Assembly source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors raised by the in-memory sequence store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// No bases loaded for the region
    #[error("No sequence loaded for region {0}")]
    UnknownRegion(RegionId),

    /// Requested range falls outside the stored bases
    #[error("Range {start}-{end} is outside region {region} (length {length})")]
    OutOfBounds {
        region: RegionId,
        start: i64,
        end: i64,
        length: usize,
    },
}

/// Errors that can occur while reading assembly tables or exon lists
#[derive(Debug, Error)]
pub enum TableParseError {
    /// Unknown record keyword or wrong field count
    #[error("Invalid record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },

    /// Failed to parse integer
    #[error("Failed to parse {field} '{value}' at line {line}")]
    ParseInt {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// Strand column was not one of `+`, `-`, `1`, `-1`
    #[error("Invalid strand '{value}' at line {line}")]
    InvalidStrand { line: usize, value: String },

    /// File not found
    #[error("Table file not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error during parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ExonMap operations
pub type Result<T> = std::result::Result<T, ExonMapError>;

/// Result type alias for interval navigation
pub type IntervalResult<T> = std::result::Result<T, IntervalError>;

/// Result type alias for mapping operations
pub type MappingResult<T> = std::result::Result<T, MappingError>;

/// Result type alias for table parsing operations
pub type TableResult<T> = std::result::Result<T, TableParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_error_display() {
        let err = IntervalError::OutOfRange { index: 12, measure: 10 };
        assert_eq!(
            err.to_string(),
            "Index 12 out of range for interval covering 10 positions"
        );
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: ExonMapError = MappingError::Cycle { region: 7 }.into();
        assert!(matches!(err, ExonMapError::Mapping(MappingError::Cycle { region: 7 })));
        assert!(err.to_string().contains("region 7"));
    }

    #[test]
    fn test_cycle_reads_as_not_found() {
        let cycle = MappingError::Cycle { region: 3 };
        let limit = MappingError::MappingNotFound { region: 3, hops: 16 };
        assert!(cycle.to_string().starts_with("No terminal mapping"));
        assert!(limit.to_string().starts_with("No terminal mapping"));
        assert!(cycle.to_string().contains("cycle"));
    }
}
