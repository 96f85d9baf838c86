//! Compression-aware file reading
//!
//! Assembly tables and exon lists are often shipped gzip or bzip2
//! compressed. [`open_reader`] picks the right decoder from the extension
//! or the magic bytes and hands back a buffered reader.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Default buffer size for BufReader (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Compression format of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

impl CompressionFormat {
    /// Detect format from extension, falling back to magic bytes
    ///
    /// - .gz extension or gzip magic bytes (1f 8b)
    /// - .bz2 extension or bzip2 magic bytes (42 5a 68)
    pub fn detect(path: &Path, magic: &[u8]) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => return CompressionFormat::Gzip,
            Some("bz2") => return CompressionFormat::Bzip2,
            _ => {}
        }
        if magic.starts_with(&[0x1f, 0x8b]) {
            CompressionFormat::Gzip
        } else if magic.starts_with(b"BZh") {
            CompressionFormat::Bzip2
        } else {
            CompressionFormat::Plain
        }
    }
}

/// Detect compression format from file path and/or content
pub fn detect_compression(path: &Path) -> io::Result<CompressionFormat> {
    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;
    Ok(CompressionFormat::detect(path, &magic[..bytes_read]))
}

/// Open a file for line reading, decompressing if needed
pub fn open_reader(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let format = detect_compression(path)?;
    let file = File::open(path)?;
    let reader: Box<dyn BufRead> = match format {
        CompressionFormat::Gzip => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            flate2::read::GzDecoder::new(file),
        )),
        CompressionFormat::Bzip2 => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            bzip2::read::BzDecoder::new(file),
        )),
        CompressionFormat::Plain => Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file)),
    };
    Ok(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bzip2::write::BzEncoder;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(
            CompressionFormat::detect(Path::new("asm.tsv.gz"), b""),
            CompressionFormat::Gzip
        );
        assert_eq!(
            CompressionFormat::detect(Path::new("asm.tsv.bz2"), b""),
            CompressionFormat::Bzip2
        );
        assert_eq!(
            CompressionFormat::detect(Path::new("asm.tsv"), b"map"),
            CompressionFormat::Plain
        );
    }

    #[test]
    fn test_detect_by_magic() {
        assert_eq!(
            CompressionFormat::detect(Path::new("asm"), &[0x1f, 0x8b, 0x08]),
            CompressionFormat::Gzip
        );
        assert_eq!(
            CompressionFormat::detect(Path::new("asm"), b"BZh"),
            CompressionFormat::Bzip2
        );
    }

    #[test]
    fn test_open_plain() -> io::Result<()> {
        let mut temp = NamedTempFile::new()?;
        writeln!(temp, "line1\nline2")?;
        temp.flush()?;

        let lines: Vec<String> = open_reader(temp.path())?.lines().collect::<io::Result<_>>()?;
        assert_eq!(lines, vec!["line1", "line2"]);
        Ok(())
    }

    #[test]
    fn test_open_gzip_without_extension() -> io::Result<()> {
        let mut temp = NamedTempFile::new()?;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"seq 7\n")?;
        temp.write_all(&encoder.finish()?)?;
        temp.flush()?;

        assert_eq!(detect_compression(temp.path())?, CompressionFormat::Gzip);
        let lines: Vec<String> = open_reader(temp.path())?.lines().collect::<io::Result<_>>()?;
        assert_eq!(lines, vec!["seq 7"]);
        Ok(())
    }

    #[test]
    fn test_open_bzip2_without_extension() -> io::Result<()> {
        let mut temp = NamedTempFile::new()?;
        let mut encoder = BzEncoder::new(Vec::new(), bzip2::Compression::default());
        encoder.write_all(b"map 1 2 1 100 1 100 1\nseq 2\n")?;
        temp.write_all(&encoder.finish()?)?;
        temp.flush()?;

        assert_eq!(detect_compression(temp.path())?, CompressionFormat::Bzip2);
        let lines: Vec<String> = open_reader(temp.path())?.lines().collect::<io::Result<_>>()?;
        assert_eq!(lines, vec!["map 1 2 1 100 1 100 1", "seq 2"]);
        Ok(())
    }
}
