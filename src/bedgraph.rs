//! Streaming bedGraph file parser.
//!
//! bedGraph is the four-column tab-separated text format produced by
//! `bigWigToBedGraph` and consumed by `bedGraphToBigWig`:
//! `chrom<TAB>start<TAB>end<TAB>value`, 0-based half-open coordinates.
//!
//! Malformed lines (wrong field count, non-numeric coordinates or value)
//! fail the whole pass rather than being skipped.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;

use thiserror::Error;

/// Errors that can occur during bedGraph parsing.
#[derive(Error, Debug)]
pub enum BedGraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid bedGraph input: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, BedGraphError>;

/// A single bedGraph interval carrying a signal value.
///
/// The value field is kept as raw text so it round-trips byte-for-byte;
/// the parser only checks that it is a well-formed number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BedGraphRecord {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub value: String,
}

impl BedGraphRecord {
    /// Create a new record.
    #[inline]
    pub fn new(
        chrom: impl Into<String>,
        start: u64,
        end: u64,
        value: impl Into<String>,
    ) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
            value: value.into(),
        }
    }

    /// Length of the interval.
    #[inline]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the interval has zero length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for BedGraphRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}\t{}", self.chrom, self.start, self.end, self.value)
    }
}

/// A streaming bedGraph reader.
pub struct BedGraphReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: String,
}

impl BedGraphReader<File> {
    /// Open a bedGraph file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> BedGraphReader<R> {
    /// Create a new reader from any readable source.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: String::with_capacity(256),
        }
    }

    /// Create a reader with custom buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
            buffer: String::with_capacity(256),
        }
    }

    /// Read the next record.
    pub fn read_record(&mut self) -> Result<Option<BedGraphRecord>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_line(&mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            // Skip empty lines and track headers
            let line = self.buffer.trim();
            if line.is_empty()
                || line.starts_with('#')
                || line.starts_with("track")
                || line.starts_with("browser")
            {
                continue;
            }

            return self.parse_line(line).map(Some);
        }
    }

    /// Parse a single bedGraph line.
    fn parse_line(&self, line: &str) -> Result<BedGraphRecord> {
        let fields: Vec<&str> = line.split('\t').collect();

        if fields.len() != 4 {
            return Err(BedGraphError::Parse {
                line: self.line_number,
                message: format!("Expected 4 fields, got {}", fields.len()),
            });
        }

        let chrom = fields[0].to_string();
        let start = self.parse_position(fields[1], "start")?;
        let end = self.parse_position(fields[2], "end")?;

        if start > end {
            return Err(BedGraphError::Parse {
                line: self.line_number,
                message: format!("Start ({}) > end ({})", start, end),
            });
        }

        // Validate the value is numeric but keep the original text
        if fields[3].parse::<f64>().is_err() {
            return Err(BedGraphError::Parse {
                line: self.line_number,
                message: format!("Invalid value: '{}'", fields[3]),
            });
        }

        Ok(BedGraphRecord::new(chrom, start, end, fields[3]))
    }

    fn parse_position(&self, s: &str, field_name: &str) -> Result<u64> {
        s.parse().map_err(|_| BedGraphError::Parse {
            line: self.line_number,
            message: format!("Invalid {} position: '{}'", field_name, s),
        })
    }

    /// Get an iterator over all records.
    pub fn records(self) -> BedGraphRecordIter<R> {
        BedGraphRecordIter { reader: self }
    }
}

/// Iterator over bedGraph records.
pub struct BedGraphRecordIter<R: Read> {
    reader: BedGraphReader<R>,
}

impl<R: Read> Iterator for BedGraphRecordIter<R> {
    type Item = Result<BedGraphRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Read all records from a bedGraph file.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<BedGraphRecord>> {
    let reader = BedGraphReader::from_path(path)?;
    reader.records().collect()
}

/// Parse records from a string (useful for testing).
pub fn parse_records(content: &str) -> Result<Vec<BedGraphRecord>> {
    let reader = BedGraphReader::new(content.as_bytes());
    reader.records().collect()
}

/// Write records to a writer.
pub fn write_records<W: Write>(writer: &mut W, records: &[BedGraphRecord]) -> io::Result<()> {
    for record in records {
        writeln!(writer, "{}", record)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let content = "chr1\t100\t200\t5.0\nchr1\t300\t400\t1.5\n";
        let records = parse_records(content).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].chrom, "chr1");
        assert_eq!(records[0].start, 100);
        assert_eq!(records[0].end, 200);
        assert_eq!(records[0].value, "5.0");
    }

    #[test]
    fn test_value_text_preserved() {
        let content = "chr1\t0\t10\t3\nchr1\t10\t20\t2.50\nchr1\t20\t30\t1e-3\n";
        let records = parse_records(content).unwrap();

        assert_eq!(records[0].value, "3");
        assert_eq!(records[1].value, "2.50");
        assert_eq!(records[2].value, "1e-3");
    }

    #[test]
    fn test_negative_value_accepted() {
        let records = parse_records("chr1\t0\t10\t-4.2\n").unwrap();
        assert_eq!(records[0].value, "-4.2");
    }

    #[test]
    fn test_skip_comments_and_track_lines() {
        let content = "# comment\ntrack type=bedGraph\nchr1\t100\t200\t1\n";
        let records = parse_records(content).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_wrong_field_count() {
        assert!(parse_records("chr1\t100\t200\n").is_err());
        assert!(parse_records("chr1\t100\t200\t1.0\textra\n").is_err());
    }

    #[test]
    fn test_non_numeric_coordinate() {
        let result = parse_records("chr1\tabc\t200\t1.0\n");
        assert!(matches!(
            result,
            Err(BedGraphError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_non_numeric_value() {
        assert!(parse_records("chr1\t100\t200\tNaE\n").is_err());
    }

    #[test]
    fn test_start_after_end() {
        assert!(parse_records("chr1\t200\t100\t1.0\n").is_err());
    }

    #[test]
    fn test_zero_length_accepted_by_parser() {
        // Degenerate intervals are a repair-stage concern, not a parse error
        let records = parse_records("chr1\t100\t100\t1.0\n").unwrap();
        assert!(records[0].is_empty());
    }

    #[test]
    fn test_display_roundtrip() {
        let rec = BedGraphRecord::new("chr2", 50, 150, "9.0");
        assert_eq!(rec.to_string(), "chr2\t50\t150\t9.0");
    }
}
