//! Efficient output formatting for streaming operations.
//!
//! Uses itoa for integer formatting to avoid allocation in the hot path.
//! Signal values are written back as the raw text they were parsed from,
//! never reformatted.

use std::io::{BufWriter, Write};

use crate::bedgraph::BedGraphError;

/// Buffer size for BedGraphWriter (8MB default).
const DEFAULT_BUFFER_SIZE: usize = 8 * 1024 * 1024;

/// Buffered bedGraph output writer.
pub struct BedGraphWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
}

impl<W: Write> BedGraphWriter<W> {
    /// Create a new writer with the default 8MB buffer.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, output)
    }

    /// Create a new writer with the specified buffer size.
    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
        }
    }

    /// Write one record followed by a newline.
    #[inline]
    pub fn write_record(
        &mut self,
        chrom: &str,
        start: u64,
        end: u64,
        value: &str,
    ) -> Result<(), BedGraphError> {
        self.write_record_bytes(chrom.as_bytes(), start, end, value.as_bytes())
    }

    /// Write one record from raw byte fields followed by a newline.
    #[inline]
    pub fn write_record_bytes(
        &mut self,
        chrom: &[u8],
        start: u64,
        end: u64,
        value: &[u8],
    ) -> Result<(), BedGraphError> {
        self.writer.write_all(chrom).map_err(BedGraphError::Io)?;
        self.writer.write_all(b"\t").map_err(BedGraphError::Io)?;
        self.writer
            .write_all(self.itoa_buf.format(start).as_bytes())
            .map_err(BedGraphError::Io)?;
        self.writer.write_all(b"\t").map_err(BedGraphError::Io)?;
        self.writer
            .write_all(self.itoa_buf.format(end).as_bytes())
            .map_err(BedGraphError::Io)?;
        self.writer.write_all(b"\t").map_err(BedGraphError::Io)?;
        self.writer.write_all(value).map_err(BedGraphError::Io)?;
        self.writer.write_all(b"\n").map_err(BedGraphError::Io)?;
        Ok(())
    }

    /// Write a raw line (already formatted, without trailing newline).
    #[inline]
    pub fn write_line(&mut self, line: &[u8]) -> Result<(), BedGraphError> {
        self.writer.write_all(line).map_err(BedGraphError::Io)?;
        self.writer.write_all(b"\n").map_err(BedGraphError::Io)?;
        Ok(())
    }

    /// Flush buffered output.
    pub fn flush(&mut self) -> Result<(), BedGraphError> {
        self.writer.flush().map_err(BedGraphError::Io)
    }
}
