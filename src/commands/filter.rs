//! Chromosome whitelist filter.
//!
//! CrossMap maps some intervals onto alternate haplotypes and unplaced
//! contigs that are absent from the target chrom.sizes table; bedClip
//! and bedGraphToBigWig reject such lines. This pass drops every line
//! whose chromosome is not in the table, passing kept lines through
//! verbatim.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;

use crate::bedgraph::BedGraphError;
use crate::genome::ChromSizes;
use crate::streaming::{chrom_of, should_skip_line, BedGraphWriter};

/// Streaming whitelist filter.
#[derive(Debug, Clone, Default)]
pub struct FilterCommand;

impl FilterCommand {
    pub fn new() -> Self {
        Self
    }

    /// Filter a bedGraph file against a chrom.sizes whitelist.
    pub fn run<P: AsRef<Path>, W: Write>(
        &self,
        input_path: P,
        sizes: &ChromSizes,
        output: &mut W,
    ) -> Result<FilterStats, BedGraphError> {
        let file = File::open(input_path.as_ref())?;
        self.run_streaming(BufReader::with_capacity(64 * 1024, file), sizes, output)
    }

    /// Filter from stdin.
    pub fn run_stdin<W: Write>(
        &self,
        sizes: &ChromSizes,
        output: &mut W,
    ) -> Result<FilterStats, BedGraphError> {
        let stdin = io::stdin();
        self.run_streaming(stdin.lock(), sizes, output)
    }

    /// Core streaming filter. Lines are matched on their first field
    /// only and written through unmodified.
    pub fn run_streaming<R: Read, W: Write>(
        &self,
        reader: R,
        sizes: &ChromSizes,
        output: &mut W,
    ) -> Result<FilterStats, BedGraphError> {
        let mut stats = FilterStats::default();
        let mut reader = BufReader::new(reader);
        let mut writer = BedGraphWriter::with_capacity(64 * 1024, output);
        let mut line: Vec<u8> = Vec::with_capacity(256);
        let mut line_number = 0usize;

        loop {
            line.clear();
            let bytes_read = reader.read_until(b'\n', &mut line)?;
            if bytes_read == 0 {
                break;
            }
            line_number += 1;

            // Strip the line ending; kept lines get a fresh newline
            if line.last() == Some(&b'\n') {
                line.pop();
            }
            if line.last() == Some(&b'\r') {
                line.pop();
            }

            if should_skip_line(&line) {
                continue;
            }
            stats.lines_read += 1;

            let chrom = chrom_of(&line).ok_or_else(|| BedGraphError::Parse {
                line: line_number,
                message: "Expected tab-separated fields".to_string(),
            })?;

            let chrom = std::str::from_utf8(chrom).map_err(|_| BedGraphError::Parse {
                line: line_number,
                message: "Chromosome name is not valid UTF-8".to_string(),
            })?;

            if sizes.contains(chrom) {
                writer.write_line(&line)?;
                stats.lines_kept += 1;
            } else {
                stats.lines_dropped += 1;
            }
        }

        writer.flush()?;
        Ok(stats)
    }
}

/// Statistics from a filter pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterStats {
    /// Number of data lines read
    pub lines_read: usize,
    /// Number of lines on whitelisted chromosomes
    pub lines_kept: usize,
    /// Number of lines dropped
    pub lines_dropped: usize,
}

impl std::fmt::Display for FilterStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Read: {}, Kept: {}, Dropped: {}",
            self.lines_read, self.lines_kept, self.lines_dropped
        )
    }
}
