//! bedGraph coordinate sort.
//!
//! CrossMap does not preserve input order, and the repair pass requires
//! input sorted by chromosome then start. This stage restores that
//! order between the clip and repair stages.
//!
//! Sort order (matches `LC_ALL=C sort -k1,1 -k2,2n -k3,3n`):
//! 1. Primary: chromosome (lexicographic)
//! 2. Secondary: start coordinate (ascending, numeric)
//! 3. Tertiary: end coordinate (ascending, numeric)
//! 4. Ties: input order preserved (stable sort)
//!
//! This is the one stage that buffers the whole file; everything else
//! in the pipeline streams.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use crate::bedgraph::{BedGraphError, BedGraphReader, BedGraphRecord};
use crate::streaming::BedGraphWriter;

/// In-memory sort command.
#[derive(Debug, Clone, Default)]
pub struct SortCommand;

impl SortCommand {
    pub fn new() -> Self {
        Self
    }

    /// Sort a bedGraph file and write the result.
    pub fn run<P: AsRef<Path>, W: Write>(
        &self,
        input_path: P,
        output: &mut W,
    ) -> Result<SortStats, BedGraphError> {
        let file = File::open(input_path.as_ref())?;
        let reader = BedGraphReader::new(BufReader::with_capacity(64 * 1024, file));
        self.run_streaming(reader, output)
    }

    /// Sort from stdin.
    pub fn run_stdin<W: Write>(&self, output: &mut W) -> Result<SortStats, BedGraphError> {
        let stdin = io::stdin();
        let reader = BedGraphReader::new(stdin.lock());
        self.run_streaming(reader, output)
    }

    /// Read all records, sort, and write.
    pub fn run_streaming<R: Read, W: Write>(
        &self,
        reader: BedGraphReader<R>,
        output: &mut W,
    ) -> Result<SortStats, BedGraphError> {
        let mut records: Vec<BedGraphRecord> =
            reader.records().collect::<Result<_, BedGraphError>>()?;

        self.sort(&mut records);

        let mut writer = BedGraphWriter::with_capacity(64 * 1024, output);
        for rec in &records {
            writer.write_record(&rec.chrom, rec.start, rec.end, &rec.value)?;
        }
        writer.flush()?;

        Ok(SortStats {
            records: records.len(),
        })
    }

    /// Sort records by (chrom, start, end), preserving input order on ties.
    pub fn sort(&self, records: &mut [BedGraphRecord]) {
        records.sort_by(|a, b| {
            a.chrom
                .cmp(&b.chrom)
                .then(a.start.cmp(&b.start))
                .then(a.end.cmp(&b.end))
        });
    }
}

/// Statistics from a sort pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SortStats {
    /// Number of records sorted
    pub records: usize,
}

impl std::fmt::Display for SortStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sorted: {}", self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sort(content: &str) -> String {
        let cmd = SortCommand::new();
        let reader = BedGraphReader::new(content.as_bytes());
        let mut output = Vec::new();
        cmd.run_streaming(reader, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_sorts_by_chrom_then_start() {
        let out = sort(
            "chr2\t100\t200\t1.0\n\
             chr1\t300\t400\t2.0\n\
             chr1\t100\t200\t3.0\n",
        );

        assert_eq!(
            out,
            "chr1\t100\t200\t3.0\nchr1\t300\t400\t2.0\nchr2\t100\t200\t1.0\n"
        );
    }

    #[test]
    fn test_sorts_by_end_on_equal_start() {
        let out = sort("chr1\t100\t300\t1.0\nchr1\t100\t200\t2.0\n");
        assert_eq!(out, "chr1\t100\t200\t2.0\nchr1\t100\t300\t1.0\n");
    }

    #[test]
    fn test_lexicographic_chromosome_order() {
        // C-locale order: chr1 < chr10 < chr2
        let out = sort(
            "chr2\t0\t1\t1\n\
             chr10\t0\t1\t1\n\
             chr1\t0\t1\t1\n",
        );

        let chroms: Vec<&str> = out
            .lines()
            .map(|l| l.split('\t').next().unwrap())
            .collect();
        assert_eq!(chroms, vec!["chr1", "chr10", "chr2"]);
    }

    #[test]
    fn test_stable_on_identical_coordinates() {
        let out = sort("chr1\t0\t10\t0.5\nchr1\t0\t10\t0.25\n");
        assert_eq!(out, "chr1\t0\t10\t0.5\nchr1\t0\t10\t0.25\n");
    }

    #[test]
    fn test_values_preserved() {
        let out = sort("chr1\t10\t20\t2.50\nchr1\t0\t10\t1e3\n");
        assert_eq!(out, "chr1\t0\t10\t1e3\nchr1\t10\t20\t2.50\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sort(""), "");
    }
}
