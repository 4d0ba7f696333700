//! Chromosome sizes table.
//!
//! Parses UCSC chrom.sizes files (tab-delimited: chrom\tlength). The
//! table doubles as the chromosome whitelist: anything absent from it is
//! a non-standard or unplaced contig and gets filtered out before the
//! repair pass.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::bedgraph::BedGraphError;

/// Chromosome lengths for one assembly, in input-file order.
#[derive(Debug, Clone, Default)]
pub struct ChromSizes {
    /// Map of chromosome name to length
    lengths: HashMap<String, u64>,
    /// Chromosome order (preserves input file order)
    order: Vec<String>,
}

impl ChromSizes {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            lengths: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Load a chrom.sizes file.
    /// Format: tab-delimited with chrom\tlength per line
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BedGraphError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut sizes = Self::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 2 {
                return Err(BedGraphError::Parse {
                    line: line_num + 1,
                    message: "chrom.sizes requires two columns: chrom and length".to_string(),
                });
            }

            let length: u64 = fields[1].parse().map_err(|_| BedGraphError::Parse {
                line: line_num + 1,
                message: format!("Invalid chromosome length: '{}'", fields[1]),
            })?;

            sizes.insert(fields[0].to_string(), length);
        }

        Ok(sizes)
    }

    /// Get the length of a chromosome.
    #[inline]
    pub fn length(&self, chrom: &str) -> Option<u64> {
        self.lengths.get(chrom).copied()
    }

    /// Check whether a chromosome is in the table (i.e. whitelisted).
    #[inline]
    pub fn contains(&self, chrom: &str) -> bool {
        self.lengths.contains_key(chrom)
    }

    /// All chromosome names in input order.
    pub fn chromosomes(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    /// Number of chromosomes.
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Insert a chromosome length (appends to order if new).
    pub fn insert(&mut self, chrom: String, length: u64) {
        if !self.lengths.contains_key(&chrom) {
            self.order.push(chrom.clone());
        }
        self.lengths.insert(chrom, length);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "chr1\t248956422").unwrap();
        writeln!(file, "chr2\t242193529").unwrap();
        writeln!(file, "# comment line").unwrap();
        writeln!(file, "chrM\t16569").unwrap();

        let sizes = ChromSizes::from_file(file.path()).unwrap();

        assert_eq!(sizes.length("chr1"), Some(248956422));
        assert_eq!(sizes.length("chrM"), Some(16569));
        assert_eq!(sizes.length("chrUn_KI270302v1"), None);
        assert_eq!(sizes.len(), 3);
    }

    #[test]
    fn test_order_preserved() {
        let mut sizes = ChromSizes::new();
        sizes.insert("chr2".to_string(), 100);
        sizes.insert("chr1".to_string(), 200);

        let order: Vec<_> = sizes.chromosomes().cloned().collect();
        assert_eq!(order, vec!["chr2", "chr1"]);
    }

    #[test]
    fn test_contains() {
        let mut sizes = ChromSizes::new();
        sizes.insert("chr1".to_string(), 1000);

        assert!(sizes.contains("chr1"));
        assert!(!sizes.contains("chr1_gl000191_random"));
    }

    #[test]
    fn test_invalid_length_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "chr1\tlong").unwrap();
        assert!(ChromSizes::from_file(file.path()).is_err());
    }

    #[test]
    fn test_single_column_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "chr1").unwrap();
        assert!(ChromSizes::from_file(file.path()).is_err());
    }
}
