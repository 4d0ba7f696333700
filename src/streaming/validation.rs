//! Sort validation for streaming operations.
//!
//! The repair pass requires input sorted by chromosome then start
//! position; unsorted input produces silently wrong output. This module
//! provides an inline validator that turns that silent corruption into a
//! fail-fast error when enabled.
//!
//! Sort validation checks that:
//! 1. All records for a chromosome are contiguous (no interleaving)
//! 2. Within a chromosome, start positions are non-decreasing
//!
//! Any consistent chromosome ordering passes - lexicographic and genome
//! order both work.

use std::collections::HashSet;

use crate::bedgraph::BedGraphError;

/// Inline sort validator for use within streaming loops.
///
/// Validates sort order record by record, avoiding a second pass over
/// the file.
#[derive(Debug, Default)]
pub struct SortValidator {
    prev_chrom: Option<String>,
    prev_start: u64,
    seen_chroms: HashSet<String>,
    record_count: usize,
}

impl SortValidator {
    /// Create a new sort validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate that the given record maintains sort order.
    ///
    /// Returns Ok(()) if valid, Err if out of order.
    #[inline]
    pub fn validate(&mut self, chrom: &str, start: u64) -> Result<(), BedGraphError> {
        self.record_count += 1;

        if let Some(ref pc) = self.prev_chrom {
            if chrom != pc {
                // Switching chromosomes - check we haven't seen this one before
                if self.seen_chroms.contains(chrom) {
                    return Err(BedGraphError::InvalidFormat(format!(
                        "Input not sorted: chromosome '{}' at record {} was seen earlier \
                         (chromosomes must be contiguous)",
                        chrom, self.record_count
                    )));
                }
                self.seen_chroms.insert(pc.clone());
            } else if start < self.prev_start {
                return Err(BedGraphError::InvalidFormat(format!(
                    "Input not sorted: start {} at record {} comes after {} on {}",
                    start, self.record_count, self.prev_start, chrom
                )));
            }
        }

        if self.prev_chrom.as_deref() != Some(chrom) {
            self.prev_chrom = Some(chrom.to_string());
        }
        self.prev_start = start;

        Ok(())
    }
}
