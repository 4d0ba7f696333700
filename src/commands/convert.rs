//! The assembly-conversion pipeline driver.
//!
//! Runs the fixed stage sequence
//! decode -> lift -> filter -> clip -> sort -> repair -> encode,
//! with the external stages delegated to the UCSC tools and CrossMap
//! and the text stages done in-process. Stages communicate through
//! intermediate files in a temporary working directory; each stage
//! finishes and closes its output before the next one starts.
//!
//! A failing external stage aborts the whole run. The pipeline is not
//! safe to resume mid-way; rerun from the original input instead.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::info;

use super::{FilterCommand, FilterStats, PipelineError, RepairCommand, RepairStats, SortCommand, SortStats};
use crate::assembly::Assembly;
use crate::genome::ChromSizes;
use crate::tools::Toolchain;

/// Pipeline driver configuration.
#[derive(Debug, Clone)]
pub struct ConvertCommand {
    /// Assembly the input file is on
    pub source: Assembly,
    /// Assembly to lift to
    pub target: Assembly,
    /// Directory holding chain files, chrom.sizes tables and tools
    pub resource_dir: PathBuf,
    /// Keep the intermediate working directory instead of removing it
    pub keep_temp: bool,
    /// Assert the sort precondition during the repair pass
    pub check_sorted: bool,
}

impl ConvertCommand {
    pub fn new(source: Assembly, target: Assembly) -> Self {
        Self {
            source,
            target,
            resource_dir: PathBuf::from("."),
            keep_temp: false,
            check_sorted: false,
        }
    }

    /// Set the resource directory.
    pub fn with_resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_dir = dir.into();
        self
    }

    /// Run the full pipeline from `input` (bigWig on the source
    /// assembly) to `output` (bigWig on the target assembly).
    pub fn run(&self, input: &Path, output: &Path) -> Result<ConvertStats, PipelineError> {
        // Reject bad configuration before touching any file or process
        if self.source == self.target {
            return Err(PipelineError::Config(format!(
                "source and target assemblies must differ (both are '{}')",
                self.source
            )));
        }

        info!(
            "converting {} from {} to {}",
            input.display(),
            self.source,
            self.target
        );

        let tools = Toolchain::new(&self.resource_dir);
        tools.ensure_available()?;

        let chain = self.resource_dir.join(self.source.chain_file_to(self.target));
        if !chain.is_file() {
            return Err(PipelineError::Config(format!(
                "missing chain file '{}'; run `bwlift fetch` first",
                chain.display()
            )));
        }

        let sizes_path = self.resource_dir.join(self.target.chrom_sizes_file());
        if !sizes_path.is_file() {
            return Err(PipelineError::Config(format!(
                "missing chromosome sizes '{}'; run `bwlift fetch` first",
                sizes_path.display()
            )));
        }
        let sizes = ChromSizes::from_file(&sizes_path)?;
        info!("loaded {} target chromosomes", sizes.len());

        let work = tempfile::Builder::new().prefix("bwlift-").tempdir()?;
        let decoded = work.path().join("decoded.bedGraph");
        let lifted = work.path().join("lifted.bedGraph");
        let filtered = work.path().join("filtered.bedGraph");
        let clipped = work.path().join("clipped.bedGraph");
        let sorted = work.path().join("sorted.bedGraph");
        let repaired = work.path().join("repaired.bedGraph");

        info!("decoding bigWig to bedGraph");
        tools.bigwig_to_bedgraph(input, &decoded)?;

        info!("lifting coordinates with CrossMap");
        tools.crossmap_bed(&chain, &decoded, &lifted)?;

        info!("filtering non-standard chromosomes");
        let filter_stats = {
            let mut out = File::create(&filtered)?;
            FilterCommand::new().run(&lifted, &sizes, &mut out)?
        };
        info!(
            "kept {} of {} lines",
            filter_stats.lines_kept, filter_stats.lines_read
        );

        info!("clipping to chromosome bounds");
        tools.bed_clip(&filtered, &sizes_path, &clipped)?;

        info!("sorting by chromosome and start");
        let sort_stats = {
            let mut out = File::create(&sorted)?;
            SortCommand::new().run(&clipped, &mut out)?
        };

        info!("repairing overlapping intervals");
        let repair_stats = {
            let mut out = File::create(&repaired)?;
            RepairCommand::new()
                .with_check_sorted(self.check_sorted)
                .run(&sorted, &mut out)?
        };
        info!(
            "repair: clipped {}, dropped {}",
            repair_stats.records_clipped, repair_stats.records_dropped
        );

        info!("encoding bedGraph back to bigWig");
        tools.bedgraph_to_bigwig(&repaired, &sizes_path, output)?;

        if self.keep_temp {
            let kept = work.keep();
            info!("intermediate files kept in {}", kept.display());
        }

        info!("wrote {}", output.display());
        Ok(ConvertStats {
            filter: filter_stats,
            sort: sort_stats,
            repair: repair_stats,
        })
    }
}

/// Statistics from a full conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertStats {
    pub filter: FilterStats,
    pub sort: SortStats,
    pub repair: RepairStats,
}

impl std::fmt::Display for ConvertStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Filter [{}], Sort [{}], Repair [{}]",
            self.filter, self.sort, self.repair
        )
    }
}
