//! External tool invocation.
//!
//! The format conversions and the coordinate lift are delegated to the
//! UCSC utilities (bigWigToBedGraph, bedClip, bedGraphToBigWig) and to
//! CrossMap. Each binary is resolved from the resource directory first,
//! falling back to PATH. stdout/stderr of the children are inherited so
//! tool diagnostics reach the user directly.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

pub const BIGWIG_TO_BEDGRAPH: &str = "bigWigToBedGraph";
pub const BEDGRAPH_TO_BIGWIG: &str = "bedGraphToBigWig";
pub const BED_CLIP: &str = "bedClip";
pub const CROSSMAP: &str = "CrossMap";

/// Errors from external tool invocation.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("`{tool}` could not be started ({source}); run `bwlift fetch` or add it to PATH")]
    Missing {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("`{tool}` exited with {status}")]
    Failed { tool: String, status: ExitStatus },
}

/// Resolves and runs the external stage binaries.
#[derive(Debug, Clone)]
pub struct Toolchain {
    resource_dir: PathBuf,
}

impl Toolchain {
    /// Create a toolchain rooted at a resource directory.
    pub fn new(resource_dir: impl Into<PathBuf>) -> Self {
        Self {
            resource_dir: resource_dir.into(),
        }
    }

    /// Resolve a tool name: prefer the copy in the resource directory,
    /// fall back to PATH lookup.
    fn resolve(&self, name: &str) -> PathBuf {
        let local = self.resource_dir.join(name);
        if local.is_file() {
            local
        } else {
            PathBuf::from(name)
        }
    }

    /// Check that all four stage binaries can be spawned.
    ///
    /// The UCSC tools print usage and exit non-zero when run bare, so
    /// only spawn failures count here.
    pub fn ensure_available(&self) -> Result<(), ToolError> {
        for tool in [BIGWIG_TO_BEDGRAPH, BED_CLIP, BEDGRAPH_TO_BIGWIG] {
            self.spawn_check(tool, &[])?;
        }
        self.spawn_check(CROSSMAP, &["--version"])?;
        Ok(())
    }

    /// Check whether CrossMap can be spawned at all.
    pub fn crossmap_available(&self) -> bool {
        self.spawn_check(CROSSMAP, &["--version"]).is_ok()
    }

    /// Decode a bigWig file to bedGraph text.
    pub fn bigwig_to_bedgraph(&self, input: &Path, output: &Path) -> Result<(), ToolError> {
        self.run(BIGWIG_TO_BEDGRAPH, &[input.as_os_str(), output.as_os_str()])
    }

    /// Lift bedGraph coordinates through a chain file with CrossMap.
    ///
    /// Output order is not guaranteed; callers must re-sort.
    pub fn crossmap_bed(
        &self,
        chain: &Path,
        input: &Path,
        output: &Path,
    ) -> Result<(), ToolError> {
        self.run(
            CROSSMAP,
            &[
                OsStr::new("bed"),
                chain.as_os_str(),
                input.as_os_str(),
                output.as_os_str(),
            ],
        )
    }

    /// Truncate out-of-bounds coordinates against a chrom.sizes table.
    pub fn bed_clip(
        &self,
        input: &Path,
        chrom_sizes: &Path,
        output: &Path,
    ) -> Result<(), ToolError> {
        self.run(
            BED_CLIP,
            &[input.as_os_str(), chrom_sizes.as_os_str(), output.as_os_str()],
        )
    }

    /// Encode bedGraph text back to a bigWig file.
    pub fn bedgraph_to_bigwig(
        &self,
        input: &Path,
        chrom_sizes: &Path,
        output: &Path,
    ) -> Result<(), ToolError> {
        self.run(
            BEDGRAPH_TO_BIGWIG,
            &[input.as_os_str(), chrom_sizes.as_os_str(), output.as_os_str()],
        )
    }

    fn run(&self, tool: &str, args: &[&OsStr]) -> Result<(), ToolError> {
        let status = Command::new(self.resolve(tool))
            .args(args)
            .stdin(Stdio::null())
            .status()
            .map_err(|source| ToolError::Missing {
                tool: tool.to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ToolError::Failed {
                tool: tool.to_string(),
                status,
            })
        }
    }

    fn spawn_check(&self, tool: &str, args: &[&str]) -> Result<(), ToolError> {
        Command::new(self.resolve(tool))
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| ToolError::Missing {
                tool: tool.to_string(),
                source,
            })
            .map(|_| ())
    }
}
