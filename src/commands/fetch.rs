//! Resource download.
//!
//! Fetches the UCSC command-line tools, the liftOver chain files for
//! both directions, and the chrom.sizes tables for both assemblies
//! into the resource directory. Files already present are skipped
//! unless `force` is set. CrossMap is a Python package and is not
//! installed here; its availability is only reported.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::PipelineError;
use crate::assembly::Assembly;
use crate::tools::{Toolchain, BED_CLIP, BEDGRAPH_TO_BIGWIG, BIGWIG_TO_BEDGRAPH};

/// Base URL for prebuilt UCSC tool binaries (linux x86_64).
pub const TOOL_URL_PREFIX: &str = "http://hgdownload.soe.ucsc.edu/admin/exe/linux.x86_64";

/// One downloadable resource.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Resource {
    url: String,
    file_name: String,
    /// UCSC tool binaries need the executable bit set after download
    executable: bool,
}

/// Resource download command.
#[derive(Debug, Clone)]
pub struct FetchCommand {
    /// Directory to download into (created if absent)
    pub resource_dir: PathBuf,
    /// Re-download files that already exist
    pub force: bool,
}

impl FetchCommand {
    pub fn new(resource_dir: impl Into<PathBuf>) -> Self {
        Self {
            resource_dir: resource_dir.into(),
            force: false,
        }
    }

    /// Download all missing resources.
    pub fn run(&self) -> Result<FetchStats, PipelineError> {
        fs::create_dir_all(&self.resource_dir)?;

        let mut stats = FetchStats::default();

        for resource in resources() {
            let dest = self.resource_dir.join(&resource.file_name);

            if dest.exists() && !self.force {
                info!("{} already present, skipping", resource.file_name);
                stats.skipped += 1;
                continue;
            }

            download(&resource.url, &dest)?;
            if resource.executable {
                make_executable(&dest)?;
            }
            stats.downloaded += 1;
        }

        if !Toolchain::new(&self.resource_dir).crossmap_available() {
            warn!("CrossMap not found; install it with `pip install CrossMap`");
        }

        Ok(stats)
    }
}

/// The full resource list: three UCSC tools, both chain directions,
/// both sizes tables.
fn resources() -> Vec<Resource> {
    let mut list = Vec::new();

    for tool in [BIGWIG_TO_BEDGRAPH, BEDGRAPH_TO_BIGWIG, BED_CLIP] {
        list.push(Resource {
            url: format!("{}/{}", TOOL_URL_PREFIX, tool),
            file_name: tool.to_string(),
            executable: true,
        });
    }

    for source in [Assembly::Hg19, Assembly::Hg38] {
        let target = source.other();
        list.push(Resource {
            url: source.chain_url_to(target),
            file_name: source.chain_file_to(target),
            executable: false,
        });
    }

    for assembly in [Assembly::Hg19, Assembly::Hg38] {
        list.push(Resource {
            url: assembly.chrom_sizes_url(),
            file_name: assembly.chrom_sizes_file(),
            executable: false,
        });
    }

    list
}

fn download(url: &str, dest: &Path) -> Result<(), PipelineError> {
    info!("downloading {}", url);

    let resp = reqwest::blocking::get(url)?;
    if !resp.status().is_success() {
        return Err(PipelineError::Download {
            url: url.to_string(),
            status: resp.status(),
        });
    }

    let bytes = resp.bytes()?;
    let mut out = File::create(dest)?;
    io::copy(&mut bytes.as_ref(), &mut out)?;
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Statistics from a fetch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchStats {
    /// Files downloaded this run
    pub downloaded: usize,
    /// Files already present
    pub skipped: usize,
}

impl std::fmt::Display for FetchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Downloaded: {}, Skipped: {}",
            self.downloaded, self.skipped
        )
    }
}
