//! Genome assembly identifiers and UCSC resource naming.
//!
//! Conversions are only defined between the two human assemblies the
//! UCSC liftOver chain files cover: hg19 and hg38.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use thiserror::Error;

/// Base URL for UCSC goldenPath downloads (chain files, chrom.sizes).
pub const GOLDENPATH_URL: &str = "https://hgdownload.cse.ucsc.edu/goldenpath";

/// Error returned when an assembly name is not recognized.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown assembly '{0}': expected 'hg19' or 'hg38'")]
pub struct ParseAssemblyError(String);

/// A human reference genome assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Assembly {
    /// GRCh37 / hg19
    Hg19,
    /// GRCh38 / hg38
    Hg38,
}

impl Assembly {
    /// The lowercase UCSC name ("hg19" or "hg38").
    pub fn ucsc_name(&self) -> &'static str {
        match self {
            Assembly::Hg19 => "hg19",
            Assembly::Hg38 => "hg38",
        }
    }

    /// The sentence-case form used in chain file names ("Hg19" or "Hg38").
    fn capitalized(&self) -> &'static str {
        match self {
            Assembly::Hg19 => "Hg19",
            Assembly::Hg38 => "Hg38",
        }
    }

    /// The other assembly of the pair.
    pub fn other(&self) -> Assembly {
        match self {
            Assembly::Hg19 => Assembly::Hg38,
            Assembly::Hg38 => Assembly::Hg19,
        }
    }

    /// File name of this assembly's chromosome sizes table.
    pub fn chrom_sizes_file(&self) -> String {
        format!("{}.chrom.sizes", self.ucsc_name())
    }

    /// Download URL for this assembly's chromosome sizes table.
    pub fn chrom_sizes_url(&self) -> String {
        format!(
            "{}/{}/bigZips/{}",
            GOLDENPATH_URL,
            self.ucsc_name(),
            self.chrom_sizes_file()
        )
    }

    /// File name of the liftOver chain from this assembly to `target`.
    ///
    /// Follows the UCSC convention: lowercase source, sentence-case
    /// target, e.g. `hg19ToHg38.over.chain.gz`.
    pub fn chain_file_to(&self, target: Assembly) -> String {
        format!("{}To{}.over.chain.gz", self.ucsc_name(), target.capitalized())
    }

    /// Download URL for the liftOver chain from this assembly to `target`.
    pub fn chain_url_to(&self, target: Assembly) -> String {
        format!(
            "{}/{}/liftOver/{}",
            GOLDENPATH_URL,
            self.ucsc_name(),
            self.chain_file_to(target)
        )
    }
}

impl fmt::Display for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ucsc_name())
    }
}

impl FromStr for Assembly {
    type Err = ParseAssemblyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hg19" => Ok(Assembly::Hg19),
            "hg38" => Ok(Assembly::Hg38),
            other => Err(ParseAssemblyError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_assemblies() {
        assert_eq!("hg19".parse::<Assembly>().unwrap(), Assembly::Hg19);
        assert_eq!("hg38".parse::<Assembly>().unwrap(), Assembly::Hg38);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("hg18".parse::<Assembly>().is_err());
        assert!("GRCh38".parse::<Assembly>().is_err());
        assert!("Hg19".parse::<Assembly>().is_err());
        assert!("".parse::<Assembly>().is_err());
    }

    #[test]
    fn test_chain_file_names() {
        assert_eq!(
            Assembly::Hg19.chain_file_to(Assembly::Hg38),
            "hg19ToHg38.over.chain.gz"
        );
        assert_eq!(
            Assembly::Hg38.chain_file_to(Assembly::Hg19),
            "hg38ToHg19.over.chain.gz"
        );
    }

    #[test]
    fn test_chain_url() {
        assert_eq!(
            Assembly::Hg19.chain_url_to(Assembly::Hg38),
            "https://hgdownload.cse.ucsc.edu/goldenpath/hg19/liftOver/hg19ToHg38.over.chain.gz"
        );
    }

    #[test]
    fn test_chrom_sizes_names() {
        assert_eq!(Assembly::Hg38.chrom_sizes_file(), "hg38.chrom.sizes");
        assert_eq!(
            Assembly::Hg19.chrom_sizes_url(),
            "https://hgdownload.cse.ucsc.edu/goldenpath/hg19/bigZips/hg19.chrom.sizes"
        );
    }

    #[test]
    fn test_other() {
        assert_eq!(Assembly::Hg19.other(), Assembly::Hg38);
        assert_eq!(Assembly::Hg38.other(), Assembly::Hg19);
    }

    #[test]
    fn test_display() {
        assert_eq!(Assembly::Hg19.to_string(), "hg19");
        assert_eq!(Assembly::Hg38.to_string(), "hg38");
    }
}
