//! Command implementations for bwlift.

pub mod convert;
pub mod fetch;
pub mod filter;
pub mod repair;
pub mod sort;

use thiserror::Error;

use crate::bedgraph::BedGraphError;
use crate::tools::ToolError;

pub use convert::{ConvertCommand, ConvertStats};
pub use fetch::{FetchCommand, FetchStats};
pub use filter::{FilterCommand, FilterStats};
pub use repair::{RepairCommand, RepairStats};
pub use sort::{SortCommand, SortStats};

/// Errors from the pipeline driver and resource fetching.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    BedGraph(#[from] BedGraphError),

    #[error("{0}")]
    Tool(#[from] ToolError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download of {url} failed with status {status}")]
    Download {
        url: String,
        status: reqwest::StatusCode,
    },
}
