//! bwlift: lift bigWig coverage tracks between hg19 and hg38.
//!
//! The heavy lifting is delegated to external tools (bigWigToBedGraph,
//! CrossMap, bedClip, bedGraphToBigWig); this crate orchestrates them
//! and does the text-level work in between: chromosome filtering,
//! coordinate sorting, and a streaming overlap-repair pass that makes
//! the lifted intervals acceptable to `bedGraphToBigWig` again.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use bwlift::Assembly;
//! use bwlift::commands::ConvertCommand;
//!
//! let cmd = ConvertCommand::new(Assembly::Hg19, Assembly::Hg38)
//!     .with_resource_dir("resources");
//! cmd.run(Path::new("input_hg19.bw"), Path::new("output_hg38.bw")).unwrap();
//! ```

pub mod assembly;
pub mod bedgraph;
pub mod commands;
pub mod genome;
pub mod streaming;
pub mod tools;

// Re-export commonly used types
pub use assembly::Assembly;
pub use bedgraph::{read_records, BedGraphReader, BedGraphRecord};
pub use genome::ChromSizes;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::assembly::Assembly;
    pub use crate::bedgraph::{BedGraphReader, BedGraphRecord};
    pub use crate::commands::{
        ConvertCommand, FetchCommand, FilterCommand, RepairCommand, SortCommand,
    };
    pub use crate::genome::ChromSizes;
}
