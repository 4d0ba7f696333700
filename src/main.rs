//! bwlift: lift bigWig coverage tracks between hg19 and hg38.
//!
//! Usage: bwlift <COMMAND> [OPTIONS]

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bwlift::assembly::Assembly;
use bwlift::commands::{
    ConvertCommand, FetchCommand, FilterCommand, PipelineError, RepairCommand, SortCommand,
};
use bwlift::genome::ChromSizes;

#[derive(Parser)]
#[command(name = "bwlift")]
#[command(version)]
#[command(about = "Lift bigWig coverage tracks between hg19 and hg38", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a bigWig file from one assembly to the other
    Convert {
        /// Input bigWig file
        #[arg(short, long)]
        input: PathBuf,

        /// Output bigWig file
        #[arg(short, long)]
        output: PathBuf,

        /// Assembly the input is on
        #[arg(short, long)]
        source: Assembly,

        /// Assembly to lift to
        #[arg(short, long)]
        target: Assembly,

        /// Directory with chain files, chrom.sizes and UCSC tools
        #[arg(short, long, default_value = ".")]
        resources: PathBuf,

        /// Keep intermediate bedGraph files for inspection
        #[arg(long)]
        keep_temp: bool,

        /// Fail fast if the sorted intermediate violates sort order
        #[arg(long)]
        check_sorted: bool,
    },

    /// Repair overlapping intervals in a sorted bedGraph file
    Repair {
        /// Input bedGraph file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Fail fast on unsorted input instead of producing garbage
        #[arg(long)]
        check_sorted: bool,

        /// Print repair statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Drop bedGraph lines on chromosomes absent from a sizes file
    Filter {
        /// Input bedGraph file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// chrom.sizes file defining the whitelist
        #[arg(short = 'g', long)]
        sizes: PathBuf,

        /// Print filter statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Sort a bedGraph file by chromosome and start position
    Sort {
        /// Input bedGraph file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Download UCSC tools, chain files and chromosome sizes
    Fetch {
        /// Directory to download into
        #[arg(short, long, default_value = ".")]
        resources: PathBuf,

        /// Re-download files that already exist
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            source,
            target,
            resources,
            keep_temp,
            check_sorted,
        } => run_convert(input, output, source, target, resources, keep_temp, check_sorted),

        Commands::Repair {
            input,
            check_sorted,
            stats,
        } => run_repair(input, check_sorted, stats),

        Commands::Filter {
            input,
            sizes,
            stats,
        } => run_filter(input, sizes, stats),

        Commands::Sort { input } => run_sort(input),

        Commands::Fetch { resources, force } => run_fetch(resources, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_convert(
    input: PathBuf,
    output: PathBuf,
    source: Assembly,
    target: Assembly,
    resources: PathBuf,
    keep_temp: bool,
    check_sorted: bool,
) -> Result<(), PipelineError> {
    let mut cmd = ConvertCommand::new(source, target).with_resource_dir(resources);
    cmd.keep_temp = keep_temp;
    cmd.check_sorted = check_sorted;

    cmd.run(&input, &output)?;
    Ok(())
}

fn run_repair(
    input: Option<PathBuf>,
    check_sorted: bool,
    stats: bool,
) -> Result<(), PipelineError> {
    let cmd = RepairCommand::new().with_check_sorted(check_sorted);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let result = match input {
        Some(path) if path.to_string_lossy() != "-" => cmd.run(&path, &mut handle)?,
        _ => cmd.run_stdin(&mut handle)?,
    };

    if stats {
        eprintln!("Repair stats: {}", result);
    }

    Ok(())
}

fn run_filter(
    input: Option<PathBuf>,
    sizes_path: PathBuf,
    stats: bool,
) -> Result<(), PipelineError> {
    let sizes = ChromSizes::from_file(&sizes_path)?;
    let cmd = FilterCommand::new();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let result = match input {
        Some(path) if path.to_string_lossy() != "-" => cmd.run(&path, &sizes, &mut handle)?,
        _ => cmd.run_stdin(&sizes, &mut handle)?,
    };

    if stats {
        eprintln!("Filter stats: {}", result);
    }

    Ok(())
}

fn run_sort(input: Option<PathBuf>) -> Result<(), PipelineError> {
    let cmd = SortCommand::new();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match input {
        Some(path) if path.to_string_lossy() != "-" => cmd.run(&path, &mut handle)?,
        _ => cmd.run_stdin(&mut handle)?,
    };

    Ok(())
}

fn run_fetch(resources: PathBuf, force: bool) -> Result<(), PipelineError> {
    let mut cmd = FetchCommand::new(resources);
    cmd.force = force;

    let stats = cmd.run()?;
    eprintln!("Fetch complete: {}", stats);
    Ok(())
}
