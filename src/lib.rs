//! Datafold: fetch, normalize, and index class-labeled image datasets.
//!
//! A dataset distributed as a remote zip archive is staged into a canonical
//! two-split layout (`Training`/`Testing`, one subdirectory per class), then
//! served through an immutable index that decodes images on demand and runs
//! them through a caller-supplied transform.
//!
//! # Modules
//!
//! - [`acquire`]: fetch, extract, normalize, and cleanup stages
//! - [`index`]: the dataset index and sample accessor
//! - [`transform`]: the image-to-tensor transform seam
//! - [`preview`]: bounded random preview sampling
//! - [`error`]: error types for datafold operations

pub mod acquire;
pub mod error;
pub mod index;
pub mod preview;
pub mod transform;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::DatafoldError;

use index::{DatasetIndex, DecodePolicy, IndexOptions};
use transform::ResizeToTensor;

/// The datafold CLI application.
#[derive(Parser)]
#[command(name = "datafold")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Fetch a remote dataset archive and normalize it on disk.
    Fetch(FetchArgs),
    /// Build an index over a split directory and report its contents.
    Inspect(InspectArgs),
    /// Decode a random selection of samples for inspection.
    Preview(PreviewArgs),
}

/// Arguments for the fetch subcommand.
#[derive(clap::Args)]
struct FetchArgs {
    /// URL of the zip archive to download.
    url: String,

    /// Output root for the canonical layout.
    #[arg(long, default_value = "./data")]
    root: PathBuf,

    /// Global timeout for the download, in seconds.
    #[arg(long, default_value_t = 300)]
    timeout_secs: u64,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// Split directory to index (e.g. ./data/Training).
    split_dir: PathBuf,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// Fail on unreadable image files instead of skipping them.
    #[arg(long)]
    strict: bool,
}

/// Arguments for the preview subcommand.
#[derive(clap::Args)]
struct PreviewArgs {
    /// Split directory to sample from.
    split_dir: PathBuf,

    /// Number of samples to draw (with replacement).
    #[arg(short = 'n', long, default_value_t = 6)]
    count: usize,

    /// Seed for reproducible draws.
    #[arg(long)]
    seed: Option<u64>,

    /// Square resolution samples are resized to.
    #[arg(long, default_value_t = 256)]
    size: u32,
}

/// Run the datafold CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), DatafoldError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Fetch(args)) => run_fetch(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        Some(Commands::Preview(args)) => run_preview(args),
        None => {
            println!("datafold {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Fetch, normalize, and index class-labeled image datasets.");
            println!();
            println!("Run 'datafold --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the fetch subcommand.
fn run_fetch(args: FetchArgs) -> Result<(), DatafoldError> {
    let options = acquire::AcquireOptions {
        url: args.url,
        root: args.root,
        timeout_secs: args.timeout_secs,
    };

    let report = acquire::run(&options)?;

    println!("Fetched {} byte(s)", report.archive_bytes);
    println!("Training: {}", report.splits.training.display());
    println!("Testing:  {}", report.splits.testing.display());
    println!("Removed {} staging entry(ies)", report.removed.len());
    Ok(())
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), DatafoldError> {
    let options = IndexOptions {
        decode_policy: if args.strict {
            DecodePolicy::Fail
        } else {
            DecodePolicy::Skip
        },
    };
    let index = DatasetIndex::build_with_options(&args.split_dir, &options)?;
    let summary = index.summary();

    match args.output.as_str() {
        "json" => {
            let rendered = serde_json::to_string_pretty(&summary)
                .map_err(|source| std::io::Error::other(source.to_string()))?;
            println!("{rendered}");
        }
        _ => {
            println!(
                "Indexed {} image(s) across {} class(es) under {}",
                summary.total,
                summary.classes.len(),
                summary.root.display()
            );
            for class in &summary.classes {
                println!("  {}: {}", class.name, class.count);
            }
        }
    }

    Ok(())
}

/// Execute the preview subcommand.
fn run_preview(args: PreviewArgs) -> Result<(), DatafoldError> {
    let index = DatasetIndex::build(&args.split_dir)?;
    let pipeline = ResizeToTensor { size: args.size };

    let samples = preview::preview(&index, args.count, &pipeline, args.seed)?;
    for (draw, sample) in samples.iter().enumerate() {
        let shape = sample.image.shape();
        println!(
            "[{draw}] label={} path={} shape={}x{}x{}",
            index.class_name(sample.label).unwrap_or("?"),
            sample.source_path.display(),
            shape[0],
            shape[1],
            shape[2]
        );
    }

    Ok(())
}
