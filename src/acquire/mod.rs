//! Acquisition pipeline: fetch, extract, normalize, cleanup.
//!
//! This module owns the one-shot setup phase that turns a remote archive
//! into the canonical `Training`/`Testing` layout. Remote-specific concerns
//! live in [`fetch`]; the remaining stages are pure filesystem work against
//! the staging root.

pub mod cleanup;
pub mod extract;
pub mod fetch;
pub mod layout;

use std::path::PathBuf;

use crate::error::DatafoldError;

pub use layout::SplitPaths;

/// File name of the staged archive inside the dataset root.
pub const ARCHIVE_FILE_NAME: &str = "dataset.zip";

/// Options for a full acquisition run.
#[derive(Clone, Debug)]
pub struct AcquireOptions {
    /// URL of the zip archive to download.
    pub url: String,
    /// Output root for the canonical layout.
    pub root: PathBuf,
    /// Global timeout for the download, in seconds.
    pub timeout_secs: u64,
}

/// Result of a full acquisition run.
#[derive(Clone, Debug)]
pub struct AcquireReport {
    /// Size of the downloaded archive in bytes.
    pub archive_bytes: u64,
    /// Canonical split locations after normalization.
    pub splits: SplitPaths,
    /// Staging entries deleted by the cleanup sweep.
    pub removed: Vec<PathBuf>,
}

/// Run the full pipeline: fetch, extract, normalize, cleanup.
///
/// The stages are strictly sequential; any failure aborts the run. The
/// normalize and cleanup stages replace prior canonical directories rather
/// than merging into them, so re-running against the same root is safe.
pub fn run(options: &AcquireOptions) -> Result<AcquireReport, DatafoldError> {
    let archive = options.root.join(ARCHIVE_FILE_NAME);

    let archive_bytes = fetch::download(&options.url, &archive, options.timeout_secs)?;
    extract::extract(&archive, &options.root)?;
    let splits = layout::normalize(&options.root)?;
    let removed = cleanup::cleanup(&options.root, &archive)?;

    Ok(AcquireReport {
        archive_bytes,
        splits,
        removed,
    })
}
