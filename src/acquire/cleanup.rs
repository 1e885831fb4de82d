//! Post-extraction cleanup of the staging root.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DatafoldError;

use super::layout::{TESTING_DIR, TRAINING_DIR};

/// Delete the staged archive and every stray directory at the root.
///
/// Returns the removed paths. Stray files at the root are left untouched;
/// only directories other than `Training` and `Testing` are swept. Running
/// this on an already-clean tree is a no-op.
pub fn cleanup(out_dir: &Path, archive: &Path) -> Result<Vec<PathBuf>, DatafoldError> {
    let mut removed = Vec::new();

    if archive.is_file() {
        fs::remove_file(archive)?;
        removed.push(archive.to_path_buf());
    }

    let mut strays = Vec::new();
    for entry in fs::read_dir(out_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        if name != TRAINING_DIR && name != TESTING_DIR {
            strays.push(entry.path());
        }
    }
    strays.sort();

    for path in strays {
        fs::remove_dir_all(&path)?;
        removed.push(path);
    }

    Ok(removed)
}
