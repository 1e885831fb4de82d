//! Zip archive extraction into the staging root.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::DatafoldError;

/// Extract every entry of `archive` under `out_dir`.
///
/// Entry paths stay relative to `out_dir`; entries that would resolve
/// outside it are rejected rather than followed. Re-running overwrites
/// same-named files. Corrupt and password-protected archives fail.
pub fn extract(archive: &Path, out_dir: &Path) -> Result<(), DatafoldError> {
    let file = fs::File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file).map_err(|source| DatafoldError::Extract {
        archive: archive.to_path_buf(),
        message: source.to_string(),
    })?;

    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|source| DatafoldError::Extract {
                archive: archive.to_path_buf(),
                message: source.to_string(),
            })?;

        let Some(relative) = entry.enclosed_name() else {
            return Err(DatafoldError::Extract {
                archive: archive.to_path_buf(),
                message: format!("entry '{}' escapes the output directory", entry.name()),
            });
        };
        let target = out_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = fs::File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
    }

    Ok(())
}
