//! Canonical split layout normalization.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::DatafoldError;

/// Canonical training directory name at the output root.
pub const TRAINING_DIR: &str = "Training";
/// Canonical testing directory name at the output root.
pub const TESTING_DIR: &str = "Testing";

/// Canonical locations of the two splits after normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitPaths {
    pub training: PathBuf,
    pub testing: PathBuf,
}

/// Locate the split directories anywhere under `out_dir` and move them into
/// `out_dir/Training` and `out_dir/Testing`.
///
/// Matching is case-insensitive on the directory name. When several
/// directories match the same role, the shallowest one wins, with ties
/// broken by the lexicographically smallest path. Prior canonical
/// directories at the root are deleted and replaced, never merged.
pub fn normalize(out_dir: &Path) -> Result<SplitPaths, DatafoldError> {
    let training_src = locate_split(out_dir, "training")?;
    let testing_src = locate_split(out_dir, "testing")?;

    let training = out_dir.join(TRAINING_DIR);
    let testing = out_dir.join(TESTING_DIR);

    move_into_place(&training_src, &training)?;

    // Relocating the training split may have carried a nested testing
    // candidate along with it.
    let testing_src = if testing_src.is_dir() {
        testing_src
    } else {
        locate_split(out_dir, "testing")?
    };
    move_into_place(&testing_src, &testing)?;

    Ok(SplitPaths { training, testing })
}

/// Find the directory for one split role, excluding the canonical
/// destinations themselves so a stale prior layout is never re-selected.
fn locate_split(out_dir: &Path, role: &str) -> Result<PathBuf, DatafoldError> {
    let canonical_training = out_dir.join(TRAINING_DIR);
    let canonical_testing = out_dir.join(TESTING_DIR);

    let mut candidates: Vec<(usize, PathBuf)> = Vec::new();
    for entry in WalkDir::new(out_dir).min_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if path.starts_with(&canonical_training) || path.starts_with(&canonical_testing) {
            continue;
        }

        let matches = entry
            .file_name()
            .to_str()
            .map(|name| name.eq_ignore_ascii_case(role))
            .unwrap_or(false);
        if matches {
            candidates.push((entry.depth(), path.to_path_buf()));
        }
    }

    candidates.sort();
    candidates
        .into_iter()
        .map(|(_, path)| path)
        .next()
        .ok_or_else(|| DatafoldError::Layout {
            root: out_dir.to_path_buf(),
            message: format!("no directory named '{role}' found"),
        })
}

/// Move `src` to `dest`, replacing any prior directory there.
///
/// Uses rename; falls back to copy-then-remove only when rename fails
/// (e.g. across filesystems).
fn move_into_place(src: &Path, dest: &Path) -> Result<(), DatafoldError> {
    if src == dest {
        return Ok(());
    }

    if dest.is_dir() {
        fs::remove_dir_all(dest)?;
    }

    if fs::rename(src, dest).is_err() {
        copy_tree(src, dest)?;
        fs::remove_dir_all(src)?;
    }

    Ok(())
}

fn copy_tree(src: &Path, dest: &Path) -> Result<(), DatafoldError> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_prefers_shallowest_candidate() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(temp.path().join("wrap/inner/training")).expect("deep candidate");
        fs::create_dir_all(temp.path().join("misc/TRAINING")).expect("shallow candidate");

        let located = locate_split(temp.path(), "training").expect("locate");
        assert_eq!(located, temp.path().join("misc/TRAINING"));
    }

    #[test]
    fn locate_breaks_depth_ties_lexicographically() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(temp.path().join("beta/testing")).expect("candidate");
        fs::create_dir_all(temp.path().join("alpha/Testing")).expect("candidate");

        let located = locate_split(temp.path(), "testing").expect("locate");
        assert_eq!(located, temp.path().join("alpha/Testing"));
    }

    #[test]
    fn locate_ignores_prior_canonical_directories() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(temp.path().join("Training/stale")).expect("stale canonical");
        fs::create_dir_all(temp.path().join("fresh/Training")).expect("fresh candidate");

        let located = locate_split(temp.path(), "training").expect("locate");
        assert_eq!(located, temp.path().join("fresh/Training"));
    }

    #[test]
    fn missing_split_is_a_layout_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(temp.path().join("misc/Training")).expect("training only");

        let err = normalize(temp.path()).expect_err("should fail");
        match err {
            DatafoldError::Layout { message, .. } => {
                assert!(message.contains("testing"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn normalize_replaces_stale_canonical_directories() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(temp.path().join("Training/old_class")).expect("stale");
        fs::create_dir_all(temp.path().join("Testing/old_class")).expect("stale");
        fs::create_dir_all(temp.path().join("wrap/Training/glioma")).expect("fresh");
        fs::create_dir_all(temp.path().join("wrap/Testing/glioma")).expect("fresh");

        let splits = normalize(temp.path()).expect("normalize");
        assert!(splits.training.join("glioma").is_dir());
        assert!(!splits.training.join("old_class").exists());
        assert!(splits.testing.join("glioma").is_dir());
    }
}
