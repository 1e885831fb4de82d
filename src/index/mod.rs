//! Class-labeled image folder indexing and sample access.
//!
//! An index is built once over one split directory and is immutable
//! afterwards; rebuilding is the only way to refresh it. Classes are the
//! immediate subdirectories of the root sorted ascending, so labels are
//! stable across runs for the same directory set.

use std::fs;
use std::path::{Path, PathBuf};

use ndarray::Array3;
use serde::Serialize;

use crate::error::DatafoldError;
use crate::transform::Transform;

/// Image extensions admitted into the index (matched case-insensitively).
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Policy for candidate files whose contents are not a readable image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Probe each candidate and silently exclude files that are not images.
    #[default]
    Skip,
    /// Fail the whole build on the first unreadable candidate.
    Fail,
}

/// Options for building a dataset index.
#[derive(Clone, Debug, Default)]
pub struct IndexOptions {
    pub decode_policy: DecodePolicy,
}

/// One (image path, label) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetRecord {
    pub image_path: PathBuf,
    /// Index into the owning [`DatasetIndex`]'s class list.
    pub label: usize,
}

/// A decoded, transformed sample. Owned by the caller; never cached.
#[derive(Clone, Debug)]
pub struct Sample {
    pub image: Array3<f32>,
    pub label: usize,
    pub source_path: PathBuf,
}

/// Per-class record count for reporting.
#[derive(Clone, Debug, Serialize)]
pub struct ClassCount {
    pub name: String,
    pub count: usize,
}

/// Serializable summary of an index.
#[derive(Clone, Debug, Serialize)]
pub struct IndexSummary {
    pub root: PathBuf,
    pub total: usize,
    pub classes: Vec<ClassCount>,
}

/// An immutable index over one split directory.
#[derive(Clone, Debug)]
pub struct DatasetIndex {
    root: PathBuf,
    classes: Vec<String>,
    records: Vec<DatasetRecord>,
}

impl DatasetIndex {
    /// Build an index with the default (permissive) options.
    pub fn build(root: &Path) -> Result<Self, DatafoldError> {
        Self::build_with_options(root, &IndexOptions::default())
    }

    /// Build an index with explicit options.
    ///
    /// Classes are the immediate subdirectories of `root`, sorted ascending
    /// and labeled 0..N-1 in that order. Within each class, file names are
    /// explicitly sorted so record order does not depend on how the
    /// filesystem lists a directory. Non-image entries are skipped. An empty
    /// root yields a zero-length index, not an error.
    pub fn build_with_options(root: &Path, options: &IndexOptions) -> Result<Self, DatafoldError> {
        let mut classes = Vec::new();
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                classes.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        classes.sort();

        let mut records = Vec::new();
        for (label, class) in classes.iter().enumerate() {
            let class_dir = root.join(class);

            let mut file_names = Vec::new();
            for entry in fs::read_dir(&class_dir)? {
                let entry = entry?;
                if !entry.file_type()?.is_file() {
                    continue;
                }
                let name = entry.file_name().to_string_lossy().into_owned();
                if is_image_file(&name) {
                    file_names.push(name);
                }
            }
            file_names.sort();

            for name in file_names {
                let path = class_dir.join(&name);
                match options.decode_policy {
                    DecodePolicy::Skip => {
                        if probe_image(&path).is_err() {
                            continue;
                        }
                    }
                    DecodePolicy::Fail => probe_image(&path)?,
                }
                records.push(DatasetRecord {
                    image_path: path,
                    label,
                });
            }
        }

        Ok(Self {
            root: root.to_path_buf(),
            classes,
            records,
        })
    }

    /// Number of records in the index.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Class names, ordered by label.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Name of the class behind a label, if the label is valid.
    pub fn class_name(&self, label: usize) -> Option<&str> {
        self.classes.get(label).map(String::as_str)
    }

    /// All records, in class order then sorted-file order.
    pub fn records(&self) -> &[DatasetRecord] {
        &self.records
    }

    /// Root directory this index was built from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decode and transform the record at `position`.
    ///
    /// Every call re-reads and re-decodes the file; there is no cache, so
    /// concurrent calls from multiple threads are safe. The source image is
    /// forced to 3-channel RGB before the transform runs.
    pub fn get(&self, position: usize, transform: &dyn Transform) -> Result<Sample, DatafoldError> {
        let record = self
            .records
            .get(position)
            .ok_or(DatafoldError::OutOfRange {
                position,
                len: self.records.len(),
            })?;

        let decoded =
            image::open(&record.image_path).map_err(|source| DatafoldError::Decode {
                path: record.image_path.clone(),
                message: source.to_string(),
            })?;
        let rgb = decoded.to_rgb8();

        Ok(Sample {
            image: transform.apply(rgb),
            label: record.label,
            source_path: record.image_path.clone(),
        })
    }

    /// Summarize the index with per-class record counts.
    pub fn summary(&self) -> IndexSummary {
        let mut counts = vec![0usize; self.classes.len()];
        for record in &self.records {
            counts[record.label] += 1;
        }

        IndexSummary {
            root: self.root.clone(),
            total: self.records.len(),
            classes: self
                .classes
                .iter()
                .zip(counts)
                .map(|(name, count)| ClassCount {
                    name: name.clone(),
                    count,
                })
                .collect(),
        }
    }
}

fn is_image_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Cheap header probe: confirms the file starts like a known image format
/// without decoding the full pixel data.
fn probe_image(path: &Path) -> Result<(), DatafoldError> {
    let reader = image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|source| DatafoldError::Decode {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

    if reader.format().is_none() {
        return Err(DatafoldError::Decode {
            path: path.to_path_buf(),
            message: "unrecognized image format".to_string(),
        });
    }

    Ok(())
}
