//! Evaluation datasets: CV examples stored as JSON Lines on disk.

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const CV_SOURCE: &str = "cv";

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: invalid example: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("must be a non-empty list of examples with metadata id available")]
    MissingIds,
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> DatasetError + '_ {
    move |source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleInputs {
    pub cv_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleMetadata {
    pub source: String,
    /// Stable id of the source document (not the stored example's id).
    pub id: Option<String>,
}

/// An example before it is added to a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub inputs: ExampleInputs,
    pub metadata: ExampleMetadata,
}

/// An example as stored in a dataset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredExample {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub example: Example,
}

/// Builds one example per `*.txt` file in `dir`, in file-name order.
/// The file stem becomes the metadata id.
pub fn create_cv_examples(dir: &Path) -> Result<Vec<Example>, DatasetError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(io_err(dir))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    let mut examples = Vec::with_capacity(paths.len());
    for path in paths {
        let cv_text = fs::read_to_string(&path).map_err(io_err(&path))?;
        let id = path.file_stem().map(|s| s.to_string_lossy().into_owned());
        examples.push(Example {
            inputs: ExampleInputs { cv_text },
            metadata: ExampleMetadata {
                source: CV_SOURCE.to_string(),
                id,
            },
        });
    }

    debug!("Loaded {} CV examples from {}", examples.len(), dir.display());
    Ok(examples)
}

/// A dataset backed by a JSONL file.
#[derive(Debug, Clone)]
pub struct Dataset {
    path: PathBuf,
}

impl Dataset {
    /// Opens the dataset, creating an empty file on first use.
    pub fn open_or_create(path: impl Into<PathBuf>) -> Result<Self, DatasetError> {
        let path = path.into();
        if path.exists() {
            info!("Using existing dataset {}", path.display());
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(io_err(parent))?;
            }
            File::create(&path).map_err(io_err(&path))?;
            info!("Created dataset {}", path.display());
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every stored example. Blank lines are skipped.
    pub fn examples(&self) -> Result<Vec<StoredExample>, DatasetError> {
        let file = File::open(&self.path).map_err(io_err(&self.path))?;
        let mut examples = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(io_err(&self.path))?;
            if line.trim().is_empty() {
                continue;
            }
            let example =
                serde_json::from_str(&line).map_err(|source| DatasetError::Corrupt {
                    path: self.path.clone(),
                    line: index + 1,
                    source,
                })?;
            examples.push(example);
        }
        Ok(examples)
    }

    /// Appends the examples whose metadata id is not yet in the dataset.
    /// Returns the examples actually stored.
    pub fn add_new_examples(
        &self,
        new_examples: Vec<Example>,
    ) -> Result<Vec<StoredExample>, DatasetError> {
        if new_examples.is_empty() || new_examples.iter().any(|e| e.metadata.id.is_none()) {
            return Err(DatasetError::MissingIds);
        }
        debug!("{} examples offered", new_examples.len());

        let mut seen: HashSet<String> = self
            .examples()?
            .into_iter()
            .filter_map(|e| e.example.metadata.id)
            .collect();
        debug!("{} examples already in dataset", seen.len());

        let fresh: Vec<Example> = new_examples
            .into_iter()
            .filter(|e| e.metadata.id.as_ref().is_some_and(|id| seen.insert(id.clone())))
            .collect();
        debug!("{} examples are new", fresh.len());

        if fresh.is_empty() {
            warn!("No new examples were added to {}", self.path.display());
            return Ok(Vec::new());
        }

        let now = Utc::now();
        let stored: Vec<StoredExample> = fresh
            .into_iter()
            .map(|example| StoredExample {
                id: Uuid::new_v4(),
                created_at: now,
                example,
            })
            .collect();

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(io_err(&self.path))?;
        for example in &stored {
            let line = serde_json::to_string(example)?;
            writeln!(file, "{line}").map_err(io_err(&self.path))?;
        }

        info!("Added {} examples to {}", stored.len(), self.path.display());
        Ok(stored)
    }
}
