use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Relative location the identifier list is read from by default.
pub const DEFAULT_DATASET_PATH: &str = "identities.json";

/// Ordered, immutable list of identity handles shared by every virtual user.
///
/// Backed by an `Arc<[String]>`: a clone hands out a reference to the same
/// allocation, so the source file is read and parsed once per process no
/// matter how many concurrent iterations walk the list.
#[derive(Debug, Clone)]
pub struct Dataset {
    ids: Arc<[String]>,
}

impl Dataset {
    /// Read a JSON array of identifier strings from `path`.
    ///
    /// Call once at startup and clone the value into each virtual user. An
    /// empty array is a configuration error rather than an empty workload;
    /// it would silently turn every iteration into a no-op.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let ids: Vec<String> = serde_json::from_str(&raw)?;
        if ids.is_empty() {
            return Err(LoadError::Empty {
                path: path.display().to_string(),
            });
        }
        debug!(count = ids.len(), path = %path.display(), "Loaded identity dataset");
        Ok(Self::from_ids(ids))
    }

    /// Wrap identifiers sourced elsewhere. May be empty; an empty dataset
    /// produces empty batches.
    pub fn from_ids(ids: Vec<String>) -> Self {
        Self { ids: ids.into() }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Fatal at startup; no iteration runs after one of these.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Unable to read the identity dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Identity dataset is not a JSON array of strings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Identity dataset at {path} is empty.")]
    Empty { path: String },
}
