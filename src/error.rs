//! Crate-wide error type.
//!
//! Only resource acquisition and input parsing fail. "Nothing found" inside the
//! locate pipeline is a normal `Prediction::None`, never an error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A required input file (road network, lexicon, dataset, config) could not be read.
    #[error("Cannot read {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Road-network file parsed but is not usable (bad geometry, unsupported CRS).
    #[error("Invalid road network: {0}")]
    InvalidNetwork(String),

    /// Dataset record is missing `text` or `rta_coords`, or the file is not JSON.
    #[error("Malformed dataset: {0}")]
    MalformedDataset(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Read a whole file, mapping failures to [`Error::SourceUnavailable`].
pub fn read_source(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })
}
