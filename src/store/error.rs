use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Output directory already exists: {0}")]
    OutputExists(PathBuf),
    #[error("Filename collision detected for record file: {0}")]
    FilenameCollision(String),
    #[error("Invalid version format: {0}")]
    InvalidVersionFormat(String),
    #[error("Record path for {id} must be {expected}, manifest says {file}")]
    InvalidRecordPath {
        id: String,
        file: String,
        expected: String,
    },
    #[error("Duplicate topic id in manifest: {0}")]
    DuplicateTopicId(String),
    #[error("Manifest declares {declared} topics but lists {listed}")]
    CountMismatch { declared: usize, listed: usize },
    #[error("Snapshot version mismatch: manifest says {manifest}, entries hash to {computed}")]
    SnapshotVersionMismatch { manifest: String, computed: String },
    #[error("Topic version mismatch for {id}: manifest says {manifest}, content hashes to {computed}")]
    TopicVersionMismatch {
        id: String,
        manifest: String,
        computed: String,
    },
    #[error("Stored topic {id} failed validation with {} error(s)", .errors.len())]
    InvalidTopic {
        id: String,
        errors: Vec<ValidationError>,
    },
}
