// Persisted topics are never trusted:
// every record goes back through the validator
// versions are recomputed and compared to the manifest
// record paths are derived from versions, never read from the manifest

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

use super::error::StoreError;
use super::manifest::{record_file, snapshot_version, SnapshotManifest};
use crate::catalog::Catalog;

#[derive(Debug)]
pub struct Snapshot {
    pub root: PathBuf,
    pub manifest: SnapshotManifest,
}

impl Snapshot {
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        let f = fs::File::open(root.join("manifest.json"))?;
        let manifest: SnapshotManifest = serde_json::from_reader(f)?;
        Ok(Snapshot {
            root: root.to_path_buf(),
            manifest,
        })
    }

    /// Rebuild a catalog from the snapshot, in manifest order.
    pub fn load_catalog(&self) -> Result<Catalog, StoreError> {
        let manifest = &self.manifest;

        if manifest.topic_count != manifest.topics.len() {
            return Err(StoreError::CountMismatch {
                declared: manifest.topic_count,
                listed: manifest.topics.len(),
            });
        }

        let computed = snapshot_version(&manifest.validation, &manifest.topics)?;
        if computed != manifest.snapshot_version {
            return Err(StoreError::SnapshotVersionMismatch {
                manifest: manifest.snapshot_version.clone(),
                computed,
            });
        }

        let catalog = Catalog::new(manifest.validation.clone());
        for entry in &manifest.topics {
            let expected = record_file(&entry.version)
                .ok_or_else(|| StoreError::InvalidVersionFormat(entry.version.as_str().to_string()))?;
            if entry.file != expected {
                return Err(StoreError::InvalidRecordPath {
                    id: entry.id.as_str().to_string(),
                    file: entry.file.clone(),
                    expected,
                });
            }

            let f = fs::File::open(self.root.join(&expected))?;
            let candidate: Value = serde_json::from_reader(f)?;

            let registration = catalog
                .register(entry.id.as_str(), &candidate)
                .map_err(|errors| StoreError::InvalidTopic {
                    id: entry.id.as_str().to_string(),
                    errors,
                })?;

            if registration.replaced.is_some() {
                return Err(StoreError::DuplicateTopicId(entry.id.as_str().to_string()));
            }
            if registration.version != entry.version {
                return Err(StoreError::TopicVersionMismatch {
                    id: entry.id.as_str().to_string(),
                    manifest: entry.version.as_str().to_string(),
                    computed: registration.version.as_str().to_string(),
                });
            }
        }

        info!(
            path = %self.root.display(),
            topics = catalog.count(),
            "loaded topic snapshot"
        );
        Ok(catalog)
    }
}
