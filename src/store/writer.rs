use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::error::StoreError;
use super::manifest::{record_file, snapshot_version, ManifestEntry, SnapshotManifest};
use super::snapshot::Snapshot;
use crate::catalog::Catalog;
use crate::topic::TopicDocument;
use crate::types::identifiers::TopicVersion;

/// Write every topic in `catalog` to a new snapshot directory.
///
/// Files land in a temporary sibling first and the directory is renamed into
/// place at the end, so `output_dir` either holds a complete snapshot or
/// does not exist.
pub fn write_snapshot(catalog: &Catalog, output_dir: &Path) -> Result<Snapshot, StoreError> {
    if output_dir.exists() {
        return Err(StoreError::OutputExists(output_dir.to_path_buf()));
    }

    let topics = catalog.versioned();

    // Identical content shares one file; a file shared by different versions is fatal.
    let mut files: BTreeMap<String, TopicVersion> = BTreeMap::new();
    let mut entries = Vec::with_capacity(topics.len());
    let mut pending = Vec::new();

    for (document, version) in &topics {
        let file = record_file(version)
            .ok_or_else(|| StoreError::InvalidVersionFormat(version.as_str().to_string()))?;

        match files.get(&file) {
            Some(existing) if existing != version => {
                return Err(StoreError::FilenameCollision(file));
            }
            Some(_) => {}
            None => {
                files.insert(file.clone(), version.clone());
                pending.push((document, file.clone()));
            }
        }

        entries.push(ManifestEntry {
            id: document.id.clone(),
            version: version.clone(),
            file,
        });
    }

    let config = catalog.config().clone();
    let version = snapshot_version(&config, &entries)?;

    let manifest = SnapshotManifest {
        snapshot_version: version.clone(),
        validation: config,
        created_at: Utc::now(),
        topic_count: entries.len(),
        topics: entries,
    };

    let suffix = version.strip_prefix("sha256:").unwrap_or(&version);
    let tag: String = suffix.chars().take(12).collect();
    let temp_dir = output_dir.with_extension(format!("tmp.{tag}"));

    // Leftover from a crashed write of this same snapshot.
    if temp_dir.exists() {
        fs::remove_dir_all(&temp_dir)?;
    }

    publish(&temp_dir, output_dir, &pending, &manifest)?;

    info!(
        path = %output_dir.display(),
        topics = manifest.topic_count,
        version = %manifest.snapshot_version,
        "wrote topic snapshot"
    );

    Ok(Snapshot {
        root: output_dir.to_path_buf(),
        manifest,
    })
}

// A failed write leaves neither `output_dir` nor the temp dir behind.
fn publish(
    temp_dir: &Path,
    output_dir: &Path,
    pending: &[(&Arc<TopicDocument>, String)],
    manifest: &SnapshotManifest,
) -> Result<(), StoreError> {
    let written = fill_temp_dir(temp_dir, pending, manifest)
        .and_then(|()| fs::rename(temp_dir, output_dir).map_err(StoreError::from));
    if written.is_err() {
        if let Err(cleanup) = fs::remove_dir_all(temp_dir) {
            warn!(path = %temp_dir.display(), error = %cleanup, "could not remove partial snapshot");
        }
    }
    written
}

fn fill_temp_dir(
    temp_dir: &Path,
    pending: &[(&Arc<TopicDocument>, String)],
    manifest: &SnapshotManifest,
) -> Result<(), StoreError> {
    fs::create_dir_all(temp_dir.join("topics"))?;

    for (document, file) in pending {
        let document: &TopicDocument = document;
        let f = fs::File::create(temp_dir.join(file))?;
        serde_json::to_writer_pretty(&f, document)?;
        f.sync_all()?;
    }

    let f_man = fs::File::create(temp_dir.join("manifest.json"))?;
    serde_json::to_writer_pretty(&f_man, manifest)?;
    f_man.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationConfig;
    use tempfile::tempdir;

    fn empty_manifest() -> SnapshotManifest {
        let config = ValidationConfig::v0();
        SnapshotManifest {
            snapshot_version: snapshot_version(&config, &[]).unwrap(),
            validation: config,
            created_at: Utc::now(),
            topic_count: 0,
            topics: Vec::new(),
        }
    }

    #[test]
    fn failed_rename_removes_temp_dir() {
        let dir = tempdir().unwrap();
        let temp_dir = dir.path().join("snap.tmp.abc");
        let output_dir = dir.path().join("snap");
        // Renaming a directory onto a non-empty one fails.
        fs::create_dir_all(output_dir.join("occupied")).unwrap();

        let result = publish(&temp_dir, &output_dir, &[], &empty_manifest());

        assert!(result.is_err());
        assert!(!temp_dir.exists());
        assert!(output_dir.join("occupied").exists());
    }

    #[test]
    fn successful_publish_moves_temp_dir() {
        let dir = tempdir().unwrap();
        let temp_dir = dir.path().join("snap.tmp.abc");
        let output_dir = dir.path().join("snap");

        publish(&temp_dir, &output_dir, &[], &empty_manifest()).unwrap();

        assert!(!temp_dir.exists());
        assert!(output_dir.join("manifest.json").exists());
        assert!(output_dir.join("topics").is_dir());
    }
}
