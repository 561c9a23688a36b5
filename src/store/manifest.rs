use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::types::identifiers::{TopicId, TopicVersion};
use crate::validation::ValidationConfig;

const FILE_STEM_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ManifestEntry {
    pub id: TopicId,
    pub version: TopicVersion,
    pub file: String,
}

// Entries keep catalog registration order; a reload lists topics identically.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SnapshotManifest {
    pub snapshot_version: String,
    pub validation: ValidationConfig,
    pub created_at: DateTime<Utc>, // informational only
    pub topic_count: usize,
    pub topics: Vec<ManifestEntry>,
}

/// `sha256` over the validation config followed by one `id:version` line per topic.
pub fn snapshot_version(
    config: &ValidationConfig,
    topics: &[ManifestEntry],
) -> Result<String, serde_json::Error> {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(config)?);
    for entry in topics {
        let line = format!("{}:{}\n", entry.id.as_str(), entry.version.as_str());
        hasher.update(line.as_bytes());
    }
    Ok(format!("sha256:{}", hex::encode(hasher.finalize())))
}

/// Snapshot-relative path of the record holding `version`'s content.
///
/// Returns `None` when the version is not a `sha256:` digest long enough to
/// name a file.
pub fn record_file(version: &TopicVersion) -> Option<String> {
    let stem = version.digest()?.get(..FILE_STEM_LEN)?;
    Some(format!("topics/{stem}.json"))
}
