use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

/// Stable key a topic is registered under.
///
/// Deserialization goes through [`TopicId::new`], so persisted ids are held
/// to the same rules as caller-supplied ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TopicId(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopicIdError {
    #[error("Topic id must not be empty")]
    Empty,
}

impl TopicId {
    /// Trim and accept a caller-supplied id.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TopicIdError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TopicIdError::Empty);
        }
        Ok(TopicId(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-folded form. Two distinct ids with the same fold key are confusable.
    pub fn fold_key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl TryFrom<String> for TopicId {
    type Error = TopicIdError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        TopicId::new(raw)
    }
}

impl From<TopicId> for String {
    fn from(id: TopicId) -> Self {
        id.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content hash version of a normalized topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicVersion(String);

impl TopicVersion {
    pub(crate) fn from_hasher(hasher: Sha256) -> Self {
        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        TopicVersion(format!("sha256:{hex}"))
    }

    /// The hex digest without the `sha256:` prefix.
    pub fn digest(&self) -> Option<&str> {
        self.0.strip_prefix("sha256:")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
