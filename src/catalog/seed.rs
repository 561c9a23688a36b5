use std::collections::BTreeSet;

use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

use super::catalog::Catalog;
use crate::types::identifiers::TopicId;
use crate::validation::{ValidationConfig, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedFailure {
    Invalid {
        id: String,
        errors: Vec<ValidationError>,
    },
    DuplicateId(TopicId),
}

/// Startup was refused: at least one seed topic could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Topic catalog seed rejected: {} failure(s)", .failures.len())]
pub struct SeedError {
    pub failures: Vec<SeedFailure>,
}

impl Catalog {
    /// Build a catalog from the fixed startup set.
    ///
    /// Every entry is checked before deciding, so the error lists all bad
    /// seed topics at once. A partially loaded catalog is never returned.
    pub fn from_seed<I, K>(config: ValidationConfig, entries: I) -> Result<Catalog, SeedError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let catalog = Catalog::new(config);
        let mut seen = BTreeSet::new();
        let mut failures = Vec::new();

        for (id, candidate) in entries {
            let id = id.as_ref();

            if let Ok(topic_id) = TopicId::new(id) {
                if !seen.insert(topic_id.clone()) {
                    failures.push(SeedFailure::DuplicateId(topic_id));
                    continue;
                }
            }

            if let Err(errors) = catalog.register(id, &candidate) {
                failures.push(SeedFailure::Invalid {
                    id: id.to_string(),
                    errors,
                });
            }
        }

        if !failures.is_empty() {
            error!(failures = failures.len(), "topic catalog seed rejected");
            return Err(SeedError { failures });
        }

        info!(topics = catalog.count(), "topic catalog loaded");
        Ok(catalog)
    }
}
