// Registered topics are never mutated in place:
// readers get Arc snapshots
// replace builds the new document first, then swaps one pointer
// register is the only writer

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::topic::TopicDocument;
use crate::types::identifiers::{TopicId, TopicVersion};
use crate::validation::{
    Validated, ValidationConfig, ValidationError, ValidationWarning, Validator, WarningKind,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Topic not found: {0}")]
    NotFound(String),
}

/// Outcome of a successful `register`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub id: TopicId,
    pub version: TopicVersion,
    /// Version of the entry this registration replaced, if any.
    pub replaced: Option<TopicVersion>,
    pub warnings: Vec<ValidationWarning>,
}

#[derive(Debug, Clone)]
struct Entry {
    document: Arc<TopicDocument>,
    version: TopicVersion,
}

#[derive(Debug, Clone, Default)]
struct CatalogState {
    entries: Vec<Entry>,
    index: HashMap<TopicId, usize>,
}

impl CatalogState {
    fn get(&self, id: &str) -> Option<&Entry> {
        let id = TopicId::new(id).ok()?;
        self.index.get(&id).map(|&slot| &self.entries[slot])
    }

    /// Insert or replace; a replaced id keeps its listing position.
    fn upsert(&mut self, entry: Entry) -> Option<TopicVersion> {
        match self.index.get(&entry.document.id) {
            Some(&slot) => {
                let previous = std::mem::replace(&mut self.entries[slot], entry);
                Some(previous.version)
            }
            None => {
                self.index
                    .insert(entry.document.id.clone(), self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    fn confusable_with(&self, id: &TopicId) -> Option<&TopicId> {
        let folded = id.fold_key();
        self.entries
            .iter()
            .map(|e| &e.document.id)
            .find(|other| *other != id && other.fold_key() == folded)
    }
}

/// In-memory registry of validated topics, in registration order.
///
/// Share it across threads behind an `Arc`; reads never wait on validation.
#[derive(Debug, Default)]
pub struct Catalog {
    validator: Validator,
    state: RwLock<Arc<CatalogState>>,
}

impl Catalog {
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            validator: Validator::new(config),
            state: RwLock::new(Arc::new(CatalogState::default())),
        }
    }

    pub fn config(&self) -> &ValidationConfig {
        self.validator.config()
    }

    /// Validate `candidate` and store it under `id`, replacing any previous entry.
    ///
    /// On failure the catalog is left untouched and every violation is returned.
    pub fn register(
        &self,
        id: &str,
        candidate: &Value,
    ) -> Result<Registration, Vec<ValidationError>> {
        let Validated {
            document,
            mut warnings,
        } = match self.validator.validate(id, candidate) {
            Ok(validated) => validated,
            Err(errors) => {
                warn!(topic = %id, errors = errors.len(), "rejected topic");
                return Err(errors);
            }
        };

        let id = document.id.clone();
        let version = document.version();
        let entry = Entry {
            document: Arc::new(document),
            version: version.clone(),
        };

        let replaced = {
            let mut guard = self.write();
            let state = Arc::make_mut(&mut *guard);
            if let Some(other) = state.confusable_with(&id) {
                warnings.push(ValidationWarning {
                    kind: WarningKind::ConfusableId,
                    path: "id".into(),
                    message: format!("differs from registered id '{other}' only by case"),
                });
            }
            state.upsert(entry)
        };

        for warning in &warnings {
            warn!(topic = %id, path = %warning.path, kind = %warning.kind, "{}", warning.message);
        }
        match &replaced {
            Some(previous) => info!(
                topic = %id,
                previous = %previous,
                version = %version,
                "replaced topic"
            ),
            None => debug!(topic = %id, version = %version, "registered topic"),
        }

        Ok(Registration {
            id,
            version,
            replaced,
            warnings,
        })
    }

    pub fn get(&self, id: &str) -> Result<Arc<TopicDocument>, CatalogError> {
        self.read()
            .get(id)
            .map(|entry| Arc::clone(&entry.document))
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn version(&self, id: &str) -> Result<TopicVersion, CatalogError> {
        self.read()
            .get(id)
            .map(|entry| entry.version.clone())
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().get(id).is_some()
    }

    /// All topics in registration order.
    pub fn list(&self) -> Vec<Arc<TopicDocument>> {
        self.find(|_| true)
    }

    /// Topics matching `predicate`, in registration order.
    pub fn find<P>(&self, mut predicate: P) -> Vec<Arc<TopicDocument>>
    where
        P: FnMut(&TopicDocument) -> bool,
    {
        self.snapshot()
            .entries
            .iter()
            .filter(|entry| predicate(entry.document.as_ref()))
            .map(|entry| Arc::clone(&entry.document))
            .collect()
    }

    pub fn ids(&self) -> Vec<TopicId> {
        self.read()
            .entries
            .iter()
            .map(|entry| entry.document.id.clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Documents with their versions, in registration order.
    pub(crate) fn versioned(&self) -> Vec<(Arc<TopicDocument>, TopicVersion)> {
        self.snapshot()
            .entries
            .iter()
            .map(|entry| (Arc::clone(&entry.document), entry.version.clone()))
            .collect()
    }

    // Release the lock before running caller code over the entries.
    fn snapshot(&self) -> Arc<CatalogState> {
        let guard = self.read();
        Arc::clone(&*guard)
    }

    fn read(&self) -> RwLockReadGuard<'_, Arc<CatalogState>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arc<CatalogState>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
