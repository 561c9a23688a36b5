//! Validated, in-memory catalog of structured educational topics.
//!
//! `topic-catalog` defines the topic schema (title, description and optional
//! sections such as concepts, approaches, tutorial steps and comparison
//! tables), a fail-slow validator that normalizes authored JSON into
//! [`topic::TopicDocument`] values, and a [`catalog::Catalog`] that serves
//! them by id in registration order. Snapshots of a catalog can be written to
//! disk and reloaded; reloading re-validates every record.

pub mod catalog;
pub mod store;
pub mod topic;
pub mod types;
pub mod validation;

pub use catalog::{Catalog, CatalogError, Registration, SeedError};
pub use topic::{TopicDocument, TopicId, TopicVersion};
pub use validation::{validate, ValidationConfig, ValidationError, ValidationErrorKind, Validator};
