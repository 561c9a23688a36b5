pub mod error;
pub mod manifest;
pub mod snapshot;
pub mod writer;

pub use error::StoreError;
pub use manifest::{record_file, ManifestEntry, SnapshotManifest};
pub use snapshot::Snapshot;
pub use writer::write_snapshot;
