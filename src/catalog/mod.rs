pub mod catalog;
pub mod seed;

pub use catalog::{Catalog, CatalogError, Registration};
pub use seed::{SeedError, SeedFailure};
