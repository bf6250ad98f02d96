mod client;
mod error;
mod resolver;
mod types;

pub use client::{Catalog, CelestrakClient};
pub use error::CatalogError;
pub use resolver::{resolve, search};
pub use types::{CatalogEntry, SatelliteIdentity};

#[cfg(test)]
pub(crate) use types::{OrbitalElementSet, SearchOutcome};
