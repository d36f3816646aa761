pub mod catalog;
pub mod sample;

pub use catalog::{CatalogError, FlightCatalog, FlightQuery};
pub use sample::sample_catalog;
