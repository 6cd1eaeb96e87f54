//! Data module - embedded census table loading and queries

mod dataset;
mod loader;

pub use dataset::{Dataset, DatasetError, MunicipalityRecord, RegionAggregate};
pub use loader::{DatasetLoader, LoaderError};
