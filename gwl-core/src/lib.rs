//! Core types and monitoring-service client for groundwater level data.
//!
//! - `location`: the static registry of monitored locations
//! - `records`: wire records returned by the service
//! - `source`: the `DataSource` seam used by the dashboard
//! - `fetcher`: the HTTP implementation (feature `api`)

pub mod error;
pub mod location;
pub mod records;
pub mod source;

#[cfg(feature = "api")]
pub mod fetcher;

pub use error::{ConfigurationError, Endpoint, FetchError};
pub use location::{lookup, LocationInfo, LocationKey};
pub use records::{AnalysisRecord, FetchBundle, ForecastRecord, Severity, WellRecord};
pub use source::DataSource;
