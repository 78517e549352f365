/// Error types for the groundwater level client
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Remote endpoints queried during a fetch cycle.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum Endpoint {
    /// Connectivity probe
    Health,
    /// Historical well levels
    WellData,
    /// Forecast extension
    Predict,
    /// Qualitative analysis
    Analysis,
}

impl Endpoint {
    /// Path of the endpoint relative to the service base URL.
    ///
    /// The health path is configurable, so it is not listed here.
    pub fn path(&self) -> Option<&'static str> {
        match self {
            Endpoint::Health => None,
            Endpoint::WellData => Some("well-data"),
            Endpoint::Predict => Some("predict"),
            Endpoint::Analysis => Some("analysis"),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::Health => "health",
            Endpoint::WellData => "well-data",
            Endpoint::Predict => "predict",
            Endpoint::Analysis => "analysis",
        };
        f.write_str(name)
    }
}

/// Failure of one fetch cycle.
///
/// Values are plain data so a failed cycle can be logged, stored in a view
/// state and cloned into test doubles.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The service could not be reached (probe failed or connection refused)
    #[error("monitoring service unreachable at {url}: {detail}")]
    Unreachable { url: String, detail: String },

    /// A request exceeded the configured time bound
    #[error("request to {endpoint} timed out after {after:?}")]
    Timeout { endpoint: Endpoint, after: Duration },

    /// The service answered with a non-success status
    #[error("{endpoint} responded with HTTP {status}{}", message_suffix(.message))]
    HttpStatus {
        endpoint: Endpoint,
        status: u16,
        message: Option<String>,
    },

    /// The response body did not have the expected shape
    #[error("failed to decode {endpoint} response: {detail}")]
    Decode { endpoint: Endpoint, detail: String },
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {}", m),
        None => String::new(),
    }
}

/// Internal invariant violation around location keys.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A string did not name any supported location
    #[error("unknown location '{0}'")]
    UnknownLocation(String),

    /// A key exists but has no registry entry
    #[error("location '{0}' has no registry entry")]
    Unregistered(&'static str),
}
