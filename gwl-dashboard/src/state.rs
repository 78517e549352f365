//! View state and the controller that owns it.
//!
//! `ViewState` is the only thing the presentation layer ever sees. The
//! `Controller` replaces it wholesale on every transition and hands out
//! `Arc` snapshots, so observers never see a half-updated state.
//!
//! Every selection starts a new `Cycle`. A completion is committed only if
//! it belongs to the current cycle; anything else is stale and dropped.

use crate::series::{compose, ChartSeries, ComposeError};
use gwl_core::{
    lookup, AnalysisRecord, ConfigurationError, FetchBundle, FetchError, LocationInfo,
    LocationKey,
};
use log::{debug, info, warn};
use serde::Serialize;
use std::sync::Arc;

/// What the dashboard is currently showing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ViewState {
    Loading,
    Ready {
        series: ChartSeries,
        analysis: AnalysisRecord,
        location: LocationInfo,
    },
    Failed {
        error: ErrorDetail,
        location: LocationInfo,
    },
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// Location described by a settled state.
    pub fn location(&self) -> Option<&LocationInfo> {
        match self {
            ViewState::Loading => None,
            ViewState::Ready { location, .. } | ViewState::Failed { location, .. } => {
                Some(location)
            }
        }
    }
}

/// Broad kind of failure, for error views.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum ErrorClass {
    Unreachable,
    Timeout,
    HttpStatus,
    Decode,
    Configuration,
    Composition,
}

/// User-facing description of a failed cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetail {
    pub class: ErrorClass,
    pub message: String,
}

impl From<&FetchError> for ErrorDetail {
    fn from(err: &FetchError) -> Self {
        let class = match err {
            FetchError::Unreachable { .. } => ErrorClass::Unreachable,
            FetchError::Timeout { .. } => ErrorClass::Timeout,
            FetchError::HttpStatus { .. } => ErrorClass::HttpStatus,
            FetchError::Decode { .. } => ErrorClass::Decode,
        };
        Self {
            class,
            message: err.to_string(),
        }
    }
}

impl From<&ComposeError> for ErrorDetail {
    fn from(err: &ComposeError) -> Self {
        Self {
            class: ErrorClass::Composition,
            message: err.to_string(),
        }
    }
}

impl From<&ConfigurationError> for ErrorDetail {
    fn from(err: &ConfigurationError) -> Self {
        Self {
            class: ErrorClass::Configuration,
            message: err.to_string(),
        }
    }
}

/// Ticket for one fetch-compose-transition attempt.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Cycle {
    pub id: u64,
    pub key: LocationKey,
}

/// Result of handing a completion to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
    /// The completion produced the new current state
    Applied(Arc<ViewState>),
    /// The completion belonged to a superseded or settled cycle
    Stale,
}

/// Owner of the view state machine.
#[derive(Debug)]
pub struct Controller {
    current: Cycle,
    location: &'static LocationInfo,
    settled: bool,
    state: Arc<ViewState>,
}

impl Controller {
    /// Start in `Loading` with a first cycle for `initial`.
    pub fn new(initial: LocationKey) -> Result<(Self, Cycle), ConfigurationError> {
        let location = lookup(initial)?;
        let cycle = Cycle {
            id: 0,
            key: initial,
        };
        info!("Cycle {} started for {}", cycle.id, initial);
        let controller = Self {
            current: cycle,
            location,
            settled: false,
            state: Arc::new(ViewState::Loading),
        };
        Ok((controller, cycle))
    }

    /// Switch to `key` (or retry it) and go back to `Loading`.
    pub fn select(&mut self, key: LocationKey) -> Result<Cycle, ConfigurationError> {
        let location = lookup(key)?;
        let cycle = Cycle {
            id: self.current.id + 1,
            key,
        };
        info!("Cycle {} started for {}", cycle.id, key);
        self.current = cycle;
        self.location = location;
        self.settled = false;
        self.state = Arc::new(ViewState::Loading);
        Ok(cycle)
    }

    /// Settle `cycle` with the outcome of its fetch.
    pub fn complete(
        &mut self,
        cycle: Cycle,
        outcome: Result<FetchBundle, FetchError>,
    ) -> Commit {
        if cycle != self.current || self.settled {
            debug!(
                "Dropping completion of cycle {} ({}); current is {} ({})",
                cycle.id, cycle.key, self.current.id, self.current.key
            );
            return Commit::Stale;
        }

        let location = *self.location;
        let next = match outcome {
            Ok(bundle) => match compose(&bundle) {
                Ok(series) => {
                    info!(
                        "Cycle {} ready for {}: {} points, condition '{}'",
                        cycle.id,
                        cycle.key,
                        series.len(),
                        bundle.analysis.condition
                    );
                    ViewState::Ready {
                        series,
                        analysis: bundle.analysis,
                        location,
                    }
                }
                Err(e) => {
                    warn!("Cycle {} for {} could not be composed: {}", cycle.id, cycle.key, e);
                    ViewState::Failed {
                        error: ErrorDetail::from(&e),
                        location,
                    }
                }
            },
            Err(e) => {
                warn!("Cycle {} for {} failed: {}", cycle.id, cycle.key, e);
                ViewState::Failed {
                    error: ErrorDetail::from(&e),
                    location,
                }
            }
        };

        self.settled = true;
        self.state = Arc::new(next);
        Commit::Applied(Arc::clone(&self.state))
    }

    pub fn state(&self) -> Arc<ViewState> {
        Arc::clone(&self.state)
    }

    pub fn selected(&self) -> LocationKey {
        self.current.key
    }

    pub fn current_cycle(&self) -> Cycle {
        self.current
    }
}
