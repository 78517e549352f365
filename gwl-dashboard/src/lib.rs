//! Chart composition and view-state control for the groundwater dashboard.
//!
//! This crate provides:
//! - `series`: merges historical and forecast levels into a chart-ready series
//! - `state`: the Loading/Ready/Failed view state and its controller
//! - `dashboard`: the async driver that runs fetch cycles per selection

pub mod dashboard;
pub mod series;
pub mod state;

pub use dashboard::{Dashboard, DashboardHandle};
pub use series::{compose, ChartSeries, ComposeError, LABEL_STRIDE};
pub use state::{Commit, Controller, Cycle, ErrorClass, ErrorDetail, ViewState};
