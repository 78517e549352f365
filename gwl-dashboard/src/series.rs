//! Merging historical and forecast levels into one chart series.
//!
//! Both datasets span the full timeline (history followed by forecast) and
//! are padded with `None` where they have no value, so a renderer can draw
//! them as two overlaid lines on the same axis without overlap.

use gwl_core::{FetchBundle, LocationInfo};
use gwl_utils::dates::{first_out_of_order, following_days, format_date, parse_date};
use serde::Serialize;
use thiserror::Error;

/// Keep one x-axis label every `LABEL_STRIDE` points.
pub const LABEL_STRIDE: usize = 60;

/// A fetch bundle that breaks the record invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComposeError {
    #[error("well data has {dates} dates but {levels} levels")]
    LengthMismatch { dates: usize, levels: usize },

    #[error("invalid well date '{value}' at index {index}")]
    InvalidDate { index: usize, value: String },

    #[error("well date at index {index} is earlier than the one before it")]
    OutOfOrder { index: usize },

    #[error("cannot place {count} forecast values on the date axis")]
    MissingForecastDates { count: usize },

    #[error("{count} forecast days after {last} run past the supported calendar")]
    ForecastOutOfRange { last: String, count: usize },
}

/// Chart-ready series: subsampled labels plus two overlay datasets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Every `LABEL_STRIDE`-th date of the combined timeline
    pub labels: Vec<String>,
    /// Historical levels, `None` over the forecast region
    pub historical: Vec<Option<f64>>,
    /// Predicted levels, `None` over the historical region
    pub forecast: Vec<Option<f64>>,
}

impl ChartSeries {
    /// Number of points on the combined timeline.
    pub fn len(&self) -> usize {
        self.historical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.historical.is_empty()
    }

    /// Number of leading historical points.
    pub fn history_len(&self) -> usize {
        self.historical
            .iter()
            .position(Option::is_none)
            .unwrap_or(self.historical.len())
    }

    /// JSON payload handed to a chart renderer.
    pub fn to_chart_json(&self, location: &LocationInfo) -> serde_json::Value {
        serde_json::json!({
            "title": format!("Groundwater Level: {}", location.full_display_name),
            "yAxisLabel": "Water level (m)",
            "labels": self.labels,
            "datasets": [
                { "label": "Historical", "data": self.historical },
                { "label": "Forecast", "data": self.forecast },
            ],
        })
    }
}

/// Every `LABEL_STRIDE`-th element, starting with the first.
pub fn display_labels(combined: &[String]) -> Vec<String> {
    combined.iter().step_by(LABEL_STRIDE).cloned().collect()
}

/// Build the chart series for a complete fetch bundle.
pub fn compose(bundle: &FetchBundle) -> Result<ChartSeries, ComposeError> {
    let well = &bundle.well;
    let predicted = &bundle.forecast.predicted_levels;

    if well.dates.len() != well.levels.len() {
        return Err(ComposeError::LengthMismatch {
            dates: well.dates.len(),
            levels: well.levels.len(),
        });
    }

    let parsed = well
        .dates
        .iter()
        .enumerate()
        .map(|(index, value)| {
            parse_date(value).map_err(|_| ComposeError::InvalidDate {
                index,
                value: value.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(index) = first_out_of_order(&parsed) {
        return Err(ComposeError::OutOfOrder { index });
    }

    let forecast_dates = if bundle.forecast.future_dates.len() == predicted.len() {
        bundle.forecast.future_dates.clone()
    } else {
        match parsed.last() {
            Some(last) => following_days(last, predicted.len()).ok_or_else(|| {
                ComposeError::ForecastOutOfRange {
                    last: format_date(last),
                    count: predicted.len(),
                }
            })?,
            None if predicted.is_empty() => Vec::new(),
            None => {
                return Err(ComposeError::MissingForecastDates {
                    count: predicted.len(),
                })
            }
        }
    };

    let history = well.levels.len();
    let mut combined_labels = well.dates.clone();
    combined_labels.extend(forecast_dates);

    let historical = well
        .levels
        .iter()
        .copied()
        .map(Some)
        .chain(std::iter::repeat(None).take(predicted.len()))
        .collect();
    let forecast = std::iter::repeat(None)
        .take(history)
        .chain(predicted.iter().copied().map(Some))
        .collect();

    Ok(ChartSeries {
        labels: display_labels(&combined_labels),
        historical,
        forecast,
    })
}
