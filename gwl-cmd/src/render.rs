//! Plain-text rendering of a view state for the terminal.

use gwl_dashboard::{ChartSeries, ViewState};

fn last_value(values: &[Option<f64>]) -> Option<f64> {
    values.iter().rev().find_map(|v| *v)
}

fn series_summary(series: &ChartSeries) -> Vec<String> {
    let history = series.history_len();
    let mut lines = vec![format!(
        "Points: {} historical + {} forecast",
        history,
        series.len() - history
    )];
    if !series.labels.is_empty() {
        lines.push(format!("Labels: {}", series.labels.join(", ")));
    }
    if let Some(level) = last_value(&series.historical) {
        lines.push(format!("Latest level: {:.2} m", level));
    }
    if let Some(level) = last_value(&series.forecast) {
        lines.push(format!("Forecast end: {:.2} m", level));
    }
    lines
}

/// Multi-line description of `state`.
pub fn render(state: &ViewState) -> String {
    match state {
        ViewState::Loading => "Loading...".to_string(),
        ViewState::Ready {
            series,
            analysis,
            location,
        } => {
            let mut lines = vec![format!(
                "{} ({:.4}, {:.4})",
                location.full_display_name, location.center_latitude, location.center_longitude
            )];
            lines.extend(series_summary(series));
            lines.push(format!("Condition: {}", analysis.condition));
            lines.extend(
                analysis
                    .steps
                    .iter()
                    .enumerate()
                    .map(|(i, step)| format!("  {}. {}", i + 1, step)),
            );
            lines.join("\n")
        }
        ViewState::Failed { error, location } => format!(
            "{}\nError ({:?}): {}",
            location.full_display_name, error.class, error.message
        ),
    }
}
