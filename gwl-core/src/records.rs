//! Records returned by the monitoring service.
//!
//! Field names follow the service's JSON so the structs deserialize
//! directly from response bodies.

use serde::{Deserialize, Serialize};

/// Historical well levels, one level per date.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct WellRecord {
    /// Measurement dates, "YYYY-MM-DD"
    pub dates: Vec<String>,
    /// Smoothed water level in metres below ground
    pub levels: Vec<f64>,
}

/// Predicted levels continuing right after the last historical date.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub predicted_levels: Vec<f64>,
    /// Dates of the predicted levels, when the service sends them
    #[serde(default)]
    pub future_dates: Vec<String>,
}

/// Classification of a location plus recommended actions.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Raw label as sent by the service, e.g. "Semi-Critical 🟡"
    pub condition: String,
    pub steps: Vec<String>,
}

/// Coarse severity derived from an analysis condition label.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum Severity {
    Critical,
    SemiCritical,
    Safe,
    Unknown,
}

impl AnalysisRecord {
    /// Classify the raw condition label.
    ///
    /// "Semi-Critical" contains "Critical", so it is matched first.
    pub fn severity(&self) -> Severity {
        let condition = self.condition.as_str();
        if condition.contains("Semi-Critical") {
            Severity::SemiCritical
        } else if condition.contains("Critical") {
            Severity::Critical
        } else if condition.contains("Safe") {
            Severity::Safe
        } else {
            Severity::Unknown
        }
    }
}

/// Everything one fetch cycle retrieves for a location.
#[derive(Debug, PartialEq, Clone)]
pub struct FetchBundle {
    pub well: WellRecord,
    pub forecast: ForecastRecord,
    pub analysis: AnalysisRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(condition: &str) -> AnalysisRecord {
        AnalysisRecord {
            condition: condition.to_string(),
            steps: vec![],
        }
    }

    #[test]
    fn test_severity() {
        assert_eq!(analysis("Critical 🔴").severity(), Severity::Critical);
        assert_eq!(analysis("Semi-Critical 🟡").severity(), Severity::SemiCritical);
        assert_eq!(analysis("Semi-Critical").severity(), Severity::SemiCritical);
        assert_eq!(analysis("Safe 🟢").severity(), Severity::Safe);
        assert_eq!(analysis("Error").severity(), Severity::Unknown);
    }

    #[test]
    fn test_forecast_without_dates() {
        let forecast: ForecastRecord =
            serde_json::from_str(r#"{"predicted_levels": [2.1, 2.0]}"#).unwrap();
        assert_eq!(forecast.predicted_levels, vec![2.1, 2.0]);
        assert!(forecast.future_dates.is_empty());
    }

    #[test]
    fn test_analysis_condition_is_verbatim() {
        let record: AnalysisRecord = serde_json::from_str(
            r#"{"condition": "Semi-Critical", "steps": ["Reduce pumping"]}"#,
        )
        .unwrap();
        assert_eq!(record.condition, "Semi-Critical");
        assert_eq!(record.steps, vec!["Reduce pumping"]);
    }
}
