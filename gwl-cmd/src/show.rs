//! Single fetch cycle for one location.

use crate::render::render;
use anyhow::Context;
use gwl_core::fetcher::{FetchConfig, Fetcher};
use gwl_core::LocationKey;
use gwl_dashboard::{Dashboard, ViewState};
use log::info;
use std::sync::Arc;

/// JSON document printed by `show --json`.
///
/// Ready states also carry the chart payload a renderer would consume.
pub fn state_json(state: &ViewState) -> serde_json::Value {
    let chart = match state {
        ViewState::Ready {
            series, location, ..
        } => series.to_chart_json(location),
        _ => serde_json::Value::Null,
    };
    serde_json::json!({ "state": state, "chart": chart })
}

/// Load `location` once and print the resulting state.
///
/// A failed cycle is reported as an error so the process exits non-zero.
pub async fn run_show(config: FetchConfig, location: &str, json: bool) -> anyhow::Result<()> {
    let key: LocationKey = location.parse()?;
    info!("Loading {} from {}", key, config.base_url);

    let fetcher = Fetcher::new(config).context("failed to build HTTP client")?;
    let (dashboard, handle) = Dashboard::new(Arc::new(fetcher), key)?;
    drop(handle);
    let state = dashboard.run().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&state_json(&state))?);
    } else {
        println!("{}", render(&state));
    }

    if let ViewState::Failed { error, .. } = &*state {
        anyhow::bail!("loading {} failed: {}", key, error.message);
    }
    Ok(())
}
