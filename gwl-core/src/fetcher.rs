//! HTTP client for the groundwater monitoring service.
//!
//! A fetch cycle optionally probes the service, then requests well data,
//! the forecast and the analysis for one location concurrently. Any failed
//! request fails the whole cycle.

use crate::{
    error::{Endpoint, FetchError},
    location::LocationKey,
    records::{AnalysisRecord, FetchBundle, ForecastRecord, WellRecord},
    source::DataSource,
};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;

/// Base URL of a locally running monitoring service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// Bound applied to the probe and to every data request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Path of the connectivity probe, relative to the base URL.
pub const DEFAULT_HEALTH_PATH: &str = "health";

/// Connection settings, fixed for the lifetime of a `Fetcher`.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Probe the service before issuing the data requests
    pub probe: bool,
    pub health_path: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            probe: true,
            health_path: DEFAULT_HEALTH_PATH.to_string(),
        }
    }
}

/// Error body sent by the service alongside a non-success status.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Production `DataSource` talking to the monitoring service over HTTP.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn url(&self, endpoint: Endpoint) -> String {
        let path = match endpoint.path() {
            Some(path) => path,
            None => self.config.health_path.as_str(),
        };
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Check that the service answers at all.
    ///
    /// Any HTTP response counts as reachable; only transport failures and
    /// timeouts fail the probe.
    pub async fn probe(&self) -> Result<(), FetchError> {
        let url = self.url(Endpoint::Health);
        match self.client.get(&url).send().await {
            Ok(response) => {
                info!("Probe {} answered {}", url, response.status());
                Ok(())
            }
            Err(e) => {
                warn!("Probe {} failed: {}", url, e);
                Err(FetchError::Unreachable {
                    url,
                    detail: e.to_string(),
                })
            }
        }
    }

    fn send_error(&self, endpoint: Endpoint, url: String, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                endpoint,
                after: self.config.timeout,
            }
        } else {
            FetchError::Unreachable {
                url,
                detail: e.to_string(),
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        key: LocationKey,
    ) -> Result<T, FetchError> {
        let url = self.url(endpoint);
        let response = self
            .client
            .get(&url)
            .query(&[("source", key.source())])
            .send()
            .await
            .map_err(|e| self.send_error(endpoint, url.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            // The body only contributes the service's message; the status decides.
            let message = match response.bytes().await {
                Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
                    .ok()
                    .map(|b| b.error),
                Err(e) => {
                    debug!("Discarding unreadable {} error body: {}", endpoint, e);
                    None
                }
            };
            warn!("{} for {} answered {}", endpoint, key, status);
            return Err(FetchError::HttpStatus {
                endpoint,
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    endpoint,
                    after: self.config.timeout,
                }
            } else {
                FetchError::Decode {
                    endpoint,
                    detail: e.to_string(),
                }
            }
        })?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            endpoint,
            detail: e.to_string(),
        })
    }
}

#[async_trait]
impl DataSource for Fetcher {
    async fn fetch_all(&self, key: LocationKey) -> Result<FetchBundle, FetchError> {
        if self.config.probe {
            self.probe().await?;
        }

        info!("Fetching well data, forecast and analysis for {}", key);
        let (well, forecast, analysis) = tokio::try_join!(
            self.get_json::<WellRecord>(Endpoint::WellData, key),
            self.get_json::<ForecastRecord>(Endpoint::Predict, key),
            self.get_json::<AnalysisRecord>(Endpoint::Analysis, key),
        )?;

        Ok(FetchBundle {
            well,
            forecast,
            analysis,
        })
    }
}
