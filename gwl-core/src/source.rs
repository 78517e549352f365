use crate::error::FetchError;
use crate::location::LocationKey;
use crate::records::FetchBundle;
use async_trait::async_trait;

/// Anything that can produce a complete fetch bundle for a location.
///
/// The HTTP `Fetcher` is the production implementation.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_all(&self, key: LocationKey) -> Result<FetchBundle, FetchError>;
}
