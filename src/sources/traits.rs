use crate::pipeline::ExchangeRates;
use crate::sources::types::SessionPayload;
use anyhow::Result;
use async_trait::async_trait;

/// Where a hotel search session comes from.
/// New backends (an HTTP search service, a database) plug in here.
#[async_trait]
pub trait HotelSource: Send + Sync {
    /// Load the stored search session
    async fn load(&self) -> Result<SessionPayload>;

    /// Get the name of the session source
    fn source_name(&self) -> &'static str;
}

/// Supplier of an exchange-rate table
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn rates(&self) -> Result<ExchangeRates>;

    fn source_name(&self) -> &'static str;
}
