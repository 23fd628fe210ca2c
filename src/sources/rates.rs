use crate::cache::TtlCache;
use crate::error::SourceError;
use crate::pipeline::ExchangeRates;
use crate::sources::traits::RateProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Fixed rate table, typically from configuration
pub struct StaticRates {
    rates: ExchangeRates,
}

impl StaticRates {
    pub fn new(rates: ExchangeRates) -> Self {
        Self { rates }
    }
}

#[async_trait]
impl RateProvider for StaticRates {
    async fn rates(&self) -> Result<ExchangeRates> {
        Ok(self.rates.clone())
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

/// Rates fetched from an HTTP endpoint answering `{ "base": ..., "rates": {...} }`
pub struct HttpRates {
    client: Client,
    url: String,
}

impl HttpRates {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl RateProvider for HttpRates {
    async fn rates(&self) -> Result<ExchangeRates> {
        debug!("Fetching rates from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(SourceError::from)
            .context("Failed to fetch exchange rates")?;

        check_status(response.status())?;

        let rates: ExchangeRates = response
            .json()
            .await
            .context("Failed to decode exchange rates")?;
        let rates = finish_rates(rates)?;

        info!("Fetched {} exchange rates (base {})", rates.rates.len(), rates.base);
        Ok(rates)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}

fn check_status(status: StatusCode) -> Result<()> {
    if !status.is_success() {
        warn!("Rate endpoint returned status: {}", status);
        anyhow::bail!("Failed to fetch exchange rates: {}", status);
    }
    Ok(())
}

/// Reject an empty table and normalize codes of a decoded response
fn finish_rates(rates: ExchangeRates) -> Result<ExchangeRates, SourceError> {
    if rates.is_empty() {
        return Err(SourceError::EmptyRates);
    }
    Ok(rates.normalized())
}

/// Wraps a provider so repeated lookups within the TTL skip the provider.
///
/// Meant for long-lived embedders that refine many searches per process.
pub struct CachedRates<P> {
    inner: P,
    cache: Mutex<TtlCache<&'static str, ExchangeRates>>,
}

impl<P: RateProvider> CachedRates<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            cache: Mutex::new(TtlCache::new(ttl)),
        }
    }
}

#[async_trait]
impl<P: RateProvider> RateProvider for CachedRates<P> {
    async fn rates(&self) -> Result<ExchangeRates> {
        let key = self.inner.source_name();
        let mut cache = self.cache.lock().await;
        if let Some(rates) = cache.get(&key) {
            debug!("Using cached {} rates", key);
            return Ok(rates);
        }

        let rates = self.inner.rates().await?;
        cache.insert(key, rates.clone());
        Ok(rates)
    }

    fn source_name(&self) -> &'static str {
        self.inner.source_name()
    }
}
