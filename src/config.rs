use crate::pipeline::currency::{currency_for_country, ExchangeRates, DEFAULT_CURRENCY};
use crate::pipeline::SortKey;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub rates: RatesConfig,
    #[serde(default)]
    pub results: ResultsConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DisplayConfig {
    pub currency: Option<String>,
    pub country: Option<String>,
}

impl DisplayConfig {
    /// Explicit currency, else the one detected from the country, else USD
    pub fn resolved_currency(&self) -> String {
        self.currency
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_uppercase)
            .or_else(|| {
                self.country
                    .as_deref()
                    .map(|c| currency_for_country(c).to_string())
            })
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

fn default_session_path() -> PathBuf {
    PathBuf::from("session/hotel_search.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct RatesConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_base")]
    pub base: String,
    #[serde(default, rename = "static")]
    pub static_rates: HashMap<String, f64>,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            url: None,
            base: default_base(),
            static_rates: HashMap::new(),
        }
    }
}

impl RatesConfig {
    pub fn static_table(&self) -> ExchangeRates {
        self.static_rates
            .iter()
            .fold(ExchangeRates::new(self.base.as_str()), |rates, (code, rate)| {
                rates.with_rate(code, *rate)
            })
    }
}

fn default_base() -> String {
    DEFAULT_CURRENCY.to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ResultsConfig {
    #[serde(default)]
    pub sort: SortKey,
}

impl Config {
    /// Load from `path`; a missing file gives the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
