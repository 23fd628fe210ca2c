use crate::models::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_CURRENCY: &str = "USD";

/// Rates relative to a common base currency (`base` itself is 1.0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    pub base: String,
    #[serde(default)]
    pub rates: HashMap<String, f64>,
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}

impl ExchangeRates {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().to_uppercase(),
            rates: HashMap::new(),
        }
    }

    pub fn with_rate(mut self, code: &str, rate: f64) -> Self {
        self.rates.insert(code.to_uppercase(), rate);
        self
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        let code = code.to_uppercase();
        if code == self.base {
            return Some(1.0);
        }
        self.rates
            .get(&code)
            .copied()
            .filter(|r| r.is_finite() && *r > 0.0)
    }

    /// Upper-case the base and every code; later duplicates win
    pub fn normalized(self) -> Self {
        Self {
            base: self.base.trim().to_uppercase(),
            rates: self
                .rates
                .into_iter()
                .map(|(code, rate)| (code.trim().to_uppercase(), rate))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Convert `amount` from one currency to another.
    ///
    /// Returns `None` when either code has no usable rate.
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Option<f64> {
        if from.eq_ignore_ascii_case(to) {
            return Some(amount);
        }
        let from_rate = self.rate(from)?;
        let to_rate = self.rate(to)?;
        Some(amount / from_rate * to_rate)
    }

    pub fn convert_money(&self, money: &Money, to: &str) -> Option<Money> {
        self.convert(money.value, &money.currency, to)
            .map(|value| Money::new(to.to_uppercase(), value))
    }
}

/// Display currency for an ISO 3166 alpha-2 country code
pub fn currency_for_country(country_code: &str) -> &'static str {
    match country_code.trim().to_uppercase().as_str() {
        "SA" => "SAR",
        "AE" => "AED",
        "PK" => "PKR",
        "GB" => "GBP",
        "IN" => "INR",
        "QA" => "QAR",
        "KW" => "KWD",
        "BH" => "BHD",
        "OM" => "OMR",
        "TR" => "TRY",
        "MY" => "MYR",
        "ID" => "IDR",
        "CA" => "CAD",
        "AU" => "AUD",
        "AT" | "BE" | "CY" | "DE" | "EE" | "ES" | "FI" | "FR" | "GR" | "HR" | "IE" | "IT"
        | "LT" | "LU" | "LV" | "MT" | "NL" | "PT" | "SI" | "SK" => "EUR",
        _ => DEFAULT_CURRENCY,
    }
}

/// Format as `"CODE 1,234.50"`
pub fn format_price(money: &Money) -> String {
    let negative = money.value < 0.0;
    let fixed = format!("{:.2}", money.value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!(
        "{} {}{}.{}",
        money.currency,
        if negative { "-" } else { "" },
        grouped,
        frac
    )
}
