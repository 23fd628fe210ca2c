pub mod raw;

use serde::{Deserialize, Serialize};

/// An amount of money in a given currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub currency: String,
    pub value: f64,
}

impl Money {
    pub fn new(currency: impl Into<String>, value: f64) -> Self {
        Self {
            currency: currency.into(),
            value,
        }
    }
}

/// Price for the whole stay (nightly price multiplied by nights)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub gross_price: Money,
}

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Marketing flag for a discount or deal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitBadge {
    pub text: String,
    pub variant: Option<String>,
}

/// Review word derived from the 0-10 cumulative score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewWord {
    Excellent,
    Good,
    Average,
    Poor,
}

impl ReviewWord {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewWord::Excellent => "Excellent",
            ReviewWord::Good => "Good",
            ReviewWord::Average => "Average",
            ReviewWord::Poor => "Poor",
        }
    }
}

/// Normalized hotel search result.
///
/// Fields the upstream offer did not resolve are `None`. In particular
/// `price_breakdown` is absent when no non-zero nightly price was found,
/// which means "price unknown", not "free".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelRecord {
    pub id: String,
    pub name: String,
    pub review_score: Option<f64>,
    pub review_count: Option<u32>,
    pub review_score_word: Option<ReviewWord>,
    /// Star rating; `None` when upstream reports none or zero
    pub property_class: Option<u8>,
    pub photo_urls: Vec<String>,
    pub price_breakdown: Option<PriceBreakdown>,
    pub benefit_badges: Vec<BenefitBadge>,
    pub coordinates: Option<Coordinates>,
    pub address: String,
}

impl HotelRecord {
    /// Gross stay price, if known
    pub fn gross_price(&self) -> Option<&Money> {
        self.price_breakdown.as_ref().map(|p| &p.gross_price)
    }

    /// Gross stay value with unknown treated as zero
    pub fn price_value(&self) -> f64 {
        self.gross_price().map(|m| m.value).unwrap_or(0.0)
    }

    pub fn has_deals(&self) -> bool {
        !self.benefit_badges.is_empty()
    }
}
