//! Typed shape of the upstream hotel search payload.
//!
//! Every field is optional: upstream omits fields freely and the normalizer
//! decides what is required.

use serde::{Deserialize, Deserializer, Serialize};

/// A scalar that upstream sends either as a JSON number or as a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Number(f64),
    Text(String),
}

impl RawScalar {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawScalar::Number(n) => Some(*n),
            RawScalar::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Identifier form: integral numbers print without a fraction
    pub fn as_id(&self) -> Option<String> {
        match self {
            // Beyond 2^63 the cast would saturate and merge distinct ids
            RawScalar::Number(n) if n.fract() == 0.0 && n.abs() < 9.223_372_036_854_776e18 => {
                Some(format!("{}", *n as i64))
            }
            RawScalar::Number(n) => Some(n.to_string()),
            RawScalar::Text(s) if s.trim().is_empty() => None,
            RawScalar::Text(s) => Some(s.trim().to_string()),
        }
    }

    /// Non-negative count; fractional values are accepted only when integral
    pub fn as_count(&self) -> Option<u32> {
        let n = self.as_f64()?;
        if !n.is_finite() || n < 0.0 || n.fract() != 0.0 || n > f64::from(u32::MAX) {
            return None;
        }
        Some(n as u32)
    }
}

/// Treat an explicit `null` list the same as a missing one
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProperty {
    #[serde(alias = "hotelId")]
    pub property_id: Option<RawScalar>,
    pub name: Option<String>,
    #[serde(default, alias = "isSoldOut")]
    pub sold_out: Option<bool>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<RawImage>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub offers: Vec<RawOffer>,
    pub reviews: Option<RawReviews>,
    pub star_rating: Option<RawScalar>,
    pub location: Option<RawLocation>,
    pub locale_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub badges: Vec<RawBadge>,
}

impl RawProperty {
    pub fn is_sold_out(&self) -> bool {
        self.sold_out.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    pub url: Option<String>,
    pub original_url: Option<String>,
}

impl RawImage {
    pub fn resolved_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .or(self.original_url.as_deref())
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawOffer {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub rooms: Vec<RawRoom>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRoom {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub prices: Vec<RawPrice>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPrice {
    pub amount: Option<RawScalar>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReviews {
    #[serde(alias = "score")]
    pub cumulative_rating: Option<RawScalar>,
    #[serde(alias = "count")]
    pub total_count: Option<RawScalar>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLocation {
    pub area: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<RawScalar>,
    pub longitude: Option<RawScalar>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBadge {
    pub text: Option<String>,
    pub variant: Option<String>,
}
