use crate::models::Coordinates;
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Parameters of the hotel search that produced a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// City or area searched
    pub location: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default = "default_rooms")]
    pub rooms: u32,
}

fn default_adults() -> u32 {
    2
}

fn default_rooms() -> u32 {
    1
}

impl Default for SearchParams {
    fn default() -> Self {
        let today = Utc::now().date_naive();
        Self {
            location: "Makkah".to_string(),
            check_in: today,
            check_out: today + Duration::days(1),
            adults: default_adults(),
            rooms: default_rooms(),
        }
    }
}

impl SearchParams {
    /// Stay length in nights, never less than one
    pub fn nights(&self) -> u32 {
        let days = (self.check_out - self.check_in).num_days();
        u32::try_from(days).unwrap_or(0).max(1)
    }
}

/// The city the user picked, carrying the reference point for distances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedCity {
    pub name: String,
    pub country_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl SelectedCity {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        }
    }
}

/// Filter hints sent along with the upstream search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFilterState {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub currency: Option<String>,
}

/// Search session as stored under the session key.
///
/// Hotels stay as raw JSON so one malformed entry does not sink the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub search: SearchParams,
    pub selected_city: Option<SelectedCity>,
    #[serde(default)]
    pub hotels: Vec<serde_json::Value>,
    pub filters: Option<ApiFilterState>,
}
