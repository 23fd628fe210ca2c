use crate::models::{Coordinates, HotelRecord};
use crate::pipeline::currency::ExchangeRates;
use crate::pipeline::geo::distance_from;
use crate::pipeline::rating::review_tier;
use std::collections::BTreeSet;

/// User-adjustable filter configuration.
///
/// Unknown values on a record (no price, no score, no star class, no
/// coordinates, no reviews) never exclude it from the results.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Inclusive bounds in the display currency
    pub price_range: (f64, f64),
    /// Review tiers 1-5; empty means any
    pub selected_review_ratings: BTreeSet<u8>,
    /// Inclusive bounds on the 0-10 review score
    pub review_score_range: (f64, f64),
    /// Star classes; empty means any
    pub property_types: BTreeSet<u8>,
    pub has_deals: bool,
    /// Maximum kilometers from the city center; `None` is no limit
    pub distance_from_center: Option<f64>,
    pub review_count_min: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            price_range: (0.0, f64::MAX),
            selected_review_ratings: BTreeSet::new(),
            review_score_range: (0.0, 10.0),
            property_types: BTreeSet::new(),
            has_deals: false,
            distance_from_center: None,
            review_count_min: 0,
        }
    }
}

impl FilterState {
    /// Defaults with the price range spanning the observed prices
    pub fn from_records(records: &[HotelRecord], rates: &ExchangeRates, currency: &str) -> Self {
        let price_range = price_bounds(records, rates, currency)
            .map(|(lo, hi)| (lo.floor(), hi.ceil()))
            .unwrap_or((0.0, 0.0));
        Self {
            price_range,
            ..Self::default()
        }
    }
}

/// Price of a record in the display currency.
///
/// Falls back to the raw value when no rate is known for either side.
/// Unknown prices come back as 0.
pub fn display_price(record: &HotelRecord, rates: &ExchangeRates, currency: &str) -> f64 {
    match record.gross_price() {
        Some(money) => rates
            .convert(money.value, &money.currency, currency)
            .unwrap_or(money.value),
        None => 0.0,
    }
}

/// Lowest and highest known display price, if any record is priced
pub fn price_bounds(
    records: &[HotelRecord],
    rates: &ExchangeRates,
    currency: &str,
) -> Option<(f64, f64)> {
    records
        .iter()
        .map(|r| display_price(r, rates, currency))
        .filter(|p| *p > 0.0)
        .fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
        })
}

/// Apply the full predicate set, keeping input order
pub fn filter_hotels(
    records: &[HotelRecord],
    state: &FilterState,
    search_text: &str,
    rates: &ExchangeRates,
    display_currency: &str,
    city: Option<Coordinates>,
) -> Vec<HotelRecord> {
    let needle = search_text.trim().to_lowercase();
    records
        .iter()
        .filter(|r| passes(r, state, &needle, rates, display_currency, city))
        .cloned()
        .collect()
}

/// Predicates short-circuit in order: price, tier, score, stars, deals,
/// distance, review count, name.
fn passes(
    record: &HotelRecord,
    state: &FilterState,
    needle: &str,
    rates: &ExchangeRates,
    display_currency: &str,
    city: Option<Coordinates>,
) -> bool {
    let price = display_price(record, rates, display_currency);
    if price > 0.0 && (price < state.price_range.0 || price > state.price_range.1) {
        return false;
    }

    let score = record.review_score.unwrap_or(0.0);
    if !state.selected_review_ratings.is_empty()
        && score > 0.0
        && !state.selected_review_ratings.contains(&review_tier(score))
    {
        return false;
    }

    if score >= 1.0
        && (score < state.review_score_range.0 || score > state.review_score_range.1)
    {
        return false;
    }

    let stars = record.property_class.unwrap_or(0);
    if !state.property_types.is_empty() && stars > 0 && !state.property_types.contains(&stars) {
        return false;
    }

    if state.has_deals && !record.has_deals() {
        return false;
    }

    if let Some(max_km) = state.distance_from_center {
        let distance = distance_from(record, city);
        if distance > 0.0 && distance > max_km {
            return false;
        }
    }

    let reviews = record.review_count.unwrap_or(0);
    if reviews > 0 && reviews < state.review_count_min {
        return false;
    }

    needle.is_empty() || record.name.to_lowercase().contains(needle)
}
