use crate::models::{Coordinates, HotelRecord};
use crate::pipeline::currency::{ExchangeRates, DEFAULT_CURRENCY};
use crate::pipeline::filter::{filter_hotels, FilterState};
use crate::pipeline::sort::{sort_hotels, SortKey};
use tracing::debug;

/// Everything besides the records and rates that shapes the result list
#[derive(Debug, Clone, PartialEq)]
pub struct RefineQuery {
    pub filters: FilterState,
    pub search_text: String,
    pub sort: SortKey,
    pub display_currency: String,
    pub city: Option<Coordinates>,
}

impl Default for RefineQuery {
    fn default() -> Self {
        Self {
            filters: FilterState::default(),
            search_text: String::new(),
            sort: SortKey::default(),
            display_currency: DEFAULT_CURRENCY.to_string(),
            city: None,
        }
    }
}

/// Filter-then-sort over one search response, memoized on its inputs.
///
/// The result is recomputed only when the query differs from the last one
/// or when the records or rates are replaced.
pub struct Refiner {
    records: Vec<HotelRecord>,
    rates: ExchangeRates,
    cached: Option<(RefineQuery, Vec<HotelRecord>)>,
    recomputations: usize,
}

impl Refiner {
    pub fn new(records: Vec<HotelRecord>, rates: ExchangeRates) -> Self {
        Self {
            records,
            rates,
            cached: None,
            recomputations: 0,
        }
    }

    pub fn records(&self) -> &[HotelRecord] {
        &self.records
    }

    pub fn rates(&self) -> &ExchangeRates {
        &self.rates
    }

    /// Replace the records, e.g. after a new search.
    ///
    /// Filter defaults depend on the observed price range, so callers must
    /// rebuild their query with [`Refiner::default_query`] afterwards; a
    /// query derived from the previous records can hide every new one.
    pub fn set_records(&mut self, records: Vec<HotelRecord>) {
        self.records = records;
        self.cached = None;
    }

    pub fn set_rates(&mut self, rates: ExchangeRates) {
        if rates != self.rates {
            self.rates = rates;
            self.cached = None;
        }
    }

    /// Number of times the pipeline actually ran
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    /// Defaults for a fresh query over the current records
    pub fn default_query(&self, display_currency: &str, city: Option<Coordinates>) -> RefineQuery {
        RefineQuery {
            filters: FilterState::from_records(&self.records, &self.rates, display_currency),
            display_currency: display_currency.to_string(),
            city,
            ..RefineQuery::default()
        }
    }

    pub fn refine(&mut self, query: &RefineQuery) -> &[HotelRecord] {
        let fresh = matches!(&self.cached, Some((last, _)) if last == query);
        if !fresh {
            let filtered = filter_hotels(
                &self.records,
                &query.filters,
                &query.search_text,
                &self.rates,
                &query.display_currency,
                query.city,
            );
            let sorted = sort_hotels(&filtered, query.sort, query.city);
            debug!(
                "Refined {} hotels to {} (sort: {})",
                self.records.len(),
                sorted.len(),
                query.sort
            );
            self.recomputations += 1;
            self.cached = Some((query.clone(), sorted));
        }

        self.cached
            .as_ref()
            .map(|(_, results)| results.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, PriceBreakdown};

    fn hotel(id: &str, price: f64) -> HotelRecord {
        HotelRecord {
            id: id.to_string(),
            name: format!("Hotel {}", id),
            review_score: None,
            review_count: None,
            review_score_word: None,
            property_class: None,
            photo_urls: vec![],
            price_breakdown: Some(PriceBreakdown {
                gross_price: Money::new("USD", price),
            }),
            benefit_badges: vec![],
            coordinates: None,
            address: String::new(),
        }
    }

    #[test]
    fn test_filter_then_sort() {
        let mut refiner = Refiner::new(
            vec![hotel("a", 100.0), hotel("b", 50.0)],
            ExchangeRates::default(),
        );
        let query = RefineQuery {
            filters: FilterState {
                price_range: (0.0, 1000.0),
                ..FilterState::default()
            },
            sort: SortKey::PriceLow,
            ..RefineQuery::default()
        };
        let prices: Vec<f64> = refiner.refine(&query).iter().map(|h| h.price_value()).collect();
        assert_eq!(prices, vec![50.0, 100.0]);
    }

    #[test]
    fn test_memoized_until_inputs_change() {
        let mut refiner = Refiner::new(vec![hotel("a", 10.0)], ExchangeRates::default());
        let mut query = refiner.default_query("USD", None);

        refiner.refine(&query);
        refiner.refine(&query);
        assert_eq!(refiner.recomputations(), 1);

        query.search_text = "hotel".to_string();
        refiner.refine(&query);
        assert_eq!(refiner.recomputations(), 2);

        refiner.set_rates(ExchangeRates::default());
        refiner.refine(&query);
        assert_eq!(refiner.recomputations(), 2);

        refiner.set_rates(ExchangeRates::default().with_rate("SAR", 3.75));
        refiner.refine(&query);
        assert_eq!(refiner.recomputations(), 3);

        refiner.set_records(vec![hotel("b", 20.0)]);
        let query = refiner.default_query("USD", None);
        assert_eq!(refiner.refine(&query)[0].id, "b");
        assert_eq!(refiner.recomputations(), 4);
    }

    #[test]
    fn test_new_records_need_a_fresh_default_query() {
        let mut refiner = Refiner::new(vec![hotel("a", 10.0)], ExchangeRates::default());
        let stale = refiner.default_query("USD", None);
        assert_eq!(stale.filters.price_range, (10.0, 10.0));

        refiner.set_records(vec![hotel("b", 20.0), hotel("c", 35.5)]);
        assert!(refiner.refine(&stale).is_empty());

        let fresh = refiner.default_query("USD", None);
        assert_eq!(fresh.filters.price_range, (20.0, 36.0));
        assert_eq!(refiner.refine(&fresh).len(), 2);
    }

    #[test]
    fn test_default_query_keeps_everything() {
        let mut refiner = Refiner::new(
            vec![hotel("a", 99.5), hotel("b", 10.2)],
            ExchangeRates::default(),
        );
        let query = refiner.default_query("USD", None);
        assert_eq!(refiner.refine(&query).len(), 2);
    }
}
