use crate::models::{Coordinates, HotelRecord};
use crate::pipeline::geo::distance_from;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Result ordering chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    BestMatch,
    PriceLow,
    PriceHigh,
    Rating,
    Reviews,
    Distance,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::BestMatch => "best-match",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
            SortKey::Reviews => "reviews",
            SortKey::Distance => "distance",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised keys fall back to best match
impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "price-low" => SortKey::PriceLow,
            "price-high" => SortKey::PriceHigh,
            "rating" => SortKey::Rating,
            "reviews" => SortKey::Reviews,
            "distance" => SortKey::Distance,
            _ => SortKey::BestMatch,
        })
    }
}

/// Stable sort of a copy of `records`; ties keep their input order
pub fn sort_hotels(
    records: &[HotelRecord],
    key: SortKey,
    city: Option<Coordinates>,
) -> Vec<HotelRecord> {
    let mut sorted = records.to_vec();
    match key {
        SortKey::PriceLow => sorted.sort_by(|a, b| a.price_value().total_cmp(&b.price_value())),
        SortKey::PriceHigh => sorted.sort_by(|a, b| b.price_value().total_cmp(&a.price_value())),
        SortKey::Rating => sorted.sort_by(|a, b| {
            let (sa, sb) = (a.review_score.unwrap_or(0.0), b.review_score.unwrap_or(0.0));
            sb.total_cmp(&sa)
        }),
        SortKey::Reviews => sorted.sort_by(|a, b| {
            b.review_count
                .unwrap_or(0)
                .cmp(&a.review_count.unwrap_or(0))
        }),
        SortKey::Distance => {
            sorted.sort_by(|a, b| distance_from(a, city).total_cmp(&distance_from(b, city)))
        }
        SortKey::BestMatch => {}
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, PriceBreakdown};

    fn hotel(id: &str, price: Option<f64>) -> HotelRecord {
        HotelRecord {
            id: id.to_string(),
            name: id.to_string(),
            review_score: None,
            review_count: None,
            review_score_word: None,
            property_class: None,
            photo_urls: vec![],
            price_breakdown: price.map(|value| PriceBreakdown {
                gross_price: Money::new("USD", value),
            }),
            benefit_badges: vec![],
            coordinates: None,
            address: String::new(),
        }
    }

    fn ids(records: &[HotelRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("price-low".parse::<SortKey>().unwrap(), SortKey::PriceLow);
        assert_eq!("PRICE-HIGH".parse::<SortKey>().unwrap(), SortKey::PriceHigh);
        assert_eq!("whatever".parse::<SortKey>().unwrap(), SortKey::BestMatch);
        assert_eq!(SortKey::Distance.to_string(), "distance");
    }

    #[test]
    fn test_price_ascending_missing_is_zero() {
        let records = vec![hotel("a", Some(100.0)), hotel("b", None), hotel("c", Some(50.0))];
        let sorted = sort_hotels(&records, SortKey::PriceLow, None);
        assert_eq!(ids(&sorted), vec!["b", "c", "a"]);
        // input untouched
        assert_eq!(ids(&records), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_price_descending() {
        let records = vec![hotel("a", Some(100.0)), hotel("b", Some(300.0)), hotel("c", Some(50.0))];
        assert_eq!(
            ids(&sort_hotels(&records, SortKey::PriceHigh, None)),
            vec!["b", "a", "c"]
        );
    }

    #[test]
    fn test_rating_and_reviews_descending() {
        let mut a = hotel("a", None);
        a.review_score = Some(7.0);
        a.review_count = Some(10);
        let mut b = hotel("b", None);
        b.review_score = Some(9.0);
        b.review_count = Some(2);
        let c = hotel("c", None);
        let records = vec![a, b, c];

        assert_eq!(ids(&sort_hotels(&records, SortKey::Rating, None)), vec!["b", "a", "c"]);
        assert_eq!(ids(&sort_hotels(&records, SortKey::Reviews, None)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_distance_ascending() {
        let center = Coordinates::new(21.4225, 39.8262);
        let mut far = hotel("far", None);
        far.coordinates = Some(Coordinates::new(21.50, 39.90));
        let mut near = hotel("near", None);
        near.coordinates = Some(Coordinates::new(21.42, 39.83));
        let records = vec![far, near];
        assert_eq!(
            ids(&sort_hotels(&records, SortKey::Distance, Some(center))),
            vec!["near", "far"]
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        let records = vec![
            hotel("x", Some(10.0)),
            hotel("y", Some(5.0)),
            hotel("z", Some(10.0)),
            hotel("w", Some(5.0)),
        ];
        assert_eq!(
            ids(&sort_hotels(&records, SortKey::PriceLow, None)),
            vec!["y", "w", "x", "z"]
        );
        assert_eq!(
            ids(&sort_hotels(&records, SortKey::PriceHigh, None)),
            vec!["x", "z", "y", "w"]
        );
    }

    #[test]
    fn test_best_match_preserves_order() {
        let records = vec![hotel("b", Some(2.0)), hotel("a", Some(1.0))];
        assert_eq!(ids(&sort_hotels(&records, SortKey::BestMatch, None)), vec!["b", "a"]);
    }
}
