use crate::error::ParseError;
use crate::models::raw::{RawLocation, RawProperty};
use crate::models::{BenefitBadge, Coordinates, HotelRecord, Money, PriceBreakdown};
use crate::pipeline::currency::DEFAULT_CURRENCY;
use crate::pipeline::rating::review_word;
use serde_json::Value;
use tracing::{debug, info};

pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Turn one raw upstream property into a `HotelRecord`.
///
/// `nights` is the stay length; the resolved nightly price is multiplied by
/// it. Zero is treated as one night.
pub fn normalize_property(raw: &RawProperty, nights: u32) -> Result<HotelRecord, ParseError> {
    let id = raw
        .property_id
        .as_ref()
        .and_then(|id| id.as_id())
        .ok_or(ParseError::MissingId)?;

    let name = raw
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ParseError::MissingName { id: id.clone() })?
        .to_string();

    if raw.is_sold_out() {
        return Err(ParseError::SoldOut { id });
    }

    let photo_urls: Vec<String> = raw
        .images
        .iter()
        .filter_map(|img| img.resolved_url())
        .map(str::to_string)
        .collect();

    let price_breakdown = resolve_nightly_price(raw).map(|nightly| PriceBreakdown {
        gross_price: Money {
            value: nightly.value * f64::from(nights.max(1)),
            currency: nightly.currency,
        },
    });

    let review_score = raw
        .reviews
        .as_ref()
        .and_then(|r| r.cumulative_rating.as_ref())
        .and_then(|s| s.as_f64())
        .filter(|s| s.is_finite() && *s > 0.0)
        .map(|s| s.min(10.0));

    let review_count = raw
        .reviews
        .as_ref()
        .and_then(|r| r.total_count.as_ref())
        .and_then(|c| c.as_count())
        .filter(|c| *c > 0);

    let property_class = raw
        .star_rating
        .as_ref()
        .and_then(|s| s.as_f64())
        .filter(|s| s.is_finite() && *s >= 0.5)
        .map(|s| s.round().min(f64::from(u8::MAX)) as u8);

    let benefit_badges = raw
        .badges
        .iter()
        .filter_map(|b| {
            let text = b.text.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
            Some(BenefitBadge {
                text: text.to_string(),
                variant: b.variant.clone(),
            })
        })
        .collect::<Vec<_>>();

    let record = HotelRecord {
        id,
        name,
        review_score,
        review_count,
        review_score_word: review_score.and_then(review_word),
        property_class,
        photo_urls,
        price_breakdown,
        benefit_badges,
        coordinates: raw.location.as_ref().and_then(resolve_coordinates),
        address: build_address(raw),
    };

    debug!(
        "Normalized {} '{}': price={:?}, score={:?}, stars={:?}, photos={}",
        record.id,
        record.name,
        record.gross_price().map(|m| m.value),
        record.review_score,
        record.property_class,
        record.photo_urls.len()
    );

    Ok(record)
}

/// Parse and normalize a JSON property value
pub fn normalize_value(value: &Value, nights: u32) -> Result<HotelRecord, ParseError> {
    let raw: RawProperty = serde_json::from_value(value.clone())
        .map_err(|e| ParseError::InvalidJson(e.to_string()))?;
    normalize_property(&raw, nights)
}

/// Normalize a batch, dropping records that fail instead of failing the batch
pub fn normalize_all(values: &[Value], nights: u32) -> Vec<HotelRecord> {
    let records: Vec<HotelRecord> = values
        .iter()
        .filter_map(|value| match normalize_value(value, nights) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Dropping hotel: {}", e);
                None
            }
        })
        .collect();

    info!(
        "Normalized {} of {} hotels ({} night(s))",
        records.len(),
        values.len(),
        nights.max(1)
    );

    records
}

/// First offer, first room, first price entry; zero or unparsable is no price
fn resolve_nightly_price(raw: &RawProperty) -> Option<Money> {
    let price = raw.offers.first()?.rooms.first()?.prices.first()?;
    let value = price
        .amount
        .as_ref()
        .and_then(|a| a.as_f64())
        .filter(|v| v.is_finite() && *v > 0.0)?;
    let currency = price
        .currency
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CURRENCY)
        .to_uppercase();
    Some(Money { currency, value })
}

fn resolve_coordinates(location: &RawLocation) -> Option<Coordinates> {
    let lat = location.latitude.as_ref()?.as_f64()?;
    let lng = location.longitude.as_ref()?.as_f64()?;
    let valid = (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng);
    // Upstream sends 0,0 for "no coordinates"
    if !valid || (lat == 0.0 && lng == 0.0) {
        return None;
    }
    Some(Coordinates { lat, lng })
}

fn build_address(raw: &RawProperty) -> String {
    let parts: Vec<&str> = raw
        .location
        .as_ref()
        .map(|loc| {
            [&loc.area, &loc.city, &loc.country]
                .into_iter()
                .filter_map(|part| part.as_deref().map(str::trim))
                .filter(|part| !part.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if !parts.is_empty() {
        return parts.join(", ");
    }

    raw.locale_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(UNKNOWN_LOCATION)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReviewWord;
    use serde_json::json;

    fn raw_hotel() -> Value {
        json!({
            "propertyId": 4521,
            "name": "Swissotel Makkah",
            "images": [
                { "url": "https://img.example/1.jpg" },
                { "url": "" },
                { "originalUrl": "https://img.example/2.jpg" },
                {}
            ],
            "offers": [
                { "rooms": [ { "prices": [ { "amount": "120.50", "currency": "sar" } ] } ] },
                { "rooms": [ { "prices": [ { "amount": 10, "currency": "USD" } ] } ] }
            ],
            "reviews": { "cumulativeRating": 8.4, "totalCount": 1532 },
            "starRating": 5,
            "location": {
                "area": "Ajyad",
                "city": "Makkah",
                "country": "Saudi Arabia",
                "latitude": 21.4186,
                "longitude": 39.8257
            },
            "badges": [ { "text": "Deal", "variant": "discount" }, { "text": "  " } ]
        })
    }

    #[test]
    fn test_full_record() {
        let record = normalize_value(&raw_hotel(), 3).unwrap();
        assert_eq!(record.id, "4521");
        assert_eq!(record.name, "Swissotel Makkah");
        assert_eq!(
            record.photo_urls,
            vec!["https://img.example/1.jpg", "https://img.example/2.jpg"]
        );
        let price = record.gross_price().unwrap();
        assert_eq!(price.currency, "SAR");
        assert!((price.value - 361.5).abs() < 1e-9);
        assert_eq!(record.review_score, Some(8.4));
        assert_eq!(record.review_count, Some(1532));
        assert_eq!(record.review_score_word, Some(ReviewWord::Excellent));
        assert_eq!(record.property_class, Some(5));
        assert_eq!(record.benefit_badges.len(), 1);
        assert_eq!(record.address, "Ajyad, Makkah, Saudi Arabia");
        assert!(record.coordinates.is_some());
    }

    #[test]
    fn test_missing_id_rejected() {
        let mut value = raw_hotel();
        value.as_object_mut().unwrap().remove("propertyId");
        assert_eq!(normalize_value(&value, 1), Err(ParseError::MissingId));
    }

    #[test]
    fn test_missing_name_rejected() {
        let mut value = raw_hotel();
        value["name"] = json!("   ");
        assert!(matches!(
            normalize_value(&value, 1),
            Err(ParseError::MissingName { .. })
        ));
    }

    #[test]
    fn test_sold_out_rejected() {
        let mut value = raw_hotel();
        value["soldOut"] = json!(true);
        assert!(matches!(
            normalize_value(&value, 1),
            Err(ParseError::SoldOut { .. })
        ));
    }

    #[test]
    fn test_no_price_entry_omits_breakdown() {
        let mut value = raw_hotel();
        value["offers"] = json!([{ "rooms": [] }]);
        let record = normalize_value(&value, 2).unwrap();
        assert!(record.price_breakdown.is_none());
        assert_eq!(record.price_value(), 0.0);
    }

    #[test]
    fn test_zero_price_omits_breakdown() {
        let mut value = raw_hotel();
        value["offers"] = json!([{ "rooms": [ { "prices": [ { "amount": 0 } ] } ] }]);
        assert!(normalize_value(&value, 2).unwrap().price_breakdown.is_none());
    }

    #[test]
    fn test_zero_nights_counts_as_one() {
        let record = normalize_value(&raw_hotel(), 0).unwrap();
        assert!((record.price_value() - 120.5).abs() < 1e-9);
    }

    #[test]
    fn test_address_fallbacks() {
        let mut value = raw_hotel();
        value["location"] = json!({ "area": "", "city": "Madinah" });
        assert_eq!(normalize_value(&value, 1).unwrap().address, "Madinah");

        value["location"] = json!({});
        value["localeName"] = json!("Central Area");
        assert_eq!(normalize_value(&value, 1).unwrap().address, "Central Area");

        value.as_object_mut().unwrap().remove("localeName");
        assert_eq!(normalize_value(&value, 1).unwrap().address, UNKNOWN_LOCATION);
    }

    #[test]
    fn test_zero_review_score_has_no_word() {
        let mut value = raw_hotel();
        value["reviews"] = json!({ "cumulativeRating": 0, "totalCount": 0 });
        let record = normalize_value(&value, 1).unwrap();
        assert_eq!(record.review_score, None);
        assert_eq!(record.review_count, None);
        assert_eq!(record.review_score_word, None);
    }

    #[test]
    fn test_zero_coordinates_are_unknown() {
        let mut value = raw_hotel();
        value["location"]["latitude"] = json!(0);
        value["location"]["longitude"] = json!(0);
        assert!(normalize_value(&value, 1).unwrap().coordinates.is_none());
    }

    #[test]
    fn test_normalize_all_drops_bad_records() {
        let mut sold_out = raw_hotel();
        sold_out["soldOut"] = json!(true);
        let values = vec![
            raw_hotel(),
            json!({ "name": "No Id" }),
            json!("not an object"),
            sold_out,
        ];
        let records = normalize_all(&values, 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "4521");
    }

    #[test]
    fn test_review_count_as_string_or_float() {
        let mut value = json!({ "propertyId": 1, "name": "A", "reviews": { "totalCount": "1532" } });
        assert_eq!(normalize_value(&value, 1).unwrap().review_count, Some(1532));

        value["reviews"]["totalCount"] = json!(12.0);
        assert_eq!(normalize_value(&value, 1).unwrap().review_count, Some(12));

        value["reviews"]["totalCount"] = json!("many");
        assert_eq!(normalize_value(&value, 1).unwrap().review_count, None);
    }

    #[test]
    fn test_null_sold_out_means_available() {
        let mut value = raw_hotel();
        value["soldOut"] = Value::Null;
        assert!(normalize_value(&value, 1).is_ok());
    }

    #[test]
    fn test_null_lists_are_empty() {
        let mut value = raw_hotel();
        value["images"] = Value::Null;
        value["badges"] = Value::Null;
        value["offers"] = json!([{ "rooms": [{ "prices": null }] }]);
        let record = normalize_value(&value, 1).unwrap();
        assert!(record.photo_urls.is_empty());
        assert!(record.benefit_badges.is_empty());
        assert!(record.price_breakdown.is_none());

        value["offers"] = Value::Null;
        assert!(normalize_value(&value, 1).is_ok());
    }

    #[test]
    fn test_loosely_typed_records_survive_batch() {
        let values = vec![
            json!({ "propertyId": 1, "name": "A", "reviews": { "totalCount": "1532" } }),
            json!({ "propertyId": 2, "name": "B", "soldOut": null }),
            json!({ "propertyId": 3, "name": "C", "reviews": { "totalCount": 12.0 } }),
            json!({ "propertyId": 4, "name": "D", "images": null }),
        ];
        assert_eq!(normalize_all(&values, 1).len(), 4);
    }

    #[test]
    fn test_huge_ids_stay_distinct() {
        let a = json!({ "propertyId": 1.0e19, "name": "A" });
        let b = json!({ "propertyId": 2.0e19, "name": "B" });
        let id_a = normalize_value(&a, 1).unwrap().id;
        let id_b = normalize_value(&b, 1).unwrap().id;
        assert_ne!(id_a, id_b);
        assert_ne!(id_a, i64::MAX.to_string());
    }
}
