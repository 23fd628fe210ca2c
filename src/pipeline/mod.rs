//! Hotel result refinement: normalize, filter, sort.

pub mod currency;
pub mod filter;
pub mod geo;
pub mod normalize;
pub mod rating;
pub mod refiner;
pub mod sort;

pub use currency::{currency_for_country, format_price, ExchangeRates};
pub use filter::{filter_hotels, price_bounds, FilterState};
pub use geo::haversine_km;
pub use normalize::{normalize_all, normalize_property};
pub use rating::review_tier;
pub use refiner::{RefineQuery, Refiner};
pub use sort::{sort_hotels, SortKey};
