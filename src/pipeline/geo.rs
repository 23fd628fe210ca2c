use crate::models::{Coordinates, HotelRecord};

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two points (haversine)
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Distance from a hotel to the reference point.
///
/// Returns 0 when either side has no coordinates; callers treat 0 as
/// "distance unknown" and never exclude on it.
pub fn distance_from(hotel: &HotelRecord, center: Option<Coordinates>) -> f64 {
    match (hotel.coordinates, center) {
        (Some(h), Some(c)) => haversine_km(c, h),
        _ => 0.0,
    }
}
