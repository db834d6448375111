use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A rental listing as stored in the `properties` table.
///
/// `cost_per_night` is integer cents. `average_rating` is derived from
/// `property_reviews` at query time and is only populated by search results;
/// rows coming back from an INSERT decode it to `None`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Property {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    pub parking_spaces: i16,
    pub number_of_bathrooms: i16,
    pub number_of_bedrooms: i16,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
}

/// Listing creation payload. `cost_per_night` arrives in whole currency
/// units and is converted to cents before it is persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProperty {
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: f64,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    pub parking_spaces: i16,
    pub number_of_bathrooms: i16,
    pub number_of_bedrooms: i16,
}

/// Optional constraints narrowing a property search. Absent fields mean
/// "no constraint"; prices are whole currency units.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyFilter {
    pub city: Option<String>,
    pub minimum_price_per_night: Option<f64>,
    pub maximum_price_per_night: Option<f64>,
    pub owner_id: Option<i32>,
    pub minimum_rating: Option<f64>,
}
