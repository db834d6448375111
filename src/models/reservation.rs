use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// A guest's past reservation joined with the booked property's display
/// fields and its computed average rating.
///
/// The column list is explicit; `reservations.id` and `properties.id` would
/// otherwise collide in a `SELECT *` across the join.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GuestReservation {
    pub id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub property_id: i32,
    pub guest_id: i32,
    pub title: String,
    pub cost_per_night: i32,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub city: String,
    pub parking_spaces: i16,
    pub number_of_bathrooms: i16,
    pub number_of_bedrooms: i16,
    pub average_rating: Option<f64>,
}
