use sqlx::PgPool;
use tracing::{debug, error};

use crate::db::DEFAULT_RESULT_LIMIT;
use crate::error::{DbError, DbResult};
use crate::models::{GuestReservation, NewProperty, NewUser, Property, PropertyFilter, User};
use crate::query::SelectBuilder;

fn log_failure(operation: &'static str) -> impl FnOnce(sqlx::Error) -> DbError {
    move |err| {
        error!("{} failed: {}", operation, err);
        DbError::from(err)
    }
}

/// Convert a price in whole currency units to the integer cents the
/// `cost_per_night` column stores.
fn to_cents(units: f64) -> i64 {
    (units * 100.0).round() as i64
}

/// Get a single user by email (exact match)
pub async fn user_by_email(pool: &PgPool, email: &str) -> DbResult<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(log_failure("user lookup by email"))
}

/// Get a single user by id
pub async fn user_by_id(pool: &PgPool, id: i32) -> DbResult<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(log_failure("user lookup by id"))
}

/// Insert a new user and return the created row. A duplicate email surfaces
/// as [`DbError::Constraint`].
pub async fn create_user(pool: &PgPool, new_user: &NewUser) -> DbResult<User> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&new_user.name)
    .bind(&new_user.email)
    .bind(&new_user.password)
    .fetch_one(pool)
    .await
    .map_err(log_failure("user insert"))
}

/// List a guest's past reservations, property details and average rating
/// joined in, ascending by start date.
pub async fn reservations_for_guest(
    pool: &PgPool,
    guest_id: i32,
    limit: Option<i64>,
) -> DbResult<Vec<GuestReservation>> {
    sqlx::query_as::<_, GuestReservation>(RESERVATIONS_FOR_GUEST_SQL)
        .bind(guest_id)
        .bind(limit.unwrap_or(DEFAULT_RESULT_LIMIT))
        .fetch_all(pool)
        .await
        .map_err(log_failure("reservation listing"))
}

// Reservations whose end date is today or later are still upcoming and are
// excluded.
const RESERVATIONS_FOR_GUEST_SQL: &str = r#"
SELECT reservations.id, reservations.start_date, reservations.end_date,
       reservations.property_id, reservations.guest_id,
       properties.title, properties.cost_per_night,
       properties.thumbnail_photo_url, properties.cover_photo_url,
       properties.city, properties.parking_spaces,
       properties.number_of_bathrooms, properties.number_of_bedrooms,
       avg(property_reviews.rating)::double precision AS average_rating
FROM reservations
JOIN properties ON reservations.property_id = properties.id
JOIN property_reviews ON property_reviews.property_id = properties.id
WHERE reservations.guest_id = $1
  AND reservations.end_date < now()::date
GROUP BY reservations.id, properties.id
ORDER BY reservations.start_date
LIMIT $2
"#;

/// Search properties matching every supplied filter, ascending by nightly
/// cost, truncated to `limit` rows.
pub async fn search_properties(
    pool: &PgPool,
    filter: &PropertyFilter,
    limit: Option<i64>,
) -> DbResult<Vec<Property>> {
    let (sql, params) = search_query(filter, limit.unwrap_or(DEFAULT_RESULT_LIMIT));
    debug!("property search SQL: {}", sql);

    let mut query = sqlx::query_as::<_, Property>(&sql);
    for param in &params {
        query = query.bind(param.clone());
    }

    query
        .fetch_all(pool)
        .await
        .map_err(log_failure("property search"))
}

/// Assemble the search statement and its parameter list.
///
/// Conditions are appended in a fixed order (city, minimum price, maximum
/// price, owner) so the parameter positions are deterministic for a given
/// filter. Prices arrive in whole currency units and are compared against
/// the stored cents. Properties without reviews never match: the join to
/// `property_reviews` is inner.
fn search_query(filter: &PropertyFilter, limit: i64) -> (String, Vec<String>) {
    let mut query = SelectBuilder::new(
        "SELECT properties.*, avg(property_reviews.rating)::double precision AS average_rating\n\
         FROM properties\n\
         JOIN property_reviews ON properties.id = property_reviews.property_id",
    );

    if let Some(city) = &filter.city {
        query = query.filter("properties.city LIKE $?", format!("%{}%", city));
    }
    if let Some(minimum) = filter.minimum_price_per_night {
        query = query.filter(
            "properties.cost_per_night >= $?::int",
            to_cents(minimum).to_string(),
        );
    }
    if let Some(maximum) = filter.maximum_price_per_night {
        query = query.filter(
            "properties.cost_per_night <= $?::int",
            to_cents(maximum).to_string(),
        );
    }
    if let Some(owner_id) = filter.owner_id {
        query = query.filter("properties.owner_id = $?::int", owner_id.to_string());
    }

    query = query
        .group_by("properties.id")
        .order_by("properties.cost_per_night");

    // HAVING must name the aggregate itself; the output alias is not in
    // scope there.
    if let Some(rating) = filter.minimum_rating {
        query = query.having(
            "avg(property_reviews.rating) >= $?::numeric",
            rating.to_string(),
        );
    }

    query.limit(limit).build()
}

/// Insert a new listing and return the created row. The nightly cost is
/// converted from whole currency units to cents before binding.
pub async fn create_property(pool: &PgPool, property: &NewProperty) -> DbResult<Property> {
    sqlx::query_as::<_, Property>(
        r#"
        INSERT INTO properties
            (owner_id, title, description, thumbnail_photo_url, cover_photo_url,
             cost_per_night, street, city, province, post_code, country,
             parking_spaces, number_of_bathrooms, number_of_bedrooms)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        "#,
    )
    .bind(property.owner_id)
    .bind(&property.title)
    .bind(&property.description)
    .bind(&property.thumbnail_photo_url)
    .bind(&property.cover_photo_url)
    .bind(to_cents(property.cost_per_night) as i32)
    .bind(&property.street)
    .bind(&property.city)
    .bind(&property.province)
    .bind(&property.post_code)
    .bind(&property.country)
    .bind(property.parking_spaces)
    .bind(property.number_of_bathrooms)
    .bind(property.number_of_bedrooms)
    .fetch_one(pool)
    .await
    .map_err(log_failure("property insert"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> PropertyFilter {
        PropertyFilter::default()
    }

    #[test]
    fn empty_filter_emits_no_conditions() {
        let (sql, params) = search_query(&filter(), 10);

        assert!(!sql.contains("WHERE"));
        assert!(!sql.contains("AND properties"));
        assert!(!sql.contains("HAVING"));
        assert!(sql.contains("GROUP BY properties.id"));
        assert!(sql.contains("ORDER BY properties.cost_per_night"));
        assert!(sql.ends_with("LIMIT $1::bigint"));
        assert_eq!(params, vec!["10"]);
    }

    #[test]
    fn city_only_uses_where_with_substring_pattern() {
        let mut options = filter();
        options.city = Some("Vancouver".to_string());

        let (sql, params) = search_query(&options, 10);

        assert!(sql.contains("WHERE properties.city LIKE $1"));
        assert!(!sql.contains("\nAND "));
        assert!(!sql.contains("HAVING"));
        assert_eq!(params[0], "%Vancouver%");
    }

    #[test]
    fn city_and_minimum_price_emit_where_then_and() {
        let mut options = filter();
        options.city = Some("Toronto".to_string());
        options.minimum_price_per_night = Some(100.0);

        let (sql, params) = search_query(&options, 10);

        let where_pos = sql.find("WHERE properties.city LIKE $1").unwrap();
        let and_pos = sql.find("AND properties.cost_per_night >= $2").unwrap();
        assert!(and_pos > where_pos);
        assert_eq!(params[0], "%Toronto%");
        assert_eq!(params[1], "10000");
    }

    #[test]
    fn minimum_price_alone_still_uses_where() {
        let mut options = filter();
        options.minimum_price_per_night = Some(50.0);

        let (sql, params) = search_query(&options, 10);

        assert!(sql.contains("WHERE properties.cost_per_night >= $1"));
        assert!(!sql.contains("\nAND "));
        assert_eq!(params[0], "5000");
    }

    #[test]
    fn minimum_rating_emits_having_after_group_by() {
        let mut options = filter();
        options.minimum_rating = Some(4.0);

        let (sql, params) = search_query(&options, 10);

        let group_pos = sql.find("GROUP BY properties.id").unwrap();
        let having_pos = sql
            .find("HAVING avg(property_reviews.rating) >= $1")
            .unwrap();
        assert!(having_pos > group_pos);
        assert_eq!(params, vec!["4", "10"]);
    }

    #[test]
    fn all_filters_number_placeholders_contiguously() {
        let options = PropertyFilter {
            city: Some("Montreal".to_string()),
            minimum_price_per_night: Some(80.0),
            maximum_price_per_night: Some(250.5),
            owner_id: Some(7),
            minimum_rating: Some(3.5),
        };

        let (sql, params) = search_query(&options, 25);

        assert!(sql.contains("WHERE properties.city LIKE $1"));
        assert!(sql.contains("AND properties.cost_per_night >= $2"));
        assert!(sql.contains("AND properties.cost_per_night <= $3"));
        assert!(sql.contains("AND properties.owner_id = $4"));
        assert!(sql.contains("HAVING avg(property_reviews.rating) >= $5"));
        assert!(sql.ends_with("LIMIT $6::bigint"));
        assert_eq!(params, vec!["%Montreal%", "8000", "25050", "7", "3.5", "25"]);
    }

    #[test]
    fn maximum_price_alone_uses_where_with_correct_spacing() {
        let mut options = filter();
        options.maximum_price_per_night = Some(120.0);

        let (sql, params) = search_query(&options, 10);

        assert!(sql.contains("WHERE properties.cost_per_night <= $1"));
        assert!(!sql.contains(")WHERE"));
        assert_eq!(params[0], "12000");
    }

    #[test]
    fn cents_conversion_rounds_to_integer() {
        assert_eq!(to_cents(150.0), 15000);
        assert_eq!(to_cents(99.99), 9999);
        assert_eq!(to_cents(0.1), 10);
    }

    #[test]
    fn reservation_listing_only_returns_past_stays() {
        assert!(RESERVATIONS_FOR_GUEST_SQL.contains("end_date < now()::date"));
        assert!(RESERVATIONS_FOR_GUEST_SQL.contains("ORDER BY reservations.start_date"));
    }
}
