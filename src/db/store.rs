use async_trait::async_trait;

use crate::error::DbResult;
use crate::models::{GuestReservation, NewProperty, NewUser, Property, PropertyFilter, User};

/// The operations the web layer drives against the relational store.
///
/// Lookups return `Ok(None)` when no row matches; every failure of the store
/// itself surfaces as a [`crate::error::DbError`].
#[async_trait]
pub trait Store: Send + Sync {
    /// Look up a single user by email address (exact match).
    async fn user_by_email(&self, email: &str) -> DbResult<Option<User>>;

    /// Look up a single user by id.
    async fn user_by_id(&self, id: i32) -> DbResult<Option<User>>;

    /// Insert a new user and return the created row.
    async fn create_user(&self, new_user: &NewUser) -> DbResult<User>;

    /// List a guest's past reservations (end date strictly before today),
    /// joined with property details and average rating, ascending by start
    /// date. `limit` defaults to [`crate::db::DEFAULT_RESULT_LIMIT`].
    async fn reservations_for_guest(
        &self,
        guest_id: i32,
        limit: Option<i64>,
    ) -> DbResult<Vec<GuestReservation>>;

    /// Search properties matching every supplied filter, average rating
    /// joined in, ascending by nightly cost, truncated to `limit` rows
    /// (default [`crate::db::DEFAULT_RESULT_LIMIT`]).
    async fn search_properties(
        &self,
        filter: &PropertyFilter,
        limit: Option<i64>,
    ) -> DbResult<Vec<Property>>;

    /// Insert a new listing. The incoming nightly cost is whole currency
    /// units; the persisted value is integer cents.
    async fn create_property(&self, property: &NewProperty) -> DbResult<Property>;

    /// Verify the store answers a trivial round-trip.
    async fn test_connection(&self) -> DbResult<()>;
}
