pub mod connection;
pub mod queries;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::store::Store;
use crate::error::DbResult;
use crate::models::{GuestReservation, NewProperty, NewUser, Property, PropertyFilter, User};

pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn user_by_email(&self, email: &str) -> DbResult<Option<User>> {
        queries::user_by_email(&self.pool, email).await
    }

    async fn user_by_id(&self, id: i32) -> DbResult<Option<User>> {
        queries::user_by_id(&self.pool, id).await
    }

    async fn create_user(&self, new_user: &NewUser) -> DbResult<User> {
        queries::create_user(&self.pool, new_user).await
    }

    async fn reservations_for_guest(
        &self,
        guest_id: i32,
        limit: Option<i64>,
    ) -> DbResult<Vec<GuestReservation>> {
        queries::reservations_for_guest(&self.pool, guest_id, limit).await
    }

    async fn search_properties(
        &self,
        filter: &PropertyFilter,
        limit: Option<i64>,
    ) -> DbResult<Vec<Property>> {
        queries::search_properties(&self.pool, filter, limit).await
    }

    async fn create_property(&self, property: &NewProperty) -> DbResult<Property> {
        queries::create_property(&self.pool, property).await
    }

    async fn test_connection(&self) -> DbResult<()> {
        connection::test_connection(&self.pool).await
    }
}
