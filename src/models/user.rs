use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered guest or property owner.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Stored hash. Never serialized back out to the web layer.
    #[serde(skip_serializing)]
    pub password: String,
}

/// Sign-up payload for a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}
