//! Data-access layer for the LightBnB vacation-rental application.
//!
//! The web layer hands this crate filter options and gets typed rows back;
//! everything in between (statement assembly, parameter binding, execution
//! against PostgreSQL) lives here.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod query;

pub use config::{Config, DatabaseConfig};
pub use db::{init_database, Database, PostgresStore, Store, DEFAULT_RESULT_LIMIT};
pub use error::{DbError, DbResult};
pub use models::{GuestReservation, NewProperty, NewUser, Property, PropertyFilter, User};
