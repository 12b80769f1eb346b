//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Thin adapters over `diesel-async` and `bb8`: they translate between row
//! structs and domain types and map every failure to a port error. Row
//! structs (`models.rs`) and table definitions (`schema.rs`) stay private.
//!
//! # Example
//!
//! ```no_run
//! use ms_app::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/app")).await?;
//! let repo = DieselUserRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_connector;
mod diesel_error_mapping;
mod diesel_store_health;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;
mod schema_init;

pub use diesel_connector::DieselConnector;
pub use diesel_store_health::DieselStoreHealth;
pub use diesel_user_repository::{DieselUserRepository, QUERY_TIMEOUT};
pub use pool::{DbPool, PoolConfig, PoolError};
pub use schema_init::{SCHEMA_INIT_TIMEOUT, SchemaInitError, ensure_users_table};
