//! Idempotent creation of the `users` table.

use std::time::Duration;

use diesel_async::RunQueryDsl;
use tokio::time::timeout;
use tracing::{info, warn};

use super::diesel_error_mapping::{pool_error_message, timeout_message};
use super::pool::DbPool;

/// Deadline for the DDL statement.
pub const SCHEMA_INIT_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) const CREATE_USERS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    email VARCHAR(100) UNIQUE NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// Errors raised while ensuring the schema exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaInitError {
    #[error("failed to create users table: {message}")]
    Statement { message: String },
    #[error("{message}")]
    Timeout { message: String },
}

/// Create the `users` table when missing.
///
/// # Errors
///
/// Returns [`SchemaInitError`] when the statement fails or exceeds
/// [`SCHEMA_INIT_TIMEOUT`]. Callers treat this as non-fatal.
pub async fn ensure_users_table(pool: &DbPool) -> Result<(), SchemaInitError> {
    let run = async {
        let mut conn = pool
            .get()
            .await
            .map_err(|err| SchemaInitError::Statement {
                message: pool_error_message(err),
            })?;
        diesel::sql_query(CREATE_USERS_TABLE)
            .execute(&mut conn)
            .await
            .map_err(|err| SchemaInitError::Statement {
                message: err.to_string(),
            })
    };

    match timeout(SCHEMA_INIT_TIMEOUT, run).await {
        Ok(Ok(_)) => {
            info!("users table ready");
            Ok(())
        }
        Ok(Err(err)) => {
            warn!(error = %err, "schema initialisation failed");
            Err(err)
        }
        Err(_) => {
            let err = SchemaInitError::Timeout {
                message: timeout_message("creating users table", SCHEMA_INIT_TIMEOUT),
            };
            warn!(error = %err, "schema initialisation failed");
            Err(err)
        }
    }
}
