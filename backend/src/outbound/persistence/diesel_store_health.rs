//! PostgreSQL liveness probe and server introspection.

use async_trait::async_trait;
use diesel::QueryableByName;
use diesel::sql_types::{Nullable, Text};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{StoreHealth, StoreHealthError};

use super::diesel_error_mapping::pool_error_message;
use super::pool::DbPool;

#[derive(QueryableByName)]
struct ServerAddressRow {
    #[diesel(sql_type = Nullable<Text>)]
    address: Option<String>,
}

/// Run `SELECT 1` on a pooled connection.
pub(crate) async fn ping_pool(pool: &DbPool) -> Result<(), String> {
    let mut conn = pool.get().await.map_err(pool_error_message)?;
    diesel::sql_query("SELECT 1")
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(|err| err.to_string())
}

/// [`StoreHealth`] backed by a live pool.
///
/// Calls are unbounded here; `assess_health` applies the health deadline.
#[derive(Clone)]
pub struct DieselStoreHealth {
    pool: DbPool,
}

impl DieselStoreHealth {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn query_server_address(&self) -> Result<Option<String>, String> {
        let mut conn = self.pool.get().await.map_err(pool_error_message)?;
        // NULL for Unix-socket connections.
        let row: ServerAddressRow =
            diesel::sql_query("SELECT host(inet_server_addr()) AS address")
                .get_result(&mut conn)
                .await
                .map_err(|err| err.to_string())?;
        Ok(row.address)
    }
}

#[async_trait]
impl StoreHealth for DieselStoreHealth {
    fn is_connected(&self) -> bool {
        true
    }

    async fn ping(&self) -> Result<(), StoreHealthError> {
        ping_pool(&self.pool).await.map_err(StoreHealthError::probe)
    }

    async fn server_address(&self) -> Option<String> {
        match self.query_server_address().await {
            Ok(address) => address,
            Err(error) => {
                debug!(%error, "server address lookup failed");
                None
            }
        }
    }
}
