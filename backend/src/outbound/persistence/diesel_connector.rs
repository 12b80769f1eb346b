//! [`StoreConnector`] that opens bb8 pools of Diesel connections.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::domain::connection::Descriptor;
use crate::domain::ports::{ConnectError, StoreConnector};

use super::diesel_store_health::ping_pool;
use super::pool::{DbPool, PoolConfig};

const SUPPORTED_SCHEMES: [&str; 2] = ["postgres", "postgresql"];

/// Opens one pool per descriptor using the service pool limits.
#[derive(Debug, Clone)]
pub struct DieselConnector {
    connection_timeout: Duration,
}

impl DieselConnector {
    /// `connection_timeout` bounds each checkout; keep it at or below the
    /// resolver's probe timeout so a dead host fails the probe promptly.
    pub fn new(connection_timeout: Duration) -> Self {
        Self { connection_timeout }
    }
}

fn validate_descriptor(descriptor: &Descriptor) -> Result<(), ConnectError> {
    let url = Url::parse(descriptor.expose())
        .map_err(|err| ConnectError::open(format!("invalid connection string: {err}")))?;
    if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
        return Err(ConnectError::open(format!(
            "unsupported scheme '{}'",
            url.scheme()
        )));
    }
    Ok(())
}

#[async_trait]
impl StoreConnector for DieselConnector {
    type Handle = DbPool;

    async fn open(&self, descriptor: &Descriptor) -> Result<Self::Handle, ConnectError> {
        validate_descriptor(descriptor)?;
        let config = PoolConfig::new(descriptor.expose())
            .with_connection_timeout(self.connection_timeout);
        DbPool::new(config)
            .await
            .map_err(|err| ConnectError::open(err.to_string()))
    }

    async fn probe(&self, handle: &Self::Handle) -> Result<(), ConnectError> {
        ping_pool(handle).await.map_err(ConnectError::probe)
    }

    async fn close(&self, handle: Self::Handle) {
        debug!("discarding connection pool after failed probe");
        drop(handle);
    }
}
