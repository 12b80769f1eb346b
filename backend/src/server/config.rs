//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use ms_app::domain::HealthContext;
use ms_app::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) health: HealthContext,
}

impl ServerConfig {
    /// Configuration for a server with no store handle.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, health: HealthContext) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            health,
        }
    }

    /// Attach the pool chosen at startup; without one the server runs degraded.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
