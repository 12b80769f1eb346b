//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and only see domain
//! ports, so they stay testable without I/O. Degraded mode is expressed by
//! plugging in the disconnected port implementations.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::HealthContext;
use crate::domain::ports::{
    DisconnectedStore, DisconnectedUserRegistration, DisconnectedUsersQuery, StoreHealth,
    UserRegistration, UsersQuery,
};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UsersQuery>,
    pub registration: Arc<dyn UserRegistration>,
    pub store: Arc<dyn StoreHealth>,
}

impl HttpStatePorts {
    /// Ports answering 503 for every data operation.
    pub fn disconnected() -> Self {
        Self {
            users: Arc::new(DisconnectedUsersQuery),
            registration: Arc::new(DisconnectedUserRegistration),
            store: Arc::new(DisconnectedStore),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersQuery>,
    pub registration: Arc<dyn UserRegistration>,
    pub store: Arc<dyn StoreHealth>,
    pub clock: Arc<dyn Clock + Send + Sync>,
    pub health: HealthContext,
}

impl HttpState {
    /// Construct state using the system clock.
    ///
    /// # Examples
    /// ```
    /// use ms_app::domain::HealthContext;
    /// use ms_app::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(
    ///     HttpStatePorts::disconnected(),
    ///     HealthContext { hostname: "app-1".to_owned(), startup_rounds: 12 },
    /// );
    /// assert!(!state.store.is_connected());
    /// ```
    pub fn new(ports: HttpStatePorts, health: HealthContext) -> Self {
        let HttpStatePorts {
            users,
            registration,
            store,
        } = ports;
        Self {
            users,
            registration,
            store,
            clock: Arc::new(DefaultClock),
            health,
        }
    }

    /// Replace the clock used to stamp health reports.
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }
}
