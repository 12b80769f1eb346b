//! Driving port for user-facing queries.
//!
//! Inbound adapters use this port to read users without importing
//! persistence concerns. [`DisconnectedUsersQuery`] stands in when startup
//! ended in degraded mode.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Domain use-case port for listing users.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every user ordered by identifier ascending.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}

/// Users query used when no store handle exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisconnectedUsersQuery;

#[async_trait]
impl UsersQuery for DisconnectedUsersQuery {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        Err(Error::service_unavailable("Database not connected"))
    }
}
