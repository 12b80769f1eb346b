//! Driving port for creating users.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User};

/// Domain use-case port for registering a new user.
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Persist `user` and return it with its generated identifier.
    ///
    /// A duplicate email yields [`crate::domain::ErrorCode::Conflict`].
    async fn register(&self, user: NewUser) -> Result<User, Error>;
}

/// Registration port used when no store handle exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisconnectedUserRegistration;

#[async_trait]
impl UserRegistration for DisconnectedUserRegistration {
    async fn register(&self, _user: NewUser) -> Result<User, Error> {
        Err(Error::service_unavailable("Database not connected"))
    }
}
