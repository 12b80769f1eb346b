//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established or timed out.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query, insert, or row decoding failed.
        Query { message: String } => "user repository query failed: {message}",
        /// The unique constraint on `email` rejected the insert.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Driven port for the `users` table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return every user ordered by identifier ascending.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Insert a user and return it with the store-generated identifier.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;
}
