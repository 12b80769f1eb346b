//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod store_connector;
mod store_health;
mod user_registration;
mod user_repository;
mod users_query;

pub use store_connector::{ConnectError, StoreConnector};
#[cfg(test)]
pub use store_health::MockStoreHealth;
pub use store_health::{DisconnectedStore, StoreHealth, StoreHealthError};
pub use user_registration::{DisconnectedUserRegistration, UserRegistration};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
pub use users_query::{DisconnectedUsersQuery, UsersQuery};
