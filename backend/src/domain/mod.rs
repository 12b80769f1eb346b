//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed entities and use cases shared by the HTTP
//! and persistence adapters. Nothing here depends on actix or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, NewUser and their validated fields.
//! - HealthReport and [`assess_health`].
//! - UsersService implementing the user ports over a repository.
//! - [`connection`]: descriptor fallback and startup retry.

pub mod connection;
pub mod error;
pub mod health;
pub mod ports;
pub mod user;
pub mod users_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::health::{
    assess_health, HealthContext, HealthReport, HealthStatus, HEALTH_DEADLINE,
};
pub use self::user::{
    EmailAddress, NewUser, User, UserId, UserName, UserValidationError, EMAIL_MAX, USER_NAME_MAX,
};
pub use self::users_service::{UsersService, DUPLICATE_EMAIL_MESSAGE};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use ms_app::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::method_not_allowed("Method not allowed"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
