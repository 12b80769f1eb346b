//! User data model.
//!
//! Users are created through the registration port and never updated or
//! deleted by this service. The store generates identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum length, in characters, of a user name (`VARCHAR(100)`).
pub const USER_NAME_MAX: usize = 100;
/// Maximum length, in characters, of an email address (`VARCHAR(100)`).
pub const EMAIL_MAX: usize = 100;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifiers come from a `SERIAL` column and are always positive.
    #[error("user id must be positive")]
    NonPositiveId,
    /// The name was empty.
    #[error("name must not be empty")]
    EmptyName,
    /// The name exceeds the column width.
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    /// The email was empty.
    #[error("email must not be empty")]
    EmptyEmail,
    /// The email exceeds the column width.
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
}

/// Store-generated user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct UserId(i32);

impl UserId {
    /// Validate and wrap a raw identifier.
    pub fn new(id: i32) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::NonPositiveId);
        }
        Ok(Self(id))
    }

    /// Raw integer value as stored in the `id` column.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i32 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i32> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

fn validate_text(
    value: &str,
    max: usize,
    empty: UserValidationError,
    too_long: UserValidationError,
) -> Result<(), UserValidationError> {
    if value.is_empty() {
        return Err(empty);
    }
    if value.chars().count() > max {
        return Err(too_long);
    }
    Ok(())
}

/// Display name for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        validate_text(
            &name,
            USER_NAME_MAX,
            UserValidationError::EmptyName,
            UserValidationError::NameTooLong { max: USER_NAME_MAX },
        )?;
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Contact address, unique across all users.
///
/// Only presence and width are checked; the store enforces uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        validate_text(
            &email,
            EMAIL_MAX,
            UserValidationError::EmptyEmail,
            UserValidationError::EmailTooLong { max: EMAIL_MAX },
        )?;
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: UserName,
    email: EmailAddress,
}

impl NewUser {
    /// Bundle validated fields.
    pub fn new(name: UserName, email: EmailAddress) -> Self {
        Self { name, email }
    }

    /// Validate raw form fields.
    ///
    /// The name is checked first so an empty name is always reported,
    /// whatever the email holds.
    pub fn try_from_parts(name: &str, email: &str) -> Result<Self, UserValidationError> {
        let name = UserName::new(name)?;
        let email = EmailAddress::new(email)?;
        Ok(Self::new(name, email))
    }

    /// Requested display name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Requested contact address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Attach the identifier generated by the store.
    pub fn into_user(self, id: UserId) -> User {
        User::new(id, self.name, self.email)
    }
}

/// Application user as stored in the `users` table.
///
/// # Examples
/// ```
/// use ms_app::domain::User;
///
/// let user = User::try_from_parts(1, "Ada", "ada@example.com").expect("valid user");
/// assert_eq!(user.id().get(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct User {
    #[schema(value_type = i32, example = 1)]
    id: UserId,
    #[schema(value_type = String, example = "Ada Lovelace")]
    name: UserName,
    #[schema(value_type = String, example = "ada@example.com")]
    email: EmailAddress,
}

impl User {
    /// Build a user from validated components.
    pub fn new(id: UserId, name: UserName, email: EmailAddress) -> Self {
        Self { id, name, email }
    }

    /// Validate raw column values.
    pub fn try_from_parts(id: i32, name: &str, email: &str) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id)?,
            UserName::new(name)?,
            EmailAddress::new(email)?,
        ))
    }

    /// Store-generated identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Contact address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}
