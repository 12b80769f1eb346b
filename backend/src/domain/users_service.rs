//! User listing and registration services.
//!
//! Implements the driving ports on top of a [`UserRepository`] and maps
//! persistence failures to transport-neutral domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{UserPersistenceError, UserRegistration, UserRepository, UsersQuery};
use crate::domain::{Error, NewUser, User};

/// Message returned when registration hits the unique email constraint.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email already exists";

/// Store-backed users service.
#[derive(Clone)]
pub struct UsersService<R> {
    repository: Arc<R>,
}

impl<R> UsersService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict(DUPLICATE_EMAIL_MESSAGE),
    }
}

#[async_trait]
impl<R> UsersQuery for UsersService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository.list_all().await.map_err(|err| {
            error!(error = %err, "listing users failed");
            map_persistence_error(err)
        })
    }
}

#[async_trait]
impl<R> UserRegistration for UsersService<R>
where
    R: UserRepository,
{
    async fn register(&self, user: NewUser) -> Result<User, Error> {
        match self.repository.insert(&user).await {
            Ok(created) => {
                info!(user_id = %created.id(), "user created");
                Ok(created)
            }
            Err(err) => {
                error!(error = %err, "creating user failed");
                Err(map_persistence_error(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserRepository;
    use crate::domain::{ErrorCode, UserId};
    use rstest::rstest;

    fn new_user() -> NewUser {
        NewUser::try_from_parts("Ada", "ada@example.com").expect("valid user")
    }

    #[rstest]
    #[tokio::test]
    async fn list_users_passes_rows_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_list_all().times(1).returning(|| {
            Ok(vec![
                User::try_from_parts(1, "Ada", "ada@example.com").expect("valid user"),
                User::try_from_parts(2, "Grace", "grace@example.com").expect("valid user"),
            ])
        });
        let service = UsersService::new(Arc::new(repo));

        let users = service.list_users().await.expect("listing succeeds");

        let ids: Vec<i32> = users.iter().map(|user| user.id().get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("decode failed"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn list_users_maps_repository_errors(
        #[case] failure: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockUserRepository::new();
        repo.expect_list_all()
            .times(1)
            .returning(move || Err(failure.clone()));
        let service = UsersService::new(Arc::new(repo));

        let err = service.list_users().await.expect_err("listing fails");

        assert_eq!(err.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn register_returns_generated_identifier() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .withf(|user| user.email().as_ref() == "ada@example.com")
            .times(1)
            .returning(|user| Ok(user.clone().into_user(UserId::new(42).expect("positive id"))));
        let service = UsersService::new(Arc::new(repo));

        let created = service.register(new_user()).await.expect("insert succeeds");

        assert_eq!(created.id().get(), 42);
        assert_eq!(created.name().as_ref(), "Ada");
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_becomes_conflict() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(UserPersistenceError::duplicate_email("ada@example.com")));
        let service = UsersService::new(Arc::new(repo));

        let err = service.register(new_user()).await.expect_err("conflict");

        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), DUPLICATE_EMAIL_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_store_on_insert_is_service_unavailable() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(UserPersistenceError::connection("timed out")));
        let service = UsersService::new(Arc::new(repo));

        let err = service.register(new_user()).await.expect_err("unavailable");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
