//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tokio::time::timeout;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

use super::diesel_error_mapping::{
    DieselFailure, classify_diesel_error, pool_error_message, timeout_message,
};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Deadline applied to every repository call, checkout included.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Wrap `pool`, bounding every call to [`QUERY_TIMEOUT`].
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn bounded<T, F>(&self, operation: &str, fut: F) -> Result<T, UserPersistenceError>
    where
        F: Future<Output = Result<T, UserPersistenceError>>,
    {
        timeout(QUERY_TIMEOUT, fut)
            .await
            .unwrap_or_else(|_| {
                Err(UserPersistenceError::connection(timeout_message(
                    operation,
                    QUERY_TIMEOUT,
                )))
            })
    }
}

fn map_diesel_error(error: diesel::result::Error, email: Option<&str>) -> UserPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::UniqueViolation(message) => match email {
            Some(email) => UserPersistenceError::duplicate_email(email),
            None => UserPersistenceError::query(message),
        },
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    User::try_from(row).map_err(|err| {
        UserPersistenceError::query(format!("invalid user row {id}: {err}"))
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        self.bounded("listing users", async {
            let mut conn = self
                .pool
                .get()
                .await
                .map_err(|err| UserPersistenceError::connection(pool_error_message(err)))?;

            let rows: Vec<UserRow> = users::table
                .select(UserRow::as_select())
                .order(users::id.asc())
                .load(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, None))?;

            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        self.bounded("creating user", async {
            let mut conn = self
                .pool
                .get()
                .await
                .map_err(|err| UserPersistenceError::connection(pool_error_message(err)))?;

            let id: i32 = diesel::insert_into(users::table)
                .values(NewUserRow::from(user))
                .returning(users::id)
                .get_result(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, Some(user.email().as_ref())))?;

            let id = UserId::new(id).map_err(|err| {
                UserPersistenceError::query(format!("store returned invalid id: {err}"))
            })?;
            Ok(user.clone().into_user(id))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn unique_violation_on_insert_names_the_email() {
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );

        let mapped = map_diesel_error(err, Some("ada@example.com"));

        assert_eq!(mapped, UserPersistenceError::duplicate_email("ada@example.com"));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );

        let mapped = map_diesel_error(err, None);

        assert!(matches!(mapped, UserPersistenceError::Connection { .. }));
    }

    #[rstest]
    fn invalid_rows_surface_as_query_errors() {
        let row = UserRow {
            id: 3,
            name: String::new(),
            email: "blank@example.com".to_owned(),
        };

        let err = row_to_user(row).expect_err("empty name is rejected");

        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn whitespace_rows_are_listed() {
        let rows = vec![
            UserRow {
                id: 1,
                name: "Ada".to_owned(),
                email: "ada@example.com".to_owned(),
            },
            UserRow {
                id: 2,
                name: "  ".to_owned(),
                email: "ws@example.com".to_owned(),
            },
        ];

        let users: Vec<User> = rows
            .into_iter()
            .map(row_to_user)
            .collect::<Result<_, _>>()
            .expect("whitespace names are stored verbatim");

        assert_eq!(users.len(), 2);
        assert_eq!(users.get(1).map(|user| user.name().as_ref()), Some("  "));
    }
}
