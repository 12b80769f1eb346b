//! Internal Diesel row types for the `users` table.

use diesel::prelude::*;

use crate::domain::{NewUser, User, UserValidationError};

use super::schema::users;

/// Row read from `users`. `created_at` is not selected.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl TryFrom<UserRow> for User {
    type Error = UserValidationError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        User::try_from_parts(row.id, &row.name, &row.email)
    }
}

/// Insertable row; `id` and `created_at` come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            name: user.name().as_ref(),
            email: user.email().as_ref(),
        }
    }
}
