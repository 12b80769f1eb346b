//! Diesel table definitions.
//!
//! Kept in step with the DDL in `schema_init.rs` by hand; there is no
//! migration runner.

diesel::table! {
    /// Users registered through the create endpoint.
    users (id) {
        /// `SERIAL` primary key.
        id -> Int4,
        /// Display name, at most 100 characters.
        name -> Varchar,
        /// Unique email address, at most 100 characters.
        email -> Varchar,
        /// Insertion time, defaulted by the database.
        created_at -> Nullable<Timestamp>,
    }
}
