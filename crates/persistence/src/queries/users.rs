// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User profile and session queries.
//!
//! This module contains backend-agnostic queries for retrieving linked user
//! profiles and bearer sessions. All queries use Diesel DSL and work across
//! all supported database backends.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::{SessionData, UserProfileData};
use crate::diesel_schema::{sessions, users};
use crate::error::PersistenceError;

/// Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
pub(crate) struct UserRow {
    pub user_id: i64,
    pub external_id: String,
    pub username: String,
    pub display_name: String,
    pub is_controller: i32,
    pub is_admin: i32,
    pub created_at: String,
    pub last_seen_at: Option<String>,
}

impl UserRow {
    pub(crate) fn into_profile(self) -> UserProfileData {
        UserProfileData {
            user_id: self.user_id,
            external_id: self.external_id,
            username: self.username,
            display_name: self.display_name,
            is_controller: self.is_controller != 0,
            is_admin: self.is_admin != 0,
            created_at: self.created_at,
            last_seen_at: self.last_seen_at,
        }
    }
}

/// Queryable struct for session rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
struct SessionRow {
    session_id: i64,
    session_token: String,
    user_id: i64,
    created_at: String,
    last_activity_at: String,
    expires_at: String,
}

backend_fn! {
/// Retrieves a user profile by its canonical identifier.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The user identifier
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_id(
    conn: &mut _,
    user_id: i64,
) -> Result<Option<UserProfileData>, PersistenceError> {
    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_profile())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Retrieves a user profile by its external auth provider subject id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `external_id` - The auth provider's stable subject id
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_external_id(
    conn: &mut _,
    external_id: &str,
) -> Result<Option<UserProfileData>, PersistenceError> {
    debug!("Looking up user by external_id: {}", external_id);

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::external_id.eq(external_id))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_profile())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Retrieves all user profiles, oldest first.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_users(conn: &mut _) -> Result<Vec<UserProfileData>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(UserRow::into_profile).collect())
}
}

backend_fn! {
/// Retrieves a session by its bearer token.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The bearer token presented by the client
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the session is not found.
pub fn get_session_by_token(
    conn: &mut _,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    let result: Result<SessionRow, diesel::result::Error> = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(SessionRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(SessionData {
            session_id: row.session_id,
            session_token: row.session_token,
            user_id: row.user_id,
            created_at: row.created_at,
            last_activity_at: row.last_activity_at,
            expires_at: row.expires_at,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}
