// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User profile and session mutations.
//!
//! This module contains backend-agnostic mutations for the external-auth
//! linked user profiles and their bearer sessions. Role flags are only ever
//! changed here through [`toggle_controller`]/[`set_admin`]; profile upserts
//! never escalate an existing user's roles.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::UserProfileData;
use crate::diesel_schema::{sessions, users};
use crate::error::PersistenceError;
use crate::now_utc_iso8601;
use crate::queries::users::UserRow;

backend_fn! {
/// Creates or refreshes the profile for an authenticated identity.
///
/// On first access the profile is created; on every later login the
/// `username`, `display_name`, and `last_seen_at` fields are refreshed.
/// Role flags are preserved as stored — a login never changes them — with
/// one exception: `grant_admin` marks the server-configured bootstrap
/// admin identity and sets the admin flag.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `external_id` - The auth provider's stable subject id
/// * `username` - The linked username (flight ownership matches this)
/// * `display_name` - The profile display name
/// * `grant_admin` - Whether this identity is the configured bootstrap admin
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn upsert_user_on_login(
    conn: &mut _,
    external_id: &str,
    username: &str,
    display_name: &str,
    grant_admin: bool,
) -> Result<UserProfileData, PersistenceError> {
    conn.transaction(|conn| {
        let now: String = now_utc_iso8601()?;

        let existing: Option<UserRow> = match users::table
            .filter(users::external_id.eq(external_id))
            .select(UserRow::as_select())
            .first(conn)
        {
            Ok(row) => Some(row),
            Err(diesel::result::Error::NotFound) => None,
            Err(e) => return Err(PersistenceError::from(e)),
        };

        let user_id: i64 = match existing {
            Some(row) => {
                diesel::update(users::table.filter(users::user_id.eq(row.user_id)))
                    .set((
                        users::username.eq(username),
                        users::display_name.eq(display_name),
                        users::last_seen_at.eq(Some(now.as_str())),
                        users::is_admin.eq(i32::from(grant_admin || row.is_admin != 0)),
                    ))
                    .execute(conn)?;
                row.user_id
            }
            None => {
                diesel::insert_into(users::table)
                    .values((
                        users::external_id.eq(external_id),
                        users::username.eq(username),
                        users::display_name.eq(display_name),
                        users::is_controller.eq(0),
                        users::is_admin.eq(i32::from(grant_admin)),
                        users::created_at.eq(&now),
                        users::last_seen_at.eq(Some(now.as_str())),
                    ))
                    .execute(conn)?;
                let user_id: i64 = conn.get_last_insert_rowid()?;
                info!(user_id, external_id, "Created user profile on first login");
                user_id
            }
        };

        let row: UserRow = users::table
            .filter(users::user_id.eq(user_id))
            .select(UserRow::as_select())
            .first(conn)?;
        Ok(row.into_profile())
    })
}
}

backend_fn! {
/// Flips a user's controller flag.
///
/// The self-targeting check lives at the API boundary; this mutation only
/// performs the atomic read-flip-write.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The target user
///
/// # Errors
///
/// Returns `UserNotFound` or a database error.
pub fn toggle_controller(
    conn: &mut _,
    user_id: i64,
) -> Result<UserProfileData, PersistenceError> {
    conn.transaction(|conn| {
        let row: UserRow = users::table
            .filter(users::user_id.eq(user_id))
            .select(UserRow::as_select())
            .first(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => PersistenceError::UserNotFound(user_id),
                other => PersistenceError::from(other),
            })?;

        let flipped: i32 = i32::from(row.is_controller == 0);
        diesel::update(users::table.filter(users::user_id.eq(user_id)))
            .set(users::is_controller.eq(flipped))
            .execute(conn)?;

        info!(user_id, is_controller = flipped != 0, "Toggled controller flag");

        let row: UserRow = users::table
            .filter(users::user_id.eq(user_id))
            .select(UserRow::as_select())
            .first(conn)?;
        Ok(row.into_profile())
    })
}
}

backend_fn! {
/// Sets a user's admin flag.
///
/// Reapplying the same value is a no-op. The self-demotion check lives at
/// the API boundary.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The target user
/// * `is_admin` - The new flag value
///
/// # Errors
///
/// Returns `UserNotFound` or a database error.
pub fn set_admin(
    conn: &mut _,
    user_id: i64,
    is_admin: bool,
) -> Result<UserProfileData, PersistenceError> {
    conn.transaction(|conn| {
        let rows_affected: usize =
            diesel::update(users::table.filter(users::user_id.eq(user_id)))
                .set(users::is_admin.eq(i32::from(is_admin)))
                .execute(conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::UserNotFound(user_id));
        }

        info!(user_id, is_admin, "Set admin flag");

        let row: UserRow = users::table
            .filter(users::user_id.eq(user_id))
            .select(UserRow::as_select())
            .first(conn)?;
        Ok(row.into_profile())
    })
}
}

backend_fn! {
/// Creates a new bearer session for a user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The generated bearer token
/// * `user_id` - The user this session belongs to
/// * `expires_at` - The expiry timestamp (ISO 8601)
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn create_session(
    conn: &mut _,
    session_token: &str,
    user_id: i64,
    expires_at: &str,
) -> Result<(), PersistenceError> {
    let now: String = now_utc_iso8601()?;

    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::user_id.eq(user_id),
            sessions::created_at.eq(&now),
            sessions::last_activity_at.eq(&now),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    debug!(user_id, "Created session");
    Ok(())
}
}

backend_fn! {
/// Updates the last-activity timestamp for a session.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_id` - The session row identifier
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_session_activity(conn: &mut _, session_id: i64) -> Result<(), PersistenceError> {
    let now: String = now_utc_iso8601()?;

    diesel::update(sessions::table.filter(sessions::session_id.eq(session_id)))
        .set(sessions::last_activity_at.eq(&now))
        .execute(conn)?;

    Ok(())
}
}

backend_fn! {
/// Deletes a session by its bearer token (logout).
///
/// Deleting an already-absent token is not an error.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The bearer token to invalidate
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(conn: &mut _, session_token: &str) -> Result<(), PersistenceError> {
    diesel::delete(sessions::table.filter(sessions::session_token.eq(session_token)))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Deletes all sessions that expired before the given instant.
///
/// ISO-8601 strings compare lexicographically in timestamp order, so the
/// comparison is a plain string filter.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `now` - The current instant (ISO 8601)
///
/// # Returns
///
/// The number of sessions removed.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(conn: &mut _, now: &str) -> Result<usize, PersistenceError> {
    let removed: usize =
        diesel::delete(sessions::table.filter(sessions::expires_at.lt(now))).execute(conn)?;

    if removed > 0 {
        info!(removed, "Purged expired sessions");
    }
    Ok(removed)
}
}
